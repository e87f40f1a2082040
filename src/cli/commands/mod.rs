pub mod ledger;
pub mod selection;
pub mod system;
pub mod transfer;

use crate::cli::registry::CommandEntry;
use crate::errors::CommandError;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(ledger::definitions());
    commands.extend(selection::definitions());
    commands.extend(transfer::definitions());
    commands
}

/// Fails with the usage line unless at least `count` arguments are present.
pub(crate) fn require_args(args: &[&str], count: usize, usage: &str) -> Result<(), CommandError> {
    if args.len() < count {
        return Err(CommandError::InvalidArguments(format!("usage: {usage}")));
    }
    Ok(())
}

pub(crate) fn parse_index(raw: &str, what: &str) -> Result<usize, CommandError> {
    raw.parse::<usize>()
        .map_err(|_| CommandError::InvalidArguments(format!("{what} must be a non-negative number")))
}

/// Joins trailing arguments so unquoted names with spaces still work.
pub(crate) fn join_rest(args: &[&str]) -> String {
    args.join(" ")
}
