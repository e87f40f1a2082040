use std::path::PathBuf;

use super::{join_rest, require_args};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::errors::CommandResult;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write all months to a JSON file",
            "export [directory]",
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Replace all months with a JSON file",
            "import <file>",
            cmd_import,
        ),
    ]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let dir = if args.is_empty() {
        dirs::document_dir().unwrap_or_else(|| context.base_dir().join("exports"))
    } else {
        PathBuf::from(join_rest(args))
    };
    let file_name = context.config.export_file_name.clone();
    // Failures are reported through the notifier.
    context.app.export_to_dir(&dir, &file_name);
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "import <file>")?;
    let path = PathBuf::from(join_rest(args));
    context.app.import_from_path(&path);
    Ok(())
}
