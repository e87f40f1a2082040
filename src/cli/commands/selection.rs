use super::{join_rest, parse_index, require_args};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::errors::CommandResult;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "select",
            "Toggle a category in the selection",
            "select <index>",
            cmd_select,
        ),
        CommandEntry::new(
            "selection",
            "List selected categories",
            "selection",
            cmd_selection,
        ),
        CommandEntry::new(
            "clear-selection",
            "Empty the selection",
            "clear-selection",
            cmd_clear_selection,
        ),
        CommandEntry::new(
            "spread",
            "Append selected categories to every month",
            "spread",
            cmd_spread,
        ),
        CommandEntry::new(
            "copy",
            "Print the selection as clipboard text",
            "copy",
            cmd_copy,
        ),
        CommandEntry::new(
            "paste",
            "Append categories from clipboard text to the current month",
            "paste <text>",
            cmd_paste,
        ),
    ]
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "select <index>")?;
    let index = parse_index(args[0], "category index")?;
    if !context.app.toggle_selection(index) {
        output::warning(format!(
            "No category at index {index} in {}.",
            context.app.current_period()
        ));
        return Ok(());
    }
    output::info(format!("{} categories selected.", context.app.selection().len()));
    Ok(())
}

fn cmd_selection(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let selection = context.app.selection();
    if selection.is_empty() {
        output::info("Selection is empty.");
        return Ok(());
    }
    output::section("Selection");
    for category in selection.categories() {
        output::line(format!("  {} ({})", category.name, category.kind));
    }
    Ok(())
}

fn cmd_clear_selection(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.app.clear_selection();
    output::info("Selection cleared.");
    Ok(())
}

fn cmd_spread(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.app.selection().is_empty() {
        output::info("Nothing selected to spread.");
        return Ok(());
    }
    context.app.spread_selection();
    Ok(())
}

fn cmd_copy(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let text = context.app.copy_selection()?;
    output::line(text);
    Ok(())
}

fn cmd_paste(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "paste <text>")?;
    let text = clipboard_text(context.raw_arguments(), args);
    context.app.paste_categories(&text);
    Ok(())
}

/// Prefers the line as typed so JSON quotes survive tokenising. A single
/// shell-quoted argument is taken unquoted.
fn clipboard_text(raw: Option<&str>, args: &[&str]) -> String {
    match raw {
        Some(raw) if !(args.len() == 1 && raw.starts_with(['\'', '"'])) => raw.to_string(),
        _ => join_rest(args),
    }
}
