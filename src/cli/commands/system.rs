use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::errors::{CommandError, CommandResult};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "color",
            "Enable or disable colored output",
            "color <on|off>",
            cmd_color,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => {
                output::section(entry.name);
                output::line(format!("  {}", entry.description));
                output::line(format!("  usage: {}", entry.usage));
            }
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    output::section("Commands");
    let width = context
        .registry
        .iter()
        .map(|entry| entry.usage.len())
        .max()
        .unwrap_or(0);
    for entry in context.registry.iter() {
        output::line(format!("  {:<width$}  {}", entry.usage, entry.description));
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(meta);
    for (label, value) in meta.rows() {
        output::line(format!("  {label:<12}: {value}"));
    }
    Ok(())
}

fn cmd_color(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let enabled = match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("on") => true,
        Some("off") => false,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: color <on|off>".into(),
            ))
        }
    };
    context.config.ui_color_enabled = enabled;
    context.config_manager.save(&context.config)?;
    output::set_preferences(output::OutputPreferences {
        color_enabled: enabled,
    });
    output::success(format!(
        "Colored output {}.",
        if enabled { "enabled" } else { "disabled" }
    ));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
