use balance_core::Action;
use balance_domain::{CategoryType, Period};

use super::{join_rest, parse_index, require_args};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::errors::{CommandError, CommandResult};
use crate::utils::format_amount;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "show",
            "List categories of the current month",
            "show",
            cmd_show,
        ),
        CommandEntry::new(
            "totals",
            "Show income, expense and net totals",
            "totals [year]",
            cmd_totals,
        ),
        CommandEntry::new(
            "month",
            "Show or change the current month",
            "month [name]",
            cmd_month,
        ),
        CommandEntry::new(
            "user",
            "Show or switch the signed-in user",
            "user [email]",
            cmd_user,
        ),
        CommandEntry::new(
            "sign-out",
            "Return to the default user",
            "sign-out",
            cmd_sign_out,
        ),
        CommandEntry::new(
            "add-category",
            "Add an income or expense category",
            "add-category <income|expense> <name>",
            cmd_add_category,
        ),
        CommandEntry::new(
            "rename-category",
            "Rename a category",
            "rename-category <index> <name>",
            cmd_rename_category,
        ),
        CommandEntry::new(
            "delete-category",
            "Delete a category",
            "delete-category <index>",
            cmd_delete_category,
        ),
        CommandEntry::new(
            "add-item",
            "Add an item to a category",
            "add-item <index> <name>",
            cmd_add_item,
        ),
        CommandEntry::new(
            "rename-item",
            "Rename an item",
            "rename-item <index> <item> <name>",
            cmd_rename_item,
        ),
        CommandEntry::new(
            "set-value",
            "Set the amount of an item",
            "set-value <index> <item> <amount>",
            cmd_set_value,
        ),
        CommandEntry::new(
            "delete-item",
            "Delete an item",
            "delete-item <index> <item>",
            cmd_delete_item,
        ),
    ]
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let app = &context.app;
    output::section(app.current_period());
    let categories = app.current_categories();
    if categories.is_empty() {
        output::info("No categories yet. Use `add-category` to create one.");
        return Ok(());
    }
    for (index, category) in categories.iter().enumerate() {
        let marker = if app.selection().contains(&category.name) {
            "*"
        } else {
            " "
        };
        output::line(format!(
            "{marker}[{index}] {} ({})  {}",
            category.name,
            category.kind,
            format_amount(category.total())
        ));
        for (item_index, section) in category.sections.iter().enumerate() {
            output::line(format!(
                "      [{item_index}] {}  {}",
                section.name,
                format_amount(section.value)
            ));
        }
    }
    Ok(())
}

fn cmd_totals(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        None => {
            let period = context.app.current_period();
            let totals = context.app.totals();
            output::section(format!("Totals for {period}"));
            output::line(format!("  Income : {}", format_amount(totals.total_income)));
            output::line(format!("  Expense: {}", format_amount(totals.total_expense)));
            output::line(format!("  Net    : {}", format_amount(totals.net())));
        }
        Some("year") => {
            output::section("Yearly totals");
            for period in Period::ALL {
                let totals = context.app.totals_for(period);
                output::line(format!(
                    "  {:<9}  income {:>12}  expense {:>12}  net {:>12}",
                    period.label(),
                    format_amount(totals.total_income),
                    format_amount(totals.total_expense),
                    format_amount(totals.net())
                ));
            }
        }
        Some(other) => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown totals scope `{other}`; usage: totals [year]"
            )))
        }
    }
    output::line(format!(
        "  Annual net: {}",
        format_amount(context.app.annual_net())
    ));
    Ok(())
}

fn cmd_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        output::info(format!("Current month: {}", context.app.current_period()));
        return Ok(());
    };
    let period: Period = raw
        .parse()
        .map_err(|err: balance_domain::UnknownPeriod| CommandError::InvalidArguments(err.to_string()))?;
    context.app.set_current_period(period);
    output::success(format!("Current month set to {period}."));
    Ok(())
}

fn cmd_user(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(user) = args.first() else {
        output::info(format!("Signed in as {}", context.app.user()));
        return Ok(());
    };
    if user.trim().is_empty() {
        return Err(CommandError::InvalidArguments(
            "user identity cannot be empty".into(),
        ));
    }
    context.app.set_user(user.trim());
    output::success(format!("Signed in as {}.", context.app.user()));
    Ok(())
}

fn cmd_sign_out(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.app.sign_out();
    Ok(())
}

fn cmd_add_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "add-category <income|expense> <name>";
    require_args(args, 2, USAGE)?;
    let category_type: CategoryType = args[0]
        .parse()
        .map_err(CommandError::InvalidArguments)?;
    let name = join_rest(&args[1..]);
    let period = context.app.current_period();
    context.app.dispatch(Action::AddCategory {
        period,
        category_type,
        name: name.clone(),
    });
    output::success(format!("Added {category_type} category `{name}` to {period}."));
    Ok(())
}

fn cmd_rename_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "rename-category <index> <name>")?;
    let index = parse_index(args[0], "category index")?;
    let period = context.app.current_period();
    context.app.dispatch(Action::ChangeCategoryName {
        period,
        index,
        name: join_rest(&args[1..]),
    });
    Ok(())
}

fn cmd_delete_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "delete-category <index>")?;
    let index = parse_index(args[0], "category index")?;
    let period = context.app.current_period();
    context.app.dispatch(Action::DeleteCategory { period, index });
    Ok(())
}

fn cmd_add_item(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "add-item <index> <name>")?;
    let index = parse_index(args[0], "category index")?;
    let period = context.app.current_period();
    context.app.dispatch(Action::AddCategoryItem {
        period,
        index,
        name: join_rest(&args[1..]),
    });
    Ok(())
}

fn cmd_rename_item(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, "rename-item <index> <item> <name>")?;
    let index = parse_index(args[0], "category index")?;
    let item_index = parse_index(args[1], "item index")?;
    let period = context.app.current_period();
    context.app.dispatch(Action::ChangeCategoryItemName {
        period,
        index,
        item_index,
        name: join_rest(&args[2..]),
    });
    Ok(())
}

fn cmd_set_value(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, "set-value <index> <item> <amount>")?;
    let index = parse_index(args[0], "category index")?;
    let item_index = parse_index(args[1], "item index")?;
    let value = parse_amount(args[2])?;
    let period = context.app.current_period();
    context.app.dispatch(Action::ChangeCategoryItemValue {
        period,
        index,
        item_index,
        value,
    });
    Ok(())
}

fn cmd_delete_item(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "delete-item <index> <item>")?;
    let index = parse_index(args[0], "category index")?;
    let item_index = parse_index(args[1], "item index")?;
    let period = context.app.current_period();
    context.app.dispatch(Action::DeleteCategoryItem {
        period,
        index,
        item_index,
    });
    Ok(())
}

fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{raw}` is not a valid amount"
        ))),
    }
}
