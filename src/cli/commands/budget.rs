use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::registry::CommandEntry;
use crate::core::services::BudgetService;
use crate::domain::period::DateWindow;
use crate::domain::{Budget, CategoryKind};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "budget",
        "Set category budgets and check threshold alerts",
        "budget <set|remove|list|sync|overview> ...",
        cmd_budget,
    )]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: budget <set|remove|list|sync|overview>".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "set" => handle_set(context, rest),
        "remove" => handle_remove(context, rest),
        "list" => handle_list(context, rest),
        "sync" => handle_sync(context),
        "overview" => handle_overview(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown budget subcommand `{}`",
            other
        ))),
    }
}

fn month_arg(context: &ShellContext, raw: Option<&&str>) -> Result<DateWindow, CommandError> {
    match raw {
        Some(value) => ShellContext::parse_month_arg(value),
        None => Ok(context.current_month()),
    }
}

fn handle_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: budget set <category> <amount> [threshold%] [YYYY-MM]".into(),
        ));
    }
    let category = args[0].to_string();
    let amount = context.parse_amount_arg(args[1])?;
    if amount <= 0.0 {
        return Err(CommandError::InvalidArguments(
            "budget amount must be greater than 0".into(),
        ));
    }
    let threshold: Option<u8> = match args.get(2) {
        Some(raw) => Some(raw.parse().map_err(|_| {
            CommandError::InvalidArguments("threshold must be a percentage (0-100)".into())
        })?),
        None => None,
    };
    let window = month_arg(context, args.get(3))?;

    let created = context.with_book_mut(|book| {
        if !book.categories.contains(&category, CategoryKind::Expense) {
            return Err(CommandError::InvalidArguments(format!(
                "category `{}` is not a known expense category. Use `category list`.",
                category
            )));
        }
        let existing = book
            .budgets
            .iter_mut()
            .find(|budget| budget.category.eq_ignore_ascii_case(&category) && budget.window == window);
        match existing {
            Some(budget) => {
                budget.amount = amount;
                if let Some(threshold) = threshold {
                    budget.notification_threshold = threshold;
                }
                book.touch();
                Ok(false)
            }
            None => {
                let mut budget = Budget::new(category.clone(), amount, window);
                if let Some(threshold) = threshold {
                    budget = budget.with_threshold(threshold);
                }
                book.add_budget(budget);
                Ok(true)
            }
        }
    })?;

    if created {
        cli_io::print_success(format!(
            "Budget saved: {} {} per month.",
            category,
            context.format_amount(amount)
        ));
    } else {
        cli_io::print_success(format!("Budget updated for `{}`.", category));
    }
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(category) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: budget remove <category> [YYYY-MM]".into(),
        ));
    };
    let window = month_arg(context, args.get(1))?;
    if !context.confirm(&format!("Remove the `{}` budget?", category))? {
        cli_io::print_info("Operation cancelled.");
        return Ok(());
    }
    let removed = context.with_book_mut(|book| {
        let id = book
            .budgets
            .iter()
            .find(|budget| budget.category.eq_ignore_ascii_case(category) && budget.window == window)
            .map(|budget| budget.id);
        match id {
            Some(id) => {
                book.remove_budget(id);
                Ok(true)
            }
            None => Ok(false),
        }
    })?;
    if removed {
        cli_io::print_success(format!("Budget removed for `{}`.", category));
    } else {
        cli_io::print_warning(format!("No `{}` budget found for that month.", category));
    }
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let window = month_arg(context, args.first())?;
    let rows = context.with_book(|book| Ok(BudgetService::rows_for_window(book, window)))?;

    cli_io::print_info(format!(
        "Budgets {} - {}:",
        context.format_date(window.start),
        context.format_date(window.last_day())
    ));
    for row in &rows {
        let limit = if row.amount > 0.0 {
            format!(
                "{} of {} ({}%)",
                context.format_amount(row.spent),
                context.format_amount(row.amount),
                row.progress_percentage()
            )
        } else {
            format!("{} (no budget)", context.format_amount(row.spent))
        };
        cli_io::print_info(format!("  {:<12} {}", row.category, limit));
    }
    Ok(())
}

fn handle_sync(context: &mut ShellContext) -> CommandResult {
    let today = context.today();
    let (alerts, recurring) = context.with_book_mut(|book| {
        let alerts = BudgetService::sync_spent(book, today);
        let recurring = BudgetService::recurring_expense_alerts(book, today);
        Ok((alerts, recurring))
    })?;

    if alerts.is_empty() && recurring.is_empty() {
        cli_io::print_info("Budgets are up to date. No alerts.");
        return Ok(());
    }
    for alert in &alerts {
        cli_io::print_warning(format!(
            "{} budget reached {}%: {} of {}.",
            alert.category,
            alert.percentage,
            context.format_amount(alert.spent),
            context.format_amount(alert.limit)
        ));
    }
    for notice in &recurring {
        cli_io::print_info(format!(
            "Recurring expense counted in `{}`: {} ({}).",
            notice.category,
            notice.description,
            context.format_amount(notice.amount)
        ));
    }
    Ok(())
}

fn handle_overview(context: &mut ShellContext) -> CommandResult {
    let today = context.today();
    let overview = context.with_book(|book| {
        Ok(BudgetService::overview(BudgetService::active_budgets(
            book, today,
        )))
    })?;
    cli_io::print_info(format!(
        "Total budget: {}",
        context.format_amount(overview.total_budget)
    ));
    cli_io::print_info(format!(
        "Total spent: {} ({}%)",
        context.format_amount(overview.total_spent),
        overview.progress_percentage
    ));
    cli_io::print_info(format!(
        "Remaining: {}",
        context.format_amount(overview.remaining)
    ));
    Ok(())
}
