use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::registry::CommandEntry;
use crate::core::services::GoalService;
use crate::domain::SavingsGoal;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "goal",
        "Track savings goals and contributions",
        "goal <add|contribute|list|remove> ...",
        cmd_goal,
    )]
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: goal <add|contribute|list|remove>".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "contribute" => handle_contribute(context, rest),
        "list" => handle_list(context),
        "remove" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown goal subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: goal add <name> <target_amount> <end YYYY-MM-DD> [description...]".into(),
        ));
    }
    let name = args[0].to_string();
    let target = context.parse_amount_arg(args[1])?;
    let end_date = ShellContext::parse_date_arg(args[2])?;
    let description = if args.len() > 3 {
        Some(args[3..].join(" "))
    } else {
        None
    };
    let start_date = context.today();
    if end_date <= start_date {
        return Err(CommandError::InvalidArguments(
            "goal end date must be in the future".into(),
        ));
    }

    context.with_book_mut(|book| {
        let mut goal = SavingsGoal::new(name.clone(), target, start_date, end_date);
        if let Some(description) = description.clone() {
            goal = goal.with_description(description);
        }
        GoalService::add(book, goal).map_err(CommandError::from)?;
        Ok(())
    })?;
    cli_io::print_success(format!(
        "Goal saved: {} targeting {}.",
        name,
        context.format_amount(target)
    ));
    Ok(())
}

fn handle_contribute(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: goal contribute <name> <amount>".into(),
        ));
    }
    let name = args[0];
    let amount = context.parse_amount_arg(args[1])?;
    let today = context.today();

    let completed = context.with_book_mut(|book| {
        let goal_id = book
            .goal_by_name(name)
            .map(|goal| goal.id)
            .ok_or_else(|| CommandError::InvalidArguments(format!("goal `{}` not found", name)))?;
        GoalService::contribute(book, goal_id, amount, today).map_err(CommandError::from)?;
        Ok(book.goal(goal_id).map(|goal| goal.completed).unwrap_or(false))
    })?;

    cli_io::print_success(format!(
        "Contributed {} to `{}`.",
        context.format_amount(amount),
        name
    ));
    if completed {
        cli_io::print_success(format!("Goal `{}` is complete!", name));
    }
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let rows = context.with_book(|book| {
        Ok(GoalService::list(book)
            .iter()
            .map(|goal| {
                (
                    goal.name.clone(),
                    goal.current_amount,
                    goal.target_amount,
                    goal.progress_percentage(),
                    goal.end_date,
                    goal.completed,
                )
            })
            .collect::<Vec<_>>())
    })?;

    if rows.is_empty() {
        cli_io::print_warning("No savings goals yet.");
        return Ok(());
    }
    for (name, current, target, progress, end_date, completed) in rows {
        let status = if completed { " (complete)" } else { "" };
        cli_io::print_info(format!(
            "{:<16} {} of {} ({}%) by {}{}",
            name,
            context.format_amount(current),
            context.format_amount(target),
            progress,
            context.format_date(end_date),
            status
        ));
    }
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: goal remove <name>".into()));
    };
    if !context.confirm(&format!("Remove goal `{}`?", name))? {
        cli_io::print_info("Operation cancelled.");
        return Ok(());
    }
    let removed = context.with_book_mut(|book| {
        let goal_id = book
            .goal_by_name(name)
            .map(|goal| goal.id)
            .ok_or_else(|| CommandError::InvalidArguments(format!("goal `{}` not found", name)))?;
        GoalService::remove(book, goal_id).map_err(CommandError::from)
    })?;
    cli_io::print_success(format!("Goal removed: {}", removed.name));
    Ok(())
}
