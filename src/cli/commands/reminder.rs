use uuid::Uuid;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::registry::CommandEntry;
use crate::core::services::ReminderService;
use crate::domain::Reminder;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "reminder",
        "Manage payment reminders",
        "reminder <add|done|list|due|remove> ...",
        cmd_reminder,
    )]
}

fn cmd_reminder(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: reminder <add|done|list|due|remove>".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "done" => handle_done(context, rest),
        "list" => handle_list(context, false),
        "due" => handle_list(context, true),
        "remove" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown reminder subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: reminder add <title> <amount> <YYYY-MM-DDTHH:MM>".into(),
        ));
    }
    let title = args[0].to_string();
    let amount = context.parse_amount_arg(args[1])?;
    let due_at = ShellContext::parse_datetime_arg(args[2])?;

    context.with_book_mut(|book| {
        ReminderService::add(book, Reminder::new(title.clone(), amount, due_at))
            .map_err(CommandError::from)?;
        Ok(())
    })?;
    cli_io::print_success(format!("Reminder saved: {}.", title));
    Ok(())
}

fn handle_done(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw_index) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: reminder done <index>".into()));
    };
    let id = reminder_id_at(context, raw_index)?;
    context.with_book_mut(|book| ReminderService::complete(book, id).map_err(CommandError::from))?;
    cli_io::print_success("Reminder marked as done.");
    Ok(())
}

fn handle_list(context: &mut ShellContext, due_only: bool) -> CommandResult {
    let now = context.now();
    let rows = context.with_book(|book| {
        let reminders = if due_only {
            ReminderService::due(book, now)
        } else {
            ReminderService::list(book)
        };
        Ok(reminders
            .iter()
            .map(|reminder| {
                (
                    reminder.title.clone(),
                    reminder.amount,
                    reminder.due_at,
                    reminder.completed,
                    reminder.is_overdue(now),
                )
            })
            .collect::<Vec<_>>())
    })?;

    if rows.is_empty() {
        if due_only {
            cli_io::print_info("Nothing due.");
        } else {
            cli_io::print_warning("No reminders.");
        }
        return Ok(());
    }
    for (idx, (title, amount, due_at, completed, overdue)) in rows.iter().enumerate() {
        let marker = if *completed {
            "done"
        } else if *overdue {
            "OVERDUE"
        } else {
            "pending"
        };
        cli_io::print_info(format!(
            "{:>3}. {:<20} {} due {} [{}]",
            idx + 1,
            title,
            context.format_amount(*amount),
            due_at.format("%d/%m/%Y %H:%M"),
            marker
        ));
    }
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw_index) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: reminder remove <index>".into(),
        ));
    };
    let id = reminder_id_at(context, raw_index)?;
    let removed = context
        .with_book_mut(|book| ReminderService::remove(book, id).map_err(CommandError::from))?;
    cli_io::print_success(format!("Reminder removed: {}", removed.title));
    Ok(())
}

/// Resolves a 1-based index in the soonest-first listing to a reminder id.
fn reminder_id_at(context: &ShellContext, raw: &str) -> Result<Uuid, CommandError> {
    let index: usize = raw
        .parse()
        .map_err(|_| CommandError::InvalidArguments("reminder index must be numeric".into()))?;
    context.with_book(|book| {
        let reminders = ReminderService::list(book);
        reminders
            .get(index.saturating_sub(1))
            .map(|reminder| reminder.id)
            .ok_or_else(|| CommandError::InvalidArguments("reminder index out of range".into()))
    })
}
