use uuid::Uuid;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::registry::CommandEntry;
use crate::core::services::{KindFilter, TransactionFilter, TransactionService};
use crate::domain::transaction::{RepeatFrequency, RepeatRule, Transaction};
use crate::domain::CategoryKind;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "transaction",
        "Record and manage income and expense entries",
        "transaction <add|edit|remove|list> ...",
        cmd_transaction,
    )]
}

fn cmd_transaction(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction <add|edit|remove|list>".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "edit" => handle_edit(context, rest),
        "remove" => handle_remove(context, rest),
        "list" => handle_list(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown transaction subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 5 {
        return Err(CommandError::InvalidArguments(
            "usage: transaction add <expense|income> <amount> <category> <YYYY-MM-DD> <description...> [--repeat daily|weekly|monthly|yearly]"
                .into(),
        ));
    }

    let is_income = match args[0].to_ascii_lowercase().as_str() {
        "expense" => false,
        "income" => true,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "transaction kind must be `expense` or `income`, got `{}`",
                other
            )))
        }
    };
    let amount = context.parse_amount_arg(args[1])?;
    let category = args[2].to_string();
    let date = ShellContext::parse_date_arg(args[3])?;

    let mut description_parts: Vec<&str> = Vec::new();
    let mut repeat: Option<RepeatRule> = None;
    let mut rest = args[4..].iter();
    while let Some(part) = rest.next() {
        if *part == "--repeat" {
            let raw = rest.next().ok_or_else(|| {
                CommandError::InvalidArguments("--repeat requires a frequency".into())
            })?;
            let frequency = RepeatFrequency::parse(raw).ok_or_else(|| {
                CommandError::InvalidArguments(format!("unknown repeat frequency `{}`", raw))
            })?;
            repeat = Some(RepeatRule::new(frequency));
        } else {
            description_parts.push(part);
        }
    }
    let description = description_parts.join(" ");
    if description.is_empty() {
        return Err(CommandError::InvalidArguments(
            "transaction description cannot be empty".into(),
        ));
    }

    let kind = if is_income {
        CategoryKind::Income
    } else {
        CategoryKind::Expense
    };
    context.with_book_mut(|book| {
        if !book.categories.contains(&category, kind) {
            return Err(CommandError::InvalidArguments(format!(
                "category `{}` is not a known {} category. Use `category list`.",
                category,
                if is_income { "income" } else { "expense" }
            )));
        }
        let mut txn = Transaction::new(description.clone(), amount, category.clone(), date, is_income);
        if let Some(rule) = repeat {
            txn = txn.with_repeat(rule);
        }
        TransactionService::add(book, txn)?;
        Ok(())
    })?;
    cli_io::print_success(format!(
        "Transaction saved: {} {} ({})",
        description,
        context.format_amount(if is_income { amount.abs() } else { -amount.abs() }),
        category
    ));
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: transaction edit <index> <amount|category|date|description|note> <value...>".into(),
        ));
    }
    let id = transaction_id_at(context, args[0])?;
    let field = args[1].to_ascii_lowercase();
    let value = args[2..].join(" ");

    match field.as_str() {
        "amount" => {
            let amount = context.parse_amount_arg(&value)?;
            context.with_book_mut(|book| {
                TransactionService::update(book, id, |txn| txn.amount = amount)
                    .map_err(CommandError::from)
            })?;
        }
        "category" => {
            context.with_book_mut(|book| {
                TransactionService::update(book, id, |txn| txn.category = value.clone())
                    .map_err(CommandError::from)
            })?;
        }
        "date" => {
            let date = ShellContext::parse_date_arg(&value)?;
            context.with_book_mut(|book| {
                TransactionService::update(book, id, |txn| txn.date = date)
                    .map_err(CommandError::from)
            })?;
        }
        "description" => {
            context.with_book_mut(|book| {
                TransactionService::update(book, id, |txn| txn.description = value.clone())
                    .map_err(CommandError::from)
            })?;
        }
        "note" => {
            context.with_book_mut(|book| {
                TransactionService::update(book, id, |txn| {
                    txn.note = if value.is_empty() { None } else { Some(value.clone()) }
                })
                .map_err(CommandError::from)
            })?;
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown transaction field `{}`",
                other
            )))
        }
    }
    cli_io::print_success("Transaction updated.");
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw_index) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction remove <index>".into(),
        ));
    };
    let id = transaction_id_at(context, raw_index)?;
    if !context.confirm("Remove this transaction?")? {
        cli_io::print_info("Operation cancelled.");
        return Ok(());
    }
    let removed = context.with_book_mut(|book| {
        TransactionService::remove(book, id).map_err(CommandError::from)
    })?;
    cli_io::print_success(format!("Transaction removed: {}", removed.description));
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut filter = TransactionFilter::default();
    for arg in args {
        match arg.to_ascii_lowercase().as_str() {
            "expense" | "expenses" => filter.kind = KindFilter::Expense,
            "income" => filter.kind = KindFilter::Income,
            other => filter.category = Some(other.to_string()),
        }
    }

    let lines = context.with_book(|book| {
        let entries = TransactionService::filter(book, &filter);
        Ok(entries
            .iter()
            .map(|txn| {
                (
                    txn.date,
                    txn.description.clone(),
                    txn.category.clone(),
                    txn.amount,
                    txn.is_repeating(),
                )
            })
            .collect::<Vec<_>>())
    })?;

    if lines.is_empty() {
        cli_io::print_warning("No transactions recorded.");
        return Ok(());
    }
    for (idx, (date, description, category, amount, repeating)) in lines.iter().enumerate() {
        let repeat_marker = if *repeating { " ↻" } else { "" };
        cli_io::print_info(format!(
            "{:>3}. {}  {:<24} {:<10} {}{}",
            idx + 1,
            context.format_date(*date),
            description,
            category,
            context.format_amount(*amount),
            repeat_marker
        ));
    }
    Ok(())
}

/// Resolves a 1-based index in the newest-first listing to a transaction id.
fn transaction_id_at(context: &ShellContext, raw: &str) -> Result<Uuid, CommandError> {
    let index: usize = raw
        .parse()
        .map_err(|_| CommandError::InvalidArguments("transaction index must be numeric".into()))?;
    context.with_book(|book| {
        let entries = TransactionService::list(book);
        entries
            .get(index.saturating_sub(1))
            .map(|txn| txn.id)
            .ok_or_else(|| CommandError::InvalidArguments("transaction index out of range".into()))
    })
}
