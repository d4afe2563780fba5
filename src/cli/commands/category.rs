use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::registry::CommandEntry;
use crate::domain::CategoryKind;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "category",
        "List and customize transaction categories",
        "category <list|add|remove> ...",
        cmd_category,
    )]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: category <list|add|remove>".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "list" => handle_list(context),
        "add" => handle_add(context, rest),
        "remove" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category subcommand `{}`",
            other
        ))),
    }
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let (expense, income) = context.with_book(|book| {
        Ok((
            book.categories
                .expense_names()
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>(),
            book.categories
                .income_names()
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>(),
        ))
    })?;
    cli_io::print_info(format!("Expense categories: {}", expense.join(", ")));
    cli_io::print_info(format!("Income categories: {}", income.join(", ")));
    Ok(())
}

fn parse_kind(raw: &str) -> Result<CategoryKind, CommandError> {
    match raw.to_ascii_lowercase().as_str() {
        "expense" => Ok(CategoryKind::Expense),
        "income" => Ok(CategoryKind::Income),
        other => Err(CommandError::InvalidArguments(format!(
            "category kind must be `expense` or `income`, got `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: category add <expense|income> <name>".into(),
        ));
    }
    let kind = parse_kind(args[0])?;
    let name = args[1..].join(" ");
    context.with_book_mut(|book| {
        book.categories
            .add_custom(&name, kind)
            .map_err(CommandError::from)?;
        book.touch();
        Ok(())
    })?;
    cli_io::print_success(format!("Category `{}` added.", name));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: category remove <name>".into(),
        ));
    };
    let removed = context.with_book_mut(|book| {
        let removed = book
            .categories
            .remove_custom(name)
            .map_err(CommandError::from)?;
        book.touch();
        Ok(removed)
    })?;
    cli_io::print_success(format!("Category `{}` removed.", removed.name));
    Ok(())
}
