use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::registry::CommandEntry;
use crate::domain::Book;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "book",
        "Create, load, save, and back up tracking books",
        "book <new|load|save|backup|backups|restore> ...",
        cmd_book,
    )]
}

fn cmd_book(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: book <new|load|save|backup|backups|restore>".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "new" => handle_new(context, rest),
        "load" => handle_load(context, rest),
        "save" => handle_save(context, rest),
        "backup" => handle_backup(context, rest),
        "backups" => handle_list_backups(context),
        "restore" => handle_restore(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown book subcommand `{}`",
            other
        ))),
    }
}

fn handle_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: book new <name>".into()));
    }
    let name = args.join(" ");
    context.set_book(Book::new(name.clone()), None, Some(name));
    cli_io::print_success("New book created.");
    Ok(())
}

fn handle_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: book load <name>".into()));
    };
    let outcome = context.manager.load(name)?;
    context.report_load(&outcome.warnings);
    cli_io::print_success(format!(
        "Book `{}` loaded from {}.",
        name,
        outcome.path.display()
    ));
    context.update_last_opened(Some(name))?;
    Ok(())
}

fn handle_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args.first() {
        Some(name) => context.manager.save_as(name)?,
        None => context.manager.save()?,
    };
    let name = context.require_named_book()?;
    cli_io::print_success(format!("Book `{}` saved to {}.", name, path.display()));
    context.update_last_opened(Some(&name))?;
    Ok(())
}

fn handle_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    };
    let path = context.manager.backup(note.as_deref())?;
    cli_io::print_success(format!("Backup created: {}", path.display()));
    Ok(())
}

fn handle_list_backups(context: &mut ShellContext) -> CommandResult {
    let name = context.require_named_book()?;
    let backups = context.manager.list_backups(&name)?;
    if backups.is_empty() {
        cli_io::print_warning("No backups available.");
        return Ok(());
    }
    cli_io::print_info("Available backups:");
    for (idx, backup_name) in backups.iter().enumerate() {
        cli_io::print_info(format!("  {:>2}. {}", idx + 1, backup_name));
    }
    Ok(())
}

fn handle_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(reference) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: book restore <backup_name|index>".into(),
        ));
    };
    let name = context.require_named_book()?;
    let backups = context.manager.list_backups(&name)?;
    if backups.is_empty() {
        return Err(CommandError::InvalidArguments(
            "no backups available to restore".into(),
        ));
    }
    let target = if let Ok(index_raw) = reference.parse::<usize>() {
        let index = index_raw.saturating_sub(1);
        backups
            .get(index)
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!("backup index {} out of range", reference))
            })?
            .clone()
    } else {
        backups
            .iter()
            .find(|candidate| candidate.contains(reference))
            .cloned()
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "no backup matches reference `{}`",
                    reference
                ))
            })?
    };
    if !context.confirm(&format!("Restore book `{}` from backup `{}`?", name, target))? {
        cli_io::print_info("Operation cancelled.");
        return Ok(());
    }
    let outcome = context.manager.restore_backup(&name, &target)?;
    context.report_load(&outcome.warnings);
    cli_io::print_success(format!("Book `{}` restored from `{}`.", name, target));
    Ok(())
}
