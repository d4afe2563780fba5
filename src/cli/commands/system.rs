use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io as cli_io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands or usage for one command",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new(
            "config",
            "Show or change application configuration",
            "config [set <key> <value>]",
            cmd_config,
        ),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    help::show_help(context, args)
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        cli_io::print_info(format!("Locale: {}", context.config.locale));
        cli_io::print_info(format!("Currency: {}", context.config.currency));
        cli_io::print_info(format!(
            "Theme: {}",
            context.config.theme.as_deref().unwrap_or("default")
        ));
        cli_io::print_info(format!(
            "Last opened book: {}",
            context
                .config
                .last_opened_book
                .as_deref()
                .unwrap_or("(none)")
        ));
        return Ok(());
    }

    let ["set", key, value] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: config set <locale|currency|theme> <value>".into(),
        ));
    };
    match key.to_ascii_lowercase().as_str() {
        "locale" => context.config.locale = value.to_string(),
        "currency" => context.config.currency = value.to_uppercase(),
        "theme" => {
            context.config.theme = if value.eq_ignore_ascii_case("none") || value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{}`",
                other
            )))
        }
    }
    context.persist_config()?;
    cli_io::print_success("Configuration updated.");
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.running = false;
    Err(CommandError::ExitRequested)
}
