use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;

pub fn show_help(context: &ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let entry = context.command(&name.to_ascii_lowercase()).ok_or_else(|| {
            CommandError::InvalidArguments(format!("unknown command `{}`", name))
        })?;
        output::section(entry.name);
        output::plain(entry.description);
        output::plain(format!("usage: {}", entry.usage));
        return Ok(());
    }

    output::section("Commands");
    for entry in context.command_list() {
        output::plain(format!("  {:<12} {}", entry.name, entry.description));
    }
    output::hint("Use `help <command>` for usage details.");
    Ok(())
}
