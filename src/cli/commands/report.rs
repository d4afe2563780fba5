use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::ReportService;
use crate::domain::period::ReportPeriod;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "report",
        "Period statistics and plain-text export",
        "report <show|export> <week|month|year> [YYYY-MM-DD] [dir]",
        cmd_report,
    )]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: report <show|export> <week|month|year> [YYYY-MM-DD] [dir]".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "show" => handle_show(context, rest),
        "export" => handle_export(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown report subcommand `{}`",
            other
        ))),
    }
}

fn parse_period_args(
    context: &ShellContext,
    args: &[&str],
) -> Result<(ReportPeriod, chrono::NaiveDate), CommandError> {
    let Some(raw_period) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "a period is required: week, month, or year".into(),
        ));
    };
    let period = ReportPeriod::parse(raw_period).ok_or_else(|| {
        CommandError::InvalidArguments(format!("unknown period `{}`", raw_period))
    })?;
    let reference = match args.get(1) {
        Some(raw) => ShellContext::parse_date_arg(raw)?,
        None => context.today(),
    };
    Ok((period, reference))
}

fn handle_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (period, reference) = parse_period_args(context, args)?;
    let window = period.window_containing(reference);
    let text = context.with_book(|book| {
        let report = ReportService::period_report(&book.transactions, window);
        Ok(ReportService::render_text(
            &report,
            &context.currency_code(),
            &context.locale(),
        ))
    })?;
    output::plain(text);
    Ok(())
}

fn handle_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (period, reference) = parse_period_args(context, args)?;
    let window = period.window_containing(reference);
    let dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(ReportService::export_file_name(period, &window));

    let written = context.with_book(|book| {
        let report = ReportService::period_report(&book.transactions, window);
        ReportService::export_report(
            &report,
            &context.currency_code(),
            &context.locale(),
            &path,
        )
        .map_err(CommandError::from)
    })?;
    cli_io::print_success(format!("Report exported to {}.", written.display()));
    Ok(())
}
