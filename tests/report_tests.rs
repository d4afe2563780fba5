mod common;

use common::{date, january_book};
use expense_core::core::services::ReportService;
use expense_core::currency::{CurrencyCode, LocaleConfig};
use expense_core::domain::{DateWindow, ReportPeriod, TimeGrain, Transaction};

fn january() -> DateWindow {
    ReportPeriod::Month.window_containing(date(2025, 1, 15))
}

#[test]
fn monthly_report_totals_income_expenses_and_balance() {
    let book = january_book();
    let report = ReportService::period_report(&book.transactions, january());

    assert_eq!(report.income, 5_000_000.0);
    assert_eq!(report.expenses, 90_000.0);
    assert_eq!(report.balance, 4_910_000.0);
}

#[test]
fn category_breakdown_is_sorted_largest_first() {
    let book = january_book();
    let report = ReportService::period_report(&book.transactions, january());

    let names: Vec<&str> = report
        .by_category
        .iter()
        .map(|entry| entry.category.as_str())
        .collect();
    assert_eq!(names, vec!["Food", "Transport"]);
    assert!(report.by_category[0].amount >= report.by_category[1].amount);
}

#[test]
fn weekly_report_only_sees_its_window() {
    let book = january_book();
    // Week of Monday 2025-01-06 to Sunday 2025-01-12 holds both Food entries.
    let window = ReportPeriod::Week.window_containing(date(2025, 1, 8));
    let report = ReportService::period_report(&book.transactions, window);
    assert_eq!(report.expenses, 80_000.0);
    assert_eq!(report.income, 0.0);
}

#[test]
fn daily_series_is_dense_across_the_month() {
    let book = january_book();
    let series = ReportService::time_series(&book.transactions, january());

    assert_eq!(series.grain, TimeGrain::Day);
    assert_eq!(series.labels.len(), 31);
    assert_eq!(series.income.len(), 31);
    assert_eq!(series.expenses.len(), 31);

    let lunch_slot = series.labels.iter().position(|l| l == "10/01").unwrap();
    assert_eq!(series.expenses[lunch_slot], 50_000.0);
    let salary_slot = series.labels.iter().position(|l| l == "05/01").unwrap();
    assert_eq!(series.income[salary_slot], 5_000_000.0);

    // Quiet days stay zero-filled rather than missing.
    let quiet_slot = series.labels.iter().position(|l| l == "25/01").unwrap();
    assert_eq!(series.expenses[quiet_slot], 0.0);
    assert_eq!(series.income[quiet_slot], 0.0);
}

#[test]
fn multi_year_series_buckets_by_year() {
    let transactions = vec![
        Transaction::expense("Old", 1_000.0, "Other", date(2023, 6, 1)),
        Transaction::expense("New", 2_000.0, "Other", date(2025, 6, 1)),
    ];
    let window = DateWindow::new(date(2023, 1, 1), date(2026, 1, 1)).unwrap();
    let series = ReportService::time_series(&transactions, window);

    assert_eq!(series.grain, TimeGrain::Year);
    assert_eq!(series.labels, vec!["2023", "2024", "2025"]);
    assert_eq!(series.expenses, vec![1_000.0, 0.0, 2_000.0]);
}

#[test]
fn text_export_round_trips_through_a_file() {
    let book = january_book();
    let report = ReportService::period_report(&book.transactions, january());
    let code = CurrencyCode::default();
    let locale = LocaleConfig::default();

    let rendered = ReportService::render_text(&report, &code, &locale);
    assert!(rendered.contains("FINANCIAL REPORT"));
    assert!(rendered.contains("01/01/2025 - 31/01/2025"));
    assert!(rendered.contains("Income: 5.000.000đ"));
    assert!(rendered.contains("Expenses: 90.000đ"));
    assert!(rendered.contains("Balance: 4.910.000đ"));
    assert!(rendered.contains("Food: 80.000đ"));

    let dir = assert_fs::TempDir::new().unwrap();
    let name = ReportService::export_file_name(ReportPeriod::Month, &report.window);
    assert_eq!(name, "finance_report_01_2025.txt");
    let path = dir.path().join(&name);
    let written = ReportService::export_report(&report, &code, &locale, &path).unwrap();
    assert_eq!(written, path);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), rendered);
}
