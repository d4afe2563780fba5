//! Period statistics: totals, category breakdowns, time series, and the
//! plain-text report export.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Datelike;

use crate::currency::{format_currency_value, format_date, CurrencyCode, LocaleConfig};
use crate::domain::period::{DateWindow, ReportPeriod, TimeGrain};
use crate::domain::transaction::Transaction;
use crate::errors::TrackerError;

/// One slice of the category breakdown (pie-chart data).
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryExpense {
    pub category: String,
    pub amount: f64,
}

/// Totals and breakdown for one reporting window.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport {
    pub window: DateWindow,
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub by_category: Vec<CategoryExpense>,
}

/// Dense income/expense buckets over a window (bar-chart data).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub grain: TimeGrain,
    pub labels: Vec<String>,
    pub income: Vec<f64>,
    pub expenses: Vec<f64>,
}

pub struct ReportService;

impl ReportService {
    /// Sums income and expenses over the window and breaks expenses down per
    /// category, largest first.
    pub fn period_report(transactions: &[Transaction], window: DateWindow) -> PeriodReport {
        let mut income = 0.0;
        let mut expenses = 0.0;
        let mut by_category: HashMap<String, f64> = HashMap::new();

        for txn in transactions {
            if !window.contains(txn.date) {
                continue;
            }
            let amount = txn.magnitude();
            if txn.is_income {
                income += amount;
            } else {
                expenses += amount;
                *by_category.entry(txn.category.clone()).or_default() += amount;
            }
        }

        let mut by_category: Vec<CategoryExpense> = by_category
            .into_iter()
            .map(|(category, amount)| CategoryExpense { category, amount })
            .collect();
        by_category.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });

        PeriodReport {
            window,
            income,
            expenses,
            balance: income - expenses,
            by_category,
        }
    }

    /// Buckets income and expenses across the window. The grain follows the
    /// window span; empty buckets are zero-filled so chart axes stay dense.
    pub fn time_series(transactions: &[Transaction], window: DateWindow) -> TimeSeries {
        let grain = TimeGrain::for_window(&window);

        let mut labels = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut income = Vec::new();
        let mut expenses = Vec::new();

        let last = window.last_day();
        let mut cursor = window.start;
        while cursor <= last {
            let label = grain.label(cursor);
            if !index.contains_key(&label) {
                index.insert(label.clone(), labels.len());
                labels.push(label);
                income.push(0.0);
                expenses.push(0.0);
            }
            cursor = grain.advance(cursor);
        }

        for txn in transactions {
            if !window.contains(txn.date) {
                continue;
            }
            if let Some(&slot) = index.get(&grain.label(txn.date)) {
                if txn.is_income {
                    income[slot] += txn.magnitude();
                } else {
                    expenses[slot] += txn.magnitude();
                }
            }
        }

        TimeSeries {
            grain,
            labels,
            income,
            expenses,
        }
    }

    /// Formats the report for sharing as plain text.
    pub fn render_text(report: &PeriodReport, code: &CurrencyCode, locale: &LocaleConfig) -> String {
        let mut out = String::new();
        out.push_str("FINANCIAL REPORT\n\n");
        out.push_str(&format!(
            "{} - {}\n\n",
            format_date(report.window.start),
            format_date(report.window.last_day())
        ));
        out.push_str(&format!(
            "Income: {}\n",
            format_currency_value(report.income, code, locale)
        ));
        out.push_str(&format!(
            "Expenses: {}\n",
            format_currency_value(report.expenses, code, locale)
        ));
        out.push_str(&format!(
            "Balance: {}\n\n",
            format_currency_value(report.balance, code, locale)
        ));
        out.push_str("EXPENSES BY CATEGORY:\n");
        for entry in &report.by_category {
            out.push_str(&format!(
                "{}: {}\n",
                entry.category,
                format_currency_value(entry.amount, code, locale)
            ));
        }
        out
    }

    /// File name for an exported report, keyed by the period it covers.
    pub fn export_file_name(period: ReportPeriod, window: &DateWindow) -> String {
        let start = window.start;
        match period {
            ReportPeriod::Week => format!(
                "finance_report_week_{:02}_{}.txt",
                start.iso_week().week(),
                start.iso_week().year()
            ),
            ReportPeriod::Month => {
                format!("finance_report_{:02}_{}.txt", start.month(), start.year())
            }
            ReportPeriod::Year => format!("finance_report_{}.txt", start.year()),
        }
    }

    /// Writes the rendered report atomically and returns the final path.
    pub fn export_report(
        report: &PeriodReport,
        code: &CurrencyCode,
        locale: &LocaleConfig,
        path: &Path,
    ) -> Result<PathBuf, TrackerError> {
        let content = Self::render_text(report, code, locale);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = path.with_extension("txt.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(content.as_bytes())?;
            file.flush()?;
        }
        fs::rename(&tmp, path)?;
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> DateWindow {
        DateWindow::new(date(2025, 1, 1), date(2025, 2, 1)).unwrap()
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction::expense("Lunch", 50_000.0, "Food", date(2025, 1, 10)),
            Transaction::expense("Dinner", 30_000.0, "Food", date(2025, 1, 12)),
            Transaction::expense("Bus", 10_000.0, "Transport", date(2025, 1, 12)),
            Transaction::income("Salary", 5_000_000.0, "Salary", date(2025, 1, 5)),
            Transaction::expense("Outside window", 99_000.0, "Food", date(2025, 2, 2)),
        ]
    }

    #[test]
    fn report_totals_and_sorted_breakdown() {
        let report = ReportService::period_report(&sample_transactions(), january());
        assert_eq!(report.income, 5_000_000.0);
        assert_eq!(report.expenses, 90_000.0);
        assert_eq!(report.balance, 4_910_000.0);
        assert_eq!(report.by_category.len(), 2);
        assert_eq!(report.by_category[0].category, "Food");
        assert_eq!(report.by_category[0].amount, 80_000.0);
        assert_eq!(report.by_category[1].category, "Transport");
    }

    #[test]
    fn daily_series_zero_fills_the_whole_month() {
        let series = ReportService::time_series(&sample_transactions(), january());
        assert_eq!(series.grain, TimeGrain::Day);
        assert_eq!(series.labels.len(), 31);
        assert_eq!(series.labels[0], "01/01");
        let slot = series.labels.iter().position(|l| l == "12/01").unwrap();
        assert_eq!(series.expenses[slot], 40_000.0);
        assert_eq!(series.income.iter().sum::<f64>(), 5_000_000.0);
        assert_eq!(series.expenses[1], 0.0);
    }

    #[test]
    fn yearly_window_buckets_by_month() {
        let window = DateWindow::new(date(2025, 1, 1), date(2026, 1, 1)).unwrap();
        let series = ReportService::time_series(&sample_transactions(), window);
        assert_eq!(series.grain, TimeGrain::Month);
        assert_eq!(series.labels.len(), 12);
        assert_eq!(series.labels[0], "01/2025");
        // February's out-of-January expense lands in the 02/2025 bucket.
        assert_eq!(series.expenses[1], 99_000.0);
    }

    #[test]
    fn rendered_text_lists_totals_and_categories() {
        let report = ReportService::period_report(&sample_transactions(), january());
        let text = ReportService::render_text(
            &report,
            &CurrencyCode::default(),
            &LocaleConfig::default(),
        );
        assert!(text.starts_with("FINANCIAL REPORT"));
        assert!(text.contains("01/01/2025 - 31/01/2025"));
        assert!(text.contains("Income: 5.000.000đ"));
        assert!(text.contains("Food: 80.000đ"));
    }

    #[test]
    fn export_writes_the_rendered_file() {
        let dir = tempfile::tempdir().unwrap();
        let report = ReportService::period_report(&sample_transactions(), january());
        let name = ReportService::export_file_name(ReportPeriod::Month, &report.window);
        assert_eq!(name, "finance_report_01_2025.txt");
        let path = dir.path().join(name);
        ReportService::export_report(
            &report,
            &CurrencyCode::default(),
            &LocaleConfig::default(),
            &path,
        )
        .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("EXPENSES BY CATEGORY:"));
    }
}
