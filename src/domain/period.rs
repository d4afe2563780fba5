//! Reporting windows and calendar arithmetic shared by budgets and reports.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Half-open date range: `start <= d < end`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateWindowError> {
        if end <= start {
            return Err(DateWindowError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Last calendar day inside the window, for display.
    pub fn last_day(&self) -> NaiveDate {
        self.end - Duration::days(1)
    }

    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Errors that can occur when constructing [`DateWindow`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindowError {
    InvalidRange,
}

impl fmt::Display for DateWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindowError::InvalidRange => f.write_str("date window end must be after start"),
        }
    }
}

impl std::error::Error for DateWindowError {}

/// Reporting periods selectable in statistics views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportPeriod {
    Week,
    Month,
    Year,
}

impl ReportPeriod {
    /// The window of this period that contains `reference`. Weeks start on Monday.
    pub fn window_containing(&self, reference: NaiveDate) -> DateWindow {
        match self {
            ReportPeriod::Week => {
                let offset = reference.weekday().num_days_from_monday() as i64;
                let start = reference - Duration::days(offset);
                DateWindow {
                    start,
                    end: start + Duration::days(7),
                }
            }
            ReportPeriod::Month => {
                let start = reference.with_day(1).unwrap();
                DateWindow {
                    start,
                    end: shift_month(start, 1),
                }
            }
            ReportPeriod::Year => {
                let start = NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap();
                let end = NaiveDate::from_ymd_opt(reference.year() + 1, 1, 1).unwrap();
                DateWindow { start, end }
            }
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "week" | "weekly" => Some(ReportPeriod::Week),
            "month" | "monthly" => Some(ReportPeriod::Month),
            "year" | "yearly" => Some(ReportPeriod::Year),
            _ => None,
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
            ReportPeriod::Year => "year",
        };
        f.write_str(label)
    }
}

/// Bucket granularity for time-series data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeGrain {
    Day,
    Month,
    Year,
}

impl TimeGrain {
    /// Picks a grain so a window renders into a readable number of buckets.
    pub fn for_window(window: &DateWindow) -> Self {
        let days = window.span_days();
        if days <= 31 {
            TimeGrain::Day
        } else if days <= 366 {
            TimeGrain::Month
        } else {
            TimeGrain::Year
        }
    }

    pub fn label(&self, date: NaiveDate) -> String {
        match self {
            TimeGrain::Day => format!("{:02}/{:02}", date.day(), date.month()),
            TimeGrain::Month => format!("{:02}/{}", date.month(), date.year()),
            TimeGrain::Year => format!("{}", date.year()),
        }
    }

    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        match self {
            TimeGrain::Day => date + Duration::days(1),
            TimeGrain::Month => shift_month(date, 1),
            TimeGrain::Year => shift_year(date, 1),
        }
    }
}

pub(crate) fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

pub(crate) fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}
