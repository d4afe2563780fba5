use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};
use crate::domain::period::{shift_month, shift_year};

/// A single income or expense entry. Amounts are stored signed: expenses are
/// negative, income positive, regardless of the sign supplied on entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub is_income: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<RepeatRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
        is_income: bool,
    ) -> Self {
        let mut txn = Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            category: category.into(),
            date,
            is_income,
            note: None,
            repeat: None,
            goal_id: None,
        };
        txn.normalize_amount();
        txn
    }

    pub fn expense(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(description, amount, category, date, false)
    }

    pub fn income(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(description, amount, category, date, true)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_repeat(mut self, rule: RepeatRule) -> Self {
        self.repeat = Some(rule);
        self
    }

    /// Forces the stored sign to match the entry kind.
    pub fn normalize_amount(&mut self) {
        self.amount = if self.is_income {
            self.amount.abs()
        } else {
            -self.amount.abs()
        };
    }

    /// Unsigned size of the entry, used by all aggregation.
    pub fn magnitude(&self) -> f64 {
        self.amount.abs()
    }

    pub fn is_expense(&self) -> bool {
        !self.is_income
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    pub fn is_goal_contribution(&self) -> bool {
        self.goal_id.is_some()
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} ({})", self.description, self.category)
    }
}

/// Schedule attached to a repeating transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepeatRule {
    pub frequency: RepeatFrequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl RepeatRule {
    pub fn new(frequency: RepeatFrequency) -> Self {
        Self {
            frequency,
            end_date: None,
        }
    }

    pub fn until(frequency: RepeatFrequency, end_date: NaiveDate) -> Self {
        Self {
            frequency,
            end_date: Some(end_date),
        }
    }

    pub fn next_date(&self, from: NaiveDate) -> NaiveDate {
        match self.frequency {
            RepeatFrequency::Daily => from + chrono::Duration::days(1),
            RepeatFrequency::Weekly => from + chrono::Duration::weeks(1),
            RepeatFrequency::Monthly => shift_month(from, 1),
            RepeatFrequency::Yearly => shift_year(from, 1),
        }
    }

    /// Whether the rule still produces occurrences on `date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.end_date.map(|end| date <= end).unwrap_or(true)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RepeatFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatFrequency {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "daily" => Some(RepeatFrequency::Daily),
            "weekly" => Some(RepeatFrequency::Weekly),
            "monthly" => Some(RepeatFrequency::Monthly),
            "yearly" => Some(RepeatFrequency::Yearly),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RepeatFrequency::Daily => "Daily",
            RepeatFrequency::Weekly => "Weekly",
            RepeatFrequency::Monthly => "Monthly",
            RepeatFrequency::Yearly => "Yearly",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn expense_amounts_are_stored_negative() {
        let txn = Transaction::expense("Lunch", 50_000.0, "Food", date(2025, 1, 10));
        assert_eq!(txn.amount, -50_000.0);
        assert_eq!(txn.magnitude(), 50_000.0);
    }

    #[test]
    fn income_amounts_are_stored_positive() {
        let txn = Transaction::income("Salary", -5_000_000.0, "Salary", date(2025, 1, 1));
        assert_eq!(txn.amount, 5_000_000.0);
    }

    #[test]
    fn monthly_repeat_advances_with_clamping() {
        let rule = RepeatRule::new(RepeatFrequency::Monthly);
        assert_eq!(rule.next_date(date(2025, 1, 31)), date(2025, 2, 28));
    }

    #[test]
    fn repeat_rule_respects_end_date() {
        let rule = RepeatRule::until(RepeatFrequency::Weekly, date(2025, 3, 1));
        assert!(rule.is_active_on(date(2025, 3, 1)));
        assert!(!rule.is_active_on(date(2025, 3, 2)));
    }
}
