use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// A savings target funded by explicit contributions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SavingsGoal {
    pub fn new(
        name: impl Into<String>,
        target_amount: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            target_amount,
            current_amount: 0.0,
            start_date,
            end_date,
            completed: false,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn progress_percentage(&self) -> u32 {
        if self.target_amount > 0.0 {
            (self.current_amount / self.target_amount * 100.0) as u32
        } else {
            0
        }
    }

    pub fn remaining_amount(&self) -> f64 {
        self.target_amount - self.current_amount
    }

    /// Adds saved money; reaching the target latches `completed`.
    pub fn record_contribution(&mut self, amount: f64) {
        self.current_amount += amount;
        if self.current_amount >= self.target_amount {
            self.completed = true;
        }
    }
}

impl Identifiable for SavingsGoal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for SavingsGoal {
    fn display_label(&self) -> String {
        format!("{} ({}%)", self.name, self.progress_percentage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal() -> SavingsGoal {
        SavingsGoal::new(
            "Bike",
            1_000_000.0,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        )
    }

    #[test]
    fn contributions_accumulate_and_latch_completion() {
        let mut goal = goal();
        goal.record_contribution(400_000.0);
        assert_eq!(goal.progress_percentage(), 40);
        assert!(!goal.completed);

        goal.record_contribution(600_000.0);
        assert!(goal.completed);
        assert_eq!(goal.remaining_amount(), 0.0);
    }
}
