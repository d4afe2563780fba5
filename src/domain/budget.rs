use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};
use crate::domain::period::DateWindow;

const DEFAULT_NOTIFICATION_THRESHOLD: u8 = 80;

/// A spending guardrail for one category over one date window.
///
/// `spent` is a cached value derived from the transaction set; it is
/// recomputed by the budget synchronizer, never edited directly. The
/// `notification_sent` latch arms and fires the one-shot threshold alert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub category: String,
    /// Spending limit for the window.
    pub amount: f64,
    #[serde(default)]
    pub spent: f64,
    pub window: DateWindow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default = "Budget::notifications_enabled_default")]
    pub notifications_enabled: bool,
    #[serde(default = "Budget::notification_threshold_default")]
    pub notification_threshold: u8,
    #[serde(default)]
    pub notification_sent: bool,
    /// Repeating expense transactions already announced for this budget.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub notified_recurring: BTreeSet<Uuid>,
}

impl Budget {
    pub fn new(category: impl Into<String>, amount: f64, window: DateWindow) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            amount,
            spent: 0.0,
            window,
            note: None,
            notifications_enabled: true,
            notification_threshold: DEFAULT_NOTIFICATION_THRESHOLD,
            notification_sent: false,
            notified_recurring: BTreeSet::new(),
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.notification_threshold = threshold;
        self
    }

    pub fn remaining(&self) -> f64 {
        self.amount - self.spent
    }

    /// Share of the limit already spent, truncated toward zero. A budget
    /// without a positive limit reports 0%.
    pub fn progress_percentage(&self) -> u32 {
        if self.amount > 0.0 {
            (self.spent / self.amount * 100.0) as u32
        } else {
            0
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.amount
    }

    pub fn is_active(&self, date: NaiveDate) -> bool {
        self.window.contains(date)
    }

    /// Whether the threshold alert should fire right now. The latch keeps
    /// this one-shot until `spent` changes again.
    pub fn should_send_notification(&self) -> bool {
        if !self.notifications_enabled || self.notification_sent {
            return false;
        }
        self.progress_percentage() >= self.notification_threshold as u32
    }

    /// Installs a freshly computed spent amount. Any change beyond float
    /// noise re-arms the notification latch; returns whether it changed.
    pub fn apply_spent(&mut self, new_spent: f64) -> bool {
        if (new_spent - self.spent).abs() <= f64::EPSILON {
            return false;
        }
        self.notification_sent = false;
        self.spent = new_spent;
        true
    }

    pub fn mark_notification_sent(&mut self) {
        self.notification_sent = true;
    }

    pub fn has_notified_recurring(&self, transaction_id: Uuid) -> bool {
        self.notified_recurring.contains(&transaction_id)
    }

    pub fn mark_recurring_notified(&mut self, transaction_id: Uuid) {
        self.notified_recurring.insert(transaction_id);
    }

    fn notifications_enabled_default() -> bool {
        true
    }

    fn notification_threshold_default() -> u8 {
        DEFAULT_NOTIFICATION_THRESHOLD
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Budget {
    fn display_label(&self) -> String {
        format!("{} budget ({}%)", self.category, self.progress_percentage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn january() -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn threshold_fires_once_per_spent_value() {
        let mut budget = Budget::new("Food", 100_000.0, january());
        assert!(budget.apply_spent(85_000.0));
        assert!(budget.should_send_notification());
        budget.mark_notification_sent();
        assert!(!budget.should_send_notification());

        // Same value again: latch stays set.
        assert!(!budget.apply_spent(85_000.0));
        assert!(!budget.should_send_notification());
    }

    #[test]
    fn any_spent_change_rearms_the_latch() {
        let mut budget = Budget::new("Food", 100_000.0, january());
        budget.apply_spent(90_000.0);
        budget.mark_notification_sent();

        // A decrease also re-arms; the detection is change, not direction.
        assert!(budget.apply_spent(85_000.0));
        assert!(budget.should_send_notification());
    }

    #[test]
    fn zero_limit_reports_zero_progress() {
        let mut budget = Budget::new("Other", 0.0, january());
        budget.apply_spent(10_000.0);
        assert_eq!(budget.progress_percentage(), 0);
        assert!(!budget.should_send_notification());
    }

    #[test]
    fn progress_truncates_toward_zero() {
        let mut budget = Budget::new("Food", 300_000.0, january());
        budget.apply_spent(100_000.0);
        assert_eq!(budget.progress_percentage(), 33);
    }

    #[test]
    fn disabled_notifications_never_fire() {
        let mut budget = Budget::new("Food", 100_000.0, january());
        budget.notifications_enabled = false;
        budget.apply_spent(200_000.0);
        assert!(!budget.should_send_notification());
    }
}
