use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// Payment alerts surface one day ahead of the due moment.
const LEAD_DAYS: i64 = 1;

/// A scheduled payment reminder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub due_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Reminder {
    pub fn new(title: impl Into<String>, amount: f64, due_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            due_at,
            note: None,
            completed: false,
        }
    }

    /// Whether the reminder's alert window has opened.
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        !self.completed && now >= self.due_at - Duration::days(LEAD_DAYS)
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.completed && now > self.due_at
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}

impl Identifiable for Reminder {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Reminder {
    fn display_label(&self) -> String {
        format!("{} due {}", self.title, self.due_at.format("%d/%m/%Y %H:%M"))
    }
}
