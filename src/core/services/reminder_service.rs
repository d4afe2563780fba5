//! Payment reminder management.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::reminder::Reminder;
use crate::domain::Book;

pub struct ReminderService;

impl ReminderService {
    pub fn add(book: &mut Book, reminder: Reminder) -> ServiceResult<Uuid> {
        if reminder.title.trim().is_empty() {
            return Err(ServiceError::Invalid("reminder title cannot be empty".into()));
        }
        Ok(book.add_reminder(reminder))
    }

    pub fn complete(book: &mut Book, id: Uuid) -> ServiceResult<()> {
        let reminder = book
            .reminder_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Reminder not found".into()))?;
        reminder.mark_completed();
        book.touch();
        Ok(())
    }

    pub fn remove(book: &mut Book, id: Uuid) -> ServiceResult<Reminder> {
        book.remove_reminder(id)
            .ok_or_else(|| ServiceError::Invalid("Reminder not found".into()))
    }

    /// All reminders, soonest due first.
    pub fn list(book: &Book) -> Vec<&Reminder> {
        let mut reminders: Vec<&Reminder> = book.reminders.iter().collect();
        reminders.sort_by(|a, b| a.due_at.cmp(&b.due_at));
        reminders
    }

    /// Uncompleted reminders whose alert window has opened, soonest first.
    pub fn due(book: &Book, now: NaiveDateTime) -> Vec<&Reminder> {
        let mut due: Vec<&Reminder> = book
            .reminders
            .iter()
            .filter(|reminder| reminder.is_due(now))
            .collect();
        due.sort_by(|a, b| a.due_at.cmp(&b.due_at));
        due
    }
}
