use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    budget::Budget, category::CategoryCatalog, goal::SavingsGoal, reminder::Reminder,
    transaction::Transaction,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// One user's complete tracking snapshot: transactions, budgets, goals,
/// reminders, and the category catalog they share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub categories: CategoryCatalog,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Book::schema_version_default")]
    pub schema_version: u8,
}

impl Book {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            categories: CategoryCatalog::default(),
            transactions: Vec::new(),
            budgets: Vec::new(),
            goals: Vec::new(),
            reminders: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn add_budget(&mut self, budget: Budget) -> Uuid {
        let id = budget.id;
        self.budgets.push(budget);
        self.touch();
        id
    }

    pub fn add_goal(&mut self, goal: SavingsGoal) -> Uuid {
        let id = goal.id;
        self.goals.push(goal);
        self.touch();
        id
    }

    pub fn add_reminder(&mut self, reminder: Reminder) -> Uuid {
        let id = reminder.id;
        self.reminders.push(reminder);
        self.touch();
        id
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        let removed = self.transactions.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn budget(&self, id: Uuid) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    pub fn budget_mut(&mut self, id: Uuid) -> Option<&mut Budget> {
        self.budgets.iter_mut().find(|budget| budget.id == id)
    }

    pub fn remove_budget(&mut self, id: Uuid) -> Option<Budget> {
        let index = self.budgets.iter().position(|budget| budget.id == id)?;
        let removed = self.budgets.remove(index);
        self.touch();
        Some(removed)
    }

    /// The budget covering `category` on `date`, if one is active.
    pub fn budget_for_category(&self, category: &str, date: NaiveDate) -> Option<&Budget> {
        self.budgets
            .iter()
            .find(|budget| budget.category.eq_ignore_ascii_case(category) && budget.is_active(date))
    }

    pub fn goal(&self, id: Uuid) -> Option<&SavingsGoal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn goal_mut(&mut self, id: Uuid) -> Option<&mut SavingsGoal> {
        self.goals.iter_mut().find(|goal| goal.id == id)
    }

    pub fn goal_by_name(&self, name: &str) -> Option<&SavingsGoal> {
        self.goals
            .iter()
            .find(|goal| goal.name.eq_ignore_ascii_case(name))
    }

    pub fn remove_goal(&mut self, id: Uuid) -> Option<SavingsGoal> {
        let index = self.goals.iter().position(|goal| goal.id == id)?;
        let removed = self.goals.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn reminder_mut(&mut self, id: Uuid) -> Option<&mut Reminder> {
        self.reminders.iter_mut().find(|reminder| reminder.id == id)
    }

    pub fn remove_reminder(&mut self, id: Uuid) -> Option<Reminder> {
        let index = self.reminders.iter().position(|reminder| reminder.id == id)?;
        let removed = self.reminders.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
