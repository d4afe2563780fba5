//! Savings goal management and contribution posting.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult, TransactionService};
use crate::domain::category::SAVINGS_CATEGORY;
use crate::domain::goal::SavingsGoal;
use crate::domain::transaction::Transaction;
use crate::domain::Book;

pub struct GoalService;

impl GoalService {
    pub fn add(book: &mut Book, goal: SavingsGoal) -> ServiceResult<Uuid> {
        if goal.target_amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "goal target amount must be greater than 0".into(),
            ));
        }
        Ok(book.add_goal(goal))
    }

    pub fn update<F>(book: &mut Book, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut SavingsGoal),
    {
        let goal = book
            .goal_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Goal not found".into()))?;
        mutator(goal);
        book.touch();
        Ok(())
    }

    pub fn remove(book: &mut Book, id: Uuid) -> ServiceResult<SavingsGoal> {
        book.remove_goal(id)
            .ok_or_else(|| ServiceError::Invalid("Goal not found".into()))
    }

    /// Goals ordered by deadline, soonest first.
    pub fn list(book: &Book) -> Vec<&SavingsGoal> {
        let mut goals: Vec<&SavingsGoal> = book.goals.iter().collect();
        goals.sort_by(|a, b| a.end_date.cmp(&b.end_date));
        goals
    }

    /// Moves money into a goal: bumps the saved amount (latching completion
    /// when the target is reached) and posts a linked expense transaction so
    /// budget aggregation sees the money leave. Returns the transaction id.
    pub fn contribute(
        book: &mut Book,
        goal_id: Uuid,
        amount: f64,
        date: NaiveDate,
    ) -> ServiceResult<Uuid> {
        if amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "contribution amount must be greater than 0".into(),
            ));
        }
        let name = {
            let goal = book
                .goal_mut(goal_id)
                .ok_or_else(|| ServiceError::Invalid("Goal not found".into()))?;
            goal.record_contribution(amount);
            goal.name.clone()
        };

        let mut txn = Transaction::expense(
            format!("Contribution: {}", name),
            amount,
            SAVINGS_CATEGORY,
            date,
        )
        .with_note(format!("Contribution to goal: {}", name));
        txn.goal_id = Some(goal_id);
        let txn_id = TransactionService::add(book, txn)?;
        tracing::info!(goal = %name, amount, "goal contribution recorded");
        Ok(txn_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn book_with_goal() -> (Book, Uuid) {
        let mut book = Book::new("Goals");
        let goal = SavingsGoal::new("Bike", 1_000_000.0, date(2025, 1, 1), date(2025, 12, 31));
        let id = GoalService::add(&mut book, goal).unwrap();
        (book, id)
    }

    #[test]
    fn contribution_posts_linked_expense() {
        let (mut book, goal_id) = book_with_goal();
        let txn_id = GoalService::contribute(&mut book, goal_id, 250_000.0, date(2025, 2, 1)).unwrap();

        let goal = book.goal(goal_id).unwrap();
        assert_eq!(goal.current_amount, 250_000.0);
        assert!(!goal.completed);

        let txn = book.transaction(txn_id).unwrap();
        assert_eq!(txn.goal_id, Some(goal_id));
        assert_eq!(txn.category, SAVINGS_CATEGORY);
        assert_eq!(txn.amount, -250_000.0);
        assert!(txn.description.contains("Bike"));
    }

    #[test]
    fn reaching_the_target_latches_completion() {
        let (mut book, goal_id) = book_with_goal();
        GoalService::contribute(&mut book, goal_id, 1_000_000.0, date(2025, 2, 1)).unwrap();
        assert!(book.goal(goal_id).unwrap().completed);
    }

    #[test]
    fn rejects_non_positive_contributions() {
        let (mut book, goal_id) = book_with_goal();
        let err = GoalService::contribute(&mut book, goal_id, 0.0, date(2025, 2, 1)).unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert_eq!(book.transaction_count(), 0);
    }
}
