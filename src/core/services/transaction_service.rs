//! Business logic helpers for managing transactions.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::period::DateWindow;
use crate::domain::transaction::Transaction;
use crate::domain::Book;

/// Narrow filters applied when listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub window: Option<DateWindow>,
    pub category: Option<String>,
    pub kind: KindFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Expense,
    Income,
}

impl TransactionFilter {
    fn matches(&self, txn: &Transaction) -> bool {
        if let Some(window) = &self.window {
            if !window.contains(txn.date) {
                return false;
            }
        }
        match self.kind {
            KindFilter::All => {}
            KindFilter::Expense if txn.is_income => return false,
            KindFilter::Income if !txn.is_income => return false,
            _ => {}
        }
        if let Some(category) = &self.category {
            if !txn.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        true
    }
}

/// Provides validated CRUD helpers for book transactions.
pub struct TransactionService;

impl TransactionService {
    /// Adds a new transaction, normalizing the stored sign, and returns its
    /// identifier.
    pub fn add(book: &mut Book, mut transaction: Transaction) -> ServiceResult<Uuid> {
        transaction.normalize_amount();
        let id = book.add_transaction(transaction);
        tracing::debug!(%id, "transaction added");
        Ok(id)
    }

    /// Updates the transaction identified by `id` via the provided mutator.
    pub fn update<F>(book: &mut Book, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Transaction),
    {
        let txn = book
            .transaction_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        mutator(txn);
        txn.normalize_amount();
        book.touch();
        Ok(())
    }

    /// Removes the transaction identified by `id`, returning the removed
    /// instance.
    pub fn remove(book: &mut Book, id: Uuid) -> ServiceResult<Transaction> {
        book.remove_transaction(id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))
    }

    /// Returns the book's transactions, newest first.
    pub fn list(book: &Book) -> Vec<&Transaction> {
        let mut entries: Vec<&Transaction> = book.transactions.iter().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// Returns transactions matching the filter, newest first.
    pub fn filter<'a>(book: &'a Book, filter: &TransactionFilter) -> Vec<&'a Transaction> {
        let mut entries: Vec<&Transaction> = book
            .transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_book() -> Book {
        let mut book = Book::new("Txns");
        book.add_transaction(Transaction::expense("Lunch", 50_000.0, "Food", date(2025, 1, 10)));
        book.add_transaction(Transaction::income("Salary", 5_000_000.0, "Salary", date(2025, 1, 5)));
        book.add_transaction(Transaction::expense("Bus", 10_000.0, "Transport", date(2025, 1, 12)));
        book
    }

    #[test]
    fn add_normalizes_caller_supplied_sign() {
        let mut book = Book::new("Txns");
        let txn = Transaction {
            amount: 42_000.0,
            ..Transaction::expense("Coffee", 42_000.0, "Food", date(2025, 1, 3))
        };
        let id = TransactionService::add(&mut book, txn).unwrap();
        assert_eq!(book.transaction(id).unwrap().amount, -42_000.0);
    }

    #[test]
    fn update_fails_for_missing_transaction() {
        let mut book = sample_book();
        let err = TransactionService::update(&mut book, Uuid::new_v4(), |_| {})
            .expect_err("update must fail for unknown id");
        assert!(
            matches!(err, ServiceError::Invalid(ref message) if message.contains("not found")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn remove_returns_deleted_transaction() {
        let mut book = sample_book();
        let id = book.transactions[0].id;
        let removed = TransactionService::remove(&mut book, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(book.transaction(id).is_none());
    }

    #[test]
    fn filter_combines_kind_category_and_window() {
        let book = sample_book();
        let filter = TransactionFilter {
            window: Some(DateWindow::new(date(2025, 1, 1), date(2025, 2, 1)).unwrap()),
            category: Some("Food".into()),
            kind: KindFilter::Expense,
        };
        let matches = TransactionService::filter(&book, &filter);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].description, "Lunch");
    }

    #[test]
    fn listing_is_newest_first() {
        let book = sample_book();
        let listed = TransactionService::list(&book);
        assert_eq!(listed[0].date, date(2025, 1, 12));
        assert_eq!(listed[2].date, date(2025, 1, 5));
    }
}
