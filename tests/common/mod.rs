use std::sync::Mutex;

use chrono::NaiveDate;
use expense_core::{
    config::ConfigManager,
    core::book_manager::BookManager,
    domain::{Book, Transaction},
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the
/// test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates isolated managers backed by unique directories for each test.
#[allow(dead_code)]
pub fn setup_test_env() -> (BookManager, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage =
        JsonStorage::new(Some(base.join("data")), Some(3)).expect("create json storage backend");
    let book_manager = BookManager::new(Box::new(storage));
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");

    (book_manager, config_manager)
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A book with a typical month of activity in January 2025.
#[allow(dead_code)]
pub fn january_book() -> Book {
    let mut book = Book::new("Household");
    book.add_transaction(Transaction::expense("Lunch", 50_000.0, "Food", date(2025, 1, 10)));
    book.add_transaction(Transaction::expense("Dinner", 30_000.0, "Food", date(2025, 1, 12)));
    book.add_transaction(Transaction::expense("Bus pass", 10_000.0, "Transport", date(2025, 1, 4)));
    book.add_transaction(Transaction::income("Salary", 5_000_000.0, "Salary", date(2025, 1, 5)));
    book
}
