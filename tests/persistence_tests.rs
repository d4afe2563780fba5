mod common;

use common::{date, january_book, setup_test_env};
use expense_core::core::services::BudgetService;
use expense_core::domain::{Book, Budget, DateWindow};

fn january() -> DateWindow {
    DateWindow::new(date(2025, 1, 1), date(2025, 2, 1)).unwrap()
}

#[test]
fn books_round_trip_with_budget_state() {
    let (mut manager, _config) = setup_test_env();

    let mut book = january_book();
    book.add_budget(Budget::new("Food", 100_000.0, january()));
    BudgetService::sync_spent(&mut book, date(2025, 1, 15));
    assert!(book.budgets[0].notification_sent);

    manager.set_current(book, None, None);
    manager.save_as("household").unwrap();

    manager.clear();
    let outcome = manager.load("household").unwrap();
    assert!(outcome.warnings.is_empty());

    let reloaded = manager.current.as_ref().unwrap();
    assert_eq!(reloaded.transaction_count(), 4);
    assert_eq!(reloaded.budgets[0].spent, 80_000.0);
    // The latch survives persistence, so reloading cannot re-fire the alert.
    assert!(reloaded.budgets[0].notification_sent);
}

#[test]
fn latch_stays_quiet_after_reload_until_spending_moves() {
    let (mut manager, _config) = setup_test_env();

    let mut book = january_book();
    book.add_budget(Budget::new("Food", 100_000.0, january()));
    BudgetService::sync_spent(&mut book, date(2025, 1, 15));
    manager.set_current(book, None, None);
    manager.save_as("quiet").unwrap();

    manager.clear();
    manager.load("quiet").unwrap();
    let book = manager.current.as_mut().unwrap();
    let alerts = BudgetService::sync_spent(book, date(2025, 1, 16));
    assert!(alerts.is_empty());
}

#[test]
fn saving_twice_produces_a_backup() {
    let (mut manager, _config) = setup_test_env();
    manager.set_current(Book::new("Demo"), None, None);
    manager.save_as("demo").unwrap();
    assert!(manager.list_backups("demo").unwrap().is_empty());

    manager
        .with_current_mut(|book| book.touch())
        .unwrap();
    manager.save().unwrap();
    let backups = manager.list_backups("demo").unwrap();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("demo_"));
}

#[test]
fn restore_rolls_back_to_the_backup_contents() {
    let (mut manager, _config) = setup_test_env();

    let book = january_book();
    manager.set_current(book, None, None);
    manager.save_as("rollback").unwrap();
    manager.backup(Some("before wipe")).unwrap();

    manager
        .with_current_mut(|book| book.transactions.clear())
        .unwrap();
    manager.save().unwrap();

    let backups = manager.list_backups("rollback").unwrap();
    let with_note = backups
        .iter()
        .find(|name| name.contains("before-wipe"))
        .expect("noted backup present");
    manager.restore_backup("rollback", with_note).unwrap();
    assert_eq!(manager.current.as_ref().unwrap().transaction_count(), 4);
}

#[test]
fn config_and_last_book_persist_between_sessions() {
    let (manager, config_manager) = setup_test_env();

    let mut config = config_manager.load().unwrap();
    assert_eq!(config.currency, "VND");
    config.last_opened_book = Some("household".into());
    config_manager.save(&config).unwrap();
    manager.record_last_opened(Some("household")).unwrap();

    let reloaded = config_manager.load().unwrap();
    assert_eq!(reloaded.last_opened_book.as_deref(), Some("household"));
    assert_eq!(manager.last_opened().unwrap().as_deref(), Some("household"));
}
