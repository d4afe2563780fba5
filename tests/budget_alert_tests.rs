mod common;

use common::{date, january_book};
use expense_core::core::services::{BudgetService, TransactionService};
use expense_core::domain::{Budget, DateWindow, Transaction};

fn january() -> DateWindow {
    DateWindow::new(date(2025, 1, 1), date(2025, 2, 1)).unwrap()
}

#[test]
fn crossing_the_threshold_fires_exactly_once() {
    let mut book = january_book();
    book.add_budget(Budget::new("Food", 100_000.0, january()));

    let alerts = BudgetService::sync_spent(&mut book, date(2025, 1, 15));
    assert_eq!(alerts.len(), 1);
    let alert = &alerts[0];
    assert_eq!(alert.category, "Food");
    assert_eq!(alert.spent, 80_000.0);
    assert_eq!(alert.limit, 100_000.0);
    assert_eq!(alert.percentage, 80);

    // Re-running against the same snapshot never fires twice for the same
    // spent value.
    for _ in 0..3 {
        assert!(BudgetService::sync_spent(&mut book, date(2025, 1, 15)).is_empty());
    }
}

#[test]
fn spending_more_rearms_and_refires() {
    let mut book = january_book();
    book.add_budget(Budget::new("Food", 100_000.0, january()));
    BudgetService::sync_spent(&mut book, date(2025, 1, 15));

    TransactionService::add(
        &mut book,
        Transaction::expense("Groceries", 40_000.0, "Food", date(2025, 1, 20)),
    )
    .unwrap();

    let alerts = BudgetService::sync_spent(&mut book, date(2025, 1, 20));
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].spent, 120_000.0);
    assert_eq!(alerts[0].percentage, 120);
    assert!(book.budgets[0].is_over_budget());
}

#[test]
fn removing_spending_also_rearms_even_above_threshold() {
    let mut book = january_book();
    book.add_budget(Budget::new("Food", 80_000.0, january()));
    BudgetService::sync_spent(&mut book, date(2025, 1, 15));
    assert!(book.budgets[0].notification_sent);

    // Drop one expense and add a smaller one; spent falls to 70.000 but is
    // still past the 80% threshold.
    let id = book
        .transactions
        .iter()
        .find(|txn| txn.description == "Dinner")
        .map(|txn| txn.id)
        .unwrap();
    TransactionService::remove(&mut book, id).unwrap();
    TransactionService::add(
        &mut book,
        Transaction::expense("Snack", 20_000.0, "Food", date(2025, 1, 21)),
    )
    .unwrap();

    // The spent value moved, so the latch re-arms and fires again.
    let alerts = BudgetService::sync_spent(&mut book, date(2025, 1, 21));
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].spent, 70_000.0);
    assert_eq!(alerts[0].percentage, 87);
}

#[test]
fn custom_threshold_is_honored() {
    let mut book = january_book();
    book.add_budget(Budget::new("Food", 100_000.0, january()).with_threshold(90));

    assert!(BudgetService::sync_spent(&mut book, date(2025, 1, 15)).is_empty());

    TransactionService::add(
        &mut book,
        Transaction::expense("Groceries", 10_000.0, "Food", date(2025, 1, 16)),
    )
    .unwrap();
    let alerts = BudgetService::sync_spent(&mut book, date(2025, 1, 16));
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].percentage, 90);
}

#[test]
fn disabled_notifications_track_spent_silently() {
    let mut book = january_book();
    let mut budget = Budget::new("Food", 50_000.0, january());
    budget.notifications_enabled = false;
    book.add_budget(budget);

    let alerts = BudgetService::sync_spent(&mut book, date(2025, 1, 15));
    assert!(alerts.is_empty());
    assert_eq!(book.budgets[0].spent, 80_000.0);
}

#[test]
fn sync_only_counts_the_budgets_own_window() {
    let mut book = january_book();
    book.add_transaction(Transaction::expense(
        "February groceries",
        500_000.0,
        "Food",
        date(2025, 2, 3),
    ));
    book.add_budget(Budget::new("Food", 100_000.0, january()));

    BudgetService::sync_spent(&mut book, date(2025, 1, 15));
    assert_eq!(book.budgets[0].spent, 80_000.0);
}

#[test]
fn goal_contributions_count_against_the_savings_budget() {
    use expense_core::core::services::GoalService;
    use expense_core::domain::SavingsGoal;

    let mut book = january_book();
    book.add_budget(Budget::new("Savings", 400_000.0, january()));
    let goal_id = book.add_goal(SavingsGoal::new(
        "Emergency fund",
        10_000_000.0,
        date(2025, 1, 1),
        date(2025, 12, 31),
    ));

    GoalService::contribute(&mut book, goal_id, 350_000.0, date(2025, 1, 18)).unwrap();
    let alerts = BudgetService::sync_spent(&mut book, date(2025, 1, 18));
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].category, "Savings");
    assert_eq!(alerts[0].percentage, 87);
}
