mod common;

use common::{date, january_book};
use expense_core::core::services::BudgetService;
use expense_core::domain::{DateWindow, Transaction};

fn january() -> DateWindow {
    DateWindow::new(date(2025, 1, 1), date(2025, 2, 1)).unwrap()
}

#[test]
fn aggregates_expense_magnitudes_and_excludes_income() {
    let transactions = vec![
        Transaction::expense("Lunch", 50_000.0, "Food", date(2025, 1, 10)),
        Transaction::expense("Dinner", 30_000.0, "Food", date(2025, 1, 12)),
        Transaction::income("Salary", 5_000_000.0, "Salary", date(2025, 1, 5)),
    ];

    let totals = BudgetService::expense_totals_by_category(&transactions, january());
    assert_eq!(totals.len(), 1);
    assert_eq!(totals.get("Food").copied(), Some(80_000.0));
}

#[test]
fn aggregation_matches_manual_sums_per_category() {
    let book = january_book();
    let totals = BudgetService::expense_totals_by_category(&book.transactions, january());

    for (category, total) in &totals {
        let expected: f64 = book
            .transactions
            .iter()
            .filter(|txn| txn.is_expense() && &txn.category == category)
            .map(|txn| txn.amount.abs())
            .sum();
        assert_eq!(*total, expected, "category {category}");
    }
    assert_eq!(BudgetService::total_spent(&totals), 90_000.0);
}

#[test]
fn aggregation_is_commutative_under_reordering() {
    let book = january_book();
    let baseline = BudgetService::expense_totals_by_category(&book.transactions, january());

    let mut rotated = book.transactions.clone();
    rotated.rotate_left(2);
    assert_eq!(
        BudgetService::expense_totals_by_category(&rotated, january()),
        baseline
    );

    let mut reversed = book.transactions.clone();
    reversed.reverse();
    assert_eq!(
        BudgetService::expense_totals_by_category(&reversed, january()),
        baseline
    );
}

#[test]
fn aggregation_is_idempotent_over_the_same_snapshot() {
    let book = january_book();
    let first = BudgetService::expense_totals_by_category(&book.transactions, january());
    let second = BudgetService::expense_totals_by_category(&book.transactions, january());
    assert_eq!(first, second);
}

#[test]
fn window_bounds_are_half_open() {
    let transactions = vec![
        Transaction::expense("On start", 1_000.0, "Food", date(2025, 1, 1)),
        Transaction::expense("On end", 2_000.0, "Food", date(2025, 2, 1)),
    ];
    let totals = BudgetService::expense_totals_by_category(&transactions, january());
    assert_eq!(totals.get("Food").copied(), Some(1_000.0));
}
