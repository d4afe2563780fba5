mod common;

use common::date;
use expense_core::core::services::{GoalService, ReminderService, TransactionService};
use expense_core::domain::{Book, Reminder, SavingsGoal, SAVINGS_CATEGORY};

#[test]
fn contributions_flow_into_the_transaction_log() {
    let mut book = Book::new("Goals");
    let goal_id = GoalService::add(
        &mut book,
        SavingsGoal::new("Laptop", 20_000_000.0, date(2025, 1, 1), date(2025, 12, 31)),
    )
    .unwrap();

    GoalService::contribute(&mut book, goal_id, 5_000_000.0, date(2025, 2, 1)).unwrap();
    GoalService::contribute(&mut book, goal_id, 7_000_000.0, date(2025, 3, 1)).unwrap();

    let goal = book.goal(goal_id).unwrap();
    assert_eq!(goal.current_amount, 12_000_000.0);
    assert_eq!(goal.progress_percentage(), 60);
    assert!(!goal.completed);

    let contributions: Vec<_> = TransactionService::list(&book)
        .into_iter()
        .filter(|txn| txn.goal_id == Some(goal_id))
        .cloned()
        .collect();
    assert_eq!(contributions.len(), 2);
    assert!(contributions
        .iter()
        .all(|txn| txn.category == SAVINGS_CATEGORY && txn.is_expense()));
}

#[test]
fn final_contribution_completes_the_goal() {
    let mut book = Book::new("Goals");
    let goal_id = GoalService::add(
        &mut book,
        SavingsGoal::new("Trip", 1_000_000.0, date(2025, 1, 1), date(2025, 6, 30)),
    )
    .unwrap();

    GoalService::contribute(&mut book, goal_id, 999_999.0, date(2025, 2, 1)).unwrap();
    assert!(!book.goal(goal_id).unwrap().completed);

    GoalService::contribute(&mut book, goal_id, 1.0, date(2025, 2, 2)).unwrap();
    assert!(book.goal(goal_id).unwrap().completed);
}

#[test]
fn zero_target_goals_are_rejected() {
    let mut book = Book::new("Goals");
    let err = GoalService::add(
        &mut book,
        SavingsGoal::new("Broken", 0.0, date(2025, 1, 1), date(2025, 6, 30)),
    )
    .unwrap_err();
    assert!(err.to_string().contains("greater than 0"));
}

#[test]
fn goals_list_by_deadline() {
    let mut book = Book::new("Goals");
    GoalService::add(
        &mut book,
        SavingsGoal::new("Later", 100.0, date(2025, 1, 1), date(2025, 12, 1)),
    )
    .unwrap();
    GoalService::add(
        &mut book,
        SavingsGoal::new("Sooner", 100.0, date(2025, 1, 1), date(2025, 3, 1)),
    )
    .unwrap();

    let names: Vec<&str> = GoalService::list(&book)
        .iter()
        .map(|goal| goal.name.as_str())
        .collect();
    assert_eq!(names, vec!["Sooner", "Later"]);
}

#[test]
fn reminders_report_due_and_complete() {
    let mut book = Book::new("Reminders");
    let due_soon = date(2025, 1, 10).and_hms_opt(9, 0, 0).unwrap();
    let far_off = date(2025, 6, 1).and_hms_opt(9, 0, 0).unwrap();

    let rent = ReminderService::add(&mut book, Reminder::new("Rent", 3_000_000.0, due_soon)).unwrap();
    ReminderService::add(&mut book, Reminder::new("Insurance", 800_000.0, far_off)).unwrap();

    // The day before the due moment opens the alert window.
    let now = date(2025, 1, 9).and_hms_opt(10, 0, 0).unwrap();
    let due = ReminderService::due(&book, now);
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].title, "Rent");

    ReminderService::complete(&mut book, rent).unwrap();
    assert!(ReminderService::due(&book, now).is_empty());
}
