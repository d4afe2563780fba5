//! Aggregation of transactions into category totals and budget progress,
//! plus the one-shot threshold alert pipeline.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::budget::Budget;
use crate::domain::period::DateWindow;
use crate::domain::transaction::Transaction;
use crate::domain::Book;

/// Emitted when a budget crosses its notification threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAlert {
    pub budget_id: Uuid,
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    pub percentage: u32,
}

/// Emitted once per repeating expense that lands inside a budget window.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringExpenseAlert {
    pub budget_id: Uuid,
    pub category: String,
    pub transaction_id: Uuid,
    pub description: String,
    pub amount: f64,
}

/// Roll-up across a set of budgets.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetOverview {
    pub total_budget: f64,
    pub total_spent: f64,
    pub remaining: f64,
    pub progress_percentage: u32,
}

/// Display row combining configured budgets with placeholder entries for
/// categories that have none, so every expense category shows its spending.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRow {
    pub budget_id: Option<Uuid>,
    pub category: String,
    pub amount: f64,
    pub spent: f64,
}

impl BudgetRow {
    pub fn progress_percentage(&self) -> u32 {
        if self.amount > 0.0 {
            (self.spent / self.amount * 100.0) as u32
        } else {
            0
        }
    }
}

/// Stateless budgeting utilities that operate over [`Book`] snapshots.
pub struct BudgetService;

impl BudgetService {
    /// Partitions expense transactions inside `window` by category, summing
    /// absolute amounts. Income entries are skipped. Single pass; the result
    /// is independent of input order and stable across repeated runs.
    pub fn expense_totals_by_category(
        transactions: &[Transaction],
        window: DateWindow,
    ) -> HashMap<String, f64> {
        let mut totals: HashMap<String, f64> = HashMap::new();
        for txn in transactions {
            if txn.is_income || !window.contains(txn.date) {
                continue;
            }
            *totals.entry(txn.category.clone()).or_default() += txn.magnitude();
        }
        totals
    }

    pub fn total_spent(totals: &HashMap<String, f64>) -> f64 {
        totals.values().sum()
    }

    /// Recomputes every active budget's spent amount from the transaction
    /// snapshot and runs the threshold check. A spent change re-arms the
    /// notification latch before the check, so each crossing fires exactly
    /// once until spending moves again.
    pub fn sync_spent(book: &mut Book, reference: NaiveDate) -> Vec<BudgetAlert> {
        let new_spents: Vec<(usize, f64)> = book
            .budgets
            .iter()
            .enumerate()
            .filter(|(_, budget)| budget.is_active(reference))
            .map(|(index, budget)| {
                let spent = Self::category_spent(&book.transactions, &budget.category, budget.window);
                (index, spent)
            })
            .collect();

        let mut alerts = Vec::new();
        let mut changed = false;
        for (index, new_spent) in new_spents {
            let budget = &mut book.budgets[index];
            changed |= budget.apply_spent(new_spent);
            if budget.should_send_notification() {
                budget.mark_notification_sent();
                changed = true;
                let alert = BudgetAlert {
                    budget_id: budget.id,
                    category: budget.category.clone(),
                    spent: budget.spent,
                    limit: budget.amount,
                    percentage: budget.progress_percentage(),
                };
                tracing::info!(
                    category = %alert.category,
                    percentage = alert.percentage,
                    "budget threshold reached"
                );
                alerts.push(alert);
            }
        }
        if changed {
            book.touch();
        }
        alerts
    }

    /// Announces repeating expenses that landed in an active budget's window
    /// and have not been announced before. Each transaction is reported once
    /// per budget.
    pub fn recurring_expense_alerts(
        book: &mut Book,
        reference: NaiveDate,
    ) -> Vec<RecurringExpenseAlert> {
        let pending: Vec<(usize, Uuid, String, f64)> = book
            .budgets
            .iter()
            .enumerate()
            .filter(|(_, budget)| budget.is_active(reference))
            .flat_map(|(index, budget)| {
                book.transactions
                    .iter()
                    .filter(|txn| {
                        txn.is_expense()
                            && txn.is_repeating()
                            && txn.category.eq_ignore_ascii_case(&budget.category)
                            && budget.window.contains(txn.date)
                            && !budget.has_notified_recurring(txn.id)
                    })
                    .map(move |txn| (index, txn.id, txn.description.clone(), txn.magnitude()))
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut alerts = Vec::new();
        for (index, txn_id, description, amount) in pending {
            let budget = &mut book.budgets[index];
            budget.mark_recurring_notified(txn_id);
            alerts.push(RecurringExpenseAlert {
                budget_id: budget.id,
                category: budget.category.clone(),
                transaction_id: txn_id,
                description,
                amount,
            });
        }
        if !alerts.is_empty() {
            book.touch();
        }
        alerts
    }

    /// Budgets active on the given date.
    pub fn active_budgets(book: &Book, reference: NaiveDate) -> Vec<&Budget> {
        book.budgets
            .iter()
            .filter(|budget| budget.is_active(reference))
            .collect()
    }

    /// Totals across the given budgets, mirroring the dashboard header.
    pub fn overview<'a>(budgets: impl IntoIterator<Item = &'a Budget>) -> BudgetOverview {
        let mut total_budget = 0.0;
        let mut total_spent = 0.0;
        for budget in budgets {
            total_budget += budget.amount;
            total_spent += budget.spent;
        }
        let progress = if total_budget > 0.0 {
            (total_spent / total_budget * 100.0) as u32
        } else {
            0
        };
        BudgetOverview {
            total_budget,
            total_spent,
            remaining: total_budget - total_spent,
            progress_percentage: progress,
        }
    }

    /// One row per expense category in the window: the active budget where
    /// one exists, otherwise a zero-limit placeholder carrying the
    /// aggregated spending.
    pub fn rows_for_window(book: &Book, window: DateWindow) -> Vec<BudgetRow> {
        let totals = Self::expense_totals_by_category(&book.transactions, window);
        let budgets_by_category: HashMap<&str, &Budget> = book
            .budgets
            .iter()
            .filter(|budget| budget.window == window || budget.is_active(window.start))
            .map(|budget| (budget.category.as_str(), budget))
            .collect();

        book.categories
            .expense_names()
            .into_iter()
            .map(|category| match budgets_by_category.get(category) {
                Some(budget) => BudgetRow {
                    budget_id: Some(budget.id),
                    category: category.to_string(),
                    amount: budget.amount,
                    spent: budget.spent,
                },
                None => BudgetRow {
                    budget_id: None,
                    category: category.to_string(),
                    amount: 0.0,
                    spent: totals.get(category).copied().unwrap_or(0.0),
                },
            })
            .collect()
    }

    fn category_spent(transactions: &[Transaction], category: &str, window: DateWindow) -> f64 {
        transactions
            .iter()
            .filter(|txn| {
                txn.is_expense()
                    && txn.category.eq_ignore_ascii_case(category)
                    && window.contains(txn.date)
            })
            .map(Transaction::magnitude)
            .sum()
    }
}
