pub mod budget_service;
pub mod goal_service;
pub mod reminder_service;
pub mod report_service;
pub mod transaction_service;

pub use budget_service::{
    BudgetAlert, BudgetOverview, BudgetRow, BudgetService, RecurringExpenseAlert,
};
pub use goal_service::GoalService;
pub use reminder_service::ReminderService;
pub use report_service::{CategoryExpense, PeriodReport, ReportService, TimeSeries};
pub use transaction_service::{KindFilter, TransactionFilter, TransactionService};

use crate::errors::TrackerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("{0}")]
    Invalid(String),
}
