//! Domain models for the tracking snapshot and its entities.

pub mod book;
pub mod budget;
pub mod category;
pub mod common;
pub mod goal;
pub mod period;
pub mod reminder;
pub mod transaction;

pub use book::{Book, CURRENT_SCHEMA_VERSION};
pub use budget::Budget;
pub use category::{Category, CategoryCatalog, CategoryKind, SAVINGS_CATEGORY};
pub use common::{Displayable, Identifiable};
pub use goal::SavingsGoal;
pub use period::{DateWindow, DateWindowError, ReportPeriod, TimeGrain};
pub use reminder::Reminder;
pub use transaction::{RepeatFrequency, RepeatRule, Transaction};
