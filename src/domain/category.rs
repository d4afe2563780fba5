use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

/// Category reserved for savings-goal contributions.
pub const SAVINGS_CATEGORY: &str = "Savings";

static DEFAULT_EXPENSE_CATEGORIES: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["Food", "Transport", "Shopping", "Bills", SAVINGS_CATEGORY, "Other"]);

static DEFAULT_INCOME_CATEGORIES: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["Salary", "Bonus", "Gift", "Other"]);

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CategoryKind {
    Expense,
    Income,
}

/// Categorises transactions for budgeting and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub kind: CategoryKind,
    pub is_custom: bool,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_custom: true,
        }
    }

    fn predefined(name: &str, kind: CategoryKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            is_custom: false,
        }
    }
}

/// The set of categories a book partitions its activity into. Seeded with the
/// fixed defaults; users may add and remove custom entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        let mut categories = Vec::new();
        for name in DEFAULT_EXPENSE_CATEGORIES.iter() {
            categories.push(Category::predefined(name, CategoryKind::Expense));
        }
        for name in DEFAULT_INCOME_CATEGORIES.iter() {
            categories.push(Category::predefined(name, CategoryKind::Income));
        }
        Self { categories }
    }
}

impl CategoryCatalog {
    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn names_of_kind(&self, kind: CategoryKind) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|category| category.kind == kind)
            .map(|category| category.name.as_str())
            .collect()
    }

    pub fn expense_names(&self) -> Vec<&str> {
        self.names_of_kind(CategoryKind::Expense)
    }

    pub fn income_names(&self) -> Vec<&str> {
        self.names_of_kind(CategoryKind::Income)
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, name: &str, kind: CategoryKind) -> bool {
        self.get(name)
            .map(|category| category.kind == kind)
            .unwrap_or(false)
    }

    pub fn add_custom(&mut self, name: &str, kind: CategoryKind) -> Result<(), TrackerError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TrackerError::InvalidInput("category name cannot be empty".into()));
        }
        if self.get(trimmed).is_some() {
            return Err(TrackerError::InvalidInput(format!(
                "category `{}` already exists",
                trimmed
            )));
        }
        self.categories.push(Category::new(trimmed, kind));
        Ok(())
    }

    /// Removes a custom category. Predefined entries cannot be removed.
    pub fn remove_custom(&mut self, name: &str) -> Result<Category, TrackerError> {
        let index = self
            .categories
            .iter()
            .position(|category| category.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| TrackerError::CategoryNotFound(name.to_string()))?;
        if !self.categories[index].is_custom {
            return Err(TrackerError::InvalidInput(format!(
                "category `{}` is predefined and cannot be removed",
                name
            )));
        }
        Ok(self.categories.remove(index))
    }
}
