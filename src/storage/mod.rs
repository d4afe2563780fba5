pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::{domain::Book, errors::TrackerError};

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Abstraction over persistence backends capable of storing book snapshots.
pub trait StorageBackend: Send + Sync {
    fn save(&self, book: &Book, name: &str) -> Result<PathBuf>;
    fn load(&self, name: &str) -> Result<Book>;
    fn book_path(&self, name: &str) -> PathBuf;
    fn last_book(&self) -> Result<Option<String>>;
    fn record_last_book(&self, name: Option<&str>) -> Result<()>;
    fn backup(&self, book: &Book, name: &str, note: Option<&str>) -> Result<PathBuf>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<Book>;

    /// Ad-hoc file operations outside the managed directory layout.
    fn save_to_path(&self, book: &Book, path: &Path) -> Result<()> {
        json_backend::save_book_to_path(book, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Book> {
        json_backend::load_book_from_path(path)
    }
}

pub use json_backend::{book_warnings, JsonStorage};
