use std::path::{Path, PathBuf};

use crate::domain::{Book, CURRENT_SCHEMA_VERSION};
use crate::errors::TrackerError;
use crate::storage::{book_warnings, StorageBackend};

/// Metadata describing the outcome of a load operation.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub warnings: Vec<String>,
    pub path: PathBuf,
    pub name: Option<String>,
    pub schema_version: u8,
}

/// Facade that coordinates the current book, persistence, and backups.
pub struct BookManager {
    pub current: Option<Book>,
    current_name: Option<String>,
    current_path: Option<PathBuf>,
    storage: Box<dyn StorageBackend>,
}

impl BookManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            current_name: None,
            current_path: None,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn load(&mut self, name: &str) -> Result<LoadOutcome, TrackerError> {
        let book = self.storage.load(name)?;
        let path = self.storage.book_path(name);
        self.apply_load(book, path, Some(name.to_string()))
    }

    pub fn load_from_path(&mut self, path: &Path) -> Result<LoadOutcome, TrackerError> {
        let book = self.storage.load_from_path(path)?;
        self.apply_load(book, path.to_path_buf(), None)
    }

    pub fn save(&mut self) -> Result<PathBuf, TrackerError> {
        let book = self
            .current
            .as_ref()
            .ok_or(TrackerError::BookNotLoaded)?;
        if let Some(name) = self.current_name.clone() {
            let path = self.storage.save(book, &name)?;
            self.current_path = Some(path.clone());
            Ok(path)
        } else if let Some(path) = self.current_path.clone() {
            self.storage.save_to_path(book, &path)?;
            Ok(path)
        } else {
            Err(TrackerError::StorageError(
                "unable to determine save target for current book".into(),
            ))
        }
    }

    pub fn save_as(&mut self, name: &str) -> Result<PathBuf, TrackerError> {
        let book = self
            .current
            .as_ref()
            .ok_or(TrackerError::BookNotLoaded)?;
        let path = self.storage.save(book, name)?;
        self.current_name = Some(name.to_string());
        self.current_path = Some(path.clone());
        Ok(path)
    }

    pub fn save_to_path(&mut self, path: &Path) -> Result<(), TrackerError> {
        let book = self
            .current
            .as_ref()
            .ok_or(TrackerError::BookNotLoaded)?;
        self.storage.save_to_path(book, path)?;
        self.current_path = Some(path.to_path_buf());
        self.current_name = None;
        Ok(())
    }

    pub fn backup(&self, note: Option<&str>) -> Result<PathBuf, TrackerError> {
        let book = self
            .current
            .as_ref()
            .ok_or(TrackerError::BookNotLoaded)?;
        let name = self
            .current_name
            .as_deref()
            .ok_or_else(|| TrackerError::StorageError("current book is unnamed".into()))?;
        self.storage.backup(book, name, note)
    }

    pub fn list_backups(&self, name: &str) -> Result<Vec<String>, TrackerError> {
        self.storage.list_backups(name)
    }

    pub fn restore_backup(&mut self, name: &str, backup_name: &str) -> Result<LoadOutcome, TrackerError> {
        let book = self.storage.restore(name, backup_name)?;
        let path = self.storage.book_path(name);
        self.apply_load(book, path, Some(name.to_string()))
    }

    pub fn book_path(&self, name: &str) -> PathBuf {
        self.storage.book_path(name)
    }

    pub fn last_opened(&self) -> Result<Option<String>, TrackerError> {
        self.storage.last_book()
    }

    pub fn record_last_opened(&self, name: Option<&str>) -> Result<(), TrackerError> {
        self.storage.record_last_book(name)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn set_current(&mut self, book: Book, path: Option<PathBuf>, name: Option<String>) {
        self.current = Some(book);
        self.current_path = path;
        self.current_name = name;
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.current_name = None;
        self.current_path = None;
    }

    pub fn with_current<T>(&self, f: impl FnOnce(&Book) -> T) -> Result<T, TrackerError> {
        self.current
            .as_ref()
            .map(f)
            .ok_or(TrackerError::BookNotLoaded)
    }

    pub fn with_current_mut<T>(&mut self, f: impl FnOnce(&mut Book) -> T) -> Result<T, TrackerError> {
        self.current
            .as_mut()
            .map(f)
            .ok_or(TrackerError::BookNotLoaded)
    }

    fn ensure_schema_support(&self, schema_version: u8) -> Result<(), TrackerError> {
        if schema_version > CURRENT_SCHEMA_VERSION {
            return Err(TrackerError::StorageError(format!(
                "book schema v{} is newer than supported v{}",
                schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(())
    }

    fn apply_load(
        &mut self,
        book: Book,
        path: PathBuf,
        name: Option<String>,
    ) -> Result<LoadOutcome, TrackerError> {
        self.ensure_schema_support(book.schema_version)?;
        let outcome = LoadOutcome {
            warnings: book_warnings(&book),
            path: path.clone(),
            name: name.clone(),
            schema_version: book.schema_version,
        };
        self.current = Some(book);
        self.current_path = Some(path);
        self.current_name = name;
        Ok(outcome)
    }
}
