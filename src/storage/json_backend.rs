//! JSON snapshot storage: one pretty-printed file per book, timestamped
//! backups with retention pruning, and a small state file remembering the
//! last opened book.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    domain::Book,
    errors::TrackerError,
    utils::{ensure_dir, PathResolver},
};

use super::{Result, StorageBackend};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    books_dir: PathBuf,
    backups_dir: PathBuf,
    state_file: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let app_root = PathResolver::resolve_base(root);
        ensure_dir(&app_root)?;
        let books_dir = PathResolver::books_dir_in(&app_root);
        let backups_dir = PathResolver::backups_dir_in(&app_root);
        ensure_dir(&books_dir)?;
        ensure_dir(&backups_dir)?;
        let state_file = PathResolver::state_file_in(&app_root);
        Ok(Self {
            root: app_root,
            books_dir,
            backups_dir,
            state_file,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    fn read_state(&self) -> Result<StoreState> {
        if self.state_file.exists() {
            let data = fs::read_to_string(&self.state_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(StoreState::default())
        }
    }

    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_name = format!(
            "{}_{}.{}",
            canonical_name(name),
            timestamp,
            BACKUP_EXTENSION
        );
        fs::copy(path, dir.join(backup_name))?;
        self.prune_backups(name)?;
        Ok(())
    }

    fn prune_backups(&self, name: &str) -> Result<()> {
        let backups = self.list_backups(name)?;
        if backups.len() <= self.retention {
            return Ok(());
        }
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backup_path(name, entry));
        }
        Ok(())
    }

    pub fn backup_path(&self, name: &str, backup_name: &str) -> PathBuf {
        self.backup_dir(name).join(backup_name)
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, book: &Book, name: &str) -> Result<PathBuf> {
        let path = self.book_path(name);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        if path.exists() {
            self.backup_existing_file(name, &path)?;
        }
        let json = serde_json::to_string_pretty(book)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(path)
    }

    fn load(&self, name: &str) -> Result<Book> {
        load_book_from_path(&self.book_path(name))
    }

    fn book_path(&self, name: &str) -> PathBuf {
        self.books_dir.join(format!("{}.json", canonical_name(name)))
    }

    fn last_book(&self) -> Result<Option<String>> {
        let state = self.read_state()?;
        Ok(state.last_book)
    }

    fn record_last_book(&self, name: Option<&str>) -> Result<()> {
        let mut state = self.read_state()?;
        state.last_book = name.map(canonical_name);
        let data = serde_json::to_string_pretty(&state)?;
        write_atomic(&self.state_file, &data)?;
        Ok(())
    }

    fn backup(&self, book: &Book, name: &str, note: Option<&str>) -> Result<PathBuf> {
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut file_stem = format!("{}_{}", canonical_name(name), timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            file_stem.push('_');
            file_stem.push_str(&label);
        }
        let path = dir.join(format!("{}.{}", file_stem, BACKUP_EXTENSION));
        let json = serde_json::to_string_pretty(book)?;
        write_atomic(&path, &json)?;
        self.prune_backups(name)?;
        Ok(path)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<String>> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|stem| stem.to_str()) {
                entries.push(file_name.to_string());
            }
        }
        entries.sort_by(|a, b| parse_backup_timestamp(b).cmp(&parse_backup_timestamp(a)));
        Ok(entries)
    }

    fn restore(&self, name: &str, backup_name: &str) -> Result<Book> {
        let backup_path = self.backup_path(name, backup_name);
        if !backup_path.exists() {
            return Err(TrackerError::StorageError(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        let target = self.book_path(name);
        fs::copy(&backup_path, &target)?;
        load_book_from_path(&target)
    }
}

pub fn save_book_to_path(book: &Book, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(book)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_book_from_path(path: &Path) -> Result<Book> {
    let data = fs::read_to_string(path)?;
    let book: Book = serde_json::from_str(&data)?;
    Ok(book)
}

/// Referential problems worth surfacing after a load; none of them block.
pub fn book_warnings(book: &Book) -> Vec<String> {
    let expense_names: HashSet<String> = book
        .categories
        .expense_names()
        .into_iter()
        .map(|name| name.to_ascii_lowercase())
        .collect();
    let income_names: HashSet<String> = book
        .categories
        .income_names()
        .into_iter()
        .map(|name| name.to_ascii_lowercase())
        .collect();
    let goal_ids: HashSet<_> = book.goals.iter().map(|goal| goal.id).collect();

    let mut warnings = Vec::new();
    for txn in &book.transactions {
        let known = if txn.is_income {
            income_names.contains(&txn.category.to_ascii_lowercase())
        } else {
            expense_names.contains(&txn.category.to_ascii_lowercase())
        };
        if !known {
            warnings.push(format!(
                "transaction {} references unknown category `{}`",
                txn.id, txn.category
            ));
        }
        if let Some(goal_id) = txn.goal_id {
            if !goal_ids.contains(&goal_id) {
                warnings.push(format!(
                    "transaction {} references missing goal {}",
                    txn.id, goal_id
                ));
            }
        }
    }
    for budget in &book.budgets {
        if !expense_names.contains(&budget.category.to_ascii_lowercase()) {
            warnings.push(format!(
                "budget {} covers unknown category `{}`",
                budget.id, budget.category
            ));
        }
    }
    warnings
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    last_book: Option<String>,
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "book".into()
    } else {
        sanitized
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if ch.is_whitespace() || matches!(ch, '-' | '.') {
            if !sanitized.is_empty() && !last_dash {
                sanitized.push('-');
                last_dash = true;
            }
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let segments: Vec<&str> = trimmed.split('_').collect();
    for window in segments.windows(2) {
        let (date_part, time_part) = (window[0], window[1]);
        if is_digits(date_part, 8) && is_digits(time_part, 4) {
            let raw = format!("{}{}", date_part, time_part);
            return NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M")
                .ok()
                .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    None
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Budget, DateWindow, Transaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage =
            JsonStorage::new(Some(temp.path().to_path_buf()), Some(3)).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let mut book = Book::new("Sample");
        book.add_transaction(Transaction::expense(
            "Lunch",
            50_000.0,
            "Food",
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        ));
        storage.save(&book, "household").expect("save book");
        let loaded = storage.load("household").expect("load book");
        assert_eq!(loaded.name, "Sample");
        assert_eq!(loaded.transaction_count(), 1);
    }

    #[test]
    fn backup_writes_timestamped_files() {
        let (storage, _guard) = storage_with_temp_dir();
        let book = Book::new("Family");
        storage.save(&book, "family").expect("save book");
        storage
            .backup(&book, "family", Some("monthly"))
            .expect("create backup");
        let backups = storage.list_backups("family").expect("list backups");
        assert!(!backups.is_empty());
        assert!(backups[0].starts_with("family_"));
        assert!(backups[0].contains("monthly"));
    }

    #[test]
    fn last_book_state_roundtrips() {
        let (storage, _guard) = storage_with_temp_dir();
        assert_eq!(storage.last_book().unwrap(), None);
        storage.record_last_book(Some("My Book")).unwrap();
        assert_eq!(storage.last_book().unwrap(), Some("my_book".into()));
    }

    #[test]
    fn warnings_flag_unknown_categories() {
        let mut book = Book::new("Warn");
        book.add_transaction(Transaction::expense(
            "Mystery",
            1_000.0,
            "Nonexistent",
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        ));
        let window = DateWindow::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        )
        .unwrap();
        book.add_budget(Budget::new("AlsoMissing", 1_000.0, window));
        let warnings = book_warnings(&book);
        assert_eq!(warnings.len(), 2);
    }
}
