//! # Data Directory
//!
//! Loading and saving the till and the stock list.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Data Directory                                     │
//! │                                                                         │
//! │  StoreConfig::new(dir) ← file names default to the classic ones        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::new(config)                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <dir>/                                                                │
//! │  ├── Currency.txt   ◄── load_till / save_till                          │
//! │  └── Stock.txt      ◄── load_catalog / save_catalog                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomic Saves
//! Every save writes `<file>.tmp` in the same directory and renames it over
//! the target, so a crash mid-write leaves the previous file intact.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use vend_core::{Catalog, Till};

use crate::error::{StoreError, StoreResult};
use crate::records::stock::{format_catalog, parse_catalog};
use crate::records::till::{format_till, parse_till};

/// Default till file name.
pub const DEFAULT_TILL_FILE: &str = "Currency.txt";

/// Default stock file name.
pub const DEFAULT_STOCK_FILE: &str = "Stock.txt";

// =============================================================================
// Configuration
// =============================================================================

/// Where the data files live.
///
/// ## Example
/// ```rust
/// use vend_store::StoreConfig;
///
/// let config = StoreConfig::new("./data").till_file("Coins.txt");
/// assert!(config.till_path().ends_with("Coins.txt"));
/// assert!(config.stock_path().ends_with("Stock.txt"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding both files.
    pub data_dir: PathBuf,

    /// Till file name, relative to `data_dir`.
    /// Default: `Currency.txt`
    pub till_file: String,

    /// Stock file name, relative to `data_dir`.
    /// Default: `Stock.txt`
    pub stock_file: String,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            till_file: DEFAULT_TILL_FILE.to_string(),
            stock_file: DEFAULT_STOCK_FILE.to_string(),
        }
    }

    /// Sets the till file name.
    pub fn till_file(mut self, name: impl Into<String>) -> Self {
        self.till_file = name.into();
        self
    }

    /// Sets the stock file name.
    pub fn stock_file(mut self, name: impl Into<String>) -> Self {
        self.stock_file = name.into();
        self
    }

    pub fn till_path(&self) -> PathBuf {
        self.data_dir.join(&self.till_file)
    }

    pub fn stock_path(&self) -> PathBuf {
        self.data_dir.join(&self.stock_file)
    }
}

// =============================================================================
// Store
// =============================================================================

/// Handle on a data directory.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        Store { config }
    }

    /// Shorthand for a store with default file names.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Store::new(StoreConfig::new(data_dir))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Whether both data files exist.
    pub fn is_seeded(&self) -> bool {
        self.config.till_path().is_file() && self.config.stock_path().is_file()
    }

    /// Loads `Currency.txt`.
    ///
    /// ## Errors
    /// - `NotFound` when the file is missing
    /// - `Parse` / `Invalid` / `DuplicateDenomination` with the line number
    pub fn load_till(&self) -> StoreResult<Till> {
        let path = self.config.till_path();
        let till = parse_till(&read(&path)?, &path)?;

        info!(
            path = %path.display(),
            denominations = till.denomination_count(),
            total = %till.total_value(),
            "Till loaded"
        );
        Ok(till)
    }

    /// Saves `Currency.txt`, ascending by denomination.
    pub fn save_till(&self, till: &Till) -> StoreResult<()> {
        let path = self.config.till_path();
        write_atomic(&path, &format_till(till))?;

        info!(path = %path.display(), total = %till.total_value(), "Till saved");
        Ok(())
    }

    /// Loads `Stock.txt`.
    pub fn load_catalog(&self) -> StoreResult<Catalog> {
        let path = self.config.stock_path();
        let catalog = parse_catalog(&read(&path)?, &path)?;

        info!(path = %path.display(), products = catalog.len(), "Stock loaded");
        Ok(catalog)
    }

    /// Saves `Stock.txt` in catalog order.
    pub fn save_catalog(&self, catalog: &Catalog) -> StoreResult<()> {
        let path = self.config.stock_path();
        write_atomic(&path, &format_catalog(catalog))?;

        info!(path = %path.display(), products = catalog.len(), "Stock saved");
        Ok(())
    }
}

fn read(path: &Path) -> StoreResult<String> {
    debug!(path = %path.display(), "Reading data file");
    fs::read_to_string(path).map_err(|e| StoreError::io(path, e))
}

fn write_atomic(path: &Path, contents: &str) -> StoreResult<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, contents).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;

    debug!(path = %path.display(), bytes = contents.len(), "Data file replaced");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vend_core::{Denomination, Money, Product};

    fn d(value: u32) -> Denomination {
        Denomination::new(value).unwrap()
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("/srv/vend")
            .till_file("coins.txt")
            .stock_file("items.txt");

        assert_eq!(config.till_path(), PathBuf::from("/srv/vend/coins.txt"));
        assert_eq!(config.stock_path(), PathBuf::from("/srv/vend/items.txt"));
    }

    #[test]
    fn test_missing_files_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());

        assert!(!store.is_seeded());
        assert!(store.load_till().unwrap_err().is_not_found());
        assert!(store.load_catalog().unwrap_err().is_not_found());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("nested"));

        let till = Till::from_counts([(d(1), 0), (d(5), 4), (d(20), 1)]);
        let catalog = Catalog::new(vec![
            Product::new("Pepsi", Money::from_units(15), 3).unwrap(),
            Product::new("Chipsy Cheese", Money::from_units(7), 0).unwrap(),
        ]);

        store.save_till(&till).unwrap();
        store.save_catalog(&catalog).unwrap();

        assert!(store.is_seeded());
        assert_eq!(store.load_till().unwrap(), till);
        assert_eq!(store.load_catalog().unwrap(), catalog);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());

        store.save_till(&Till::from_counts([(d(5), 1)])).unwrap();
        store.save_till(&Till::from_counts([(d(5), 2)])).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Currency.txt".to_string()]);
        assert_eq!(store.load_till().unwrap().count(d(5)), 2);
    }
}
