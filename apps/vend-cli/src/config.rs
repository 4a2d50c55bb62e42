//! # Machine Configuration
//!
//! Settings for the console machine: currency label, change policy and
//! where the data files live.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                    │
//! │     --data-dir ./data                                                  │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     VEND_DATA_DIR=/srv/vend                                            │
//! │     VEND_CHANGE_POLICY=greedy-first                                    │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/vend/vend.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.vend.vend/vend.toml (macOS)      │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     EGP, optimal change, platform data directory                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # vend.toml
//! [machine]
//! currency = "EGP"
//! change_policy = "optimal"   # optimal | greedy-first
//! max_change_amount = 100000
//!
//! [storage]
//! data_dir = "/srv/vend"
//! till_file = "Currency.txt"
//! stock_file = "Stock.txt"
//! ```

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use vend_core::validation::validate_max_change_amount;
use vend_core::{
    ChangePolicy, Money, ValidationError, DEFAULT_CURRENCY, DEFAULT_MAX_CHANGE_AMOUNT,
};
use vend_store::{StoreConfig, DEFAULT_STOCK_FILE, DEFAULT_TILL_FILE};

const CONFIG_FILE_NAME: &str = "vend.toml";

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `--config` named a file that does not exist.
    #[error("Config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid TOML in config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Machine Settings
// =============================================================================

/// How the machine sells and pays out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSettings {
    /// Label printed after amounts.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Change strategy.
    #[serde(default)]
    pub change_policy: ChangePolicy,

    /// Largest change amount computed in one go.
    #[serde(default = "default_max_change_amount")]
    pub max_change_amount: i64,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_max_change_amount() -> i64 {
    DEFAULT_MAX_CHANGE_AMOUNT
}

impl Default for MachineSettings {
    fn default() -> Self {
        MachineSettings {
            currency: default_currency(),
            change_policy: ChangePolicy::default(),
            max_change_amount: default_max_change_amount(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the till and stock files are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Data directory. Unset means the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_till_file")]
    pub till_file: String,

    #[serde(default = "default_stock_file")]
    pub stock_file: String,
}

fn default_till_file() -> String {
    DEFAULT_TILL_FILE.to_string()
}

fn default_stock_file() -> String {
    DEFAULT_STOCK_FILE.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_dir: None,
            till_file: default_till_file(),
            stock_file: default_stock_file(),
        }
    }
}

// =============================================================================
// Vend Config
// =============================================================================

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendConfig {
    #[serde(default)]
    pub machine: MachineSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl VendConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`vend.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist; the platform default may not.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.machine.currency.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "machine.currency".to_string(),
            }
            .into());
        }

        validate_max_change_amount(self.max_change_amount())?;

        for (field, name) in [
            ("storage.till_file", &self.storage.till_file),
            ("storage.stock_file", &self.storage.stock_file),
        ] {
            if name.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: field.to_string(),
                }
                .into());
            }
        }

        if self.storage.till_file == self.storage.stock_file {
            return Err(ValidationError::InvalidFormat {
                field: "storage.stock_file".to_string(),
                reason: "must differ from storage.till_file".to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `VEND_*` overrides from `lookup`. Unparseable values are
    /// logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("VEND_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(currency) = lookup("VEND_CURRENCY") {
            self.machine.currency = currency;
        }

        if let Some(policy) = lookup("VEND_CHANGE_POLICY") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding change policy from environment");
                    self.machine.change_policy = parsed;
                }
                Err(e) => warn!(policy = %policy, error = %e, "Ignoring VEND_CHANGE_POLICY"),
            }
        }

        if let Some(max) = lookup("VEND_MAX_CHANGE_AMOUNT") {
            match max.parse::<i64>() {
                Ok(parsed) => self.machine.max_change_amount = parsed,
                Err(_) => warn!(value = %max, "Ignoring VEND_MAX_CHANGE_AMOUNT"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vend", "vend")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn max_change_amount(&self) -> Money {
        Money::from_units(self.machine.max_change_amount)
    }

    /// Configured data directory, else the platform data directory, else
    /// `./data`.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("com", "vend", "vend")
                    .map(|dirs| dirs.data_dir().to_path_buf())
            })
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Store settings for `vend-store`.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.data_dir())
            .till_file(self.storage.till_file.clone())
            .stock_file(self.storage.stock_file.clone())
    }
}
