//! User settings for the ledger store
//!
//! Controls simulated backend latency, the storage key, the monthly report
//! window and display preferences.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// Default namespaced key holding the whole snapshot
pub const DEFAULT_STORAGE_KEY: &str = "ledger-store-data";

/// Bounds for the simulated backend delay, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySettings {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            min_ms: 120,
            max_ms: 360,
        }
    }
}

/// Persisted settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Simulated backend latency
    #[serde(default)]
    pub latency: LatencySettings,

    /// Key under which the snapshot is stored
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Number of trailing months in the monthly series
    #[serde(default = "default_monthly_window")]
    pub monthly_window: usize,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_monthly_window() -> usize {
    6
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            latency: LatencySettings::default(),
            storage_key: default_storage_key(),
            monthly_window: default_monthly_window(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.latency.min_ms > self.latency.max_ms {
            return Err(LedgerError::Config(format!(
                "latency.min_ms ({}) exceeds latency.max_ms ({})",
                self.latency.min_ms, self.latency.max_ms
            )));
        }
        if self.storage_key.trim().is_empty() {
            return Err(LedgerError::Config("storage_key must not be empty".into()));
        }
        if self.monthly_window == 0 {
            return Err(LedgerError::Config("monthly_window must be at least 1".into()));
        }
        Ok(())
    }
}
