use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";
pub(crate) const DEFAULT_FILE_NAME: &str = "finance_data.csv";
pub(crate) const DEFAULT_LOG_FILTER: &str = "warn";

const FILE_ENV: &str = "FINTRACK_FILE";
const LOG_ENV: &str = "FINTRACK_LOG";

/// Layout of one ledger file. Handed to the store at construction and never
/// changed afterwards, so two stores can use different formats side by side.
#[derive(Debug, Clone)]
pub(crate) struct LedgerConfig {
    pub(crate) path: PathBuf,
    /// chrono format string for the date column.
    pub(crate) date_format: String,
    pub(crate) delimiter: u8,
}

impl LedgerConfig {
    pub(crate) fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
            delimiter: b',',
        }
    }

    /// Human-readable form of the date format, e.g. `dd-mm-yyyy`.
    pub(crate) fn date_hint(&self) -> String {
        self.date_format
            .replace("%d", "dd")
            .replace("%m", "mm")
            .replace("%Y", "yyyy")
            .replace("%y", "yy")
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) ledger: LedgerConfig,
    pub(crate) log_filter: String,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        let path = match std::env::var_os(FILE_ENV) {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => default_ledger_path()?,
        };
        let log_filter =
            std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
        Ok(Self {
            ledger: LedgerConfig::at(path),
            log_filter,
        })
    }
}

fn default_ledger_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "fintrack", "fintrack")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir: &Path = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join(DEFAULT_FILE_NAME))
}
