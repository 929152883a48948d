//! Configuration for totalling a table.
//!
//! `TotalsOptions` holds the column positions, currency symbol and detail flag that every
//! aggregation needs. Values come from built-in defaults, then an optional JSON config file, then
//! command line flags, each layer overriding the one before.
//!
//! The config file lives at `--config`, `$TOTALS_CONFIG`, or `<config dir>/table-totals/config.json`.

use crate::{utils, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "table-totals";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// Zero-based index of the column holding the row's date.
pub const DEFAULT_DATE_COLUMN: usize = 12;
/// Zero-based index of the column holding the row's amount.
pub const DEFAULT_AMOUNT_COLUMN: usize = 6;
/// Zero-based index of the first expense column.
pub const DEFAULT_EXPENSE_COLUMN_1: usize = 10;
/// Zero-based index of the second expense column.
pub const DEFAULT_EXPENSE_COLUMN_2: usize = 11;
/// The symbol stripped from the amount cell before it is parsed.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

/// Everything the aggregator needs to know about the table's layout and how to report on it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TotalsOptions {
    /// Column compared against the target date. Defaults to 12.
    pub date_column: usize,
    /// Column holding the amount. Defaults to 6.
    pub amount_column: usize,
    /// First expense column. Defaults to 10.
    pub expense_column_1: usize,
    /// Second expense column. Defaults to 11.
    pub expense_column_2: usize,
    /// Removed from the amount cell (first occurrence only). Defaults to `£`.
    pub currency_symbol: String,
    /// Whether to keep a per-row breakdown for display. Defaults to false.
    pub show_details: bool,
}

impl Default for TotalsOptions {
    fn default() -> Self {
        Self {
            date_column: DEFAULT_DATE_COLUMN,
            amount_column: DEFAULT_AMOUNT_COLUMN,
            expense_column_1: DEFAULT_EXPENSE_COLUMN_1,
            expense_column_2: DEFAULT_EXPENSE_COLUMN_2,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            show_details: false,
        }
    }
}

impl TotalsOptions {
    /// The largest configured column index. A row needs more cells than this to be considered.
    pub fn max_column(&self) -> usize {
        self.date_column
            .max(self.amount_column)
            .max(self.expense_column_1)
            .max(self.expense_column_2)
    }

    /// Applies the values present in a config file over these options.
    pub fn merge_file(mut self, file: &ConfigFile) -> Self {
        let columns = &file.columns;
        if let Some(v) = columns.date {
            self.date_column = v;
        }
        if let Some(v) = columns.amount {
            self.amount_column = v;
        }
        if let Some(v) = columns.expense_1 {
            self.expense_column_1 = v;
        }
        if let Some(v) = columns.expense_2 {
            self.expense_column_2 = v;
        }
        if let Some(s) = &file.currency_symbol {
            self.currency_symbol = s.clone();
        }
        self
    }
}

/// Represents the format of the configuration file. Every setting
/// is optional.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "table-totals",
///   "config_version": 1,
///   "columns": { "date": 11, "amount": 5, "expense_1": 9, "expense_2": 10 },
///   "currency_symbol": "$"
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct ConfigFile {
    /// Application name, should always be "table-totals"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    #[serde(default)]
    columns: ColumnsFile,

    #[serde(default)]
    currency_symbol: Option<String>,
}

/// Column indices as written in the config file.
#[derive(Debug, Clone, Default, Deserialize, Eq, PartialEq)]
struct ColumnsFile {
    #[serde(default)]
    date: Option<usize>,
    #[serde(default)]
    amount: Option<usize>,
    #[serde(default)]
    expense_1: Option<usize>,
    #[serde(default)]
    expense_2: Option<usize>,
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app or
    /// version.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version == CONFIG_VERSION,
            "Unsupported config_version {} in {}",
            config.config_version,
            path.display()
        );

        Ok(config)
    }
}

/// The default config file path, `<config dir>/table-totals/config.json`, if the platform has a
/// config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_JSON))
}

/// Resolves the options from defaults and the config file.
///
/// An explicitly given `path` must exist. Without one, the default location is used only if a file
/// is there.
pub async fn load_options(path: Option<&Path>) -> Result<TotalsOptions> {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => default_config_path().filter(|p| p.is_file()),
    };
    let options = TotalsOptions::default();
    match path {
        Some(p) => {
            debug!("Loading config from {}", p.display());
            let file = ConfigFile::load(&p)
                .await
                .with_context(|| format!("Unable to load config from {}", p.display()))?;
            Ok(options.merge_file(&file))
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(options)
        }
    }
}
