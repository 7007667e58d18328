//! Configuration and file layout of the SpendSense home directory.
//!
//! The home directory (by default `$HOME/spendsense`) contains:
//! - `config.json`: optional settings, written with defaults the first time the program runs
//! - `data/transactions.csv`: every recorded transaction
//! - `reports/`: exported monthly reports

use crate::error::{Error, Result};
use crate::store::Store;
use crate::utils;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "spendsense";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA: &str = "data";
const TRANSACTIONS_CSV: &str = "transactions.csv";
const REPORTS: &str = "reports";
const CURRENCY_SYMBOL: &str = "£";
const LATEST_LIMIT: usize = 5;

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to the home directory, and from there it loads `config.json` and provides the paths
/// of the data file and reports directory.
#[derive(Debug, Clone)]
pub struct Config {
    data_file: PathBuf,
    reports_dir: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// This will
    /// - create the home directory if it does not exist
    /// - load `config.json`, or write one with default settings if there is none
    /// - return the loaded configuration object
    ///
    /// The data file and reports directory are not touched until they are used.
    pub fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        utils::make_dir(&maybe_relative)?;
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path)?
        } else {
            let config_file = ConfigFile::default();
            config_file.save(&config_path)?;
            debug!("Wrote default settings to {}", config_path.display());
            config_file
        };

        Ok(Self {
            data_file: root.join(DATA).join(TRANSACTIONS_CSV),
            reports_dir: root.join(REPORTS),
            config_file,
        })
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config_file.currency_symbol
    }

    /// How many transactions "latest" shows when no limit is given.
    pub fn latest_limit(&self) -> usize {
        self.config_file.latest_limit
    }

    /// Opens the record store, creating the data file if necessary.
    pub fn store(&self) -> Result<Store> {
        Store::open(&self.data_file)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "spendsense",
///   "config_version": 1,
///   "currency_symbol": "£",
///   "latest_limit": 5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
struct ConfigFile {
    /// Application name, should always be "spendsense"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Printed in front of monetary values.
    currency_symbol: String,

    /// The default number of transactions shown by "latest".
    latest_limit: usize,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            latest_limit: LATEST_LIMIT,
        }
    }
}

impl ConfigFile {
    fn load(path: &Path) -> Result<Self> {
        let content = utils::read(path)?;
        serde_json::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        utils::write(path, json)
    }
}
