//! Shared test utilities for creating test environments and sample data.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Transaction, TransactionType};
use crate::Config;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::TempDir;

/// Test environment that sets up a home directory with a Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path().join("spendsense")).unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Creates the environment and appends `transactions` to its data file.
    pub fn with_transactions(transactions: &[Transaction]) -> Self {
        let env = Self::new();
        let store = env.config.store().unwrap();
        for t in transactions {
            store.append(t).unwrap();
        }
        env
    }

    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Every transaction currently in the data file.
    pub fn stored(&self) -> Vec<Transaction> {
        self.config.store().unwrap().load_all().unwrap()
    }

    /// Names of the files in the reports directory.
    pub fn reports(&self) -> Vec<String> {
        match std::fs::read_dir(self.config.reports_dir()) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Builds a transaction from stored-style text.
pub fn tx(date: &str, amount: &str, kind: &str, category: &str, note: &str) -> Transaction {
    Transaction::new(
        date,
        amount.parse().unwrap(),
        TransactionType::from(kind),
        category,
        note,
    )
}

/// One salary payment and two food expenses in May 2024.
pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        tx("01/05/2024", "100", "income", "salary", ""),
        tx("02/05/2024", "40", "expense", "food", "lunch"),
        tx("03/05/2024", "60", "expense", "food", "dinner"),
    ]
}
