//! SpendSense: record income and expenses in a CSV file and report on them.
//!
//! - [`Store`] appends transactions to, and loads them from, the data file.
//! - [`report`] holds the pure aggregation functions behind every report.
//! - [`export`] writes a month of transactions to a report file.
//! - [`commands`] implements the CLI subcommands and the interactive menu.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod export;
pub mod model;
pub mod report;
mod store;
#[cfg(test)]
mod test;
mod utils;

pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use store::{latest, Store};
