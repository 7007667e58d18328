//! These structs provide the CLI interface for the spendsense CLI.

use crate::model::NewTransaction;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// spendsense: record your income and expenses and see where the money goes.
///
/// Transactions are appended to a CSV file in the SpendSense home directory. Reports are computed
/// from that file: all-time totals, and monthly reports with a category breakdown and a few
/// insights. Monthly reports are also exported to CSV files in the `reports` directory.
///
/// Run without a subcommand to use the interactive menu.
#[derive(Debug, Parser, Clone)]
#[command(name = "spendsense", version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    /// The subcommand to run. The interactive menu is the default.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Record a new income or expense.
    Add(AddArgs),
    /// Show the most recently recorded transactions.
    Latest(LatestArgs),
    /// Show total income, total expenses and the balance over all transactions.
    Totals,
    /// Show the report for one month and export that month's transactions to CSV.
    Report(ReportArgs),
    /// Interactive menu.
    Menu,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    /// The directory where the data file, reports and settings are kept. Defaults to
    /// ~/spendsense
    #[arg(long, env = "SPENDSENSE_HOME", default_value_t = default_spendsense_home())]
    home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `spendsense add` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct AddArgs {
    /// The amount, without a currency symbol, e.g. 12.50
    #[arg(long)]
    amount: String,

    /// Either income or expense.
    #[arg(long = "type")]
    kind: String,

    /// The date in DD/MM/YYYY format. Defaults to today.
    #[arg(long, default_value = "")]
    date: String,

    /// A free text category such as food or rent.
    #[arg(long, default_value = "")]
    category: String,

    /// An optional note.
    #[arg(long, default_value = "")]
    note: String,
}

impl AddArgs {
    #[cfg(test)]
    pub(crate) fn new(
        amount: impl Into<String>,
        kind: impl Into<String>,
        date: impl Into<String>,
        category: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            kind: kind.into(),
            date: date.into(),
            category: category.into(),
            note: note.into(),
        }
    }

    /// The unvalidated transaction described by these arguments.
    pub fn new_transaction(&self) -> NewTransaction {
        NewTransaction {
            date: self.date.clone(),
            amount: self.amount.clone(),
            kind: self.kind.clone(),
            category: self.category.clone(),
            note: self.note.clone(),
        }
    }
}

impl From<NewTransaction> for AddArgs {
    fn from(value: NewTransaction) -> Self {
        Self {
            amount: value.amount,
            kind: value.kind,
            date: value.date,
            category: value.category,
            note: value.note,
        }
    }
}

/// Args for the `spendsense latest` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct LatestArgs {
    /// How many transactions to show. Defaults to the `latest_limit` setting.
    #[arg(long)]
    limit: Option<usize>,
}

impl LatestArgs {
    #[cfg(test)]
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// How a monthly report is printed.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Human readable text.
    #[default]
    Text,
    /// The report figures as JSON.
    Json,
}

serde_plain::derive_display_from_serialize!(Format);
serde_plain::derive_fromstr_from_deserialize!(Format);

/// Args for the `spendsense report` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ReportArgs {
    /// The year, e.g. 2024. Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// The month, 1 to 12. Defaults to the current month.
    #[arg(long)]
    month: Option<u32>,

    /// Do not write the month's transactions to a CSV file.
    #[arg(long)]
    no_export: bool,

    /// Either text or json.
    #[arg(long, default_value_t = Format::Text)]
    format: Format,
}

impl ReportArgs {
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn export(&self) -> bool {
        !self.no_export
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

fn default_spendsense_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("spendsense"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or SPENDSENSE_HOME instead of relying on the default \
                home directory. If you continue using the program right now, your data will be \
                kept in ./spendsense",
            );
            PathBuf::from("spendsense")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
