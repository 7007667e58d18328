//! Error types for the library layer.
//!
//! The command layer and the binary wrap these in `anyhow` for context, the same way every other
//! fallible operation in the program is reported.

use std::path::PathBuf;

/// The ways a SpendSense operation can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// User-entered data was rejected. Nothing was written.
    #[error("{0}")]
    Validation(String),

    /// A stored value could not be parsed.
    #[error("Unable to parse {what} '{value}'{}", location(.line))]
    Parse {
        /// A short name for the thing being parsed, e.g. `date` or `amount`.
        what: &'static str,
        /// The offending text.
        value: String,
        /// The line of the backing file, when known.
        line: Option<u64>,
    },

    /// A file or directory could not be read, written or created.
    #[error("{message} '{}': {source}", .path.display())]
    Io {
        message: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    /// A sum or share of stored amounts is too large to be represented.
    #[error("The amounts are too large to calculate the {0}")]
    Overflow(&'static str),

    /// The CSV layer failed.
    #[error("CSV error in '{}': {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    /// The settings file exists but could not be understood.
    #[error("Invalid config file '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub(crate) fn parse(what: &'static str, value: impl Into<String>) -> Self {
        Error::Parse {
            what,
            value: value.into(),
            line: None,
        }
    }

    pub(crate) fn io(
        message: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Error::Io {
            message,
            path: path.into(),
            source,
        }
    }

    /// Attaches a file line number to a `Parse` error. Other variants are returned unchanged.
    pub(crate) fn at_line(self, line: u64) -> Self {
        match self {
            Error::Parse { what, value, .. } => Error::Parse {
                what,
                value,
                line: Some(line),
            },
            other => other,
        }
    }

    /// True for errors caused by bad user input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// True for errors caused by malformed stored data.
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// True for sums that do not fit in a `Decimal`.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Error::Overflow(_))
    }

    /// True for filesystem errors.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }
}

fn location(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" at line {line}"),
        None => String::new(),
    }
}
