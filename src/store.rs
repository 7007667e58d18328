//! The record store: an append-only CSV file of transactions.

use crate::error::{Error, Result};
use crate::model::{Transaction, HEADERS};
use crate::utils;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// An append-only CSV file holding every transaction ever recorded.
///
/// The file starts with the header row `date,amount,type,category,note`. Rows are never changed
/// or removed by this program.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Uses the data file at `path`, creating it (with only a header row) and its parent directory
    /// if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                utils::make_dir(parent)?;
            }
            let mut w = csv::Writer::from_writer(utils::create(&path)?);
            write_header(&mut w, &path)?;
            flush(&mut w, &path)?;
            debug!("Created data file {}", path.display());
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one transaction to the end of the file.
    pub fn append(&self, transaction: &Transaction) -> Result<()> {
        let file = utils::open_append(&self.path)?;
        let mut w = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        w.serialize(transaction).map_err(|source| Error::Csv {
            path: self.path.clone(),
            source,
        })?;
        flush(&mut w, &self.path)?;
        trace!("Appended {transaction:?} to {}", self.path.display());
        Ok(())
    }

    /// Reads every transaction in the file, in the order they were appended.
    ///
    /// # Errors
    /// - `Error::Io` if the file is missing or cannot be read.
    /// - `Error::Parse` if the header row is wrong or a row cannot be understood.
    pub fn load_all(&self) -> Result<Vec<Transaction>> {
        let file = utils::open(&self.path)?;
        let transactions = read_transactions(BufReader::new(file), &self.path)?;
        debug!(
            "Loaded {} transactions from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(transactions)
    }
}

/// Returns the last `limit` transactions, oldest first.
pub fn latest(transactions: &[Transaction], limit: usize) -> &[Transaction] {
    let start = transactions.len().saturating_sub(limit);
    &transactions[start..]
}

/// Reads transactions from any CSV source that has the standard header row.
pub(crate) fn read_transactions<R: Read>(r: R, path: &Path) -> Result<Vec<Transaction>> {
    let mut rdr = csv::Reader::from_reader(r);
    let headers = rdr.headers().map_err(|e| csv_read_error(e, path))?;
    if headers.iter().ne(HEADERS.iter().copied()) {
        let found = headers.iter().collect::<Vec<_>>().join(",");
        return Err(Error::parse("header row", found).at_line(1));
    }

    let mut transactions = Vec::new();
    for result in rdr.deserialize() {
        let transaction: Transaction = result.map_err(|e| csv_read_error(e, path))?;
        transactions.push(transaction);
    }
    Ok(transactions)
}

pub(crate) fn write_header<W: Write>(w: &mut csv::Writer<W>, path: &Path) -> Result<()> {
    w.write_record(HEADERS).map_err(|source| Error::Csv {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn flush<W: Write>(w: &mut csv::Writer<W>, path: &Path) -> Result<()> {
    w.flush()
        .map_err(|e| Error::io("Unable to write data to", path, e))
}

/// Sorts a CSV read failure into `Io` or `Parse`.
fn csv_read_error(e: csv::Error, path: &Path) -> Error {
    let line = e.position().map(|p| p.line());
    match e.into_kind() {
        csv::ErrorKind::Io(source) => Error::io("Failed to read file", path, source),
        csv::ErrorKind::Deserialize { err, .. } => {
            with_line(Error::parse("row", err.to_string()), line)
        }
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => with_line(
            Error::parse("row", format!("expected {expected_len} fields but found {len}")),
            line,
        ),
        other => with_line(Error::parse("row", format!("{other:?}")), line),
    }
}

fn with_line(e: Error, line: Option<u64>) -> Error {
    match line {
        Some(line) => e.at_line(line),
        None => e,
    }
}
