//! Writes a month of transactions to a CSV report file.

use crate::error::{Error, Result};
use crate::model::Transaction;
use crate::store;
use crate::utils;
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix of every exported report file name.
pub const REPORT_PREFIX: &str = "spendsense_report";

/// Writes `transactions` to a new file in `reports_dir`, creating the directory if needed, and
/// returns the path of the file.
///
/// The file name is `spendsense_report_<YYYY>-<MM>_<YYYYMMDD_HHMMSS>.csv` using the current local
/// time. The rows hold the fields exactly as stored, under the same header row as the data file,
/// so a report can be read back with [`crate::Store::load_all`].
pub fn export_monthly_report(
    transactions: &[Transaction],
    year: i32,
    month: u32,
    reports_dir: &Path,
) -> Result<PathBuf> {
    export_monthly_report_at(
        transactions,
        year,
        month,
        reports_dir,
        Local::now().naive_local(),
    )
}

/// Same as [`export_monthly_report`] with the timestamp supplied by the caller.
pub fn export_monthly_report_at(
    transactions: &[Transaction],
    year: i32,
    month: u32,
    reports_dir: &Path,
    now: NaiveDateTime,
) -> Result<PathBuf> {
    utils::make_dir(reports_dir)?;
    let path = reports_dir.join(report_file_name(year, month, now));

    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(utils::create(&path)?);
    store::write_header(&mut w, &path)?;
    for t in transactions {
        w.serialize(t).map_err(|source| Error::Csv {
            path: path.clone(),
            source,
        })?;
    }
    store::flush(&mut w, &path)?;

    debug!(
        "Exported {} transactions to {}",
        transactions.len(),
        path.display()
    );
    Ok(path)
}

fn report_file_name(year: i32, month: u32, now: NaiveDateTime) -> String {
    format!(
        "{REPORT_PREFIX}_{year}-{month:02}_{}.csv",
        now.format("%Y%m%d_%H%M%S")
    )
}
