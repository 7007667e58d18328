//! The monthly report.

use crate::args::{Format, ReportArgs};
use crate::commands::{render, Out};
use crate::export::export_monthly_report;
use crate::model::Period;
use crate::report::MonthlyReport;
use crate::Config;
use anyhow::{Context, Result};
use chrono::Local;
use std::path::Path;
use tracing::info;

/// Builds the report for one month and, unless disabled, exports the month's transactions.
///
/// # Arguments
///
/// - `config` - The application configuration holding the data file and reports directory.
/// - `args` - The month to report on (defaulting to the current month), whether to export, and
///   the output format.
///
/// # Returns
///
/// On success, returns an `Out` containing the rendered report, followed by the path of the
/// exported file, and the `MonthlyReport` itself.
///
/// # Errors
///
/// - Returns an error if the year or month is invalid.
/// - Returns an error if the data file cannot be read or holds a date that cannot be parsed.
/// - Returns an error if the export file cannot be written.
pub fn report(config: &Config, args: ReportArgs) -> Result<Out<MonthlyReport>> {
    let today = Local::now().date_naive();
    let period = Period::or_today(args.year(), args.month(), today)?;
    report_for(config, period, args.export(), args.format())
}

pub(super) fn report_for(
    config: &Config,
    period: Period,
    export: bool,
    format: Format,
) -> Result<Out<MonthlyReport>> {
    let transactions = config.store()?.load_all()?;
    let report = MonthlyReport::build(&transactions, period)
        .with_context(|| format!("Unable to build the report for {period}"))?;

    let mut message = match format {
        Format::Text => render::monthly_report(&report, config.currency_symbol()),
        Format::Json => serde_json::to_string_pretty(&report)
            .context("Unable to serialize the report to JSON")?,
    };

    if export {
        let path = export_monthly_report(
            &report.transactions,
            period.year(),
            period.month(),
            config.reports_dir(),
        )
        .context("Unable to export the monthly report")?;
        info!("Exported {} transactions", report.transactions.len());
        exported_message(&mut message, &path, format);
    }

    Ok(Out::new(message, report))
}

/// The monthly report with `year` and `month` already decided, as used by the menu.
pub(super) fn report_on(config: &Config, period: Period) -> Result<Out<MonthlyReport>> {
    report_for(config, period, true, Format::Text)
}

fn exported_message(message: &mut String, path: &Path, format: Format) {
    // JSON output stays parseable, so the path is only mentioned in the log.
    if format == Format::Text {
        message.push_str(&format!("\n\nReport exported to: {}", path.display()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{sample_transactions, tx, TestEnv};

    fn may() -> Period {
        Period::new(2024, 5).unwrap()
    }

    #[test]
    fn test_report_exports() {
        let env = TestEnv::with_transactions(&sample_transactions());
        let out = report_for(&env.config(), may(), true, Format::Text).unwrap();
        assert!(out.message().starts_with("Monthly report for 2024-05"));
        assert!(out.message().contains("Report exported to: "));
        let reports = env.reports();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].starts_with("spendsense_report_2024-05_"));
        assert!(reports[0].ends_with(".csv"));

        let exported = crate::Store::open(env.config().reports_dir().join(&reports[0]))
            .unwrap()
            .load_all()
            .unwrap();
        assert_eq!(exported, sample_transactions());
    }

    #[test]
    fn test_report_no_export() {
        let env = TestEnv::with_transactions(&sample_transactions());
        let out = report_for(&env.config(), may(), false, Format::Text).unwrap();
        assert!(!out.message().contains("exported"));
        assert!(env.reports().is_empty());
    }

    #[test]
    fn test_report_json() {
        let env = TestEnv::with_transactions(&sample_transactions());
        let out = report_for(&env.config(), may(), false, Format::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(out.message()).unwrap();
        assert_eq!(json["period"]["month"], 5);
        assert_eq!(json["largest_expense"]["date"], "03/05/2024");
        assert_eq!(json["percentages"]["food"], "100.0");
    }

    #[test]
    fn test_report_bad_stored_date() {
        let mut transactions = sample_transactions();
        transactions.push(tx("May 4th", "5", "expense", "food", ""));
        let env = TestEnv::with_transactions(&transactions);
        let e = report_for(&env.config(), may(), true, Format::Text).unwrap_err();
        let cause = e.downcast_ref::<crate::Error>().unwrap();
        assert!(cause.is_parse());
        assert!(env.reports().is_empty());
    }
}
