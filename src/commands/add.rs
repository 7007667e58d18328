//! Records a new transaction.

use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::Config;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tracing::debug;

/// Validates the transaction described by `args` and appends it to the data file.
///
/// # Arguments
///
/// - `config` - The application configuration holding the data file path.
/// - `args` - The transaction as entered by the user. A blank date means today.
///
/// # Returns
///
/// On success, returns an `Out` containing a confirmation message and the stored `Transaction`.
///
/// # Errors
///
/// - Returns a validation error if the date, amount or type is unacceptable. Nothing is written.
/// - Returns an error if the data file cannot be written.
pub fn add(config: &Config, args: AddArgs) -> Result<Out<Transaction>> {
    add_on(config, args, Local::now().date_naive())
}

pub(super) fn add_on(config: &Config, args: AddArgs, today: NaiveDate) -> Result<Out<Transaction>> {
    let transaction = args.new_transaction().validate(today)?;
    let store = config.store()?;
    store
        .append(&transaction)
        .context("Unable to save the transaction")?;
    debug!("Saved {transaction:?}");
    Ok(Out::new("Transaction saved.", transaction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test::{date, TestEnv};

    #[test]
    fn test_add_saves() {
        let env = TestEnv::new();
        let args = AddArgs::new("40", "expense", "02/05/2024", "Food", "lunch");
        let out = add_on(&env.config(), args, date(2024, 5, 17)).unwrap();
        assert_eq!(out.message(), "Transaction saved.");
        let stored = env.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(Some(&stored[0]), out.structure());
        assert_eq!(stored[0].category(), "Food");
    }

    #[test]
    fn test_add_defaults_date_to_today() {
        let env = TestEnv::new();
        let args = AddArgs::new("2500", "Income", "", "salary", "");
        add_on(&env.config(), args, date(2024, 5, 17)).unwrap();
        assert_eq!(env.stored()[0].date(), "17/05/2024");
    }

    #[test]
    fn test_add_rejects_bad_input_without_writing() {
        let env = TestEnv::new();
        for args in [
            AddArgs::new("forty", "expense", "", "", ""),
            AddArgs::new("40", "gift", "", "", ""),
            AddArgs::new("40", "expense", "31/02/2024", "", ""),
        ] {
            let e = add_on(&env.config(), args, date(2024, 5, 17)).unwrap_err();
            let e = e.downcast_ref::<Error>().unwrap();
            assert!(e.is_validation(), "{e}");
        }
        assert!(env.stored().is_empty());
    }
}
