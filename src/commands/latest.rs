use crate::args::LatestArgs;
use crate::commands::{render, Out};
use crate::model::Transaction;
use crate::{store, Config};
use anyhow::Result;

/// Shows the most recently recorded transactions, oldest first.
pub fn latest(config: &Config, args: LatestArgs) -> Result<Out<Vec<Transaction>>> {
    let limit = args.limit().unwrap_or_else(|| config.latest_limit());
    let transactions = config.store()?.load_all()?;
    let latest = store::latest(&transactions, limit).to_vec();
    Ok(Out::new(
        render::latest(&latest, config.currency_symbol()),
        latest,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{sample_transactions, tx, TestEnv};

    #[test]
    fn test_latest_empty() {
        let env = TestEnv::new();
        let out = latest(&env.config(), LatestArgs::default()).unwrap();
        assert_eq!(out.message(), "No transactions found.");
        assert!(out.structure().unwrap().is_empty());
    }

    #[test]
    fn test_latest_uses_configured_limit() {
        let mut transactions = sample_transactions();
        for day in 10..15 {
            transactions.push(tx(&format!("{day}/05/2024"), "1", "expense", "misc", ""));
        }
        let env = TestEnv::with_transactions(&transactions);
        let out = latest(&env.config(), LatestArgs::default()).unwrap();
        let shown = out.structure().unwrap();
        assert_eq!(shown.len(), 5);
        assert_eq!(shown.as_slice(), &transactions[3..]);

        let out = latest(&env.config(), LatestArgs::new(Some(2))).unwrap();
        assert_eq!(out.structure().unwrap().as_slice(), &transactions[6..]);
    }
}
