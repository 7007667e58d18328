use crate::commands::{render, Out};
use crate::report::{calculate_totals, Totals};
use crate::Config;
use anyhow::Result;

/// Totals over every recorded transaction.
pub fn totals(config: &Config) -> Result<Out<Totals>> {
    let transactions = config.store()?.load_all()?;
    let totals = calculate_totals(&transactions)?;
    Ok(Out::new(
        render::totals("Totals (all time):", &totals, config.currency_symbol()),
        totals,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{dec, sample_transactions, tx, TestEnv};

    #[test]
    fn test_totals() {
        let env = TestEnv::with_transactions(&sample_transactions());
        let out = totals(&env.config()).unwrap();
        let t = out.structure().unwrap();
        assert_eq!(t.income, dec("100"));
        assert_eq!(t.expense, dec("100"));
        assert_eq!(t.balance, dec("0"));
        assert!(out.message().contains("Balance: £0.00"));
    }

    #[test]
    fn test_totals_missing_data_file_is_created() {
        let env = TestEnv::new();
        let out = totals(&env.config()).unwrap();
        assert_eq!(out.structure(), Some(&Totals::default()));
    }

    #[test]
    fn test_totals_too_large_is_an_error() {
        let max = "79228162514264337593543950335";
        let env = TestEnv::with_transactions(&[
            tx("01/05/2024", max, "income", "salary", ""),
            tx("02/05/2024", max, "income", "bonus", ""),
        ]);
        let e = totals(&env.config()).unwrap_err();
        assert!(e.to_string().contains("too large"), "{e:#}");
    }
}
