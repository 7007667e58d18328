//! The interactive menu.

use crate::args::{AddArgs, LatestArgs};
use crate::commands::{add, latest, report, totals, Out};
use crate::error::Error;
use crate::model::{Amount, NewTransaction, Period, TransactionType};
use crate::Config;
use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::fmt::Debug;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::warn;

const MENU: &str = "\nSpendSense Menu\n\
                    1. Add transaction\n\
                    2. View latest transactions\n\
                    3. Show totals (all time)\n\
                    4. Monthly report\n\
                    5. Exit";

/// Runs the menu on stdin and stdout until the user chooses to exit.
pub fn menu(config: &Config) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut menu = Menu::new(config, stdin.lock(), stdout.lock(), Local::now().date_naive());
    menu.run()
}

/// What the user asked for at the menu prompt.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Choice {
    Add,
    Latest,
    Totals,
    Report,
    Exit,
}

impl FromStr for Choice {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Choice::Add),
            "2" => Ok(Choice::Latest),
            "3" => Ok(Choice::Totals),
            "4" => Ok(Choice::Report),
            "5" => Ok(Choice::Exit),
            _ => Err(()),
        }
    }
}

struct Menu<'a, R, W> {
    config: &'a Config,
    input: R,
    output: W,
    today: NaiveDate,
}

impl<'a, R, W> Menu<'a, R, W>
where
    R: BufRead,
    W: Write,
{
    fn new(config: &'a Config, input: R, output: W, today: NaiveDate) -> Self {
        Self {
            config,
            input,
            output,
            today,
        }
    }

    /// Loops until the user exits or the input ends. Errors from a single action are shown to the
    /// user and the loop carries on; only terminal I/O failures end it early.
    fn run(&mut self) -> Result<()> {
        loop {
            self.say(MENU)?;
            let Some(line) = self.prompt("Choose an option (1-5): ")? else {
                return Ok(());
            };
            let choice = match Choice::from_str(&line) {
                Ok(choice) => choice,
                Err(()) => {
                    self.say("Invalid choice. Please enter 1 to 5.")?;
                    continue;
                }
            };
            let outcome = match choice {
                Choice::Add => self.add(),
                Choice::Latest => self.show(latest(self.config, LatestArgs::default())),
                Choice::Totals => self.show(totals(self.config)),
                Choice::Report => self.report(),
                Choice::Exit => {
                    self.say("Goodbye!")?;
                    return Ok(());
                }
            };
            match outcome {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(e) => {
                    warn!("{e:#}");
                    self.say(&format!("Error: {e:#}"))?;
                }
            }
        }
    }

    /// Returns `Ok(false)` if the input ended part way through.
    fn add(&mut self) -> Result<bool> {
        let mut input = NewTransaction::default();

        let Some(date) = self.prompt("Enter date (DD/MM/YYYY) or leave blank for today: ")? else {
            return Ok(false);
        };
        input.date = date;

        let Some(amount) = self.prompt("Enter amount: ")? else {
            return Ok(false);
        };
        if Amount::from_str(&amount).is_err() {
            self.say("Amount must be a number.")?;
            return Ok(true);
        }
        input.amount = amount;

        let Some(kind) = self.prompt("Enter type (income/expense): ")? else {
            return Ok(false);
        };
        if let Err(e) = TransactionType::parse_input(&kind) {
            self.say(&e.to_string())?;
            return Ok(true);
        }
        input.kind = kind;

        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(false);
        };
        input.category = category;

        let Some(note) = self.prompt("Enter note (optional): ")? else {
            return Ok(false);
        };
        input.note = note;

        let out = add::add_on(self.config, AddArgs::from(input), self.today);
        self.show(out)
    }

    fn report(&mut self) -> Result<bool> {
        let year_prompt = format!(
            "Enter year (YYYY) or leave blank for {}: ",
            self.today.year()
        );
        let Some(year) = self.prompt(&year_prompt)? else {
            return Ok(false);
        };
        let month_prompt = format!(
            "Enter month (1-12) or leave blank for {}: ",
            self.today.month()
        );
        let Some(month) = self.prompt(&month_prompt)? else {
            return Ok(false);
        };

        let year = parse_optional::<i32>(&year, "Year")?;
        let month = parse_optional::<u32>(&month, "Month")?;
        let period = Period::or_today(year, month, self.today)?;
        self.show(report::report_on(self.config, period))
    }

    fn show<T>(&mut self, out: Result<Out<T>>) -> Result<bool>
    where
        T: Serialize + Clone + Debug,
    {
        let out = out?;
        self.say(&format!("\n{}", out.message()))?;
        Ok(true)
    }

    fn say(&mut self, s: &str) -> Result<()> {
        writeln!(self.output, "{s}").context("Unable to write to the terminal")
    }

    /// Prints `prompt` and reads a trimmed line. `None` means the input has ended.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}").context("Unable to write to the terminal")?;
        self.output
            .flush()
            .context("Unable to write to the terminal")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Unable to read from the terminal")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Parses a blank-means-default number typed at a prompt.
fn parse_optional<T: FromStr>(s: &str, what: &str) -> std::result::Result<Option<T>, Error> {
    if s.is_empty() {
        return Ok(None);
    }
    s.parse()
        .map(Some)
        .map_err(|_| Error::validation(format!("{what} must be a whole number, got '{s}'.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{date, sample_transactions, TestEnv};

    fn run(env: &TestEnv, input: &str) -> String {
        let config = env.config();
        let mut output = Vec::new();
        Menu::new(&config, input.as_bytes(), &mut output, date(2024, 5, 17))
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_exit() {
        let env = TestEnv::new();
        let out = run(&env, "5\n");
        assert!(out.contains("SpendSense Menu"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let env = TestEnv::new();
        let out = run(&env, "");
        assert!(out.ends_with("Choose an option (1-5): "));
    }

    #[test]
    fn test_invalid_choice_loops() {
        let env = TestEnv::new();
        let out = run(&env, "9\nabc\n5\n");
        assert_eq!(out.matches("Invalid choice. Please enter 1 to 5.").count(), 2);
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_add_then_latest() {
        let env = TestEnv::new();
        let out = run(&env, "1\n\n12.5\nExpense\nFood\ncoffee\n2\n5\n");
        assert!(out.contains("Transaction saved."));
        assert!(out.contains("17/05/2024 | expense | £12.50 | Food | coffee"));
        let stored = env.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].date(), "17/05/2024");
    }

    #[test]
    fn test_add_bad_amount_aborts_early() {
        let env = TestEnv::new();
        let out = run(&env, "1\n\nlots\n5\n");
        assert!(out.contains("Amount must be a number."));
        assert!(!out.contains("Enter type"));
        assert!(env.stored().is_empty());
    }

    #[test]
    fn test_add_bad_type_aborts() {
        let env = TestEnv::new();
        let out = run(&env, "1\n\n3\nloan\n5\n");
        assert!(out.contains("Type must be income or expense."));
        assert!(!out.contains("Enter category"));
        assert!(env.stored().is_empty());
    }

    #[test]
    fn test_add_bad_date_reports_error_and_continues() {
        let env = TestEnv::new();
        let out = run(&env, "1\n2024-05-01\n3\nincome\n\n\n5\n");
        assert!(out.contains("Error: Date must be in DD/MM/YYYY format"));
        assert!(out.ends_with("Goodbye!\n"));
        assert!(env.stored().is_empty());
    }

    #[test]
    fn test_totals() {
        let env = TestEnv::with_transactions(&sample_transactions());
        let out = run(&env, "3\n5\n");
        assert!(out.contains("Totals (all time):\nTotal income: £100.00"));
    }

    #[test]
    fn test_report_defaults_to_this_month() {
        let env = TestEnv::with_transactions(&sample_transactions());
        let out = run(&env, "4\n\n\n5\n");
        assert!(out.contains("Enter year (YYYY) or leave blank for 2024: "));
        assert!(out.contains("Enter month (1-12) or leave blank for 5: "));
        assert!(out.contains("Monthly report for 2024-05"));
        assert!(out.contains("- Largest single expense: £60.00 on 03/05/2024 (food)"));
        assert!(out.contains("Report exported to: "));
        assert_eq!(env.reports().len(), 1);
    }

    #[test]
    fn test_report_bad_month() {
        let env = TestEnv::with_transactions(&sample_transactions());
        let out = run(&env, "4\n2024\n13\n4\n2024\nmay\n5\n");
        assert!(out.contains("Error: Month must be between 1 and 12, got 13."));
        assert!(out.contains("Error: Month must be a whole number, got 'may'."));
        assert!(env.reports().is_empty());
    }

    #[test]
    fn test_choice_from_str() {
        assert_eq!(Choice::from_str(" 4 "), Ok(Choice::Report));
        assert!(Choice::from_str("6").is_err());
    }
}
