//! Text rendering of command results.

use crate::model::{money, Transaction};
use crate::report::{MonthlyReport, Totals};
use std::fmt::Write;

pub(super) fn transaction_line(t: &Transaction, symbol: &str) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        t.date(),
        t.kind(),
        t.amount().money(symbol),
        t.category(),
        t.note()
    )
}

pub(super) fn latest(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }
    let mut s = String::from("Latest transactions:");
    for t in transactions {
        s.push('\n');
        s.push_str(&transaction_line(t, symbol));
    }
    s
}

pub(super) fn totals(title: &str, totals: &Totals, symbol: &str) -> String {
    format!(
        "{title}\nTotal income: {}\nTotal expenses: {}\nBalance: {}",
        money(totals.income, symbol),
        money(totals.expense, symbol),
        money(totals.balance, symbol),
    )
}

pub(super) fn monthly_report(report: &MonthlyReport, symbol: &str) -> String {
    let mut s = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(s, "Monthly report for {}", report.period);
    let _ = writeln!(s, "Income: {}", money(report.totals.income, symbol));
    let _ = writeln!(s, "Expenses: {}", money(report.totals.expense, symbol));
    let _ = writeln!(s, "Balance: {}", money(report.totals.balance, symbol));

    if report.breakdown.is_empty() {
        let _ = writeln!(s, "\nNo expense categories to show for this month.");
    } else {
        let _ = writeln!(s, "\nCategory breakdown (expenses):");
        for (category, amount) in report.breakdown_by_amount() {
            let _ = writeln!(s, "- {category}: {}", money(amount, symbol));
        }
        let _ = writeln!(s, "\nTop {} categories:", crate::report::TOP_N);
        for (category, amount) in &report.top_categories {
            let _ = writeln!(s, "- {category}: {}", money(*amount, symbol));
        }
    }

    let _ = writeln!(s, "\nInsights:");
    let _ = writeln!(
        s,
        "- Average daily spend: {}",
        money(report.average_daily_spend, symbol)
    );
    if let Some(largest) = &report.largest_expense {
        let _ = writeln!(
            s,
            "- Largest single expense: {} on {} ({})",
            largest.amount.money(symbol),
            largest.date,
            largest.category
        );
    }
    if let Some((category, share)) = &report.highest_share {
        let _ = writeln!(s, "- Highest spend category share: {category} ({share}%)");
    }
    s.trim_end().to_string()
}
