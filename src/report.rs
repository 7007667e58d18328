//! Reports over a loaded set of transactions.
//!
//! Everything here is a pure function of its input: nothing is cached between calls. The only
//! errors are a stored date that cannot be parsed and sums too large for a `Decimal`.

use crate::error::{Error, Result};
use crate::model::{Amount, Period, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Summed expense amounts keyed by normalized category name.
pub type CategoryBreakdown = BTreeMap<String, Decimal>;

/// The number of categories shown in the "top categories" section of a monthly report.
pub const TOP_N: usize = 3;

/// Income, expense and the difference between them.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// The single most expensive transaction.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct LargestExpense {
    /// The category as stored, not normalized.
    pub category: String,
    pub amount: Amount,
    pub date: String,
}

/// Returns the transactions dated within `period`, in their original order.
///
/// # Errors
/// - `Error::Parse` for the first transaction whose date is not `DD/MM/YYYY`.
pub fn filter_by_month(transactions: &[Transaction], period: Period) -> Result<Vec<Transaction>> {
    let mut filtered = Vec::new();
    for t in transactions {
        if period.contains(t.parsed_date()?) {
            filtered.push(t.clone());
        }
    }
    Ok(filtered)
}

/// Sums income and expense. Transactions of any other type do not count towards either.
///
/// # Errors
/// - `Error::Overflow` if a sum does not fit in a `Decimal`.
pub fn calculate_totals(transactions: &[Transaction]) -> Result<Totals> {
    let mut totals = Totals::default();
    for t in transactions {
        if t.is_income() {
            totals.income = add(totals.income, t.amount().value(), "total income")?;
        } else if t.is_expense() {
            totals.expense = add(totals.expense, t.amount().value(), "total expense")?;
        }
    }
    totals.balance = totals
        .income
        .checked_sub(totals.expense)
        .ok_or(Error::Overflow("balance"))?;
    Ok(totals)
}

/// Sums expenses by category key. See [`crate::model::category_key`].
///
/// # Errors
/// - `Error::Overflow` if a category's sum does not fit in a `Decimal`.
pub fn category_breakdown_expenses(transactions: &[Transaction]) -> Result<CategoryBreakdown> {
    let mut breakdown = CategoryBreakdown::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        let sum = breakdown.entry(t.category_key()).or_default();
        *sum = add(*sum, t.amount().value(), "category breakdown")?;
    }
    Ok(breakdown)
}

/// The `top_n` biggest categories, largest first. Equal amounts are ordered by category name.
pub fn top_categories(breakdown: &CategoryBreakdown, top_n: usize) -> Vec<(String, Decimal)> {
    // The map iterates in name order and the sort is stable, which gives the tie-break.
    let mut entries: Vec<(String, Decimal)> = breakdown
        .iter()
        .map(|(category, amount)| (category.clone(), *amount))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(top_n);
    entries
}

/// Total expense divided by the number of distinct days that have at least one expense, rounded
/// to two decimal places. Days without expenses do not lower the average.
///
/// # Errors
/// - `Error::Overflow` if the total expense does not fit in a `Decimal`.
pub fn average_daily_spend(transactions: &[Transaction]) -> Result<Decimal> {
    let mut days = HashSet::new();
    let mut total = Decimal::ZERO;
    for t in transactions.iter().filter(|t| t.is_expense()) {
        total = add(total, t.amount().value(), "average daily spend")?;
        days.insert(t.date());
    }
    if days.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let mut average = total
        .checked_div(Decimal::from(days.len()))
        .ok_or(Error::Overflow("average daily spend"))?
        .round_dp(2);
    average.rescale(2);
    Ok(average)
}

/// The expense with the greatest amount. The earliest one wins a tie.
pub fn largest_single_expense(transactions: &[Transaction]) -> Option<LargestExpense> {
    let mut largest: Option<&Transaction> = None;
    for t in transactions.iter().filter(|t| t.is_expense()) {
        match largest {
            Some(current) if t.amount() <= current.amount() => {}
            _ => largest = Some(t),
        }
    }
    largest.map(|t| LargestExpense {
        category: t.category().to_string(),
        amount: t.amount(),
        date: t.date().to_string(),
    })
}

/// Each category's share of the breakdown total as a percentage rounded to one decimal place.
/// The shares are rounded independently so they need not add up to exactly 100.
///
/// # Errors
/// - `Error::Overflow` if the total or a share does not fit in a `Decimal`. Mixed-sign amounts
///   that nearly cancel out can produce a share that is too large.
pub fn expense_percentage_by_category(
    breakdown: &CategoryBreakdown,
) -> Result<BTreeMap<String, Decimal>> {
    const WHAT: &str = "category percentages";
    let total = breakdown
        .values()
        .try_fold(Decimal::ZERO, |sum, amount| add(sum, *amount, WHAT))?;
    if total.is_zero() {
        return Ok(BTreeMap::new());
    }
    breakdown
        .iter()
        .map(|(category, amount)| {
            let mut share = amount
                .checked_div(total)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .ok_or(Error::Overflow(WHAT))?
                .round_dp(1);
            share.rescale(1);
            Ok((category.clone(), share))
        })
        .collect()
}

/// The category with the biggest percentage share.
///
/// `percentages` iterates in name order, so when two categories have the same share the one whose
/// name sorts first wins, not the one that was spent on first.
pub fn highest_share(percentages: &BTreeMap<String, Decimal>) -> Option<(String, Decimal)> {
    let mut highest: Option<(&String, &Decimal)> = None;
    for (category, share) in percentages {
        match highest {
            Some((_, current)) if share <= current => {}
            _ => highest = Some((category, share)),
        }
    }
    highest.map(|(category, share)| (category.clone(), *share))
}

fn add(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal> {
    a.checked_add(b).ok_or(Error::Overflow(what))
}

/// Everything shown for one month in the "Monthly report" view.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub period: Period,
    pub totals: Totals,
    pub breakdown: CategoryBreakdown,
    pub top_categories: Vec<(String, Decimal)>,
    pub average_daily_spend: Decimal,
    pub largest_expense: Option<LargestExpense>,
    pub percentages: BTreeMap<String, Decimal>,
    pub highest_share: Option<(String, Decimal)>,
    /// The transactions of the month, as they will be exported.
    #[serde(skip)]
    pub transactions: Vec<Transaction>,
}

impl MonthlyReport {
    /// Filters `transactions` down to `period` and computes every figure of the report.
    ///
    /// # Errors
    /// - `Error::Parse` for a stored date that cannot be parsed.
    /// - `Error::Overflow` if a sum does not fit in a `Decimal`.
    pub fn build(transactions: &[Transaction], period: Period) -> Result<Self> {
        let monthly = filter_by_month(transactions, period)?;
        let totals = calculate_totals(&monthly)?;
        let breakdown = category_breakdown_expenses(&monthly)?;
        let top_categories = top_categories(&breakdown, TOP_N);
        let percentages = expense_percentage_by_category(&breakdown)?;
        let highest_share = highest_share(&percentages);
        Ok(Self {
            period,
            totals,
            top_categories,
            average_daily_spend: average_daily_spend(&monthly)?,
            largest_expense: largest_single_expense(&monthly),
            breakdown,
            percentages,
            highest_share,
            transactions: monthly,
        })
    }

    /// The breakdown ordered largest first, ties by name.
    pub fn breakdown_by_amount(&self) -> Vec<(String, Decimal)> {
        top_categories(&self.breakdown, self.breakdown.len())
    }
}
