use crate::error::{Error, Result};
use crate::model::Amount;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// The format of the `date` column, e.g. `03/05/2024` for the 3rd of May 2024.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// The category key used for expenses that have a blank category.
pub const UNCATEGORISED: &str = "uncategorised";

/// The CSV header row shared by the data file and exported reports.
pub const HEADERS: [&str; 5] = [DATE_STR, AMOUNT_STR, TYPE_STR, CATEGORY_STR, NOTE_STR];

pub(crate) const DATE_STR: &str = "date";
pub(crate) const AMOUNT_STR: &str = "amount";
pub(crate) const TYPE_STR: &str = "type";
pub(crate) const CATEGORY_STR: &str = "category";
pub(crate) const NOTE_STR: &str = "note";

const INCOME_STR: &str = "income";
const EXPENSE_STR: &str = "expense";

/// Whether money came in or went out.
///
/// New transactions can only be `Income` or `Expense`. A data file that has been edited by hand
/// may contain anything in the `type` column, which is kept verbatim as `Other` so that the row
/// can still be loaded and written back. Reports ignore `Other` rows.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TransactionType {
    Income,
    Expense,
    Other(String),
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Income => INCOME_STR,
            TransactionType::Expense => EXPENSE_STR,
            TransactionType::Other(s) => s.as_str(),
        }
    }

    /// Parses user input. Input is trimmed and lowercased, and must then be `income` or
    /// `expense`.
    pub fn parse_input(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            INCOME_STR => Ok(TransactionType::Income),
            EXPENSE_STR => Ok(TransactionType::Expense),
            _ => Err(Error::validation("Type must be income or expense.")),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TransactionType {
    /// Stored values are matched exactly; anything else becomes `Other`.
    fn from(value: &str) -> Self {
        match value {
            INCOME_STR => TransactionType::Income,
            EXPENSE_STR => TransactionType::Expense,
            other => TransactionType::Other(other.to_string()),
        }
    }
}

impl Serialize for TransactionType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(TransactionType::from(s.as_str()))
    }
}

/// Represents a single row of the data file.
///
/// Text fields hold exactly what is stored. The `date` is only parsed when it is needed, see
/// [`Transaction::parsed_date`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    date: String,
    amount: Amount,
    #[serde(rename = "type")]
    kind: TransactionType,
    category: String,
    note: String,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        amount: Amount,
        kind: TransactionType,
        category: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            amount,
            kind,
            category: category.into(),
            note: note.into(),
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn kind(&self) -> &TransactionType {
        &self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Parses the stored `DD/MM/YYYY` date.
    pub fn parsed_date(&self) -> Result<NaiveDate> {
        parse_date(&self.date)
    }

    /// The key this transaction is grouped under in category reports.
    pub fn category_key(&self) -> String {
        category_key(&self.category)
    }
}

/// Parses a `DD/MM/YYYY` date. The day and month may have one or two digits, the year must have
/// exactly four.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    if !has_date_shape(s) {
        return Err(Error::parse("date", s));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| Error::parse("date", s))
}

// chrono's `%Y` also takes short years, a sign and leading spaces.
fn has_date_shape(s: &str) -> bool {
    let digits = |part: &str, len: RangeInclusive<usize>| {
        len.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    let mut parts = s.split('/');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(day), Some(month), Some(year), None) => {
            digits(day, 1..=2) && digits(month, 1..=2) && digits(year, 4..=4)
        }
        _ => false,
    }
}

/// Formats a date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Trims and lowercases a category. A blank category becomes `uncategorised`.
pub fn category_key(category: &str) -> String {
    let key = category.trim().to_lowercase();
    if key.is_empty() {
        UNCATEGORISED.to_string()
    } else {
        key
    }
}

/// A transaction as typed in by the user, before validation.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct NewTransaction {
    pub date: String,
    pub amount: String,
    pub kind: String,
    pub category: String,
    pub note: String,
}

impl NewTransaction {
    /// Validates the input and produces a `Transaction`. A blank date means `today`.
    ///
    /// # Errors
    /// - `Error::Validation` when the date, amount or type is unacceptable.
    pub fn validate(&self, today: NaiveDate) -> Result<Transaction> {
        let date = self.date.trim();
        let date = if date.is_empty() {
            format_date(today)
        } else {
            let parsed = parse_date(date).map_err(|_| {
                Error::validation(format!("Date must be in DD/MM/YYYY format, got '{date}'."))
            })?;
            // Store the canonical zero-padded form so that `1/5/2024` becomes `01/05/2024`.
            format_date(parsed)
        };

        let amount = Amount::from_str(&self.amount)
            .map_err(|_| Error::validation("Amount must be a number."))?;

        let kind = TransactionType::parse_input(&self.kind)?;

        Ok(Transaction::new(
            date,
            amount,
            kind,
            self.category.trim(),
            self.note.trim(),
        ))
    }
}

/// A calendar month.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// # Errors
    /// - `Error::Validation` if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::validation(format!(
                "Month must be between 1 and 12, got {month}."
            )));
        }
        Ok(Self { year, month })
    }

    /// Fills in whichever of `year` and `month` is missing from `today`.
    pub fn or_today(year: Option<i32>, month: Option<u32>, today: NaiveDate) -> Result<Self> {
        Self::new(
            year.unwrap_or_else(|| today.year()),
            month.unwrap_or_else(|| today.month()),
        )
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn input(date: &str, amount: &str, kind: &str) -> NewTransaction {
        NewTransaction {
            date: date.into(),
            amount: amount.into(),
            kind: kind.into(),
            category: "  Food ".into(),
            note: " lunch ".into(),
        }
    }

    #[test]
    fn test_validate_ok() {
        let t = input("02/05/2024", "40", "expense").validate(today()).unwrap();
        assert_eq!(t.date(), "02/05/2024");
        assert_eq!(t.amount().to_string(), "40");
        assert!(t.is_expense());
        assert_eq!(t.category(), "Food");
        assert_eq!(t.note(), "lunch");
    }

    #[test]
    fn test_validate_blank_date_is_today() {
        let t = input("  ", "1.5", "income").validate(today()).unwrap();
        assert_eq!(t.date(), "17/05/2024");
    }

    #[test]
    fn test_validate_pads_date() {
        let t = input("1/5/2024", "1", "income").validate(today()).unwrap();
        assert_eq!(t.date(), "01/05/2024");
    }

    #[test]
    fn test_validate_type_is_case_insensitive() {
        let t = input("", "3", " EXPENSE ").validate(today()).unwrap();
        assert_eq!(t.kind(), &TransactionType::Expense);
    }

    #[test]
    fn test_validate_bad_amount() {
        let e = input("", "abc", "expense").validate(today()).unwrap_err();
        assert!(e.is_validation());
        assert_eq!(e.to_string(), "Amount must be a number.");
    }

    #[test]
    fn test_validate_bad_type() {
        let e = input("", "3", "transfer").validate(today()).unwrap_err();
        assert!(e.is_validation());
        assert_eq!(e.to_string(), "Type must be income or expense.");
    }

    #[test]
    fn test_validate_bad_date() {
        let e = input("2024-05-01", "3", "income").validate(today()).unwrap_err();
        assert!(e.is_validation());
    }

    #[test]
    fn test_validate_rejects_short_or_signed_years() {
        for bad in ["1/5/24", "01/05/+2024", "01/05/20245", "01/-5/2024"] {
            let e = input(bad, "3", "income").validate(today()).unwrap_err();
            assert!(e.is_validation(), "{bad}: {e}");
        }
    }

    #[test]
    fn test_validate_trims_date() {
        let t = input(" 01/05/2024 ", "3", "income").validate(today()).unwrap();
        assert_eq!(t.date(), "01/05/2024");
    }

    #[test]
    fn test_parse_date_shape() {
        let may_first = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(parse_date("01/05/2024").unwrap(), may_first);
        assert_eq!(parse_date("1/5/2024").unwrap(), may_first);
        for bad in [
            "01/05/24",
            "01/05/0024x",
            "01/05/+2024",
            " 01/05/2024",
            "01/05/2024 ",
            "001/05/2024",
            "01/05",
            "01/05/2024/1",
            "31/02/2024",
            "",
        ] {
            assert!(parse_date(bad).unwrap_err().is_parse(), "{bad}");
        }
    }

    #[test]
    fn test_stored_type_is_case_sensitive() {
        assert_eq!(TransactionType::from("income"), TransactionType::Income);
        assert_eq!(
            TransactionType::from("Income"),
            TransactionType::Other("Income".into())
        );
    }

    #[test]
    fn test_category_key() {
        assert_eq!(category_key("  Food "), "food");
        assert_eq!(category_key("   "), UNCATEGORISED);
        assert_eq!(category_key(""), UNCATEGORISED);
    }

    #[test]
    fn test_parsed_date_error() {
        let t = Transaction::new(
            "2024/05/01",
            Amount::ZERO,
            TransactionType::Expense,
            "",
            "",
        );
        let e = t.parsed_date().unwrap_err();
        assert!(e.is_parse());
    }

    #[test]
    fn test_period() {
        let p = Period::new(2024, 5).unwrap();
        assert_eq!(p.to_string(), "2024-05");
        assert!(p.contains(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
        assert!(!p.contains(NaiveDate::from_ymd_opt(2023, 5, 31).unwrap()));
        assert!(Period::new(2024, 13).unwrap_err().is_validation());
        assert!(Period::new(2024, 0).is_err());
    }

    #[test]
    fn test_period_or_today() {
        let p = Period::or_today(None, Some(2), today()).unwrap();
        assert_eq!((p.year(), p.month()), (2024, 2));
        let p = Period::or_today(Some(2020), None, today()).unwrap();
        assert_eq!((p.year(), p.month()), (2020, 5));
    }
}
