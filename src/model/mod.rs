//! Types that represent the core data model, such as `Transaction` and `Amount`.
mod amount;
mod transaction;

pub use amount::{money, Amount};
pub use transaction::{
    category_key, format_date, parse_date, NewTransaction, Period, Transaction, TransactionType,
    DATE_FORMAT, HEADERS, UNCATEGORISED,
};
