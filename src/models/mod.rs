mod category;
mod field;
mod transaction;

pub(crate) use category::Category;
pub(crate) use field::Field;
pub(crate) use transaction::{parse_amount, parse_date, Transaction};
