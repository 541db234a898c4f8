use chrono::NaiveDate;
use csv::StringRecord;
use ynabify_core::{Lenient, Money, YnabRecord};

use crate::amount::invert_amount;
use crate::columns::{ColumnIndex, LogicalField};
use crate::date::normalize_date;
use crate::memo::MemoParts;

/// A converted row that still remembers which fields were passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedRow {
    pub date: Lenient<NaiveDate>,
    pub payee: String,
    pub memo: String,
    pub amount: Lenient<Money>,
}

impl TransformedRow {
    pub fn into_record(self) -> YnabRecord {
        YnabRecord {
            date: self.date.into_text(),
            payee: self.payee,
            memo: self.memo,
            amount: self.amount.into_text(),
        }
    }
}

pub fn transform_row(row: &StringRecord, idx: &ColumnIndex) -> TransformedRow {
    let cell = |field| idx.cell(row, field);

    let memo = MemoParts {
        memo: cell(LogicalField::Memo),
        reference: cell(LogicalField::Reference),
        location: cell(LogicalField::Location),
        postcode: cell(LogicalField::Postcode),
        country: cell(LogicalField::Country),
    }
    .compose();

    TransformedRow {
        date: normalize_date(cell(LogicalField::Date)),
        payee: cell(LogicalField::Payee).to_string(),
        memo,
        amount: invert_amount(cell(LogicalField::Amount)),
    }
}

/// Converts one source row into a YNAB record.
pub fn transform(row: &StringRecord, idx: &ColumnIndex) -> YnabRecord {
    transform_row(row, idx).into_record()
}
