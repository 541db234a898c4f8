pub mod amount;
pub mod columns;
pub mod date;
pub mod driver;
pub mod memo;
pub mod transform;

pub use columns::{resolve, ColumnIndex, ColumnSpec, LogicalField};
pub use date::DateLayout;
pub use driver::{convert, ConvertError, ConvertOptions, ConvertSummary};
pub use memo::MemoParts;
pub use transform::{transform, transform_row, TransformedRow};

pub mod import {
    use crate::*;

    /// Converts an export that uses the Dutch bank's column names.
    pub fn convert_dutch_export<R: std::io::Read, W: std::io::Write>(
        input: R,
        output: W,
        options: &ConvertOptions,
    ) -> Result<ConvertSummary, ConvertError> {
        convert(input, output, &ColumnSpec::dutch_bank(), options)
    }
}
