use std::io::{Read, Write};

use csv::StringRecord;
use thiserror::Error;
use tracing::{debug, info, warn};
use ynabify_core::YnabRecord;

use crate::columns::{resolve, ColumnIndex, ColumnSpec, LogicalField};
use crate::transform::transform_row;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("input has no header row")]
    EmptyInput,
    #[error("failed to read header")]
    ReadHeader(#[source] csv::Error),
    #[error("required columns not found in the CSV file: {}", join_fields(.0))]
    MissingColumns(Vec<LogicalField>),
    #[error("failed to write header")]
    WriteHeader(#[source] csv::Error),
    #[error("failed to read row {row}")]
    ReadRow { row: usize, source: csv::Error },
    #[error("failed to write row {row}")]
    WriteRow { row: usize, source: csv::Error },
    #[error("failed to flush output")]
    Flush(#[source] std::io::Error),
}

fn join_fields(fields: &[LogicalField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Field delimiter of the input file. Output is always comma-separated.
    pub delimiter: u8,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// What a finished run did. Row counts exclude the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub rows: usize,
    pub dates_passed_through: usize,
    pub amounts_passed_through: usize,
}

/// Reads a bank export from `input` and writes YNAB CSV to `output`.
///
/// The header is read and resolved first; if a required column is missing the
/// run fails before anything is written. Rows are then converted one at a
/// time. A read or write error stops the run, but rows already written stay
/// in `output` (the CSV writer flushes its buffer when dropped).
pub fn convert<R: Read, W: Write>(
    input: R,
    output: W,
    spec: &ColumnSpec,
    options: &ConvertOptions,
) -> Result<ConvertSummary, ConvertError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(options.delimiter)
        .from_reader(input);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    // HeaderPending
    let idx = read_header(&mut reader, spec)?;
    writer
        .write_record(YnabRecord::HEADER)
        .map_err(ConvertError::WriteHeader)?;

    // RowProcessing
    let mut summary = ConvertSummary::default();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|source| ConvertError::ReadRow { row, source })?;
        let converted = transform_row(&record, &idx);

        if !converted.date.is_parsed() {
            summary.dates_passed_through += 1;
            warn!(row, value = %converted.date, "unrecognised date, kept as-is");
        }
        if !converted.amount.is_parsed() {
            summary.amounts_passed_through += 1;
            warn!(row, value = %converted.amount, "unparseable amount, kept as-is");
        }

        writer
            .serialize(converted.into_record())
            .map_err(|source| ConvertError::WriteRow { row, source })?;
        summary.rows = row;
    }

    writer.flush().map_err(ConvertError::Flush)?;
    info!(
        rows = summary.rows,
        dates_passed_through = summary.dates_passed_through,
        amounts_passed_through = summary.amounts_passed_through,
        "conversion finished"
    );
    Ok(summary)
}

fn read_header<R: Read>(
    reader: &mut csv::Reader<R>,
    spec: &ColumnSpec,
) -> Result<ColumnIndex, ConvertError> {
    let mut header = StringRecord::new();
    if !reader
        .read_record(&mut header)
        .map_err(ConvertError::ReadHeader)?
    {
        return Err(ConvertError::EmptyInput);
    }

    let idx = resolve(header.iter(), spec);
    for field in LogicalField::ALL {
        match idx.get(field) {
            Some(pos) => debug!(%field, column = pos, header = &header[pos], "resolved column"),
            None => debug!(%field, "column not present"),
        }
    }

    let missing = idx.missing_required();
    if !missing.is_empty() {
        return Err(ConvertError::MissingColumns(missing));
    }
    Ok(idx)
}
