use std::fmt;

/// A semantic source column, independent of the header text a bank uses for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalField {
    Date,
    Payee,
    Amount,
    Memo,
    Reference,
    Location,
    Postcode,
    Country,
}

const FIELD_COUNT: usize = 8;

impl LogicalField {
    pub const ALL: [LogicalField; FIELD_COUNT] = [
        LogicalField::Date,
        LogicalField::Payee,
        LogicalField::Amount,
        LogicalField::Memo,
        LogicalField::Reference,
        LogicalField::Location,
        LogicalField::Postcode,
        LogicalField::Country,
    ];

    /// Without these a row cannot become a YNAB record.
    pub fn is_required(self) -> bool {
        matches!(self, LogicalField::Date | LogicalField::Payee | LogicalField::Amount)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogicalField::Date => "date",
            LogicalField::Payee => "payee",
            LogicalField::Amount => "amount",
            LogicalField::Memo => "memo",
            LogicalField::Reference => "reference",
            LogicalField::Location => "location",
            LogicalField::Postcode => "postcode",
            LogicalField::Country => "country",
        };
        f.write_str(name)
    }
}

/// Accepted header text per logical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    synonyms: Vec<(LogicalField, Vec<String>)>,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self { synonyms: Vec::new() }
    }

    /// Adds accepted header names for `field`, appending to any already present.
    pub fn with<I, S>(mut self, field: LogicalField, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into);
        match self.synonyms.iter().position(|(f, _)| *f == field) {
            Some(i) => self.synonyms[i].1.extend(names),
            None => self.synonyms.push((field, names.collect())),
        }
        self
    }

    /// Column names of the Dutch bank export this tool was written for.
    pub fn dutch_bank() -> Self {
        Self::new()
            .with(LogicalField::Date, ["Datum"])
            .with(LogicalField::Payee, ["Omschrijving"])
            .with(LogicalField::Amount, ["Bedrag"])
            .with(LogicalField::Memo, ["Aanvullende informatie"])
            .with(LogicalField::Reference, ["Referentie"])
            .with(LogicalField::Location, ["Plaats"])
            .with(LogicalField::Postcode, ["Postcode"])
            .with(LogicalField::Country, ["Land"])
    }

    pub fn synonyms(&self, field: LogicalField) -> &[String] {
        self.synonyms
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, names)| names.as_slice())
            .unwrap_or_default()
    }
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self::dutch_bank()
    }
}

/// Resolved header position per logical field. `None` means the column is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnIndex {
    positions: [Option<usize>; FIELD_COUNT],
}

impl ColumnIndex {
    pub fn get(&self, field: LogicalField) -> Option<usize> {
        self.positions[field.slot()]
    }

    /// Required fields that did not resolve, in declaration order.
    pub fn missing_required(&self) -> Vec<LogicalField> {
        LogicalField::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.get(*f).is_none())
            .collect()
    }

    /// Cell for `field` in `row`. Absent columns and short rows read as empty.
    pub fn cell<'r>(&self, row: &'r csv::StringRecord, field: LogicalField) -> &'r str {
        self.get(field)
            .and_then(|i| row.get(i))
            .unwrap_or_default()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Maps each logical field to the first header cell matching one of its
/// synonyms, comparing trimmed lowercase text for exact equality.
pub fn resolve<'h, H>(header: H, spec: &ColumnSpec) -> ColumnIndex
where
    H: IntoIterator<Item = &'h str>,
{
    let header: Vec<String> = header.into_iter().map(normalize).collect();
    let mut index = ColumnIndex::default();

    for field in LogicalField::ALL {
        let names: Vec<String> = spec.synonyms(field).iter().map(|s| normalize(s)).collect();
        index.positions[field.slot()] = header.iter().position(|h| names.contains(h));
    }

    index
}
