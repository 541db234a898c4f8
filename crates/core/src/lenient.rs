use std::fmt;

/// Outcome of a field normalizer that never fails the row.
///
/// `Parsed` holds the normalized value; `PassedThrough` keeps the original cell
/// text verbatim so it can be corrected by hand after import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lenient<T> {
    Parsed(T),
    PassedThrough(String),
}

impl<T> Lenient<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Lenient::Parsed(_))
    }

    pub fn parsed(&self) -> Option<&T> {
        match self {
            Lenient::Parsed(v) => Some(v),
            Lenient::PassedThrough(_) => None,
        }
    }
}

impl<T: fmt::Display> Lenient<T> {
    /// The text written to the output cell.
    pub fn into_text(self) -> String {
        match self {
            Lenient::Parsed(v) => v.to_string(),
            Lenient::PassedThrough(raw) => raw,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Lenient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lenient::Parsed(v) => write!(f, "{v}"),
            Lenient::PassedThrough(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_renders_value() {
        let v: Lenient<u32> = Lenient::Parsed(42);
        assert!(v.is_parsed());
        assert_eq!(v.parsed(), Some(&42));
        assert_eq!(v.into_text(), "42");
    }

    #[test]
    fn passed_through_keeps_raw_text() {
        let v: Lenient<u32> = Lenient::PassedThrough(" N/A ".to_string());
        assert!(!v.is_parsed());
        assert_eq!(v.parsed(), None);
        assert_eq!(v.to_string(), " N/A ");
        assert_eq!(v.into_text(), " N/A ");
    }

}
