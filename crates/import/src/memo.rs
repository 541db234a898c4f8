const MEMO_SEPARATOR: &str = " | ";
const LOCATION_SEPARATOR: &str = ", ";

/// Optional source cells that feed the YNAB memo. Empty means "not present".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoParts<'a> {
    pub memo: &'a str,
    pub reference: &'a str,
    pub location: &'a str,
    pub postcode: &'a str,
    pub country: &'a str,
}

impl MemoParts<'_> {
    /// `location, postcode, country`, skipping empty parts.
    pub fn location_line(&self) -> String {
        join_non_empty([self.location, self.postcode, self.country], LOCATION_SEPARATOR)
    }

    /// `memo | Ref: reference | Location: location line`, skipping empty parts.
    pub fn compose(&self) -> String {
        let reference = prefixed("Ref: ", self.reference);
        let location = prefixed("Location: ", &self.location_line());
        join_non_empty([self.memo, reference.as_str(), location.as_str()], MEMO_SEPARATOR)
    }
}

fn prefixed(label: &str, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{label}{value}")
    }
}

fn join_non_empty<'a>(parts: impl IntoIterator<Item = &'a str>, sep: &str) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
