use serde::Serialize;

/// One row of the YNAB import format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YnabRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Payee")]
    pub payee: String,
    #[serde(rename = "Memo")]
    pub memo: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}

impl YnabRecord {
    /// Column header YNAB expects, in output order.
    pub const HEADER: [&'static str; 4] = ["Date", "Payee", "Memo", "Amount"];
}

