use chrono::Utc;
use std::fmt;

/// Correlation reference attached to a provider order: `<prefix>-<unix millis>`.
///
/// Two attempts in the same millisecond share a receipt, so this is never
/// used for deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt(String);

impl Receipt {
    pub fn new(prefix: &str, timestamp_millis: i64) -> Self {
        Self(format!("{}-{}", prefix, timestamp_millis))
    }

    pub fn now(prefix: &str) -> Self {
        Self::new(prefix, Utc::now().timestamp_millis())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Receipt> for String {
    fn from(receipt: Receipt) -> Self {
        receipt.0
    }
}
