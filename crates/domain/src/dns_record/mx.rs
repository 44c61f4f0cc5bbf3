use serde::{Deserialize, Serialize};
use std::fmt;

/// Mail exchange entry; lower preference means higher priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxRecord {
    pub preference: u16,

    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }

    /// Stable sort by preference, keeping discovery order among equal preferences.
    pub fn sort_by_preference(records: &mut [MxRecord]) {
        records.sort_by_key(|record| record.preference);
    }
}

impl fmt::Display for MxRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}
