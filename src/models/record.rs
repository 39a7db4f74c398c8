use serde::{Deserialize, Serialize};

/// A stored care record — a named item filed under a category (for
/// medications, the cabinet section it lives in).
///
/// Owned by the record store; the pipeline reads and requests mutations
/// but never caches one across commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identifier; 0 until inserted.
    pub id: i64,
    pub name: String,
    pub category: String,
}

impl Record {
    /// New record awaiting insertion.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            category: category.into(),
        }
    }
}
