use serde::{Deserialize, Serialize};

/// One audit entry as seen in the portal log table.
///
/// `label` is the action cell ("add session", "deleted session", ...),
/// `detail` the free-text description with the embedded timestamp and room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLogRow {
    pub label: String,
    pub detail: String,
}

impl RawLogRow {
    pub fn new(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
        }
    }
}
