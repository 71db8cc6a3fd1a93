use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogMessage {
    pub time: NaiveDateTime,
    pub text: String,
}

/// The single well-known log document. Messages are newest-first; a document
/// written before any message was appended carries no list at all, so the
/// field defaults to empty on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogBook {
    pub id: String,
    #[serde(default, rename = "logs")]
    pub messages: Vec<LogMessage>,
}

impl LogBook {
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            messages: Vec::new(),
        }
    }
}
