//! Serializable snapshot of a parsed conversation.

use serde::{Deserialize, Serialize};

use crate::core::store::{DailyChatStore, DayKey};
use crate::parser::ExportFormat;

/// A parsed conversation with its summary fields.
///
/// This is the shape stored after a first parse so later requests can
/// re-window the same conversation without re-reading the raw export.
///
/// # Format
///
/// ```json
/// {
///   "format": "header",
///   "participants": ["민지", "지훈"],
///   "daily_chats": {
///     "2025-08-14": [{"sender": "민지", "time_label": "오전 9:05", "content": "hi"}]
///   },
///   "start_date": "2025-08-14",
///   "end_date": "2025-08-14",
///   "total_messages": 1,
///   "total_days": 1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueDocument {
    /// Format the conversation was parsed from
    pub format: ExportFormat,
    /// Sorted unique sender names
    pub participants: Vec<String>,
    /// Messages grouped by day
    pub daily_chats: DailyChatStore,
    /// Earliest day present
    pub start_date: Option<DayKey>,
    /// Latest day present
    pub end_date: Option<DayKey>,
    /// Messages across all days
    pub total_messages: usize,
    /// Number of days
    pub total_days: usize,
}

impl DialogueDocument {
    /// Builds a document from a store, deriving the summary fields.
    pub fn from_store(format: ExportFormat, store: &DailyChatStore) -> Self {
        Self {
            format,
            participants: store.participants(),
            daily_chats: store.clone(),
            start_date: store.first_day(),
            end_date: store.last_day(),
            total_messages: store.message_count(),
            total_days: store.day_count(),
        }
    }

    /// Returns the messages, dropping the summary fields.
    pub fn into_store(self) -> DailyChatStore {
        self.daily_chats
    }
}
