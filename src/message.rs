//! Canonical message type shared by every export format.
//!
//! All tokenizers convert their native line or row shape into [`Message`],
//! so the store, filters and serializer never need to know which export a
//! message came from.
//!
//! # Primary and continuation messages
//!
//! - A **primary** message carries a sender and a display time label.
//! - A **continuation** message has neither. It holds a wrapped line of a
//!   multi-line body, or an inline system notice, and belongs to the same
//!   day bucket as the message before it.
//!
//! ```
//! use talkpack::Message;
//!
//! let primary = Message::new("민지", "오전 9:05", "hi");
//! let cont = Message::continuation("how are you");
//!
//! assert_eq!(primary.sender(), Some("민지"));
//! assert!(cont.is_continuation());
//! ```

use serde::{Deserialize, Serialize};

/// A single chat line in canonical form.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `sender` | `Option<String>` | Display name, `None` for continuation lines |
/// | `time_label` | `Option<String>` | `"오전 9:05"`-style label, `None` for continuation lines |
/// | `content` | `String` | Message text |
///
/// All three fields are trimmed of surrounding whitespace on construction
/// and never changed afterwards.
///
/// # Serialization
///
/// `None` fields are omitted from JSON.
///
/// ```
/// use talkpack::Message;
///
/// let json = serde_json::to_string(&Message::continuation("사진"))?;
/// assert_eq!(json, r#"{"content":"사진"}"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the author.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sender: Option<String>,

    /// Time of day as shown to the reader, e.g. `"오후 3:07"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub time_label: Option<String>,

    /// Text content of the message.
    pub content: String,
}

impl Message {
    /// Creates a primary message with sender and time label.
    pub fn new(
        sender: impl Into<String>,
        time_label: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            sender: Some(trimmed(sender.into())),
            time_label: Some(trimmed(time_label.into())),
            content: trimmed(content.into()),
        }
    }

    /// Creates a continuation line with no sender or time label.
    pub fn continuation(content: impl Into<String>) -> Self {
        Self {
            sender: None,
            time_label: None,
            content: trimmed(content.into()),
        }
    }

    /// Returns the sender name, if any.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Returns the display time label, if any.
    pub fn time_label(&self) -> Option<&str> {
        self.time_label.as_deref()
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` for lines without a sender.
    pub fn is_continuation(&self) -> bool {
        self.sender.is_none()
    }

    /// Returns `true` if the sender name contains `name_part` (case-sensitive).
    ///
    /// Continuation lines never match.
    pub fn sent_by(&self, name_part: &str) -> bool {
        self.sender.as_deref().is_some_and(|s| s.contains(name_part))
    }

    /// Returns a copy of this message with its content replaced.
    #[must_use]
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            sender: self.sender.clone(),
            time_label: self.time_label.clone(),
            content: content.into(),
        }
    }
}

fn trimmed(s: String) -> String {
    let t = s.trim();
    if t.len() == s.len() { s } else { t.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_fields() {
        let msg = Message::new("  민지 ", " 오전 9:05", "  hi  ");
        assert_eq!(msg.sender(), Some("민지"));
        assert_eq!(msg.time_label(), Some("오전 9:05"));
        assert_eq!(msg.content(), "hi");
        assert!(!msg.is_continuation());
    }

    #[test]
    fn test_continuation_has_no_sender() {
        let msg = Message::continuation("  how are you ");
        assert!(msg.is_continuation());
        assert!(msg.time_label().is_none());
        assert_eq!(msg.content(), "how are you");
    }

    #[test]
    fn test_sent_by_is_case_sensitive_substring() {
        let msg = Message::new("Kim Minji", "오전 9:05", "hi");
        assert!(msg.sent_by("Minji"));
        assert!(msg.sent_by("Kim"));
        assert!(!msg.sent_by("minji"));
        assert!(!Message::continuation("Minji").sent_by("Minji"));
    }

    #[test]
    fn test_with_content_keeps_metadata() {
        let msg = Message::new("A", "오후 1:00", "secret");
        let masked = msg.with_content("****");
        assert_eq!(masked.sender(), Some("A"));
        assert_eq!(masked.time_label(), Some("오후 1:00"));
        assert_eq!(masked.content(), "****");
    }

    #[test]
    fn test_serialization_skips_none() {
        let json = serde_json::to_string(&Message::new("A", "오전 1:00", "x")).unwrap();
        assert!(json.contains("\"sender\":\"A\""));
        let json = serde_json::to_string(&Message::continuation("x")).unwrap();
        assert!(!json.contains("sender"));
        assert!(!json.contains("time_label"));
    }

    #[test]
    fn test_deserialization_defaults() {
        let msg: Message = serde_json::from_str(r#"{"content":"사진"}"#).unwrap();
        assert!(msg.is_continuation());
        assert_eq!(msg.content(), "사진");
    }
}
