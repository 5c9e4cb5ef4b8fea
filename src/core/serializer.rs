//! Render a store back to normalized text.
//!
//! The normalized form is the same whatever the source export looked like:
//!
//! ```text
//! --- 2025년 08월 14일 ---
//! [민지] [오전 9:05] hi
//! how are you
//! ```
//!
//! It is itself a header-delimited export, so it can be fed back through
//! [`HeaderParser`](crate::parsers::HeaderParser) and reproduces the same
//! store for content without line breaks.

use chrono::Datelike;

use crate::Message;
use crate::core::store::{DailyChatStore, DayKey};
use crate::parsers::header::escape_continuation;

/// Renders the banner line for `day`.
pub fn day_banner(day: DayKey) -> String {
    format!("--- {}년 {:02}월 {:02}일 ---", day.year(), day.month(), day.day())
}

/// Renders one message line.
///
/// Primary messages become `[sender] [time] content`; continuation lines
/// are emitted as bare content, escaped where they would read back as a
/// banner or a message. Content holding line breaks is rendered as the
/// message line followed by one continuation line per non-empty line.
pub fn message_line(msg: &Message) -> String {
    let mut lines = msg.content().lines().map(str::trim);
    let first = lines.next().unwrap_or_default();

    let mut out = match (msg.sender(), msg.time_label()) {
        (Some(sender), Some(time)) => format!("[{sender}] [{time}] {first}"),
        (Some(sender), None) => format!("[{sender}] {first}"),
        _ => escape_continuation(first).into_owned(),
    };
    for line in lines.filter(|line| !line.is_empty()) {
        out.push('\n');
        out.push_str(&escape_continuation(line));
    }
    out
}

/// Serializes a store to normalized text, one banner per day.
///
/// Lines are joined with `\n` and there is no trailing newline. An empty
/// store serializes to an empty string.
///
/// ```
/// use chrono::NaiveDate;
/// use talkpack::Message;
/// use talkpack::core::{DailyChatStore, serialize};
///
/// let mut store = DailyChatStore::new();
/// let day = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
/// store.push(day, Message::new("Minji", "오전 9:05", "hi"));
/// store.push(day, Message::continuation("how are you"));
///
/// assert_eq!(
///     serialize(&store),
///     "--- 2025년 08월 14일 ---\n[Minji] [오전 9:05] hi\nhow are you"
/// );
/// ```
pub fn serialize(store: &DailyChatStore) -> String {
    let mut out = String::new();
    for (day, messages) in store.iter() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&day_banner(day));
        for msg in messages {
            out.push('\n');
            out.push_str(&message_line(msg));
        }
    }
    out
}

/// Returns the last `max_chars` characters of `text`.
///
/// Counts Unicode scalar values, so multi-byte text is never split inside
/// a character. Text already within the budget is returned unchanged.
///
/// ```
/// use talkpack::core::truncate_to_last_chars;
///
/// assert_eq!(truncate_to_last_chars("안녕하세요", 2), "세요");
/// assert_eq!(truncate_to_last_chars("short", 100), "short");
/// ```
pub fn truncate_to_last_chars(text: &str, max_chars: usize) -> &str {
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }
    let start = text
        .char_indices()
        .nth(total - max_chars)
        .map_or(text.len(), |(i, _)| i);
    &text[start..]
}
