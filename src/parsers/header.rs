//! Header-delimited export parser (desktop "save chat" text).
//!
//! Each day starts with a dashed banner and is followed by bracketed
//! message lines:
//!
//! ```text
//! --------------- 2025년 8월 14일 목요일 ---------------
//! [민지] [오전 9:05] hi
//! how are you
//! [지훈] [오전 9:06] 사진
//! ```
//!
//! Lines that are neither a banner nor a message are kept as continuation
//! lines of the current day (wrapped message bodies, inline notices).
//! Lines seen before the first banner, or after a banner naming an
//! impossible date, have no day to belong to and are dropped.
//!
//! A continuation line that would otherwise read as a banner or a message
//! line is written with a leading `\` (see [`escape_continuation`]); the
//! parser strips it again.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, trace};

use crate::Message;
use crate::config::ParserConfig;
use crate::core::store::{DailyChatStore, DayKey};
use crate::parser::{ExportFormat, Parser};
use crate::parsers::csv::is_csv_header;
use crate::parsing::trimmed_lines;

// --------------- 2025년 8월 14일 목요일 ---------------
static BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-+ (\d{4})년 (\d{1,2})월 (\d{1,2})일.*-+$").expect("banner regex")
});

// [민지] [오전 9:05] hi
static MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]+)\]\s*\[([^\]]+)\]\s*(.*)$").expect("message regex")
});

/// Returns `true` if `line` is a day banner.
pub fn is_banner(line: &str) -> bool {
    BANNER.is_match(line)
}

/// Extracts the date from a banner line.
///
/// Returns `None` if the line isn't a banner or names an impossible date.
pub fn banner_day(line: &str) -> Option<DayKey> {
    let caps = BANNER.captures(line)?;
    NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )
}

/// Returns `true` if `line` is a `[sender] [time] content` message line.
pub fn is_message_line(line: &str) -> bool {
    MESSAGE.is_match(line)
}

/// Marker in front of a continuation line that must not be read as structure.
pub const CONTINUATION_ESCAPE: char = '\\';

/// Renders continuation content so it reads back as a continuation.
///
/// Content that looks like a banner, a message line or a CSV header row
/// (which would flip format detection), or that already starts with the
/// escape marker, gets one [`CONTINUATION_ESCAPE`] in front.
///
/// ```rust
/// use talkpack::parsers::header::escape_continuation;
///
/// assert_eq!(escape_continuation("how are you"), "how are you");
/// assert_eq!(escape_continuation("[B] [오전 1:00] x"), "\\[B] [오전 1:00] x");
/// ```
pub fn escape_continuation(line: &str) -> Cow<'_, str> {
    if line.starts_with(CONTINUATION_ESCAPE)
        || is_banner(line)
        || is_message_line(line)
        || is_csv_header(line)
    {
        Cow::Owned(format!("{CONTINUATION_ESCAPE}{line}"))
    } else {
        Cow::Borrowed(line)
    }
}

fn unescape_continuation(line: &str) -> &str {
    line.strip_prefix(CONTINUATION_ESCAPE).unwrap_or(line)
}

/// Scan state threaded through the line fold.
#[derive(Default)]
struct Scan {
    cursor: Option<DayKey>,
    store: DailyChatStore,
    orphaned: usize,
}

/// Parser for header-delimited exports.
///
/// # Example
///
/// ```rust
/// use talkpack::parsers::HeaderParser;
///
/// let text = "--- 2025년 8월 14일 목요일 ---\n[민지] [오전 9:05] hi\nhow are you";
/// let store = HeaderParser::new().parse_str(text);
///
/// assert_eq!(store.day_count(), 1);
/// assert_eq!(store.message_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeaderParser {
    config: ParserConfig,
}

impl HeaderParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a whole export into a store.
    pub fn parse_str(&self, text: &str) -> DailyChatStore {
        let scan = trimmed_lines(text).fold(Scan::default(), |scan, line| self.step(scan, line));

        debug!(
            days = scan.store.day_count(),
            messages = scan.store.message_count(),
            orphaned = scan.orphaned,
            "parsed header-delimited export"
        );
        scan.store
    }

    fn step(&self, mut scan: Scan, line: &str) -> Scan {
        if is_banner(line) {
            scan.cursor = banner_day(line);
            if scan.cursor.is_none() {
                trace!(line, "banner with impossible date, dropping its lines");
            }
            return scan;
        }

        let Some(day) = scan.cursor else {
            if !line.is_empty() {
                trace!(line, "dropping line outside any day");
                scan.orphaned += 1;
            }
            return scan;
        };

        if let Some(caps) = MESSAGE.captures(line) {
            scan.store.push(day, Message::new(&caps[1], &caps[2], &caps[3]));
        } else if !line.is_empty() && !self.config.is_skipped(line) {
            scan.store.push(day, Message::continuation(unescape_continuation(line)));
        }
        scan
    }
}

impl Parser for HeaderParser {
    fn name(&self) -> &'static str {
        "Header-delimited"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::HeaderDelimited
    }

    fn parse_str(&self, content: &str) -> DailyChatStore {
        HeaderParser::parse_str(self, content)
    }
}
