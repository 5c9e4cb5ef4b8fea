//! Inline-timestamp export parsers (mobile "export chat" text).
//!
//! Every message line carries its own full date and time, so there are no
//! banners and no continuation lines. Two date styles exist:
//!
//! - Long date: `2025년 10월 10일 오전 10:09, 이재균 : ㅎㅇ`
//! - Dot date: `2025. 10. 23. 오전 11:44, 안도현 : 동방에 다 있을걸`
//!
//! Lines that don't match the full pattern (headers, date lines, wrapped
//! text) are skipped.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::Message;
use crate::config::ParserConfig;
use crate::core::store::{DailyChatStore, DayKey};
use crate::parser::{ExportFormat, Parser};
use crate::parsing::{Meridiem, clock_time, time_label, trimmed_lines};

// 2025년 10월 10일 오전 10:09, 이재균 : ㅎㅇ
static LONG_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})년 (\d{1,2})월 (\d{1,2})일 (오전|오후|[AaPp][Mm]) (\d{1,2}):(\d{2}),\s*([^:]+)\s*:\s*(.*)$",
    )
    .expect("long-date regex")
});

// 2025. 10. 23. 오전 11:44, 안도현 : 동방에 다 있을걸
static DOT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})\. (\d{1,2})\. (\d{1,2})\. (오전|오후|[AaPp][Mm]) (\d{1,2}):(\d{2}),\s*([^:]+)\s*:\s*(.*)$",
    )
    .expect("dot-date regex")
});

/// Date style of an inline-timestamp export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineStyle {
    /// `2025년 10월 10일 오전 10:09, sender : content`
    LongDate,
    /// `2025. 10. 23. 오전 11:44, sender : content`
    DotDate,
}

impl InlineStyle {
    fn regex(self) -> &'static Regex {
        match self {
            InlineStyle::LongDate => &LONG_DATE,
            InlineStyle::DotDate => &DOT_DATE,
        }
    }

    /// Returns `true` if `line` is a complete message in this style.
    pub fn matches(self, line: &str) -> bool {
        self.regex().is_match(line)
    }

    /// Parses one line into its day and message.
    ///
    /// Returns `None` for lines that don't match, name an impossible date
    /// or time, or have an empty sender.
    pub fn parse_line(self, line: &str) -> Option<(DayKey, Message)> {
        let caps = self.regex().captures(line)?;
        let day = NaiveDate::from_ymd_opt(num(&caps, 1)?, num(&caps, 2)?, num(&caps, 3)?)?;
        let meridiem = Meridiem::parse(&caps[4])?;
        let time = clock_time(meridiem, num(&caps, 5)?, num(&caps, 6)?)?;

        let sender = caps[7].trim();
        if sender.is_empty() {
            return None;
        }
        Some((day, Message::new(sender, time_label(time), &caps[8])))
    }
}

fn num<T: std::str::FromStr>(caps: &Captures<'_>, group: usize) -> Option<T> {
    caps.get(group)?.as_str().parse().ok()
}

/// Parser for inline-timestamp exports.
///
/// # Example
///
/// ```rust
/// use talkpack::parsers::{InlineParser, InlineStyle};
///
/// let text = "2025년 10월 10일 오후 3:07, 이재균 : ㅎㅇ";
/// let store = InlineParser::new(InlineStyle::LongDate).parse_str(text);
///
/// let msg = store.messages().next().unwrap();
/// assert_eq!(msg.time_label(), Some("오후 3:07"));
/// ```
#[derive(Debug, Clone)]
pub struct InlineParser {
    style: InlineStyle,
    config: ParserConfig,
}

impl InlineParser {
    /// Creates a parser for `style` with default configuration.
    pub fn new(style: InlineStyle) -> Self {
        Self::with_config(style, ParserConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(style: InlineStyle, config: ParserConfig) -> Self {
        Self { style, config }
    }

    /// Returns the date style this parser reads.
    pub fn style(&self) -> InlineStyle {
        self.style
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a whole export into a store.
    pub fn parse_str(&self, text: &str) -> DailyChatStore {
        let mut store = DailyChatStore::new();
        let mut skipped = 0usize;

        for line in trimmed_lines(text).filter(|l| !l.is_empty()) {
            match self.style.parse_line(line) {
                Some((day, msg)) => store.push(day, msg),
                None => {
                    trace!(line, "skipping non-message line");
                    skipped += 1;
                }
            }
        }

        debug!(
            style = ?self.style,
            days = store.day_count(),
            messages = store.message_count(),
            skipped,
            "parsed inline-timestamp export"
        );
        store
    }
}

impl Parser for InlineParser {
    fn name(&self) -> &'static str {
        match self.style {
            InlineStyle::LongDate => "Inline (long date)",
            InlineStyle::DotDate => "Inline (dot date)",
        }
    }

    fn format(&self) -> ExportFormat {
        match self.style {
            InlineStyle::LongDate => ExportFormat::InlineLongDate,
            InlineStyle::DotDate => ExportFormat::InlineDotDate,
        }
    }

    fn parse_str(&self, content: &str) -> DailyChatStore {
        InlineParser::parse_str(self, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> DayKey {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_long_date_line() {
        let (d, msg) = InlineStyle::LongDate
            .parse_line("2025년 10월 10일 오전 10:09, 이재균 : ㅎㅇ")
            .unwrap();
        assert_eq!(d, day(2025, 10, 10));
        assert_eq!(msg.sender(), Some("이재균"));
        assert_eq!(msg.time_label(), Some("오전 10:09"));
        assert_eq!(msg.content(), "ㅎㅇ");
    }

    #[test]
    fn test_dot_date_line() {
        let (d, msg) = InlineStyle::DotDate
            .parse_line("2025. 10. 23. 오후 12:44, 안도현 : 동방에 다 있을걸")
            .unwrap();
        assert_eq!(d, day(2025, 10, 23));
        assert_eq!(msg.sender(), Some("안도현"));
        assert_eq!(msg.time_label(), Some("오후 12:44"));
    }

    #[test]
    fn test_label_is_regenerated() {
        // Midnight printed as "오전 0:05" normalizes to the 12-hour form.
        let (_, msg) = InlineStyle::LongDate
            .parse_line("2025년 1월 1일 오전 0:05, A : x")
            .unwrap();
        assert_eq!(msg.time_label(), Some("오전 12:05"));

        let (_, msg) = InlineStyle::DotDate
            .parse_line("2025. 1. 1. PM 03:05, A : x")
            .unwrap();
        assert_eq!(msg.time_label(), Some("오후 3:05"));
    }

    #[test]
    fn test_content_may_contain_colons() {
        let (_, msg) = InlineStyle::LongDate
            .parse_line("2025년 1월 1일 오후 1:00, A : time is 10:30 : ok")
            .unwrap();
        assert_eq!(msg.content(), "time is 10:30 : ok");
    }

    #[test]
    fn test_styles_do_not_cross_match() {
        assert!(!InlineStyle::DotDate.matches("2025년 10월 10일 오전 10:09, 이재균 : ㅎㅇ"));
        assert!(!InlineStyle::LongDate.matches("2025. 10. 23. 오전 11:44, 안도현 : hi"));
    }

    #[test]
    fn test_impossible_values_rejected() {
        assert!(InlineStyle::LongDate.parse_line("2025년 2월 30일 오전 1:00, A : x").is_none());
        assert!(InlineStyle::LongDate.parse_line("2025년 2월 3일 오후 13:00, A : x").is_none());
        assert!(InlineStyle::LongDate.parse_line("2025년 2월 3일 오전 1:00,   : x").is_none());
    }

    #[test]
    fn test_parse_str_skips_noise_and_buckets_by_line_date() {
        let text = "\u{feff}Talk_2025.10.11 저장\n저장한 날짜 : 2025-10-11\n\n\
                    2025년 10월 10일 오전 10:09, A : one\n\
                    wrapped body line\n\
                    2025년 10월 11일 오후 11:59, B : two";
        let store = InlineParser::new(InlineStyle::LongDate).parse_str(text);
        assert_eq!(store.day_count(), 2);
        assert_eq!(store.message_count(), 2);
        assert_eq!(store.messages_on(day(2025, 10, 11))[0].content(), "two");
    }
}
