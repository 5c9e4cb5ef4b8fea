//! CSV export parser (desktop macOS export).
//!
//! ```text
//! Date,User,Message
//! 2025-10-10 10:09:20,"이재균","ㅎㅇ"
//! ```
//!
//! Rows are read with the `csv` crate, so quoted fields may contain commas
//! and newlines. A body spanning several lines becomes one message for its
//! first line and a continuation for each later non-empty line, the same
//! shape a header-delimited export gives a wrapped message. Rows may arrive
//! in any order; each is bucketed by its own date. A row with a missing
//! field or an unparseable date is skipped without affecting the rest of
//! the file.

use chrono::NaiveDateTime;
use csv::StringRecord;
use tracing::{debug, trace};

use crate::Message;
use crate::config::ParserConfig;
use crate::core::store::{DailyChatStore, DayKey};
use crate::parser::{ExportFormat, Parser};
use crate::parsing::{strip_bom, time_label};

/// Header row of a CSV export.
pub const CSV_HEADER: &str = "Date,User,Message";

/// Layout of the `Date` column.
pub const CSV_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returns `true` if `line` is (or starts like) the CSV header row.
pub fn is_csv_header(line: &str) -> bool {
    line == CSV_HEADER || line.starts_with("Date,User,")
}

/// Byte offset of the header row, if the export has one.
fn header_offset(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if is_csv_header(line.trim()) {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Parses one record into its day and messages.
///
/// The first body line goes to the sender's message; later lines become
/// continuations, dropping blank ones and those `config` skips.
///
/// Returns `None` if a column is missing, the date or user is empty, or
/// the date doesn't follow [`CSV_DATE_FORMAT`].
pub fn parse_record(
    record: &StringRecord,
    config: &ParserConfig,
) -> Option<(DayKey, Vec<Message>)> {
    let date = record.get(0)?.trim();
    let user = record.get(1)?.trim();
    let content = record.get(2)?;

    if date.is_empty() || user.is_empty() {
        return None;
    }

    let dt = NaiveDateTime::parse_from_str(date, CSV_DATE_FORMAT).ok()?;
    let mut lines = content.lines().map(str::trim);
    let first = lines.next().unwrap_or_default();

    let messages = std::iter::once(Message::new(user, time_label(dt.time()), first))
        .chain(
            lines
                .filter(|line| !line.is_empty() && !config.is_skipped(line))
                .map(Message::continuation),
        )
        .collect();
    Some((dt.date(), messages))
}

/// Parser for CSV exports.
///
/// # Example
///
/// ```rust
/// use talkpack::parsers::CsvParser;
///
/// let text = "Date,User,Message\n2025-10-10 10:09:20,\"A\",\"hello\"";
/// let store = CsvParser::new().parse_str(text);
///
/// let msg = store.messages().next().unwrap();
/// assert_eq!(msg.time_label(), Some("오전 10:09"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    config: ParserConfig,
}

impl CsvParser {
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
    ///
    /// Anything above the header row is ignored. Without a header row the
    /// first line is taken as the header.
    pub fn parse_str(&self, text: &str) -> DailyChatStore {
        let text = strip_bom(text);
        let body = header_offset(text).map_or(text, |i| &text[i..]);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(body.as_bytes());

        let mut store = DailyChatStore::new();
        let mut skipped = 0usize;

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    trace!(error = %e, "skipping unreadable CSV row");
                    skipped += 1;
                    continue;
                }
            };

            match parse_record(&record, &self.config) {
                Some((day, msgs)) => msgs.into_iter().for_each(|msg| store.push(day, msg)),
                None => {
                    trace!(row = ?record, "skipping malformed CSV row");
                    skipped += 1;
                }
            }
        }

        debug!(
            days = store.day_count(),
            messages = store.message_count(),
            skipped,
            "parsed CSV export"
        );
        store
    }
}

impl Parser for CsvParser {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn parse_str(&self, content: &str) -> DailyChatStore {
        CsvParser::parse_str(self, content)
    }
}
