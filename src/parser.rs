//! Format detection and the unified parser trait.
//!
//! KakaoTalk exports come in four text shapes depending on the client that
//! produced them. [`detect_format`] sniffs the leading lines of an export
//! and [`create_parser`] returns the matching tokenizer, so callers never
//! need to know which client the file came from.
//!
//! # Example
//!
//! ```rust
//! use talkpack::config::ParserConfig;
//! use talkpack::parser::{ExportFormat, parse_str};
//!
//! let text = "--- 2025년 8월 14일 목요일 ---\n[민지] [오전 9:05] hi";
//! let parsed = parse_str(text, &ParserConfig::default());
//!
//! assert_eq!(parsed.format, ExportFormat::HeaderDelimited);
//! assert_eq!(parsed.store.message_count(), 1);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ParserConfig;
use crate::core::store::DailyChatStore;
use crate::error::Result;
use crate::parsers::{CsvParser, HeaderParser, InlineParser, InlineStyle, csv, header};
use crate::parsing::trimmed_lines;

/// Supported export formats.
///
/// The format set is closed: every tokenizer dispatch matches on all four
/// variants.
///
/// # Example
///
/// ```rust
/// use talkpack::parser::ExportFormat;
/// use std::str::FromStr;
///
/// assert_eq!(ExportFormat::from_str("inline-a").unwrap(), ExportFormat::InlineLongDate);
///
/// // Client names are accepted as aliases
/// assert_eq!(ExportFormat::from_str("ios").unwrap(), ExportFormat::InlineDotDate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    /// `Date,User,Message` CSV (desktop macOS)
    #[serde(rename = "csv", alias = "mac")]
    Csv,

    /// Dashed day banners followed by `[sender] [time] content` lines (desktop Windows)
    #[serde(rename = "header", alias = "windows")]
    HeaderDelimited,

    /// `2025년 10월 10일 오전 10:09, sender : content` (Android)
    #[serde(rename = "inline-a", alias = "android")]
    InlineLongDate,

    /// `2025. 10. 23. 오전 11:44, sender : content` (iOS)
    #[serde(rename = "inline-b", alias = "ios")]
    InlineDotDate,
}

impl ExportFormat {
    /// Returns the canonical short name used on the command line and in JSON.
    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::HeaderDelimited => "header",
            ExportFormat::InlineLongDate => "inline-a",
            ExportFormat::InlineDotDate => "inline-b",
        }
    }

    /// Returns all format names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &[
            "csv", "mac", "header", "windows", "inline-a", "android", "inline-b", "ios",
        ]
    }

    /// Returns all formats in detection priority order.
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::Csv,
            ExportFormat::HeaderDelimited,
            ExportFormat::InlineDotDate,
            ExportFormat::InlineLongDate,
        ]
    }

    /// Returns `true` if `line` is characteristic of this format.
    fn recognizes(self, line: &str) -> bool {
        match self {
            ExportFormat::Csv => csv::is_csv_header(line),
            ExportFormat::HeaderDelimited => header::is_banner(line),
            ExportFormat::InlineLongDate => InlineStyle::LongDate.matches(line),
            ExportFormat::InlineDotDate => InlineStyle::DotDate.matches(line),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::HeaderDelimited => write!(f, "Header-delimited"),
            ExportFormat::InlineLongDate => write!(f, "Inline (long date)"),
            ExportFormat::InlineDotDate => write!(f, "Inline (dot date)"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" | "mac" => Ok(ExportFormat::Csv),
            "header" | "windows" => Ok(ExportFormat::HeaderDelimited),
            "inline-a" | "android" => Ok(ExportFormat::InlineLongDate),
            "inline-b" | "ios" => Ok(ExportFormat::InlineDotDate),
            _ => Err(format!(
                "Unknown export format: '{}'. Expected one of: {}",
                s,
                ExportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Guesses the export format from the first `config.sniff_lines` lines.
///
/// Rules are tried in priority order, each against every examined line:
/// a CSV header row, then a day banner, then a dot-date message line, then
/// a long-date message line. When nothing matches the export is treated as
/// [`ExportFormat::HeaderDelimited`], the most permissive shape.
///
/// ```rust
/// use talkpack::config::ParserConfig;
/// use talkpack::parser::{ExportFormat, detect_format};
///
/// let config = ParserConfig::default();
/// assert_eq!(detect_format("Date,User,Message\n", &config), ExportFormat::Csv);
/// assert_eq!(detect_format("", &config), ExportFormat::HeaderDelimited);
/// ```
pub fn detect_format(text: &str, config: &ParserConfig) -> ExportFormat {
    let head: Vec<&str> = trimmed_lines(text).take(config.sniff_lines).collect();

    let format = ExportFormat::all()
        .iter()
        .copied()
        .find(|format| head.iter().any(|line| format.recognizes(line)))
        .unwrap_or(ExportFormat::HeaderDelimited);

    debug!(%format, examined = head.len(), "detected export format");
    format
}

/// Unified trait for export tokenizers.
///
/// Parsing never fails on content: malformed lines and rows are skipped.
/// Only reading a file can fail.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Returns the format this parser reads.
    fn format(&self) -> ExportFormat;

    /// Parses an export already held in memory.
    fn parse_str(&self, content: &str) -> DailyChatStore;

    /// Reads and parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`TalkpackError::Io`](crate::TalkpackError::Io) if the file
    /// can't be read, or [`TalkpackError::Utf8`](crate::TalkpackError::Utf8)
    /// if it isn't valid UTF-8.
    fn parse(&self, path: &Path) -> Result<DailyChatStore> {
        let content = read_export(path)?;
        Ok(self.parse_str(&content))
    }
}

/// Creates the tokenizer for `format`.
///
/// ```rust
/// use talkpack::config::ParserConfig;
/// use talkpack::parser::{ExportFormat, create_parser};
///
/// let parser = create_parser(ExportFormat::Csv, ParserConfig::default());
/// assert_eq!(parser.name(), "CSV");
/// ```
pub fn create_parser(format: ExportFormat, config: ParserConfig) -> Box<dyn Parser> {
    match format {
        ExportFormat::Csv => Box::new(CsvParser::with_config(config)),
        ExportFormat::HeaderDelimited => Box::new(HeaderParser::with_config(config)),
        ExportFormat::InlineLongDate => {
            Box::new(InlineParser::with_config(InlineStyle::LongDate, config))
        }
        ExportFormat::InlineDotDate => {
            Box::new(InlineParser::with_config(InlineStyle::DotDate, config))
        }
    }
}

/// An export after detection and tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExport {
    /// The detected format
    pub format: ExportFormat,
    /// Messages grouped by day
    pub store: DailyChatStore,
}

/// Detects the format of `text` and tokenizes it.
pub fn parse_str(text: &str, config: &ParserConfig) -> ParsedExport {
    let format = detect_format(text, config);
    let store = create_parser(format, config.clone()).parse_str(text);
    ParsedExport { format, store }
}

/// Reads an export file, detects its format and tokenizes it.
///
/// # Errors
///
/// Fails only if the file can't be read or isn't valid UTF-8.
pub fn parse_file(path: impl AsRef<Path>, config: &ParserConfig) -> Result<ParsedExport> {
    let content = read_export(path.as_ref())?;
    Ok(parse_str(&content, config))
}

fn read_export(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8(bytes)?)
}
