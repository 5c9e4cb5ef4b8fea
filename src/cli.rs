//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! [`Args`] also knows how to turn its loose window flags into a validated
//! [`WindowSpec`] and its budget flags into a [`PreprocessConfig`], so the
//! binary stays a thin shell around the library.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_MAX_CHARS, PreprocessConfig};
use crate::core::filter::{DEFAULT_BUFFER_DAYS, DEFAULT_RECENT_DAYS, WindowRequest, WindowSpec, parse_day_key};
use crate::core::store::DayKey;
use crate::error::Result;

/// Normalize a KakaoTalk chat export (CSV, banner or inline-timestamp text)
/// into a per-day, windowed text form for LLM context.
#[derive(Parser, Debug, Clone)]
#[command(name = "talkpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    talkpack KakaoTalk_Chat.txt
    talkpack chat.csv --target 민지 --days 30
    talkpack chat.txt --start 2025-08-01 --end 2025-08-31 --buffer-days 3
    talkpack chat.txt --all -f json -o dialogue.json
    talkpack chat.txt --target 민지 --require-target -f stats")]
pub struct Args {
    /// Path to the exported chat
    pub input: PathBuf,

    /// Write output here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Participant whose presence in the window is checked
    #[arg(long, value_name = "NAME")]
    pub target: Option<String>,

    /// Fail if the target has no messages in the window
    #[arg(long, requires = "target")]
    pub require_target: bool,

    /// Keep this many days back from the anchor
    #[arg(long, value_name = "N", default_value_t = DEFAULT_RECENT_DAYS)]
    pub days: u32,

    /// Anchor day for --days (defaults to the last day in the export)
    #[arg(long, value_name = "DATE", value_parser = parse_day_key)]
    pub anchor: Option<DayKey>,

    /// Range start (YYYY-MM-DD), requires --end
    #[arg(long, value_name = "DATE", value_parser = parse_day_key)]
    pub start: Option<DayKey>,

    /// Range end (YYYY-MM-DD), requires --start
    #[arg(long, value_name = "DATE", value_parser = parse_day_key)]
    pub end: Option<DayKey>,

    /// Extra days kept before --start
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BUFFER_DAYS)]
    pub buffer_days: u32,

    /// Keep the whole conversation, ignoring window flags
    #[arg(long, conflicts_with_all = ["days", "anchor", "start", "end"])]
    pub all: bool,

    /// Character budget; older text is cut first
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CHARS)]
    pub max_chars: usize,

    /// Mask phone numbers, e-mails, addresses and similar in message bodies
    #[arg(long)]
    pub mask_pii: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Resolves the window flags. `None` means `--all`.
    ///
    /// # Errors
    ///
    /// Returns [`TalkpackError::InvalidWindow`](crate::TalkpackError::InvalidWindow)
    /// if only one end of a range was given, or the range is reversed.
    pub fn window(&self) -> Result<Option<WindowSpec>> {
        if self.all {
            return Ok(None);
        }
        let request = WindowRequest {
            days: Some(self.days),
            anchor: self.anchor,
            start: self.start,
            end: self.end,
            buffer_days: Some(self.buffer_days),
        };
        request.resolve().map(Some)
    }

    /// Builds the preprocessing configuration from the flags.
    pub fn preprocess_config(&self) -> PreprocessConfig {
        PreprocessConfig::new()
            .with_max_chars(self.max_chars)
            .with_mask_pii(self.mask_pii)
    }

    /// Default log filter when `RUST_LOG` isn't set.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "talkpack=debug" } else { "talkpack=info" }
    }
}

/// Output format options.
///
/// # Example
///
/// ```rust
/// use talkpack::cli::OutputFormat;
///
/// let format = OutputFormat::Stats;
/// println!("Extension: {}", format.extension()); // "json"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Normalized text (default)
    #[default]
    #[value(alias = "txt")]
    Text,

    /// Windowed conversation as a dialogue JSON document
    Json,

    /// Statistics record as JSON
    Stats,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Text => crate::format::OutputFormat::Text,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Stats => crate::format::OutputFormat::Stats,
        }
    }
}
