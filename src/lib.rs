//! # Talkpack
//!
//! A Rust library for turning KakaoTalk chat exports into a compact,
//! per-day text form suited for LLM context.
//!
//! ## Overview
//!
//! KakaoTalk exports conversations differently on each platform. Talkpack
//! recognizes four layouts:
//! - **CSV** (`Date,User,Message`), from the macOS client
//! - **Header-delimited** text with `--- 2025년 8월 14일 목요일 ---` banners, from Windows
//! - **Inline long-date** lines (`2025년 8월 14일 오후 3:20, 민지 : 안녕`), from Android
//! - **Inline dot-date** lines (`2025. 8. 14. 오후 3:20, 민지 : 안녕`), from iOS
//!
//! Every layout is tokenized into the same [`DailyChatStore`](core::DailyChatStore),
//! which can then be windowed by period, probed for a participant, optionally
//! masked, and serialized into one canonical text form.
//!
//! ## Quick Start
//!
//! ```rust
//! use talkpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let raw = "--- 2025년 8월 14일 목요일 ---\n[Minji] [오전 9:05] hi\nhow are you";
//!
//!     let window = WindowRequest::new().with_days(14).resolve()?;
//!     let result = Preprocessor::new().preprocess(raw, Some("Minji"), Some(&window));
//!
//!     assert_eq!(result.stats.format, ExportFormat::HeaderDelimited);
//!     assert_eq!(result.stats.target_found, Some(true));
//!     assert_eq!(
//!         result.text,
//!         "--- 2025년 08월 14일 ---\n[Minji] [오전 9:05] hi\nhow are you"
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Parsing Only
//!
//! ```rust
//! use talkpack::config::ParserConfig;
//! use talkpack::parser::{ExportFormat, create_parser, detect_format};
//!
//! let raw = "2025. 10. 23. 오전 11:44, 안도현 : 동방에 다 있을걸";
//! let config = ParserConfig::new();
//!
//! let format = detect_format(raw, &config);
//! assert_eq!(format, ExportFormat::InlineDotDate);
//!
//! let store = create_parser(format, config).parse_str(raw);
//! assert_eq!(store.message_count(), 1);
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - Format detection and dispatch
//!   - [`ExportFormat`](parser::ExportFormat) - The four export layouts
//!   - [`Parser`](parser::Parser) - Tokenizer trait, [`create_parser`](parser::create_parser)
//!   - [`parse_str`](parser::parse_str), [`parse_file`](parser::parse_file)
//! - [`parsers`] - One tokenizer per layout ([`HeaderParser`](parsers::HeaderParser),
//!   [`InlineParser`](parsers::InlineParser), [`CsvParser`](parsers::CsvParser))
//! - [`parsing`] - Shared clock and line helpers
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`PreprocessConfig`](config::PreprocessConfig)
//! - [`core`] - Store, windowing, masking, serialization and the pipeline
//! - [`format`] - Output formats for a preprocessing run
//! - [`cli`] - CLI argument types (feature `cli`)
//! - [`error`] - [`TalkpackError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{Result, TalkpackError};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use talkpack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;

    pub use crate::error::{Result, TalkpackError};

    pub use crate::config::{ParserConfig, PreprocessConfig};

    pub use crate::parser::{ExportFormat, Parser, create_parser, detect_format, parse_file, parse_str};

    pub use crate::core::{
        ChatStats, DailyChatStore, DayKey, DialogueDocument, PreprocessResult, Preprocessor,
        WindowRequest, WindowSpec, filter_by_period, filter_by_sender, mask_pii, serialize,
        truncate_to_last_chars,
    };

    #[cfg(feature = "json-output")]
    pub use crate::core::{from_dialogue_json, to_dialogue_json};

    pub use crate::format::{OutputFormat, to_format_string};
}
