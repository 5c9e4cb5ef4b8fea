//! Tokenizers for each KakaoTalk export format.
//!
//! Every tokenizer reads raw export text into a
//! [`DailyChatStore`](crate::core::DailyChatStore) and implements the
//! [`Parser`](crate::parser::Parser) trait.
//!
//! # Available Parsers
//!
//! - [`CsvParser`] - `Date,User,Message` exports
//! - [`HeaderParser`] - banner-delimited desktop exports
//! - [`InlineParser`] - inline-timestamp mobile exports, in either [`InlineStyle`]
//!
//! # Example
//!
//! ```rust
//! use talkpack::config::ParserConfig;
//! use talkpack::parser::{ExportFormat, create_parser};
//!
//! let parser = create_parser(ExportFormat::InlineDotDate, ParserConfig::default());
//! let store = parser.parse_str("2025. 10. 23. 오전 11:44, 안도현 : hi");
//! assert_eq!(store.message_count(), 1);
//! ```

pub mod csv;
pub mod header;
pub mod inline;

pub use csv::CsvParser;
pub use header::HeaderParser;
pub use inline::{InlineParser, InlineStyle};
