//! Dialogue document output.
//!
//! - [`DialogueDocument`] - a parsed conversation plus its summary fields
//! - [`to_dialogue_json`] / [`from_dialogue_json`] - JSON conversion - requires `json-output` feature
//! - [`write_dialogue_json`] / [`read_dialogue_json`] - the same, to and from files
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "json-output")]
//! # fn main() -> talkpack::Result<()> {
//! use talkpack::core::output::{from_dialogue_json, to_dialogue_json};
//! use talkpack::config::ParserConfig;
//! use talkpack::parser::parse_str;
//!
//! let parsed = parse_str("--- 2025년 8월 14일 ---\n[A] [오전 9:05] hi", &ParserConfig::default());
//! let json = to_dialogue_json(parsed.format, &parsed.store)?;
//!
//! let doc = from_dialogue_json(&json)?;
//! assert_eq!(doc.into_store(), parsed.store);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json-output"))]
//! # fn main() {}
//! ```

mod document;
#[cfg(feature = "json-output")]
mod json_writer;

pub use document::DialogueDocument;
#[cfg(feature = "json-output")]
pub use json_writer::{from_dialogue_json, read_dialogue_json, to_dialogue_json, write_dialogue_json};
