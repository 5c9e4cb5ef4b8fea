//! Core processing logic for talkpack.
//!
//! This module contains:
//! - [`store`] - The per-day message store every tokenizer fills
//! - [`filter`] - Period and sender filtering
//! - [`serializer`] - Normalized text rendering and truncation
//! - [`mask`] - Personal-data masking
//! - [`processor`] - The preprocessing pipeline and its statistics
//! - [`output`] - Dialogue JSON documents
//!
//! # Quick Start
//!
//! ```rust
//! use talkpack::core::{Preprocessor, WindowRequest};
//!
//! # fn main() -> talkpack::Result<()> {
//! let raw = "2025. 10. 23. 오전 11:44, 안도현 : 동방에 다 있을걸";
//! let window = WindowRequest::new().with_days(7).resolve()?;
//! let result = Preprocessor::new().preprocess(raw, Some("안도현"), Some(&window));
//!
//! assert_eq!(result.text, "--- 2025년 10월 23일 ---\n[안도현] [오전 11:44] 동방에 다 있을걸");
//! # Ok(())
//! # }
//! ```

pub mod filter;
pub mod mask;
pub mod output;
pub mod processor;
pub mod serializer;
pub mod store;

// Re-export main types for convenience
pub use filter::{
    WindowMode, WindowRequest, WindowSpec, filter_by_period, filter_by_sender, parse_day_key,
};
pub use mask::{mask_pii, mask_store};
pub use output::DialogueDocument;
pub use processor::{ChatStats, PreprocessResult, Preprocessor, preprocess};
pub use serializer::{serialize, truncate_to_last_chars};
pub use store::{DailyChatStore, DayKey};

// Re-export Message from the crate root
pub use crate::Message;

#[cfg(feature = "json-output")]
pub use output::{from_dialogue_json, read_dialogue_json, to_dialogue_json, write_dialogue_json};
