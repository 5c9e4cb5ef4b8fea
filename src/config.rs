//! Configuration types for parsing and preprocessing.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - tokenizer settings shared by every export format
//! - [`PreprocessConfig`] - output budget and masking for the preprocessor
//!
//! # Example
//!
//! ```rust
//! use talkpack::config::{ParserConfig, PreprocessConfig};
//!
//! let config = PreprocessConfig::new()
//!     .with_max_chars(20_000)
//!     .with_mask_pii(true)
//!     .with_parser(ParserConfig::new().with_skip_prefix("삭제된 메시지입니다"));
//! ```

use serde::{Deserialize, Serialize};

/// Number of leading lines the format sniffer inspects.
pub const DEFAULT_SNIFF_LINES: usize = 20;

/// Default output budget, in characters.
pub const DEFAULT_MAX_CHARS: usize = 150_000;

/// Deletion notice exported in place of a removed message.
pub const DELETED_MESSAGE_PREFIX: &str = "메시지가 삭제";

/// Configuration for format detection and tokenizing.
///
/// # Example
///
/// ```rust
/// use talkpack::config::ParserConfig;
///
/// let config = ParserConfig::new().with_sniff_lines(50);
/// assert_eq!(config.sniff_lines, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Leading lines examined by the format sniffer (default: 20)
    pub sniff_lines: usize,

    /// Lines starting with any of these are dropped instead of being kept
    /// as continuation lines in header-delimited exports
    /// (default: the deletion notice)
    pub skip_prefixes: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            sniff_lines: DEFAULT_SNIFF_LINES,
            skip_prefixes: vec![DELETED_MESSAGE_PREFIX.to_string()],
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many leading lines the sniffer inspects.
    #[must_use]
    pub fn with_sniff_lines(mut self, lines: usize) -> Self {
        self.sniff_lines = lines;
        self
    }

    /// Adds a prefix for lines that should be dropped.
    #[must_use]
    pub fn with_skip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.skip_prefixes.push(prefix.into());
        self
    }

    /// Replaces the dropped-line prefixes.
    #[must_use]
    pub fn with_skip_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.skip_prefixes = prefixes;
        self
    }

    /// Returns `true` if `line` starts with a dropped-line prefix.
    pub fn is_skipped(&self, line: &str) -> bool {
        self.skip_prefixes.iter().any(|p| line.starts_with(p.as_str()))
    }
}

/// Configuration for the [`Preprocessor`](crate::core::Preprocessor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Maximum characters of normalized text returned (default: 150 000)
    pub max_chars: usize,

    /// Mask personal data in message content before serializing (default: false)
    pub mask_pii: bool,

    /// Tokenizer settings
    pub parser: ParserConfig,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            mask_pii: false,
            parser: ParserConfig::default(),
        }
    }
}

impl PreprocessConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output character budget.
    #[must_use]
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Enables or disables PII masking.
    #[must_use]
    pub fn with_mask_pii(mut self, mask: bool) -> Self {
        self.mask_pii = mask;
        self
    }

    /// Sets the tokenizer configuration.
    #[must_use]
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_config_default() {
        let config = ParserConfig::default();
        assert_eq!(config.sniff_lines, 20);
        assert!(config.is_skipped("메시지가 삭제되었습니다."));
        assert!(!config.is_skipped("사진"));
    }

    #[test]
    fn test_parser_config_builder() {
        let config = ParserConfig::new()
            .with_sniff_lines(5)
            .with_skip_prefix("(deleted)");
        assert_eq!(config.sniff_lines, 5);
        assert!(config.is_skipped("(deleted) message"));
        assert!(config.is_skipped("메시지가 삭제되었습니다."));
    }

    #[test]
    fn test_parser_config_replace_prefixes() {
        let config = ParserConfig::new().with_skip_prefixes(vec![]);
        assert!(!config.is_skipped("메시지가 삭제되었습니다."));
    }

    #[test]
    fn test_preprocess_config_default() {
        let config = PreprocessConfig::default();
        assert_eq!(config.max_chars, 150_000);
        assert!(!config.mask_pii);
        assert_eq!(config.parser, ParserConfig::default());
    }

    #[test]
    fn test_preprocess_config_builder() {
        let config = PreprocessConfig::new().with_max_chars(10).with_mask_pii(true);
        assert_eq!(config.max_chars, 10);
        assert!(config.mask_pii);
    }
}
