//! Output format types for the talkpack library.
//!
//! This module provides library-first format types that don't depend on CLI
//! frameworks.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "json-output")]
//! # fn example() -> talkpack::Result<()> {
//! use talkpack::core::Preprocessor;
//! use talkpack::format::{OutputFormat, to_format_string};
//!
//! let result = Preprocessor::new().preprocess("--- 2025년 8월 14일 ---\n[A] [오전 9:05] hi", None, None);
//!
//! let text = to_format_string(&result, OutputFormat::Text)?;
//! let stats = to_format_string(&result, OutputFormat::Stats)?;
//!
//! // Or pick the format from a file name
//! let format = OutputFormat::from_path("stats.json")?;
//! assert_eq!(format, OutputFormat::Json);
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::PreprocessResult;
use crate::error::{Result, TalkpackError};

/// What to emit for a preprocessing run.
///
/// - [`Text`](OutputFormat::Text) - the normalized text, for LLM context
/// - [`Json`](OutputFormat::Json) - the windowed conversation as a dialogue document
/// - [`Stats`](OutputFormat::Stats) - the statistics record
///
/// # Example
///
/// ```rust
/// use talkpack::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("stats").unwrap();
/// assert_eq!(format, OutputFormat::Stats);
/// assert_eq!(format.extension(), "json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Normalized text (default)
    #[default]
    Text,

    /// Dialogue document JSON
    Json,

    /// Statistics record JSON
    Stats,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json | OutputFormat::Stats => "json",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "json", "stats"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Text, OutputFormat::Json, OutputFormat::Stats]
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text/plain",
            OutputFormat::Json | OutputFormat::Stats => "application/json",
        }
    }

    /// Detects format from a file path based on extension.
    ///
    /// `.json` maps to [`Json`](OutputFormat::Json); use
    /// [`Stats`](OutputFormat::Stats) explicitly for the statistics record.
    ///
    /// # Errors
    ///
    /// Returns [`TalkpackError::InvalidFormat`] for unknown extensions.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "txt" | "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(TalkpackError::invalid_format(
                "output",
                format!("Unknown extension: '.{}'. Expected: .txt, .json", ext),
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Stats => write!(f, "Stats"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = TalkpackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "stats" => Ok(OutputFormat::Stats),
            _ => Err(TalkpackError::invalid_format(
                "output",
                format!(
                    "Unknown format: '{}'. Expected one of: {}",
                    s,
                    OutputFormat::all_names().join(", ")
                ),
            )),
        }
    }
}

/// Renders a preprocessing result in the given format.
///
/// # Errors
///
/// Returns [`TalkpackError::InvalidFormat`] if a JSON format is requested
/// without the `json-output` feature, or a JSON error if serialization
/// fails.
pub fn to_format_string(result: &PreprocessResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(result.text.clone()),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.to_document())?),
        #[cfg(feature = "json-output")]
        OutputFormat::Stats => Ok(serde_json::to_string_pretty(&result.stats)?),
        #[allow(unreachable_patterns)]
        _ => Err(TalkpackError::invalid_format(
            "output",
            format!("Output format {format} requires the 'json-output' feature to be enabled"),
        )),
    }
}

/// Renders a preprocessing result and writes it to `path`.
///
/// # Errors
///
/// Same as [`to_format_string`], plus I/O errors from writing the file.
pub fn write_to_format(
    result: &PreprocessResult,
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<()> {
    let rendered = to_format_string(result, format)?;
    let mut file = File::create(path)?;
    file.write_all(rendered.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Preprocessor;
    use std::str::FromStr;

    fn sample() -> PreprocessResult {
        Preprocessor::new().preprocess("--- 2025년 8월 14일 ---\n[A] [오전 9:05] hi", Some("A"), None)
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("TXT").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("stats").unwrap(), OutputFormat::Stats);
        assert!(OutputFormat::from_str("csv").is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("out.txt").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_path("/tmp/OUT.JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_path("out.csv").is_err());
    }

    #[test]
    fn test_format_default_and_display() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert_eq!(OutputFormat::Stats.to_string(), "Stats");
        assert_eq!(OutputFormat::Text.extension(), "txt");
    }

    #[test]
    fn test_render_each_format() {
        let result = sample();
        assert_eq!(
            to_format_string(&result, OutputFormat::Text).unwrap(),
            "--- 2025년 08월 14일 ---\n[A] [오전 9:05] hi"
        );

        let doc = to_format_string(&result, OutputFormat::Json).unwrap();
        assert!(doc.contains(r#""daily_chats""#));

        let stats = to_format_string(&result, OutputFormat::Stats).unwrap();
        assert!(stats.contains(r#""target_found": true"#));
    }

    #[test]
    fn test_write_to_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_to_format(&sample(), &path, OutputFormat::Text).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().ends_with("hi"));
    }
}
