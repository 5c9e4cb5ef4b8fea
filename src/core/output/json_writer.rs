//! Dialogue JSON reader and writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::output::DialogueDocument;
use crate::core::store::DailyChatStore;
use crate::error::Result;
use crate::parser::ExportFormat;

/// Converts a store to a pretty-printed dialogue JSON document.
///
/// # Errors
///
/// Returns [`TalkpackError::Json`](crate::TalkpackError::Json) if
/// serialization fails.
pub fn to_dialogue_json(format: ExportFormat, store: &DailyChatStore) -> Result<String> {
    let doc = DialogueDocument::from_store(format, store);
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parses a dialogue JSON document written by [`to_dialogue_json`].
///
/// # Errors
///
/// Returns [`TalkpackError::Json`](crate::TalkpackError::Json) if the
/// input isn't a valid document.
pub fn from_dialogue_json(json: &str) -> Result<DialogueDocument> {
    Ok(serde_json::from_str(json)?)
}

/// Writes a store to `path` as dialogue JSON.
///
/// # Errors
///
/// Returns an I/O error if the file can't be written.
pub fn write_dialogue_json(
    format: ExportFormat,
    store: &DailyChatStore,
    path: impl AsRef<Path>,
) -> Result<()> {
    let json = to_dialogue_json(format, store)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Reads a dialogue JSON document from `path`.
///
/// # Errors
///
/// Returns an I/O error if the file can't be read, or a JSON error if it
/// isn't a valid document.
pub fn read_dialogue_json(path: impl AsRef<Path>) -> Result<DialogueDocument> {
    let json = std::fs::read_to_string(path)?;
    from_dialogue_json(&json)
}
