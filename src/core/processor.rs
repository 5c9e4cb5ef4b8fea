//! The preprocessing pipeline and its statistics.
//!
//! [`Preprocessor`] runs detect, tokenize, period filter, target probe,
//! optional masking, serialize and truncate, and returns the normalized
//! text together with a flat [`ChatStats`] record.
//!
//! The target probe only counts: the text always contains every participant
//! in the window, never just the target's own lines.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PreprocessConfig;
use crate::core::filter::{WindowMode, WindowSpec, filter_by_period, filter_by_sender};
use crate::core::mask::mask_store;
use crate::core::output::DialogueDocument;
use crate::core::serializer::{serialize, truncate_to_last_chars};
use crate::core::store::{DailyChatStore, DayKey};
use crate::error::{Result, TalkpackError};
use crate::parser::{ExportFormat, parse_str};

/// Statistics about one preprocessing run.
///
/// A flat record: every field is a scalar, a date or a list of names, so it
/// serializes to a single JSON object. Window and target fields are omitted
/// when no window was applied or no target was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStats {
    /// Detected (or stored) export format
    pub format: ExportFormat,
    /// Days in the whole conversation
    pub total_days: usize,
    /// Messages in the whole conversation
    pub total_messages: usize,
    /// Sorted unique sender names in the whole conversation
    pub participants: Vec<String>,
    /// Number of participants
    pub participant_count: usize,
    /// Earliest day in the conversation
    pub start_date: Option<DayKey>,
    /// Latest day in the conversation
    pub end_date: Option<DayKey>,

    /// Window mode applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_mode: Option<WindowMode>,
    /// Recent-days count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_days: Option<u32>,
    /// Recent-days anchor as resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_anchor: Option<DayKey>,
    /// Range start as requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_start: Option<DayKey>,
    /// Range end as requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_end: Option<DayKey>,
    /// Range buffer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_buffer_days: Option<u32>,
    /// First day kept by the window, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_from: Option<DayKey>,
    /// Last day kept by the window, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_to: Option<DayKey>,
    /// Days left after the window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered_days: Option<usize>,
    /// Messages left after the window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered_messages: Option<usize>,

    /// Name probed for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Whether the target sent anything inside the window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_found: Option<bool>,
    /// Messages the target sent inside the window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_message_count: Option<usize>,

    /// Characters in the returned text
    pub output_chars: usize,
    /// Whether the text was cut to the character budget
    pub truncated: bool,
}

impl ChatStats {
    fn base(format: ExportFormat, store: &DailyChatStore) -> Self {
        let participants = store.participants();
        Self {
            format,
            total_days: store.day_count(),
            total_messages: store.message_count(),
            participant_count: participants.len(),
            participants,
            start_date: store.first_day(),
            end_date: store.last_day(),
            filter_mode: None,
            filter_days: None,
            filter_anchor: None,
            filter_start: None,
            filter_end: None,
            filter_buffer_days: None,
            window_from: None,
            window_to: None,
            filtered_days: None,
            filtered_messages: None,
            target: None,
            target_found: None,
            target_message_count: None,
            output_chars: 0,
            truncated: false,
        }
    }

    fn record_window(&mut self, spec: &WindowSpec, source: &DailyChatStore, kept: &DailyChatStore) {
        self.filter_mode = Some(spec.mode());
        match *spec {
            WindowSpec::RecentDays { days, anchor } => {
                self.filter_days = Some(days);
                self.filter_anchor = anchor.or_else(|| source.last_day());
            }
            WindowSpec::Range {
                start,
                end,
                buffer_days,
            } => {
                self.filter_start = Some(start);
                self.filter_end = Some(end);
                self.filter_buffer_days = Some(buffer_days);
            }
        }
        if let Some((from, to)) = spec.bounds(source) {
            self.window_from = Some(from);
            self.window_to = Some(to);
        }
        self.filtered_days = Some(kept.day_count());
        self.filtered_messages = Some(kept.message_count());
    }

    /// Returns `true` unless a target was given and not found.
    pub fn target_ok(&self) -> bool {
        self.target_found != Some(false)
    }
}

/// Output of one preprocessing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessResult {
    /// Normalized text, cut to the character budget
    pub text: String,
    /// Statistics about the run
    pub stats: ChatStats,
    /// The windowed (and, if enabled, masked) store the text was built from
    pub store: DailyChatStore,
}

impl PreprocessResult {
    /// Fails if a target was given and has no messages in the window.
    ///
    /// # Errors
    ///
    /// Returns [`TalkpackError::TargetNotFound`] listing every participant
    /// of the conversation.
    pub fn require_target(self) -> Result<Self> {
        match (&self.stats.target, self.stats.target_found) {
            (Some(target), Some(false)) => Err(TalkpackError::target_not_found(
                target.clone(),
                self.stats.participants.clone(),
            )),
            _ => Ok(self),
        }
    }

    /// Snapshot of the windowed store as a dialogue document.
    pub fn to_document(&self) -> DialogueDocument {
        DialogueDocument::from_store(self.stats.format, &self.store)
    }
}

/// Runs the preprocessing pipeline with a fixed configuration.
///
/// # Example
///
/// ```rust
/// use talkpack::config::PreprocessConfig;
/// use talkpack::core::{Preprocessor, WindowSpec};
///
/// let raw = "--- 2025년 8월 14일 목요일 ---\n[Minji] [오전 9:05] hi\nhow are you";
/// let result = Preprocessor::with_config(PreprocessConfig::new().with_max_chars(1_000))
///     .preprocess(raw, Some("Min"), Some(&WindowSpec::recent_days(14)));
///
/// assert_eq!(result.stats.target_found, Some(true));
/// assert!(result.text.ends_with("how are you"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    config: PreprocessConfig,
}

impl Preprocessor {
    /// Creates a preprocessor with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a preprocessor with custom configuration.
    pub fn with_config(config: PreprocessConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Detects, tokenizes and processes a raw export.
    ///
    /// `window: None` keeps the whole conversation.
    pub fn preprocess(
        &self,
        raw: &str,
        target: Option<&str>,
        window: Option<&WindowSpec>,
    ) -> PreprocessResult {
        let parsed = parse_str(raw, &self.config.parser);
        self.preprocess_store(parsed.format, &parsed.store, target, window)
    }

    /// Processes a previously exported dialogue document without re-parsing.
    pub fn preprocess_document(
        &self,
        doc: &DialogueDocument,
        target: Option<&str>,
        window: Option<&WindowSpec>,
    ) -> PreprocessResult {
        self.preprocess_store(doc.format, &doc.daily_chats, target, window)
    }

    /// Processes an already tokenized store.
    pub fn preprocess_store(
        &self,
        format: ExportFormat,
        store: &DailyChatStore,
        target: Option<&str>,
        window: Option<&WindowSpec>,
    ) -> PreprocessResult {
        let mut stats = ChatStats::base(format, store);

        let windowed = match window {
            Some(spec) => {
                let kept = filter_by_period(store, spec);
                stats.record_window(spec, store, &kept);
                kept
            }
            None => store.clone(),
        };

        if let Some(target) = target {
            let count = filter_by_sender(&windowed, target).message_count();
            stats.target = Some(target.to_string());
            stats.target_found = Some(count > 0);
            stats.target_message_count = Some(count);
        }

        let windowed = if self.config.mask_pii {
            mask_store(&windowed)
        } else {
            windowed
        };

        let full = serialize(&windowed);
        let text = truncate_to_last_chars(&full, self.config.max_chars);
        stats.truncated = text.len() < full.len();
        stats.output_chars = text.chars().count();
        let text = text.to_string();

        debug!(
            %format,
            messages = windowed.message_count(),
            output_chars = stats.output_chars,
            truncated = stats.truncated,
            "preprocessed conversation"
        );

        PreprocessResult {
            text,
            stats,
            store: windowed,
        }
    }
}

/// One-shot pipeline with a required target, a window and a character budget.
///
/// ```rust
/// use talkpack::core::{WindowSpec, preprocess};
///
/// let raw = "Date,User,Message\n2025-10-10 10:09:20,\"A\",\"hello\"";
/// let result = preprocess(raw, "B", &WindowSpec::recent_days(14), 150_000);
///
/// assert_eq!(result.stats.target_found, Some(false));
/// assert!(result.text.contains("[A] [오전 10:09] hello"));
/// ```
pub fn preprocess(raw: &str, target: &str, window: &WindowSpec, max_chars: usize) -> PreprocessResult {
    Preprocessor::with_config(PreprocessConfig::new().with_max_chars(max_chars))
        .preprocess(raw, Some(target), Some(window))
}
