//! Narrow a store by period and by sender.
//!
//! This module provides [`WindowSpec`] for defining the period to keep,
//! [`WindowRequest`] for building one from loose caller parameters, and the
//! two filters [`filter_by_period`] and [`filter_by_sender`].
//!
//! # Window Modes
//!
//! | Mode | Keeps days `d` with | Anchor |
//! |------|---------------------|--------|
//! | [`RecentDays`](WindowSpec::RecentDays) | `anchor - days <= d <= anchor` | latest day in the store unless given |
//! | [`Range`](WindowSpec::Range) | `start - buffer_days <= d <= end` | n/a |
//!
//! Both bounds are inclusive. `buffer_days` only ever moves the start
//! backwards; the end is never adjusted.
//!
//! # Examples
//!
//! ## Recent days
//!
//! ```
//! use talkpack::core::{DailyChatStore, WindowSpec, filter_by_period, parse_day_key};
//! use talkpack::Message;
//!
//! # fn main() -> talkpack::Result<()> {
//! let mut store = DailyChatStore::new();
//! store.push(parse_day_key("2025-08-01")?, Message::new("A", "오전 9:00", "old"));
//! store.push(parse_day_key("2025-08-14")?, Message::new("A", "오전 9:00", "new"));
//!
//! let recent = filter_by_period(&store, &WindowSpec::recent_days(3));
//! assert_eq!(recent.day_count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Validated request
//!
//! ```
//! use talkpack::core::{WindowRequest, parse_day_key};
//!
//! # fn main() -> talkpack::Result<()> {
//! // Only one end of a range is a caller error.
//! let err = WindowRequest::new()
//!     .with_start(parse_day_key("2025-08-01")?)
//!     .resolve()
//!     .unwrap_err();
//! assert!(err.is_invalid_window());
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Filters are pure: the input store is never modified.
//! - Sender matching is a case-sensitive substring match.
//! - A day left with no messages is dropped, never kept empty.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::store::{DailyChatStore, DayKey};
use crate::error::{Result, TalkpackError};

/// Default look-back for [`WindowSpec::RecentDays`].
pub const DEFAULT_RECENT_DAYS: u32 = 14;

/// Default buffer for [`WindowSpec::Range`].
pub const DEFAULT_BUFFER_DAYS: u32 = 7;

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`TalkpackError::InvalidDate`] if the string isn't a valid date
/// in that layout.
pub fn parse_day_key(s: &str) -> Result<DayKey> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| TalkpackError::invalid_date(s))
}

/// Which window mode was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Count days back from an anchor
    RecentDays,
    /// Explicit start/end dates
    Range,
}

impl std::fmt::Display for WindowMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowMode::RecentDays => write!(f, "recent days"),
            WindowMode::Range => write!(f, "range"),
        }
    }
}

/// A resolved period filter. Exactly one mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WindowSpec {
    /// Keep `days` calendar days back from `anchor`, both ends inclusive.
    RecentDays {
        /// Days counted back; `0` keeps only the anchor day
        days: u32,
        /// Reference day; the latest day in the store when `None`
        anchor: Option<DayKey>,
    },

    /// Keep `start - buffer_days ..= end`.
    Range {
        /// First day requested
        start: DayKey,
        /// Last day kept
        end: DayKey,
        /// Extra days kept before `start`
        buffer_days: u32,
    },
}

impl WindowSpec {
    /// Recent-days window anchored at the latest day in the store.
    pub fn recent_days(days: u32) -> Self {
        WindowSpec::RecentDays { days, anchor: None }
    }

    /// Range window with the default buffer.
    pub fn range(start: DayKey, end: DayKey) -> Self {
        WindowSpec::Range {
            start,
            end,
            buffer_days: DEFAULT_BUFFER_DAYS,
        }
    }

    /// Returns the mode of this window.
    pub fn mode(&self) -> WindowMode {
        match self {
            WindowSpec::RecentDays { .. } => WindowMode::RecentDays,
            WindowSpec::Range { .. } => WindowMode::Range,
        }
    }

    /// Resolves the inclusive `(from, to)` day bounds against `store`.
    ///
    /// Returns `None` for a recent-days window without an explicit anchor
    /// over an empty store, since there is nothing to anchor to.
    pub fn bounds(&self, store: &DailyChatStore) -> Option<(DayKey, DayKey)> {
        match *self {
            WindowSpec::RecentDays { days, anchor } => {
                let anchor = anchor.or_else(|| store.last_day())?;
                Some((days_before(anchor, days), anchor))
            }
            WindowSpec::Range {
                start,
                end,
                buffer_days,
            } => Some((days_before(start, buffer_days), end)),
        }
    }
}

fn days_before(day: DayKey, n: u32) -> DayKey {
    day.checked_sub_days(Days::new(u64::from(n)))
        .unwrap_or(NaiveDate::MIN)
}

/// Loose window parameters as a caller supplies them.
///
/// [`resolve`](Self::resolve) turns them into a [`WindowSpec`], rejecting
/// combinations that don't name a single mode.
///
/// # Examples
///
/// ```
/// use talkpack::core::{WindowMode, WindowRequest, parse_day_key};
///
/// # fn main() -> talkpack::Result<()> {
/// // A complete range wins over recent-days parameters.
/// let spec = WindowRequest::new()
///     .with_days(3)
///     .with_range(parse_day_key("2025-08-01")?, parse_day_key("2025-08-10")?)
///     .resolve()?;
/// assert_eq!(spec.mode(), WindowMode::Range);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRequest {
    /// Days back for recent-days mode (default: 14)
    pub days: Option<u32>,
    /// Anchor for recent-days mode (default: latest day present)
    pub anchor: Option<DayKey>,
    /// Range start
    pub start: Option<DayKey>,
    /// Range end
    pub end: Option<DayKey>,
    /// Range buffer (default: 7)
    pub buffer_days: Option<u32>,
}

impl WindowRequest {
    /// Creates an empty request, which resolves to the default recent-days window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the recent-days count.
    #[must_use]
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = Some(days);
        self
    }

    /// Sets the recent-days anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: DayKey) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Sets the range start.
    #[must_use]
    pub fn with_start(mut self, start: DayKey) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the range end.
    #[must_use]
    pub fn with_end(mut self, end: DayKey) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets both ends of the range.
    #[must_use]
    pub fn with_range(self, start: DayKey, end: DayKey) -> Self {
        self.with_start(start).with_end(end)
    }

    /// Sets the range buffer.
    #[must_use]
    pub fn with_buffer_days(mut self, buffer_days: u32) -> Self {
        self.buffer_days = Some(buffer_days);
        self
    }

    /// Resolves the request into a single window.
    ///
    /// # Errors
    ///
    /// Returns [`TalkpackError::InvalidWindow`] if only one of `start` and
    /// `end` is set, or if `start` falls after `end`.
    pub fn resolve(&self) -> Result<WindowSpec> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                if start > end {
                    return Err(TalkpackError::invalid_window(format!(
                        "start {start} is after end {end}"
                    )));
                }
                Ok(WindowSpec::Range {
                    start,
                    end,
                    buffer_days: self.buffer_days.unwrap_or(DEFAULT_BUFFER_DAYS),
                })
            }
            (Some(_), None) => Err(TalkpackError::invalid_window(
                "start given without end; supply both or neither",
            )),
            (None, Some(_)) => Err(TalkpackError::invalid_window(
                "end given without start; supply both or neither",
            )),
            (None, None) => Ok(WindowSpec::RecentDays {
                days: self.days.unwrap_or(DEFAULT_RECENT_DAYS),
                anchor: self.anchor,
            }),
        }
    }
}

/// Builds a store holding only the days inside `spec`.
pub fn filter_by_period(store: &DailyChatStore, spec: &WindowSpec) -> DailyChatStore {
    let Some((from, to)) = spec.bounds(store) else {
        return DailyChatStore::new();
    };

    let filtered = store.retain_days(|day| from <= day && day <= to);
    debug!(
        mode = %spec.mode(),
        %from,
        %to,
        kept_days = filtered.day_count(),
        total_days = store.day_count(),
        "applied period filter"
    );
    filtered
}

/// Builds a store holding only messages whose sender contains `name_part`.
///
/// Continuation lines are never kept. Days left empty are dropped.
pub fn filter_by_sender(store: &DailyChatStore, name_part: &str) -> DailyChatStore {
    store.retain_messages(|msg| msg.sent_by(name_part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;

    fn d(s: &str) -> DayKey {
        parse_day_key(s).unwrap()
    }

    fn three_days() -> DailyChatStore {
        let mut store = DailyChatStore::new();
        store.push(d("2025-08-12"), Message::new("민지", "오전 9:00", "first"));
        store.push(d("2025-08-13"), Message::new("지훈", "오전 9:00", "second"));
        store.push(d("2025-08-13"), Message::continuation("more"));
        store.push(d("2025-08-14"), Message::new("민지", "오전 9:00", "third"));
        store
    }

    #[test]
    fn test_parse_day_key() {
        assert_eq!(d("2025-08-14"), NaiveDate::from_ymd_opt(2025, 8, 14).unwrap());
        assert!(parse_day_key("14-08-2025").unwrap_err().is_invalid_date());
        assert!(parse_day_key("2025-02-30").is_err());
    }

    #[test]
    fn test_recent_days_zero_keeps_anchor_only() {
        let filtered = filter_by_period(&three_days(), &WindowSpec::recent_days(0));
        assert_eq!(filtered.day_count(), 1);
        assert_eq!(filtered.first_day(), Some(d("2025-08-14")));
    }

    #[test]
    fn test_recent_days_inclusive() {
        let filtered = filter_by_period(&three_days(), &WindowSpec::recent_days(1));
        assert_eq!(filtered.day_count(), 2);
        assert_eq!(filtered.first_day(), Some(d("2025-08-13")));
    }

    #[test]
    fn test_recent_days_explicit_anchor() {
        let spec = WindowSpec::RecentDays {
            days: 0,
            anchor: Some(d("2025-08-12")),
        };
        let filtered = filter_by_period(&three_days(), &spec);
        assert_eq!(filtered.messages().next().unwrap().content(), "first");
    }

    #[test]
    fn test_recent_days_empty_store() {
        let filtered = filter_by_period(&DailyChatStore::new(), &WindowSpec::recent_days(14));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_range_with_buffer_moves_start_only() {
        let spec = WindowSpec::Range {
            start: d("2025-08-13"),
            end: d("2025-08-13"),
            buffer_days: 1,
        };
        let filtered = filter_by_period(&three_days(), &spec);
        assert_eq!(filtered.day_count(), 2);
        assert_eq!(filtered.last_day(), Some(d("2025-08-13")));
    }

    #[test]
    fn test_bounds_saturate() {
        let spec = WindowSpec::RecentDays {
            days: u32::MAX,
            anchor: Some(d("2025-08-14")),
        };
        let (from, _) = spec.bounds(&DailyChatStore::new()).unwrap();
        assert_eq!(from, NaiveDate::MIN);
    }

    #[test]
    fn test_request_defaults() {
        let spec = WindowRequest::new().resolve().unwrap();
        assert_eq!(
            spec,
            WindowSpec::RecentDays {
                days: DEFAULT_RECENT_DAYS,
                anchor: None
            }
        );

        let spec = WindowRequest::new()
            .with_range(d("2025-08-01"), d("2025-08-02"))
            .resolve()
            .unwrap();
        assert_eq!(
            spec,
            WindowSpec::Range {
                start: d("2025-08-01"),
                end: d("2025-08-02"),
                buffer_days: DEFAULT_BUFFER_DAYS
            }
        );
    }

    #[test]
    fn test_request_rejects_half_range() {
        let only_end = WindowRequest::new().with_end(d("2025-08-01")).resolve();
        assert!(only_end.unwrap_err().is_invalid_window());

        let only_start = WindowRequest::new().with_days(3).with_start(d("2025-08-01")).resolve();
        assert!(only_start.unwrap_err().is_invalid_window());
    }

    #[test]
    fn test_request_rejects_reversed_range() {
        let err = WindowRequest::new()
            .with_range(d("2025-08-10"), d("2025-08-01"))
            .resolve()
            .unwrap_err();
        assert!(err.is_invalid_window());
    }

    #[test]
    fn test_filter_by_sender() {
        let store = three_days();
        let minji = filter_by_sender(&store, "민");
        assert_eq!(minji.day_count(), 2);
        assert!(minji.messages().all(|m| m.sender() == Some("민지")));

        assert!(filter_by_sender(&store, "nobody").is_empty());
        // continuation lines never match, even on an empty pattern
        assert_eq!(filter_by_sender(&store, "").message_count(), 3);
    }

    #[test]
    fn test_filters_do_not_mutate_source() {
        let store = three_days();
        let _ = filter_by_period(&store, &WindowSpec::recent_days(0));
        let _ = filter_by_sender(&store, "지훈");
        assert_eq!(store, three_days());
    }

    #[test]
    fn test_window_spec_serde() {
        let json = serde_json::to_string(&WindowSpec::recent_days(3)).unwrap();
        assert_eq!(json, r#"{"mode":"recent_days","days":3,"anchor":null}"#);
    }
}
