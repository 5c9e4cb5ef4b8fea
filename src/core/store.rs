//! Per-day message store populated by every tokenizer.
//!
//! [`DailyChatStore`] maps a calendar date ([`DayKey`]) to the messages
//! sent that day, in the order they were read. Day buckets are always
//! iterated in chronological order, regardless of the order rows arrived in
//! (CSV exports may be out of order), and a message always lands in the
//! existing bucket for its date.
//!
//! Filters never mutate a store; they build a new one.
//!
//! ```
//! use chrono::NaiveDate;
//! use talkpack::Message;
//! use talkpack::core::DailyChatStore;
//!
//! let d1 = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
//! let d2 = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
//!
//! let mut store = DailyChatStore::new();
//! store.push(d2, Message::new("B", "오전 9:00", "later"));
//! store.push(d1, Message::new("A", "오전 9:00", "earlier"));
//! store.push(d2, Message::continuation("again"));
//!
//! assert_eq!(store.day_count(), 2);
//! assert_eq!(store.first_day(), Some(d1));
//! assert_eq!(store.messages_on(d2).len(), 2);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Message;

/// Calendar date used as a grouping key; carries no time of day.
pub type DayKey = NaiveDate;

/// Ordered mapping from [`DayKey`] to that day's messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyChatStore {
    days: BTreeMap<DayKey, Vec<Message>>,
}

impl DailyChatStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the bucket for `day`, creating it if absent.
    pub fn push(&mut self, day: DayKey, message: Message) {
        self.days.entry(day).or_default().push(message);
    }

    /// Returns `true` if the store holds no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of day buckets.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Number of messages across all days, continuation lines included.
    pub fn message_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Earliest day present.
    pub fn first_day(&self) -> Option<DayKey> {
        self.days.keys().next().copied()
    }

    /// Latest day present.
    pub fn last_day(&self) -> Option<DayKey> {
        self.days.keys().next_back().copied()
    }

    /// Messages on `day`, empty if the day has no bucket.
    pub fn messages_on(&self, day: DayKey) -> &[Message] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates days in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (DayKey, &[Message])> {
        self.days.iter().map(|(day, msgs)| (*day, msgs.as_slice()))
    }

    /// Iterates every message in chronological day order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.days.values().flatten()
    }

    /// Sorted, de-duplicated sender names. Continuation lines are ignored.
    pub fn participants(&self) -> Vec<String> {
        self.messages()
            .filter_map(Message::sender)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Builds a new store keeping only the days for which `keep` is true.
    #[must_use]
    pub fn retain_days(&self, mut keep: impl FnMut(DayKey) -> bool) -> Self {
        self.days
            .iter()
            .filter(|(day, _)| keep(**day))
            .map(|(day, msgs)| (*day, msgs.clone()))
            .collect()
    }

    /// Builds a new store keeping only messages for which `keep` is true.
    ///
    /// Days left without messages are dropped.
    #[must_use]
    pub fn retain_messages(&self, mut keep: impl FnMut(&Message) -> bool) -> Self {
        let mut out = Self::new();
        for (day, msgs) in &self.days {
            let kept: Vec<Message> = msgs.iter().filter(|m| keep(m)).cloned().collect();
            if !kept.is_empty() {
                out.days.insert(*day, kept);
            }
        }
        out
    }

    /// Builds a new store with `f` applied to every message's content.
    #[must_use]
    pub fn map_content(&self, mut f: impl FnMut(&str) -> String) -> Self {
        self.days
            .iter()
            .map(|(day, msgs)| {
                let mapped = msgs.iter().map(|m| m.with_content(f(&m.content))).collect();
                (*day, mapped)
            })
            .collect()
    }
}

impl FromIterator<(DayKey, Vec<Message>)> for DailyChatStore {
    fn from_iter<I: IntoIterator<Item = (DayKey, Vec<Message>)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (day, msgs) in iter {
            store.days.entry(day).or_default().extend(msgs);
        }
        store
    }
}

impl IntoIterator for DailyChatStore {
    type Item = (DayKey, Vec<Message>);
    type IntoIter = std::collections::btree_map::IntoIter<DayKey, Vec<Message>>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.into_iter()
    }
}
