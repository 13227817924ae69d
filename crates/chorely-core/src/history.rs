//! Completion history.
//!
//! Each entry is a point-in-time snapshot: `chore` is the chore's name when it
//! was completed, not a live reference, and stays as written when the chore is
//! later renamed or deleted. Entries are addressed by position.

use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub person: String,
    pub chore: String,
    pub points: i64,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut HistoryEntry> {
        self.entries.get_mut(index)
    }

    /// Append and return the new entry's index.
    pub(crate) fn push(&mut self, entry: HistoryEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<HistoryEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn mentions_person(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.person == name)
    }

    /// Sum of points attributed to each person, in first-seen order.
    /// Sums saturate at the `i64` bounds.
    pub fn totals(&self) -> IndexMap<&str, i64> {
        let mut totals: IndexMap<&str, i64> = IndexMap::new();
        for entry in &self.entries {
            let total = totals.entry(entry.person.as_str()).or_insert(0);
            *total = total.saturating_add(entry.points);
        }
        totals
    }

    pub fn total_for(&self, person: &str) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.person == person)
            .fold(0i64, |sum, e| sum.saturating_add(e.points))
    }

    /// The latest `limit` entries for `person`, newest first, with their indices.
    pub fn recent_for(&self, person: &str, limit: usize) -> Vec<(usize, &HistoryEntry)> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, e)| e.person == person)
            .take(limit)
            .collect()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// How long ago something happened, in calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Today,
    Yesterday,
    DaysAgo(i64),
}

impl RelativeDay {
    /// Compare calendar dates in `now`'s time zone.
    pub fn between<Tz: TimeZone>(at: DateTime<Utc>, now: &DateTime<Tz>) -> Self {
        let then = at.with_timezone(&now.timezone()).date_naive();
        match (now.date_naive() - then).num_days() {
            days if days <= 0 => RelativeDay::Today,
            1 => RelativeDay::Yesterday,
            days => RelativeDay::DaysAgo(days),
        }
    }
}

impl fmt::Display for RelativeDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeDay::Today => f.write_str("today"),
            RelativeDay::Yesterday => f.write_str("yesterday"),
            RelativeDay::DaysAgo(days) => write!(f, "{days} days ago"),
        }
    }
}
