//! Chore definitions.
//!
//! A chore is identified by its name alone. History entries copy the name at
//! completion time, so renaming or deleting a chore never rewrites history.

pub mod frequency;
pub mod repository;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

pub use frequency::FrequencyPreset;
pub use repository::ChoreRepository;

/// Area used when a record or request does not name one.
pub const DEFAULT_AREA: &str = "Other";

fn default_area() -> String {
    DEFAULT_AREA.to_string()
}
fn default_frequency_days() -> u32 {
    7
}
fn default_points() -> u32 {
    1
}
fn default_est_time_min() -> u32 {
    10
}

/// A recurring household task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
    pub name: String,
    /// Recurrence interval, at least 1.
    #[serde(default = "default_frequency_days")]
    pub frequency_days: u32,
    /// Reward credited to whoever completes the chore.
    #[serde(default = "default_points")]
    pub points: u32,
    /// Informational only.
    #[serde(default = "default_est_time_min")]
    pub est_time_min: u32,
    #[serde(default = "default_area")]
    pub area: String,
    #[serde(default)]
    pub tags: IndexSet<String>,
    #[serde(default)]
    pub checklist: Vec<String>,
    /// `None` until the first completion.
    #[serde(default, with = "crate::timestamp::option")]
    pub last_done: Option<DateTime<Utc>>,
}

impl Chore {
    /// Create a never-done chore with the default interval, reward and area.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frequency_days: default_frequency_days(),
            points: default_points(),
            est_time_min: default_est_time_min(),
            area: default_area(),
            tags: IndexSet::new(),
            checklist: Vec::new(),
            last_done: None,
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = area.into();
        self
    }

    pub fn with_frequency_days(mut self, days: u32) -> Self {
        self.frequency_days = days;
        self
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    pub fn with_est_time_min(mut self, minutes: u32) -> Self {
        self.est_time_min = minutes;
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_checklist<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.checklist = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_last_done(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.last_done = at;
        self
    }

    /// Trim text fields and drop empty tags and blank checklist lines.
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.area = self.area.trim().to_string();
        self.tags = self
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        self.checklist = self
            .checklist
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
    }

    /// Check the invariants every stored chore must satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::invalid("name", "chore name cannot be empty"));
        }
        if self.frequency_days == 0 {
            return Err(CoreError::invalid(
                "frequency_days",
                "recurrence interval must be at least 1 day",
            ));
        }
        if self.area.trim().is_empty() {
            return Err(CoreError::invalid("area", "area cannot be empty"));
        }
        Ok(())
    }
}
