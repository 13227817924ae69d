//! Household members and their point totals.
//!
//! Stored as a JSON object keyed by name (`{"Alice": {"points": 10}}`).
//! Key order is kept so listings match the order people were added.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub name: String,
    /// Must equal the sum of this person's history entries.
    pub points: i64,
}

/// On-disk value for one person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(default)]
    pub points: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct People {
    members: IndexMap<String, PersonRecord>,
}

impl People {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(members: IndexMap<String, PersonRecord>) -> Self {
        Self { members }
    }

    pub fn get(&self, name: &str) -> Option<Person> {
        self.members.get(name).map(|record| Person {
            name: name.to_string(),
            points: record.points,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn points(&self, name: &str) -> Option<i64> {
        self.members.get(name).map(|record| record.points)
    }

    pub fn iter(&self) -> impl Iterator<Item = Person> + '_ {
        self.members.iter().map(|(name, record)| Person {
            name: name.clone(),
            points: record.points,
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Register a new member with zero points.
    pub(crate) fn insert(&mut self, name: &str) -> Result<Person> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::invalid("name", "person name cannot be empty"));
        }
        if self.contains(name) {
            return Err(CoreError::DuplicateName(name.to_string()));
        }
        self.members.insert(name.to_string(), PersonRecord::default());
        Ok(Person {
            name: name.to_string(),
            points: 0,
        })
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Person> {
        self.members.shift_remove(name).map(|record| Person {
            name: name.to_string(),
            points: record.points,
        })
    }

    /// Overwrite a member's total. Returns false if the member is unknown.
    pub(crate) fn set_points(&mut self, name: &str, points: i64) -> bool {
        match self.members.get_mut(name) {
            Some(record) => {
                record.points = points;
                true
            }
            None => false,
        }
    }
}
