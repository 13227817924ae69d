//! In-memory chore collection keyed by name.
//!
//! Insertion order is preserved; it is the tie-breaker for urgency ordering
//! and decides the order in which areas are listed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::Chore;
use crate::error::{CoreError, RecordKind, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoreRepository {
    chores: Vec<Chore>,
}

impl ChoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from stored records.
    ///
    /// Records that fail validation or repeat an earlier name are dropped,
    /// so a damaged file still yields a usable collection.
    pub fn from_records(records: Vec<Chore>) -> Self {
        let mut repo = Self::new();
        for mut chore in records {
            chore.normalize();
            if let Err(err) = chore.validate() {
                warn!("Dropping stored chore '{}': {}", chore.name, err);
                continue;
            }
            if repo.find_by_name(&chore.name).is_some() {
                warn!("Dropping duplicate stored chore '{}'", chore.name);
                continue;
            }
            repo.chores.push(chore);
        }
        repo
    }

    /// Add a new chore.
    ///
    /// # Errors
    /// `DuplicateName` when the name is taken, `InvalidInput` when the chore
    /// fails validation. The repository is unchanged on error.
    pub fn create(&mut self, mut chore: Chore) -> Result<&Chore> {
        chore.normalize();
        chore.validate()?;
        if self.find_by_name(&chore.name).is_some() {
            return Err(CoreError::DuplicateName(chore.name));
        }
        info!("Chore created: {}", chore.name);
        self.chores.push(chore);
        Ok(&self.chores[self.chores.len() - 1])
    }

    /// Replace the chore called `name`, keeping its position.
    ///
    /// A rename is allowed as long as the new name is free. History entries
    /// that mention the old name are left alone.
    pub fn update(&mut self, name: &str, mut chore: Chore) -> Result<&Chore> {
        let index = self
            .position(name)
            .ok_or_else(|| CoreError::not_found(RecordKind::Chore, name))?;
        chore.normalize();
        chore.validate()?;
        if chore.name != name && self.find_by_name(&chore.name).is_some() {
            return Err(CoreError::DuplicateName(chore.name));
        }
        if chore.name != name {
            info!("Chore renamed: {} -> {}", name, chore.name);
        } else {
            info!("Chore updated: {}", name);
        }
        self.chores[index] = chore;
        Ok(&self.chores[index])
    }

    /// Remove the chore called `name` and return it.
    pub fn delete(&mut self, name: &str) -> Result<Chore> {
        let index = self
            .position(name)
            .ok_or_else(|| CoreError::not_found(RecordKind::Chore, name))?;
        info!("Chore deleted: {}", name);
        Ok(self.chores.remove(index))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Chore> {
        self.chores.iter().find(|c| c.name == name)
    }

    pub(crate) fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Chore> {
        self.chores.iter_mut().find(|c| c.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.chores.iter().position(|c| c.name == name)
    }

    /// Chores grouped by area; areas and chores keep insertion order.
    pub fn list_by_area(&self) -> IndexMap<String, Vec<&Chore>> {
        let mut groups: IndexMap<String, Vec<&Chore>> = IndexMap::new();
        for chore in &self.chores {
            groups.entry(chore.area.clone()).or_default().push(chore);
        }
        groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chore> {
        self.chores.iter()
    }

    pub fn as_slice(&self) -> &[Chore] {
        &self.chores
    }

    pub fn len(&self) -> usize {
        self.chores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chores.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChoreRepository {
    type Item = &'a Chore;
    type IntoIter = std::slice::Iter<'a, Chore>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
