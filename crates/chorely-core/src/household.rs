//! Application state: the three sibling collections.
//!
//! Nothing here is global. Engines take a `&mut Household`, which keeps them
//! testable against hand-built fixtures.

use tracing::info;

use crate::chore::ChoreRepository;
use crate::error::{CoreError, RecordKind, Result};
use crate::history::History;
use crate::person::{People, Person};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Household {
    pub(crate) chores: ChoreRepository,
    pub(crate) people: People,
    pub(crate) history: History,
}

impl Household {
    /// Assemble state from loaded collections.
    ///
    /// Point totals are taken as given; use [`crate::ledger::audit`] to check
    /// them against history.
    pub fn new(chores: ChoreRepository, people: People, history: History) -> Self {
        Self {
            chores,
            people,
            history,
        }
    }

    pub fn chores(&self) -> &ChoreRepository {
        &self.chores
    }

    /// Chore CRUD does not touch points, so the repository is exposed directly.
    pub fn chores_mut(&mut self) -> &mut ChoreRepository {
        &mut self.chores
    }

    pub fn people(&self) -> &People {
        &self.people
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn add_person(&mut self, name: &str) -> Result<Person> {
        let person = self.people.insert(name)?;
        info!("Person added: {}", person.name);
        Ok(person)
    }

    /// Remove a member who has no history entries left.
    ///
    /// # Errors
    /// `NotFound` for an unknown name; `InvalidInput` while history entries
    /// are still attributed to the person.
    pub fn remove_person(&mut self, name: &str) -> Result<Person> {
        if !self.people.contains(name) {
            return Err(CoreError::not_found(RecordKind::Person, name));
        }
        if self.history.mentions_person(name) {
            return Err(CoreError::invalid(
                "person",
                format!("'{name}' still has history entries; reassign or delete them first"),
            ));
        }
        let person = self
            .people
            .remove(name)
            .ok_or_else(|| CoreError::not_found(RecordKind::Person, name))?;
        info!("Person removed: {}", name);
        Ok(person)
    }
}
