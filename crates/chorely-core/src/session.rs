//! One household session bound to a store.
//!
//! Every mutation follows the same cycle: apply the operation to a working
//! copy, write each collection it touched, then commit the copy. A failed
//! precondition or a failed write leaves the session's state untouched, and
//! a failed write also restores the collections already written for that
//! operation.
//!
//! Sessions do not merge. Two processes sharing one store each write whole
//! collections, and the last write wins.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::chore::Chore;
use crate::error::{PersistenceError, Result};
use crate::history::HistoryEntry;
use crate::household::Household;
use crate::ledger::{self, Completion, Correction, Discrepancy};
use crate::person::Person;
use crate::storage::{Collection, CollectionStore};
use crate::urgency::{self, AreaGroup};

/// Which collections an operation changes, in write order.
///
/// History is written before people, so a write that fails part way never
/// leaves credited points without their history entry.
#[derive(Debug, Clone, Copy)]
struct Touched(&'static [Collection]);

const CHORES: Touched = Touched(&[Collection::Chores]);
const PEOPLE: Touched = Touched(&[Collection::People]);
const LEDGER: Touched = Touched(&[Collection::History, Collection::People]);
const ALL: Touched = Touched(&[Collection::Chores, Collection::History, Collection::People]);

pub struct Session<S: CollectionStore> {
    store: S,
    household: Household,
}

impl<S: CollectionStore> Session<S> {
    /// Load all three collections from `store`.
    pub fn open(store: S) -> Self {
        let household = Household::new(store.load_chores(), store.load_people(), store.load_history());
        debug!(
            "Session opened: {} chores, {} people, {} history entries",
            household.chores().len(),
            household.people().len(),
            household.history().len()
        );
        Self { store, household }
    }

    pub fn household(&self) -> &Household {
        &self.household
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Chores grouped by area and ranked by urgency at `now`.
    pub fn board(&self, now: DateTime<Utc>) -> Vec<AreaGroup<'_>> {
        urgency::board(self.household.chores(), now)
    }

    fn apply<T>(
        &mut self,
        touched: Touched,
        op: impl FnOnce(&mut Household) -> Result<T>,
    ) -> Result<T> {
        let mut working = self.household.clone();
        let out = op(&mut working)?;
        for (i, &collection) in touched.0.iter().enumerate() {
            if let Err(err) = self.save(collection, &working) {
                self.restore(&touched.0[..i]);
                return Err(err.into());
            }
        }
        self.household = working;
        Ok(out)
    }

    fn save(&self, collection: Collection, household: &Household) -> Result<(), PersistenceError> {
        match collection {
            Collection::Chores => self.store.save_chores(household.chores()),
            Collection::People => self.store.save_people(household.people()),
            Collection::History => self.store.save_history(household.history()),
        }
    }

    /// Rewrite `written` from the committed household.
    fn restore(&self, written: &[Collection]) {
        for &collection in written {
            if let Err(err) = self.save(collection, &self.household) {
                warn!("Cannot restore {} collection after a failed write: {}", collection, err);
            }
        }
    }

    pub fn complete_chore(
        &mut self,
        chore: &str,
        person: &str,
        now: DateTime<Utc>,
    ) -> Result<Completion> {
        self.apply(ALL, |h| ledger::complete_chore(h, chore, person, now))
    }

    pub fn correct_history_entry(
        &mut self,
        index: usize,
        changes: &Correction,
    ) -> Result<HistoryEntry> {
        self.apply(LEDGER, |h| ledger::correct_history_entry(h, index, changes))
    }

    pub fn delete_history_entry(&mut self, index: usize) -> Result<HistoryEntry> {
        self.apply(LEDGER, |h| ledger::delete_history_entry(h, index))
    }

    pub fn rebalance(&mut self) -> Result<Vec<Discrepancy>> {
        self.apply(PEOPLE, |h| Ok(ledger::rebalance(h)))
    }

    pub fn create_chore(&mut self, chore: Chore) -> Result<Chore> {
        self.apply(CHORES, |h| h.chores_mut().create(chore).cloned())
    }

    pub fn update_chore(&mut self, name: &str, chore: Chore) -> Result<Chore> {
        self.apply(CHORES, |h| h.chores_mut().update(name, chore).cloned())
    }

    pub fn delete_chore(&mut self, name: &str) -> Result<Chore> {
        self.apply(CHORES, |h| h.chores_mut().delete(name))
    }

    pub fn add_person(&mut self, name: &str) -> Result<Person> {
        self.apply(PEOPLE, |h| h.add_person(name))
    }

    pub fn remove_person(&mut self, name: &str) -> Result<Person> {
        self.apply(PEOPLE, |h| h.remove_person(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn session() -> Session<MemoryStore> {
        let mut s = Session::open(MemoryStore::new());
        s.add_person("Alice").unwrap();
        s.create_chore(Chore::new("Dishes").with_points(3)).unwrap();
        s
    }

    #[test]
    fn completion_persists_all_three_collections() {
        let mut s = session();
        s.complete_chore("Dishes", "Alice", now()).unwrap();

        let reopened = Session::open(MemoryStore::new()
            .with_raw(Collection::Chores, s.store().raw(Collection::Chores).unwrap())
            .with_raw(Collection::People, s.store().raw(Collection::People).unwrap())
            .with_raw(Collection::History, s.store().raw(Collection::History).unwrap()));
        assert_eq!(reopened.household(), s.household());
    }

    #[test]
    fn failed_write_leaves_state_unchanged() {
        let mut s = session();
        let before = s.household().clone();
        s.store().set_fail_writes(true);

        let err = s.complete_chore("Dishes", "Alice", now()).unwrap_err();
        assert!(matches!(err, CoreError::Persistence(_)));
        assert_eq!(s.household(), &before);
    }

    /// Fails every write to one collection.
    struct FailingOn {
        inner: MemoryStore,
        collection: Collection,
    }

    impl CollectionStore for FailingOn {
        fn read_raw(&self, collection: Collection) -> std::io::Result<Option<String>> {
            self.inner.read_raw(collection)
        }

        fn write_raw(&self, collection: Collection, content: &str) -> Result<(), PersistenceError> {
            if collection == self.collection {
                return Err(PersistenceError::Write {
                    path: collection.file_name().into(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                });
            }
            self.inner.write_raw(collection, content)
        }
    }

    fn seeded(failing: Collection) -> Session<FailingOn> {
        let seed = session();
        let inner = MemoryStore::new();
        for collection in Collection::ALL {
            if let Some(raw) = seed.store().raw(collection) {
                inner.write_raw(collection, &raw).unwrap();
            }
        }
        Session::open(FailingOn {
            inner,
            collection: failing,
        })
    }

    fn reopened(s: &Session<FailingOn>) -> Session<MemoryStore> {
        let copy = MemoryStore::new();
        for collection in Collection::ALL {
            if let Some(raw) = s.store().inner.raw(collection) {
                copy.write_raw(collection, &raw).unwrap();
            }
        }
        Session::open(copy)
    }

    #[test]
    fn failed_history_write_leaves_no_partial_award_on_disk() {
        let mut s = seeded(Collection::History);
        assert!(s.complete_chore("Dishes", "Alice", now()).is_err());

        let disk = reopened(&s);
        let h = disk.household();
        assert_eq!(h.people().points("Alice"), Some(0));
        assert!(h.history().is_empty());
        assert!(h.chores().find_by_name("Dishes").unwrap().last_done.is_none());
        assert!(ledger::audit(h).is_empty());
    }

    #[test]
    fn failed_people_write_restores_history_on_disk() {
        let mut s = seeded(Collection::People);
        assert!(s.complete_chore("Dishes", "Alice", now()).is_err());

        let disk = reopened(&s);
        assert!(disk.household().history().is_empty());
        assert!(ledger::audit(disk.household()).is_empty());
        assert_eq!(disk.household(), s.household());
    }

    #[test]
    fn rejected_operation_writes_nothing() {
        let mut s = session();
        let people_before = s.store().raw(Collection::People);
        assert!(s.complete_chore("Dishes", "Mallory", now()).is_err());
        assert_eq!(s.store().raw(Collection::People), people_before);
        assert!(s.household().history().is_empty());
    }
}
