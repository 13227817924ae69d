//! Point ledger.
//!
//! Every mutation path keeps one invariant: a person's `points` equals the
//! sum of `points` over the history entries attributed to them.
//!
//! Each operation checks all of its preconditions before changing anything,
//! so an `Err` leaves the household exactly as it was.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::chore::Chore;
use crate::error::{CoreError, RecordKind, Result};
use crate::history::HistoryEntry;
use crate::household::Household;
use crate::person::Person;

/// Everything `complete_chore` changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub chore: Chore,
    pub person: Person,
    pub entry: HistoryEntry,
    /// Position of `entry` in the history.
    pub index: usize,
}

/// Fields to change on a history entry. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correction {
    pub person: Option<String>,
    pub chore: Option<String>,
    pub points: Option<i64>,
}

impl Correction {
    pub fn is_empty(&self) -> bool {
        self.person.is_none() && self.chore.is_none() && self.points.is_none()
    }
}

/// A person whose recorded total disagrees with their history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    pub person: String,
    /// `None` when history names someone who is not in the people collection.
    pub recorded: Option<i64>,
    pub expected: i64,
}

impl Discrepancy {
    pub fn is_orphan(&self) -> bool {
        self.recorded.is_none()
    }
}

/// Mark a chore done by `person` at `now` and credit its points.
///
/// Sets `last_done`, adds the reward to the person, and appends a history
/// entry, all together.
///
/// # Errors
/// `NotFound` if either the chore or the person does not exist.
pub fn complete_chore(
    household: &mut Household,
    chore_name: &str,
    person: &str,
    now: DateTime<Utc>,
) -> Result<Completion> {
    let total = household
        .people
        .points(person)
        .ok_or_else(|| CoreError::not_found(RecordKind::Person, person))?;
    let points = household
        .chores
        .find_by_name(chore_name)
        .map(|chore| i64::from(chore.points))
        .ok_or_else(|| CoreError::not_found(RecordKind::Chore, chore_name))?;
    let total = total
        .checked_add(points)
        .ok_or_else(|| out_of_range(person))?;

    let chore = household
        .chores
        .find_by_name_mut(chore_name)
        .ok_or_else(|| CoreError::not_found(RecordKind::Chore, chore_name))?;
    chore.last_done = Some(now);
    let chore = chore.clone();

    household.people.set_points(person, total);
    let entry = HistoryEntry {
        person: person.to_string(),
        chore: chore.name.clone(),
        points,
        timestamp: now,
    };
    let index = household.history.push(entry.clone());

    let person = Person {
        name: person.to_string(),
        points: total,
    };
    info!(
        "Chore completed: {} by {} (+{} points, total {})",
        chore.name, person.name, points, person.points
    );

    Ok(Completion {
        chore,
        person,
        entry,
        index,
    })
}

/// Edit a history entry and rebalance points.
///
/// The old award is fully reversed from the entry's current person, then the
/// new award is fully applied to the (possibly different) new person. No
/// delta is ever computed across two people.
///
/// # Errors
/// `NotFound` for an unknown index or a target person that does not exist;
/// `InvalidInput` for a blank person or chore label, or when a point total
/// would leave the `i64` range.
pub fn correct_history_entry(
    household: &mut Household,
    index: usize,
    changes: &Correction,
) -> Result<HistoryEntry> {
    let current = household
        .history
        .get(index)
        .cloned()
        .ok_or_else(|| CoreError::not_found(RecordKind::HistoryEntry, format!("#{index}")))?;

    let new_person = match changes.person.as_deref().map(str::trim) {
        Some("") => {
            return Err(CoreError::invalid("person", "person name cannot be empty"));
        }
        Some(name) => name.to_string(),
        None => current.person.clone(),
    };
    if !household.people.contains(&new_person) {
        return Err(CoreError::not_found(RecordKind::Person, new_person));
    }
    let new_chore = match changes.chore.as_deref().map(str::trim) {
        Some("") => {
            return Err(CoreError::invalid("chore", "chore label cannot be empty"));
        }
        Some(label) => label.to_string(),
        None => current.chore.clone(),
    };
    let new_points = changes.points.unwrap_or(current.points);

    let reversed = reversed_total(household, &current)?;
    let base = if new_person == current.person {
        reversed
    } else {
        household.people.points(&new_person)
    };
    let awarded = base
        .ok_or_else(|| CoreError::not_found(RecordKind::Person, new_person.as_str()))?
        .checked_add(new_points)
        .ok_or_else(|| out_of_range(&new_person))?;

    settle_reversal(household, &current, reversed);
    household.people.set_points(&new_person, awarded);

    let updated = HistoryEntry {
        person: new_person,
        chore: new_chore,
        points: new_points,
        timestamp: current.timestamp,
    };
    if let Some(slot) = household.history.get_mut(index) {
        *slot = updated.clone();
    }
    info!(
        "History entry #{} corrected: {}/{}/{} -> {}/{}/{}",
        index,
        current.person,
        current.chore,
        current.points,
        updated.person,
        updated.chore,
        updated.points
    );
    Ok(updated)
}

/// Remove a history entry and take its points back.
///
/// The chore's `last_done` is not rolled back.
pub fn delete_history_entry(household: &mut Household, index: usize) -> Result<HistoryEntry> {
    let entry = household
        .history
        .get(index)
        .cloned()
        .ok_or_else(|| CoreError::not_found(RecordKind::HistoryEntry, format!("#{index}")))?;
    let reversed = reversed_total(household, &entry)?;

    household.history.remove(index);
    settle_reversal(household, &entry, reversed);
    info!(
        "History entry #{} deleted: {} {} ({} points)",
        index, entry.person, entry.chore, entry.points
    );
    Ok(entry)
}

fn out_of_range(person: &str) -> CoreError {
    CoreError::invalid("points", format!("point total for '{person}' is out of range"))
}

/// The entry person's total with the entry's award taken back, or `None`
/// when that person no longer exists.
fn reversed_total(household: &Household, entry: &HistoryEntry) -> Result<Option<i64>> {
    household
        .people
        .points(&entry.person)
        .map(|total| {
            total
                .checked_sub(entry.points)
                .ok_or_else(|| out_of_range(&entry.person))
        })
        .transpose()
}

fn settle_reversal(household: &mut Household, entry: &HistoryEntry, reversed: Option<i64>) {
    match reversed {
        Some(total) => {
            household.people.set_points(&entry.person, total);
        }
        None => warn!(
            "No person '{}' to reverse {} points from; skipping",
            entry.person, entry.points
        ),
    }
}

/// Compare every total against history without changing anything.
pub fn audit(household: &Household) -> Vec<Discrepancy> {
    let totals = household.history.totals();
    let mut found = Vec::new();

    for person in household.people.iter() {
        let expected = totals.get(person.name.as_str()).copied().unwrap_or(0);
        if person.points != expected {
            found.push(Discrepancy {
                person: person.name,
                recorded: Some(person.points),
                expected,
            });
        }
    }
    for (name, expected) in totals {
        if !household.people.contains(name) {
            found.push(Discrepancy {
                person: name.to_string(),
                recorded: None,
                expected,
            });
        }
    }
    found
}

/// Reset every known person's total to their history sum.
///
/// Returns what was wrong beforehand. Orphaned history (unknown people) is
/// reported but cannot be fixed here.
pub fn rebalance(household: &mut Household) -> Vec<Discrepancy> {
    let found = audit(household);
    for discrepancy in found.iter().filter(|d| !d.is_orphan()) {
        household
            .people
            .set_points(&discrepancy.person, discrepancy.expected);
        info!(
            "Rebalanced {}: {} -> {}",
            discrepancy.person,
            discrepancy.recorded.unwrap_or_default(),
            discrepancy.expected
        );
    }
    found
}
