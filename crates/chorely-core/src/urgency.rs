//! Urgency scheduling for recurring chores.
//!
//! Pure functions of a chore and a caller-supplied `now`. Nothing here reads
//! the wall clock.
//!
//! The "due soon" window widens with the recurrence interval so that a
//! yearly chore is not flagged every few days:
//!
//! | interval (days) | due-soon window (days) |
//! |-----------------|------------------------|
//! | <= 6            | 1                      |
//! | 7-29            | 3                      |
//! | 30-180          | 5                      |
//! | > 180           | 10                     |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chore::{Chore, ChoreRepository};

const SECONDS_PER_DAY: i64 = 86_400;

/// Sort key given to chores that have never been completed.
pub const NEVER_DONE_SORT_KEY: i64 = i64::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyState {
    OnTrack,
    DueSoon,
    Overdue,
    NeverDone,
}

impl UrgencyState {
    /// Short fixed-width badge for text listings.
    pub fn badge(self) -> &'static str {
        match self {
            UrgencyState::Overdue => "[!!]",
            UrgencyState::DueSoon => "[! ]",
            UrgencyState::OnTrack => "[ok]",
            UrgencyState::NeverDone => "[--]",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Urgency {
    pub state: UrgencyState,
    /// Whole days since the last completion; `None` if never done.
    pub days_since: Option<i64>,
    /// `frequency_days - days_since`; negative once overdue.
    pub due_in: Option<i64>,
    /// Larger sorts first.
    pub sort_key: i64,
}

/// Days before the due date at which a chore turns "due soon".
pub fn due_soon_window(frequency_days: u32) -> i64 {
    match frequency_days {
        0..=6 => 1,
        7..=29 => 3,
        30..=180 => 5,
        _ => 10,
    }
}

/// Whole days elapsed from `from` to `to`, rounded down.
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Classify a chore relative to `now`.
pub fn urgency(chore: &Chore, now: DateTime<Utc>) -> Urgency {
    let Some(last_done) = chore.last_done else {
        return Urgency {
            state: UrgencyState::NeverDone,
            days_since: None,
            due_in: None,
            sort_key: NEVER_DONE_SORT_KEY,
        };
    };

    let frequency = i64::from(chore.frequency_days);
    let days_since = whole_days_between(last_done, now);
    let due_in = frequency - days_since;

    let state = if days_since > frequency {
        UrgencyState::Overdue
    } else if due_in <= due_soon_window(chore.frequency_days) {
        UrgencyState::DueSoon
    } else {
        UrgencyState::OnTrack
    };

    Urgency {
        state,
        days_since: Some(days_since),
        due_in: Some(due_in),
        sort_key: days_since - frequency,
    }
}

/// A chore paired with its urgency at a given instant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankedChore<'a> {
    pub chore: &'a Chore,
    pub urgency: Urgency,
}

/// Most urgent first. Equal keys keep their input order.
pub fn rank<'a, I>(chores: I, now: DateTime<Utc>) -> Vec<RankedChore<'a>>
where
    I: IntoIterator<Item = &'a Chore>,
{
    let mut ranked: Vec<RankedChore<'a>> = chores
        .into_iter()
        .map(|chore| RankedChore {
            chore,
            urgency: urgency(chore, now),
        })
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.urgency.sort_key.cmp(&a.urgency.sort_key));
    ranked
}

/// One area of the board.
#[derive(Debug, Clone, Serialize)]
pub struct AreaGroup<'a> {
    pub area: String,
    pub chores: Vec<RankedChore<'a>>,
}

/// Chores partitioned by area, each area ranked independently.
pub fn board(repo: &ChoreRepository, now: DateTime<Utc>) -> Vec<AreaGroup<'_>> {
    repo.list_by_area()
        .into_iter()
        .map(|(area, chores)| AreaGroup {
            area,
            chores: rank(chores, now),
        })
        .collect()
}
