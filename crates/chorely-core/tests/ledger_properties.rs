//! Property tests for the ledger invariant and urgency ordering.

use chorely_core::ledger::{self, Correction};
use chorely_core::urgency::rank;
use chorely_core::{urgency, Chore, Household, UrgencyState};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

const PEOPLE: [&str; 3] = ["Alice", "Bob", "Carol"];
const CHORES: [(&str, u32); 3] = [("Dishes", 1), ("Vacuum", 4), ("Windows", 10)];

#[derive(Debug, Clone)]
enum Op {
    Complete { chore: usize, person: usize },
    Correct { entry: usize, person: Option<usize>, points: Option<i64> },
    Delete { entry: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..CHORES.len(), 0..PEOPLE.len() + 1)
            .prop_map(|(chore, person)| Op::Complete { chore, person }),
        (0..8usize, proptest::option::of(0..PEOPLE.len() + 1), proptest::option::of(-20i64..20))
            .prop_map(|(entry, person, points)| Op::Correct { entry, person, points }),
        (0..8usize).prop_map(|entry| Op::Delete { entry }),
    ]
}

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 7, 0, 0).unwrap()
}

// Index PEOPLE.len() names someone who does not exist.
fn person_name(i: usize) -> &'static str {
    PEOPLE.get(i).copied().unwrap_or("Mallory")
}

fn household() -> Household {
    let mut h = Household::default();
    for name in PEOPLE {
        h.add_person(name).unwrap();
    }
    for (name, points) in CHORES {
        h.chores_mut()
            .create(Chore::new(name).with_points(points))
            .unwrap();
    }
    h
}

proptest! {
    #[test]
    fn points_always_match_history(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut h = household();
        for (step, op) in ops.into_iter().enumerate() {
            let before = h.clone();
            let result = match op {
                Op::Complete { chore, person } => ledger::complete_chore(
                    &mut h,
                    CHORES[chore].0,
                    person_name(person),
                    base() + Duration::hours(step as i64),
                )
                .map(|_| ()),
                Op::Correct { entry, person, points } => {
                    let changes = Correction {
                        person: person.map(|p| person_name(p).to_string()),
                        chore: None,
                        points,
                    };
                    ledger::correct_history_entry(&mut h, entry, &changes).map(|_| ())
                }
                Op::Delete { entry } => ledger::delete_history_entry(&mut h, entry).map(|_| ()),
            };

            if result.is_err() {
                prop_assert_eq!(&h, &before);
            }
            prop_assert!(ledger::audit(&h).is_empty());
            for name in PEOPLE {
                prop_assert_eq!(h.people().points(name), Some(h.history().total_for(name)));
            }
        }
    }

    #[test]
    fn never_done_regardless_of_frequency(frequency in 1u32..1000) {
        let chore = Chore::new("x").with_frequency_days(frequency);
        prop_assert_eq!(urgency(&chore, base()).state, UrgencyState::NeverDone);
    }

    #[test]
    fn overdue_exactly_when_past_frequency(frequency in 1u32..400, days in 0i64..800) {
        let chore = Chore::new("x")
            .with_frequency_days(frequency)
            .with_last_done(Some(base() - Duration::days(days)));
        let u = urgency(&chore, base());
        prop_assert_eq!(u.state == UrgencyState::Overdue, days > i64::from(frequency));
        if days == i64::from(frequency) {
            prop_assert_eq!(u.state, UrgencyState::DueSoon);
        }
    }

    #[test]
    fn ranking_twice_gives_the_same_order(
        shapes in proptest::collection::vec((1u32..60, proptest::option::of(0i64..90)), 0..20)
    ) {
        let chores: Vec<Chore> = shapes
            .iter()
            .enumerate()
            .map(|(i, (frequency, days))| {
                Chore::new(format!("chore-{i}"))
                    .with_frequency_days(*frequency)
                    .with_last_done(days.map(|d| base() - Duration::days(d)))
            })
            .collect();

        let once: Vec<Chore> = rank(&chores, base()).into_iter().map(|r| r.chore.clone()).collect();
        let twice: Vec<Chore> = rank(&once, base()).into_iter().map(|r| r.chore.clone()).collect();
        prop_assert_eq!(once, twice);
    }
}
