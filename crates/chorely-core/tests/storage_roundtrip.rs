//! Integration tests for JSON persistence and sessions.

use chorely_core::ledger;
use chorely_core::{
    Chore, Collection, CollectionStore, Correction, JsonStore, Session, UrgencyState,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 18, 30, 0).unwrap()
}

#[test]
fn save_then_load_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::at(dir.path()).unwrap();
    let mut session = Session::open(store.clone());

    session.add_person("Alice").unwrap();
    session.add_person("Bjørn").unwrap();
    session
        .create_chore(
            Chore::new("Vacuum")
                .with_area("Living room")
                .with_tags(["floor", "weekly"])
                .with_checklist(["move chairs", "empty bag"]),
        )
        .unwrap();
    session
        .create_chore(Chore::new("Oven").with_area("Kitchen").with_frequency_days(90))
        .unwrap();
    session.complete_chore("Vacuum", "Bjørn", now()).unwrap();

    let reloaded = Session::open(JsonStore::at(dir.path()).unwrap());
    assert_eq!(reloaded.household(), session.household());
    assert!(reloaded
        .household()
        .chores()
        .find_by_name("Oven")
        .unwrap()
        .last_done
        .is_none());
    assert_eq!(store.load_people().points("Bjørn"), Some(1));
}

#[test]
fn corrections_and_deletions_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::open(JsonStore::at(dir.path()).unwrap());
    session.add_person("Alice").unwrap();
    session.add_person("Bob").unwrap();
    session
        .create_chore(Chore::new("Dishes").with_points(2))
        .unwrap();
    session.complete_chore("Dishes", "Alice", now()).unwrap();
    session
        .complete_chore("Dishes", "Alice", now() + Duration::days(1))
        .unwrap();

    session
        .correct_history_entry(
            1,
            &Correction {
                person: Some("Bob".into()),
                ..Default::default()
            },
        )
        .unwrap();
    session.delete_history_entry(0).unwrap();

    let reloaded = Session::open(JsonStore::at(dir.path()).unwrap());
    let h = reloaded.household();
    assert_eq!(h.people().points("Alice"), Some(0));
    assert_eq!(h.people().points("Bob"), Some(2));
    assert_eq!(h.history().len(), 1);
    assert!(ledger::audit(h).is_empty());
}

#[test]
fn reads_files_written_by_the_legacy_app() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("chores.json"),
        r#"[
  {
    "name": "Støvsug",
    "frequency_days": 7,
    "points": 2,
    "est_time_min": 20,
    "area": "Stue",
    "tags": ["gulv"],
    "checklist": [],
    "last_done": "2024-08-20T09:12:44.512331"
  },
  {
    "name": "Ovn",
    "frequency_days": 90,
    "points": 5,
    "est_time_min": 45,
    "area": "Køkken",
    "tags": [],
    "checklist": ["afkalk"],
    "last_done": null
  }
]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("people.json"),
        r#"{"Mette": {"points": 2}, "Lars": {"points": 0}}"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("history.json"),
        r#"[{"person": "Mette", "chore": "Støvsug", "points": 2, "timestamp": "2024-08-20T09:12:44.512331"}]"#,
    )
    .unwrap();

    let session = Session::open(JsonStore::at(dir.path()).unwrap());
    let board = session.board(now());
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].area, "Stue");
    assert_eq!(board[0].chores[0].urgency.state, UrgencyState::Overdue);
    assert_eq!(board[1].chores[0].urgency.state, UrgencyState::NeverDone);
    assert!(ledger::audit(session.household()).is_empty());
}

#[test]
fn corrupted_history_does_not_block_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::at(dir.path()).unwrap();
    std::fs::write(store.path_for(Collection::People), r#"{"Alice": {"points": 3}}"#).unwrap();
    std::fs::write(store.path_for(Collection::History), "{{ not json").unwrap();

    let mut session = Session::open(store);
    assert!(session.household().history().is_empty());

    let fixed = session.rebalance().unwrap();
    assert_eq!(fixed.len(), 1);
    assert_eq!(session.household().people().points("Alice"), Some(0));
    assert!(dir.path().join("history.json.corrupt").exists());
}
