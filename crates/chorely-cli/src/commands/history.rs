//! History inspection and correction.

use chorely_core::Correction;
use chrono::Local;
use clap::Subcommand;
use serde::Serialize;

use super::{open_session, print_json, CmdResult};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List history entries, oldest first
    List {
        /// Only entries credited to this person
        #[arg(long)]
        person: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Correct an entry; points move with it
    Edit {
        /// Entry index as shown by `history list`
        index: usize,
        #[arg(long)]
        person: Option<String>,
        #[arg(long)]
        chore: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        points: Option<i64>,
    },
    /// Delete an entry and take back its points
    Rm { index: usize },
}

#[derive(Serialize)]
struct IndexedEntry<'a> {
    index: usize,
    #[serde(flatten)]
    entry: &'a chorely_core::HistoryEntry,
}

pub fn run(action: HistoryAction) -> CmdResult {
    match action {
        HistoryAction::List { person, json } => {
            let session = open_session()?;
            let entries: Vec<IndexedEntry> = session
                .household()
                .history()
                .iter()
                .enumerate()
                .filter(|(_, e)| person.as_deref().map_or(true, |p| e.person == p))
                .map(|(index, entry)| IndexedEntry { index, entry })
                .collect();

            if json {
                return print_json(&entries);
            }
            if entries.is_empty() {
                println!("No history.");
                return Ok(());
            }
            for IndexedEntry { index, entry } in &entries {
                println!(
                    "{index:>4}  {}  {:<12} {:<24} {:>+4}",
                    entry.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    entry.person,
                    entry.chore,
                    entry.points
                );
            }
        }
        HistoryAction::Edit {
            index,
            person,
            chore,
            points,
        } => {
            let changes = Correction {
                person,
                chore,
                points,
            };
            if changes.is_empty() {
                return Err("nothing to change; pass --person, --chore or --points".into());
            }
            let mut session = open_session()?;
            let entry = session.correct_history_entry(index, &changes)?;
            println!(
                "Entry {index} updated: {} / {} / {} points",
                entry.person, entry.chore, entry.points
            );
        }
        HistoryAction::Rm { index } => {
            let mut session = open_session()?;
            let entry = session.delete_history_entry(index)?;
            println!(
                "Entry {index} deleted: {} / {} ({} points taken back)",
                entry.person, entry.chore, entry.points
            );
        }
    }
    Ok(())
}
