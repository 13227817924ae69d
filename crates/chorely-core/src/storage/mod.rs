//! Persistence for the three household collections.
//!
//! Backends only move raw UTF-8 text in and out; decoding, defaults and
//! self-healing live in the provided methods of [`CollectionStore`] so every
//! backend behaves the same way.

mod config;
pub mod json_store;
pub mod memory;

pub use config::Config;
pub use json_store::JsonStore;
pub use memory::MemoryStore;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::chore::{Chore, ChoreRepository};
use crate::error::PersistenceError;
use crate::history::{History, HistoryEntry};
use crate::person::{People, PersonRecord};

/// Returns the directory holding data files and `config.toml`.
///
/// `CHORELY_DATA_DIR` wins when set. Otherwise `~/.config/chorely`, or
/// `~/.config/chorely-dev` with `CHORELY_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, PersistenceError> {
    let dir = match std::env::var_os("CHORELY_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CHORELY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("chorely-dev")
            } else {
                base_dir.join("chorely")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| PersistenceError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// The named collections a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Chores,
    People,
    History,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Chores, Collection::People, Collection::History];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Chores => "chores",
            Collection::People => "people",
            Collection::History => "history",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Chores => "chores.json",
            Collection::People => "people.json",
            Collection::History => "history.json",
        }
    }

    /// Empty value of the right shape: a mapping for people, a sequence otherwise.
    pub fn empty_value(self) -> Value {
        match self {
            Collection::People => Value::Object(serde_json::Map::new()),
            Collection::Chores | Collection::History => Value::Array(Vec::new()),
        }
    }

    fn shape_matches(self, value: &Value) -> bool {
        match self {
            Collection::People => value.is_object(),
            Collection::Chores | Collection::History => value.is_array(),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encode a collection in the on-disk text format: pretty JSON, two-space
/// indent, non-ASCII kept as-is.
pub fn encode<T: Serialize + ?Sized>(data: &T) -> Result<String, PersistenceError> {
    let mut text = serde_json::to_string_pretty(data)?;
    text.push('\n');
    Ok(text)
}

/// Storage backend for the household collections.
pub trait CollectionStore {
    /// Raw stored text, or `Ok(None)` if the collection was never written.
    fn read_raw(&self, collection: Collection) -> std::io::Result<Option<String>>;

    /// Replace the stored text of a collection.
    fn write_raw(&self, collection: Collection, content: &str) -> Result<(), PersistenceError>;

    /// Keep unreadable content somewhere before it gets replaced.
    fn quarantine(&self, _collection: Collection, _content: &str) {}

    /// Load a collection as JSON.
    ///
    /// Never fails. Absent or blank content is initialized with the empty
    /// default and written back. Malformed content is quarantined and
    /// replaced by the default in memory only; the next save overwrites it.
    fn load_value(&self, collection: Collection) -> Value {
        let raw = match self.read_raw(collection) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Cannot read {} collection, using empty default: {}", collection, err);
                return collection.empty_value();
            }
        };

        let content = match raw {
            Some(content) if !content.trim().is_empty() => content,
            _ => {
                debug!("Initializing empty {} collection", collection);
                let empty = collection.empty_value();
                if let Err(err) = encode(&empty).and_then(|text| self.write_raw(collection, &text)) {
                    warn!("Cannot initialize {} collection: {}", collection, err);
                }
                return empty;
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(value) if collection.shape_matches(&value) => {
                debug!("Loaded {} collection", collection);
                value
            }
            Ok(_) => {
                warn!("Stored {} collection has the wrong shape; starting empty", collection);
                self.quarantine(collection, &content);
                collection.empty_value()
            }
            Err(err) => {
                warn!("Stored {} collection is malformed ({}); starting empty", collection, err);
                self.quarantine(collection, &content);
                collection.empty_value()
            }
        }
    }

    fn load_chores(&self) -> ChoreRepository {
        let records = decode_records::<Chore>(Collection::Chores, self.load_value(Collection::Chores));
        ChoreRepository::from_records(records)
    }

    fn load_people(&self) -> People {
        let Value::Object(map) = self.load_value(Collection::People) else {
            return People::new();
        };
        let mut members = IndexMap::with_capacity(map.len());
        for (name, value) in map {
            match serde_json::from_value::<PersonRecord>(value) {
                Ok(record) => {
                    members.insert(name, record);
                }
                Err(err) => warn!("Skipping unreadable person '{}': {}", name, err),
            }
        }
        People::from_records(members)
    }

    fn load_history(&self) -> History {
        History::from_entries(decode_records::<HistoryEntry>(
            Collection::History,
            self.load_value(Collection::History),
        ))
    }

    fn save_chores(&self, chores: &ChoreRepository) -> Result<(), PersistenceError> {
        self.write_raw(Collection::Chores, &encode(chores)?)
    }

    fn save_people(&self, people: &People) -> Result<(), PersistenceError> {
        self.write_raw(Collection::People, &encode(people)?)
    }

    fn save_history(&self, history: &History) -> Result<(), PersistenceError> {
        self.write_raw(Collection::History, &encode(history)?)
    }
}

/// Decode a sequence element by element, skipping records that don't parse.
fn decode_records<T: DeserializeOwned>(collection: Collection, value: Value) -> Vec<T> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("Skipping unreadable {} record #{}: {}", collection, i, err);
                None
            }
        })
        .collect()
}
