//! # Chorely Core Library
//!
//! This library provides the core logic for Chorely, a household chore
//! tracker. Every operation is available through the standalone CLI binary,
//! which is a thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Urgency**: pure due-date classification and ordering of recurring
//!   chores, given an explicit `now`
//! - **Ledger**: completions, corrections and deletions that keep each
//!   person's points equal to the sum of their history
//! - **Chore repository**: name-keyed chore CRUD with area grouping
//! - **Storage**: JSON collections (chores, people, history) and TOML
//!   configuration
//!
//! ## Key Components
//!
//! - [`Household`]: the three collections, passed explicitly to engines
//! - [`Session`]: a household bound to a [`CollectionStore`]
//! - [`urgency()`]: urgency state and sort key for one chore
//! - [`Config`]: application configuration management

pub mod chore;
pub mod error;
pub mod history;
pub mod household;
pub mod ledger;
pub mod person;
pub mod session;
pub mod storage;
pub mod timestamp;
pub mod urgency;

pub use chore::{Chore, ChoreRepository, FrequencyPreset, DEFAULT_AREA};
pub use error::{ConfigError, CoreError, PersistenceError, RecordKind};
pub use history::{History, HistoryEntry, RelativeDay};
pub use household::Household;
pub use ledger::{Completion, Correction, Discrepancy};
pub use person::{People, Person};
pub use session::Session;
pub use storage::{Collection, CollectionStore, Config, JsonStore, MemoryStore};
pub use urgency::{urgency, AreaGroup, RankedChore, Urgency, UrgencyState};
