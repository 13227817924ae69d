pub mod board;
pub mod chore;
pub mod config;
pub mod history;
pub mod ledger;
pub mod person;

use chorely_core::{Config, JsonStore, Session};
use tracing::debug;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open a session on the default data directory.
pub fn open_session() -> Result<Session<JsonStore>, Box<dyn std::error::Error>> {
    let store = JsonStore::open()?;
    debug!("Data directory: {}", store.dir().display());
    Ok(Session::open(store))
}

/// The explicit `--person`, else the configured default person.
pub fn resolve_person(explicit: Option<String>, config: &Config) -> Result<String, String> {
    let person = match explicit {
        Some(name) => name,
        None => config.default_person.clone().ok_or_else(|| {
            "no person given; pass --person or run `chorely-cli person select <name>`".to_string()
        })?,
    };
    debug!("Crediting {}", person);
    Ok(person)
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn plural(n: i64, unit: &str) -> String {
    if n.abs() == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
