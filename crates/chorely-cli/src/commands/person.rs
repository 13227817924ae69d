use chorely_core::{Config, RelativeDay};
use chrono::Local;
use clap::Subcommand;

use super::{open_session, print_json, CmdResult};

#[derive(Subcommand)]
pub enum PersonAction {
    /// Add a person with zero points
    Add { name: String },
    /// Remove a person (refused while history mentions them)
    Rm { name: String },
    /// List people with points and recent completions
    List {
        #[arg(long)]
        json: bool,
    },
    /// Select the default person credited by `chore done`
    Select { name: String },
}

pub fn run(action: PersonAction) -> CmdResult {
    match action {
        PersonAction::Add { name } => {
            let mut session = open_session()?;
            let person = session.add_person(&name)?;
            println!("Person added: {}", person.name);
        }
        PersonAction::Rm { name } => {
            let mut config = Config::load()?;
            let mut session = open_session()?;
            let person = session.remove_person(&name)?;
            if config.default_person.as_deref() == Some(person.name.as_str()) {
                config.default_person = None;
                config.save()?;
            }
            println!("Person removed: {}", person.name);
        }
        PersonAction::List { json } => {
            let config = Config::load_or_default();
            let session = open_session()?;
            let household = session.household();

            if json {
                let people: Vec<_> = household.people().iter().collect();
                return print_json(&people);
            }
            if household.people().is_empty() {
                println!("No people yet. Add one with `chorely-cli person add <name>`.");
                return Ok(());
            }

            let now = Local::now();
            for person in household.people().iter() {
                let marker = if config.default_person.as_deref() == Some(person.name.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {} ({} points)", person.name, person.points);
                for (_, entry) in household
                    .history()
                    .recent_for(&person.name, config.recent_limit)
                {
                    println!(
                        "    - {} ({})",
                        entry.chore,
                        RelativeDay::between(entry.timestamp, &now)
                    );
                }
            }
        }
        PersonAction::Select { name } => {
            let mut config = Config::load()?;
            let session = open_session()?;
            if !session.household().people().contains(&name) {
                return Err(format!("person not found: {name}").into());
            }
            config.default_person = Some(name.clone());
            config.save()?;
            println!("Selected: {name}");
        }
    }
    Ok(())
}
