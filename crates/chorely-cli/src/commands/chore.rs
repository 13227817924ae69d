//! Chore management commands for CLI.

use chorely_core::chore::frequency::describe_days;
use chorely_core::{urgency, Chore, Config, FrequencyPreset};
use chrono::{Local, Utc};
use clap::{Args, Subcommand};

use super::board::describe;
use super::{open_session, print_json, resolve_person, CmdResult};

#[derive(Args)]
#[group(multiple = false)]
pub struct FrequencyArgs {
    /// Named interval (daily, weekly, biweekly, triweekly, monthly, quarterly, half-yearly, yearly)
    #[arg(long, value_parser = clap::value_parser!(FrequencyPreset))]
    every: Option<FrequencyPreset>,
    /// Custom interval in days
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    days: Option<u32>,
}

impl FrequencyArgs {
    fn resolve(&self) -> Option<u32> {
        self.every.map(FrequencyPreset::days).or(self.days)
    }
}

#[derive(Subcommand)]
pub enum ChoreAction {
    /// Add a new chore
    Add {
        /// Chore name
        name: String,
        /// Area of the home (defaults to config default_area)
        #[arg(long)]
        area: Option<String>,
        #[command(flatten)]
        frequency: FrequencyArgs,
        /// Points awarded on completion
        #[arg(long, default_value = "1")]
        points: u32,
        /// Estimated minutes
        #[arg(long, default_value = "10")]
        minutes: u32,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Checklist step (repeatable)
        #[arg(long = "step")]
        steps: Vec<String>,
    },
    /// Edit an existing chore
    Edit {
        /// Current chore name
        name: String,
        /// New name
        #[arg(long)]
        rename: Option<String>,
        #[arg(long)]
        area: Option<String>,
        #[command(flatten)]
        frequency: FrequencyArgs,
        #[arg(long)]
        points: Option<u32>,
        #[arg(long)]
        minutes: Option<u32>,
        /// Comma-separated tags, replacing the current ones
        #[arg(long)]
        tags: Option<String>,
        /// Checklist step (repeatable), replacing the current checklist
        #[arg(long = "step")]
        steps: Vec<String>,
        /// Remove every checklist step
        #[arg(long, conflicts_with = "steps")]
        clear_checklist: bool,
    },
    /// Show one chore
    Show {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete a chore
    Rm { name: String },
    /// Mark a chore done and credit its points
    Done {
        name: String,
        /// Person who did it (defaults to the selected person)
        #[arg(long)]
        person: Option<String>,
    },
    /// List suggested and in-use areas
    Areas,
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(|t| t.trim().to_string()).collect()
}

pub fn run(action: ChoreAction) -> CmdResult {
    match action {
        ChoreAction::Add {
            name,
            area,
            frequency,
            points,
            minutes,
            tags,
            steps,
        } => {
            let area = match area {
                Some(area) => area,
                None => Config::load_or_default().default_area,
            };
            let mut chore = Chore::new(name)
                .with_area(area)
                .with_points(points)
                .with_est_time_min(minutes)
                .with_checklist(steps);
            if let Some(days) = frequency.resolve() {
                chore = chore.with_frequency_days(days);
            }
            if let Some(tags) = tags {
                chore = chore.with_tags(split_tags(&tags));
            }

            let mut session = open_session()?;
            let created = session.create_chore(chore)?;
            println!(
                "Chore added: {} ({}, {})",
                created.name,
                created.area,
                describe_days(created.frequency_days)
            );
        }
        ChoreAction::Edit {
            name,
            rename,
            area,
            frequency,
            points,
            minutes,
            tags,
            steps,
            clear_checklist,
        } => {
            let mut session = open_session()?;
            let mut chore = session
                .household()
                .chores()
                .find_by_name(&name)
                .cloned()
                .ok_or_else(|| format!("chore not found: {name}"))?;

            if let Some(new_name) = rename {
                chore.name = new_name;
            }
            if let Some(area) = area {
                chore.area = area;
            }
            if let Some(days) = frequency.resolve() {
                chore.frequency_days = days;
            }
            if let Some(points) = points {
                chore.points = points;
            }
            if let Some(minutes) = minutes {
                chore.est_time_min = minutes;
            }
            if let Some(tags) = tags {
                chore.tags = split_tags(&tags).into_iter().collect();
            }
            if clear_checklist {
                chore.checklist.clear();
            } else if !steps.is_empty() {
                chore.checklist = steps;
            }

            let updated = session.update_chore(&name, chore)?;
            println!("Chore updated: {}", updated.name);
        }
        ChoreAction::Show { name, json } => {
            let session = open_session()?;
            let chore = session
                .household()
                .chores()
                .find_by_name(&name)
                .ok_or_else(|| format!("chore not found: {name}"))?;
            let status = urgency(chore, Utc::now());

            if json {
                return print_json(&serde_json::json!({
                    "chore": chore,
                    "urgency": status,
                }));
            }

            println!("{} {}", status.state.badge(), chore.name);
            println!("  Area:      {}", chore.area);
            println!("  Every:     {}", describe_days(chore.frequency_days));
            println!("  Points:    {}", chore.points);
            println!("  Estimate:  {} min", chore.est_time_min);
            if !chore.tags.is_empty() {
                let tags: Vec<&str> = chore.tags.iter().map(String::as_str).collect();
                println!("  Tags:      {}", tags.join(", "));
            }
            match chore.last_done {
                Some(at) => println!(
                    "  Last done: {} ({})",
                    at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    describe(&status)
                ),
                None => println!("  Last done: never"),
            }
            if !chore.checklist.is_empty() {
                println!("  Checklist:");
                for step in &chore.checklist {
                    println!("    [ ] {step}");
                }
            }
        }
        ChoreAction::Rm { name } => {
            let mut session = open_session()?;
            let removed = session.delete_chore(&name)?;
            println!("Chore deleted: {}", removed.name);
        }
        ChoreAction::Done { name, person } => {
            let person = resolve_person(person, &Config::load_or_default())?;
            let mut session = open_session()?;
            let done = session.complete_chore(&name, &person, Utc::now())?;
            println!(
                "{} did {} (+{} points, now {})",
                done.person.name, done.chore.name, done.entry.points, done.person.points
            );
        }
        ChoreAction::Areas => {
            let config = Config::load_or_default();
            let session = open_session()?;
            let mut areas = config.areas;
            for chore in session.household().chores() {
                if !areas.contains(&chore.area) {
                    areas.push(chore.area.clone());
                }
            }
            for area in areas {
                println!("{area}");
            }
        }
    }
    Ok(())
}
