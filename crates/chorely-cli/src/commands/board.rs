//! Urgency board: chores grouped by area, most urgent first.

use chorely_core::{Urgency, UrgencyState};
use chrono::Utc;
use clap::Args;

use super::{open_session, plural, print_json, CmdResult};

#[derive(Args)]
pub struct BoardArgs {
    /// Only show this area
    #[arg(long)]
    area: Option<String>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(args: BoardArgs) -> CmdResult {
    let session = open_session()?;
    let mut groups = session.board(Utc::now());
    if let Some(area) = &args.area {
        groups.retain(|g| &g.area == area);
    }

    if args.json {
        return print_json(&groups);
    }

    if groups.is_empty() {
        println!("No chores yet. Add one with `chorely-cli chore add <name>`.");
        return Ok(());
    }

    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("## {}", group.area);
        let width = group
            .chores
            .iter()
            .map(|r| r.chore.name.chars().count())
            .max()
            .unwrap_or(0);
        for ranked in &group.chores {
            println!(
                "{} {:<width$}  {}",
                ranked.urgency.state.badge(),
                ranked.chore.name,
                describe(&ranked.urgency),
                width = width
            );
        }
    }
    Ok(())
}

pub fn describe(urgency: &Urgency) -> String {
    match (urgency.state, urgency.due_in) {
        (UrgencyState::NeverDone, _) | (_, None) => "never done".to_string(),
        (UrgencyState::Overdue, Some(due_in)) => format!("overdue by {}", plural(-due_in, "day")),
        (_, Some(0)) => "due today".to_string(),
        (_, Some(due_in)) => format!("due in {}", plural(due_in, "day")),
    }
}
