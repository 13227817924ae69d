use chorely_core::{ledger, Discrepancy};
use clap::Subcommand;

use super::{open_session, print_json, CmdResult};

#[derive(Subcommand)]
pub enum LedgerAction {
    /// Compare stored points against history totals
    Audit {
        #[arg(long)]
        json: bool,
    },
    /// Reset stored points to history totals
    Rebalance,
}

fn print_discrepancy(d: &Discrepancy) {
    match d.recorded {
        Some(recorded) => println!("{}: recorded {recorded}, history says {}", d.person, d.expected),
        None => println!("{}: not a known person, history says {}", d.person, d.expected),
    }
}

pub fn run(action: LedgerAction) -> CmdResult {
    match action {
        LedgerAction::Audit { json } => {
            let session = open_session()?;
            let found = ledger::audit(session.household());
            if json {
                return print_json(&found);
            }
            if found.is_empty() {
                println!("Ledger is consistent.");
            }
            for d in &found {
                print_discrepancy(d);
            }
        }
        LedgerAction::Rebalance => {
            let mut session = open_session()?;
            let fixed = session.rebalance()?;
            let (orphans, fixed): (Vec<_>, Vec<_>) = fixed.iter().partition(|d| d.is_orphan());
            if fixed.is_empty() {
                println!("Nothing to rebalance.");
            }
            for d in fixed {
                println!("{}: {} -> {}", d.person, d.recorded.unwrap_or_default(), d.expected);
            }
            for d in orphans {
                print_discrepancy(d);
            }
        }
    }
    Ok(())
}
