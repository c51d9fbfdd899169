//! Slots command implementation

use colored::Colorize;

use super::Session;
use crate::cli::ManifestArgs;
use crate::error::Result;

/// One line of slot output
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SlotSummary {
    pub slot: String,
    pub candidates: usize,
    pub active: Option<(String, i32)>,
}

pub(crate) fn summarize(session: &Session) -> Vec<SlotSummary> {
    let components = &session.registries.components;
    components
        .slots()
        .into_iter()
        .map(|slot| SlotSummary {
            slot: slot.to_string(),
            candidates: components.get_all(slot).len(),
            active: components
                .resolve_item(slot)
                .map(|item| (item.component.name().to_string(), item.priority)),
        })
        .collect()
}

/// Run the slots command
pub fn run_slots(args: &ManifestArgs) -> Result<()> {
    let session = Session::open(args)?;
    let summaries = summarize(&session);

    println!(
        "{} {}",
        "Environment:".bold(),
        session.registries.components.environment()
    );
    if summaries.is_empty() {
        println!("No component slots declared.");
        return Ok(());
    }

    for summary in summaries {
        let active = match &summary.active {
            Some((name, priority)) => format!("{} (priority {})", name.green(), priority),
            None => "(none active)".yellow().to_string(),
        };
        println!(
            "  {} -> {} [{} candidate(s)]",
            summary.slot.cyan(),
            active,
            summary.candidates
        );
    }
    Ok(())
}
