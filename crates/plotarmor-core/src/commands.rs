//! Operator command execution.
//!
//! Bridges the pure grammar in `plotarmor_logic::commands` to the runtime:
//! resolves names through the host's [`PlayerDirectory`], mutates the
//! roster, persists after every mutation, and returns feedback lines for
//! the host to deliver.

use plotarmor_logic::commands::{self, Command, ParseError};

use crate::host::PlayerDirectory;
use crate::persistence::{RosterStore, StoreError};
use crate::roster::{PlayerId, Roster};

/// Feedback produced by one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    /// Lines for whoever issued the command.
    pub sender: Vec<String>,
    /// Notification for the affected player, if any.
    pub target: Option<(PlayerId, String)>,
}

impl Feedback {
    fn sender_line(line: impl Into<String>) -> Self {
        Self {
            sender: vec![line.into()],
            target: None,
        }
    }

    fn usage() -> Self {
        Self {
            sender: vec![
                "Plot Armor commands:".to_string(),
                " /plotarmor add <player> - grant plot armor".to_string(),
                " /plotarmor remove <player> - revoke plot armor".to_string(),
                " /plotarmor list - view protected players".to_string(),
            ],
            target: None,
        }
    }
}

/// Execute one operator command.
pub fn run(
    roster: &mut Roster,
    store: &RosterStore,
    directory: &impl PlayerDirectory,
    args: &[&str],
) -> Result<Feedback, StoreError> {
    match commands::parse(args) {
        Ok(Command::Add(name)) => add(roster, store, directory, name),
        Ok(Command::Remove(name)) => remove(roster, store, directory, name),
        Ok(Command::List) => Ok(list(roster, directory)),
        Err(ParseError::MissingPlayer { verb }) => Ok(Feedback::sender_line(format!(
            "Usage: /plotarmor {} <player>",
            verb
        ))),
        Err(ParseError::Unrecognized) => Ok(Feedback::usage()),
    }
}

/// Tab-completion suggestions for a partially typed command.
pub fn suggest(roster: &Roster, directory: &impl PlayerDirectory, args: &[&str]) -> Vec<String> {
    match args {
        [prefix] => commands::complete_subcommand(prefix),
        [sub, prefix] if sub.eq_ignore_ascii_case("add") => {
            // Only online players not yet protected.
            let names: Vec<String> = directory
                .online_players()
                .into_iter()
                .filter(|(id, _)| !roster.contains(*id))
                .map(|(_, name)| name)
                .collect();
            commands::complete_name(names.iter().map(String::as_str), prefix)
        }
        [sub, prefix] if sub.eq_ignore_ascii_case("remove") => {
            // Only protected players who are online.
            let names: Vec<String> = directory
                .online_players()
                .into_iter()
                .filter(|(id, _)| roster.contains(*id))
                .map(|(_, name)| name)
                .collect();
            commands::complete_name(names.iter().map(String::as_str), prefix)
        }
        _ => Vec::new(),
    }
}

fn add(
    roster: &mut Roster,
    store: &RosterStore,
    directory: &impl PlayerDirectory,
    name: &str,
) -> Result<Feedback, StoreError> {
    let id = match directory.resolve_name(name) {
        Some(id) => id,
        None => return Ok(Feedback::sender_line(format!("Player not found: {}", name))),
    };
    let display = directory
        .display_name(id)
        .unwrap_or_else(|| name.to_string());

    if !roster.add(id) {
        return Ok(Feedback::sender_line(format!(
            "{} already has plot armor.",
            display
        )));
    }
    store.save(roster)?;

    Ok(Feedback {
        sender: vec![format!("{} now has plot armor!", display)],
        target: Some((id, "You have been granted plot armor!".to_string())),
    })
}

fn remove(
    roster: &mut Roster,
    store: &RosterStore,
    directory: &impl PlayerDirectory,
    name: &str,
) -> Result<Feedback, StoreError> {
    let id = match directory.resolve_name(name) {
        Some(id) => id,
        None => return Ok(Feedback::sender_line(format!("Player not found: {}", name))),
    };
    let display = directory
        .display_name(id)
        .unwrap_or_else(|| name.to_string());

    if !roster.remove(id) {
        return Ok(Feedback::sender_line(format!(
            "{} doesn't have plot armor.",
            display
        )));
    }
    store.save(roster)?;

    Ok(Feedback {
        sender: vec![format!("{} no longer has plot armor.", display)],
        target: Some((id, "Your plot armor has been removed!".to_string())),
    })
}

fn list(roster: &Roster, directory: &impl PlayerDirectory) -> Feedback {
    if roster.is_empty() {
        return Feedback::sender_line("No players currently have plot armor.");
    }

    let mut lines = vec![format!("Plot Armor roster ({})", roster.len())];
    let mut entries: Vec<String> = roster
        .iter()
        .map(|id| match directory.display_name(id) {
            Some(name) => format!(" - {} (online)", name),
            None => format!(" - {} (offline)", id),
        })
        .collect();
    entries.sort();
    lines.extend(entries);

    Feedback {
        sender: lines,
        target: None,
    }
}
