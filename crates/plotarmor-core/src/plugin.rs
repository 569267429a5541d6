//! Plugin lifecycle.
//!
//! [`PlotArmor`] owns the roster and its store and exposes the three entry
//! points the host wires up: damage-event dispatch, the `/plotarmor`
//! command, and tab completion. The host drives all of them on its single
//! dispatch thread.

use std::path::PathBuf;

use crate::commands::{self, Feedback};
use crate::host::{DamageEvent, EntityHandle, PlayerDirectory};
use crate::interceptor;
use crate::persistence::{RosterStore, StoreError};
use crate::roster::Roster;

pub struct PlotArmor {
    roster: Roster,
    store: RosterStore,
}

impl PlotArmor {
    /// Create the plugin against a roster file path. Call
    /// [`enable`](Self::enable) before routing events.
    pub fn new(roster_path: impl Into<PathBuf>) -> Self {
        Self {
            roster: Roster::new(),
            store: RosterStore::new(roster_path),
        }
    }

    /// Load the roster from disk.
    pub fn enable(&mut self) -> Result<(), StoreError> {
        self.roster = self.store.load()?;
        log::info!(
            "Plot Armor enabled, {} player(s) protected",
            self.roster.len()
        );
        Ok(())
    }

    /// Persist the roster.
    pub fn disable(&self) -> Result<(), StoreError> {
        self.store.save(&self.roster)?;
        log::info!("Plot Armor disabled");
        Ok(())
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Entry point for the host's damage-event dispatch. Must be registered
    /// at the highest observer priority, after observers that may cancel.
    pub fn on_entity_damage(
        &self,
        player: &mut impl EntityHandle,
        event: &mut impl DamageEvent,
    ) {
        interceptor::on_entity_damage(&self.roster, player, event);
    }

    /// Entry point for the `/plotarmor` command.
    pub fn run_command(
        &mut self,
        directory: &impl PlayerDirectory,
        args: &[&str],
    ) -> Result<Feedback, StoreError> {
        commands::run(&mut self.roster, &self.store, directory, args)
    }

    /// Tab-completion suggestions.
    pub fn suggest(&self, directory: &impl PlayerDirectory, args: &[&str]) -> Vec<String> {
        commands::suggest(&self.roster, directory, args)
    }
}
