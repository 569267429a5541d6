//! Plot Armor runtime.
//!
//! Embeds into a host game simulation through the capability traits in
//! [`host`] and keeps a designated set of players from dying: lethal damage
//! events are vetoed, health is clamped to the survival floor, and the
//! physical side effects the veto suppresses (hurt cue, explosion
//! knockback) are reapplied. The roster, its on-disk persistence, and the
//! operator command surface live here too; every decision they act on comes
//! from `plotarmor-logic`.
//!
//! Everything runs synchronously on the host's event-dispatch thread. The
//! crate spawns no tasks, takes no locks, and never blocks.

pub mod audit;
pub mod commands;
pub mod host;
pub mod interceptor;
pub mod persistence;
pub mod plugin;
pub mod roster;

pub use plugin::PlotArmor;
pub use roster::{PlayerId, Roster};
