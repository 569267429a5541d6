//! Capability traits the host simulation implements.
//!
//! The interceptor never touches a concrete entity or event type; it works
//! through these seams, so any simulation that can answer these queries and
//! apply these mutations can embed Plot Armor. Handles refer to live,
//! host-owned state: reads reflect the simulation at the moment of the
//! call, never a snapshot.

use plotarmor_logic::damage::DamageCause;
use plotarmor_logic::geometry::Vec3;

use crate::roster::PlayerId;

/// Mutable handle to a live player entity owned by the host simulation.
pub trait EntityHandle {
    fn id(&self) -> PlayerId;

    /// Display name, used in audit lines.
    fn name(&self) -> String;

    fn health(&self) -> f64;

    fn set_health(&mut self, value: f64);

    /// Damage-absorption buffer; depletes before health.
    fn absorption(&self) -> f64;

    fn set_absorption(&mut self, value: f64);

    fn position(&self) -> Vec3;

    /// Replace (not add to) the entity's velocity.
    fn set_velocity(&mut self, velocity: Vec3);

    /// Play the hurt animation and sound at the entity's location.
    fn play_hurt_cue(&mut self);
}

/// One in-flight damage application, pre-resolution.
///
/// The host must dispatch these to the interceptor at the highest observer
/// priority, after any other observer that may already have cancelled the
/// event.
pub trait DamageEvent {
    fn cause(&self) -> DamageCause;

    /// Final damage after all other modifiers, before application.
    fn final_damage(&self) -> f64;

    fn is_cancelled(&self) -> bool;

    /// Veto the damage application entirely.
    fn cancel(&mut self);

    /// Current position of the causing entity, when the event has one.
    /// `None` for block explosions without a traceable source and for
    /// causes with no entity behind them.
    fn damager_position(&self) -> Option<Vec3>;
}

/// Name/id resolution for operator commands and tab completion.
pub trait PlayerDirectory {
    /// Resolve an online player's name to their stable id.
    fn resolve_name(&self, name: &str) -> Option<PlayerId>;

    /// Display name of an online player; `None` when offline.
    fn display_name(&self, id: PlayerId) -> Option<String>;

    /// Players currently online, with display names.
    fn online_players(&self) -> Vec<(PlayerId, String)>;
}
