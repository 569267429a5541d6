//! Damage cause classification.

use serde::{Deserialize, Serialize};

/// How a damage event was produced.
///
/// A closed set: the host maps its own cause namespace onto these four
/// variants at the boundary, so every applicability branch downstream is an
/// exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageCause {
    /// Direct attack by another entity (melee, projectile).
    Attack,
    /// Explosion carried by an entity (creeper, primed charge).
    EntityExplosion,
    /// Explosion originating from a block.
    BlockExplosion,
    /// Everything else (fall, fire, drowning, magic, ...).
    Other,
}

impl DamageCause {
    /// Whether the engine's own knockback for this cause is lost when the
    /// event is cancelled, requiring manual reapplication.
    pub fn is_explosion(self) -> bool {
        matches!(self, Self::EntityExplosion | Self::BlockExplosion)
    }
}
