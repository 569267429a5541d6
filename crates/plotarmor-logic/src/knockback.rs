//! Explosion launch vector recomputation.
//!
//! Cancelling a damage event also cancels the engine's own knockback, so a
//! vetoed explosion hit would leave the player standing still. This module
//! recomputes a replacement launch vector from the explosion source:
//! strength decays linearly with distance and floors at a minimum nudge,
//! and the vertical component is forced upward so close blasts never pin
//! the player to the ground.

use crate::geometry::Vec3;

/// Minimum launch strength, applied however far the source is.
const MIN_STRENGTH: f64 = 0.3;
/// Strength of a point-blank explosion.
const BASE_STRENGTH: f64 = 1.5;
/// Strength lost per unit of distance from the source.
const FALLOFF_PER_UNIT: f64 = 0.15;
/// Explosions always launch at least this far upward.
const MIN_VERTICAL: f64 = 0.4;

/// Compute the replacement velocity for a player at `target` hit by an
/// explosion at `source`. The result replaces the player's velocity
/// outright.
///
/// Returns `None` when the two positions coincide — no direction can be
/// derived, and physical repair is best-effort.
pub fn explosion_launch(source: Vec3, target: Vec3) -> Option<Vec3> {
    let offset = target - source;
    let distance = offset.length();
    if distance == 0.0 {
        return None;
    }

    let strength = (BASE_STRENGTH - distance * FALLOFF_PER_UNIT).max(MIN_STRENGTH);
    let mut velocity = offset.normalize().scale(strength);
    velocity.y = velocity.y.max(MIN_VERTICAL);
    Some(velocity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_at_unit_distance() {
        // 1.5 - 1.0*0.15 = 1.35 along +x, vertical forced to 0.4
        let v = explosion_launch(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert!((v.x - 1.35).abs() < 1e-9);
        assert!((v.y - 0.4).abs() < 1e-9);
        assert!(v.z.abs() < 1e-9);
    }

    #[test]
    fn test_strength_floors_at_long_range() {
        // distance 10: 1.5 - 1.5 = 0.0, floored to 0.3
        let v = explosion_launch(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)).unwrap();
        assert!((v.z - 0.3).abs() < 1e-9);
        assert!(v.y >= 0.4);
    }

    #[test]
    fn test_strength_at_distance_five() {
        // 1.5 - 5.0*0.15 = 0.75
        let v = explosion_launch(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0)).unwrap();
        assert!((v.x - 0.75).abs() < 1e-9);
        assert!(v.y >= 0.4);
    }

    #[test]
    fn test_coincident_positions_yield_nothing() {
        let p = Vec3::new(4.0, 64.0, -7.0);
        assert_eq!(explosion_launch(p, p), None);
    }

    #[test]
    fn test_downward_direction_forced_up() {
        // explosion directly above: raw direction points straight down
        let v = explosion_launch(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 8.0, 0.0)).unwrap();
        assert!((v.y - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_upward_component_kept_when_larger() {
        // explosion directly below at distance 1: raw vertical is 1.35 > 0.4
        let v = explosion_launch(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert!((v.y - 1.35).abs() < 1e-9);
    }
}
