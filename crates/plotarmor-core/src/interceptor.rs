//! The damage interceptor.
//!
//! Entry point for the host's damage-event dispatch. Consults the roster,
//! asks `plotarmor-logic` for a verdict, and applies it through the host
//! traits: veto, clamp, side-effect repair, audit line. Non-members and
//! already-cancelled events are skipped without reading or touching any
//! entity state.

use plotarmor_logic::guard::{self, Verdict};
use plotarmor_logic::knockback;

use crate::audit::{Action, Intervention};
use crate::host::{DamageEvent, EntityHandle};
use crate::roster::Roster;

/// Handle one damage event for a player.
pub fn on_entity_damage(
    roster: &Roster,
    player: &mut impl EntityHandle,
    event: &mut impl DamageEvent,
) {
    // Another observer got there first; processing again would double up
    // side effects.
    if event.is_cancelled() {
        return;
    }
    if !roster.contains(player.id()) {
        return;
    }

    let health = player.health();
    let verdict = guard::evaluate(health, player.absorption(), event.final_damage());

    let action = match verdict {
        Verdict::Allow => return,
        Verdict::Block => Action::Blocked,
        Verdict::Save { consume_absorption } => {
            player.set_health(guard::SURVIVAL_FLOOR);
            if consume_absorption {
                player.set_absorption(0.0);
            }
            Action::Saved
        }
    };

    event.cancel();
    repair_side_effects(player, event);

    Intervention {
        action,
        player: player.name(),
        cause: event.cause(),
        damage: event.final_damage(),
        health_before: health,
        position: player.position(),
    }
    .emit();
}

/// Restore what cancelling the event suppressed: the hurt cue always, and
/// the engine knockback for explosion causes. Knockback repair is
/// best-effort; an unresolvable source position simply leaves velocity
/// untouched.
fn repair_side_effects(player: &mut impl EntityHandle, event: &impl DamageEvent) {
    player.play_hurt_cue();

    if !event.cause().is_explosion() {
        return;
    }
    let source = match event.damager_position() {
        Some(pos) => pos,
        None => return,
    };
    if let Some(velocity) = knockback::explosion_launch(source, player.position()) {
        player.set_velocity(velocity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::PlayerId;
    use plotarmor_logic::damage::DamageCause;
    use plotarmor_logic::geometry::Vec3;

    struct TestPlayer {
        id: PlayerId,
        health: f64,
        absorption: f64,
        position: Vec3,
        velocity: Option<Vec3>,
        hurt_cues: u32,
    }

    impl TestPlayer {
        fn new(health: f64, absorption: f64) -> Self {
            Self {
                id: PlayerId::random(),
                health,
                absorption,
                position: Vec3::new(0.0, 64.0, 0.0),
                velocity: None,
                hurt_cues: 0,
            }
        }
    }

    impl EntityHandle for TestPlayer {
        fn id(&self) -> PlayerId {
            self.id
        }
        fn name(&self) -> String {
            "TestPlayer".to_string()
        }
        fn health(&self) -> f64 {
            self.health
        }
        fn set_health(&mut self, value: f64) {
            self.health = value;
        }
        fn absorption(&self) -> f64 {
            self.absorption
        }
        fn set_absorption(&mut self, value: f64) {
            self.absorption = value;
        }
        fn position(&self) -> Vec3 {
            self.position
        }
        fn set_velocity(&mut self, velocity: Vec3) {
            self.velocity = Some(velocity);
        }
        fn play_hurt_cue(&mut self) {
            self.hurt_cues += 1;
        }
    }

    struct TestDamage {
        cause: DamageCause,
        final_damage: f64,
        cancelled: bool,
        damager_position: Option<Vec3>,
    }

    impl TestDamage {
        fn attack(final_damage: f64) -> Self {
            Self {
                cause: DamageCause::Attack,
                final_damage,
                cancelled: false,
                damager_position: None,
            }
        }
    }

    impl DamageEvent for TestDamage {
        fn cause(&self) -> DamageCause {
            self.cause
        }
        fn final_damage(&self) -> f64 {
            self.final_damage
        }
        fn is_cancelled(&self) -> bool {
            self.cancelled
        }
        fn cancel(&mut self) {
            self.cancelled = true;
        }
        fn damager_position(&self) -> Option<Vec3> {
            self.damager_position
        }
    }

    fn roster_with(id: PlayerId) -> Roster {
        let mut roster = Roster::new();
        roster.add(id);
        roster
    }

    #[test]
    fn test_lethal_hit_saved_at_floor() {
        // Scenario: health 2.0, no absorption, melee 3.0
        let mut player = TestPlayer::new(2.0, 0.0);
        let roster = roster_with(player.id);
        let mut event = TestDamage::attack(3.0);

        on_entity_damage(&roster, &mut player, &mut event);

        assert!(event.cancelled);
        assert_eq!(player.health, 1.0);
        assert_eq!(player.hurt_cues, 1);
    }

    #[test]
    fn test_already_critical_blocked_health_unchanged() {
        // Health 0.8 stays 0.8: the block path never clamps upward.
        let mut player = TestPlayer::new(0.8, 0.0);
        let roster = roster_with(player.id);
        let mut event = TestDamage::attack(0.1);

        on_entity_damage(&roster, &mut player, &mut event);

        assert!(event.cancelled);
        assert_eq!(player.health, 0.8);
        assert_eq!(player.hurt_cues, 1);
    }

    #[test]
    fn test_absorbed_hit_allowed_untouched() {
        // Health 5.0, absorption 2.0, damage 3.0: projected 4.0, allowed.
        let mut player = TestPlayer::new(5.0, 2.0);
        let roster = roster_with(player.id);
        let mut event = TestDamage::attack(3.0);

        on_entity_damage(&roster, &mut player, &mut event);

        assert!(!event.cancelled);
        assert_eq!(player.health, 5.0);
        assert_eq!(player.absorption, 2.0);
        assert_eq!(player.hurt_cues, 0);
        assert_eq!(player.velocity, None);
    }

    #[test]
    fn test_absorption_consumed_on_save() {
        let mut player = TestPlayer::new(3.0, 1.5);
        let roster = roster_with(player.id);
        let mut event = TestDamage::attack(5.0);

        on_entity_damage(&roster, &mut player, &mut event);

        assert!(event.cancelled);
        assert_eq!(player.health, 1.0);
        assert_eq!(player.absorption, 0.0);
    }

    #[test]
    fn test_exact_floor_tie_allowed() {
        let mut player = TestPlayer::new(5.0, 0.0);
        let roster = roster_with(player.id);
        let mut event = TestDamage::attack(4.0);

        on_entity_damage(&roster, &mut player, &mut event);

        assert!(!event.cancelled);
        assert_eq!(player.health, 5.0);
    }

    #[test]
    fn test_non_protected_untouched() {
        let mut player = TestPlayer::new(0.5, 0.0);
        let roster = Roster::new();
        let mut event = TestDamage::attack(100.0);

        on_entity_damage(&roster, &mut player, &mut event);

        assert!(!event.cancelled);
        assert_eq!(player.health, 0.5);
        assert_eq!(player.hurt_cues, 0);
        assert_eq!(player.velocity, None);
    }

    #[test]
    fn test_already_cancelled_skipped() {
        let mut player = TestPlayer::new(0.5, 0.0);
        let roster = roster_with(player.id);
        let mut event = TestDamage::attack(100.0);
        event.cancelled = true;

        on_entity_damage(&roster, &mut player, &mut event);

        assert_eq!(player.health, 0.5);
        assert_eq!(player.hurt_cues, 0);
    }

    #[test]
    fn test_explosion_veto_reapplies_knockback() {
        // Block explosion 5 units away along +x: strength 0.75, y forced.
        let mut player = TestPlayer::new(2.0, 0.0);
        let roster = roster_with(player.id);
        let mut event = TestDamage {
            cause: DamageCause::BlockExplosion,
            final_damage: 6.0,
            cancelled: false,
            damager_position: Some(Vec3::new(-5.0, 64.0, 0.0)),
        };

        on_entity_damage(&roster, &mut player, &mut event);

        assert!(event.cancelled);
        let velocity = player.velocity.expect("knockback applied");
        assert!((velocity.x - 0.75).abs() < 1e-9);
        assert!((velocity.y - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_explosion_without_source_leaves_velocity() {
        let mut player = TestPlayer::new(2.0, 0.0);
        let roster = roster_with(player.id);
        let mut event = TestDamage {
            cause: DamageCause::EntityExplosion,
            final_damage: 6.0,
            cancelled: false,
            damager_position: None,
        };

        on_entity_damage(&roster, &mut player, &mut event);

        assert!(event.cancelled);
        assert_eq!(player.velocity, None);
        assert_eq!(player.hurt_cues, 1);
    }

    #[test]
    fn test_explosion_at_own_position_leaves_velocity() {
        let mut player = TestPlayer::new(2.0, 0.0);
        let roster = roster_with(player.id);
        let mut event = TestDamage {
            cause: DamageCause::EntityExplosion,
            final_damage: 6.0,
            cancelled: false,
            damager_position: Some(player.position),
        };

        on_entity_damage(&roster, &mut player, &mut event);

        assert!(event.cancelled);
        assert_eq!(player.velocity, None);
    }

    #[test]
    fn test_non_explosion_veto_no_knockback() {
        let mut player = TestPlayer::new(2.0, 0.0);
        let roster = roster_with(player.id);
        let mut event = TestDamage {
            cause: DamageCause::Attack,
            final_damage: 6.0,
            cancelled: false,
            damager_position: Some(Vec3::new(-5.0, 64.0, 0.0)),
        };

        on_entity_damage(&roster, &mut player, &mut event);

        assert!(event.cancelled);
        assert_eq!(player.velocity, None);
    }
}
