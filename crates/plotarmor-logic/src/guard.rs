//! Survival-floor verdict logic.
//!
//! Given a protected player's live health, absorption buffer, and the final
//! damage about to be applied, decide whether the event goes through
//! untouched, is vetoed outright, or is vetoed with a clamp to the floor.
//!
//! Two distinct veto branches:
//! 1. Already critical (`health <= SURVIVAL_FLOOR`): veto unconditionally,
//!    leave health untouched. Without this branch, repeated chip damage at
//!    the floor would stack toward death through the projection formula.
//! 2. Would become lethal (`projected < SURVIVAL_FLOOR`, strict): veto,
//!    clamp health to exactly the floor, and consume any absorption — a
//!    vetoed hit must not leave a free shield behind.
//!
//! A projection landing exactly on the floor is allowed through; the player
//! is not actually at risk of death.

/// Health value a protected player can never drop below. Death is at 0.
pub const SURVIVAL_FLOOR: f64 = 1.0;

/// What the interceptor should do with one damage event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Ordinary non-lethal damage; apply unmodified, no side effects.
    Allow,
    /// Player already at or below the floor: veto all damage, change nothing.
    Block,
    /// Damage would be lethal: veto, set health to the floor.
    Save {
        /// Whether a nonzero absorption buffer must be zeroed out.
        consume_absorption: bool,
    },
}

impl Verdict {
    /// Whether this verdict vetoes the event.
    pub fn is_veto(self) -> bool {
        !matches!(self, Self::Allow)
    }
}

/// Decide the fate of one damage event against a protected player.
///
/// `final_damage` is the fully resolved amount, post all other modifiers,
/// pre-application. Absorption depletes before health, so the health share
/// of the hit is `max(0, final_damage - absorption)`.
pub fn evaluate(health: f64, absorption: f64, final_damage: f64) -> Verdict {
    if health <= SURVIVAL_FLOOR {
        return Verdict::Block;
    }

    let health_damage = (final_damage - absorption).max(0.0);
    let projected = health - health_damage;

    if projected < SURVIVAL_FLOOR {
        Verdict::Save {
            consume_absorption: absorption > 0.0,
        }
    } else {
        Verdict::Allow
    }
}
