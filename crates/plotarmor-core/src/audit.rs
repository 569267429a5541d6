//! Intervention audit lines.
//!
//! One structured line per triggered interception, emitted through the
//! `log` facade so operators can cross-reference recordings by timestamp.
//! Nothing is emitted on the allow path, and emission can never feed back
//! into the veto decision.

use plotarmor_logic::damage::DamageCause;
use plotarmor_logic::geometry::Vec3;

/// Which interception branch fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Player was already at the survival floor; all damage negated.
    Blocked,
    /// Damage would have been lethal; health clamped to the floor.
    Saved,
}

impl Action {
    pub fn tag(self) -> &'static str {
        match self {
            Action::Blocked => "BLOCKED",
            Action::Saved => "SAVED",
        }
    }
}

/// One record of an interception.
#[derive(Debug, Clone)]
pub struct Intervention {
    pub action: Action,
    /// Target's display name.
    pub player: String,
    pub cause: DamageCause,
    /// Raw final damage the event carried.
    pub damage: f64,
    /// Health before the event was handled.
    pub health_before: f64,
    /// Target position at handling time.
    pub position: Vec3,
}

impl Intervention {
    pub fn emit(&self) {
        log::info!("{}", self);
    }
}

impl std::fmt::Display for Intervention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Position is truncated to whole blocks.
        write!(
            f,
            "[PlotArmor] {} | {} | cause: {:?} | damage: {:.1} | health: {:.1} | pos: {} {} {}",
            self.action.tag(),
            self.player,
            self.cause,
            self.damage,
            self.health_before,
            self.position.x as i64,
            self.position.y as i64,
            self.position.z as i64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let line = Intervention {
            action: Action::Saved,
            player: "Steve".to_string(),
            cause: DamageCause::Attack,
            damage: 3.0,
            health_before: 2.0,
            position: Vec3::new(10.7, 64.2, -3.9),
        }
        .to_string();
        assert_eq!(
            line,
            "[PlotArmor] SAVED | Steve | cause: Attack | damage: 3.0 | health: 2.0 | pos: 10 64 -3"
        );
    }

    #[test]
    fn test_action_tags() {
        assert_eq!(Action::Blocked.tag(), "BLOCKED");
        assert_eq!(Action::Saved.tag(), "SAVED");
    }
}
