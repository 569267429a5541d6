//! Protected-player roster.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a player, unique across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Fresh random id, for tests and stand-in worlds.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// The set of players under plot armor.
///
/// Single mutation entry point: the command executor. The interceptor only
/// ever calls [`contains`](Roster::contains). All access happens on the
/// host's dispatch thread, so no lock is needed.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    players: HashSet<PlayerId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sole query the interceptor needs.
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains(&id)
    }

    /// Returns `false` if the player was already protected.
    pub fn add(&mut self, id: PlayerId) -> bool {
        self.players.insert(id)
    }

    /// Returns `false` if the player was not protected.
    pub fn remove(&mut self, id: PlayerId) -> bool {
        self.players.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut roster = Roster::new();
        let id = PlayerId::random();
        assert!(roster.add(id));
        assert!(!roster.add(id));
        assert_eq!(roster.len(), 1);
        assert!(roster.contains(id));
    }

    #[test]
    fn test_remove() {
        let mut roster = Roster::new();
        let id = PlayerId::random();
        assert!(!roster.remove(id));
        roster.add(id);
        assert!(roster.remove(id));
        assert!(roster.is_empty());
        assert!(!roster.contains(id));
    }

    #[test]
    fn test_id_string_round_trip() {
        let id = PlayerId::random();
        let parsed: PlayerId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<PlayerId>().is_err());
    }
}
