use std::fmt;

use tracing::debug;

/// The character the players are hunting. It walks the rooms in index
/// order, wrapping around, one step per completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    name: String,
    health: i64,
    location: usize,
}

impl Target {
    /// Health is validated by the builder before this is called.
    pub(crate) fn new(name: impl Into<String>, health: u32) -> Self {
        Target {
            name: name.into(),
            health: health as i64,
            location: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i64 {
        self.health
    }

    pub fn location(&self) -> usize {
        self.location
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// `location = (location + 1) mod total_rooms`.
    pub(crate) fn advance(&mut self, total_rooms: usize) {
        if total_rooms == 0 {
            return;
        }
        self.location = (self.location + 1) % total_rooms;
        debug!(target_name = %self.name, room = self.location, "target moved");
    }

    /// Callers reject zero damage before mutating anything.
    pub(crate) fn take_damage(&mut self, damage: u32) {
        debug_assert!(damage >= 1, "damage must be at least 1");
        self.health -= damage as i64;
        debug!(target_name = %self.name, damage, health = self.health, "target wounded");
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Target Details: \nTarget Name = {} \nHealth Points = {}",
            self.name, self.health
        )
    }
}
