use std::fmt;

use tracing::info;

use crate::engine::error::ArgumentError;
use crate::world::Item;

/// How many items a player may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    Unlimited,
    Limited(usize),
}

impl Capacity {
    /// Accepts the classic encoding: `-1` for unlimited, otherwise `>= 1`.
    pub fn from_raw(raw: i64) -> Result<Self, ArgumentError> {
        match raw {
            -1 => Ok(Capacity::Unlimited),
            n if n >= 1 => Ok(Capacity::Limited(n as usize)),
            n => Err(ArgumentError::InvalidCapacity(n)),
        }
    }

    /// Reject `Limited(0)`, which `from_raw` never produces but callers
    /// can still spell out by hand.
    pub fn check(&self) -> Result<(), ArgumentError> {
        match self {
            Capacity::Limited(0) => Err(ArgumentError::InvalidCapacity(0)),
            _ => Ok(()),
        }
    }

    fn allows(&self, held: usize) -> bool {
        match self {
            Capacity::Unlimited => true,
            Capacity::Limited(max) => held < *max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer,
}

impl PlayerKind {
    pub fn is_human(&self) -> bool {
        matches!(self, PlayerKind::Human)
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "Human"),
            PlayerKind::Computer => write!(f, "Computer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    location: usize,
    inventory: Vec<Item>,
    capacity: Capacity,
    kind: PlayerKind,
}

impl Player {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> usize {
        self.location
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_human(&self) -> bool {
        self.kind.is_human()
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.inventory.iter().find(|i| i.name == name)
    }

    /// Items the player could still pick up, or `None` when unlimited.
    pub fn remaining_capacity(&self) -> Option<usize> {
        match self.capacity {
            Capacity::Unlimited => None,
            Capacity::Limited(max) => Some(max.saturating_sub(self.inventory.len())),
        }
    }

    /// Same checks as `add_item`, without changing anything.
    pub fn check_can_add(&self, name: &str) -> Result<(), ArgumentError> {
        if self.item(name).is_some() {
            return Err(ArgumentError::ItemAlreadyHeld {
                player: self.name.clone(),
                item: name.to_string(),
            });
        }
        if !self.capacity.allows(self.inventory.len()) {
            return Err(ArgumentError::CapacityReached {
                player: self.name.clone(),
            });
        }
        Ok(())
    }

    pub(crate) fn add_item(&mut self, item: Item) -> Result<(), ArgumentError> {
        self.check_can_add(&item.name)?;
        self.inventory.push(item);
        Ok(())
    }

    pub(crate) fn remove_item(&mut self, name: &str) -> Result<Item, ArgumentError> {
        let idx = self
            .inventory
            .iter()
            .position(|i| i.name == name)
            .ok_or_else(|| ArgumentError::ItemNotHeld {
                player: self.name.clone(),
                item: name.to_string(),
            })?;
        Ok(self.inventory.remove(idx))
    }

    pub(crate) fn move_to(&mut self, room: usize) {
        self.location = room;
    }
}

/// Players in turn order, bounded by the world's player limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRoster {
    players: Vec<Player>,
    max_players: usize,
}

impl PlayerRoster {
    pub fn new(max_players: usize) -> Self {
        PlayerRoster {
            players: Vec::new(),
            max_players,
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, idx: usize) -> Option<&Player> {
        self.players.get(idx)
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut Player> {
        self.players.get_mut(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    pub fn by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Check the roster-level rules for a newcomer: room to join, a usable
    /// name, and no name clash. The start room is resolved by the caller.
    pub fn check_can_add(&self, name: &str) -> Result<(), ArgumentError> {
        if self.players.len() >= self.max_players {
            return Err(ArgumentError::RosterFull(self.max_players));
        }
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
            return Err(ArgumentError::EmptyName("player name"));
        }
        if self.index_of(name).is_some() {
            return Err(ArgumentError::DuplicatePlayer(name.to_string()));
        }
        Ok(())
    }

    pub(crate) fn add(
        &mut self,
        name: &str,
        start: usize,
        capacity: Capacity,
        kind: PlayerKind,
    ) -> Result<(), ArgumentError> {
        self.check_can_add(name)?;
        capacity.check()?;
        self.players.push(Player {
            name: name.to_string(),
            location: start,
            inventory: Vec::new(),
            capacity,
            kind,
        });
        info!(player = name, room = start, %kind, "player joined");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_encoding() {
        assert_eq!(Capacity::from_raw(-1), Ok(Capacity::Unlimited));
        assert_eq!(Capacity::from_raw(2), Ok(Capacity::Limited(2)));
        assert_eq!(
            Capacity::from_raw(0),
            Err(ArgumentError::InvalidCapacity(0))
        );
        assert_eq!(
            Capacity::from_raw(-5),
            Err(ArgumentError::InvalidCapacity(-5))
        );
        assert_eq!(
            Capacity::Limited(0).check(),
            Err(ArgumentError::InvalidCapacity(0))
        );
        assert_eq!(Capacity::Limited(1).check(), Ok(()));
    }

    #[test]
    fn roster_enforces_limit_and_unique_names() {
        let mut roster = PlayerRoster::new(2);
        roster
            .add("Komal", 0, Capacity::Unlimited, PlayerKind::Human)
            .unwrap();
        assert_eq!(
            roster.add("Komal", 1, Capacity::Unlimited, PlayerKind::Computer),
            Err(ArgumentError::DuplicatePlayer("Komal".into()))
        );
        roster
            .add("K", 1, Capacity::Limited(1), PlayerKind::Computer)
            .unwrap();
        assert_eq!(
            roster.add("Third", 0, Capacity::Unlimited, PlayerKind::Human),
            Err(ArgumentError::RosterFull(2))
        );
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.index_of("K"), Some(1));
    }

    #[test]
    fn blank_player_name_is_rejected() {
        let mut roster = PlayerRoster::new(3);
        assert_eq!(
            roster.add(" ", 0, Capacity::Unlimited, PlayerKind::Human),
            Err(ArgumentError::EmptyName("player name"))
        );
    }

    #[test]
    fn inventory_respects_capacity_and_duplicates() {
        let mut roster = PlayerRoster::new(1);
        roster
            .add("Komal", 0, Capacity::Limited(1), PlayerKind::Human)
            .unwrap();
        let player = roster.get_mut(0).unwrap();

        player.add_item(Item::new("Revolver", 3)).unwrap();
        assert_eq!(player.remaining_capacity(), Some(0));
        assert!(matches!(
            player.add_item(Item::new("Revolver", 3)),
            Err(ArgumentError::ItemAlreadyHeld { .. })
        ));
        assert!(matches!(
            player.add_item(Item::new("Cannon", 3)),
            Err(ArgumentError::CapacityReached { .. })
        ));

        assert_eq!(player.remove_item("Revolver"), Ok(Item::new("Revolver", 3)));
        assert!(matches!(
            player.remove_item("Revolver"),
            Err(ArgumentError::ItemNotHeld { .. })
        ));
    }
}
