use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use super::graph::WorldGraph;
use super::loader;
use super::model::{Item, Room};
use super::validator::{
    ValidationError, validate_damage, validate_grid, validate_health, validate_max_players,
    validate_name, validate_rect, validate_turns,
};
use crate::GameState;
use crate::engine::{Target, TargetPet};

/// Runtime world snapshot handed to the game. Owns all of its parts; two
/// snapshots built from one builder share nothing.
#[derive(Debug, Clone)]
pub struct World {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub rooms: Vec<Room>,
    pub graph: WorldGraph,
    pub target: Target,
    pub pet: TargetPet,
    pub turn_limit: u32,
    pub max_players: usize,
}

impl World {
    pub fn room_index(&self, name: &str) -> Option<usize> {
        self.rooms.iter().position(|r| r.name == name)
    }

    pub fn room_name(&self, idx: usize) -> Option<&str> {
        self.rooms.get(idx).map(|r| r.name.as_str())
    }

    pub fn room_names(&self) -> Vec<String> {
        self.rooms.iter().map(|r| r.name.clone()).collect()
    }

    /// Neighbor names straight from the graph, ignoring the pet.
    pub fn neighbor_names(&self, name: &str) -> Option<Vec<String>> {
        let idx = self.room_index(name)?;
        Some(
            self.graph
                .neighbors(idx)
                .iter()
                .filter_map(|&n| self.room_name(n).map(str::to_string))
                .collect(),
        )
    }
}

/// Collects and checks a world specification piece by piece. Every setter
/// validates its own input; `build` checks completeness and derives the
/// adjacency graph.
#[derive(Debug, Clone)]
pub struct WorldBuilder {
    rows: usize,
    cols: usize,
    name: String,
    target: Option<(String, u32)>,
    pet_name: Option<String>,
    rooms: Vec<Room>,
    grid: Vec<Option<usize>>,
    item_names: HashSet<String>,
    turn_limit: Option<u32>,
    max_players: Option<usize>,
}

impl WorldBuilder {
    pub fn new(rows: i64, cols: i64, name: &str) -> Result<Self, ValidationError> {
        let (rows, cols) = validate_grid(rows, cols)?;
        validate_name("world name", name)?;
        Ok(WorldBuilder {
            rows,
            cols,
            name: name.trim().to_string(),
            target: None,
            pet_name: None,
            rooms: Vec::new(),
            grid: vec![None; rows * cols],
            item_names: HashSet::new(),
            turn_limit: None,
            max_players: None,
        })
    }

    /// Parse the line-based world format.
    pub fn from_spec_str(text: &str) -> Result<Self, ValidationError> {
        loader::parse_spec(text)
    }

    pub fn from_spec_file(path: &Path) -> Result<Self, ValidationError> {
        loader::load_spec_file(path)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ValidationError> {
        loader::parse_toml(text)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ValidationError> {
        loader::load_toml_file(path)
    }

    pub fn target(&mut self, name: &str, health: i64) -> Result<&mut Self, ValidationError> {
        let health = validate_health(health)?;
        validate_name("target name", name)?;
        self.target = Some((name.trim().to_string(), health));
        Ok(self)
    }

    pub fn pet(&mut self, name: &str) -> Result<&mut Self, ValidationError> {
        validate_name("pet name", name)?;
        self.pet_name = Some(name.trim().to_string());
        Ok(self)
    }

    /// Add a room and stamp its cells onto the grid. `corners` is
    /// (top_row, top_col, bottom_row, bottom_col), inclusive.
    pub fn room(&mut self, corners: [i64; 4], name: &str) -> Result<&mut Self, ValidationError> {
        validate_name("room name", name)?;
        let name = name.trim();
        if self.rooms.iter().any(|r| r.name == name) {
            return Err(ValidationError::DuplicateRoom(name.to_string()));
        }
        let rect = validate_rect(name, corners, self.rows, self.cols)?;

        // Check every cell before stamping any, so a rejected room leaves
        // the grid untouched.
        for (row, col) in rect.cells() {
            if let Some(owner) = self.grid[row * self.cols + col] {
                return Err(ValidationError::Overlap {
                    name: name.to_string(),
                    other: self.rooms[owner].name.clone(),
                    row,
                    col,
                });
            }
        }

        let idx = self.rooms.len();
        for (row, col) in rect.cells() {
            self.grid[row * self.cols + col] = Some(idx);
        }
        self.rooms.push(Room::new(name, rect));
        Ok(self)
    }

    pub fn item(&mut self, room: i64, damage: i64, name: &str) -> Result<&mut Self, ValidationError> {
        validate_name("item name", name)?;
        let name = name.trim();
        if self.item_names.contains(name) {
            return Err(ValidationError::DuplicateItem(name.to_string()));
        }
        let damage = validate_damage(name, damage)?;
        if room < 0 || room as usize >= self.rooms.len() {
            return Err(ValidationError::ItemRoomOutOfRange {
                name: name.to_string(),
                room,
                room_count: self.rooms.len(),
            });
        }

        self.item_names.insert(name.to_string());
        self.rooms[room as usize].add_item(Item::new(name, damage));
        Ok(self)
    }

    pub fn turn_limit(&mut self, turns: i64) -> Result<&mut Self, ValidationError> {
        self.turn_limit = Some(validate_turns(turns)?);
        Ok(self)
    }

    pub fn max_players(&mut self, max: i64) -> Result<&mut Self, ValidationError> {
        self.max_players = Some(validate_max_players(max)?);
        Ok(self)
    }

    pub fn has_turn_limit(&self) -> bool {
        self.turn_limit.is_some()
    }

    pub fn has_max_players(&self) -> bool {
        self.max_players.is_some()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Produce an independent world. Calling this again yields another
    /// fresh copy, which is how a game restarts.
    pub fn build(&self) -> Result<World, ValidationError> {
        let turn_limit = self.turn_limit.ok_or(ValidationError::Missing("turn limit"))?;
        let max_players = self
            .max_players
            .ok_or(ValidationError::Missing("maximum number of players"))?;
        let (target_name, health) = self
            .target
            .as_ref()
            .ok_or(ValidationError::Missing("target"))?;
        let pet_name = self.pet_name.as_ref().ok_or(ValidationError::Missing("pet"))?;
        if self.rooms.is_empty() {
            return Err(ValidationError::Missing("rooms"));
        }

        let graph = WorldGraph::from_grid(&self.grid, self.rows, self.cols, self.rooms.len());
        let target = Target::new(target_name.clone(), *health);
        let pet = TargetPet::new(pet_name.clone(), target.location());

        info!(
            world = %self.name,
            rooms = self.rooms.len(),
            turns = turn_limit,
            max_players,
            "world built"
        );

        Ok(World {
            name: self.name.clone(),
            rows: self.rows,
            cols: self.cols,
            rooms: self.rooms.clone(),
            graph,
            target,
            pet,
            turn_limit,
            max_players,
        })
    }

    /// Build a world and wrap it in a fresh game.
    pub fn new_game(&self) -> Result<GameState, ValidationError> {
        Ok(GameState::new(self.build()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mansion() -> WorldBuilder {
        let mut b = WorldBuilder::new(36, 30, "Doctor Lucky's Mansion").unwrap();
        b.target("Doctor Lucky", 3)
            .unwrap()
            .pet("Fortune the Cat")
            .unwrap()
            .room([28, 26, 35, 29], "Green House")
            .unwrap()
            .room([30, 20, 35, 25], "Hedge Maze")
            .unwrap()
            .room([28, 12, 35, 19], "Piazza")
            .unwrap()
            .item(0, 3, "Revolver")
            .unwrap()
            .turn_limit(3)
            .unwrap()
            .max_players(4)
            .unwrap();
        b
    }

    #[test]
    fn linear_mansion_adjacency() {
        let world = mansion().build().unwrap();
        assert_eq!(
            world.neighbor_names("Green House"),
            Some(vec!["Hedge Maze".to_string()])
        );
        assert_eq!(
            world.neighbor_names("Hedge Maze"),
            Some(vec!["Green House".to_string(), "Piazza".to_string()])
        );
        assert_eq!(world.neighbor_names("Piazza"), Some(vec!["Hedge Maze".to_string()]));
        assert_eq!(world.neighbor_names("Attic"), None);
    }

    #[test]
    fn overlapping_room_is_rejected_and_grid_untouched() {
        let mut b = mansion();
        let err = b.room([27, 10, 29, 13], "Kitchen").unwrap_err();
        assert!(matches!(err, ValidationError::Overlap { ref other, .. } if other == "Piazza"));
        // The rejected room left no cells behind on row 27.
        b.room([26, 10, 27, 13], "Kitchen").unwrap();
        assert_eq!(b.room_count(), 4);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut b = mansion();
        assert_eq!(
            b.room([0, 0, 1, 1], "Piazza").unwrap_err(),
            ValidationError::DuplicateRoom("Piazza".into())
        );
        assert_eq!(
            b.item(1, 2, "Revolver").unwrap_err(),
            ValidationError::DuplicateItem("Revolver".into())
        );
    }

    #[test]
    fn item_owner_must_exist() {
        let mut b = mansion();
        assert!(matches!(
            b.item(3, 1, "Rope"),
            Err(ValidationError::ItemRoomOutOfRange { room: 3, .. })
        ));
        assert!(matches!(
            b.item(-1, 1, "Rope"),
            Err(ValidationError::ItemRoomOutOfRange { room: -1, .. })
        ));
    }

    #[test]
    fn build_requires_turns_and_player_limit() {
        let mut b = WorldBuilder::new(4, 4, "Tiny").unwrap();
        b.target("T", 1).unwrap().pet("P").unwrap().room([0, 0, 1, 1], "A").unwrap();
        assert_eq!(b.build().unwrap_err(), ValidationError::Missing("turn limit"));
        b.turn_limit(1).unwrap();
        assert_eq!(
            b.build().unwrap_err(),
            ValidationError::Missing("maximum number of players")
        );
        b.max_players(1).unwrap();
        assert!(b.build().is_ok());
    }

    #[test]
    fn non_positive_settings_are_rejected() {
        let mut b = mansion();
        assert_eq!(b.turn_limit(0).unwrap_err(), ValidationError::NonPositiveTurns(0));
        assert_eq!(
            b.max_players(-2).unwrap_err(),
            ValidationError::NonPositiveMaxPlayers(-2)
        );
        assert_eq!(
            b.target("Doctor Lucky", 0).unwrap_err(),
            ValidationError::NonPositiveHealth(0)
        );
    }

    #[test]
    fn rebuilt_worlds_are_independent() {
        let builder = mansion();
        let mut first = builder.build().unwrap();
        let second = builder.build().unwrap();

        first.target.advance(first.rooms.len());
        first.rooms[0].take_item("Revolver");

        assert_eq!(second.target.location(), 0);
        assert!(second.rooms[0].has_item("Revolver"));
        assert_eq!(first.graph, second.graph);
        assert_eq!(first.room_names(), second.room_names());
    }

    #[test]
    fn pet_starts_with_target() {
        let world = mansion().build().unwrap();
        assert_eq!(world.pet.location(), world.target.location());
    }
}
