pub mod engine;
pub mod world;

use engine::{
    Action, ArgumentError, Capacity, GameError, LookReport, Output, POKE, Player, PlayerDetails,
    PlayerKind, PlayerRoster, RoomDetails, StateError, TargetDetails, render_outcome,
    room_can_see, visible_neighbors,
};
use world::{Item, Rect, World};

pub use world::{ValidationError, WorldBuilder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won { winner: String },
    /// Turns ran out with the target still alive.
    Escaped,
}

/// One running game: the world snapshot plus everything that changes
/// while players take turns.
#[derive(Debug, Clone)]
pub struct GameState {
    world: World,
    roster: PlayerRoster,
    current: usize,
    turns_remaining: u32,
    status: GameStatus,
    evidence: Vec<String>,
}

impl GameState {
    pub fn new(world: World) -> Self {
        GameState {
            roster: PlayerRoster::new(world.max_players),
            turns_remaining: world.turn_limit,
            world,
            current: 0,
            status: GameStatus::InProgress,
            evidence: Vec::new(),
        }
    }

    pub fn add_player(
        &mut self,
        name: &str,
        start_room: &str,
        capacity: Capacity,
        kind: PlayerKind,
    ) -> Result<(), ArgumentError> {
        self.roster.check_can_add(name)?;
        capacity.check()?;
        let start = self
            .world
            .room_index(start_room)
            .ok_or_else(|| ArgumentError::UnknownRoom(start_room.to_string()))?;
        self.roster.add(name, start, capacity, kind)
    }

    /// Process one line of console input for the current player.
    pub fn step(&mut self, input: &str) -> Result<Output, GameError> {
        let action: Action = input.parse()?;
        let outcome = self.apply(action)?;

        let mut out = Output::new();
        render_outcome(&mut out, &outcome);
        self.render_status(&mut out);
        Ok(out)
    }

    /// Announce the end of the game, if it has ended.
    pub fn render_status(&self, out: &mut Output) {
        match &self.status {
            GameStatus::InProgress => {}
            GameStatus::Won { winner } => out.event(format!(
                "{} is dead. {} wins!",
                self.world.target.name(),
                winner
            )),
            GameStatus::Escaped => out.event(format!(
                "Out of turns. {} escapes and nobody wins.",
                self.world.target.name()
            )),
        }
    }

    ///////////////
    /// QUERIES ///
    ///////////////

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn players(&self) -> &[Player] {
        self.roster.players()
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn winner(&self) -> Option<&str> {
        match &self.status {
            GameStatus::Won { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn turns_remaining(&self) -> u32 {
        self.turns_remaining
    }

    /// Item names spent in successful attacks, oldest first.
    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    pub fn room_names(&self) -> Vec<String> {
        self.world.room_names()
    }

    pub fn player_names(&self) -> Vec<String> {
        self.players().iter().map(|p| p.name().to_string()).collect()
    }

    pub fn room_locations(&self) -> Vec<(String, Rect)> {
        self.world
            .rooms
            .iter()
            .map(|r| (r.name.clone(), r.rect))
            .collect()
    }

    /// `(player, room)` pairs in turn order.
    pub fn player_locations(&self) -> Vec<(String, String)> {
        self.players()
            .iter()
            .map(|p| (p.name().to_string(), self.room_label(p.location())))
            .collect()
    }

    pub fn target_location(&self) -> &str {
        self.world
            .room_name(self.world.target.location())
            .unwrap_or_default()
    }

    pub fn pet_location(&self) -> &str {
        self.world.room_name(self.world.pet.location()).unwrap_or_default()
    }

    fn current_player(&self) -> Result<&Player, StateError> {
        self.roster.get(self.current).ok_or(StateError::NoPlayers)
    }

    pub fn current_player_name(&self) -> Result<&str, StateError> {
        self.current_player().map(Player::name)
    }

    pub fn is_current_player_human(&self) -> Result<bool, StateError> {
        self.current_player().map(Player::is_human)
    }

    /// Rooms the current player may move to.
    pub fn neighbors_to_move(&self) -> Result<Vec<String>, StateError> {
        let here = self.current_player()?.location();
        Ok(self.visible_neighbor_names(here))
    }

    pub fn items_to_pick(&self) -> Result<Vec<Item>, StateError> {
        let here = self.current_player()?.location();
        Ok(self.world.rooms[here].items().to_vec())
    }

    /// Held items followed by the bare-handed poke.
    pub fn items_to_kill(&self) -> Result<Vec<Item>, StateError> {
        let mut items = self.current_player()?.inventory().to_vec();
        items.push(Item::new(POKE, 1));
        Ok(items)
    }

    pub fn is_target_present(&self) -> bool {
        self.current_player()
            .map(|p| p.location() == self.world.target.location())
            .unwrap_or(false)
    }

    /// Whether player `a` can see player `b`. Nobody "sees" themselves.
    pub fn can_see(&self, a: &str, b: &str) -> Result<bool, ArgumentError> {
        if a == b {
            return Ok(false);
        }
        let from = self
            .roster
            .by_name(a)
            .ok_or_else(|| ArgumentError::UnknownPlayer(a.to_string()))?;
        let to = self
            .roster
            .by_name(b)
            .ok_or_else(|| ArgumentError::UnknownPlayer(b.to_string()))?;
        Ok(room_can_see(
            &self.world.graph,
            self.world.pet.location(),
            from.location(),
            to.location(),
        ))
    }

    /// True when any other player can see the current player.
    pub fn is_current_player_seen(&self) -> bool {
        let Ok(me) = self.current_player() else {
            return false;
        };
        self.players().iter().any(|other| {
            other.name() != me.name()
                && room_can_see(
                    &self.world.graph,
                    self.world.pet.location(),
                    other.location(),
                    me.location(),
                )
        })
    }

    ///////////////
    /// DETAILS ///
    ///////////////

    pub fn room_details(&self, name: &str) -> Result<RoomDetails, ArgumentError> {
        let idx = self
            .world
            .room_index(name)
            .ok_or_else(|| ArgumentError::UnknownRoom(name.to_string()))?;
        Ok(self.room_details_at(idx))
    }

    pub fn player_details(&self, name: &str) -> Result<PlayerDetails, ArgumentError> {
        let player = self
            .roster
            .by_name(name)
            .ok_or_else(|| ArgumentError::UnknownPlayer(name.to_string()))?;
        Ok(PlayerDetails {
            name: player.name().to_string(),
            items: player.inventory().to_vec(),
            remaining_capacity: player.remaining_capacity(),
            kind: player.kind(),
            room: self.room_label(player.location()),
        })
    }

    pub fn target_details(&self) -> TargetDetails {
        TargetDetails {
            name: self.world.target.name().to_string(),
            health: self.world.target.health(),
            room: self.target_location().to_string(),
        }
    }

    pub(crate) fn look_report(&self, room: usize) -> LookReport {
        let neighbors = visible_neighbors(&self.world.graph, room, self.world.pet.location())
            .into_iter()
            .map(|n| self.room_details_at(n))
            .collect();
        LookReport {
            room: self.room_details_at(room),
            neighbors,
        }
    }

    fn room_details_at(&self, idx: usize) -> RoomDetails {
        let room = &self.world.rooms[idx];
        RoomDetails {
            name: room.name.clone(),
            items: room.items().to_vec(),
            players: self
                .players()
                .iter()
                .filter(|p| p.location() == idx)
                .map(|p| p.name().to_string())
                .collect(),
            neighbors: self.visible_neighbor_names(idx),
            target: (self.world.target.location() == idx)
                .then(|| self.world.target.name().to_string()),
            pet: (self.world.pet.location() == idx).then(|| self.world.pet.name().to_string()),
        }
    }

    fn visible_neighbor_names(&self, idx: usize) -> Vec<String> {
        visible_neighbors(&self.world.graph, idx, self.world.pet.location())
            .into_iter()
            .map(|n| self.room_label(n))
            .collect()
    }

    fn room_label(&self, idx: usize) -> String {
        self.world.room_name(idx).unwrap_or_default().to_string()
    }
}
