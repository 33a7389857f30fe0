use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::engine::error::{ArgumentError, GameError, StateError};
use crate::engine::players::Player;
use crate::engine::render::LookReport;
use crate::engine::visibility::visible_neighbors;
use crate::world::Item;
use crate::{GameState, GameStatus};

/// Bare-handed attack, always available, always 1 damage.
pub const POKE: &str = "Poking";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Move(String),
    Pick(String),
    Look,
    MovePet(String),
    AttemptKill(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(room) => write!(f, "move {}", room),
            Action::Pick(item) => write!(f, "pick {}", item),
            Action::Look => write!(f, "look"),
            Action::MovePet(room) => write!(f, "pet {}", room),
            Action::AttemptKill(weapon) => write!(f, "kill {}", weapon),
        }
    }
}

/// Console vocabulary: `move|go <room>`, `pick|take <item>`, `look|l`,
/// `pet <room>`, `kill|attack [<item>]`, `poke`. A bare `kill` pokes.
impl FromStr for Action {
    type Err = ArgumentError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (verb, rest) = match input.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (input, ""),
        };
        let argument = |what: &'static str| {
            if rest.is_empty() {
                Err(ArgumentError::EmptyName(what))
            } else {
                Ok(rest.to_string())
            }
        };

        match verb.to_lowercase().as_str() {
            "look" | "l" if rest.is_empty() => Ok(Action::Look),
            "move" | "go" => Ok(Action::Move(argument("room name")?)),
            "pick" | "take" => Ok(Action::Pick(argument("item name")?)),
            "pet" => Ok(Action::MovePet(argument("room name")?)),
            "kill" | "attack" if rest.is_empty() => Ok(Action::AttemptKill(POKE.to_string())),
            "kill" | "attack" => Ok(Action::AttemptKill(rest.to_string())),
            "poke" if rest.is_empty() => Ok(Action::AttemptKill(POKE.to_string())),
            _ => Err(ArgumentError::UnknownCommand(input.to_string())),
        }
    }
}

/// What a resolved action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Moved { room: String },
    Picked { item: Item },
    Looked(LookReport),
    PetMoved { room: String },
    Attacked(Attack),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attack {
    pub weapon: String,
    /// Zero when the attempt was spotted.
    pub damage: u32,
    pub hit: bool,
}

impl GameState {
    /// Resolve one action for the current player. On error nothing changed
    /// and the same player is still up.
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome, GameError> {
        match action {
            Action::Move(room) => {
                self.move_to(&room)?;
                Ok(ActionOutcome::Moved { room })
            }
            Action::Pick(item) => self.pick(&item).map(|item| ActionOutcome::Picked { item }),
            Action::Look => self.look().map(ActionOutcome::Looked),
            Action::MovePet(room) => {
                self.move_pet(&room)?;
                Ok(ActionOutcome::PetMoved { room })
            }
            Action::AttemptKill(weapon) => self.attack(&weapon).map(ActionOutcome::Attacked),
        }
    }

    /// Step into a visible neighbor of the current room.
    pub fn move_to(&mut self, room: &str) -> Result<(), GameError> {
        let from = self.acting_player()?.location();
        let to = self
            .world
            .room_index(room)
            .ok_or_else(|| ArgumentError::UnknownRoom(room.to_string()))?;
        if !visible_neighbors(&self.world.graph, from, self.world.pet.location()).contains(&to) {
            return Err(ArgumentError::NotVisibleNeighbor(room.to_string()).into());
        }

        let player = self.acting_player_mut()?;
        player.move_to(to);
        debug!(player = player.name(), room, "player moved");
        self.end_turn(true);
        Ok(())
    }

    /// Take an item lying in the current room.
    pub fn pick(&mut self, item: &str) -> Result<Item, GameError> {
        let player = self.acting_player()?;
        let here = player.location();
        if !self.world.rooms[here].has_item(item) {
            return Err(ArgumentError::UnknownItem(item.to_string()).into());
        }
        player.check_can_add(item)?;

        let taken = self.world.rooms[here]
            .take_item(item)
            .ok_or_else(|| ArgumentError::UnknownItem(item.to_string()))?;
        let player = self.acting_player_mut()?;
        player.add_item(taken.clone())?;
        debug!(player = player.name(), item, damage = taken.damage, "item picked");
        self.end_turn(true);
        Ok(taken)
    }

    /// Report the current room and every visible neighbor. Uses up the turn.
    pub fn look(&mut self) -> Result<LookReport, GameError> {
        let player = self.acting_player()?;
        let report = self.look_report(player.location());
        debug!(player = player.name(), room = %report.room.name, "looked around");
        self.end_turn(true);
        Ok(report)
    }

    /// Send the pet anywhere in the world. The pet does not wander this
    /// turn; its next wander starts from the new room.
    pub fn move_pet(&mut self, room: &str) -> Result<(), GameError> {
        let player = self.acting_player()?;
        let to = self
            .world
            .room_index(room)
            .ok_or_else(|| ArgumentError::UnknownRoom(room.to_string()))?;
        debug!(player = player.name(), room, "pet relocated");
        self.world.pet.relocate(to);
        self.end_turn(false);
        Ok(())
    }

    /// Try to wound the target with a held item or [`POKE`]. Returns
    /// `false` when another player saw the attempt.
    pub fn attempt_kill(&mut self, weapon: &str) -> Result<bool, GameError> {
        self.attack(weapon).map(|attack| attack.hit)
    }

    fn attack(&mut self, weapon: &str) -> Result<Attack, GameError> {
        let player = self.acting_player()?;
        if weapon.trim().is_empty() {
            return Err(ArgumentError::EmptyName("item name").into());
        }
        if player.location() != self.world.target.location() {
            return Err(StateError::TargetNotPresent.into());
        }

        if self.is_current_player_seen() {
            debug!(player = player.name(), weapon, "attack spotted");
            self.end_turn(true);
            return Ok(Attack {
                weapon: weapon.to_string(),
                damage: 0,
                hit: false,
            });
        }

        let held = player.item(weapon).map(|item| item.damage);
        let damage = match held {
            Some(0) => return Err(ArgumentError::HarmlessItem(weapon.to_string()).into()),
            Some(_) => {
                let item = self.acting_player_mut()?.remove_item(weapon)?;
                self.evidence.push(item.name.clone());
                item.damage
            }
            None if weapon.trim().eq_ignore_ascii_case(POKE) => 1,
            None => {
                return Err(ArgumentError::ItemNotHeld {
                    player: player.name().to_string(),
                    item: weapon.to_string(),
                }
                .into());
            }
        };

        debug!(weapon, damage, "attack landed");
        self.world.target.take_damage(damage);
        self.end_turn(true);
        Ok(Attack {
            weapon: weapon.to_string(),
            damage,
            hit: true,
        })
    }

    /// The current player, provided the game can accept an action.
    pub(crate) fn acting_player(&self) -> Result<&Player, StateError> {
        if self.roster.is_empty() {
            return Err(StateError::NoPlayers);
        }
        if self.is_game_over() {
            return Err(StateError::GameOver);
        }
        self.roster.get(self.current).ok_or(StateError::NoPlayers)
    }

    fn acting_player_mut(&mut self) -> Result<&mut Player, StateError> {
        self.acting_player()?;
        self.roster.get_mut(self.current).ok_or(StateError::NoPlayers)
    }

    /// Pass play to the next player, then either declare the acting player
    /// the winner or let the target and pet move and burn one turn.
    fn end_turn(&mut self, wander_pet: bool) {
        let actor = self
            .roster
            .get(self.current)
            .map(|p| p.name().to_string())
            .unwrap_or_default();
        self.current = (self.current + 1) % self.roster.len().max(1);

        if self.world.target.is_dead() {
            info!(winner = %actor, target = self.world.target.name(), "target killed");
            self.status = GameStatus::Won { winner: actor };
            return;
        }

        self.world.target.advance(self.world.rooms.len());
        if wander_pet {
            self.world.pet.wander(&self.world.graph);
        }
        self.turns_remaining = self.turns_remaining.saturating_sub(1);
        if self.turns_remaining == 0 {
            info!(target = self.world.target.name(), "target escaped");
            self.status = GameStatus::Escaped;
        }
    }
}
