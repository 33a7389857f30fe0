mod actions;
mod computer;
mod error;
mod output;
mod pet;
mod players;
mod render;
mod target;
mod visibility;

pub use actions::{Action, ActionOutcome, Attack, POKE};
pub use computer::{best_weapon, choose_action};
pub use error::{ArgumentError, GameError, StateError};
pub use output::{Output, OutputBlock};
pub use pet::TargetPet;
pub use players::{Capacity, Player, PlayerKind, PlayerRoster};
pub use render::{
    LookReport, PlayerDetails, RoomDetails, TargetDetails, render_look, render_outcome,
    render_player, render_room, render_target,
};
pub use target::Target;
pub use visibility::{room_can_see, visible_neighbors};
