use std::fmt;

use crate::engine::actions::ActionOutcome;
use crate::engine::output::Output;
use crate::engine::players::PlayerKind;
use crate::world::Item;

/// What a player learns about one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetails {
    pub name: String,
    pub items: Vec<Item>,
    pub players: Vec<String>,
    /// Visible neighbors only; the pet's room is left out.
    pub neighbors: Vec<String>,
    pub target: Option<String>,
    pub pet: Option<String>,
}

/// Result of a look: the player's room, then each visible neighbor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookReport {
    pub room: RoomDetails,
    pub neighbors: Vec<RoomDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDetails {
    pub name: String,
    pub items: Vec<Item>,
    /// `None` when the player can carry any number of items.
    pub remaining_capacity: Option<usize>,
    pub kind: PlayerKind,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDetails {
    pub name: String,
    pub health: i64,
    pub room: String,
}

fn list_or_none(names: impl Iterator<Item = String>) -> String {
    let list: Vec<String> = names.collect();
    if list.is_empty() {
        "(none)".to_string()
    } else {
        list.join(", ")
    }
}

pub fn render_room(out: &mut Output, room: &RoomDetails) {
    out.title(room.name.clone());
    out.say(format!(
        "Items: {}",
        list_or_none(room.items.iter().map(|i| format!("{} ({})", i.name, i.damage)))
    ));
    out.say(format!(
        "Players: {}",
        list_or_none(room.players.iter().cloned())
    ));
    out.say(format!(
        "Neighbors: {}",
        list_or_none(room.neighbors.iter().cloned())
    ));
    if let Some(target) = &room.target {
        out.event(format!("{} is here.", target));
    }
    if let Some(pet) = &room.pet {
        out.event(format!("{} is here.", pet));
    }
}

pub fn render_look(out: &mut Output, report: &LookReport) {
    render_room(out, &report.room);
    for neighbor in &report.neighbors {
        render_room(out, neighbor);
    }
}

pub fn render_player(out: &mut Output, player: &PlayerDetails) {
    out.title(format!("{} ({})", player.name, player.kind));
    out.say(format!("Location: {}", player.room));
    out.say(format!(
        "Carrying: {}",
        list_or_none(player.items.iter().map(|i| format!("{} ({})", i.name, i.damage)))
    ));
    match player.remaining_capacity {
        Some(n) => out.say(format!("Room for {} more item(s)", n)),
        None => out.say("Room for any number of items"),
    }
}

pub fn render_target(out: &mut Output, target: &TargetDetails) {
    out.title(format!("Target: {}", target.name));
    out.say(format!("Health: {}", target.health));
    out.say(format!("Location: {}", target.room));
}

pub fn render_outcome(out: &mut Output, outcome: &ActionOutcome) {
    match outcome {
        ActionOutcome::Moved { room } => out.event(format!("You move to {}.", room)),
        ActionOutcome::Picked { item } => out.event(format!(
            "You pick up {} (damage {}).",
            item.name, item.damage
        )),
        ActionOutcome::Looked(report) => render_look(out, report),
        ActionOutcome::PetMoved { room } => out.event(format!("The pet slinks off to {}.", room)),
        ActionOutcome::Attacked(attack) if attack.hit => out.event(format!(
            "You strike with {} for {} damage.",
            attack.weapon, attack.damage
        )),
        ActionOutcome::Attacked(_) => out.event("Someone saw you. The attack fails."),
    }
}

macro_rules! display_via_render {
    ($ty:ty, $render:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut out = Output::new();
                $render(&mut out, self);
                write!(f, "{}", out)
            }
        }
    };
}

display_via_render!(RoomDetails, render_room);
display_via_render!(LookReport, render_look);
display_via_render!(PlayerDetails, render_player);
display_via_render!(TargetDetails, render_target);
