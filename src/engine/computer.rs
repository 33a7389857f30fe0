use rand::Rng;
use tracing::debug;

use crate::GameState;
use crate::engine::actions::{Action, ActionOutcome};
use crate::engine::error::{GameError, StateError};
use crate::world::Item;

/// Highest damage wins; on a tie the earlier entry is kept.
pub fn best_weapon(options: &[Item]) -> Option<&Item> {
    options.iter().fold(None, |best, item| match best {
        Some(b) if b.damage >= item.damage => Some(b),
        _ => Some(item),
    })
}

/// Decide what a computer player does this turn.
///
/// Unseen and alone with the target, it always attacks with its strongest
/// option. Otherwise it rolls one of move, pick, look or move-pet; a roll
/// with nothing to act on becomes a look.
pub fn choose_action<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Result<Action, StateError> {
    let player = state.acting_player()?;

    if state.is_target_present() && !state.is_current_player_seen() {
        if let Some(weapon) = best_weapon(&state.items_to_kill()?) {
            return Ok(Action::AttemptKill(weapon.name.clone()));
        }
    }

    let action = match rng.gen_range(0..4) {
        0 => {
            let rooms = state.neighbors_to_move()?;
            pick_one(&rooms, rng).map(Action::Move)
        }
        1 => {
            let items: Vec<Item> = state
                .items_to_pick()?
                .into_iter()
                .filter(|item| player.check_can_add(&item.name).is_ok())
                .collect();
            best_weapon(&items).map(|item| Action::Pick(item.name.clone()))
        }
        2 => Some(Action::Look),
        _ => pick_one(&state.room_names(), rng).map(Action::MovePet),
    };

    Ok(action.unwrap_or(Action::Look))
}

fn pick_one<R: Rng + ?Sized>(options: &[String], rng: &mut R) -> Option<String> {
    if options.is_empty() {
        None
    } else {
        Some(options[rng.gen_range(0..options.len())].clone())
    }
}

impl GameState {
    /// Let the current (computer) player choose and take its turn.
    pub fn play_computer_turn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(Action, ActionOutcome), GameError> {
        let action = choose_action(self, rng)?;
        debug!(player = self.current_player_name().unwrap_or_default(), %action, "computer chose");
        let outcome = self.apply(action.clone())?;
        Ok((action, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Capacity, POKE, PlayerKind};
    use crate::world::WorldBuilder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game() -> GameState {
        let mut b = WorldBuilder::new(36, 30, "Doctor Lucky's Mansion").unwrap();
        b.target("Doctor Lucky", 50)
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
            .item(0, 5, "Trowel")
            .unwrap()
            .item(0, 5, "Shears")
            .unwrap()
            .turn_limit(100)
            .unwrap()
            .max_players(3)
            .unwrap();
        b.new_game().unwrap()
    }

    #[test]
    fn best_weapon_keeps_first_of_equals() {
        let items = vec![
            Item::new("Revolver", 3),
            Item::new("Trowel", 5),
            Item::new("Shears", 5),
            Item::new(POKE, 1),
        ];
        assert_eq!(best_weapon(&items).map(|i| i.name.as_str()), Some("Trowel"));
        assert_eq!(best_weapon(&[]), None);
    }

    #[test]
    fn unseen_computer_with_target_always_attacks() {
        let mut g = game();
        g.add_player("Bot", "Green House", Capacity::Unlimited, PlayerKind::Computer)
            .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(
                choose_action(&g, &mut rng).unwrap(),
                Action::AttemptKill(POKE.to_string())
            );
        }
    }

    #[test]
    fn seen_computer_never_attacks() {
        let mut g = game();
        g.add_player("Bot", "Green House", Capacity::Unlimited, PlayerKind::Computer)
            .unwrap();
        g.add_player("Komal", "Green House", Capacity::Unlimited, PlayerKind::Human)
            .unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let action = choose_action(&g, &mut rng).unwrap();
            assert!(!matches!(action, Action::AttemptKill(_)), "{action}");
        }
    }

    #[test]
    fn pick_roll_in_an_empty_room_becomes_something_else() {
        let mut g = game();
        g.add_player("Bot", "Hedge Maze", Capacity::Unlimited, PlayerKind::Computer)
            .unwrap();
        g.add_player("Komal", "Hedge Maze", Capacity::Unlimited, PlayerKind::Human)
            .unwrap();
        // Hedge Maze holds nothing, so the pick roll has nothing to take.
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let action = choose_action(&g, &mut rng).unwrap();
            assert!(!matches!(action, Action::Pick(_)));
        }
    }

    #[test]
    fn computer_turns_always_resolve() {
        let mut g = game();
        g.add_player("Bot", "Piazza", Capacity::Limited(1), PlayerKind::Computer)
            .unwrap();
        g.add_player("Bot2", "Green House", Capacity::Limited(2), PlayerKind::Computer)
            .unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        while !g.is_game_over() {
            g.play_computer_turn(&mut rng).unwrap();
        }
        assert!(g.turns_remaining() == 0 || g.winner().is_some());
    }

    #[test]
    fn strongest_item_is_chosen_when_picking() {
        let g = game();
        let items = g.world().rooms[0].items().to_vec();
        assert_eq!(best_weapon(&items).map(|i| i.name.as_str()), Some("Trowel"));
    }
}
