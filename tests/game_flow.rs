use std::path::PathBuf;

use mansion_hunt::engine::{
    ArgumentError, Capacity, GameError, POKE, PlayerKind, StateError,
};
use mansion_hunt::{GameState, GameStatus, WorldBuilder};

const MANSION: &str = "36 30 Doctor Lucky's Mansion
3 Doctor Lucky
Fortune the Cat
3
28 26 35 29 Green House
30 20 35 25 Hedge Maze
28 12 35 19 Piazza
3
0 3 Revolver
1 3 Civil War Cannon
1 3 Cannon
";

fn builder(turns: i64, max_players: i64) -> WorldBuilder {
    let mut b = WorldBuilder::from_spec_str(MANSION).unwrap();
    b.turn_limit(turns).unwrap().max_players(max_players).unwrap();
    b
}

fn game(turns: i64) -> GameState {
    builder(turns, 4).new_game().unwrap()
}

fn join(g: &mut GameState, name: &str, room: &str) {
    g.add_player(name, room, Capacity::Unlimited, PlayerKind::Human)
        .unwrap();
}

fn world_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("worlds")
        .join(name)
}

#[test]
fn target_escapes_when_turns_run_out() {
    let mut g = game(3);
    join(&mut g, "Komal", "Green House");

    for _ in 0..3 {
        g.look().unwrap();
    }

    assert_eq!(g.turns_remaining(), 0);
    assert!(g.is_game_over());
    assert_eq!(g.winner(), None);
    assert_eq!(g.status(), &GameStatus::Escaped);
    assert_eq!(g.look().unwrap_err(), GameError::State(StateError::GameOver));
}

#[test]
fn killing_blow_ends_the_game_at_once() {
    let mut g = game(10);
    join(&mut g, "Komal", "Green House");

    g.pick("Revolver").unwrap();
    g.move_pet("Piazza").unwrap();
    g.move_pet("Piazza").unwrap();
    assert_eq!(g.target_location(), "Green House");

    assert!(g.attempt_kill("Revolver").unwrap());
    assert!(g.is_game_over());
    assert_eq!(g.winner(), Some("Komal"));
    assert_eq!(g.turns_remaining(), 7);
    assert_eq!(g.target_details().health, 0);
    assert_eq!(g.evidence(), ["Revolver".to_string()]);
}

#[test]
fn spotted_attack_fails_but_uses_the_turn() {
    let mut g = game(10);
    join(&mut g, "Komal", "Green House");
    join(&mut g, "K", "Green House");

    assert!(g.is_current_player_seen());
    assert!(!g.attempt_kill(POKE).unwrap());

    assert_eq!(g.target_details().health, 3);
    assert_eq!(g.target_location(), "Hedge Maze");
    assert_eq!(g.pet_location(), "Hedge Maze");
    assert_eq!(g.turns_remaining(), 9);
    assert_eq!(g.current_player_name(), Ok("K"));
    assert!(g.evidence().is_empty());
}

#[test]
fn pet_blocks_sight_into_its_room_only() {
    let mut g = game(10);
    join(&mut g, "Komal", "Green House");
    join(&mut g, "K", "Hedge Maze");
    assert_eq!(g.pet_location(), "Green House");

    assert_eq!(g.can_see("Komal", "K"), Ok(true));
    assert_eq!(g.can_see("K", "Komal"), Ok(false));
    assert_eq!(g.can_see("Komal", "Komal"), Ok(false));
    assert_eq!(
        g.can_see("Komal", "Nobody"),
        Err(ArgumentError::UnknownPlayer("Nobody".into()))
    );
    // Komal is up, and K cannot see into the pet's room.
    assert!(!g.is_current_player_seen());
}

#[test]
fn every_action_needs_a_player() {
    let mut g = game(3);
    let no_players = GameError::State(StateError::NoPlayers);
    assert_eq!(g.look().unwrap_err(), no_players);
    assert_eq!(g.move_to("Hedge Maze").unwrap_err(), no_players);
    assert_eq!(g.pick("Revolver").unwrap_err(), no_players);
    assert_eq!(g.move_pet("Piazza").unwrap_err(), no_players);
    assert_eq!(g.attempt_kill(POKE).unwrap_err(), no_players);
    assert_eq!(g.turns_remaining(), 3);
}

#[test]
fn failed_actions_change_nothing() {
    let mut g = game(5);
    join(&mut g, "Komal", "Piazza");
    join(&mut g, "K", "Green House");
    g.look().unwrap();

    let snapshot = |g: &GameState| {
        (
            g.target_location().to_string(),
            g.pet_location().to_string(),
            g.turns_remaining(),
            g.current_player_name().map(str::to_string),
            g.player_locations(),
            g.room_details("Green House").unwrap(),
        )
    };
    let before = snapshot(&g);

    assert!(g.move_to("Piazza").unwrap_err().is_argument());
    assert!(g.pick("Cannon").unwrap_err().is_argument());
    assert!(g.move_pet("Attic").unwrap_err().is_argument());
    // The target has wandered off to Hedge Maze.
    assert!(g.attempt_kill("Revolver").unwrap_err().is_state());

    assert_eq!(snapshot(&g), before);
}

#[test]
fn players_take_turns_in_join_order() {
    let mut g = game(10);
    join(&mut g, "Komal", "Green House");
    join(&mut g, "K", "Hedge Maze");
    join(&mut g, "Z", "Piazza");

    let mut order = Vec::new();
    for _ in 0..4 {
        order.push(g.current_player_name().unwrap().to_string());
        g.look().unwrap();
    }
    assert_eq!(order, ["Komal", "K", "Z", "Komal"]);
}

#[test]
fn pet_wanders_depth_first_after_each_turn() {
    let mut g = game(10);
    join(&mut g, "Komal", "Piazza");

    let mut path = Vec::new();
    for _ in 0..5 {
        g.look().unwrap();
        path.push(g.pet_location().to_string());
    }
    assert_eq!(
        path,
        ["Hedge Maze", "Piazza", "Hedge Maze", "Piazza", "Green House"]
    );
}

#[test]
fn restart_builds_an_untouched_game() {
    let b = builder(5, 4);
    let mut first = b.new_game().unwrap();
    join(&mut first, "Komal", "Green House");
    first.pick("Revolver").unwrap();

    let second = b.new_game().unwrap();
    assert!(second.players().is_empty());
    assert_eq!(second.turns_remaining(), 5);
    assert_eq!(second.target_location(), "Green House");
    assert!(
        second
            .room_details("Green House")
            .unwrap()
            .items
            .iter()
            .any(|i| i.name == "Revolver")
    );
}

#[test]
fn sample_text_world_loads() {
    let mut b = WorldBuilder::from_spec_file(&world_file("mansion.txt")).unwrap();
    b.turn_limit(20).unwrap().max_players(3).unwrap();
    let g = b.new_game().unwrap();
    assert_eq!(g.room_names().len(), 8);
    assert_eq!(g.target_details().health, 50);
    assert_eq!(
        g.world().neighbor_names("Green House"),
        Some(vec!["Hedge Maze".to_string()])
    );
}

#[test]
fn sample_toml_world_loads_with_game_settings() {
    let b = WorldBuilder::from_toml_file(&world_file("cottage.toml")).unwrap();
    let mut g = b.new_game().unwrap();
    assert_eq!(g.turns_remaining(), 30);
    assert_eq!(g.world().max_players, 4);
    assert_eq!(
        g.world().neighbor_names("Kitchen"),
        Some(vec!["Parlor".to_string(), "Cellar".to_string()])
    );

    join(&mut g, "Komal", "Study");
    g.pick("Candle").unwrap();
    assert_eq!(g.player_details("Komal").unwrap().items.len(), 1);
}

#[test]
fn missing_world_file_is_an_io_error() {
    assert!(matches!(
        WorldBuilder::from_spec_file(&world_file("no_such_world.txt")),
        Err(mansion_hunt::ValidationError::Io(_))
    ));
}
