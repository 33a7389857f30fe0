use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use mansion_hunt::engine::{Capacity, Output, OutputBlock, PlayerKind, render_outcome};
use mansion_hunt::{GameState, ValidationError, WorldBuilder};

const DEFAULT_TURNS: i64 = 50;
const DEFAULT_MAX_PLAYERS: i64 = 10;

/// Hunt the target through a mansion, one turn at a time.
#[derive(Parser, Debug)]
#[command(name = "mansion_hunt", version)]
struct Args {
    /// World specification: the line-based text format, or TOML when the
    /// file ends in `.toml`.
    world: PathBuf,

    /// Number of turns before the target escapes.
    #[arg(long)]
    turns: Option<i64>,

    /// Maximum number of players.
    #[arg(long)]
    max_players: Option<i64>,

    /// Seed for the computer players' choices.
    #[arg(long)]
    seed: Option<u64>,
}

enum Ending {
    Restart,
    Quit,
}

fn flush_output(out: Output) {
    let mut printed_anything = false;
    let mut started_events = false;

    for block in out.blocks {
        match block {
            OutputBlock::Title(t) => {
                println!("\n{}", t);
                printed_anything = true;
            }
            OutputBlock::Text(line) => {
                println!("{}", line);
                printed_anything = true;
            }
            OutputBlock::Event(ev) => {
                if !started_events {
                    if printed_anything {
                        println!();
                    }
                    started_events = true;
                }
                println!("{}", ev);
                printed_anything = true;
            }
            OutputBlock::Error(err) => {
                println!("Error: {}", err);
                printed_anything = true;
            }
        }
    }
}

/// Print `prompt` and read one trimmed line. `None` on end of input.
fn ask(prompt: &str) -> io::Result<Option<String>> {
    print!("{} ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn load_builder(args: &Args) -> Result<WorldBuilder, ValidationError> {
    let path: &Path = &args.world;
    let mut builder = if path.extension().is_some_and(|ext| ext == "toml") {
        WorldBuilder::from_toml_file(path)?
    } else {
        WorldBuilder::from_spec_file(path)?
    };

    match args.turns {
        Some(turns) => {
            builder.turn_limit(turns)?;
        }
        None if !builder.has_turn_limit() => {
            builder.turn_limit(DEFAULT_TURNS)?;
        }
        None => {}
    }
    match args.max_players {
        Some(max) => {
            builder.max_players(max)?;
        }
        None if !builder.has_max_players() => {
            builder.max_players(DEFAULT_MAX_PLAYERS)?;
        }
        None => {}
    }
    Ok(builder)
}

/// Collect players until the roster is full or a blank name is entered.
/// Returns `false` if input ran out.
fn add_players(game: &mut GameState) -> io::Result<bool> {
    let max = game.world().max_players;
    println!("\nAdd up to {} players. Leave the name blank when done.", max);
    println!("Rooms: {}", game.room_names().join(", "));

    while game.players().len() < max {
        let Some(name) = ask("Player name:")? else {
            return Ok(false);
        };
        if name.is_empty() {
            if game.players().is_empty() {
                println!("At least one player is needed.");
                continue;
            }
            break;
        }
        let Some(room) = ask("Starting room:")? else {
            return Ok(false);
        };
        let Some(raw_capacity) = ask("Item capacity (-1 for unlimited):")? else {
            return Ok(false);
        };
        let Some(computer) = ask("Computer player? (y/n):")? else {
            return Ok(false);
        };

        let capacity = match raw_capacity.parse::<i64>() {
            Ok(raw) => Capacity::from_raw(raw),
            Err(_) => {
                println!("Error: capacity must be a whole number");
                continue;
            }
        };
        let kind = if computer.eq_ignore_ascii_case("y") {
            PlayerKind::Computer
        } else {
            PlayerKind::Human
        };

        match capacity.and_then(|c| game.add_player(&name, &room, c, kind)) {
            Ok(()) => println!("{} joins in {}.", name, room),
            Err(e) => println!("Error: {}", e),
        }
    }
    Ok(true)
}

fn show_turn(game: &GameState) {
    let mut out = Output::new();
    out.title(format!("Turns left: {}", game.turns_remaining()));
    out.say(game.target_details().to_string());
    if let Ok(name) = game.current_player_name() {
        if let Ok(details) = game.player_details(name) {
            out.title(format!("{}'s turn", name));
            out.say(details.to_string());
        }
    }
    flush_output(out);
}

fn show_options(game: &GameState) {
    let mut out = Output::new();
    out.say("Commands: move <room>, pick <item>, look, pet <room>, kill [<item>], restart, quit");
    if let Ok(rooms) = game.neighbors_to_move() {
        out.say(format!("Move to: {}", rooms.join(", ")));
    }
    if let Ok(items) = game.items_to_pick() {
        let names: Vec<String> = items.iter().map(|i| i.name.clone()).collect();
        out.say(format!("Pick up: {}", names.join(", ")));
    }
    if game.is_target_present() {
        if let Ok(weapons) = game.items_to_kill() {
            let names: Vec<String> = weapons.iter().map(|i| i.to_string()).collect();
            out.say(format!("Attack with: {}", names.join(", ")));
        }
    }
    flush_output(out);
}

fn play(game: &mut GameState, rng: &mut StdRng) -> io::Result<Ending> {
    while !game.is_game_over() {
        show_turn(game);

        if game.is_current_player_human().unwrap_or(true) {
            let Some(input) = ask(">")? else {
                return Ok(Ending::Quit);
            };
            match input.to_lowercase().as_str() {
                "" => continue,
                "quit" | "exit" => return Ok(Ending::Quit),
                "restart" => return Ok(Ending::Restart),
                "help" | "?" => {
                    show_options(game);
                    continue;
                }
                _ => {}
            }
            match game.step(&input) {
                Ok(out) => flush_output(out),
                Err(e) => {
                    let mut out = Output::new();
                    out.error(e.to_string());
                    flush_output(out);
                }
            }
        } else {
            let name = game.current_player_name().unwrap_or_default().to_string();
            let mut out = Output::new();
            match game.play_computer_turn(rng) {
                Ok((action, outcome)) => {
                    out.say(format!("{} chooses: {}", name, action));
                    render_outcome(&mut out, &outcome);
                    game.render_status(&mut out);
                }
                Err(e) => out.error(format!("{} could not act: {}", name, e)),
            }
            flush_output(out);
        }
    }

    if !game.evidence().is_empty() {
        println!("\nEvidence left behind: {}", game.evidence().join(", "));
    }
    let Some(again) = ask("\nPlay again? (y/n):")? else {
        return Ok(Ending::Quit);
    };
    if again.eq_ignore_ascii_case("y") {
        Ok(Ending::Restart)
    } else {
        Ok(Ending::Quit)
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let builder = match load_builder(&args) {
        Ok(b) => {
            println!("Using world file: {}", args.world.display());
            b
        }
        Err(e) => {
            eprintln!("Failed to load world file '{}': {e}", args.world.display());
            process::exit(1);
        }
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    loop {
        let mut game = match builder.new_game() {
            Ok(g) => g,
            Err(e) => {
                eprintln!("Failed to build world: {e}");
                process::exit(1);
            }
        };
        println!("\nWelcome to {}!", game.world().name);

        if !add_players(&mut game)? {
            println!("\nGoodbye.");
            break;
        }
        match play(&mut game, &mut rng)? {
            Ending::Restart => println!("\nRestarting..."),
            Ending::Quit => {
                println!("\nGoodbye.");
                break;
            }
        }
    }
    Ok(())
}
