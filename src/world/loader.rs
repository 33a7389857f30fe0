use serde::Deserialize;
use std::fs;
use std::path::Path;

use tracing::warn;

use super::builder::WorldBuilder;
use super::validator::ValidationError;

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    world: WorldHeader,
    target: TargetConfig,
    pet: PetConfig,
    #[serde(default)]
    room: Vec<RoomConfig>, // [[room]] blocks, index order matters
    #[serde(default)]
    item: Vec<ItemConfig>, // [[item]] blocks
    #[serde(default)]
    game: GameConfig,
}

#[derive(Deserialize)]
struct WorldHeader {
    rows: i64,
    cols: i64,
    name: String,
}

#[derive(Deserialize)]
struct TargetConfig {
    name: String,
    health: i64,
}

#[derive(Deserialize)]
struct PetConfig {
    name: String,
}

#[derive(Deserialize)]
struct RoomConfig {
    name: String,
    top_row: i64,
    top_col: i64,
    bottom_row: i64,
    bottom_col: i64,
}

#[derive(Deserialize)]
struct ItemConfig {
    name: String,
    /// Index of the owning room in `[[room]]` order.
    room: i64,
    damage: i64,
}

/// Optional game settings carried alongside a TOML world.
#[derive(Deserialize, Default)]
struct GameConfig {
    #[serde(default)]
    turns: Option<i64>,
    #[serde(default)]
    max_players: Option<i64>,
}

/////////////////////////////
/// TOML PARSER FUNCTIONS ///
/////////////////////////////

pub fn load_toml_file(path: &Path) -> Result<WorldBuilder, ValidationError> {
    let contents = fs::read_to_string(path).map_err(|e| ValidationError::Io(e.to_string()))?;
    parse_toml(&contents)
}

pub fn parse_toml(contents: &str) -> Result<WorldBuilder, ValidationError> {
    let file: WorldFile =
        toml::from_str(contents).map_err(|e| ValidationError::Toml(e.to_string()))?;

    let mut builder = WorldBuilder::new(file.world.rows, file.world.cols, &file.world.name)?;
    builder
        .target(&file.target.name, file.target.health)?
        .pet(&file.pet.name)?;

    if file.room.is_empty() {
        return Err(ValidationError::NonPositiveRoomCount(0));
    }
    for rc in &file.room {
        builder.room(
            [rc.top_row, rc.top_col, rc.bottom_row, rc.bottom_col],
            &rc.name,
        )?;
    }
    for ic in &file.item {
        builder.item(ic.room, ic.damage, &ic.name)?;
    }

    if let Some(turns) = file.game.turns {
        builder.turn_limit(turns)?;
    }
    if let Some(max) = file.game.max_players {
        builder.max_players(max)?;
    }

    Ok(builder)
}

/////////////////////////////
/// TEXT SPEC FUNCTIONS   ///
/////////////////////////////

pub fn load_spec_file(path: &Path) -> Result<WorldBuilder, ValidationError> {
    let contents = fs::read_to_string(path).map_err(|e| ValidationError::Io(e.to_string()))?;
    parse_spec(&contents)
}

/// Parse the line-based world format:
///
/// ```text
/// rows cols world name
/// health target name
/// pet name
/// room count
/// top_row top_col bottom_row bottom_col room name   (one per room)
/// item count
/// room_index damage item name                        (one per item)
/// ```
///
/// Blank lines are skipped. Names run to the end of their line.
pub fn parse_spec(text: &str) -> Result<WorldBuilder, ValidationError> {
    let mut lines = SpecLines::new(text);

    let (line, rest) = lines.next_line("world header")?;
    let (nums, name) = split_numbers(line, rest, 2, "grid rows and columns")?;
    let mut builder = WorldBuilder::new(nums[0], nums[1], name)?;

    let (line, rest) = lines.next_line("target line")?;
    let (nums, name) = split_numbers(line, rest, 1, "target health")?;
    builder.target(name, nums[0])?;

    let (_, rest) = lines.next_line("pet name")?;
    builder.pet(rest)?;

    let room_count = lines.next_count("room count")?;
    if room_count <= 0 {
        return Err(ValidationError::NonPositiveRoomCount(room_count));
    }
    for _ in 0..room_count {
        let (line, rest) = lines.next_line("room line")?;
        let (nums, name) = split_numbers(line, rest, 4, "room coordinates")?;
        builder.room([nums[0], nums[1], nums[2], nums[3]], name)?;
    }

    let item_count = lines.next_count("item count")?;
    if item_count < 0 {
        return Err(ValidationError::NegativeItemCount(item_count));
    }
    for _ in 0..item_count {
        let (line, rest) = lines.next_line("item line")?;
        let (nums, name) = split_numbers(line, rest, 2, "item room and damage")?;
        builder.item(nums[0], nums[1], name)?;
    }

    if let Some((line, extra)) = lines.peek_remaining() {
        warn!(line, extra, "ignoring trailing input after the last item");
    }

    Ok(builder)
}

/// Non-blank lines with their 1-based line numbers.
struct SpecLines<'a> {
    inner: std::iter::Peekable<std::iter::Enumerate<std::str::Lines<'a>>>,
}

impl<'a> SpecLines<'a> {
    fn new(text: &'a str) -> Self {
        SpecLines {
            inner: text.lines().enumerate().peekable(),
        }
    }

    fn skip_blank(&mut self) {
        while let Some((_, l)) = self.inner.peek() {
            if l.trim().is_empty() {
                self.inner.next();
            } else {
                break;
            }
        }
    }

    fn next_line(&mut self, expected: &'static str) -> Result<(usize, &'a str), ValidationError> {
        self.skip_blank();
        match self.inner.next() {
            Some((idx, l)) => Ok((idx + 1, l.trim())),
            None => Err(ValidationError::UnexpectedEnd(expected)),
        }
    }

    fn next_count(&mut self, expected: &'static str) -> Result<i64, ValidationError> {
        let (line, rest) = self.next_line(expected)?;
        parse_int(line, rest, expected)
    }

    fn peek_remaining(&mut self) -> Option<(usize, &'a str)> {
        self.skip_blank();
        self.inner.peek().map(|(idx, l)| (idx + 1, l.trim()))
    }
}

fn parse_int(line: usize, token: &str, expected: &'static str) -> Result<i64, ValidationError> {
    token.trim().parse::<i64>().map_err(|_| ValidationError::Malformed {
        line,
        expected,
        found: token.trim().to_string(),
    })
}

/// Peel `count` whitespace-separated integers off the front of `text` and
/// return them with the remainder (trimmed), which is the entity's name.
fn split_numbers<'a>(
    line: usize,
    text: &'a str,
    count: usize,
    expected: &'static str,
) -> Result<(Vec<i64>, &'a str), ValidationError> {
    let mut rest = text.trim_start();
    let mut nums = Vec::with_capacity(count);

    for _ in 0..count {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        if token.is_empty() {
            return Err(ValidationError::Malformed {
                line,
                expected,
                found: text.to_string(),
            });
        }
        nums.push(parse_int(line, token, expected)?);
        rest = tail.trim_start();
    }

    Ok((nums, rest.trim_end()))
}
