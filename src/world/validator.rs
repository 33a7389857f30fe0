use thiserror::Error;

use super::model::Rect;

/// Why a world specification was rejected. Construction stops at the first
/// one; no partial world is ever handed out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("grid size must be positive, got {rows}x{cols}")]
    NonPositiveGrid { rows: i64, cols: i64 },

    #[error("grid of {rows}x{cols} is larger than {max} cells")]
    GridTooLarge { rows: i64, cols: i64, max: i64 },

    #[error("{field} may not be empty")]
    EmptyName { field: &'static str },

    #[error("target health must be positive, got {0}")]
    NonPositiveHealth(i64),

    #[error("number of rooms must be positive, got {0}")]
    NonPositiveRoomCount(i64),

    #[error("number of items may not be negative, got {0}")]
    NegativeItemCount(i64),

    #[error("turn limit must be positive, got {0}")]
    NonPositiveTurns(i64),

    #[error("maximum number of players must be positive, got {0}")]
    NonPositiveMaxPlayers(i64),

    #[error("room '{0}' already exists")]
    DuplicateRoom(String),

    #[error("room '{name}' has a negative coordinate")]
    NegativeCoordinate { name: String },

    #[error("room '{name}' top-left corner must be above and left of its bottom-right corner")]
    MalformedRect { name: String },

    #[error("room '{name}' does not fit inside the {rows}x{cols} grid")]
    RoomOutOfBounds {
        name: String,
        rows: usize,
        cols: usize,
    },

    #[error("room '{name}' overlaps room '{other}' at row {row}, column {col}")]
    Overlap {
        name: String,
        other: String,
        row: usize,
        col: usize,
    },

    #[error("item '{name}' belongs to room {room}, but only {room_count} rooms exist")]
    ItemRoomOutOfRange {
        name: String,
        room: i64,
        room_count: usize,
    },

    #[error("item '{0}' already exists")]
    DuplicateItem(String),

    #[error("item '{name}' has negative damage {damage}")]
    NegativeDamage { name: String, damage: i64 },

    #[error("world is missing its {0}")]
    Missing(&'static str),

    #[error("expected {expected} on line {line}, found '{found}'")]
    Malformed {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("world specification ended early: expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("invalid TOML world: {0}")]
    Toml(String),

    #[error("could not read world file: {0}")]
    Io(String),
}

/// Names follow one rule everywhere: not blank, and not the literal "null".
pub fn validate_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        return Err(ValidationError::EmptyName { field });
    }
    Ok(())
}

/// Upper bound on grid cells; the builder allocates one slot per cell.
pub const MAX_GRID_CELLS: i64 = 1 << 20;

pub fn validate_grid(rows: i64, cols: i64) -> Result<(usize, usize), ValidationError> {
    if rows <= 0 || cols <= 0 {
        return Err(ValidationError::NonPositiveGrid { rows, cols });
    }
    match rows.checked_mul(cols) {
        Some(cells) if cells <= MAX_GRID_CELLS => {}
        _ => {
            return Err(ValidationError::GridTooLarge {
                rows,
                cols,
                max: MAX_GRID_CELLS,
            });
        }
    }
    Ok((rows as usize, cols as usize))
}

pub fn validate_health(health: i64) -> Result<u32, ValidationError> {
    if health <= 0 || health > u32::MAX as i64 {
        return Err(ValidationError::NonPositiveHealth(health));
    }
    Ok(health as u32)
}

pub fn validate_turns(turns: i64) -> Result<u32, ValidationError> {
    if turns <= 0 || turns > u32::MAX as i64 {
        return Err(ValidationError::NonPositiveTurns(turns));
    }
    Ok(turns as u32)
}

pub fn validate_max_players(max: i64) -> Result<usize, ValidationError> {
    if max <= 0 {
        return Err(ValidationError::NonPositiveMaxPlayers(max));
    }
    Ok(max as usize)
}

pub fn validate_damage(name: &str, damage: i64) -> Result<u32, ValidationError> {
    if damage < 0 || damage > u32::MAX as i64 {
        return Err(ValidationError::NegativeDamage {
            name: name.to_string(),
            damage,
        });
    }
    Ok(damage as u32)
}

/// Check a raw rectangle against the grid. Corners are given as
/// (top_row, top_col, bottom_row, bottom_col) and must satisfy
/// top < bottom on both axes.
pub fn validate_rect(
    name: &str,
    raw: [i64; 4],
    rows: usize,
    cols: usize,
) -> Result<Rect, ValidationError> {
    if raw.iter().any(|&v| v < 0) {
        return Err(ValidationError::NegativeCoordinate {
            name: name.to_string(),
        });
    }

    let [top_row, top_col, bottom_row, bottom_col] = raw.map(|v| v as usize);

    if top_row >= bottom_row || top_col >= bottom_col {
        return Err(ValidationError::MalformedRect {
            name: name.to_string(),
        });
    }

    if bottom_row >= rows || bottom_col >= cols {
        return Err(ValidationError::RoomOutOfBounds {
            name: name.to_string(),
            rows,
            cols,
        });
    }

    Ok(Rect::new(top_row, top_col, bottom_row, bottom_col))
}
