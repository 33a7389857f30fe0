use std::fmt;

//////////////////////////////
/// WORLD STRUCTS AND ENUMS ///
//////////////////////////////

/// Inclusive grid rectangle covered by a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub top_row: usize,
    pub top_col: usize,
    pub bottom_row: usize,
    pub bottom_col: usize,
}

impl Rect {
    pub fn new(top_row: usize, top_col: usize, bottom_row: usize, bottom_col: usize) -> Self {
        Rect {
            top_row,
            top_col,
            bottom_row,
            bottom_col,
        }
    }

    /// Iterate every (row, col) cell inside the rectangle.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.top_row..=self.bottom_row)
            .flat_map(move |r| (self.top_col..=self.bottom_col).map(move |c| (r, c)))
    }
}

/// Something a player can carry and use on the target. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub damage: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, damage: u32) -> Self {
        Item {
            name: name.into(),
            damage,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.damage)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub rect: Rect,
    items: Vec<Item>,
}

impl Room {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Room {
            name: name.into(),
            rect,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.item(name).is_some()
    }

    // Item names are unique world-wide, enforced by the builder.
    pub(crate) fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub(crate) fn take_item(&mut self, name: &str) -> Option<Item> {
        let idx = self.items.iter().position(|i| i.name == name)?;
        Some(self.items.remove(idx))
    }
}
