use std::collections::BTreeSet;

/// Room adjacency, derived once from the stamped grid and never mutated.
///
/// Neighbor sets are ordered by room index so every walk over them is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldGraph {
    adjacency: Vec<BTreeSet<usize>>,
}

impl WorldGraph {
    /// Scan a row-major grid of room owners. For every occupied cell, the
    /// cell to the right and the cell below are checked; differing owners
    /// get a bidirectional edge. Diagonals never connect.
    pub fn from_grid(grid: &[Option<usize>], rows: usize, cols: usize, room_count: usize) -> Self {
        let mut adjacency = vec![BTreeSet::new(); room_count];

        for r in 0..rows {
            for c in 0..cols {
                let Some(here) = grid[r * cols + c] else {
                    continue;
                };

                if c + 1 < cols {
                    if let Some(right) = grid[r * cols + c + 1] {
                        if right != here {
                            adjacency[here].insert(right);
                            adjacency[right].insert(here);
                        }
                    }
                }

                if r + 1 < rows {
                    if let Some(below) = grid[(r + 1) * cols + c] {
                        if below != here {
                            adjacency[here].insert(below);
                            adjacency[below].insert(here);
                        }
                    }
                }
            }
        }

        WorldGraph { adjacency }
    }

    pub fn room_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Neighbors of `room`; empty for an out-of-range index.
    pub fn neighbors(&self, room: usize) -> &BTreeSet<usize> {
        static EMPTY: BTreeSet<usize> = BTreeSet::new();
        self.adjacency.get(room).unwrap_or(&EMPTY)
    }

    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).contains(&b)
    }
}
