use std::collections::BTreeSet;

use crate::world::WorldGraph;

/// Rooms reachable by sight or a single move from `room`: its graph
/// neighbors, minus whichever room the pet occupies.
pub fn visible_neighbors(graph: &WorldGraph, room: usize, pet_room: usize) -> BTreeSet<usize> {
    graph
        .neighbors(room)
        .iter()
        .copied()
        .filter(|&r| r != pet_room)
        .collect()
}

/// Room-level sight check. Same room always sees; otherwise `to` must be a
/// visible neighbor of `from`. Not symmetric when the pet sits in either room.
pub fn room_can_see(graph: &WorldGraph, pet_room: usize, from: usize, to: usize) -> bool {
    from == to || (to != pet_room && graph.are_adjacent(from, to))
}
