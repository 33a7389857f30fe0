use std::collections::BTreeSet;

use tracing::debug;

use crate::world::WorldGraph;

/// The target's pet. It wanders the world depth-first, one room per
/// completed turn, and blocks sight into whatever room it sits in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPet {
    name: String,
    location: usize,
    visited: BTreeSet<usize>,
    stack: Vec<usize>,
}

impl TargetPet {
    pub(crate) fn new(name: impl Into<String>, start: usize) -> Self {
        TargetPet {
            name: name.into(),
            location: start,
            visited: BTreeSet::new(),
            stack: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> usize {
        self.location
    }

    /// Put the pet somewhere directly. The traversal notices on its next
    /// step and continues from here.
    pub(crate) fn relocate(&mut self, room: usize) {
        self.location = room;
    }

    /// Advance the wander by one room.
    ///
    /// Neighbors are pushed in ascending index order, so among several
    /// unvisited neighbors the highest index is explored first. When the
    /// stack runs dry (dead end of a fully explored component, or a
    /// single-room world) the pet stays put and a new cycle begins.
    pub(crate) fn wander(&mut self, graph: &WorldGraph) {
        if self.visited.len() >= graph.room_count() {
            self.visited.clear();
        }

        match self.stack.last().copied() {
            None => {
                self.stack.push(self.location);
                self.visited.insert(self.location);
            }
            Some(top) if top != self.location => {
                self.stack.pop();
                self.stack.push(self.location);
                self.visited.insert(self.location);
            }
            Some(_) => {}
        }

        let Some(current) = self.stack.pop() else {
            return;
        };

        for &next in graph.neighbors(current) {
            if !self.visited.contains(&next) && !self.stack.contains(&next) {
                self.stack.push(next);
            }
        }

        match self.stack.last().copied() {
            Some(next) => {
                self.location = next;
                self.visited.insert(next);
            }
            None => {
                self.visited.clear();
                self.stack.push(current);
                self.visited.insert(current);
                self.location = current;
            }
        }

        debug!(pet = %self.name, room = self.location, depth = self.stack.len(), "pet wandered");
    }
}
