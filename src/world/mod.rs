mod builder;
mod graph;
mod loader;
mod model;
mod validator;

// Minimal, intentional surface area: re-export only what the game/engine uses.
pub use builder::{World, WorldBuilder};
pub use graph::WorldGraph;
pub use model::{Item, Rect, Room};
pub use validator::ValidationError;
