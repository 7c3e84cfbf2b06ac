pub mod grid;
pub mod tile;

pub use grid::{GenerationParams, ResourceGrid};
pub use tile::{ResourceKind, Tile};
