//! Tiles of the resource field

use serde::{Deserialize, Serialize};

/// Resource found on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResourceKind {
    #[default]
    None,
    Tree,
    Berry,
}

/// One cell of the resource grid
///
/// A berry tile at zero keeps its `Berry` tag; it is depleted, not cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    pub kind: ResourceKind,
    pub amount: u32,
}

impl Tile {
    pub const EMPTY: Tile = Tile {
        kind: ResourceKind::None,
        amount: 0,
    };

    /// Build a tile, forcing the amount to zero for `ResourceKind::None`
    pub fn new(kind: ResourceKind, amount: u32) -> Self {
        match kind {
            ResourceKind::None => Self::EMPTY,
            _ => Self { kind, amount },
        }
    }

    /// Tile of the given kind with something left on it
    pub fn has(&self, kind: ResourceKind) -> bool {
        kind != ResourceKind::None && self.kind == kind && self.amount > 0
    }
}
