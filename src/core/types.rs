//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

pub use glam::Vec3;

/// Simulation tick counter
pub type Tick = u64;

/// Index of an agent in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl AgentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a faction in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactionId(pub u32);

impl FactionId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Drop the vertical component; steering happens on the ground plane.
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}
