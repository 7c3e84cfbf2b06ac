//! Agent records

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, FactionId, Vec3};

/// Behavior state of a forager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgentState {
    /// Looking for berries, wandering when none are in range
    #[default]
    Idle,
    /// Walking to an assigned berry cell
    SeekResource,
    /// Standing on the berry cell, consuming on a timer
    Harvest,
    /// Carrying a full load back to the faction base
    ReturnHome,
}

impl AgentState {
    pub fn name(&self) -> &'static str {
        match self {
            AgentState::Idle => "idle",
            AgentState::SeekResource => "seek_resource",
            AgentState::Harvest => "harvest",
            AgentState::ReturnHome => "return_home",
        }
    }
}

/// One forager
///
/// Relations to other entities are by id or cell coordinate only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub faction: FactionId,
    pub position: Vec3,
    pub target: Vec3,
    pub speed: f32,
    pub state: AgentState,
    /// Berries carried, never above the configured carry capacity
    pub carried: u32,
    pub harvest_timer: f32,
    /// Berry cell being sought or harvested
    pub target_cell: Option<(usize, usize)>,
}

impl Agent {
    /// Fresh idle agent whose steering target is its own position
    pub fn new(id: AgentId, faction: FactionId, position: Vec3, speed: f32) -> Self {
        Self {
            id,
            faction,
            position,
            target: position,
            speed,
            state: AgentState::Idle,
            carried: 0,
            harvest_timer: 0.0,
            target_cell: None,
        }
    }

    /// Squared distance to the steering target
    pub fn distance_sq_to_target(&self) -> f32 {
        (self.target - self.position).length_squared()
    }
}

/// Position-only view for renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub faction: FactionId,
    pub position: Vec3,
}

impl From<&Agent> for AgentSnapshot {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            faction: agent.faction,
            position: agent.position,
        }
    }
}
