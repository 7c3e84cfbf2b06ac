//! Agent registry - dense, index-addressed agent storage

use crate::core::types::{AgentId, FactionId, Vec3};
use crate::entity::agent::{Agent, AgentSnapshot};

/// Owns every agent; `AgentId` is the index into the backing vector
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, faction: FactionId, position: Vec3, speed: f32) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        self.agents.push(Agent::new(id, faction, position, speed));
        id
    }

    pub fn count(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    pub fn as_mut_slice(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Current positions in registry order
    pub fn positions(&self) -> Vec<Vec3> {
        self.agents.iter().map(|a| a.position).collect()
    }

    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.agents.iter().map(AgentSnapshot::from).collect()
    }

    pub fn total_carried(&self) -> u64 {
        self.agents.iter().map(|a| u64::from(a.carried)).sum()
    }
}
