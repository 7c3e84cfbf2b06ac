//! Events emitted while ticking

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, FactionId};
use crate::entity::agent::AgentState;

/// Things that happened during one tick, in registry order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    StateChanged {
        agent: AgentId,
        from: AgentState,
        to: AgentState,
    },
    /// One berry taken from `cell`
    Harvested {
        agent: AgentId,
        cell: (usize, usize),
        carried: u32,
    },
    /// A load delivered to the faction stockpile
    Deposited {
        agent: AgentId,
        faction: FactionId,
        amount: u32,
    },
}
