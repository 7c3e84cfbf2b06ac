pub mod agent;
pub mod registry;

pub use agent::{Agent, AgentSnapshot, AgentState};
pub use registry::AgentRegistry;
