pub mod config;
pub mod error;
pub mod types;

pub use config::{AvoidanceMode, SimulationConfig};
pub use error::{Result, SimError};
pub use types::{AgentId, FactionId, Tick, Vec3};
