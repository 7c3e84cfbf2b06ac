pub mod avoidance;
pub mod behavior;
pub mod events;
pub mod tick;

pub use avoidance::{compute_avoidance, AvoidanceParams};
pub use behavior::{step_agent, BehaviorContext, BehaviorParams};
pub use events::SimulationEvent;
pub use tick::Simulation;
