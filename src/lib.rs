//! Living Factions - headless faction foraging simulation

pub mod core;
pub mod entity;
pub mod faction;
pub mod host;
pub mod resources;
pub mod simulation;
pub mod spatial;

pub use crate::core::config::SimulationConfig;
pub use crate::core::error::{Result, SimError};
pub use crate::simulation::tick::Simulation;
