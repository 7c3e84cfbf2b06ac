//! Host-side helpers: time control and HUD text
//!
//! The simulation has no pause state of its own. Hosts scale or zero `dt`
//! with `TimeControl` before calling `Simulation::tick`.

pub mod hud;
pub mod time_control;

pub use hud::render_summary;
pub use time_control::TimeControl;
