//! Plain-text faction summary

use std::fmt::Write;

use crate::host::time_control::TimeControl;
use crate::simulation::tick::Simulation;

/// Multi-line status block: time scale, counts, one line per faction
pub fn render_summary(sim: &Simulation, time: &TimeControl) -> String {
    let factions = sim.list_factions();
    let mut out = String::with_capacity(256);

    // Writing into a String cannot fail
    let _ = writeln!(out, "Living Factions  tick {}  t={:.1}s", sim.current_tick, sim.elapsed());
    let _ = writeln!(out, "TimeScale: {:.2}x", time.time_scale());
    let _ = writeln!(out, "Agents: {}   Factions: {}", sim.agents.count(), factions.len());

    for f in &factions {
        let _ = writeln!(
            out,
            "F{} {}  Pop: {}  Food: {}  Wood: {}",
            f.id.0,
            f.color.to_hex(),
            f.population,
            f.food,
            f.wood
        );
    }

    out
}
