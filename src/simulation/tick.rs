//! Tick system - orchestrates simulation updates
//!
//! For every agent in registry order: state machine, then avoidance, then
//! motion integration. Nothing in a tick blocks or fails; the host calls
//! `tick` with its own `dt` (scaled or zeroed for pause) as often as it
//! likes.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::{AvoidanceMode, SimulationConfig};
use crate::core::error::{Result, SimError};
use crate::core::types::{horizontal, AgentId, FactionId, Tick, Vec3};
use crate::entity::agent::AgentSnapshot;
use crate::entity::registry::AgentRegistry;
use crate::faction::ledger::{FactionLedger, FactionSnapshot};
use crate::resources::grid::{GenerationParams, ResourceGrid};
use crate::simulation::avoidance::{self, AvoidanceParams};
use crate::simulation::behavior::{self, BehaviorContext, BehaviorParams};
use crate::simulation::events::SimulationEvent;

/// Directions shorter than this (squared) count as zero
const DIRECTION_EPSILON_SQ: f32 = 1e-4;

/// ChaCha stream for agent randomness, kept apart from grid generation
const AGENT_RNG_STREAM: u64 = 1;

/// A running simulation: grid, factions, agents and the clock that drives them
#[derive(Debug, Clone)]
pub struct Simulation {
    pub grid: ResourceGrid,
    pub factions: FactionLedger,
    pub agents: AgentRegistry,
    pub current_tick: Tick,
    elapsed: f64,
    config: SimulationConfig,
    behavior: BehaviorParams,
    avoidance: AvoidanceParams,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Generate the grid from the config's seed, lay out factions and spawn agents
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let grid = ResourceGrid::generate(&GenerationParams::from(&config), Vec3::ZERO);
        Self::with_grid(config, grid)
    }

    /// Same as `new` but on a prepared grid
    ///
    /// Grid dimensions and cell size are taken from `grid`, not the config,
    /// and are checked the same way.
    pub fn with_grid(config: SimulationConfig, grid: ResourceGrid) -> Result<Self> {
        config.validate()?;
        if grid.width() == 0 || grid.height() == 0 {
            return Err(SimError::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                grid.width(),
                grid.height()
            )));
        }
        if !(grid.cell_size() > 0.0 && grid.cell_size().is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "grid cell_size must be positive and finite, got {}",
                grid.cell_size()
            )));
        }

        let center = grid.cell_to_world(grid.width() / 2, grid.height() / 2);
        let factions = FactionLedger::on_ring(config.faction_count, center, config.faction_ring_radius);

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        rng.set_stream(AGENT_RNG_STREAM);

        let mut sim = Self {
            grid,
            factions,
            agents: AgentRegistry::new(),
            current_tick: 0,
            elapsed: 0.0,
            behavior: BehaviorParams::from(&config),
            avoidance: AvoidanceParams::from(&config),
            config,
            rng,
        };
        sim.spawn_initial_agents();

        tracing::info!(
            "Simulation ready: {} factions, {} agents, {}x{} grid (seed {})",
            sim.factions.len(),
            sim.agents.count(),
            sim.grid.width(),
            sim.grid.height(),
            sim.config.seed
        );

        Ok(sim)
    }

    /// Split `agent_count` across factions in order, remainder to the first ones
    fn spawn_initial_agents(&mut self) {
        let faction_count = self.factions.len();
        if faction_count == 0 {
            return;
        }

        let per_faction = self.config.agent_count / faction_count;
        let remainder = self.config.agent_count % faction_count;
        let jitter = self.config.spawn_jitter;

        for fi in 0..faction_count {
            let faction = FactionId(fi as u32);
            let home = self.factions.home_of(faction);
            let count = per_faction + usize::from(fi < remainder);

            for _ in 0..count {
                let offset = Vec3::new(
                    self.rng.gen_range(-jitter..=jitter),
                    0.0,
                    self.rng.gen_range(-jitter..=jitter),
                );
                let speed = self
                    .rng
                    .gen_range(self.config.min_speed..=self.config.max_speed);
                self.spawn_agent_at(faction, home + offset, speed);
            }
        }
    }

    /// Add an idle agent and count it towards its faction's population
    ///
    /// # Panics
    /// If `faction` is not registered.
    pub fn spawn_agent_at(&mut self, faction: FactionId, position: Vec3, speed: f32) -> AgentId {
        debug_assert!(speed > 0.0 && speed.is_finite(), "agent speed must be positive, got {speed}");
        self.factions.increment_population(faction);
        self.agents.spawn(faction, position, speed)
    }

    /// Advance every agent by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        let dt = dt.max(0.0);
        let mode = self.config.avoidance_mode;
        let strength = self.config.avoid_strength;
        let count = self.agents.count();

        let mut positions = self.agents.positions();
        let precomputed = (mode == AvoidanceMode::Snapshot && count >= self.config.parallel_threshold)
            .then(|| avoidance::compute_all(&positions, &self.avoidance, true));

        let mut ctx = BehaviorContext {
            grid: &mut self.grid,
            factions: &mut self.factions,
            params: &self.behavior,
        };

        for (i, agent) in self.agents.as_mut_slice().iter_mut().enumerate() {
            behavior::step_agent(agent, &mut ctx, dt, &mut self.rng, &mut events);

            let push = match &precomputed {
                Some(pushes) => pushes[i],
                None => avoidance::compute_avoidance(i, &positions, &self.avoidance),
            };
            let direction = steer(agent.position, agent.target, push, strength);
            agent.position += direction * agent.speed * dt;

            if mode == AvoidanceMode::InPlace {
                positions[i] = agent.position;
            }
        }

        self.current_tick += 1;
        self.elapsed += f64::from(dt);
        events
    }

    /// Agent ids, factions and positions for renderers
    pub fn list_agents(&self) -> Vec<AgentSnapshot> {
        self.agents.snapshots()
    }

    /// Faction stockpiles and colors for a HUD
    pub fn list_factions(&self) -> Vec<FactionSnapshot> {
        self.factions.snapshots()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulated seconds since construction
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// Unit heading towards `target` on the ground plane, bent by the avoidance push
fn steer(position: Vec3, target: Vec3, push: Vec3, strength: f32) -> Vec3 {
    let desired = horizontal(target - position);
    let desired = if desired.length_squared() > DIRECTION_EPSILON_SQ {
        desired.normalize()
    } else {
        Vec3::ZERO
    };

    let combined = desired + push * strength;
    if combined.length_squared() > DIRECTION_EPSILON_SQ {
        combined.normalize()
    } else {
        Vec3::ZERO
    }
}
