//! Simulation configuration with documented constants
//!
//! Every tunable number the simulation reads lives here. Values can be
//! loaded from TOML; any field left out falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// How agents see each other's positions while avoidance is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvoidanceMode {
    /// Every agent reads the positions from the start of the tick.
    /// Results do not depend on registry order.
    #[default]
    Snapshot,
    /// Agents are moved one at a time and later agents see the already
    /// moved positions of earlier ones.
    InPlace,
}

/// Configuration for a simulation instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === GRID ===
    /// Number of cells along x
    pub width: usize,
    /// Number of cells along z
    pub height: usize,
    /// Edge length of one cell (world units)
    pub cell_size: f32,

    // === RESOURCE GENERATION ===
    /// Seed for both grid generation and agent randomness
    pub seed: u64,
    /// Probability that a cell starts as a tree
    pub tree_chance: f32,
    /// Probability that a cell starts as a berry bush
    ///
    /// Drawn from the same sample as `tree_chance`, so the two must sum to
    /// at most 1.
    pub berry_chance: f32,
    /// Wood held by a freshly generated tree
    pub tree_amount: u32,
    /// Food held by a freshly generated berry bush
    pub berry_amount: u32,

    // === POPULATION ===
    pub agent_count: usize,
    pub faction_count: usize,
    /// Distance of each faction base from the grid centre (world units)
    pub faction_ring_radius: f32,
    /// Agents spawn within this many units of their base on x and z
    pub spawn_jitter: f32,

    // === MOVEMENT ===
    pub min_speed: f32,
    pub max_speed: f32,

    // === GATHERING ===
    /// Berries an agent carries before heading home
    pub carry_capacity: u32,
    /// Seconds between consumption attempts while harvesting
    pub harvest_interval: f32,
    /// Largest ring (in cells) scanned when looking for berries
    pub search_radius: usize,

    // === AVOIDANCE ===
    /// Horizontal distance under which agents push each other apart
    pub avoid_radius: f32,
    /// Weight of the push relative to the unit desired direction
    pub avoid_strength: f32,
    /// Neighbours counted per agent before the scan stops
    ///
    /// The scan is O(n^2) with this early cap. It is fine up to a few
    /// hundred agents.
    pub avoid_max_neighbors: usize,
    pub avoidance_mode: AvoidanceMode,

    // === PARALLELIZATION ===
    /// Minimum agent count before avoidance runs on the rayon pool
    ///
    /// Only used in `AvoidanceMode::Snapshot`.
    pub parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            cell_size: 2.0,

            seed: 12345,
            tree_chance: 0.08,
            berry_chance: 0.04,
            tree_amount: 50,
            berry_amount: 30,

            agent_count: 60,
            faction_count: 4,
            faction_ring_radius: 25.0,
            spawn_jitter: 3.0,

            min_speed: 3.0,
            max_speed: 4.5,

            carry_capacity: 5,
            harvest_interval: 0.6,
            search_radius: 25,

            avoid_radius: 1.2,
            avoid_strength: 2.0,
            avoid_max_neighbors: 12,
            avoidance_mode: AvoidanceMode::Snapshot,

            parallel_threshold: 1000,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if !is_positive(self.cell_size) {
            return Err(invalid(format!(
                "cell_size must be positive and finite, got {}",
                self.cell_size
            )));
        }

        for (name, chance) in [("tree_chance", self.tree_chance), ("berry_chance", self.berry_chance)] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(invalid(format!("{name} must be within [0, 1], got {chance}")));
            }
        }
        if self.tree_chance + self.berry_chance > 1.0 {
            return Err(invalid(format!(
                "tree_chance + berry_chance must not exceed 1 ({} + {})",
                self.tree_chance, self.berry_chance
            )));
        }

        if self.agent_count > 0 && self.faction_count == 0 {
            return Err(invalid(format!(
                "{} agents requested but there are no factions to assign them to",
                self.agent_count
            )));
        }

        if !is_positive(self.min_speed) || !is_positive(self.max_speed) || self.max_speed < self.min_speed {
            return Err(invalid(format!(
                "speed bounds must satisfy 0 < min_speed <= max_speed (finite), got [{}, {}]",
                self.min_speed, self.max_speed
            )));
        }

        if self.carry_capacity == 0 {
            return Err(invalid("carry_capacity must be at least 1".into()));
        }

        for (name, value) in [
            ("harvest_interval", self.harvest_interval),
            ("avoid_radius", self.avoid_radius),
            ("avoid_strength", self.avoid_strength),
            ("spawn_jitter", self.spawn_jitter),
            ("faction_ring_radius", self.faction_ring_radius),
        ] {
            if !is_non_negative(value) {
                return Err(invalid(format!("{name} must be finite and not negative, got {value}")));
            }
        }

        Ok(())
    }
}

fn invalid(msg: String) -> SimError {
    SimError::InvalidConfig(msg)
}

// NaN fails both comparisons
fn is_positive(value: f32) -> bool {
    value > 0.0 && value.is_finite()
}

fn is_non_negative(value: f32) -> bool {
    value >= 0.0 && value.is_finite()
}
