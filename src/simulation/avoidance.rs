//! Local avoidance between agents
//!
//! Each agent is pushed away from neighbours within `radius` on the ground
//! plane, harder the closer they are. The scan is O(n^2) and stops once
//! `max_neighbors` contributors have been found, in registry order rather
//! than closest first. With more neighbours in range than the cap, the
//! result therefore depends on registry order.

use rayon::prelude::*;

use crate::core::config::SimulationConfig;
use crate::core::types::{horizontal, Vec3};

/// Separations below this are treated as coincident and ignored
const MIN_SEPARATION_SQ: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvoidanceParams {
    pub radius: f32,
    pub max_neighbors: usize,
}

impl From<&SimulationConfig> for AvoidanceParams {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            radius: config.avoid_radius,
            max_neighbors: config.avoid_max_neighbors,
        }
    }
}

/// Mean push on agent `index` away from its neighbours in `positions`
///
/// Each neighbour contributes `normalize(me - other) * (1 - dist / radius)`.
/// Returns zero when nobody is in range.
pub fn compute_avoidance(index: usize, positions: &[Vec3], params: &AvoidanceParams) -> Vec3 {
    if params.max_neighbors == 0 || params.radius <= 0.0 {
        return Vec3::ZERO;
    }

    let me = positions[index];
    let radius_sq = params.radius * params.radius;
    let mut push = Vec3::ZERO;
    let mut count = 0usize;

    for (j, &other) in positions.iter().enumerate() {
        if j == index {
            continue;
        }

        let d = horizontal(me - other);
        let dist_sq = d.length_squared();
        if dist_sq > radius_sq || dist_sq < MIN_SEPARATION_SQ {
            continue;
        }

        let dist = dist_sq.sqrt();
        push += (d / dist) * (1.0 - dist / params.radius);

        count += 1;
        if count >= params.max_neighbors {
            break;
        }
    }

    if count == 0 {
        Vec3::ZERO
    } else {
        push / count as f32
    }
}

/// Push for every agent, all read from the same `positions` snapshot
pub fn compute_all(positions: &[Vec3], params: &AvoidanceParams, parallel: bool) -> Vec<Vec3> {
    if parallel {
        (0..positions.len())
            .into_par_iter()
            .map(|i| compute_avoidance(i, positions, params))
            .collect()
    } else {
        (0..positions.len())
            .map(|i| compute_avoidance(i, positions, params))
            .collect()
    }
}
