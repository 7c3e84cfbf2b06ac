//! Avoidance between neighbours, and how the two position modes differ
//!
//! Snapshot mode reads start-of-tick positions for everyone, so registry
//! order does not matter. InPlace mode lets later agents see earlier agents
//! already moved, which changes the numbers.

use living_factions::core::config::AvoidanceMode;
use living_factions::core::types::{FactionId, Vec3};
use living_factions::simulation::{compute_avoidance, AvoidanceParams};
use living_factions::{Simulation, SimulationConfig};

fn empty_world(mode: AvoidanceMode) -> Simulation {
    let config = SimulationConfig {
        width: 16,
        height: 16,
        tree_chance: 0.0,
        berry_chance: 0.0,
        agent_count: 0,
        faction_count: 1,
        avoidance_mode: mode,
        ..Default::default()
    };
    Simulation::new(config).expect("valid config")
}

/// Three agents in a row, all steering to the same far point so nobody
/// picks a random wander target
fn row_of_three(mode: AvoidanceMode, reversed: bool) -> Simulation {
    let mut sim = empty_world(mode);
    let mut xs = vec![0.0, 0.5, 1.0];
    if reversed {
        xs.reverse();
    }
    for x in xs {
        let id = sim.spawn_agent_at(FactionId(0), Vec3::new(x, 0.0, 0.0), 3.0);
        if let Some(agent) = sim.agents.get_mut(id) {
            agent.target = Vec3::new(0.5, 0.0, 40.0);
        }
    }
    sim
}

fn position_near(sim: &Simulation, x: f32) -> Vec3 {
    sim.agents
        .iter()
        .map(|a| a.position)
        .min_by(|a, b| {
            (a.x - x)
                .abs()
                .partial_cmp(&(b.x - x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("agents exist")
}

#[test]
fn test_two_agents_push_apart() {
    let mut sim = empty_world(AvoidanceMode::Snapshot);
    sim.spawn_agent_at(FactionId(0), Vec3::new(0.0, 0.0, 0.0), 3.0);
    sim.spawn_agent_at(FactionId(0), Vec3::new(0.5, 0.0, 0.0), 3.0);

    let params = AvoidanceParams {
        radius: 1.2,
        max_neighbors: 12,
    };
    let positions = sim.agents.positions();
    let first = compute_avoidance(0, &positions, &params);
    let second = compute_avoidance(1, &positions, &params);

    let expected = 1.0 - 0.5 / 1.2;
    assert!((first.length() - expected).abs() < 1e-5);
    assert!((second.length() - expected).abs() < 1e-5);
    assert!(first.x < 0.0, "first agent is pushed away from the second");
    assert!(second.x > 0.0, "second agent is pushed away from the first");
}

#[test]
fn test_snapshot_mode_is_order_independent() {
    let mut forward = row_of_three(AvoidanceMode::Snapshot, false);
    let mut backward = row_of_three(AvoidanceMode::Snapshot, true);

    forward.tick(0.1);
    backward.tick(0.1);

    for x in [0.0, 0.5, 1.0] {
        let a = position_near(&forward, x);
        let b = position_near(&backward, x);
        assert!((a - b).length() < 1e-6, "{a:?} vs {b:?}");
    }
}

#[test]
fn test_in_place_mode_depends_on_order() {
    let mut forward = row_of_three(AvoidanceMode::InPlace, false);
    let mut backward = row_of_three(AvoidanceMode::InPlace, true);

    forward.tick(0.1);
    backward.tick(0.1);

    // The middle agent sees a moved neighbour on one side or the other
    let a = position_near(&forward, 0.5);
    let b = position_near(&backward, 0.5);
    assert!((a - b).length() > 1e-4, "{a:?} vs {b:?}");
}

#[test]
fn test_modes_diverge_numerically() {
    let mut snapshot = row_of_three(AvoidanceMode::Snapshot, false);
    let mut in_place = row_of_three(AvoidanceMode::InPlace, false);

    snapshot.tick(0.1);
    in_place.tick(0.1);

    // The first agent moves before anyone else in both modes
    let first_snapshot = snapshot.agents.as_slice()[0].position;
    let first_in_place = in_place.agents.as_slice()[0].position;
    assert!((first_snapshot - first_in_place).length() < 1e-6);

    let middle_snapshot = snapshot.agents.as_slice()[1].position;
    let middle_in_place = in_place.agents.as_slice()[1].position;
    assert!((middle_snapshot - middle_in_place).length() > 1e-4);
}

#[test]
fn test_neighbor_cap_limits_contributors() {
    // One agent surrounded by many on one side; the cap only changes the mean
    let mut positions = vec![Vec3::ZERO];
    positions.extend((0..20).map(|i| Vec3::new(0.3 + i as f32 * 0.04, 0.0, 0.0)));

    let capped = compute_avoidance(
        0,
        &positions,
        &AvoidanceParams {
            radius: 1.2,
            max_neighbors: 2,
        },
    );
    let uncapped = compute_avoidance(
        0,
        &positions,
        &AvoidanceParams {
            radius: 1.2,
            max_neighbors: 100,
        },
    );

    assert!(capped.x < 0.0 && uncapped.x < 0.0);
    // The first two in scan order are the closest here, so the capped mean is stronger
    assert!(capped.length() > uncapped.length());
}
