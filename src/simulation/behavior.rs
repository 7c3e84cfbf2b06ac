//! Forager state machine
//!
//! Idle -> SeekResource -> Harvest -> ReturnHome -> Idle. Each call advances
//! one agent by one tick. Misses (nothing in range, bush emptied by someone
//! else) drop the agent back to Idle to re-plan; they are never errors.
//!
//! Stockpiles change only on the ReturnHome -> Idle transition, so a trip
//! deposits at most once.

use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::entity::agent::{Agent, AgentState};
use crate::faction::ledger::FactionLedger;
use crate::resources::grid::ResourceGrid;
use crate::resources::tile::ResourceKind;
use crate::simulation::events::SimulationEvent;

/// Within this squared distance of a berry cell the agent starts harvesting
pub const HARVEST_ARRIVAL_DIST_SQ: f32 = 0.25;

/// Within this squared distance of its base the agent unloads
pub const HOME_ARRIVAL_DIST_SQ: f32 = 0.35;

/// Idle agents pick a new wander cell once this close to the old one
pub const WANDER_RETARGET_DIST_SQ: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorParams {
    pub carry_capacity: u32,
    pub harvest_interval: f32,
    pub search_radius: usize,
}

impl From<&SimulationConfig> for BehaviorParams {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            carry_capacity: config.carry_capacity,
            harvest_interval: config.harvest_interval,
            search_radius: config.search_radius,
        }
    }
}

/// Shared state the state machine reads and writes
pub struct BehaviorContext<'a> {
    pub grid: &'a mut ResourceGrid,
    pub factions: &'a mut FactionLedger,
    pub params: &'a BehaviorParams,
}

/// Run one tick of the state machine for `agent`
pub fn step_agent<R: Rng + ?Sized>(
    agent: &mut Agent,
    ctx: &mut BehaviorContext<'_>,
    dt: f32,
    rng: &mut R,
    events: &mut Vec<SimulationEvent>,
) {
    match agent.state {
        AgentState::Idle => idle(agent, ctx, rng, events),
        AgentState::SeekResource => seek_resource(agent, ctx, events),
        AgentState::Harvest => harvest(agent, ctx, dt, events),
        AgentState::ReturnHome => return_home(agent, ctx, events),
    }
}

fn transition(agent: &mut Agent, to: AgentState, events: &mut Vec<SimulationEvent>) {
    let from = agent.state;
    agent.state = to;
    tracing::trace!("agent {} {} -> {}", agent.id.0, from.name(), to.name());
    events.push(SimulationEvent::StateChanged {
        agent: agent.id,
        from,
        to,
    });
}

fn idle<R: Rng + ?Sized>(
    agent: &mut Agent,
    ctx: &mut BehaviorContext<'_>,
    rng: &mut R,
    events: &mut Vec<SimulationEvent>,
) {
    let (ax, az) = ctx.grid.world_to_cell(agent.position);

    if let Some((bx, bz)) =
        ctx.grid
            .nearest_resource_cell(ax, az, ResourceKind::Berry, ctx.params.search_radius)
    {
        agent.target_cell = Some((bx, bz));
        agent.target = ctx.grid.cell_to_world(bx, bz);
        transition(agent, AgentState::SeekResource, events);
        return;
    }

    // Nothing in range: keep moving so the agent eventually finds new ground
    if agent.distance_sq_to_target() < WANDER_RETARGET_DIST_SQ {
        let (rx, rz) = ctx.grid.random_cell(rng);
        agent.target = ctx.grid.cell_to_world(rx, rz);
        tracing::debug!("agent {} wandering to cell ({}, {})", agent.id.0, rx, rz);
    }
}

fn seek_resource(agent: &mut Agent, ctx: &mut BehaviorContext<'_>, events: &mut Vec<SimulationEvent>) {
    let Some((bx, bz)) = agent.target_cell else {
        transition(agent, AgentState::Idle, events);
        return;
    };

    // Emptied by someone else on the way; re-plan
    if !ctx.grid.is_berry(bx, bz) {
        transition(agent, AgentState::Idle, events);
        return;
    }

    if agent.distance_sq_to_target() < HARVEST_ARRIVAL_DIST_SQ {
        agent.harvest_timer = 0.0;
        transition(agent, AgentState::Harvest, events);
    }
}

fn harvest(
    agent: &mut Agent,
    ctx: &mut BehaviorContext<'_>,
    dt: f32,
    events: &mut Vec<SimulationEvent>,
) {
    agent.harvest_timer += dt;
    if agent.harvest_timer < ctx.params.harvest_interval {
        return;
    }
    agent.harvest_timer = 0.0;

    let consumed = match agent.target_cell {
        Some((bx, bz)) => ctx.grid.try_consume_berry(bx, bz, 1),
        None => false,
    };

    if !consumed {
        transition(agent, AgentState::Idle, events);
        return;
    }

    agent.carried += 1;
    if let Some(cell) = agent.target_cell {
        events.push(SimulationEvent::Harvested {
            agent: agent.id,
            cell,
            carried: agent.carried,
        });
    }

    if agent.carried >= ctx.params.carry_capacity {
        agent.target = ctx.factions.home_of(agent.faction);
        transition(agent, AgentState::ReturnHome, events);
    }
}

fn return_home(agent: &mut Agent, ctx: &mut BehaviorContext<'_>, events: &mut Vec<SimulationEvent>) {
    if agent.distance_sq_to_target() >= HOME_ARRIVAL_DIST_SQ {
        return;
    }

    let amount = agent.carried;
    ctx.factions.deposit(agent.faction, amount);
    agent.carried = 0;
    tracing::debug!(
        "agent {} deposited {} food for faction {}",
        agent.id.0,
        amount,
        agent.faction.0
    );
    events.push(SimulationEvent::Deposited {
        agent: agent.id,
        faction: agent.faction,
        amount,
    });
    transition(agent, AgentState::Idle, events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AgentId, FactionId, Vec3};
    use crate::faction::color::Color;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Fixture {
        grid: ResourceGrid,
        factions: FactionLedger,
        params: BehaviorParams,
        rng: ChaCha8Rng,
        events: Vec<SimulationEvent>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut factions = FactionLedger::new();
            factions.add(Vec3::new(-20.0, 0.0, 0.0), Color::WHITE);
            Self {
                grid: ResourceGrid::empty(8, 8, 2.0, Vec3::ZERO),
                factions,
                params: BehaviorParams {
                    carry_capacity: 2,
                    harvest_interval: 0.5,
                    search_radius: 10,
                },
                rng: ChaCha8Rng::seed_from_u64(1),
                events: Vec::new(),
            }
        }

        fn step(&mut self, agent: &mut Agent, dt: f32) {
            let mut ctx = BehaviorContext {
                grid: &mut self.grid,
                factions: &mut self.factions,
                params: &self.params,
            };
            step_agent(agent, &mut ctx, dt, &mut self.rng, &mut self.events);
        }
    }

    fn agent_at(pos: Vec3) -> Agent {
        Agent::new(AgentId(0), FactionId(0), pos, 3.0)
    }

    #[test]
    fn test_idle_targets_nearest_berry() {
        let mut fx = Fixture::new();
        fx.grid.force_resource_patch(5, 5, 0, ResourceKind::Berry, 3);
        fx.grid.force_resource_patch(1, 1, 0, ResourceKind::Berry, 3);
        let mut agent = agent_at(fx.grid.cell_to_world(0, 0));

        fx.step(&mut agent, 0.1);

        assert_eq!(agent.state, AgentState::SeekResource);
        assert_eq!(agent.target_cell, Some((1, 1)));
        assert_eq!(agent.target, fx.grid.cell_to_world(1, 1));
        assert_eq!(
            fx.events,
            vec![SimulationEvent::StateChanged {
                agent: AgentId(0),
                from: AgentState::Idle,
                to: AgentState::SeekResource,
            }]
        );
    }

    #[test]
    fn test_idle_wanders_when_nothing_found() {
        let mut fx = Fixture::new();
        let start = fx.grid.cell_to_world(3, 3);
        let mut agent = agent_at(start);

        fx.step(&mut agent, 0.1);

        assert_eq!(agent.state, AgentState::Idle);
        // New target is the centre of some cell
        let (cx, cz) = fx.grid.world_to_cell(agent.target);
        assert_eq!(agent.target, fx.grid.cell_to_world(cx, cz));
        assert!(fx.events.is_empty());
    }

    #[test]
    fn test_idle_keeps_wander_target_while_far() {
        let mut fx = Fixture::new();
        let mut agent = agent_at(fx.grid.cell_to_world(0, 0));
        agent.target = fx.grid.cell_to_world(7, 7);

        fx.step(&mut agent, 0.1);
        assert_eq!(agent.target, fx.grid.cell_to_world(7, 7));
    }

    #[test]
    fn test_seek_replans_when_berry_gone() {
        let mut fx = Fixture::new();
        fx.grid.force_resource_patch(4, 4, 0, ResourceKind::Berry, 1);
        let mut agent = agent_at(fx.grid.cell_to_world(0, 0));
        fx.step(&mut agent, 0.1);
        assert_eq!(agent.state, AgentState::SeekResource);

        assert!(fx.grid.try_consume_berry(4, 4, 1));
        fx.step(&mut agent, 0.1);
        assert_eq!(agent.state, AgentState::Idle);
    }

    #[test]
    fn test_seek_arrival_starts_harvest() {
        let mut fx = Fixture::new();
        fx.grid.force_resource_patch(4, 4, 0, ResourceKind::Berry, 1);
        let mut agent = agent_at(fx.grid.cell_to_world(0, 0));
        fx.step(&mut agent, 0.1);

        // Still far away
        fx.step(&mut agent, 0.1);
        assert_eq!(agent.state, AgentState::SeekResource);

        agent.position = agent.target + Vec3::new(0.3, 0.0, 0.3);
        agent.harvest_timer = 9.0;
        fx.step(&mut agent, 0.1);
        assert_eq!(agent.state, AgentState::Harvest);
        assert_eq!(agent.harvest_timer, 0.0);
    }

    #[test]
    fn test_harvest_is_rate_limited() {
        let mut fx = Fixture::new();
        fx.grid.force_resource_patch(2, 2, 0, ResourceKind::Berry, 10);
        let mut agent = agent_at(fx.grid.cell_to_world(2, 2));
        agent.state = AgentState::Harvest;
        agent.target_cell = Some((2, 2));

        fx.step(&mut agent, 0.25);
        assert_eq!(agent.carried, 0);
        assert_eq!(fx.grid.tile(2, 2).amount, 10);

        fx.step(&mut agent, 0.25);
        assert_eq!(agent.carried, 1);
        assert_eq!(agent.harvest_timer, 0.0);
        assert_eq!(fx.grid.tile(2, 2).amount, 9);
        assert_eq!(agent.state, AgentState::Harvest);
    }

    #[test]
    fn test_full_load_heads_home() {
        let mut fx = Fixture::new();
        fx.grid.force_resource_patch(2, 2, 0, ResourceKind::Berry, 10);
        let mut agent = agent_at(fx.grid.cell_to_world(2, 2));
        agent.state = AgentState::Harvest;
        agent.target_cell = Some((2, 2));

        fx.step(&mut agent, 0.5);
        fx.step(&mut agent, 0.5);

        assert_eq!(agent.carried, 2);
        assert_eq!(agent.state, AgentState::ReturnHome);
        assert_eq!(agent.target, Vec3::new(-20.0, 0.0, 0.0));
        assert_eq!(fx.grid.tile(2, 2).amount, 8);
    }

    #[test]
    fn test_depleted_harvest_goes_idle() {
        let mut fx = Fixture::new();
        fx.grid.force_resource_patch(2, 2, 0, ResourceKind::Berry, 1);
        let mut agent = agent_at(fx.grid.cell_to_world(2, 2));
        agent.state = AgentState::Harvest;
        agent.target_cell = Some((2, 2));

        fx.step(&mut agent, 0.5);
        assert_eq!(agent.carried, 1);
        assert_eq!(agent.state, AgentState::Harvest);

        fx.step(&mut agent, 0.5);
        assert_eq!(agent.carried, 1);
        assert_eq!(agent.state, AgentState::Idle);
    }

    #[test]
    fn test_deposit_on_arrival_home() {
        let mut fx = Fixture::new();
        let home = fx.factions.home_of(FactionId(0));
        let mut agent = agent_at(home + Vec3::new(3.0, 0.0, 0.0));
        agent.state = AgentState::ReturnHome;
        agent.target = home;
        agent.carried = 2;

        fx.step(&mut agent, 0.1);
        assert_eq!(agent.state, AgentState::ReturnHome);
        assert_eq!(fx.factions.total_food(), 0);

        agent.position = home + Vec3::new(0.5, 0.0, 0.0);
        fx.step(&mut agent, 0.1);
        assert_eq!(agent.state, AgentState::Idle);
        assert_eq!(agent.carried, 0);
        assert_eq!(fx.factions.get(FactionId(0)).food, 2);
        assert!(fx.events.contains(&SimulationEvent::Deposited {
            agent: AgentId(0),
            faction: FactionId(0),
            amount: 2,
        }));
    }

    #[test]
    #[should_panic(expected = "unknown faction")]
    fn test_unknown_faction_is_fatal() {
        let mut fx = Fixture::new();
        fx.grid.force_resource_patch(2, 2, 0, ResourceKind::Berry, 10);
        let mut agent = Agent::new(AgentId(0), FactionId(5), fx.grid.cell_to_world(2, 2), 3.0);
        agent.state = AgentState::Harvest;
        agent.target_cell = Some((2, 2));
        agent.carried = 1;

        fx.step(&mut agent, 0.5);
    }
}
