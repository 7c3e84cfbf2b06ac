//! Faction ledger - per-faction bases and stockpiles
//!
//! Factions live in a dense vector indexed by `FactionId` and are mutated
//! in place. Stockpiles only grow during a run.

use serde::{Deserialize, Serialize};

use crate::core::types::{FactionId, Vec3};
use crate::faction::color::Color;

/// A group of agents sharing a home base and stockpiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub color: Color,
    pub home: Vec3,
    pub food: u64,
    pub wood: u64,
    pub population: u32,
}

/// Read-only view handed to a HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionSnapshot {
    pub id: FactionId,
    pub color: Color,
    pub food: u64,
    pub wood: u64,
    pub population: u32,
}

impl From<&Faction> for FactionSnapshot {
    fn from(faction: &Faction) -> Self {
        Self {
            id: faction.id,
            color: faction.color,
            food: faction.food,
            wood: faction.wood,
            population: faction.population,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactionLedger {
    factions: Vec<Faction>,
}

impl FactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out `count` bases evenly on a ring of `radius` around `center`
    pub fn on_ring(count: usize, center: Vec3, radius: f32) -> Self {
        let mut ledger = Self::new();
        for i in 0..count {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let home = center + Vec3::new(angle.cos(), 0.0, angle.sin()) * radius;
            ledger.add(home, Color::for_faction(i, count));
        }
        ledger
    }

    /// Register a faction with empty stockpiles
    pub fn add(&mut self, home: Vec3, color: Color) -> FactionId {
        let id = FactionId(self.factions.len() as u32);
        self.factions.push(Faction {
            id,
            color,
            home,
            food: 0,
            wood: 0,
            population: 0,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.factions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factions.is_empty()
    }

    pub fn try_get(&self, id: FactionId) -> Option<&Faction> {
        self.factions.get(id.index())
    }

    /// # Panics
    /// If no faction has this id. Agents are only ever created with ids
    /// the ledger handed out.
    pub fn get(&self, id: FactionId) -> &Faction {
        match self.factions.get(id.index()) {
            Some(faction) => faction,
            None => panic!("unknown faction {:?} ({} registered)", id, self.factions.len()),
        }
    }

    fn get_mut(&mut self, id: FactionId) -> &mut Faction {
        let registered = self.factions.len();
        match self.factions.get_mut(id.index()) {
            Some(faction) => faction,
            None => panic!("unknown faction {:?} ({} registered)", id, registered),
        }
    }

    pub fn home_of(&self, id: FactionId) -> Vec3 {
        self.get(id).home
    }

    /// Add delivered food to the faction's stockpile
    pub fn deposit(&mut self, id: FactionId, amount: u32) {
        self.get_mut(id).food += u64::from(amount);
    }

    pub fn increment_population(&mut self, id: FactionId) {
        self.get_mut(id).population += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Faction> {
        self.factions.iter()
    }

    pub fn snapshots(&self) -> Vec<FactionSnapshot> {
        self.factions.iter().map(FactionSnapshot::from).collect()
    }

    pub fn total_food(&self) -> u64 {
        self.factions.iter().map(|f| f.food).sum()
    }

    pub fn total_population(&self) -> u64 {
        self.factions.iter().map(|f| u64::from(f.population)).sum()
    }
}
