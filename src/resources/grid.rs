//! Resource field - a fixed-size grid of tiles agents forage from
//!
//! Generation is deterministic from a seed. Tile amounts only change
//! through consumption or explicit patches; the grid never resizes.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::types::Vec3;
use crate::resources::tile::{ResourceKind, Tile};
use crate::spatial::grid::Grid;

/// Inputs for deterministic grid generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub width: usize,
    pub height: usize,
    pub cell_size: f32,
    pub seed: u64,
    pub tree_chance: f32,
    pub berry_chance: f32,
    pub tree_amount: u32,
    pub berry_amount: u32,
}

impl From<&SimulationConfig> for GenerationParams {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            cell_size: config.cell_size,
            seed: config.seed,
            tree_chance: config.tree_chance,
            berry_chance: config.berry_chance,
            tree_amount: config.tree_amount,
            berry_amount: config.berry_amount,
        }
    }
}

/// The mutable tile field
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceGrid {
    tiles: Grid<Tile>,
}

impl ResourceGrid {
    /// Grid with every tile empty
    pub fn empty(width: usize, height: usize, cell_size: f32, origin: Vec3) -> Self {
        Self {
            tiles: Grid::new(width, height, cell_size, origin),
        }
    }

    /// Fill every cell from one uniform draw per cell, z outer and x inner
    ///
    /// A draw below `tree_chance` makes a tree, a draw below
    /// `tree_chance + berry_chance` makes a berry bush, anything else is empty.
    pub fn generate(params: &GenerationParams, origin: Vec3) -> Self {
        let mut grid = Self::empty(params.width, params.height, params.cell_size, origin);
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);

        for z in 0..params.height {
            for x in 0..params.width {
                let r: f32 = rng.gen();
                let tile = if r < params.tree_chance {
                    Tile::new(ResourceKind::Tree, params.tree_amount)
                } else if r < params.tree_chance + params.berry_chance {
                    Tile::new(ResourceKind::Berry, params.berry_amount)
                } else {
                    Tile::EMPTY
                };
                grid.tiles.set(x, z, tile);
            }
        }

        grid
    }

    pub fn width(&self) -> usize {
        self.tiles.width
    }

    pub fn height(&self) -> usize {
        self.tiles.height
    }

    pub fn cell_size(&self) -> f32 {
        self.tiles.cell_size
    }

    /// All tiles, row-major
    pub fn tiles(&self) -> &[Tile] {
        self.tiles.cells()
    }

    /// Tile at `(x, z)`
    ///
    /// # Panics
    /// If the cell lies outside the grid. Callers only pass coordinates
    /// obtained from the grid itself.
    pub fn tile(&self, x: usize, z: usize) -> Tile {
        match self.tiles.get(x, z) {
            Some(tile) => *tile,
            None => panic!(
                "cell ({x}, {z}) outside {}x{} resource grid",
                self.width(),
                self.height()
            ),
        }
    }

    fn tile_mut(&mut self, x: usize, z: usize) -> &mut Tile {
        let (width, height) = (self.width(), self.height());
        match self.tiles.get_mut(x, z) {
            Some(tile) => tile,
            None => panic!("cell ({x}, {z}) outside {width}x{height} resource grid"),
        }
    }

    pub fn cell_to_world(&self, x: usize, z: usize) -> Vec3 {
        self.tiles.cell_center(x, z)
    }

    /// Never out of range, even for positions off the grid
    pub fn world_to_cell(&self, pos: Vec3) -> (usize, usize) {
        self.tiles.world_to_cell(pos)
    }

    /// Berry bush with food left on it
    pub fn is_berry(&self, x: usize, z: usize) -> bool {
        self.tile(x, z).has(ResourceKind::Berry)
    }

    /// Take up to `amount` food from a live berry tile
    ///
    /// Returns false and leaves the tile untouched if it is not a berry
    /// bush or is already depleted. The check and the decrement happen
    /// under one `&mut` borrow, so two agents can never both consume the
    /// last unit.
    pub fn try_consume_berry(&mut self, x: usize, z: usize, amount: u32) -> bool {
        let tile = self.tile_mut(x, z);
        if !tile.has(ResourceKind::Berry) {
            return false;
        }
        tile.amount = tile.amount.saturating_sub(amount);
        true
    }

    /// Overwrite every tile within `radius` cells (circle test) of the centre
    pub fn force_resource_patch(
        &mut self,
        center_x: usize,
        center_z: usize,
        radius: usize,
        kind: ResourceKind,
        amount: u32,
    ) {
        let r = radius as i64;
        let (cx, cz) = (center_x as i64, center_z as i64);
        for dz in -r..=r {
            for dx in -r..=r {
                if dx * dx + dz * dz > r * r {
                    continue;
                }
                let (x, z) = (cx + dx, cz + dz);
                if !self.tiles.in_bounds(x, z) {
                    continue;
                }
                self.tiles.set(x as usize, z as usize, Tile::new(kind, amount));
            }
        }
    }

    /// Closest live tile of `kind`, searched ring by ring out to `max_radius`
    ///
    /// Ring `r` holds the cells whose Chebyshev distance from the start is
    /// `r`; ring 1 also covers the start cell. The first ring with a hit
    /// wins, and inside it the lowest Manhattan distance wins, ties going
    /// to the earlier cell in (z, x) scan order.
    pub fn nearest_resource_cell(
        &self,
        from_x: usize,
        from_z: usize,
        kind: ResourceKind,
        max_radius: usize,
    ) -> Option<(usize, usize)> {
        let (fx, fz) = (from_x as i64, from_z as i64);
        // Rings past the larger grid dimension hold no in-bounds cells
        let max_radius = max_radius.min(self.width().max(self.height())) as i64;

        for r in 1..=max_radius {
            let mut best: Option<(i64, (usize, usize))> = None;

            for (dx, dz) in ring_offsets(r) {
                let (x, z) = (fx + dx, fz + dz);
                if !self.tiles.in_bounds(x, z) {
                    continue;
                }
                let cell = (x as usize, z as usize);
                if !self.tile(cell.0, cell.1).has(kind) {
                    continue;
                }
                let dist = dx.abs() + dz.abs();
                if best.map_or(true, |(best_dist, _)| dist < best_dist) {
                    best = Some((dist, cell));
                }
            }

            if let Some((_, cell)) = best {
                return Some(cell);
            }
        }

        None
    }

    /// Uniformly random cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, usize) {
        (rng.gen_range(0..self.width()), rng.gen_range(0..self.height()))
    }

    /// Sum of amounts over tiles of `kind`
    pub fn total_amount(&self, kind: ResourceKind) -> u64 {
        self.tiles()
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| u64::from(t.amount))
            .sum()
    }

    /// Number of tiles of `kind` that still hold something
    pub fn count_live(&self, kind: ResourceKind) -> usize {
        self.tiles().iter().filter(|t| t.has(kind)).count()
    }
}

/// Offsets on the boundary of ring `r` in (z, x) scan order
fn ring_offsets(r: i64) -> impl Iterator<Item = (i64, i64)> {
    (-r..=r).flat_map(move |dz| {
        let full_row = dz.abs() == r || r == 1;
        let step = if full_row { 1 } else { (2 * r) as usize };
        (-r..=r).step_by(step).map(move |dx| (dx, dz))
    })
}
