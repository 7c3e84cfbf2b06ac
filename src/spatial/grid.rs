//! Generic cell storage laid out on the ground plane

use crate::core::types::Vec3;

/// Dense 2D grid over the x/z plane, centred on `origin`
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: Clone + Default> {
    pub width: usize,
    pub height: usize,
    pub cell_size: f32,
    pub origin: Vec3,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize, cell_size: f32, origin: Vec3) -> Self {
        Self {
            width,
            height,
            cell_size,
            origin,
            data: vec![T::default(); width * height],
        }
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, z: i64) -> bool {
        x >= 0 && z >= 0 && (x as usize) < self.width && (z as usize) < self.height
    }

    #[inline]
    fn index(&self, x: usize, z: usize) -> usize {
        x + z * self.width
    }

    #[inline]
    pub fn get(&self, x: usize, z: usize) -> Option<&T> {
        if x < self.width && z < self.height {
            Some(&self.data[self.index(x, z)])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, z: usize) -> Option<&mut T> {
        if x < self.width && z < self.height {
            let idx = self.index(x, z);
            Some(&mut self.data[idx])
        } else {
            None
        }
    }

    /// # Panics
    /// If `(x, z)` lies outside the grid.
    #[inline]
    pub fn set(&mut self, x: usize, z: usize, value: T) {
        let (width, height) = (self.width, self.height);
        match self.get_mut(x, z) {
            Some(slot) => *slot = value,
            None => panic!("cell ({x}, {z}) outside {width}x{height} grid"),
        }
    }

    /// Cells in row-major order (z outer, x inner)
    pub fn cells(&self) -> &[T] {
        &self.data
    }

    fn half_extent(&self) -> (f32, f32) {
        (
            self.width as f32 * self.cell_size * 0.5,
            self.height as f32 * self.cell_size * 0.5,
        )
    }

    /// Convert world position to cell coordinates, clamped into the grid
    #[inline]
    pub fn world_to_cell(&self, pos: Vec3) -> (usize, usize) {
        let (half_w, half_h) = self.half_extent();
        let local = pos - self.origin;
        let x = ((local.x + half_w) / self.cell_size).floor() as i64;
        let z = ((local.z + half_h) / self.cell_size).floor() as i64;
        (
            x.clamp(0, self.width as i64 - 1) as usize,
            z.clamp(0, self.height as i64 - 1) as usize,
        )
    }

    /// Cell center in world coordinates (y is the origin's height)
    pub fn cell_center(&self, x: usize, z: usize) -> Vec3 {
        let (half_w, half_h) = self.half_extent();
        self.origin
            + Vec3::new(
                (x as f32 + 0.5) * self.cell_size - half_w,
                0.0,
                (z as f32 + 0.5) * self.cell_size - half_h,
            )
    }
}
