//! Pause and speed multiplier applied to the host's frame time

/// Lowest scale restored when unpausing
pub const MIN_RESUME_SCALE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeControl {
    scale: f32,
    last_non_zero: f32,
}

impl TimeControl {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            last_non_zero: 1.0,
        }
    }

    pub fn time_scale(&self) -> f32 {
        self.scale
    }

    pub fn is_paused(&self) -> bool {
        self.scale == 0.0
    }

    /// Negative values clamp to zero, which pauses
    pub fn set_time_scale(&mut self, multiplier: f32) {
        let multiplier = if multiplier.is_finite() { multiplier.max(0.0) } else { 0.0 };
        if multiplier == 0.0 {
            self.set_paused(true);
        } else {
            self.scale = multiplier;
            self.last_non_zero = multiplier;
        }
    }

    /// Pausing remembers the current scale; resuming restores it
    pub fn set_paused(&mut self, paused: bool) {
        if paused {
            if self.scale > 0.0 {
                self.last_non_zero = self.scale;
            }
            self.scale = 0.0;
        } else if self.scale == 0.0 {
            self.scale = self.last_non_zero.max(MIN_RESUME_SCALE);
        }
    }

    /// Simulation step for a frame of `raw_dt` seconds
    pub fn scaled_dt(&self, raw_dt: f32) -> f32 {
        raw_dt.max(0.0) * self.scale
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new()
    }
}
