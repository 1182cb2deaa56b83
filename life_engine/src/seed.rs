// seed.rs - Random initial states

use rand::Rng;

use crate::config::Seeding;
use crate::error::EngineError;
use crate::grid::Grid;

impl Seeding {
    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        if let Seeding::Patches { min_count, max_count, size } = *self {
            if min_count > max_count || size == 0 {
                return Err(EngineError::InvalidRule(format!(
                    "patch seeding needs min_count <= max_count and size > 0, got {min_count}..={max_count} of {size}"
                )));
            }
        }
        Ok(())
    }

    /// Overwrites every cell of `grid` according to this strategy.
    pub fn apply<R: Rng>(&self, grid: &mut Grid, rng: &mut R) {
        match *self {
            Seeding::Binary => {
                for cell in grid.cells_mut() {
                    *cell = if rng.random_bool(0.5) { 1.0 } else { 0.0 };
                }
            }
            Seeding::Uniform => {
                for cell in grid.cells_mut() {
                    *cell = rng.random::<f32>();
                }
            }
            Seeding::Patches { min_count, max_count, size } => {
                grid.fill(0.0);
                let count = rng.random_range(min_count..=max_count);
                for _ in 0..count {
                    stamp_patch(grid, size, rng);
                }
            }
        }
    }
}

/// Places one square of noise clear of the grid edges when it fits,
/// otherwise wraps it around the torus from a random origin.
fn stamp_patch<R: Rng>(grid: &mut Grid, size: usize, rng: &mut R) {
    let (w, h) = (grid.width(), grid.height());
    let (sx, sy) = (size.min(w), size.min(h));
    let x0 = patch_origin(w, sx, rng);
    let y0 = patch_origin(h, sy, rng);

    for dy in 0..sy {
        for dx in 0..sx {
            let value = rng.random::<f32>();
            grid.set((x0 + dx) % w, (y0 + dy) % h, value);
        }
    }
}

fn patch_origin<R: Rng>(extent: usize, size: usize, rng: &mut R) -> usize {
    if extent >= size + 2 {
        rng.random_range(1..=extent - size - 1)
    } else {
        rng.random_range(0..extent)
    }
}
