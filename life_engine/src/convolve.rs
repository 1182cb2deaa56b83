// convolve.rs - Neighbourhood sums over the torus

use crate::grid::{ALIVE_MIDPOINT, Grid};
use crate::kernel::Kernel;
use crate::torus::wrap;

/// Weighted average of the neighbourhood of `(x, y)` under `kernel`.
///
/// Every cell offset is wrapped around the grid edges. The sum is divided by
/// the kernel's `max_value`, so the result stays in `[0, 1]` while cells do.
pub fn convolve(grid: &Grid, x: usize, y: usize, kernel: &Kernel) -> f32 {
    let (w, h) = (grid.width(), grid.height());
    let (x, y) = (x as isize, y as isize);

    let mut sum = 0.0;
    for tap in kernel.taps() {
        let nx = wrap(x + tap.dx, w);
        let ny = wrap(y + tap.dy, h);
        sum += grid.get(nx, ny) * tap.weight;
    }
    sum / kernel.max_value()
}

/// Number of the eight surrounding cells that are alive.
pub fn live_neighbours(grid: &Grid, x: usize, y: usize) -> u8 {
    let (w, h) = (grid.width(), grid.height());
    let (x, y) = (x as isize, y as isize);

    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue; // skip self
            }
            if grid.get(wrap(x + dx, w), wrap(y + dy, h)) > ALIVE_MIDPOINT {
                count += 1;
            }
        }
    }
    count
}
