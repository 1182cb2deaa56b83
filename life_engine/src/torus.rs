// torus.rs - Wraparound indexing for the toroidal grid

/// Maps a coordinate that may sit one extent outside the grid back into
/// `0..extent`, treating the axis as periodic.
///
/// Only a single wrap is performed, so `value` must lie in
/// `-extent..2 * extent`. Kernel radii are validated against the grid at
/// engine construction, which keeps every convolution offset in that range.
#[inline]
pub fn wrap(value: isize, extent: usize) -> usize {
    let extent = extent as isize;
    debug_assert!(extent > 0, "wrap on an empty axis");
    debug_assert!(
        value >= -extent && value < 2 * extent,
        "offset {value} is more than one wrap away from 0..{extent}"
    );

    if value < 0 {
        (extent + value) as usize
    } else if value >= extent {
        (value - extent) as usize
    } else {
        value as usize
    }
}
