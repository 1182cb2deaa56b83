// grid.rs - Grid types for the toroidal automaton

use std::hash::{DefaultHasher, Hash, Hasher};

/// Aliveness above which a cell counts as alive for binary rules.
pub const ALIVE_MIDPOINT: f32 = 0.5;

/// Row-major buffer of per-cell aliveness values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<f32>,
}

impl Grid {
    /// All-dead grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![0.0; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Panics if `(x, y)` lies outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.cells[self.index(x, y)]
    }

    /// Stores `value` clamped into `[0, 1]`; NaN becomes 0.
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let i = self.index(x, y);
        self.cells[i] = sanitize(value);
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub fn row(&self, y: usize) -> &[f32] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [f32] {
        &mut self.cells
    }

    pub fn fill(&mut self, value: f32) {
        self.cells.fill(sanitize(value));
    }

    /// Sum of all aliveness values.
    pub fn population(&self) -> f32 {
        self.cells.iter().sum()
    }

    /// Hash of the exact cell values, used to spot repeating states.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.width.hash(&mut hasher);
        for cell in &self.cells {
            cell.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }
}

pub(crate) fn sanitize(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
