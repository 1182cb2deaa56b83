// growth.rs - Growth functions mapping neighbourhood sums to next aliveness
//
// Every function here is total and returns a value in [0, 1].

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::kernel::Kernel;

/// Perturbation between neighbouring samples of the smoothed band rule.
pub const DEFAULT_SMOOTHING_STEP: f32 = 0.02;

/// Conway's table: survival on 2 or 3 neighbours, birth on exactly 3.
pub fn binary(alive: bool, neighbours: u8) -> f32 {
    match (alive, neighbours) {
        (true, 2) | (true, 3) => 1.0, // Survival
        (false, 3) => 1.0,            // Birth
        _ => 0.0,                     // Death or stays dead
    }
}

/// Closed interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: f32,
    pub high: f32,
}

impl Band {
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Outer-density bands of the threshold rule.
///
/// A cell whose inner sum is at least one half stays alive while the outer
/// sum lies in `alive`; any other cell comes alive only inside the narrower
/// `edge` band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bands {
    pub alive: Band,
    pub edge: Band,
}

impl Default for Bands {
    fn default() -> Self {
        Self { alive: Band::new(0.26, 0.46), edge: Band::new(0.27, 0.36) }
    }
}

impl Bands {
    /// Sharp band rule; always exactly 0 or 1.
    pub fn threshold(&self, inner: f32, outer: f32) -> f32 {
        let band = if inner >= 0.5 { &self.alive } else { &self.edge };
        if band.contains(outer) { 1.0 } else { 0.0 }
    }

    /// Band rule averaged over a grid of perturbed `(inner, outer)` samples.
    ///
    /// Sample `(inner + step * dx, outer + step * dy)` is weighted by the
    /// smoothing kernel's weight at `(dx, dy)`, which softens the band edges.
    pub fn smoothed(&self, inner: f32, outer: f32, smoothing: &Kernel, step: f32) -> f32 {
        let mut sum = 0.0;
        for tap in smoothing.taps() {
            let i = inner + step * tap.dx as f32;
            let o = outer + step * tap.dy as f32;
            sum += self.threshold(i, o) * tap.weight;
        }
        (sum / smoothing.max_value()).min(1.0)
    }

    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        for (name, band) in [("alive", self.alive), ("edge", self.edge)] {
            if !(band.low.is_finite() && band.high.is_finite()) || band.low > band.high {
                return Err(EngineError::InvalidRule(format!(
                    "{name} band [{}, {}] is not an ordered finite interval",
                    band.low, band.high
                )));
            }
        }
        Ok(())
    }
}

/// Lenia growth: a Gaussian bump centred on `mu` applied as an increment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianGrowth {
    pub mu: f32,
    pub sigma: f32,
    /// Fraction of the growth applied per generation.
    pub dt: f32,
}

impl Default for GaussianGrowth {
    fn default() -> Self {
        Self { mu: 0.15, sigma: 0.015, dt: 0.1 }
    }
}

impl GaussianGrowth {
    /// Growth rate in `[-1, 1]` for potential `u`.
    pub fn rate(&self, u: f32) -> f32 {
        let diff = u - self.mu;
        2.0 * (-diff * diff / (2.0 * self.sigma * self.sigma)).exp() - 1.0
    }

    /// Next aliveness of a cell at `current` seeing potential `u`.
    pub fn apply(&self, current: f32, u: f32) -> f32 {
        (current + self.dt * self.rate(u)).clamp(0.0, 1.0)
    }

    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(EngineError::InvalidRule(format!("growth sigma {} must be positive", self.sigma)));
        }
        if !(2.0 * self.sigma * self.sigma).is_normal() {
            return Err(EngineError::InvalidRule(format!(
                "growth sigma {} is out of range for f32 arithmetic",
                self.sigma
            )));
        }
        if !(self.mu.is_finite() && self.dt.is_finite() && self.dt >= 0.0) {
            return Err(EngineError::InvalidRule(format!(
                "growth mu {} and dt {} must be finite with dt >= 0",
                self.mu, self.dt
            )));
        }
        Ok(())
    }
}
