// rule.rs - A growth variant bound to its loaded kernels

use crate::config::RuleConfig;
use crate::convolve::{convolve, live_neighbours};
use crate::error::EngineError;
use crate::grid::{ALIVE_MIDPOINT, Grid, sanitize};
use crate::growth::{self, Bands, GaussianGrowth};
use crate::kernel::Kernel;

/// The per-cell update an engine applies each generation.
#[derive(Debug, Clone)]
pub enum Rule {
    Binary,
    Continuous { kernel: Kernel, growth: GaussianGrowth },
    ThresholdBand { inner: Kernel, outer: Kernel, bands: Bands },
    SmoothedThresholdBand { inner: Kernel, outer: Kernel, bands: Bands, smoothing: Kernel, step: f32 },
}

impl Rule {
    /// Loads every kernel the configuration names and checks its parameters.
    pub fn from_config(config: &RuleConfig) -> Result<Self, EngineError> {
        let rule = match config {
            RuleConfig::Binary => Rule::Binary,
            RuleConfig::Continuous { kernel, growth } => {
                growth.validate()?;
                Rule::Continuous {
                    kernel: kernel.build().map_err(EngineError::kernel("continuous"))?,
                    growth: *growth,
                }
            }
            RuleConfig::ThresholdBand { inner, outer, bands } => {
                bands.validate()?;
                Rule::ThresholdBand {
                    inner: inner.build().map_err(EngineError::kernel("inner"))?,
                    outer: outer.build().map_err(EngineError::kernel("outer"))?,
                    bands: *bands,
                }
            }
            RuleConfig::SmoothedThresholdBand { inner, outer, bands, smoothing, step } => {
                bands.validate()?;
                if !step.is_finite() {
                    return Err(EngineError::InvalidRule(format!("smoothing step {step} is not finite")));
                }
                Rule::SmoothedThresholdBand {
                    inner: inner.build().map_err(EngineError::kernel("inner"))?,
                    outer: outer.build().map_err(EngineError::kernel("outer"))?,
                    bands: *bands,
                    smoothing: smoothing.build().map_err(EngineError::kernel("smoothing"))?,
                    step: *step,
                }
            }
        };
        Ok(rule)
    }

    /// Spatial reach of each neighbourhood the rule reads, by role.
    ///
    /// The smoothing kernel acts on convolution results rather than on the
    /// grid, so it is not listed.
    pub fn reach(&self) -> Vec<(&'static str, (usize, usize))> {
        match self {
            Rule::Binary => vec![("neighbourhood", (1, 1))],
            Rule::Continuous { kernel, .. } => vec![("continuous", kernel.radius())],
            Rule::ThresholdBand { inner, outer, .. }
            | Rule::SmoothedThresholdBand { inner, outer, .. } => {
                vec![("inner", inner.radius()), ("outer", outer.radius())]
            }
        }
    }

    /// Next aliveness of cell `(x, y)`, reading only `grid`. Always a
    /// finite value in `[0, 1]`.
    pub fn next_value(&self, grid: &Grid, x: usize, y: usize) -> f32 {
        let value = match self {
            Rule::Binary => {
                let alive = grid.get(x, y) > ALIVE_MIDPOINT;
                growth::binary(alive, live_neighbours(grid, x, y))
            }
            Rule::Continuous { kernel, growth } => {
                growth.apply(grid.get(x, y), convolve(grid, x, y, kernel))
            }
            Rule::ThresholdBand { inner, outer, bands } => {
                bands.threshold(convolve(grid, x, y, inner), convolve(grid, x, y, outer))
            }
            Rule::SmoothedThresholdBand { inner, outer, bands, smoothing, step } => bands.smoothed(
                convolve(grid, x, y, inner),
                convolve(grid, x, y, outer),
                smoothing,
                *step,
            ),
        };
        sanitize(value)
    }

    /// Computes row `y` of the next generation into `out`.
    pub fn fill_row(&self, grid: &Grid, y: usize, out: &mut [f32]) {
        for (x, cell) in out.iter_mut().enumerate() {
            *cell = self.next_value(grid, x, y);
        }
    }
}
