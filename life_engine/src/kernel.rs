// kernel.rs - Neighbourhood weight matrices

use serde::{Deserialize, Serialize};

use crate::error::KernelError;

/// Sum of the three 8-bit channels of a white pixel.
const FULL_INTENSITY: f32 = 765.0;

/// One non-zero weight, stored as an offset from the kernel centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Tap {
    pub dx: isize,
    pub dy: isize,
    pub weight: f32,
}

/// Immutable weight matrix with an odd width and height.
///
/// `max_value` is the sum of every weight and is what convolution divides by,
/// so a kernel always averages its neighbourhood into `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    width: usize,
    height: usize,
    weights: Vec<f32>,
    max_value: f32,
    taps: Vec<Tap>,
}

impl Kernel {
    /// Builds a kernel from a row-major weight buffer.
    pub fn from_weights(width: usize, height: usize, weights: Vec<f32>) -> Result<Self, KernelError> {
        if width == 0 || height == 0 {
            return Err(KernelError::Empty);
        }
        if weights.len() != width * height {
            return Err(KernelError::LengthMismatch {
                width,
                height,
                expected: width * height,
                got: weights.len(),
            });
        }
        if width % 2 == 0 || height % 2 == 0 {
            return Err(KernelError::EvenDimension { width, height });
        }

        let mut max_value = 0.0;
        for (i, &value) in weights.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(KernelError::BadWeight { x: i % width, y: i / width, value });
            }
            max_value += value;
        }
        if !max_value.is_finite() {
            return Err(KernelError::SumOverflow);
        }
        if max_value <= 0.0 {
            return Err(KernelError::ZeroSum(max_value));
        }

        let (cx, cy) = ((width / 2) as isize, (height / 2) as isize);
        let taps = weights
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w > 0.0)
            .map(|(i, &weight)| Tap {
                dx: (i % width) as isize - cx,
                dy: (i / width) as isize - cy,
                weight,
            })
            .collect();

        Ok(Self { width, height, weights, max_value, taps })
    }

    /// Builds a kernel from a matrix given as rows, top row first.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, KernelError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        let mut weights = Vec::with_capacity(width * height);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(KernelError::RaggedRow { row, expected: width, got: values.len() });
            }
            weights.extend_from_slice(values);
        }
        Self::from_weights(width, height, weights)
    }

    /// Builds a kernel from decoded RGB pixels, row-major.
    ///
    /// Each weight is the pixel's summed channel intensity scaled to `[0, 1]`,
    /// so white is full weight and black contributes nothing.
    pub fn from_rgb(width: usize, height: usize, pixels: &[[u8; 3]]) -> Result<Self, KernelError> {
        let weights = pixels.iter().map(|&p| pixel_weight(p)).collect();
        Self::from_weights(width, height, weights)
    }

    /// Square kernel of equal weights.
    pub fn uniform(size: usize) -> Result<Self, KernelError> {
        Self::from_weights(size, size, vec![1.0; size * size])
    }

    /// Filled disk of the given radius.
    pub fn disk(radius: usize) -> Result<Self, KernelError> {
        Self::radial(radius, |d| if d <= radius as f32 { 1.0 } else { 0.0 })
    }

    /// Annulus covering `inner < distance <= outer`.
    pub fn ring(inner: usize, outer: usize) -> Result<Self, KernelError> {
        if inner >= outer {
            return Err(KernelError::Shape(format!(
                "ring inner radius {inner} must be below outer radius {outer}"
            )));
        }
        Self::radial(outer, |d| {
            if d > inner as f32 && d <= outer as f32 { 1.0 } else { 0.0 }
        })
    }

    /// Gaussian shell peaking half way out to `radius`.
    ///
    /// `sigma` is measured in units of the radius.
    pub fn soft_ring(radius: usize, sigma: f32) -> Result<Self, KernelError> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(KernelError::Shape(format!("soft ring sigma {sigma} must be positive")));
        }
        Self::radial(radius, |d| {
            let r = d / radius as f32;
            if r > 1.0 {
                0.0
            } else {
                let z = (r - 0.5) / sigma;
                (-0.5 * z * z).exp()
            }
        })
    }

    fn radial(radius: usize, weight: impl Fn(f32) -> f32) -> Result<Self, KernelError> {
        if radius == 0 {
            return Err(KernelError::Shape("radius must be at least 1".into()));
        }
        let size = 2 * radius + 1;
        let r = radius as isize;
        let mut weights = Vec::with_capacity(size * size);
        for dy in -r..=r {
            for dx in -r..=r {
                let d = ((dx * dx + dy * dy) as f32).sqrt();
                weights.push(weight(d));
            }
        }
        Self::from_weights(size, size, weights)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sum of all weights.
    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    /// Largest offsets from the centre along x and y.
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Weight at a signed offset from the centre cell.
    ///
    /// Panics if the offset falls outside the matrix.
    pub fn value_at(&self, dx: isize, dy: isize) -> f32 {
        let (rx, ry) = self.radius();
        let x = (dx + rx as isize) as usize;
        let y = (dy + ry as isize) as usize;
        assert!(x < self.width && y < self.height, "offset ({dx}, {dy}) outside kernel");
        self.weights[y * self.width + x]
    }

    /// Row-major weights, top-left first.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub(crate) fn taps(&self) -> &[Tap] {
        &self.taps
    }
}

/// Normalised weight of a single RGB pixel.
pub fn pixel_weight([r, g, b]: [u8; 3]) -> f32 {
    (r as f32 + g as f32 + b as f32) / FULL_INTENSITY
}

/// Serialisable description of a kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum KernelSpec {
    Uniform { size: usize },
    Disk { radius: usize },
    Ring { inner: usize, outer: usize },
    SoftRing { radius: usize, sigma: f32 },
    /// Explicit matrix, top row first.
    Weights { rows: Vec<Vec<f32>> },
}

impl KernelSpec {
    pub fn build(&self) -> Result<Kernel, KernelError> {
        match self {
            KernelSpec::Uniform { size } => Kernel::uniform(*size),
            KernelSpec::Disk { radius } => Kernel::disk(*radius),
            KernelSpec::Ring { inner, outer } => Kernel::ring(*inner, *outer),
            KernelSpec::SoftRing { radius, sigma } => Kernel::soft_ring(*radius, *sigma),
            KernelSpec::Weights { rows } => Kernel::from_rows(rows),
        }
    }
}

impl From<&Kernel> for KernelSpec {
    fn from(kernel: &Kernel) -> Self {
        KernelSpec::Weights {
            rows: kernel.weights.chunks(kernel.width).map(<[f32]>::to_vec).collect(),
        }
    }
}
