// error.rs - Error types for engine construction

use thiserror::Error;

/// Reasons a weight matrix cannot be used as a kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// The source has no rows or no columns.
    #[error("kernel has no weights")]
    Empty,

    /// Rows of the source matrix differ in length.
    #[error("kernel row {row} has {got} weights, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        got: usize,
    },

    /// Flat weight buffer does not match `width * height`.
    #[error("kernel of {width}x{height} needs {expected} weights, got {got}")]
    LengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },

    /// An even dimension has no centre cell.
    #[error("kernel dimensions {width}x{height} must both be odd")]
    EvenDimension { width: usize, height: usize },

    /// A weight is negative, NaN or infinite.
    #[error("kernel weight at ({x}, {y}) is {value}, expected a finite non-negative number")]
    BadWeight { x: usize, y: usize, value: f32 },

    /// All weights are zero, so normalisation would divide by zero.
    #[error("kernel weights sum to {0}, expected a positive total")]
    ZeroSum(f32),

    /// Weights are individually finite but their total is not.
    #[error("kernel weights overflow when summed")]
    SumOverflow,

    /// A procedural shape was given unusable parameters.
    #[error("invalid kernel shape: {0}")]
    Shape(String),
}

/// Errors surfaced by [`Engine`](crate::Engine) construction and ticking.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Grid width or height is zero.
    #[error("grid dimensions {width}x{height} must both be positive")]
    InvalidDimensions { width: usize, height: usize },

    /// One of the rule's kernels failed to load.
    #[error("invalid {role} kernel: {source}")]
    InvalidKernel {
        /// Which kernel of the rule (`inner`, `outer`, `smoothing`, ...).
        role: &'static str,
        #[source]
        source: KernelError,
    },

    /// A kernel reaches half way around the torus or further, which would
    /// wrap an offset twice.
    #[error(
        "{role} kernel radius {radius_x}x{radius_y} is too large for a {width}x{height} grid"
    )]
    KernelTooLarge {
        role: &'static str,
        radius_x: usize,
        radius_y: usize,
        width: usize,
        height: usize,
    },

    /// Growth or seeding parameters are out of range.
    #[error("invalid rule configuration: {0}")]
    InvalidRule(String),

    /// A row worker panicked while computing the next generation.
    #[error("row worker failed: {0}")]
    RowTask(String),
}

impl EngineError {
    pub(crate) fn kernel(role: &'static str) -> impl FnOnce(KernelError) -> Self {
        move |source| EngineError::InvalidKernel { role, source }
    }
}
