// lib.rs - Continuous cellular automata on a torus
//
// Conway's Life is the binary special case; the band and Gaussian rules
// generalise it to Lenia-style continuous states.

//! Simulation core: kernels, convolution, growth rules and a double-buffered
//! engine over a wraparound grid.
//!
//! ```
//! use life_engine::{Engine, EngineConfig, Preset};
//!
//! let config = EngineConfig { rng_seed: Some(42), ..Preset::Classic.config() };
//! let mut engine = Engine::new(32, 32, config)?;
//! engine.tick();
//! assert_eq!(engine.generation(), 1);
//! assert_eq!(engine.sample().width(), 32);
//! # Ok::<(), life_engine::EngineError>(())
//! ```

pub mod config;
pub mod convolve;
pub mod cycle;
pub mod engine;
pub mod error;
pub mod grid;
pub mod growth;
pub mod kernel;
pub mod patterns;
pub mod rows;
pub mod rule;
mod seed;
pub mod torus;

pub use config::{EngineConfig, Preset, RuleConfig, Seeding};
pub use cycle::CycleDetector;
pub use engine::Engine;
pub use error::{EngineError, KernelError};
pub use grid::Grid;
pub use growth::{Band, Bands, GaussianGrowth};
pub use kernel::{Kernel, KernelSpec};
pub use patterns::{PATTERNS, Pattern};
pub use rows::{CancelToken, TickStatus};
pub use rule::Rule;
