// main.rs - Window host for the toroidal Life engine

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use eframe::egui;
use life_engine::{Engine, EngineConfig, Preset, RuleConfig};
use tracing::info;

mod app;
mod kernel_image;
mod render;
mod ui;

use app::LifeApp;

#[derive(Parser, Debug)]
#[command(name = "life_view", about = "Continuous Game of Life on a torus")]
struct Args {
    /// Grid width in cells.
    #[arg(long, default_value_t = 200)]
    width: usize,

    /// Grid height in cells.
    #[arg(long, default_value_t = 200)]
    height: usize,

    /// Screen pixels per cell.
    #[arg(long, default_value_t = 4.0)]
    scale: f32,

    #[arg(long, value_enum, default_value_t = PresetArg::Classic)]
    preset: PresetArg,

    /// JSON engine configuration; replaces --preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image whose pixel intensities form the inner kernel.
    #[arg(long)]
    inner_kernel: Option<PathBuf>,

    /// Image whose pixel intensities form the outer (or only) kernel.
    #[arg(long)]
    outer_kernel: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between generations while running.
    #[arg(long, default_value_t = 200)]
    interval_ms: u64,

    /// Compute each generation with one tokio task per row.
    #[arg(long)]
    rows: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PresetArg {
    Classic,
    Continuous,
    Bands,
    SoftBands,
    Smoothed,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Classic => Preset::Classic,
            PresetArg::Continuous => Preset::Continuous,
            PresetArg::Bands => Preset::Bands,
            PresetArg::SoftBands => Preset::SoftBands,
            PresetArg::Smoothed => Preset::Smoothed,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let (config, preset) = build_config(&args)?;
    let engine = Engine::new(args.width, args.height, config).context("building engine")?;
    let runtime = if args.rows {
        Some(tokio::runtime::Runtime::new().context("starting row workers")?)
    } else {
        None
    };
    info!(width = args.width, height = args.height, rows = args.rows, "starting viewer");

    let app = LifeApp::new(
        engine,
        preset,
        runtime,
        Duration::from_millis(args.interval_ms),
        args.scale,
    );

    let window = [
        (args.width as f32 * args.scale).max(760.0) + 20.0,
        args.height as f32 * args.scale + 180.0,
    ];
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(window),
        ..Default::default()
    };

    eframe::run_native("Life Sim", options, Box::new(|_cc| Box::new(app)))
        .map_err(|err| anyhow!("window failed: {err}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Resolves the engine configuration and, when it came from a named preset,
/// which one.
fn build_config(args: &Args) -> Result<(EngineConfig, Option<Preset>)> {
    let (mut config, preset) = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config: EngineConfig = serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?;
            (config, None)
        }
        None => {
            let preset = Preset::from(args.preset);
            (preset.config(), Some(preset))
        }
    };

    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }

    let inner = args.inner_kernel.as_deref().map(kernel_image::load).transpose()?;
    let outer = args.outer_kernel.as_deref().map(kernel_image::load).transpose()?;
    let custom_kernels = inner.is_some() || outer.is_some();

    match &mut config.rule {
        RuleConfig::Binary if custom_kernels => {
            bail!("the classic rule uses a fixed neighbourhood and takes no kernel images")
        }
        RuleConfig::Binary => {}
        RuleConfig::Continuous { kernel, .. } => {
            if inner.is_some() {
                bail!("the continuous rule has a single kernel; pass it with --outer-kernel");
            }
            if let Some(spec) = outer {
                *kernel = spec;
            }
        }
        RuleConfig::ThresholdBand { inner: i, outer: o, .. }
        | RuleConfig::SmoothedThresholdBand { inner: i, outer: o, .. } => {
            if let Some(spec) = inner {
                *i = spec;
            }
            if let Some(spec) = outer {
                *o = spec;
            }
        }
    }

    // Kernels from images no longer match the named preset.
    let preset = if custom_kernels { None } else { preset };
    Ok((config, preset))
}
