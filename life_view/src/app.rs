// app.rs - Viewer state wrapping one simulation engine

use std::time::{Duration, Instant};

use egui::{Color32, TextureHandle};
use life_engine::{CancelToken, CycleDetector, Engine, PATTERNS, Preset, TickStatus};
use tokio::runtime::Runtime;
use tracing::{error, info, warn};

pub struct LifeApp {
    engine: Engine,
    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub scale: f32,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    /// Index into `Preset::ALL`, or `None` for a configuration read from file.
    pub selected_preset: Option<usize>,
    pub status: Option<String>,

    // Row workers, present when started with `--rows`.
    runtime: Option<Runtime>,

    history: CycleDetector,
    pub(crate) texture: Option<TextureHandle>,
    pub(crate) texture_stale: bool,
}

impl LifeApp {
    pub fn new(
        engine: Engine,
        preset: Option<Preset>,
        runtime: Option<Runtime>,
        update_interval: Duration,
        scale: f32,
    ) -> Self {
        let mut app = Self {
            engine,
            is_running: false,
            last_update: Instant::now(),
            update_interval,
            scale,
            live_color: Color32::WHITE,
            dead_color: Color32::BLACK,
            selected_pattern: 0,
            selected_preset: preset.and_then(|p| Preset::ALL.iter().position(|&q| q == p)),
            status: None,
            runtime,
            history: CycleDetector::new(),
            texture: None,
            texture_stale: true,
        };
        app.history.observe(app.engine.fingerprint());
        app
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn update_generation(&mut self) {
        match &self.runtime {
            // The tick blocks this thread, so nothing here can cancel it.
            Some(runtime) => match self.engine.tick_rows(runtime, &CancelToken::new()) {
                Ok(TickStatus::Committed { .. }) => {}
                Ok(TickStatus::Cancelled) => return,
                Err(err) => {
                    error!(%err, "tick failed");
                    self.status = Some(err.to_string());
                    self.is_running = false;
                    return;
                }
            },
            None => self.engine.tick(),
        }
        self.texture_stale = true;

        if self.history.observe(self.engine.fingerprint()) {
            info!(generation = self.engine.generation(), "state repeated, pausing");
            self.status = Some(format!("Repeating state at generation {}", self.engine.generation()));
            self.is_running = false;
        }
    }

    fn after_reset(&mut self) {
        self.history.reset();
        self.history.observe(self.engine.fingerprint());
        self.texture_stale = true;
        self.status = None;
    }

    pub fn randomize(&mut self) {
        self.engine.randomize();
        self.after_reset();
    }

    pub fn clear_grid(&mut self) {
        self.engine.clear();
        self.after_reset();
    }

    pub fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = PATTERNS.get(self.selected_pattern) {
            let (rows, cols) = pattern.size();
            let x = self.engine.width().saturating_sub(cols) / 2;
            let y = self.engine.height().saturating_sub(rows) / 2;
            self.engine.stamp(pattern, x, y);
            self.after_reset();
        }
    }

    pub fn toggle_cell(&mut self, x: usize, y: usize) {
        if x < self.engine.width() && y < self.engine.height() {
            self.engine.toggle_cell(x, y);
            self.history.reset();
            self.texture_stale = true;
        }
    }

    /// Replaces the engine with a fresh one running `Preset::ALL[index]` at
    /// the same size. The current engine is kept if the preset cannot run
    /// on this grid.
    pub fn switch_preset(&mut self, index: usize) {
        let Some(&preset) = Preset::ALL.get(index) else { return };
        let mut config = preset.config();
        config.rng_seed = self.engine.config().rng_seed;

        match Engine::new(self.engine.width(), self.engine.height(), config) {
            Ok(engine) => {
                info!(preset = preset.name(), "switched preset");
                self.engine = engine;
                self.selected_preset = Some(index);
                self.is_running = false;
                self.after_reset();
            }
            Err(err) => {
                warn!(preset = preset.name(), %err, "preset rejected");
                self.status = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_engine::EngineConfig;

    fn app(width: usize, height: usize) -> LifeApp {
        let config = EngineConfig { rng_seed: Some(11), ..Preset::Classic.config() };
        let engine = Engine::new(width, height, config).unwrap();
        LifeApp::new(engine, Some(Preset::Classic), None, Duration::from_millis(200), 4.0)
    }

    #[test]
    fn oscillator_pauses_the_run() {
        let mut app = app(12, 12);
        app.selected_pattern = PATTERNS.iter().position(|p| p.name == "Blinker").unwrap();
        app.apply_selected_pattern();
        app.is_running = true;

        app.update_generation();
        assert!(app.is_running);
        app.update_generation();
        assert!(!app.is_running);
        assert!(app.status.is_some());
    }

    #[test]
    fn unusable_preset_keeps_the_old_engine() {
        let mut app = app(12, 12);
        let continuous = Preset::ALL.iter().position(|&p| p == Preset::Continuous).unwrap();
        app.switch_preset(continuous);
        assert_eq!(app.selected_preset, Some(0));
        assert!(app.status.as_deref().unwrap().contains("too large"));
    }

    #[test]
    fn row_workers_drive_the_engine() {
        let config = EngineConfig { rng_seed: Some(5), ..Preset::Classic.config() };
        let engine = Engine::new(16, 16, config).unwrap();
        let runtime = Runtime::new().unwrap();
        let mut app = LifeApp::new(engine, None, Some(runtime), Duration::from_millis(1), 2.0);
        app.update_generation();
        assert_eq!(app.engine().generation(), 1);
        assert_eq!(app.selected_preset, None);
    }

    #[test]
    fn out_of_range_clicks_are_ignored() {
        let mut app = app(8, 8);
        app.clear_grid();
        app.toggle_cell(8, 0);
        app.toggle_cell(3, 3);
        assert_eq!(app.engine().population(), 1.0);
    }
}
