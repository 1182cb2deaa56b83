use life_engine::{
    CancelToken, CycleDetector, Engine, EngineConfig, EngineError, GaussianGrowth, Grid, Kernel,
    KernelError, KernelSpec, Pattern, Preset, RuleConfig, Seeding, TickStatus,
};
use tokio::runtime::Runtime;

fn seeded(preset: Preset, seed: u64) -> EngineConfig {
    EngineConfig { rng_seed: Some(seed), ..preset.config() }
}

fn classic_with(width: usize, height: usize, alive: &[(usize, usize)]) -> Engine {
    let mut engine = Engine::new(width, height, seeded(Preset::Classic, 0)).unwrap();
    engine.clear();
    for &(x, y) in alive {
        engine.set_cell(x, y, 1.0);
    }
    engine
}

fn live_cells(grid: &Grid) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.get(x, y) > 0.5 {
                cells.push((x, y));
            }
        }
    }
    cells
}

#[test]
fn lone_cell_in_the_middle_of_3x3_dies() {
    let mut engine = classic_with(3, 3, &[(1, 1)]);
    engine.tick();
    assert_eq!(engine.population(), 0.0);
}

#[test]
fn lone_cell_on_5x5_leaves_an_empty_grid() {
    let mut engine = classic_with(5, 5, &[(2, 2)]);
    engine.tick();
    assert!(engine.sample().cells().iter().all(|&c| c == 0.0));
    assert_eq!(engine.generation(), 1);
}

#[test]
fn three_neighbours_give_life_whatever_the_cell_was() {
    // Dead centre with three live neighbours is born.
    let mut engine = classic_with(7, 7, &[(2, 2), (3, 2), (4, 2)]);
    engine.tick();
    assert_eq!(engine.sample().get(3, 3), 1.0);
    assert_eq!(engine.sample().get(3, 1), 1.0);

    // Live centre with three live neighbours survives.
    let mut engine = classic_with(7, 7, &[(3, 3), (2, 2), (3, 2), (4, 2)]);
    engine.tick();
    assert_eq!(engine.sample().get(3, 3), 1.0);
}

#[test]
fn live_cell_with_one_neighbour_dies() {
    let mut engine = classic_with(6, 6, &[(2, 2), (3, 2)]);
    engine.tick();
    assert_eq!(engine.sample().get(2, 2), 0.0);
    assert_eq!(engine.sample().get(3, 2), 0.0);
}

#[test]
fn neighbours_wrap_across_the_corners() {
    // Three cells around the (0, 0) corner, each on a different edge.
    let mut engine = classic_with(6, 6, &[(5, 5), (5, 0), (0, 5)]);
    engine.tick();
    assert_eq!(engine.sample().get(0, 0), 1.0);
}

#[test]
fn glider_moves_one_cell_diagonally_every_four_generations() {
    let mut engine = Engine::new(10, 10, seeded(Preset::Classic, 0)).unwrap();
    let glider = Pattern::find("Glider").unwrap();
    engine.stamp(glider, 8, 8);
    let start = live_cells(engine.sample());

    for _ in 0..4 {
        engine.tick();
    }

    let mut expected: Vec<_> = start.iter().map(|&(x, y)| ((x + 1) % 10, (y + 1) % 10)).collect();
    expected.sort_by_key(|&(x, y)| (y, x));
    assert_eq!(live_cells(engine.sample()), expected);
}

#[test]
fn blinker_oscillates_and_the_detector_sees_it() {
    let mut engine = Engine::new(8, 8, seeded(Preset::Classic, 0)).unwrap();
    engine.stamp(Pattern::find("Blinker").unwrap(), 2, 3);
    let start = engine.fingerprint();

    let mut detector = CycleDetector::new();
    assert!(!detector.observe(start));
    engine.tick();
    assert_ne!(engine.fingerprint(), start);
    assert!(!detector.observe(engine.fingerprint()));
    engine.tick();
    assert_eq!(engine.fingerprint(), start);
    assert!(detector.observe(engine.fingerprint()));
}

#[test]
fn identical_seeds_give_identical_runs() {
    for preset in Preset::ALL {
        let mut a = Engine::new(32, 32, seeded(preset, 1234)).unwrap();
        let mut b = Engine::new(32, 32, seeded(preset, 1234)).unwrap();
        assert_eq!(a.sample(), b.sample(), "{}", preset.name());
        for _ in 0..3 {
            a.tick();
            b.tick();
            assert_eq!(a.sample(), b.sample(), "{}", preset.name());
        }
        a.randomize();
        b.randomize();
        assert_eq!(a.sample(), b.sample(), "{}", preset.name());
    }
}

#[test]
fn different_seeds_diverge() {
    let a = Engine::new(32, 32, seeded(Preset::Classic, 1)).unwrap();
    let b = Engine::new(32, 32, seeded(Preset::Classic, 2)).unwrap();
    assert_ne!(a.sample(), b.sample());
}

#[test]
fn generation_counts_ticks() {
    let mut engine = Engine::new(16, 16, seeded(Preset::Classic, 5)).unwrap();
    assert_eq!(engine.generation(), 0);
    for n in 1..=25 {
        engine.tick();
        assert_eq!(engine.generation(), n);
    }
}

#[test]
fn every_preset_keeps_cells_in_unit_range() {
    for preset in Preset::ALL {
        let mut engine = Engine::new(32, 32, seeded(preset, 99)).unwrap();
        for _ in 0..3 {
            engine.tick();
            assert!(
                engine.sample().cells().iter().all(|c| (0.0..=1.0).contains(c)),
                "{}",
                preset.name()
            );
        }
    }
}

#[test]
fn row_workers_match_the_sequential_tick() {
    let runtime = Runtime::new().unwrap();
    let cancel = CancelToken::new();
    for preset in [Preset::Classic, Preset::Smoothed, Preset::Continuous] {
        let mut sequential = Engine::new(30, 28, seeded(preset, 77)).unwrap();
        let mut parallel = Engine::new(30, 28, seeded(preset, 77)).unwrap();
        for generation in 1..=3 {
            sequential.tick();
            let status = parallel.tick_rows(&runtime, &cancel).unwrap();
            assert_eq!(status, TickStatus::Committed { generation });
            assert_eq!(sequential.sample(), parallel.sample(), "{}", preset.name());
        }
    }
}

#[test]
fn cancelled_row_tick_changes_nothing() {
    let runtime = Runtime::new().unwrap();
    let mut engine = Engine::new(20, 20, seeded(Preset::Classic, 8)).unwrap();
    engine.tick();
    let before = engine.sample().clone();

    let cancel = CancelToken::new();
    cancel.cancel();
    assert_eq!(engine.tick_rows(&runtime, &cancel).unwrap(), TickStatus::Cancelled);
    assert_eq!(engine.sample(), &before);
    assert_eq!(engine.generation(), 1);

    cancel.reset();
    assert_eq!(
        engine.tick_rows(&runtime, &cancel).unwrap(),
        TickStatus::Committed { generation: 2 }
    );
}

#[test]
fn kernels_decoded_from_pixels_drive_the_band_rule() {
    const W: [u8; 3] = [255, 255, 255];
    const K: [u8; 3] = [0, 0, 0];
    let inner = Kernel::from_rgb(1, 1, &[W]).unwrap();
    let outer = Kernel::from_rgb(3, 3, &[W, W, W, W, K, W, W, W, W]).unwrap();
    assert_eq!(outer.max_value(), 8.0);

    let config = EngineConfig {
        rule: RuleConfig::ThresholdBand {
            inner: KernelSpec::from(&inner),
            outer: KernelSpec::from(&outer),
            bands: Default::default(),
        },
        seeding: Seeding::Uniform,
        rng_seed: Some(3),
    };
    let mut engine = Engine::new(6, 6, config).unwrap();
    engine.clear();
    // A T shape: the live centre sees three of its eight ring cells (0.375,
    // inside the alive band); the dead cell below sees the same 0.375, which
    // is above the 0.36 edge band.
    for (x, y) in [(1, 2), (2, 2), (3, 2), (2, 1)] {
        engine.set_cell(x, y, 1.0);
    }
    engine.tick();
    assert_eq!(engine.sample().get(2, 2), 1.0);
    assert_eq!(engine.sample().get(2, 3), 0.0);
}

#[test]
fn configs_that_would_produce_nan_are_refused() {
    let overflowing = EngineConfig {
        rule: RuleConfig::Continuous {
            kernel: KernelSpec::Weights { rows: vec![vec![3.0e38; 3]; 3] },
            growth: GaussianGrowth::default(),
        },
        seeding: Seeding::Uniform,
        rng_seed: Some(1),
    };
    assert!(matches!(
        Engine::new(8, 8, overflowing),
        Err(EngineError::InvalidKernel { role: "continuous", source: KernelError::SumOverflow })
    ));

    let vanishing = EngineConfig {
        rule: RuleConfig::Continuous {
            kernel: KernelSpec::Uniform { size: 3 },
            growth: GaussianGrowth { mu: 0.0, sigma: 1e-30, dt: 0.1 },
        },
        seeding: Seeding::Uniform,
        rng_seed: Some(1),
    };
    assert!(matches!(Engine::new(8, 8, vanishing), Err(EngineError::InvalidRule(_))));
}

#[test]
#[should_panic(expected = "outside")]
fn writing_past_the_row_end_panics() {
    let mut engine = classic_with(5, 5, &[]);
    engine.set_cell(5, 0, 1.0);
}
