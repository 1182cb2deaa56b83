// cycle.rs - Detects a grid state repeating within the last few generations

/// Number of recent fingerprints remembered.
pub const HISTORY_LEN: usize = 10;

/// Ring of recent grid fingerprints.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    history: [u64; HISTORY_LEN],
    count: usize,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `fingerprint`; returns `true` if it was already in the ring.
    pub fn observe(&mut self, fingerprint: u64) -> bool {
        let filled = self.count.min(HISTORY_LEN);
        if self.history[..filled].contains(&fingerprint) {
            return true;
        }
        self.history[self.count % HISTORY_LEN] = fingerprint;
        self.count += 1;
        false
    }

    pub fn reset(&mut self) {
        self.history = [0; HISTORY_LEN];
        self.count = 0;
    }
}
