// rows.rs - One tokio task per grid row
//
// Each row of the next generation only reads the current grid, so rows can be
// computed in any order. Results are collected before anything is written.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::runtime::Runtime;

use crate::error::EngineError;
use crate::grid::Grid;
use crate::rule::Rule;

/// Shared flag asking in-flight row workers to stop at the next row boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome of a row-parallel tick.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// The new generation was committed.
    Committed { generation: u64 },
    /// Cancelled before every row finished; the grid is unchanged.
    Cancelled,
}

pub(crate) type Row = (usize, Vec<f32>);

/// Row coroutine: computes row `y` unless cancellation was requested.
async fn process_row(rule: Arc<Rule>, grid: Arc<Grid>, y: usize, cancel: CancelToken) -> Option<Row> {
    if cancel.is_cancelled() {
        return None;
    }
    let mut row = vec![0.0; grid.width()];
    rule.fill_row(&grid, y, &mut row);

    tokio::task::yield_now().await;
    if cancel.is_cancelled() { None } else { Some((y, row)) }
}

/// Spawns every row, then waits for all of them.
///
/// Returns `Ok(None)` when any row saw the cancel flag.
pub(crate) fn compute_rows(
    runtime: &Runtime,
    rule: &Arc<Rule>,
    grid: &Arc<Grid>,
    cancel: &CancelToken,
) -> Result<Option<Vec<Row>>, EngineError> {
    runtime.block_on(async {
        let handles: Vec<_> = (0..grid.height())
            .map(|y| tokio::spawn(process_row(Arc::clone(rule), Arc::clone(grid), y, cancel.clone())))
            .collect();

        let mut rows = Vec::with_capacity(handles.len());
        let mut cancelled = false;
        for handle in handles {
            match handle.await {
                Ok(Some(row)) => rows.push(row),
                Ok(None) => cancelled = true,
                Err(err) => return Err(EngineError::RowTask(err.to_string())),
            }
        }
        Ok(if cancelled { None } else { Some(rows) })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_clones_share_state() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
        other.reset();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn rows_come_back_complete() {
        let runtime = Runtime::new().unwrap();
        let rule = Arc::new(Rule::Binary);
        let mut grid = Grid::new(5, 4);
        grid.set(1, 1, 1.0);
        grid.set(2, 1, 1.0);
        grid.set(3, 1, 1.0);
        let grid = Arc::new(grid);

        let rows = compute_rows(&runtime, &rule, &grid, &CancelToken::new()).unwrap().unwrap();
        assert_eq!(rows.len(), 4);
        let (_, row0) = rows.iter().find(|(y, _)| *y == 0).unwrap();
        assert_eq!(row0, &vec![0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn cancelled_token_yields_nothing() {
        let runtime = Runtime::new().unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let out = compute_rows(&runtime, &Arc::new(Rule::Binary), &Arc::new(Grid::new(4, 4)), &cancel).unwrap();
        assert!(out.is_none());
    }
}
