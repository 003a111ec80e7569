//! Clear animation tracker - per-row progress toward removal
//!
//! When a lock fills rows, each row gets a clear event whose progress climbs
//! from 0 to 1 over the configured duration. The renderer reads progress to
//! fade/shrink the row; the session collapses the row once it completes.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::BOARD_HEIGHT;

const MAX_PENDING: usize = BOARD_HEIGHT as usize;

/// A single row being animated out
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClearEvent {
    pub row: u8,
    /// Animation progress in [0, 1]
    pub progress: f32,
}

/// Rows whose animation finished during one `advance`, highest row first
pub type CompletedRows = ArrayVec<u8, MAX_PENDING>;

#[derive(Debug, Clone, PartialEq)]
pub struct ClearTracker {
    pending: ArrayVec<ClearEvent, MAX_PENDING>,
    duration_secs: f32,
}

impl ClearTracker {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            pending: ArrayVec::new(),
            duration_secs,
        }
    }

    pub fn duration_secs(&self) -> f32 {
        self.duration_secs
    }

    /// Begin animating the given rows. Rows already pending are ignored.
    pub fn start(&mut self, rows: &[u8]) {
        for &row in rows {
            if self.pending.iter().any(|e| e.row == row) {
                continue;
            }
            let _ = self.pending.try_push(ClearEvent { row, progress: 0.0 });
        }
    }

    /// Advance every pending row by `delta` seconds.
    ///
    /// Completed rows are removed from the tracker and returned from the
    /// highest row down, so collapsing them in order never shifts a row that
    /// is still waiting to be collapsed. Rows left pending above a completed
    /// row are re-indexed to follow the collapse.
    pub fn advance(&mut self, delta: f32) -> CompletedRows {
        let mut completed = CompletedRows::new();
        if self.pending.is_empty() {
            return completed;
        }

        let step = if self.duration_secs > 0.0 {
            delta.max(0.0) / self.duration_secs
        } else {
            1.0
        };

        for event in &mut self.pending {
            event.progress = (event.progress + step).min(1.0);
        }

        for event in self.pending.iter().filter(|e| e.progress >= 1.0) {
            completed.push(event.row);
        }
        self.pending.retain(|e| e.progress < 1.0);

        completed.sort_unstable_by(|a, b| b.cmp(a));
        for &row in &completed {
            for event in &mut self.pending {
                if event.row > row {
                    event.row -= 1;
                }
            }
        }

        completed
    }

    /// Pending rows with their progress, in start order
    pub fn pending(&self) -> &[ClearEvent] {
        &self.pending
    }

    pub fn progress_of(&self, row: u8) -> Option<f32> {
        self.pending.iter().find(|e| e.row == row).map(|e| e.progress)
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Default for ClearTracker {
    fn default() -> Self {
        Self::new(crate::types::CLEAR_ANIMATION_MS as f32 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn progress_advances_with_delta() {
        let mut tracker = ClearTracker::new(0.4);
        tracker.start(&[3]);
        assert!(tracker.advance(0.1).is_empty());
        let p = tracker.progress_of(3).unwrap();
        assert!((p - 0.25).abs() < 1e-6);
        assert!(!tracker.is_idle());
    }

    #[test]
    fn completes_after_duration() {
        let mut tracker = ClearTracker::new(0.4);
        tracker.start(&[0, 1]);
        assert!(tracker.advance(0.2).is_empty());
        let done = tracker.advance(0.25);
        assert_eq!(done.as_slice(), &[1, 0]);
        assert!(tracker.is_idle());
    }

    #[test]
    fn duplicate_rows_are_ignored() {
        let mut tracker = ClearTracker::new(0.4);
        tracker.start(&[5, 5]);
        tracker.start(&[5]);
        assert_eq!(tracker.pending().len(), 1);
    }

    #[test]
    fn pending_rows_above_a_completed_row_are_reindexed() {
        let mut tracker = ClearTracker::new(0.4);
        tracker.start(&[2]);
        tracker.advance(0.2);
        tracker.start(&[6]);
        let done = tracker.advance(0.2);
        assert_eq!(done.as_slice(), &[2]);
        assert_eq!(tracker.pending()[0].row, 5);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut tracker = ClearTracker::new(0.0);
        tracker.start(&[7]);
        assert_eq!(tracker.advance(0.0).as_slice(), &[7]);
    }

    #[test]
    fn negative_delta_does_not_rewind() {
        let mut tracker = ClearTracker::new(0.4);
        tracker.start(&[1]);
        tracker.advance(0.2);
        tracker.advance(-1.0);
        assert!((tracker.progress_of(1).unwrap() - 0.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn completed_rows_descend_and_pending_rows_follow_collapses(
            first in proptest::collection::btree_set(0u8..20, 1..6),
            later in proptest::collection::btree_set(0u8..20, 0..6),
        ) {
            let first: Vec<u8> = first.into_iter().collect();
            let later: Vec<u8> = later.into_iter().filter(|r| !first.contains(r)).collect();

            let mut tracker = ClearTracker::new(0.4);
            tracker.start(&first);
            tracker.advance(0.2);
            tracker.start(&later);
            let done = tracker.advance(0.25);

            prop_assert_eq!(done.len(), first.len());
            prop_assert!(done.windows(2).all(|w| w[0] > w[1]));
            prop_assert_eq!(tracker.pending().len(), later.len());
            for (event, &row) in tracker.pending().iter().zip(&later) {
                let below = first.iter().filter(|&&c| c < row).count() as u8;
                prop_assert_eq!(event.row, row - below);
            }
        }
    }
}
