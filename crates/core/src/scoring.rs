//! Scoring module - line-clear points and gravity curve
//!
//! Two scoring policies are supported:
//! - `PerRow`: a flat 100 points per cleared row (default).
//! - `BatchMultiplier`: rows cleared together multiply, 100 × n × n.
//!
//! Gravity is either fixed or speeds up with the level (lines / 10).

use serde::Serialize;

use crate::types::{
    DROP_INTERVALS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, LINES_PER_LEVEL, POINTS_PER_ROW,
    SOFT_DROP_DIVISOR,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoringPolicy {
    #[default]
    PerRow,
    BatchMultiplier,
}

impl ScoringPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "per-row" | "perrow" | "row" => Some(ScoringPolicy::PerRow),
            "batch" | "multiplier" | "batch-multiplier" => Some(ScoringPolicy::BatchMultiplier),
            _ => None,
        }
    }

    /// Points for clearing `rows` rows in a single lock
    pub fn score_for(&self, rows: usize) -> u32 {
        let rows = rows as u32;
        match self {
            ScoringPolicy::PerRow => POINTS_PER_ROW.saturating_mul(rows),
            ScoringPolicy::BatchMultiplier => POINTS_PER_ROW
                .saturating_mul(rows)
                .saturating_mul(rows),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DropCurve {
    #[default]
    Fixed,
    SpeedUp,
}

/// Level reached after clearing `lines` lines
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL
}

/// Level drop interval in milliseconds (speed-up curve)
///
/// Levels past the table keep shrinking by a fixed step down to a floor.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let last = DROP_INTERVALS.len() - 1;
    if (level as usize) <= last {
        return DROP_INTERVALS[level as usize];
    }
    let extra = (level as usize - last) as u32;
    DROP_INTERVALS[last]
        .saturating_sub(extra.saturating_mul(DROP_INTERVAL_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}

/// Soft drop interval for a level on the speed-up curve
pub fn get_soft_drop_interval_ms(level: u32) -> u32 {
    (get_drop_interval_ms(level) / SOFT_DROP_DIVISOR).max(1)
}
