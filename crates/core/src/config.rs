//! Session configuration
//!
//! Every field has a default. `from_env` reads
//! `VOXEL_TETRIS_*` overrides; missing or unparsable values keep the default.

use crate::rng::PieceRule;
use crate::scoring::{DropCurve, ScoringPolicy};
use crate::types::{CLEAR_ANIMATION_MS, DROP_INTERVAL_MS, SOFT_DROP_INTERVAL_MS};

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub seed: u32,
    pub drop_interval_ms: u32,
    pub soft_drop_interval_ms: u32,
    pub clear_animation_ms: u32,
    pub scoring: ScoringPolicy,
    pub drop_curve: DropCurve,
    pub piece_rule: PieceRule,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            drop_interval_ms: DROP_INTERVAL_MS,
            soft_drop_interval_ms: SOFT_DROP_INTERVAL_MS,
            clear_animation_ms: CLEAR_ANIMATION_MS,
            scoring: ScoringPolicy::PerRow,
            drop_curve: DropCurve::Fixed,
            piece_rule: PieceRule::Uniform,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, test map, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let num = |key: &str, default: u32| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        let speed_up = lookup("VOXEL_TETRIS_SPEED_UP")
            .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Self {
            seed: num("VOXEL_TETRIS_SEED", defaults.seed),
            drop_interval_ms: num("VOXEL_TETRIS_DROP_MS", defaults.drop_interval_ms).max(1),
            soft_drop_interval_ms: num("VOXEL_TETRIS_SOFT_DROP_MS", defaults.soft_drop_interval_ms)
                .max(1),
            clear_animation_ms: num("VOXEL_TETRIS_CLEAR_MS", defaults.clear_animation_ms),
            scoring: lookup("VOXEL_TETRIS_SCORING")
                .and_then(|s| ScoringPolicy::from_str(&s))
                .unwrap_or(defaults.scoring),
            drop_curve: if speed_up {
                DropCurve::SpeedUp
            } else {
                defaults.drop_curve
            },
            piece_rule: lookup("VOXEL_TETRIS_PIECES")
                .and_then(|s| PieceRule::from_str(&s))
                .unwrap_or(defaults.piece_rule),
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_drop_curve(mut self, drop_curve: DropCurve) -> Self {
        self.drop_curve = drop_curve;
        self
    }

    pub fn with_piece_rule(mut self, piece_rule: PieceRule) -> Self {
        self.piece_rule = piece_rule;
        self
    }

    pub fn clear_animation_secs(&self) -> f32 {
        self.clear_animation_ms as f32 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        assert_eq!(SessionConfig::from_lookup(|_| None), SessionConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = SessionConfig::from_lookup(lookup(&[
            ("VOXEL_TETRIS_SEED", "77"),
            ("VOXEL_TETRIS_DROP_MS", "500"),
            ("VOXEL_TETRIS_SCORING", "batch"),
            ("VOXEL_TETRIS_SPEED_UP", "true"),
            ("VOXEL_TETRIS_PIECES", "bag7"),
        ]));
        assert_eq!(cfg.seed, 77);
        assert_eq!(cfg.drop_interval_ms, 500);
        assert_eq!(cfg.scoring, ScoringPolicy::BatchMultiplier);
        assert_eq!(cfg.drop_curve, DropCurve::SpeedUp);
        assert_eq!(cfg.piece_rule, PieceRule::Bag7);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let cfg = SessionConfig::from_lookup(lookup(&[
            ("VOXEL_TETRIS_DROP_MS", "fast"),
            ("VOXEL_TETRIS_SOFT_DROP_MS", "0"),
            ("VOXEL_TETRIS_SCORING", "nope"),
        ]));
        assert_eq!(cfg.drop_interval_ms, DROP_INTERVAL_MS);
        assert_eq!(cfg.soft_drop_interval_ms, 1);
        assert_eq!(cfg.scoring, ScoringPolicy::PerRow);
    }
}
