//! RNG module - deterministic piece selection
//!
//! Pieces come from a seeded LCG so a game can be replayed from its seed.
//! Two rules are available:
//! - `Uniform`: each spawn picks any of the seven kinds with equal odds.
//! - `Bag7`: each run of seven spawns contains every kind once, shuffled.

use serde::Serialize;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would still advance, but keep seeds distinct from "unset"
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in [0, max). Uses the high bits; the low bits of an LCG are weak.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PieceRule {
    #[default]
    Uniform,
    Bag7,
}

impl PieceRule {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "uniform" | "random" => Some(PieceRule::Uniform),
            "bag7" | "bag" | "7bag" => Some(PieceRule::Bag7),
            _ => None,
        }
    }
}

/// Piece generator with a one-piece preview
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rule: PieceRule,
    rng: SimpleRng,
    seed: u32,
    bag: [PieceKind; 7],
    bag_index: usize,
    next: PieceKind,
}

impl PieceQueue {
    pub fn new(seed: u32, rule: PieceRule) -> Self {
        let mut queue = Self {
            rule,
            rng: SimpleRng::new(seed),
            seed,
            bag: PieceKind::ALL,
            bag_index: PieceKind::ALL.len(),
            next: PieceKind::I,
        };
        queue.next = queue.generate();
        queue
    }

    fn generate(&mut self) -> PieceKind {
        match self.rule {
            PieceRule::Uniform => {
                let i = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
                PieceKind::ALL[i]
            }
            PieceRule::Bag7 => {
                if self.bag_index >= self.bag.len() {
                    self.bag = PieceKind::ALL;
                    self.rng.shuffle(&mut self.bag);
                    self.bag_index = 0;
                }
                let kind = self.bag[self.bag_index];
                self.bag_index += 1;
                kind
            }
        }
    }

    /// The piece the next `draw` will return
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    pub fn draw(&mut self) -> PieceKind {
        let kind = self.next;
        self.next = self.generate();
        kind
    }

    /// Force the next drawn piece (puzzle setups and scripted tests).
    /// The generator itself is untouched.
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = kind;
    }

    pub fn rule(&self) -> PieceRule {
        self.rule
    }

    /// Seed this queue was created with; a queue built from the same seed
    /// and rule deals the same sequence
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1, PieceRule::Uniform)
    }
}
