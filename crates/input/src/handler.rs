//! Soft drop hold tracking for terminal environments.
//!
//! A single down press only steps the piece. Soft drop starts on the second
//! down event of a hold: an auto-repeat, or another press arriving within the
//! timeout (terminals without event-type reporting send repeats as presses).
//! Terminals that report key release end the hold immediately; for the rest,
//! the hold ends once no down key has arrived for the timeout.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, is_down_key};
use crate::types::GameAction;

/// Commands produced by one key event (at most a step plus a soft drop edge)
pub type KeyActions = ArrayVec<GameAction, 2>;

const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone)]
pub struct InputHandler {
    /// A down press was seen and its hold is not yet confirmed
    down_pending: bool,
    down_held: bool,
    /// Milliseconds since the last down key event
    since_down_ms: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            down_pending: false,
            down_held: false,
            since_down_ms: 0,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn soft_drop_held(&self) -> bool {
        self.down_held
    }

    /// Translate one terminal key event into game commands.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyActions {
        let mut actions = KeyActions::new();

        if key.kind == KeyEventKind::Release {
            if is_down_key(key.code) {
                self.down_pending = false;
                if self.down_held {
                    self.down_held = false;
                    actions.push(GameAction::SoftDropOff);
                }
            }
            return actions;
        }

        if let Some(action) = handle_key_event(key) {
            actions.push(action);
        }
        if is_down_key(key.code) {
            let continues_hold = key.kind == KeyEventKind::Repeat
                || ((self.down_pending || self.down_held)
                    && self.since_down_ms <= self.key_release_timeout_ms);
            if continues_hold {
                self.down_pending = false;
                if !self.down_held {
                    self.down_held = true;
                    actions.push(GameAction::SoftDropOn);
                }
            } else {
                self.down_pending = true;
            }
            self.since_down_ms = 0;
        }
        actions
    }

    /// Advance the release timeout; returns `SoftDropOff` when a hold expires.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<GameAction> {
        if !self.down_pending && !self.down_held {
            return None;
        }
        self.since_down_ms = self.since_down_ms.saturating_add(elapsed_ms);
        if self.since_down_ms <= self.key_release_timeout_ms {
            return None;
        }
        let was_held = self.down_held;
        self.reset();
        was_held.then_some(GameAction::SoftDropOff)
    }

    pub fn reset(&mut self) {
        self.down_pending = false;
        self.down_held = false;
        self.since_down_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
