//! Session module - the game loop and its state machine
//!
//! Ties the board, the active piece, the clear tracker and piece selection
//! together. All mutation happens inside command calls and [`Session::tick`].
//!
//! Mode transitions:
//!
//! ```text
//! NotStarted --start--> Running <--pause/resume--> Paused
//!                          |
//!                          +--spawn blocked / top out--> GameOver
//! any mode --reset--> Running
//! ```

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::clear::ClearTracker;
use crate::config::SessionConfig;
use crate::events::SessionEvent;
use crate::input_state::{InputState, Press};
use crate::pieces::Piece;
use crate::rng::PieceQueue;
use crate::scoring::{get_drop_interval_ms, get_soft_drop_interval_ms, level_for_lines, DropCurve};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameMode, Occupant, PieceKind};

/// Events kept between drains; later events are dropped when full.
const MAX_EVENTS: usize = 32;

pub type SessionEvents = ArrayVec<SessionEvent, MAX_EVENTS>;

#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    board: Board,
    active: Option<Piece>,
    queue: PieceQueue,
    clears: ClearTracker,
    input: InputState,
    events: SessionEvents,
    mode: GameMode,
    score: u32,
    lines: u32,
    /// Seconds since the last automatic downward step
    drop_timer: f32,
    /// Id of the most recently spawned piece (0 before the first spawn)
    piece_id: u32,
    /// Number of resets, mixed into the seed so each game differs
    episode: u32,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            board: Board::new(),
            active: None,
            queue: PieceQueue::new(config.seed, config.piece_rule),
            clears: ClearTracker::new(config.clear_animation_secs()),
            input: InputState::new(),
            events: SessionEvents::new(),
            mode: GameMode::NotStarted,
            score: 0,
            lines: 0,
            drop_timer: 0.0,
            piece_id: 0,
            episode: 0,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        level_for_lines(self.lines)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions (puzzles, tests, replays).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn clears(&self) -> &ClearTracker {
        &self.clears
    }

    pub fn next_kind(&self) -> PieceKind {
        self.queue.peek()
    }

    pub fn piece_queue_mut(&mut self) -> &mut PieceQueue {
        &mut self.queue
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn drop_timer(&self) -> f32 {
        self.drop_timer
    }

    pub fn soft_drop_held(&self) -> bool {
        self.input.soft_drop_held()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> SessionEvents {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: SessionEvent) {
        let _ = self.events.try_push(event);
    }

    fn set_mode(&mut self, to: GameMode) {
        if self.mode == to {
            return;
        }
        let from = self.mode;
        self.mode = to;
        self.emit(SessionEvent::ModeChanged { from, to });
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    /// Leave the start screen and spawn the first piece
    pub fn start(&mut self) -> bool {
        if self.mode != GameMode::NotStarted {
            return false;
        }
        self.set_mode(GameMode::Running);
        self.spawn_piece();
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.mode != GameMode::Running {
            return false;
        }
        self.set_mode(GameMode::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.mode != GameMode::Paused {
            return false;
        }
        self.set_mode(GameMode::Running);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.mode {
            GameMode::Running => self.pause(),
            GameMode::Paused => self.resume(),
            _ => false,
        }
    }

    /// Throw the current game away and start a fresh one, from any mode
    pub fn reset(&mut self) {
        self.episode = self.episode.wrapping_add(1);
        self.board.clear();
        self.active = None;
        self.queue = PieceQueue::new(
            self.config.seed.wrapping_add(self.episode),
            self.config.piece_rule,
        );
        self.clears.clear();
        self.input.reset();
        self.score = 0;
        self.lines = 0;
        self.drop_timer = 0.0;
        self.set_mode(GameMode::Running);
        self.spawn_piece();
    }

    fn press(&mut self, press: Press) -> bool {
        if self.mode != GameMode::Running {
            return false;
        }
        self.input.press(press);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.press(Press::Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.press(Press::Right)
    }

    pub fn move_down(&mut self) -> bool {
        self.press(Press::Down)
    }

    pub fn rotate(&mut self) -> bool {
        self.press(Press::Rotate)
    }

    pub fn soft_drop_on(&mut self) {
        self.input.set_soft_drop(true);
    }

    pub fn soft_drop_off(&mut self) {
        self.input.set_soft_drop(false);
    }

    /// Apply a frontend command
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::Rotate => self.rotate(),
            GameAction::SoftDropOn => {
                self.soft_drop_on();
                true
            }
            GameAction::SoftDropOff => {
                self.soft_drop_off();
                true
            }
            GameAction::Start => self.start(),
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    // ---------------------------------------------------------------------
    // Simulation
    // ---------------------------------------------------------------------

    /// Current gravity interval in seconds
    pub fn drop_interval_secs(&self) -> f32 {
        let soft = self.input.soft_drop_held();
        let ms = match self.config.drop_curve {
            DropCurve::Fixed if soft => self.config.soft_drop_interval_ms,
            DropCurve::Fixed => self.config.drop_interval_ms,
            DropCurve::SpeedUp if soft => get_soft_drop_interval_ms(self.level())
                .min(self.config.soft_drop_interval_ms),
            DropCurve::SpeedUp => get_drop_interval_ms(self.level()),
        };
        ms as f32 / 1000.0
    }

    /// Advance the game by `delta` seconds.
    ///
    /// Order within a frame: gravity, then this frame's presses, then clear
    /// animations (collapsing finished rows and spawning once none remain).
    /// Returns true if anything on the board or the active piece changed.
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.mode != GameMode::Running {
            self.input.discard_presses();
            return false;
        }
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        let mut changed = false;

        if self.active.is_some() {
            self.drop_timer += delta;
            if self.drop_timer >= self.drop_interval_secs() {
                self.drop_timer = 0.0;
                self.step_down();
                changed = true;
            }
        }

        let presses: ArrayVec<Press, 4> = self.input.drain().collect();
        for press in presses {
            if self.mode != GameMode::Running {
                break;
            }
            changed |= match press {
                Press::Left => self.try_shift(-1),
                Press::Right => self.try_shift(1),
                Press::Down => self.step_down(),
                Press::Rotate => self.try_rotate(),
            };
        }

        if self.mode == GameMode::Running {
            changed |= self.advance_clears(delta);
        }

        changed
    }

    fn try_shift(&mut self, dx: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.translate(dx, 0);
        if self.board.collides(&moved.cells()) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Rotate clockwise in place; a blocked rotation is simply rejected.
    fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let rotated = active.rotated(1);
        if self.board.collides(&rotated.cells()) {
            return false;
        }
        self.active = Some(rotated);
        true
    }

    /// Move down one row, or lock the piece if it cannot move.
    fn step_down(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.translate(0, -1);
        if self.board.collides(&moved.cells()) {
            self.lock_piece();
        } else {
            self.active = Some(moved);
        }
        true
    }

    /// Transfer the active piece into the board and start any row clears
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        let cells = active.cells();

        if !self
            .board
            .lock(&cells, Occupant::new(active.kind, self.piece_id))
        {
            // Part of the piece is still above the top row.
            self.emit(SessionEvent::ToppedOut {
                piece_id: self.piece_id,
            });
            self.set_mode(GameMode::GameOver);
            return;
        }

        self.emit(SessionEvent::Locked {
            kind: active.kind,
            piece_id: self.piece_id,
            cells,
        });

        let full_rows = self.board.find_full_rows();
        if full_rows.is_empty() {
            self.spawn_piece();
            return;
        }

        let count = full_rows.len();
        let score_delta = self.config.scoring.score_for(count);
        self.lines = self.lines.saturating_add(count as u32);
        self.score = self.score.saturating_add(score_delta);
        self.clears.start(&full_rows);
        self.emit(SessionEvent::RowsCleared {
            count: count as u8,
            score_delta,
            score: self.score,
            lines: self.lines,
        });
    }

    fn advance_clears(&mut self, delta: f32) -> bool {
        let completed = self.clears.advance(delta);
        for &row in &completed {
            self.board.collapse_row(row as usize);
            self.emit(SessionEvent::RowCollapsed { row });
        }

        if self.active.is_none() && self.clears.is_idle() {
            self.spawn_piece();
            return true;
        }
        !completed.is_empty()
    }

    /// Spawn the next piece, or end the game if its cells are already taken
    fn spawn_piece(&mut self) {
        let kind = self.queue.draw();
        let piece = Piece::spawn(kind);
        self.piece_id = self.piece_id.wrapping_add(1);
        self.drop_timer = 0.0;

        if self.board.collides(&piece.cells()) {
            self.active = None;
            self.set_mode(GameMode::GameOver);
            return;
        }

        self.active = Some(piece);
        self.emit(SessionEvent::Spawned {
            kind,
            piece_id: self.piece_id,
        });
    }

    // ---------------------------------------------------------------------
    // Snapshots
    // ---------------------------------------------------------------------

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.clearing.clear();
        out.clearing
            .extend(self.clears.pending().iter().copied());
        out.next = self.queue.peek();
        out.mode = self.mode;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level();
        out.piece_id = self.piece_id;
        out.soft_drop = self.input.soft_drop_held();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
