//! Terminal voxel tetris runner (default binary).
//!
//! Loop per frame: read keys, tick the session by the measured delta, write
//! session events to the optional JSONL log, render.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use voxel_tetris::core::{GameSnapshot, Session, SessionConfig, SessionEvent};
use voxel_tetris::input::{should_quit, InputHandler};
use voxel_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use voxel_tetris::types::FRAME_MS;

/// Runner settings from `VOXEL_TETRIS_*` variables.
#[derive(Debug, Clone)]
struct RunnerConfig {
    event_log: Option<PathBuf>,
    frame_ms: u32,
}

impl RunnerConfig {
    fn from_env() -> Self {
        let event_log = std::env::var("VOXEL_TETRIS_EVENT_LOG")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let frame_ms = std::env::var("VOXEL_TETRIS_FRAME_MS")
            .ok()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(FRAME_MS);
        Self { event_log, frame_ms }
    }
}

/// One JSON object per session event, one event per line.
struct EventLog {
    out: BufWriter<File>,
    path: PathBuf,
}

impl EventLog {
    fn create(path: PathBuf) -> Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("create event log {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
            path,
        })
    }

    fn write_all(&mut self, events: &[SessionEvent]) -> Result<()> {
        if events.is_empty() {
            return Ok(());
        }
        for ev in events {
            serde_json::to_writer(&mut self.out, ev)
                .with_context(|| format!("write event log {}", self.path.display()))?;
            self.out.write_all(b"\n")?;
        }
        self.out
            .flush()
            .with_context(|| format!("flush event log {}", self.path.display()))
    }
}

fn main() -> Result<()> {
    let runner = RunnerConfig::from_env();
    let config = SessionConfig::from_env();

    // Open the log before touching the terminal so a bad path reports cleanly.
    let mut log = runner.event_log.clone().map(EventLog::create).transpose()?;

    let mut session = Session::new(config);
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, log.as_mut(), &runner);

    // Always try to restore terminal state before reporting anything.
    let restored = term.exit();

    match &result {
        Ok(()) => eprintln!(
            "[voxel-tetris] score {} lines {} level {} ({})",
            session.score(),
            session.lines(),
            session.level(),
            session.mode().as_str()
        ),
        Err(err) => eprintln!("[voxel-tetris] error: {err:#}"),
    }
    if let Some(log) = &runner.event_log {
        eprintln!("[voxel-tetris] events written to {}", log.display());
    }

    result.and(restored)
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut Session,
    mut log: Option<&mut EventLog>,
    runner: &RunnerConfig,
) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(runner.frame_ms as u64);
    let mut last_frame = Instant::now();

    loop {
        // Input: wait out the rest of the frame, then drain whatever is queued.
        let mut timeout = frame.saturating_sub(last_frame.elapsed());
        while event::poll(timeout).context("poll terminal events")? {
            match event::read().context("read terminal event")? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    for action in input.handle_key(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
            timeout = Duration::ZERO;
        }

        // Simulation.
        let now = Instant::now();
        let delta = now.duration_since(last_frame);
        last_frame = now;

        if let Some(action) = input.update(delta.as_millis() as u32) {
            session.apply_action(action);
        }
        session.tick(delta.as_secs_f32());

        let events = session.take_events();
        if let Some(log) = log.as_deref_mut() {
            log.write_all(&events)?;
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;
    }
}
