//! Session tests - whole-game scenarios driven through the command surface

use voxel_tetris::core::{
    DropCurve, PieceRule, ScoringPolicy, Session, SessionConfig, SessionEvent,
};
use voxel_tetris::types::{GameAction, GameMode, Occupant, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const CLEAR_SECS: f32 = 0.4;

fn session_with(config: SessionConfig, first: PieceKind) -> Session {
    let mut session = Session::new(config);
    session.piece_queue_mut().set_next(first);
    assert!(session.start());
    session
}

fn step(session: &mut Session, action: GameAction) {
    session.apply_action(action);
    session.tick(0.0);
}

/// Fill row `y` except the listed columns.
fn fill_row_except(session: &mut Session, y: i8, holes: &[i8]) {
    for x in 0..BOARD_WIDTH as i8 {
        if !holes.contains(&x) {
            session
                .board_mut()
                .set(x, y, Some(Occupant::new(PieceKind::J, 999)));
        }
    }
}

fn drop_to_floor(session: &mut Session) {
    let id = session.piece_id();
    while session.piece_id() == id && session.active().is_some() {
        step(session, GameAction::MoveDown);
    }
}

#[test]
fn o_piece_lands_at_the_bottom_center() {
    let mut s = session_with(SessionConfig::default(), PieceKind::O);
    assert_eq!(s.active().unwrap().y, 18);

    for _ in 0..18 {
        step(&mut s, GameAction::MoveDown);
    }
    assert_eq!(s.active().unwrap().y, 0);
    assert_eq!(s.piece_id(), 1);

    // The 19th step is blocked by the floor and locks.
    step(&mut s, GameAction::MoveDown);
    assert_eq!(s.piece_id(), 2);

    let board = s.board();
    assert_eq!(board.occupied_count(), 4);
    for (x, y) in [(5, 0), (6, 0), (5, 1), (6, 1)] {
        assert_eq!(board.get(x, y), Some(Some(Occupant::new(PieceKind::O, 1))));
    }
}

#[test]
fn single_row_clear_scores_and_shifts() {
    let mut s = session_with(SessionConfig::default(), PieceKind::T);
    // Row 0 full except x=4..6, plus a marker block above.
    fill_row_except(&mut s, 0, &[4, 5, 6]);
    s.board_mut()
        .set(0, 1, Some(Occupant::new(PieceKind::S, 500)));
    // T spawns at x=5: its flat side covers 4..6, nub at (5, y+1).
    drop_to_floor(&mut s);

    assert_eq!(s.score(), 100);
    assert_eq!(s.lines(), 1);
    assert!(s.active().is_none(), "spawn waits for the clear animation");
    assert_eq!(s.clears().pending().len(), 1);

    let events = s.take_events();
    assert!(events.iter().any(|e| matches!(
        e,
        SessionEvent::RowsCleared { count: 1, score_delta: 100, .. }
    )));

    s.tick(CLEAR_SECS / 2.0);
    assert!(s.board().is_row_full(0));
    s.tick(CLEAR_SECS);

    // The T nub and the marker drop into row 0.
    assert!(!s.board().is_row_full(0));
    assert_eq!(s.board().get(0, 0), Some(Some(Occupant::new(PieceKind::S, 500))));
    assert!(s.board().is_occupied(5, 0));
    assert_eq!(s.board().occupied_count(), 2);
    assert!(s.active().is_some());
}

#[test]
fn two_row_clear_with_vertical_i() {
    let config = SessionConfig::default().with_scoring(ScoringPolicy::BatchMultiplier);
    let mut s = session_with(config, PieceKind::I);
    fill_row_except(&mut s, 0, &[9]);
    fill_row_except(&mut s, 1, &[9]);
    fill_row_except(&mut s, 2, &[0, 9]);
    s.board_mut()
        .set(3, 3, Some(Occupant::new(PieceKind::Z, 700)));

    // Vertical I on the anchor column covers y-1..=y+2; walk it to column 9.
    step(&mut s, GameAction::Rotate);
    for _ in 0..4 {
        step(&mut s, GameAction::MoveRight);
    }
    assert_eq!(s.active().unwrap().x, 9);
    drop_to_floor(&mut s);

    assert_eq!(s.lines(), 2);
    assert_eq!(s.score(), 400);

    s.tick(CLEAR_SECS);
    // Row 2 (missing x=0) and the Z marker each fall by exactly two rows.
    let b = s.board();
    assert!(!b.is_occupied(0, 0));
    assert!(b.is_occupied(1, 0));
    assert!(b.is_occupied(9, 0));
    assert!(b.is_occupied(9, 1));
    assert_eq!(b.get(3, 1), Some(Some(Occupant::new(PieceKind::Z, 700))));
    assert!(!b.is_occupied(3, 3));
    assert_eq!(b.find_full_rows().len(), 0);
}

#[test]
fn per_row_scoring_adds_per_row() {
    let mut s = session_with(SessionConfig::default(), PieceKind::I);
    fill_row_except(&mut s, 0, &[9]);
    fill_row_except(&mut s, 1, &[9]);
    step(&mut s, GameAction::Rotate);
    for _ in 0..4 {
        step(&mut s, GameAction::MoveRight);
    }
    drop_to_floor(&mut s);
    assert_eq!(s.score(), 200);
    assert_eq!(s.lines(), 2);
}

#[test]
fn blocked_spawn_ends_the_game() {
    let mut s = Session::default();
    for y in (BOARD_HEIGHT - 2) as i8..BOARD_HEIGHT as i8 {
        fill_row_except(&mut s, y, &[0]);
    }
    s.start();
    assert_eq!(s.mode(), GameMode::GameOver);
    assert!(s.active().is_none());

    // Everything but reset is ignored now.
    assert!(!s.move_left());
    assert!(!s.rotate());
    assert!(!s.tick(5.0));
    assert!(!s.toggle_pause());

    s.reset();
    assert_eq!(s.mode(), GameMode::Running);
    assert!(s.active().is_some());
    assert_eq!(s.board().occupied_count(), 0);
}

#[test]
fn repeated_spawns_eventually_top_out() {
    let mut s = session_with(SessionConfig::default().with_seed(3), PieceKind::O);
    // Gravity alone, in big steps, until the stack reaches the top.
    let mut last = None;
    for _ in 0..10_000 {
        if s.mode() == GameMode::GameOver {
            break;
        }
        s.tick(1.0);
        if let Some(ev) = s.take_events().last() {
            last = Some(*ev);
        }
    }
    assert_eq!(s.mode(), GameMode::GameOver);
    assert!(matches!(
        last,
        Some(SessionEvent::ModeChanged { to: GameMode::GameOver, .. })
    ));
}

#[test]
fn pause_blocks_gravity_and_input() {
    let mut s = session_with(SessionConfig::default(), PieceKind::S);
    let before = s.active().unwrap();
    step(&mut s, GameAction::TogglePause);
    assert_eq!(s.mode(), GameMode::Paused);
    s.apply_action(GameAction::MoveLeft);
    s.tick(3.0);
    assert_eq!(s.active().unwrap(), before);

    step(&mut s, GameAction::Resume);
    step(&mut s, GameAction::MoveLeft);
    assert_eq!(s.active().unwrap().x, before.x - 1);
}

#[test]
fn speed_up_curve_follows_level() {
    let config = SessionConfig::default().with_drop_curve(DropCurve::SpeedUp);
    let s = session_with(config, PieceKind::T);
    assert!((s.drop_interval_secs() - 1.0).abs() < 1e-6);
    assert_eq!(s.level(), 0);
}

#[test]
fn bag_rule_deals_every_kind_in_seven_spawns() {
    let config = SessionConfig::default().with_piece_rule(PieceRule::Bag7);
    let mut s = Session::new(config);
    s.start();
    let mut seen = vec![s.active().unwrap().kind];
    // Lock each piece in place by stepping it down until a new one spawns.
    while seen.len() < 7 {
        drop_to_floor(&mut s);
        s.board_mut().clear();
        if let Some(p) = s.active() {
            seen.push(p.kind);
        }
    }
    seen.sort_by_key(|k| k.index());
    seen.dedup();
    assert_eq!(seen.len(), 7);
}

#[test]
fn snapshot_serializes_to_json() {
    let s = session_with(SessionConfig::default(), PieceKind::L);
    let json = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(json["mode"], "running");
    assert_eq!(json["active"]["kind"], "l");
    assert_eq!(json["board"].as_array().unwrap().len(), BOARD_HEIGHT as usize);
}
