use voxel_tetris::core::{GameSnapshot, Session, SessionConfig};
use voxel_tetris::term::{GameView, Rgb, Viewport};
use voxel_tetris::types::{GameMode, Occupant, PieceKind};

fn screen_text(fb: &voxel_tetris::term::FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = Session::default().snapshot();
    let view = GameView::default();

    // cell_w=2, cell_h=1: 20x20 board plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_two_chars_wide_at_the_bottom() {
    let mut snap = GameSnapshot {
        mode: GameMode::Running,
        ..GameSnapshot::default()
    };
    snap.board[0][0] = Some(Occupant::new(PieceKind::I, 1));

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Board row 0 is the last screen row inside the border.
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(1, 20).unwrap().style.fg, Rgb::from_hex(0x38bdf8));
}

#[test]
fn term_view_draws_active_piece_at_the_top() {
    let mut session = Session::new(SessionConfig::default());
    session.piece_queue_mut().set_next(PieceKind::O);
    session.start();

    let fb = GameView::default().render(&session.snapshot(), Viewport::new(22, 22));

    // O cells sit at x 5..=6 on board rows 18 and 19 (screen rows 2 and 1).
    for (x, y) in [(11, 1), (13, 1), (11, 2), (13, 2)] {
        assert_eq!(fb.get(x, y).unwrap().ch, '█', "({x}, {y})");
    }
    assert_eq!(fb.get(9, 1).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = Session::default().snapshot();
    snap.mode = GameMode::Running;
    snap.score = 1234;
    snap.lines = 10;
    snap.level = 1;

    let fb = GameView::default().render(&snap, Viewport::new(60, 22));
    let text = screen_text(&fb);
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("LINES"));
    assert!(text.contains("NEXT"));
}

#[test]
fn term_view_overlays_follow_mode() {
    let view = GameView::default();
    let vp = Viewport::new(40, 24);
    let mut snap = GameSnapshot::default();

    assert!(screen_text(&view.render(&snap, vp)).contains("PRESS ENTER"));

    snap.mode = GameMode::Paused;
    assert!(screen_text(&view.render(&snap, vp)).contains("PAUSED"));

    snap.mode = GameMode::GameOver;
    assert!(screen_text(&view.render(&snap, vp)).contains("GAME OVER"));

    snap.mode = GameMode::Running;
    let text = screen_text(&view.render(&snap, vp));
    assert!(!text.contains("PAUSED") && !text.contains("GAME OVER"));
}

#[test]
fn render_into_reuses_and_resizes_framebuffer() {
    let view = GameView::default();
    let snap = GameSnapshot::default();
    let mut fb = view.render(&snap, Viewport::new(30, 24));
    view.render_into(&snap, Viewport::new(50, 26), &mut fb);
    assert_eq!((fb.width(), fb.height()), (50, 26));
}
