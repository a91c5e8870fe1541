//! GameView and terminal encoding end to end (no real terminal)

use blockfall::core::GameSession;
use blockfall::term::{encode_diff_into, encode_full_into, FrameBuffer, GameView, Hud, Viewport};
use blockfall::types::PieceKind;

fn contains(fb: &FrameBuffer, needle: &str) -> bool {
    (0..fb.height()).any(|y| fb.row_text(y).contains(needle))
}

#[test]
fn game_over_banner_after_topping_out() {
    let mut session = GameSession::with_seed(4);
    session.reset();
    for col in 1..10 {
        session.grid_mut().set(0, col, Some(PieceKind::Z));
    }
    session.spawn_kind(PieceKind::O);
    session.hard_drop();
    assert!(session.is_game_over());

    let hud = Hud {
        high_score: 12,
        autopilot: None,
    };
    let fb = GameView::default().render(&session.snapshot(), &hud, Viewport::new(80, 24));
    assert!(contains(&fb, "GAME OVER"));
    assert!(contains(&fb, "12"));
}

#[test]
fn reused_buffer_matches_fresh_render() {
    let mut session = GameSession::with_seed(4);
    session.reset();
    let view = GameView::default();
    let hud = Hud::default();
    let viewport = Viewport::new(60, 24);

    let mut reused = FrameBuffer::new(1, 1);
    view.render_into(&session.snapshot(), &hud, viewport, &mut reused);
    session.move_left();
    session.tick();
    view.render_into(&session.snapshot(), &hud, viewport, &mut reused);

    assert_eq!(reused, view.render(&session.snapshot(), &hud, viewport));
}

#[test]
fn moving_the_piece_produces_a_small_diff() {
    let mut session = GameSession::with_seed(4);
    session.reset();
    let view = GameView::default();
    let hud = Hud::default();
    let viewport = Viewport::new(60, 24);

    let before = view.render(&session.snapshot(), &hud, viewport);
    session.tick();
    let after = view.render(&session.snapshot(), &hud, viewport);

    let mut full = Vec::new();
    encode_full_into(&after, &mut full).unwrap();
    let mut diff = Vec::new();
    encode_diff_into(&before, &after, &mut diff).unwrap();
    assert!(!diff.is_empty());
    assert!(diff.len() < full.len());
}
