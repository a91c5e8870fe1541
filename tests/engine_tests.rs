//! Automated play against a real session

use blockfall::core::GameSession;
use blockfall::engine::features::{encode_board_2d, encode_flat, FLAT_FEATURE_LEN};
use blockfall::engine::{
    apply_placement, decode_action_id, valid_action_ids, Autopilot, AutopilotConfig, PolicyKind,
};
use blockfall::types::SessionState;

#[test]
fn heuristic_autopilot_clears_lines() {
    let mut session = GameSession::with_seed(11);
    session.reset();
    let mut autopilot = Autopilot::from_config(AutopilotConfig::default(), 11);
    assert!(autopilot.start(&mut session));

    for _ in 0..200 {
        assert!(autopilot.step(&mut session).is_some());
    }

    let stats = autopilot.stats();
    assert_eq!(stats.total_moves, 200);
    let finished: u32 = stats.scores.iter().sum();
    assert!(session.score() + finished > 0);
}

#[test]
fn random_autopilot_finishes_games() {
    let config = AutopilotConfig {
        policy: PolicyKind::Random,
        ..AutopilotConfig::default()
    };
    let mut session = GameSession::with_seed(3);
    session.reset();
    let mut autopilot = Autopilot::from_config(config, 3);
    autopilot.start(&mut session);

    let mut finished = Vec::new();
    for _ in 0..10_000 {
        let outcome = autopilot.step(&mut session).unwrap();
        finished.extend(outcome.finished.map(|game| game.score));
        if finished.len() == 3 {
            break;
        }
    }
    assert_eq!(finished.len(), 3);
    assert_eq!(autopilot.stats().scores, finished);
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.episode_id(), 4);

    let summary = autopilot.stats().to_string();
    assert!(summary.contains("total games: 3"));
}

#[test]
fn every_valid_action_places_where_it_says() {
    let mut session = GameSession::with_seed(21);
    session.reset();
    for aid in valid_action_ids(&session) {
        let mut trial = session.clone();
        let placement = decode_action_id(aid).unwrap();
        let report = apply_placement(&mut trial, placement, false).unwrap();
        assert!(report.reached(placement), "action {aid}: {report:?}");
    }
}

#[test]
fn features_follow_the_session() {
    let mut session = GameSession::with_seed(8);
    assert!(encode_flat(&session.snapshot(), 0).is_none());

    session.reset();
    session.hard_drop();
    let snap = session.snapshot();

    let flat = encode_flat(&snap, 0).unwrap();
    assert_eq!(flat.len(), FLAT_FEATURE_LEN);
    let board_cells = flat[..200].iter().filter(|&&v| v == 1.0).count();
    assert_eq!(board_cells, session.grid().occupied_count());

    let image = encode_board_2d(&snap).unwrap();
    let filled: usize = image.iter().flatten().filter(|&&v| v == 1).count();
    assert!(filled >= session.grid().occupied_count());
}
