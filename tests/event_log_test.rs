//! JSONL event log

use std::fs;

use blockfall::core::GameSession;
use blockfall::engine::{Autopilot, AutopilotConfig, AutopilotStats, PolicyKind};
use blockfall::event_log::{EventLog, LogRecord};
use blockfall::types::PieceKind;
use serde_json::Value;

fn read_lines(path: &std::path::Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn records_are_tagged_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");

    let mut session = GameSession::with_seed(77);
    session.reset();
    session.spawn_kind(PieceKind::O);
    session.hard_drop();
    let event = session.take_last_event().unwrap();

    {
        let mut log = EventLog::open(&path).unwrap();
        assert!(log.is_enabled());
        log.record(&LogRecord::reset(&session));
        log.record(&LogRecord::lock(event));
        log.record(&LogRecord::GameOver {
            episode_id: 1,
            score: 3,
            high_score: 9,
        });
    }

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["type"], "reset");
    assert_eq!(lines[0]["seed"], 77);
    assert_eq!(lines[0]["episode_id"], 1);
    assert_eq!(lines[1]["type"], "lock");
    assert_eq!(lines[1]["rows_cleared"], 0);
    assert_eq!(lines[1]["piece_id"], session.piece_id() - 1);
    assert_eq!(lines[1]["game_over"], false);
    assert_eq!(lines[2]["type"], "game_over");
    assert_eq!(lines[2]["high_score"], 9);
}

#[test]
fn reopening_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    let stats = AutopilotStats::default();

    for _ in 0..2 {
        let mut log = EventLog::open(&path).unwrap();
        log.record(&LogRecord::AutopilotStats {
            policy: "random",
            stats: &stats,
        });
        log.flush();
    }

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["type"], "autopilot_stats");
    assert_eq!(lines[1]["policy"], "random");
    assert_eq!(lines[1]["stats"]["actions"].as_array().unwrap().len(), 40);
}

#[test]
fn disabled_log_drops_records() {
    let mut log = EventLog::disabled();
    assert!(!log.is_enabled());
    log.record(&LogRecord::GameOver {
        episode_id: 1,
        score: 0,
        high_score: 0,
    });
    log.flush();
}

#[test]
fn open_fails_for_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = EventLog::open(dir.path().join("nope").join("events.jsonl"))
        .err()
        .unwrap();
    assert!(err.to_string().contains("open event log"));
}

#[test]
fn every_autopilot_lock_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");

    let mut session = GameSession::with_seed(31);
    session.reset();
    let config = AutopilotConfig {
        policy: PolicyKind::Random,
        ..AutopilotConfig::default()
    };
    let mut autopilot = Autopilot::from_config(config, 31);
    autopilot.start(&mut session);

    {
        let mut log = EventLog::open(&path).unwrap();
        for _ in 0..10_000 {
            let outcome = autopilot.step(&mut session).unwrap();
            if let Some(event) = outcome.finished.and_then(|game| game.final_lock) {
                log.record(&LogRecord::lock(event));
            }
            if let Some(event) = session.take_last_event() {
                log.record(&LogRecord::lock(event));
            }
            if autopilot.stats().games() == 3 {
                break;
            }
        }
    }

    let stats = autopilot.stats();
    assert_eq!(stats.games(), 3);

    let lines = read_lines(&path);
    let locks: Vec<&Value> = lines.iter().filter(|l| l["type"] == "lock").collect();
    // Every step hard drops exactly one piece.
    assert_eq!(locks.len(), stats.total_moves as usize);

    let endings: Vec<&&Value> = locks.iter().filter(|l| l["game_over"] == true).collect();
    assert_eq!(endings.len(), 3);
    for (ending, &score) in endings.iter().zip(&stats.scores) {
        assert_eq!(ending["score"], score);
    }
}
