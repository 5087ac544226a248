//! Engine integration tests through the public API.

use std::collections::HashSet;

use gomoku::eval::completes_five;
use gomoku::ui::{Game, Outcome};
use gomoku::{Engine, PackedBoard, PnSearch, Pos, SearchConfig, Stone};

fn engine(budget: usize) -> PnSearch {
    PnSearch::new(SearchConfig::default().with_node_budget(budget))
}

fn play(engine: &mut PnSearch, moves: &[&str]) {
    for m in moves {
        engine.notify_move(m.parse().unwrap());
    }
}

// =============================================================================
// Basic Decisions
// =============================================================================

#[test]
fn test_opening_is_center() {
    let mut engine = engine(1_000);
    assert_eq!(engine.compute_response(), Some(Pos::CENTER));
    assert!(engine.tree().is_empty());
}

#[test]
fn test_completes_own_four() {
    let mut engine = engine(1_000);
    // black d8..g8, white scattered on the first row
    play(&mut engine, &["d8", "a1", "e8", "c1", "f8", "e1", "g8", "g1"]);

    let reply = engine.compute_response().unwrap();
    assert!(reply == "c8".parse().unwrap() || reply == "h8".parse().unwrap());
    let root = engine.tree().root().unwrap();
    assert!(engine.tree().get(root).is_proved());
}

#[test]
fn test_blocks_four_before_anything_else() {
    let mut engine = engine(1_000);
    play(&mut engine, &["c4", "d4", "h8", "e4", "l12", "f4", "l8", "g4"]);
    assert_eq!(engine.side_to_move(), Stone::Black);
    assert_eq!(engine.compute_response(), Some("h4".parse().unwrap()));
}

// =============================================================================
// Budget and Determinism
// =============================================================================

#[test]
fn test_small_budget_still_answers() {
    let mut engine = engine(5);
    play(&mut engine, &["h8", "i9", "g9"]);
    assert!(engine.compute_response().is_some());
    assert!(engine.stats().expansions <= 5);
}

#[test]
fn test_same_position_same_reply() {
    let moves = ["h8", "i9", "g9", "g7"];
    let mut first = engine(300);
    let mut second = engine(300);
    play(&mut first, &moves);
    play(&mut second, &moves);

    let reply = first.compute_response();
    assert_eq!(reply, second.compute_response());
    assert_eq!(reply, first.select_next_move());
}

#[test]
fn test_self_play_stays_legal() {
    let mut engine = engine(200);
    let mut used = HashSet::new();
    let mut board = PackedBoard::new();
    let mut side = Stone::Black;

    for _ in 0..8 {
        let reply = engine.compute_response().expect("a move on a nearly empty board");
        assert!(used.insert(reply), "{reply} played twice");
        assert!(board.is_empty(reply));

        let wins = completes_five(&board, reply, side);
        board.place(reply, side);
        engine.notify_move(reply);
        if wins {
            break;
        }
        side = side.opponent();
    }
    assert_eq!(engine.move_number() as usize, used.len());
}

// =============================================================================
// Game Front End
// =============================================================================

#[test]
fn test_replay_feeds_engine() {
    let path = std::env::temp_dir().join(format!("gomoku_replay_{}.txt", std::process::id()));
    std::fs::write(&path, "h8 i9\ng9\n").unwrap();

    let mut game = Game::new(engine(500), false);
    assert_eq!(game.replay(&path).unwrap(), 3);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(game.current(), Stone::White);
    assert_eq!(game.engine().move_number(), 3);
    assert_eq!(game.engine().side_to_move(), Stone::White);
    assert_eq!(game.outcome(), None);
}

#[test]
fn test_replay_missing_file() {
    let mut game = Game::new(engine(500), true);
    let err = game.replay(std::path::Path::new("/nonexistent/moves.txt")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/moves.txt"));
}

#[test]
fn test_engine_finishes_won_game() {
    // black (engine) has an open four after the replay
    let mut game = Game::new(engine(1_000), false);
    game.load_moves("e8 a1 f8 a3 g8 a5 h8 a7").unwrap();
    assert!(!game.is_human_turn());

    let mut input = std::io::Cursor::new("");
    let mut output = Vec::new();
    assert_eq!(game.run(&mut input, &mut output).unwrap(), Outcome::Won(Stone::Black));
}
