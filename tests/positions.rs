use serde::Deserialize;

use chess_rules::board::{BoardController, Color, DrawReason, GameOutcome};

#[derive(Deserialize)]
struct PositionSet {
    positions: Vec<Position>,
}

#[derive(Deserialize)]
struct Position {
    name: String,
    fen: String,
    legal_moves: usize,
    outcome: String,
}

fn outcome_name(outcome: Option<GameOutcome>) -> &'static str {
    match outcome {
        None => "ongoing",
        Some(GameOutcome::Winner(Color::White)) => "white",
        Some(GameOutcome::Winner(Color::Black)) => "black",
        Some(GameOutcome::Draw(DrawReason::Stalemate)) => "stalemate",
        Some(GameOutcome::Draw(DrawReason::InsufficientMaterial)) => "insufficient_material",
        Some(GameOutcome::Draw(DrawReason::FiftyMoveRule)) => "fifty_move_rule",
        Some(GameOutcome::Draw(DrawReason::ThreefoldRepetition)) => "threefold_repetition",
    }
}

fn load() -> PositionSet {
    let data = include_str!("data/positions.json");
    serde_json::from_str(data).expect("invalid positions.json")
}

#[test]
fn legal_move_counts() {
    for position in load().positions {
        let mut board = BoardController::from_fen(&position.fen)
            .unwrap_or_else(|e| panic!("{}: {e}", position.name));
        let turn = board.turn();
        let moves = board.legal_move_requests(turn);
        assert_eq!(
            moves.len(),
            position.legal_moves,
            "{}: {:?}",
            position.name,
            moves.iter().map(ToString::to_string).collect::<Vec<_>>()
        );
    }
}

#[test]
fn terminal_outcomes() {
    for position in load().positions {
        let mut board = BoardController::from_fen(&position.fen).unwrap();
        board.update_terminal_state();
        assert_eq!(
            outcome_name(board.outcome()),
            position.outcome,
            "{}",
            position.name
        );
    }
}

#[test]
fn fen_round_trip() {
    for position in load().positions {
        let board = BoardController::from_fen(&position.fen).unwrap();
        assert_eq!(board.fen(), position.fen, "{}", position.name);
    }
}

#[test]
fn every_legal_request_can_be_played() {
    for position in load().positions {
        let mut board = BoardController::from_fen(&position.fen).unwrap();
        let turn = board.turn();
        for request in board.legal_move_requests(turn) {
            let mut child = board.clone();
            child
                .play_turn(request)
                .unwrap_or_else(|e| panic!("{}: {request} rejected: {e}", position.name));
            assert_eq!(child.turn(), turn.opponent());
            assert!(!child.is_in_check(turn), "{}: {request}", position.name);
        }
    }
}
