//! Draw rule, checkmate and game-end tests.

use std::collections::VecDeque;

use super::controller;
use crate::board::draw::RepetitionWindow;
use crate::board::{BoardController, Color, DrawReason, GameOutcome, MoveRequest, PieceKind, Square};

fn play(board: &mut BoardController, moves: &[&str]) {
    for notation in moves {
        let request: MoveRequest = notation.parse().unwrap();
        board.play_turn(request).unwrap();
    }
}

const KNIGHT_SHUFFLE: [&str; 4] = ["g1f3", "g8f6", "f3g1", "f6g8"];

#[test]
fn test_fifty_move_counter_counts_down() {
    let mut board = controller("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    assert_eq!(board.fifty_move_counter(), 100);
    for _ in 0..99 {
        board.fifty_move_rule(Square(7, 0), Square(6, 0));
    }
    assert_eq!(board.fifty_move_counter(), 1);
    assert!(!board.claim_draw());

    board.fifty_move_rule(Square(7, 0), Square(6, 0));
    assert!(board.claim_draw());
    assert_eq!(board.claimable_draw(), Some(DrawReason::FiftyMoveRule));
}

#[test]
fn test_fifty_move_counter_resets_on_capture_and_pawn_move() {
    let mut board = BoardController::new();
    for _ in 0..100 {
        board.fifty_move_rule(Square(7, 1), Square(5, 2));
    }
    assert!(board.claim_draw());

    // Destination occupied counts as a capture
    board.fifty_move_rule(Square(7, 1), Square(6, 3));
    assert_eq!(board.fifty_move_counter(), 100);
    assert!(!board.claim_draw());

    board.fifty_move_rule(Square(7, 1), Square(5, 2));
    board.fifty_move_rule(Square(6, 4), Square(4, 4));
    assert_eq!(board.fifty_move_counter(), 100);
}

#[test]
fn test_play_turn_drives_fifty_move_counter() {
    let mut board = BoardController::new();
    play(&mut board, &KNIGHT_SHUFFLE);
    assert_eq!(board.fifty_move_counter(), 96);
    play(&mut board, &["e2e4"]);
    assert_eq!(board.fifty_move_counter(), 100);
}

#[test]
fn test_threefold_needs_five_reversals() {
    let mut board = BoardController::new();
    play(&mut board, &KNIGHT_SHUFFLE);
    play(&mut board, &KNIGHT_SHUFFLE);
    assert!(!board.threefold_draw());
    assert_eq!(board.claimable_draw(), None);

    play(&mut board, &["g1f3"]);
    assert!(board.threefold_draw());
    play(&mut board, &["g8f6"]);
    assert!(board.threefold_draw());
    assert_eq!(board.claimable_draw(), Some(DrawReason::ThreefoldRepetition));
    assert!(!board.is_game_over());
}

#[test]
fn test_threefold_clears_when_pattern_breaks() {
    let mut board = BoardController::new();
    play(&mut board, &KNIGHT_SHUFFLE);
    play(&mut board, &KNIGHT_SHUFFLE);
    play(&mut board, &["g1f3", "g8f6"]);
    assert!(board.threefold_draw());

    play(&mut board, &["b1c3"]);
    assert!(!board.threefold_draw());
}

#[test]
fn test_black_threefold_from_recorded_window() {
    let window = RepetitionWindow {
        last_moved: Some(PieceKind::Knight),
        last_move: Some((Square(5, 0), Square(7, 1))),
        oscillations: 4,
        destinations: VecDeque::from(vec![
            Square(5, 0),
            Square(7, 1),
            Square(5, 0),
            Square(7, 1),
        ]),
    };

    let mut board = controller("8/8/8/8/8/8/8/1n6 b - - 0 1");
    board.draws.windows[Color::Black.index()] = window.clone();
    board.move_piece(Square(7, 1), Square(5, 0), None).unwrap();
    board.threefold_repetition_rule(Square(7, 1), Square(5, 0));
    assert!(board.threefold_draw());

    let mut board = controller("8/8/8/8/8/8/8/1n6 b - - 0 1");
    board.draws.windows[Color::Black.index()] = window;
    board.move_piece(Square(7, 1), Square(5, 2), None).unwrap();
    board.threefold_repetition_rule(Square(7, 1), Square(5, 2));
    assert!(!board.threefold_draw());
}

#[test]
fn test_fresh_board_has_no_repetition() {
    let mut board = BoardController::new();
    board.threefold_repetition_rule(Square(7, 1), Square(5, 0));
    assert!(!board.threefold_draw());
}

#[test]
fn test_insufficient_material_combinations() {
    let cases = [
        ("4k3/8/8/8/8/8/8/4K3 w - - 0 1", true),
        ("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1", true),
        ("4k3/8/8/8/8/8/8/1N2K3 w - - 0 1", true),
        ("4k3/8/8/8/8/8/8/1N2K1N1 w - - 0 1", true),
        ("1n2k1n1/8/8/8/8/8/8/4K3 w - - 0 1", true),
        ("4k3/8/8/8/8/8/8/2B1K1b1 w - - 0 1", true),
        ("4k3/8/8/8/8/8/8/2B1Kb2 w - - 0 1", false),
        ("4k3/8/8/8/8/8/8/2B1Kn2 w - - 0 1", false),
        ("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", false),
        ("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", false),
        ("4k3/8/8/8/8/8/8/2BBK3 w - - 0 1", false),
        ("8/8/8/8/8/8/8/2B1K3 w - - 0 1", false),
    ];
    for (fen, expected) in cases {
        let mut board = controller(fen);
        assert_eq!(board.insufficient_material_rule(), expected, "{fen}");
        assert_eq!(board.insufficient_material_draw(), expected, "{fen}");
    }
    assert!(!BoardController::new().insufficient_material_rule());
}

#[test]
fn test_insufficient_material_is_sticky() {
    let mut board = BoardController::new();
    board.draws.insufficient_material = true;
    assert!(board.insufficient_material_rule());
}

#[test]
fn test_capture_into_bare_kings_ends_game() {
    let mut board = controller("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1");
    play(&mut board, &["e1e2"]);
    assert_eq!(
        board.outcome(),
        Some(GameOutcome::Draw(DrawReason::InsufficientMaterial))
    );
}

#[test]
fn test_stalemate_after_move() {
    let mut board = controller("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1");
    play(&mut board, &["f1f7"]);
    assert!(board.stalemate_draw());
    assert_eq!(board.winner(), None);
    assert_eq!(board.outcome(), Some(GameOutcome::Draw(DrawReason::Stalemate)));
}

#[test]
fn test_stalemate_rule_on_loaded_position() {
    let mut board = controller("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(board.stalemate_rule());
    // Same position with white to move is no stalemate
    let mut board = controller("7k/5Q2/6K1/8/8/8/8/8 w - - 0 1");
    assert!(!board.stalemate_rule());
}

#[test]
fn test_back_rank_mate_sets_winner() {
    let mut board = controller("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
    play(&mut board, &["a1a8"]);
    assert_eq!(board.winner(), Some(Color::White));
    assert_eq!(board.outcome(), Some(GameOutcome::Winner(Color::White)));
    assert!(board.is_game_over());
}

#[test]
fn test_fools_mate() {
    let mut board = BoardController::new();
    play(&mut board, &["f2f3", "e7e5", "g2g4"]);
    assert_eq!(board.winner(), None);
    play(&mut board, &["d8h4"]);
    assert!(board.is_in_check(Color::White));
    assert_eq!(board.winner(), Some(Color::Black));
}

#[test]
fn test_check_without_mate_keeps_playing() {
    let mut board = controller("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    play(&mut board, &["a1a8"]);
    assert!(board.is_in_check(Color::Black));
    assert_eq!(board.outcome(), None);
}

#[test]
fn test_claim_accepted_only_when_available() {
    let mut board = BoardController::new();
    assert_eq!(board.accept_draw_claim(), None);
    assert_eq!(board.outcome(), None);

    play(&mut board, &KNIGHT_SHUFFLE);
    play(&mut board, &KNIGHT_SHUFFLE);
    play(&mut board, &["g1f3"]);
    assert_eq!(
        board.accept_draw_claim(),
        Some(DrawReason::ThreefoldRepetition)
    );
    assert_eq!(
        board.outcome(),
        Some(GameOutcome::Draw(DrawReason::ThreefoldRepetition))
    );
}

#[test]
fn test_resign_hands_win_to_opponent() {
    let mut board = BoardController::new();
    board.resign(Color::White);
    assert_eq!(board.outcome(), Some(GameOutcome::Winner(Color::Black)));
}

#[test]
fn test_set_fen_resets_draw_state() {
    let mut board = BoardController::new();
    play(&mut board, &KNIGHT_SHUFFLE);
    board.set_fen(crate::board::STARTING_FEN).unwrap();
    assert_eq!(board.fifty_move_counter(), 100);
    assert_eq!(board.draws.windows[Color::White.index()], RepetitionWindow::default());
}
