use std::thread;
use std::time::{Duration, Instant};

use chess_rules::board::{Color, DrawReason, GameOutcome, MoveError, MoveRequest, Square};
use chess_rules::engine::{GameConfig, GameSession, PlayerKind, SessionError, SessionStatus};

const DEADLINE: Duration = Duration::from_secs(10);

/// Poll until `cond` holds, failing the test after the deadline.
fn wait_for(what: &str, mut cond: impl FnMut() -> bool) {
    let start = Instant::now();
    while !cond() {
        assert!(start.elapsed() < DEADLINE, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(5));
    }
}

fn human_game() -> GameSession {
    let config = GameConfig::new().with_players(PlayerKind::Human, PlayerKind::Human);
    let mut session = GameSession::new(&config).unwrap();
    session.start().unwrap();
    session
}

fn submit(session: &GameSession, notation: &str) {
    let color = session.turn();
    wait_for("the human prompt", || session.awaiting_move() == Some(color));
    session.submit_move(notation.parse().unwrap()).unwrap();
    wait_for("the move to be applied", || session.turn() != color);
}

#[test]
fn human_moves_are_applied_in_turn() {
    let session = human_game();
    submit(&session, "e2e4");
    assert_eq!(
        session.fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 1 1"
    );
    submit(&session, "e7e5");
    assert_eq!(session.turn(), Color::White);
    assert_eq!(session.status(), SessionStatus::Running { turn: Color::White });
}

#[test]
fn illegal_submissions_are_rejected() {
    let session = human_game();
    wait_for("the human prompt", || session.awaiting_move().is_some());

    let blocked = MoveRequest::new(Square(7, 0), Square(5, 0));
    assert!(matches!(
        session.submit_move(blocked),
        Err(SessionError::Move(MoveError::InvalidMoveRequest { .. }))
    ));
    let empty = MoveRequest::new(Square(4, 4), Square(3, 4));
    assert!(matches!(
        session.submit_move(empty),
        Err(SessionError::Move(MoveError::NoPiece { .. }))
    ));
    // Black piece on white's turn
    let wrong_side = MoveRequest::new(Square(1, 4), Square(3, 4));
    assert!(matches!(
        session.submit_move(wrong_side),
        Err(SessionError::Move(MoveError::InvalidMoveRequest { .. }))
    ));

    // Still white's turn and still waiting
    assert_eq!(session.awaiting_move(), Some(Color::White));
    submit(&session, "d2d4");
}

#[test]
fn submit_rejected_when_computer_to_move() {
    let config = GameConfig::new().with_players(PlayerKind::Minimax, PlayerKind::Human);
    let session = GameSession::new(&config).unwrap();
    assert!(matches!(
        session.submit_move("e2e4".parse().unwrap()),
        Err(SessionError::NoPendingTurn)
    ));
}

#[test]
fn submit_before_start_has_no_pending_turn() {
    let config = GameConfig::new().with_players(PlayerKind::Human, PlayerKind::Human);
    let session = GameSession::new(&config).unwrap();
    assert!(matches!(
        session.submit_move("e2e4".parse().unwrap()),
        Err(SessionError::NoPendingTurn)
    ));
    assert_eq!(session.status(), SessionStatus::Paused { turn: Color::White });
}

#[test]
fn pause_and_resume() {
    let mut session = human_game();
    assert!(matches!(session.start(), Err(SessionError::AlreadyRunning)));
    submit(&session, "e2e4");

    session.pause().unwrap();
    assert!(!session.is_running());
    assert_eq!(session.awaiting_move(), None);
    assert_eq!(session.status(), SessionStatus::Paused { turn: Color::Black });
    assert!(matches!(session.pause(), Err(SessionError::NotRunning)));

    session.resume().unwrap();
    submit(&session, "c7c5");
    assert_eq!(session.turn(), Color::White);
}

#[test]
fn resignation_ends_the_game() {
    let mut session = human_game();
    wait_for("the human prompt", || session.awaiting_move().is_some());
    session.resign(Color::White).unwrap();

    assert_eq!(
        session.wait_until_finished(),
        Some(GameOutcome::Winner(Color::Black))
    );
    assert_eq!(
        session.status(),
        SessionStatus::Finished(GameOutcome::Winner(Color::Black))
    );
    assert!(matches!(session.resign(Color::Black), Err(SessionError::GameOver)));
    assert!(matches!(session.start(), Err(SessionError::GameOver)));
}

#[test]
fn draw_claims() {
    let session = human_game();
    wait_for("the human prompt", || session.awaiting_move().is_some());
    assert!(matches!(
        session.claim_draw(Color::White),
        Err(SessionError::DrawNotClaimable)
    ));

    for _ in 0..2 {
        for notation in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            submit(&session, notation);
        }
    }
    submit(&session, "g1f3");

    assert!(matches!(
        session.claim_draw(Color::Black),
        Ok(DrawReason::ThreefoldRepetition)
    ));
    assert_eq!(
        session.wait_until_finished(),
        Some(GameOutcome::Draw(DrawReason::ThreefoldRepetition))
    );
}

#[test]
fn minimax_finds_the_mate() {
    let config = GameConfig::new()
        .with_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1")
        .with_players(PlayerKind::Minimax, PlayerKind::Human)
        .with_search_depth(2);
    let mut session = GameSession::new(&config).unwrap();
    session.start().unwrap();
    assert_eq!(
        session.wait_until_finished(),
        Some(GameOutcome::Winner(Color::White))
    );
}

#[test]
fn random_player_finishes_forced_game() {
    // White's only legal move takes the queen, leaving bare kings
    let config = GameConfig::new()
        .with_fen("4k3/8/8/8/8/8/6q1/7K w - - 0 1")
        .with_players(PlayerKind::Random, PlayerKind::Random)
        .with_seed(3);
    let mut session = GameSession::new(&config).unwrap();
    session.start().unwrap();
    assert_eq!(
        session.wait_until_finished(),
        Some(GameOutcome::Draw(DrawReason::InsufficientMaterial))
    );
}

#[test]
fn random_games_can_be_paused_mid_play() {
    let config = GameConfig::new()
        .with_players(PlayerKind::Random, PlayerKind::Random)
        .with_seed(11);
    let mut session = GameSession::new(&config).unwrap();
    session.start().unwrap();
    wait_for("a few plies", || session.snapshot().state().halfmove_clock() >= 4);
    if session.is_running() {
        session.pause().unwrap();
    }
    let fen = session.fen();
    thread::sleep(Duration::from_millis(20));
    assert_eq!(session.fen(), fen);
}

#[test]
fn finished_position_cannot_start() {
    let config = GameConfig::new()
        .with_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
        .with_players(PlayerKind::Human, PlayerKind::Human);
    let mut session = GameSession::new(&config).unwrap();
    assert!(matches!(session.start(), Err(SessionError::GameOver)));
    assert_eq!(
        session.status(),
        SessionStatus::Finished(GameOutcome::Winner(Color::Black))
    );
}

#[test]
fn invalid_config_is_rejected() {
    let zero_depth = GameConfig::new().with_search_depth(0);
    assert!(matches!(
        GameSession::new(&zero_depth),
        Err(SessionError::InvalidDepth)
    ));
    let bad_fen = GameConfig::new().with_fen("not a fen");
    assert!(matches!(GameSession::new(&bad_fen), Err(SessionError::Fen(_))));
}
