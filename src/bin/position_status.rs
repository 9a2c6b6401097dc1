use std::env;
use std::process;

use chess_rules::board::{BoardController, MoveRequest};

/// Play coordinate moves from the starting position and report the rule
/// state of the result.
fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        eprintln!("usage: position_status <move1> <move2> ...");
        return;
    }

    let mut controller = BoardController::new();
    for notation in args.iter().skip(1) {
        let played = notation
            .parse::<MoveRequest>()
            .map_err(|e| e.to_string())
            .and_then(|request| controller.play_turn(request).map_err(|e| e.to_string()));
        if let Err(e) = played {
            eprintln!("{notation}: {e}");
            process::exit(1);
        }
    }

    let turn = controller.turn();
    let legal_moves = controller.legal_move_requests(turn);
    println!("fen: {}", controller.fen());
    println!("side_to_move: {turn}");
    println!("legal_moves: {}", legal_moves.len());
    println!("in_check: {}", controller.is_in_check(turn));
    let outcome = controller
        .outcome()
        .map_or_else(|| "-".to_string(), |o| o.to_string());
    println!("outcome: {outcome}");
    let claimable = controller
        .claimable_draw()
        .map_or_else(|| "-".to_string(), |r| r.to_string());
    println!("claimable_draw: {claimable}");
    for mv in &legal_moves {
        println!("{mv}");
    }
}
