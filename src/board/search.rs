//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! Every node is an owned controller clone with the move applied and the
//! turn finished, so the caller's position is never touched. The stop flag
//! is polled at every node and every branch; a stopped search yields `None`.

use super::eval::material_score;
use super::{BoardController, Color, MoveRequest, PieceKind};
use crate::sync::StopFlag;

/// Score of a checkmate at the root; shallower mates score higher.
pub(crate) const MATE_SCORE: i32 = 1_000_000;

/// Best move found by a completed search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the side to search has no legal move
    pub best_move: Option<MoveRequest>,
    /// Score from the searching side's point of view
    pub score: i32,
    /// Positions visited
    pub nodes: u64,
}

struct SearchContext<'a> {
    color: Color,
    stop: &'a StopFlag,
    nodes: u64,
}

/// Search `depth` plies ahead for `color` and return its best move.
///
/// Returns `None` if `stop` was raised before the search completed.
#[must_use]
pub fn minimax(
    controller: &BoardController,
    color: Color,
    depth: u32,
    stop: &StopFlag,
) -> Option<SearchResult> {
    let mut ctx = SearchContext {
        color,
        stop,
        nodes: 0,
    };
    let mut root = controller.clone();
    let depth = depth.max(1);

    let mut best_move = None;
    let mut best_score = i32::MIN;
    let mut alpha = i32::MIN;
    let children = child_moves(&mut root, color);
    if children.is_empty() {
        let score = terminal_score(&root, color, color, 0);
        return (!stop.is_stopped()).then_some(SearchResult {
            best_move: None,
            score,
            nodes: 1,
        });
    }

    for request in children {
        if stop.is_stopped() {
            return None;
        }
        let child = play_child(&root, request)?;
        let score = ctx.alpha_beta(child, depth - 1, alpha, i32::MAX, false, 1)?;
        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(request);
        }
        alpha = alpha.max(best_score);
    }

    log::debug!(
        "{color} search depth {depth}: {:?} scores {best_score} after {} nodes",
        best_move.map(|m| m.to_string()),
        ctx.nodes
    );
    Some(SearchResult {
        best_move,
        score: best_score,
        nodes: ctx.nodes,
    })
}

impl SearchContext<'_> {
    fn alpha_beta(
        &mut self,
        mut node: BoardController,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        ply: i32,
    ) -> Option<i32> {
        if self.stop.is_stopped() {
            return None;
        }
        self.nodes += 1;
        if depth == 0 {
            return Some(material_score(&node, self.color));
        }

        let to_move = if maximizing {
            self.color
        } else {
            self.color.opponent()
        };
        let children = child_moves(&mut node, to_move);
        if children.is_empty() {
            return Some(terminal_score(&node, self.color, to_move, ply));
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for request in children {
            if self.stop.is_stopped() {
                return None;
            }
            let child = play_child(&node, request)?;
            let score = self.alpha_beta(child, depth - 1, alpha, beta, !maximizing, ply + 1)?;
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }
        Some(best)
    }
}

/// Legal moves of `color`, with pawn promotions limited to queen and
/// knight; a queen already covers rook and bishop lines.
fn child_moves(node: &mut BoardController, color: Color) -> Vec<MoveRequest> {
    let mut moves = Vec::new();
    for from in node.state().pieces_of(color) {
        let Some((kind, _)) = node.piece_info(from) else {
            continue;
        };
        for to in node.get_legal_moves(from) {
            if kind == PieceKind::Pawn && to.row() == color.promotion_row() {
                moves.push(MoveRequest::with_promotion(from, to, PieceKind::Queen));
                moves.push(MoveRequest::with_promotion(from, to, PieceKind::Knight));
            } else {
                moves.push(MoveRequest::new(from, to));
            }
        }
    }
    moves
}

fn play_child(node: &BoardController, request: MoveRequest) -> Option<BoardController> {
    let mut child = node.clone();
    child
        .move_piece(request.from, request.to, request.promotion)
        .ok()?;
    child.finish_turn();
    Some(child)
}

/// Score of a node where `to_move` has no legal move.
fn terminal_score(node: &BoardController, searcher: Color, to_move: Color, ply: i32) -> i32 {
    if !node.is_in_check(to_move) {
        return 0;
    }
    if to_move == searcher {
        -MATE_SCORE + ply
    } else {
        MATE_SCORE - ply
    }
}
