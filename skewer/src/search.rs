/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::cmp::Reverse;

use rand::seq::IndexedRandom;

use super::{Move, MoveList, PieceKind, Position};

/// A score beyond any reachable evaluation, used as the search window bound.
const INFINITY: i32 = 1_000_000;

/// The score of being checkmated at the root. Mates found deeper in the tree
/// score closer to zero, so the search prefers the shortest mate it can see.
const MATE: i32 = 100_000;

/// How many moves survive ordering at interior nodes. Root moves are never
/// truncated, so every legal reply is still considered for the final answer.
const INTERIOR_WIDTH: usize = 32;

/// Bonus for occupying one of the sixteen central squares (c3 through f6).
const CENTER_BONUS: i32 = 20;

/// The material value of a piece, in centipawns.
///
/// The King carries no material value: it is never actually captured, and
/// losing it is accounted for by the mate scores instead.
const fn value_of(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 300,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

/// MVV-LVA: prefer capturing the most valuable victim with the least valuable
/// attacker. Victims are weighted 10x so that any capture of a better piece
/// outranks the choice of attacker. Non-captures score zero.
const fn capture_score(mv: &Move) -> i32 {
    match mv.captured() {
        Some(victim) => 10 * value_of(victim.kind()) - value_of(mv.piece().kind()),
        None => 0,
    }
}

/// Evaluates the position from the perspective of the side to move: positive
/// means the mover is better.
///
/// Material plus a small bonus for minor pieces and pawns in the central 4x4
/// region. Rooks and queens exert influence from anywhere, and the King has
/// no business in the middle of the board, so none of them earn the bonus.
pub fn evaluate(position: &Position) -> i32 {
    let mover = position.side_to_move();
    let mut score = 0;

    for (square, piece) in position.board().iter() {
        if piece.is_king() {
            continue;
        }
        let mut value = value_of(piece.kind());
        let central_kind = matches!(
            piece.kind(),
            PieceKind::Pawn | PieceKind::Knight | PieceKind::Bishop
        );
        if central_kind && square.is_central() {
            value += CENTER_BONUS;
        }
        if piece.color() == mover {
            score += value;
        } else {
            score -= value;
        }
    }

    score
}

/// Legal moves sorted captures-first by [`capture_score`]. The sort is stable,
/// so equal-scoring moves keep generation order and the search stays
/// deterministic.
///
/// At interior nodes the tail of the ordering is dropped entirely; with
/// captures sorted to the front this rarely discards anything alpha-beta
/// would have kept.
fn ordered_moves(position: &Position, interior: bool) -> MoveList {
    let mut moves = position.legal_moves();
    moves.sort_by_key(|mv| Reverse(capture_score(mv)));

    if interior {
        moves.truncate(INTERIOR_WIDTH);
    }

    moves
}

/// Captures-only search at the horizon: keep trading until the position is
/// quiet, so a depth-limited line is never scored in the middle of an
/// exchange.
fn quiescence(position: &mut Position, mut alpha: i32, beta: i32) -> i32 {
    // Stand pat: the mover may always decline to capture.
    let stand_pat = evaluate(position);
    if stand_pat >= beta {
        return beta;
    }
    alpha = alpha.max(stand_pat);

    let mut captures = position.legal_moves();
    captures.retain(|mv| mv.is_capture());
    captures.sort_by_key(|mv| Reverse(capture_score(mv)));

    for mv in captures {
        position.make_move(mv);
        let score = -quiescence(position, -beta, -alpha);
        position.undo_move();

        if score >= beta {
            return beta;
        }
        alpha = alpha.max(score);
    }

    alpha
}

/// Fixed-depth negamax with alpha-beta pruning. `ply` is the distance from
/// the root, used to grade mate scores and to decide whether move-list
/// truncation applies.
fn negamax(position: &mut Position, depth: u32, ply: i32, mut alpha: i32, beta: i32) -> i32 {
    if depth == 0 {
        return quiescence(position, alpha, beta);
    }

    let moves = ordered_moves(position, ply > 0);
    if moves.is_empty() {
        return if position.is_in_check() {
            -MATE + ply
        } else {
            0
        };
    }

    let mut best = -INFINITY;
    for mv in moves {
        position.make_move(mv);
        let score = -negamax(position, depth - 1, ply + 1, -beta, -alpha);
        position.undo_move();

        best = best.max(score);
        alpha = alpha.max(best);
        if alpha >= beta {
            break;
        }
    }

    best
}

/// Searches `depth` plies ahead and returns the best move found, or `None` if
/// the side to move has no legal moves.
///
/// The position is mutated during the search but restored before returning;
/// the `&mut` borrow is what lets the search explore without copying the
/// board. Given the same position and depth, the result is deterministic.
///
/// # Example
/// ```
/// # use skewer::{find_best_move, Position};
/// // White mates with Ra8.
/// let mut position = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
/// let best = find_best_move(&mut position, 3).unwrap();
/// assert_eq!(best.to_uci(), "a1a8");
/// ```
pub fn find_best_move(position: &mut Position, depth: u32) -> Option<Move> {
    let mut best = None;
    let mut best_score = -INFINITY;

    for mv in ordered_moves(position, false) {
        position.make_move(mv);
        let score = -negamax(
            position,
            depth.saturating_sub(1),
            1,
            -INFINITY,
            -best_score,
        );
        position.undo_move();

        if best.is_none() || score > best_score {
            best = Some(mv);
            best_score = score;
        }
    }

    best
}

/// A uniformly random legal move, or `None` if there is none. Handy as a
/// weakest-level opponent and for randomized testing.
pub fn random_move(position: &Position) -> Option<Move> {
    position.legal_moves().choose(&mut rand::rng()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FEN_KIWIPETE;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn test_startpos_evaluates_to_zero() {
        assert_eq!(evaluate(&Position::default()), 0);
    }

    #[test]
    fn test_evaluation_is_relative_to_mover() {
        // White is up a rook.
        let white_to_move = position("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let black_to_move = position("4k3/8/8/8/8/8/8/R3K3 b - - 0 1");
        assert_eq!(evaluate(&white_to_move), 500);
        assert_eq!(evaluate(&black_to_move), -500);
    }

    #[test]
    fn test_centrality_bonus() {
        // A knight on e4 outscores a knight on h1 by exactly the bonus.
        let central = position("4k3/8/8/8/4N3/8/8/4K3 w - - 0 1");
        let corner = position("4k3/8/8/8/8/8/8/4K2N w - - 0 1");
        assert_eq!(evaluate(&central) - evaluate(&corner), 20);
    }

    #[test]
    fn test_captures_are_ordered_first() {
        // The knight can take either the queen or the pawn; the queen is the
        // juicier victim.
        let pos = position("4k3/8/8/1q1p4/8/2N5/8/4K3 w - - 0 1");
        let moves = ordered_moves(&pos, false);

        assert!(moves[0].is_capture());
        assert_eq!(moves[0].to_uci(), "c3b5");
    }

    #[test]
    fn test_interior_truncation() {
        let pos = position(FEN_KIWIPETE);
        assert_eq!(ordered_moves(&pos, false).len(), 48);
        assert_eq!(ordered_moves(&pos, true).len(), INTERIOR_WIDTH);
    }

    #[test]
    fn test_finds_mate_in_one() {
        let mut pos = position("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let best = find_best_move(&mut pos, 3).unwrap();
        assert_eq!(best.to_uci(), "a1a8");
    }

    #[test]
    fn test_no_move_when_mated() {
        let mut pos = position("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(find_best_move(&mut pos, 3).is_none());
    }

    #[test]
    fn test_takes_hanging_queen() {
        let mut pos = position("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
        let best = find_best_move(&mut pos, 2).unwrap();
        assert_eq!(best.to_uci(), "d1d5");
    }

    #[test]
    fn test_quiescence_avoids_bad_trade() {
        // The d5 pawn is defended; grabbing it loses the queen on recapture,
        // which only the quiescence extension can see at depth 1.
        let mut pos = position("3qk3/8/8/3p4/8/8/8/3QK3 w - - 0 1");
        let best = find_best_move(&mut pos, 1).unwrap();
        assert_ne!(best.to_uci(), "d1d5");
    }

    #[test]
    fn test_search_restores_position() {
        let mut pos = position(FEN_KIWIPETE);
        let before = pos.to_fen();
        let _ = find_best_move(&mut pos, 2);
        assert_eq!(pos.to_fen(), before);
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut pos = position(FEN_KIWIPETE);
        let first = find_best_move(&mut pos, 2).unwrap();
        let second = find_best_move(&mut pos, 2).unwrap();
        assert_eq!(first.to_uci(), second.to_uci());
    }

    #[test]
    fn test_random_move_is_legal() {
        let pos = Position::default();
        let mv = random_move(&pos).unwrap();
        assert!(pos.legal_moves().contains(&mv));

        let mated = position("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(random_move(&mated).is_none());
    }
}
