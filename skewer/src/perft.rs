/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Move, Position};

/// Counts the number of leaf nodes reachable from `position` in exactly
/// `depth` plies, using make/undo rather than copying the position.
///
/// At depth 1 the legal-move count *is* the answer, so the final ply is
/// counted in bulk without applying any moves.
///
/// # Example
/// ```
/// # use skewer::{perft, Position};
/// let mut position = Position::default();
/// assert_eq!(perft(&mut position, 3), 8_902);
/// ```
pub fn perft(position: &mut Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    if depth == 1 {
        return position.legal_moves().len() as u64;
    }

    let mut nodes = 0;
    for mv in position.legal_moves() {
        position.make_move(mv);
        nodes += perft(position, depth - 1);
        position.undo_move();
    }

    nodes
}

/// Like [`perft`], but reports the subtree size beneath each root move
/// individually, in generation order.
///
/// The per-move breakdown is what makes a divergence from a reference engine
/// traceable: walk down the first move whose count disagrees and repeat.
pub fn splitperft(position: &mut Position, depth: usize) -> Vec<(Move, u64)> {
    position
        .legal_moves()
        .into_iter()
        .map(|mv| {
            position.make_move(mv);
            let nodes = perft(position, depth.saturating_sub(1));
            position.undo_move();
            (mv, nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FEN_KIWIPETE, FEN_STARTPOS};

    fn test_perft_fen_nodes(depth: usize, fen: &str, expected: u64) {
        let mut position = Position::from_fen(fen).unwrap();
        assert_eq!(perft(&mut position, depth), expected, "PERFT({depth}) of {fen:?}");
    }

    // Expected node counts assume promotion is always to a Queen, so the
    // positions used here have no promotions within the searched horizon.

    #[test]
    fn test_perft_startpos() {
        test_perft_fen_nodes(0, FEN_STARTPOS, 1);
        test_perft_fen_nodes(1, FEN_STARTPOS, 20);
        test_perft_fen_nodes(2, FEN_STARTPOS, 400);
        test_perft_fen_nodes(3, FEN_STARTPOS, 8_902);
        test_perft_fen_nodes(4, FEN_STARTPOS, 197_281);
    }

    #[test]
    fn test_perft_kiwipete() {
        test_perft_fen_nodes(1, FEN_KIWIPETE, 48);
        test_perft_fen_nodes(2, FEN_KIWIPETE, 2_039);
    }

    #[test]
    fn test_perft_endgame() {
        // Rook-and-pawns endgame with en passant lines in range.
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
        test_perft_fen_nodes(1, fen, 14);
        test_perft_fen_nodes(2, fen, 191);
        test_perft_fen_nodes(3, fen, 2_812);
    }

    #[test]
    fn test_splitperft_totals_match_perft() {
        let mut position = Position::default();
        let split = splitperft(&mut position, 2);

        assert_eq!(split.len(), 20);
        assert!(split.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(split.iter().map(|(_, nodes)| nodes).sum::<u64>(), 400);
    }
}
