/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{anyhow, Result};

use super::{GameStatus, Piece, PieceKind, Position, Square};

/// What sort of move is being made.
///
/// Captures are *not* a kind of their own: whether a move captures is
/// determined by [`Move::captured`], so a promotion that captures is still
/// [`MoveKind::Promotion`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveKind {
    /// A "normal" move, including ordinary captures.
    Quiet,

    /// A two-square pawn advance from the pawn's home rank.
    PawnDoublePush,

    /// An en passant capture. The captured pawn is beside the moving pawn,
    /// not on the destination square.
    EnPassant,

    /// King-side castling: the King moves two squares toward the h-file rook.
    ShortCastle,

    /// Queen-side castling: the King moves two squares toward the a-file rook.
    LongCastle,

    /// A pawn reaching the far rank. Always promotes to a Queen.
    Promotion,
}

/// A single ply: one piece moving from one square to another.
///
/// A [`Move`] carries enough metadata to be undone: the moving piece, the
/// captured piece (if any), and the en passant target that was available
/// *before* the move was made.
///
/// Two moves are considered equal iff their origin, destination, and
/// promotion flag match. That identity is what lets a caller match a move it
/// constructed (from, say, two clicked squares) against the legal-move list.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    kind: MoveKind,
    prior_ep: Option<Square>,
}

impl Move {
    /// Creates a new [`Move`] on `position` from `from` to `to`.
    ///
    /// The moving piece, the captured piece, and the prior en passant target
    /// are read off the position, so this must be called *before* the move is
    /// applied. There must be a piece on `from`.
    pub fn new(position: &Position, from: Square, to: Square, kind: MoveKind) -> Self {
        let piece = position.board().piece_at(from).unwrap();
        let captured = if kind == MoveKind::EnPassant {
            Some(Piece::new(piece.color().opponent(), PieceKind::Pawn))
        } else {
            position.board().piece_at(to)
        };

        Self {
            from,
            to,
            piece,
            captured,
            kind,
            prior_ep: position.ep_square(),
        }
    }

    /// Resolves a coordinate string like `e2e4` against the current legal
    /// moves of `position`.
    ///
    /// Returns an error if the string does not parse or if no legal move
    /// matches it.
    ///
    /// # Example
    /// ```
    /// # use skewer::{Move, Position};
    /// let position = Position::default();
    /// assert!(Move::from_uci(&position, "e2e4").is_ok());
    /// assert!(Move::from_uci(&position, "e2e5").is_err());
    /// ```
    pub fn from_uci(position: &Position, uci: &str) -> Result<Self> {
        let uci = uci.trim();
        let from = Square::from_uci(uci.get(0..2).ok_or(anyhow!("Move string too short: {uci:?}"))?)?;
        let to = Square::from_uci(uci.get(2..4).ok_or(anyhow!("Move string too short: {uci:?}"))?)?;

        position
            .legal_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to)
            .ok_or(anyhow!("Move {uci:?} is not legal in the current position"))
    }

    /// The square this move starts on.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The square this move ends on.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The piece being moved.
    #[inline(always)]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// The piece this move captures, if any.
    ///
    /// For en passant this is the pawn actually removed from the board, which
    /// does not sit on [`Move::to`].
    #[inline(always)]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// The [`MoveKind`] of this move.
    #[inline(always)]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// The en passant target square that was available before this move.
    ///
    /// Needed so that undoing the move can restore it.
    #[inline(always)]
    pub const fn prior_ep_square(&self) -> Option<Square> {
        self.prior_ep
    }

    /// Returns `true` if this move captures a piece (including en passant).
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns `true` if this move is an en passant capture.
    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    /// Returns `true` if this move is castling (either side).
    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::ShortCastle | MoveKind::LongCastle)
    }

    /// Returns `true` if this move promotes a pawn (always to a Queen).
    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion)
    }

    /// Coordinate ("long algebraic") notation: origin and destination
    /// concatenated, e.g. `e2e4`.
    #[inline(always)]
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Standard Algebraic Notation for this move on `position`.
    ///
    /// The check/checkmate suffix requires knowing the position *after* the
    /// move, so this probes a disposable clone of `position`; the caller's
    /// position is never mutated. The move must be legal on `position`.
    ///
    /// # Example
    /// ```
    /// # use skewer::{Move, Position};
    /// let position = Position::default();
    /// let mv = Move::from_uci(&position, "g1f3").unwrap();
    /// assert_eq!(mv.san(&position), "Nf3");
    /// ```
    pub fn san(&self, position: &Position) -> String {
        let mut san = match self.kind {
            MoveKind::ShortCastle => String::from("O-O"),
            MoveKind::LongCastle => String::from("O-O-O"),
            _ => {
                let mut san = String::with_capacity(6);
                if !self.piece.is_pawn() {
                    san.push(self.piece.kind().san_letter());
                }
                if self.is_capture() {
                    san.push('x');
                }
                san += &self.to.to_uci();
                if self.is_promotion() {
                    san += "=Q";
                }
                san
            }
        };

        // Probe the resulting position on a throwaway copy to learn the suffix.
        let mut probe = position.clone();
        probe.make_move(*self);
        if probe.status() == GameStatus::Checkmate {
            san.push('#');
        } else if probe.is_in_check() {
            san.push('+');
        }

        san
    }
}

impl PartialEq for Move {
    /// Moves are identified by origin, destination, and whether they promote.
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.is_promotion() == other.is_promotion()
    }
}

impl Eq for Move {}

impl fmt::Display for Move {
    /// Displays this move in coordinate notation, e.g. `e2e4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_equality_ignores_metadata() {
        let position = Position::default();
        let a = Move::from_uci(&position, "e2e4").unwrap();

        // A caller-constructed move with no capture/ep metadata still matches.
        let b = Move::new(&position, a.from(), a.to(), MoveKind::Quiet);
        assert_eq!(a, b);

        let c = Move::from_uci(&position, "d2d4").unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_long_notation() {
        let position = Position::default();
        let mv = Move::from_uci(&position, "b1c3").unwrap();
        assert_eq!(mv.to_uci(), "b1c3");
        assert_eq!(format!("{mv}"), "b1c3");
    }

    #[test]
    fn test_san_piece_and_pawn_moves() {
        let position = Position::default();
        assert_eq!(Move::from_uci(&position, "e2e4").unwrap().san(&position), "e4");
        assert_eq!(Move::from_uci(&position, "g1f3").unwrap().san(&position), "Nf3");
    }

    #[test]
    fn test_san_capture_and_check() {
        // White queen takes the d5 pawn with check against the d8 king.
        let position = Position::from_fen("3k4/8/8/3p4/8/8/8/3QK3 w - - 0 1").unwrap();
        let mv = Move::from_uci(&position, "d1d5").unwrap();
        assert_eq!(mv.san(&position), "Qxd5+");
    }

    #[test]
    fn test_san_pawn_capture() {
        let position = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mv = Move::from_uci(&position, "e4d5").unwrap();
        assert_eq!(mv.san(&position), "xd5");
    }

    #[test]
    fn test_san_checkmate_suffix() {
        // Back-rank mate: Ra8#.
        let position = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let mv = Move::from_uci(&position, "a1a8").unwrap();
        assert_eq!(mv.san(&position), "Ra8#");
    }

    #[test]
    fn test_san_promotion() {
        let position = Position::from_fen("8/P7/8/8/8/8/7k/4K3 w - - 0 1").unwrap();
        let mv = Move::from_uci(&position, "a7a8").unwrap();
        assert_eq!(mv.san(&position), "a8=Q");
    }

    #[test]
    fn test_san_does_not_disturb_position() {
        let position = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let before = position.to_fen();
        let mv = Move::from_uci(&position, "a1a8").unwrap();
        let _ = mv.san(&position);
        assert_eq!(position.to_fen(), before);
    }
}
