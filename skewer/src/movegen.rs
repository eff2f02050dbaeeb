/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arrayvec::ArrayVec;

use super::{
    Board, Color, Move, MoveKind, Piece, PieceKind, Position, Rank, Square, MAX_NUM_MOVES,
};

/// A list of moves, with a maximum length of [`MAX_NUM_MOVES`].
pub type MoveList = ArrayVec<Move, MAX_NUM_MOVES>;

/// The four orthogonal (rank, file) directions.
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// The four diagonal (rank, file) directions.
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// All eight unit directions: orthogonals first, then diagonals.
pub(crate) const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// The eight knight jumps.
pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Whether the game has ended, and how.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    /// The side to move has at least one legal move.
    Ongoing,

    /// The side to move has no legal moves and is in check.
    Checkmate,

    /// The side to move has no legal moves and is *not* in check.
    Stalemate,
}

/// A friendly piece that cannot leave the line between its King and an enemy
/// slider.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pin {
    /// The square of the pinned piece.
    pub square: Square,

    /// The (rank, file) unit direction from the King toward the pinning slider.
    pub direction: (i8, i8),
}

/// An enemy piece currently giving check.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Check {
    /// The square of the checking piece.
    pub square: Square,

    /// The (rank, file) direction from the King toward the checker. A unit
    /// step for sliders and pawns, a knight jump for knights.
    pub direction: (i8, i8),
}

/// The result of scanning outward from a King: every pin and every check
/// currently bearing on it.
///
/// Computed fresh on demand rather than cached on the position, so it can
/// never go stale across make/undo.
#[derive(Clone, Debug, Default)]
pub struct KingSafety {
    /// Friendly pieces pinned to the King. At most one per ray.
    pub pins: ArrayVec<Pin, 8>,

    /// Enemy pieces giving check. Legal play produces at most two, but
    /// arbitrary FEN input is not trusted to.
    pub checks: ArrayVec<Check, 16>,
}

impl KingSafety {
    /// Returns `true` if at least one enemy piece is giving check.
    #[inline(always)]
    pub fn in_check(&self) -> bool {
        !self.checks.is_empty()
    }

    /// Returns `true` if two (or more) enemy pieces are giving check at once.
    ///
    /// In double check, only King moves can be legal.
    #[inline(always)]
    pub fn in_double_check(&self) -> bool {
        self.checks.len() >= 2
    }
}

/// Returns `true` if a move from `from` to `to` is permitted under `pin`.
///
/// A pinned piece may only move along the line through its own square and the
/// King, toward or away from it (including capturing the pinner). Collinearity
/// with the pin direction captures exactly that, and no knight jump is ever
/// collinear with a unit direction.
#[inline(always)]
fn pin_allows(pin: Option<(i8, i8)>, from: Square, to: Square) -> bool {
    let Some((pin_dr, pin_df)) = pin else {
        return true;
    };
    let dr = to.rank().index() as i8 - from.rank().index() as i8;
    let df = to.file().index() as i8 - from.file().index() as i8;
    dr * pin_df == df * pin_dr
}

impl Board {
    /// Returns `true` if any piece of `by` attacks `target`.
    ///
    /// This asks about *attack*, not about legal movement: a square is
    /// attacked by a pawn even when the pawn could not legally move there
    /// (empty diagonal), which matters for castling transit squares. Pinned
    /// attackers still count.
    ///
    /// `ignoring` is treated as empty, so a King asking "may I step to X?" can
    /// exclude its own current square and not shadow a slider's ray.
    pub fn attacked(&self, target: Square, by: Color, ignoring: Option<Square>) -> bool {
        for (dr, df) in KNIGHT_JUMPS {
            if let Some(square) = target.offset(dr, df) {
                if self.piece_at(square) == Some(Piece::new(by, PieceKind::Knight)) {
                    return true;
                }
            }
        }

        for (i, (dr, df)) in ALL_DIRECTIONS.into_iter().enumerate() {
            let diagonal = i >= 4;
            for dist in 1..8i8 {
                let Some(square) = target.offset(dr * dist, df * dist) else {
                    break;
                };
                if Some(square) == ignoring {
                    continue;
                }
                let Some(piece) = self.piece_at(square) else {
                    continue;
                };
                if piece.color() != by {
                    break;
                }

                let attacks = match piece.kind() {
                    PieceKind::Queen => true,
                    PieceKind::Rook => !diagonal,
                    PieceKind::Bishop => diagonal,
                    PieceKind::King => dist == 1,
                    // A pawn on `target + d` attacks `target` iff `-d` points
                    // the way that pawn captures.
                    PieceKind::Pawn => {
                        dist == 1
                            && diagonal
                            && ((by.is_white() && dr == -1) || (by.is_black() && dr == 1))
                    }
                    PieceKind::Knight => false,
                };

                if attacks {
                    return true;
                }
                // First piece on the ray blocks everything behind it.
                break;
            }
        }

        false
    }
}

impl Position {
    /// Returns `true` if any piece of `by` attacks `square`.
    #[inline(always)]
    pub fn square_under_attack(&self, square: Square, by: Color) -> bool {
        self.board().attacked(square, by, None)
    }

    /// Returns `true` if the side to move is currently in check.
    #[inline(always)]
    pub fn is_in_check(&self) -> bool {
        let color = self.side_to_move();
        self.board()
            .attacked(self.king_square(color), color.opponent(), None)
    }

    /// Whether the game is over for the side to move, and how.
    ///
    /// "No legal moves" is the sole terminal condition: checkmate if in
    /// check, stalemate otherwise.
    pub fn status(&self) -> GameStatus {
        if !self.legal_moves().is_empty() {
            GameStatus::Ongoing
        } else if self.is_in_check() {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    }

    /// Scans outward from the King of `color`, collecting every pin and every
    /// check bearing on it.
    pub fn pins_and_checks(&self, color: Color) -> KingSafety {
        let king = self.king_square(color);
        let opponent = color.opponent();
        let mut safety = KingSafety::default();

        for (i, (dr, df)) in ALL_DIRECTIONS.into_iter().enumerate() {
            let diagonal = i >= 4;
            let mut shield: Option<Square> = None;

            for dist in 1..8i8 {
                let Some(square) = king.offset(dr * dist, df * dist) else {
                    break;
                };
                let Some(piece) = self.board().piece_at(square) else {
                    continue;
                };

                if piece.color() == color {
                    // A second friendly piece on the ray shields the first.
                    if shield.is_none() {
                        shield = Some(square);
                        continue;
                    }
                    break;
                }

                let attacks = match piece.kind() {
                    PieceKind::Queen => true,
                    PieceKind::Rook => !diagonal,
                    PieceKind::Bishop => diagonal,
                    PieceKind::King => dist == 1,
                    PieceKind::Pawn => {
                        dist == 1
                            && diagonal
                            && ((opponent.is_white() && dr == -1)
                                || (opponent.is_black() && dr == 1))
                    }
                    PieceKind::Knight => false,
                };

                if attacks {
                    match shield {
                        Some(pinned) => safety.pins.push(Pin {
                            square: pinned,
                            direction: (dr, df),
                        }),
                        None => safety.checks.push(Check {
                            square,
                            direction: (dr, df),
                        }),
                    }
                }
                break;
            }
        }

        for (dr, df) in KNIGHT_JUMPS {
            if let Some(square) = king.offset(dr, df) {
                if self.board().piece_at(square) == Some(Piece::new(opponent, PieceKind::Knight)) {
                    safety.checks.push(Check {
                        square,
                        direction: (dr, df),
                    });
                }
            }
        }

        safety
    }

    /// Generates all legal moves for the side to move.
    ///
    /// Every returned move is fully legal: pins, checks, double checks,
    /// en passant discoveries, and castling transit attacks are all accounted
    /// for, so callers may apply any of them with [`Position::make_move`]
    /// without further validation.
    pub fn legal_moves(&self) -> MoveList {
        let color = self.side_to_move();
        let king = self.king_square(color);
        let safety = self.pins_and_checks(color);
        let mut moves = MoveList::new();

        // In double check, only the King can move.
        if !safety.in_double_check() {
            for (from, piece) in self.board().iter() {
                if piece.color() != color || piece.is_king() {
                    continue;
                }
                let pin = safety
                    .pins
                    .iter()
                    .find(|pin| pin.square == from)
                    .map(|pin| pin.direction);

                match piece.kind() {
                    PieceKind::Pawn => self.pawn_moves(from, color, pin, &mut moves),
                    PieceKind::Knight => self.knight_moves(from, color, pin, &mut moves),
                    PieceKind::Bishop => self.slider_moves(from, color, &DIAGONALS, pin, &mut moves),
                    PieceKind::Rook => self.slider_moves(from, color, &ORTHOGONALS, pin, &mut moves),
                    PieceKind::Queen => {
                        self.slider_moves(from, color, &ALL_DIRECTIONS, pin, &mut moves)
                    }
                    PieceKind::King => unreachable!(),
                }
            }

            // In single check, non-King moves must capture the checker or
            // interpose on its ray. En passant evasions were already vetted by
            // board simulation, which proves the King ends up safe.
            if let Some(check) = safety.checks.first() {
                let mut mask = ArrayVec::<Square, 8>::new();
                mask.push(check.square);

                let slider = matches!(
                    self.board().kind_at(check.square),
                    Some(PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
                );
                if slider {
                    let (dr, df) = check.direction;
                    for dist in 1..8i8 {
                        let square = king.offset(dr * dist, df * dist).unwrap();
                        if square == check.square {
                            break;
                        }
                        mask.push(square);
                    }
                }

                moves.retain(|mv| mv.is_en_passant() || mask.contains(&mv.to()));
            }
        }

        self.king_moves(king, color, !safety.in_check(), &mut moves);
        moves
    }

    fn pawn_moves(&self, from: Square, color: Color, pin: Option<(i8, i8)>, moves: &mut MoveList) {
        // Pushes
        if let Some(to) = from.forward_by(color, 1) {
            if !self.board().has(to) && pin_allows(pin, from, to) {
                if to.rank() == Rank::eighth(color) {
                    moves.push(Move::new(self, from, to, MoveKind::Promotion));
                } else {
                    moves.push(Move::new(self, from, to, MoveKind::Quiet));

                    if from.rank() == Rank::second(color) {
                        // The single-push square was empty, so only the
                        // landing square can block a double push.
                        let to = from.forward_by(color, 2).unwrap();
                        if !self.board().has(to) {
                            moves.push(Move::new(self, from, to, MoveKind::PawnDoublePush));
                        }
                    }
                }
            }
        }

        // Captures
        for df in [-1, 1] {
            let Some(to) = from.forward_by(color, 1).and_then(|sq| sq.offset(0, df)) else {
                continue;
            };

            if Some(to) == self.ep_square() {
                if self.en_passant_is_legal(from, to, color) {
                    moves.push(Move::new(self, from, to, MoveKind::EnPassant));
                }
            } else if self.board().color_at(to) == Some(color.opponent())
                && pin_allows(pin, from, to)
            {
                let kind = if to.rank() == Rank::eighth(color) {
                    MoveKind::Promotion
                } else {
                    MoveKind::Quiet
                };
                moves.push(Move::new(self, from, to, kind));
            }
        }
    }

    /// En passant removes two pawns from the board at once, which can expose
    /// the King along a rank no ordinary pin detects. Simulate the capture on
    /// a scratch board and ask whether the King survives; this also covers
    /// pins on the capturing pawn and single-check evasions.
    fn en_passant_is_legal(&self, from: Square, to: Square, color: Color) -> bool {
        let mut board = *self.board();
        let pawn = match board.take(from) {
            Some(pawn) => pawn,
            None => return false,
        };
        board.clear(Square::new(to.file(), from.rank()));
        board.place(pawn, to);

        !board.attacked(self.king_square(color), color.opponent(), None)
    }

    fn knight_moves(&self, from: Square, color: Color, pin: Option<(i8, i8)>, moves: &mut MoveList) {
        // A pinned knight can never stay on the pin line, so this loop adds
        // nothing for it.
        for (dr, df) in KNIGHT_JUMPS {
            let Some(to) = from.offset(dr, df) else {
                continue;
            };
            if self.board().color_at(to) != Some(color) && pin_allows(pin, from, to) {
                moves.push(Move::new(self, from, to, MoveKind::Quiet));
            }
        }
    }

    fn slider_moves(
        &self,
        from: Square,
        color: Color,
        directions: &[(i8, i8)],
        pin: Option<(i8, i8)>,
        moves: &mut MoveList,
    ) {
        for &(dr, df) in directions {
            for dist in 1..8i8 {
                let Some(to) = from.offset(dr * dist, df * dist) else {
                    break;
                };
                if !pin_allows(pin, from, to) {
                    break;
                }

                match self.board().color_at(to) {
                    None => moves.push(Move::new(self, from, to, MoveKind::Quiet)),
                    Some(occupant) => {
                        if occupant != color {
                            moves.push(Move::new(self, from, to, MoveKind::Quiet));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn king_moves(&self, from: Square, color: Color, can_castle: bool, moves: &mut MoveList) {
        let opponent = color.opponent();

        for (dr, df) in ALL_DIRECTIONS {
            let Some(to) = from.offset(dr, df) else {
                continue;
            };
            // The King's own square is excluded from the attack scan so that
            // stepping along a checker's ray is still seen as attacked.
            if self.board().color_at(to) != Some(color)
                && !self.board().attacked(to, opponent, Some(from))
            {
                moves.push(Move::new(self, from, to, MoveKind::Quiet));
            }
        }

        // Castling: never out of check, never through or into an attacked
        // square, and the rook must still be home.
        if !can_castle || from != Square::E1.rank_relative_to(color) {
            return;
        }
        let rights = self.castling_rights(color);
        let rook = Piece::new(color, PieceKind::Rook);

        if rights.short() {
            let f1 = Square::F1.rank_relative_to(color);
            let g1 = Square::G1.rank_relative_to(color);
            let h1 = Square::H1.rank_relative_to(color);

            if self.board().piece_at(h1) == Some(rook)
                && !self.board().has(f1)
                && !self.board().has(g1)
                && !self.board().attacked(f1, opponent, None)
                && !self.board().attacked(g1, opponent, None)
            {
                moves.push(Move::new(self, from, g1, MoveKind::ShortCastle));
            }
        }

        if rights.long() {
            let a1 = Square::A1.rank_relative_to(color);
            let b1 = Square::B1.rank_relative_to(color);
            let c1 = Square::C1.rank_relative_to(color);
            let d1 = Square::D1.rank_relative_to(color);

            // b1 only needs to be empty: the King never crosses it.
            if self.board().piece_at(a1) == Some(rook)
                && !self.board().has(b1)
                && !self.board().has(c1)
                && !self.board().has(d1)
                && !self.board().attacked(c1, opponent, None)
                && !self.board().attacked(d1, opponent, None)
            {
                moves.push(Move::new(self, from, c1, MoveKind::LongCastle));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    fn contains(moves: &MoveList, uci: &str) -> bool {
        moves.iter().any(|mv| mv.to_uci() == uci)
    }

    #[test]
    fn test_startpos_has_twenty_moves() {
        assert_eq!(Position::default().legal_moves().len(), 20);
    }

    #[test]
    fn test_pinned_bishop_cannot_move() {
        // Bishop e2 is pinned vertically and has no vertical moves at all.
        let pos = position("4k3/8/8/8/4r3/8/4B3/4K3 w - - 0 1");
        let moves = pos.legal_moves();
        assert!(moves.iter().all(|mv| mv.from() != Square::from_uci("e2").unwrap()));
    }

    #[test]
    fn test_pinned_rook_slides_along_pin_only() {
        // Rook e2 is pinned vertically: it may slide up the e-file (including
        // capturing the pinner) but never sideways.
        let pos = position("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1");
        let moves = pos.legal_moves();
        let rook_moves: Vec<_> = moves
            .iter()
            .filter(|mv| mv.from() == Square::from_uci("e2").unwrap())
            .collect();

        assert_eq!(rook_moves.len(), 5);
        assert!(rook_moves.iter().all(|mv| mv.to().file() == crate::File::E));
        assert!(contains(&moves, "e2e7"));
    }

    #[test]
    fn test_check_evasion_by_king() {
        // Rook a1 checks along the back rank; the King must leave it.
        let pos = position("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        let moves = pos.legal_moves();

        assert_eq!(moves.len(), 3);
        assert!(moves.iter().all(|mv| mv.piece().is_king()));
        assert!(moves.iter().all(|mv| mv.to().rank() != Rank::ONE));
    }

    #[test]
    fn test_check_evasion_by_blocking() {
        // Queen a5 checks e1 along the diagonal; c2c3 interposes, and the
        // double push c2c4 does not.
        let pos = position("1k6/8/8/q7/8/8/2P5/4K3 w - - 0 1");
        let moves = pos.legal_moves();

        assert!(contains(&moves, "c2c3"));
        assert!(!contains(&moves, "c2c4"));
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn test_double_check_only_king_moves() {
        let pos = position("4k3/8/8/8/8/5n2/4r3/4K3 w - - 0 1");
        let safety = pos.pins_and_checks(Color::White);
        assert!(safety.in_double_check());

        let moves = pos.legal_moves();
        assert!(moves.iter().all(|mv| mv.piece().is_king()));
        assert_eq!(moves.len(), 3);
        assert!(contains(&moves, "e1e2"));
    }

    #[test]
    fn test_en_passant_available() {
        let pos = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let moves = pos.legal_moves();
        let ep = moves.iter().find(|mv| mv.to_uci() == "e5d6").unwrap();
        assert!(ep.is_en_passant());
        assert!(ep.is_capture());
    }

    #[test]
    fn test_en_passant_discovered_check_is_illegal() {
        // Capturing en passant would clear both pawns off the fifth rank and
        // expose the King on a5 to the queen on h5.
        let pos = position("7k/8/8/K2pP2q/8/8/8/8 w - d6 0 1");
        let moves = pos.legal_moves();
        assert!(!contains(&moves, "e5d6"));
        assert!(contains(&moves, "e5e6"));
    }

    #[test]
    fn test_en_passant_capture_of_checking_pawn() {
        // The pawn on d5 just double-pushed and gives check; capturing it en
        // passant is a legal evasion.
        let pos = position("4k3/8/8/3pP3/2K5/8/8/8 w - d6 0 1");
        let moves = pos.legal_moves();
        assert!(contains(&moves, "e5d6"));
    }

    #[test]
    fn test_castling_through_attacked_square_is_illegal() {
        // The rook on f3 covers f1, which the King would cross.
        let pos = position("4k3/8/8/8/8/5r2/8/4K2R w K - 0 1");
        assert!(!contains(&pos.legal_moves(), "e1g1"));

        let pos = position("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(contains(&pos.legal_moves(), "e1g1"));
    }

    #[test]
    fn test_long_castle_ignores_attack_on_b1() {
        // b1 is attacked but the King never crosses it.
        let pos = position("4k3/8/8/8/8/1r6/8/R3K3 w Q - 0 1");
        assert!(contains(&pos.legal_moves(), "e1c1"));
    }

    #[test]
    fn test_castling_requires_empty_transit() {
        let pos = position("4k3/8/8/8/8/8/8/4KB1R w K - 0 1");
        assert!(!contains(&pos.legal_moves(), "e1g1"));
    }

    #[test]
    fn test_no_castling_while_in_check() {
        let pos = position("4k3/8/8/8/8/4r3/8/4K2R w K - 0 1");
        assert!(!contains(&pos.legal_moves(), "e1g1"));
    }

    #[test]
    fn test_forced_queen_promotion() {
        let pos = position("8/P7/8/8/8/8/7k/4K3 w - - 0 1");
        let promotions: Vec<_> = pos
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.from() == Square::from_uci("a7").unwrap())
            .collect();

        // Exactly one move per pawn advance: no underpromotion choices.
        assert_eq!(promotions.len(), 1);
        assert!(promotions[0].is_promotion());
    }

    #[test]
    fn test_checkmate_status() {
        let pos = position("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert_eq!(pos.status(), GameStatus::Checkmate);
        assert!(pos.legal_moves().is_empty());
    }

    #[test]
    fn test_stalemate_status() {
        let pos = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(pos.status(), GameStatus::Stalemate);
        assert!(!pos.is_in_check());
    }

    #[test]
    fn test_square_under_attack_sees_pawn_diagonals() {
        // The pawn on e4 attacks d5 and f5 even though both are empty.
        let pos = position("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1");
        assert!(pos.square_under_attack(Square::from_uci("d5").unwrap(), Color::White));
        assert!(pos.square_under_attack(Square::from_uci("f5").unwrap(), Color::White));
        assert!(!pos.square_under_attack(Square::from_uci("e5").unwrap(), Color::White));
    }

    #[test]
    fn test_pins_and_checks_reports_pin() {
        let pos = position("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1");
        let safety = pos.pins_and_checks(Color::White);

        assert!(!safety.in_check());
        assert_eq!(safety.pins.len(), 1);
        assert_eq!(safety.pins[0].square, Square::from_uci("e2").unwrap());
        assert_eq!(safety.pins[0].direction, (1, 0));
    }
}
