/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{anyhow, bail, Result};

use super::{Color, File, Move, MoveKind, Piece, PieceKind, Rank, Square, FEN_STARTPOS};

/// Represents the castling rights of a single player.
///
/// Rights only ever transition from `true` to `false`. They are never
/// re-granted, even if a rook returns to its home square.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct CastlingRights {
    /// King-side (toward the h-file rook).
    pub(crate) short: bool,
    /// Queen-side (toward the a-file rook).
    pub(crate) long: bool,
}

impl CastlingRights {
    /// No rights on either side.
    pub const NONE: Self = Self::new(false, false);

    /// Rights on both sides.
    pub const ALL: Self = Self::new(true, true);

    /// Creates a new [`CastlingRights`] that permits castling to the provided sides.
    #[inline(always)]
    pub const fn new(short: bool, long: bool) -> Self {
        Self { short, long }
    }

    /// Returns `true` if castling is still permitted on the king side.
    #[inline(always)]
    pub const fn short(&self) -> bool {
        self.short
    }

    /// Returns `true` if castling is still permitted on the queen side.
    #[inline(always)]
    pub const fn long(&self) -> bool {
        self.long
    }

    /// Returns `true` if either side's right is still held.
    #[inline(always)]
    pub const fn any(&self) -> bool {
        self.short || self.long
    }
}

/// Represents all pieces and their locations on a chess board.
///
/// Has no knowledge of whose turn it is, castling rights, or en passant.
/// If you need those, see [`Position`].
///
/// Internally an 8x8 mailbox: one `Option<Piece>` per square.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use skewer::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            squares: [None; Square::COUNT],
        }
    }

    /// Constructs a [`Board`] from the placement field of a FEN string,
    /// ignoring everything after the first space.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut board = Self::new();

        // If this FEN string contains more than just the initial placements, extract the placements
        let placements = if fen.contains(' ') {
            fen.split(' ').next().unwrap()
        } else {
            fen
        };

        if placements.matches('/').count() != 7 {
            bail!("Missing placements for all 8 ranks.");
        }

        // Need to reverse this so that White pieces are at the "bottom" of the board
        for (rank, placements) in placements.split('/').rev().enumerate() {
            let mut file = 0;
            let rank = rank as u8;

            for piece_char in placements.chars() {
                if let Ok(piece) = Piece::from_uci(piece_char) {
                    let square = Square::new(File::new_unchecked(file), Rank::new_unchecked(rank));
                    board.place(piece, square);
                    file += 1;
                } else {
                    let Some(empty) = piece_char.to_digit(10) else {
                        bail!("Found non-piece, non-numeric char {piece_char:?} when parsing FEN.");
                    };
                    file += empty as u8
                }
            }
        }

        Ok(board)
    }

    /// Generates the placement field of a FEN string for this [`Board`].
    pub fn to_fen(&self) -> String {
        let mut placements: [String; 8] = Default::default();

        for rank in Rank::iter() {
            let mut empty_spaces = 0;
            for file in File::iter() {
                if let Some(piece) = self.piece_at(Square::new(file, rank)) {
                    if empty_spaces != 0 {
                        placements[rank.index()] += &empty_spaces.to_string();
                        empty_spaces = 0;
                    }
                    placements[rank.index()].push(piece.char());
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                placements[rank.index()] += &empty_spaces.to_string();
            }
        }
        placements.reverse();

        placements.join("/")
    }

    /// Returns `true` if there is a piece at the given [`Square`], else `false`.
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.squares[square.index()].is_some()
    }

    /// Places the provided [`Piece`] at the supplied [`Square`], replacing any
    /// piece already there.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.squares[square] = Some(piece);
    }

    /// Clears the supplied [`Square`] of any piece.
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.squares[square] = None;
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    ///
    /// # Example
    /// ```
    /// # use skewer::{Board, Piece, Square};
    /// let mut board = Board::from_fen("k7/8/8/8/2N5/8/8/7K").unwrap();
    /// let taken = board.take(Square::from_uci("c4").unwrap());
    /// assert_eq!(taken, Some(Piece::from_uci('N').unwrap()));
    /// assert_eq!(board.to_fen(), "k7/8/8/8/8/8/8/7K");
    /// ```
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square].take()
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Fetches the [`Color`] of the piece at the provided [`Square`], if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.squares[square].map(|piece| piece.color())
    }

    /// Fetches the [`PieceKind`] of the piece at the provided [`Square`], if there is one.
    #[inline(always)]
    pub fn kind_at(&self, square: Square) -> Option<PieceKind> {
        self.squares[square].map(|piece| piece.kind())
    }

    /// Locates the King of `color`, if it is on the board.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.iter()
            .find(|(_, piece)| piece.is_king() && piece.color() == color)
            .map(|(square, _)| square)
    }

    /// An iterator over all occupied squares and the pieces on them, a1 first.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        // Safe unwrap because the FEN for startpos is always valid
        Self::from_fen(FEN_STARTPOS).unwrap()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index]
    }
}

impl IndexMut<Square> for Board {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.squares[index]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}| ")?;
            for file in File::iter() {
                let occupant = self
                    .piece_at(Square::new(file, rank))
                    .map(|piece| piece.char())
                    .unwrap_or('.');
                write!(f, "{occupant} ")?;
            }
            writeln!(f)?;
        }
        write!(f, " +")?;
        for _ in File::iter() {
            write!(f, "--")?;
        }
        write!(f, "\n   ")?;
        for file in File::iter() {
            write!(f, "{file} ")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Represents the current state of the game: piece placements, whose turn it
/// is, castling rights, the en passant target, and the history of moves made.
///
/// A [`Position`] is mutated in place via [`Position::make_move`] and
/// [`Position::undo_move`] so that a search can explore millions of nodes
/// without reallocating board state. It is never copied implicitly; callers
/// that need an independent position (e.g. to search on a worker thread while
/// the original stays interactive) must `clone()` it explicitly.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    /// Mailbox representation of the game board.
    board: Board,

    /// The [`Color`] of the current player.
    side_to_move: Color,

    /// Cached King location per color. Always equals the square holding that
    /// color's King, including after castling.
    king_square: [Square; Color::COUNT],

    /// Castling rights for each player.
    castling_rights: [CastlingRights; Color::COUNT],

    /// Optional capture square for en passant. Valid for exactly one ply.
    ep_square: Option<Square>,

    /// Every move applied to this position, most recent last.
    history: Vec<Move>,

    /// Snapshot of `castling_rights` before each move in `history`,
    /// so undo can restore the exact prior set.
    rights_history: Vec<[CastlingRights; Color::COUNT]>,
}

impl Position {
    /// Creates a new [`Position`] from the provided FEN string.
    ///
    /// Both kings must be present. Halfmove and fullmove counters are
    /// accepted but not tracked; [`Position::to_fen`] always writes `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut split = fen.trim().split(' ');
        let placements = split.next().ok_or(anyhow!(
            "Invalid FEN string: FEN string must have piece placements."
        ))?;
        let board = Board::from_fen(placements)?;

        let white_king = board
            .find_king(Color::White)
            .ok_or(anyhow!("Invalid FEN string: no White King on the board"))?;
        let black_king = board
            .find_king(Color::Black)
            .ok_or(anyhow!("Invalid FEN string: no Black King on the board"))?;

        let active_color = split.next().unwrap_or("w");
        let side_to_move = Color::from_str(active_color)?;

        let castling = split.next().unwrap_or("KQkq");
        let mut castling_rights = [CastlingRights::NONE; Color::COUNT];
        castling_rights[Color::White].short = castling.contains('K');
        castling_rights[Color::White].long = castling.contains('Q');
        castling_rights[Color::Black].short = castling.contains('k');
        castling_rights[Color::Black].long = castling.contains('q');

        let en_passant_target = split.next().unwrap_or("-");
        let ep_square = match en_passant_target {
            "-" => None,
            square => Some(Square::from_uci(square)?),
        };

        Ok(Self {
            board,
            side_to_move,
            king_square: [white_king, black_king],
            castling_rights,
            ep_square,
            history: Vec::new(),
            rights_history: Vec::new(),
        })
    }

    /// Generates a FEN string from this [`Position`].
    pub fn to_fen(&self) -> String {
        let placements = self.board.to_fen();
        let active_color = self.side_to_move;
        let castling = self.castling_rights_uci();

        let en_passant_target = self
            .ep_square
            .map(|square| square.to_uci())
            .unwrap_or(String::from("-"));

        // Move clocks are not tracked.
        format!("{placements} {active_color} {castling} {en_passant_target} 0 1")
    }

    /// Returns the current player as a [`Color`].
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// If en passant can be performed, returns the en passant [`Square`].
    ///
    /// This is the square the capturing pawn lands on, not the square of the
    /// pawn being captured.
    #[inline(always)]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Fetches this position's [`Board`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The square currently holding the King of `color`.
    #[inline(always)]
    pub const fn king_square(&self, color: Color) -> Square {
        self.king_square[color.index()]
    }

    /// Returns the [`CastlingRights`] for `color` in the current position.
    #[inline(always)]
    pub const fn castling_rights(&self, color: Color) -> CastlingRights {
        self.castling_rights[color.index()]
    }

    /// Renders the castling rights in FEN style, e.g. `KQkq` or `-`.
    pub fn castling_rights_uci(&self) -> String {
        let mut castling = String::with_capacity(4);

        if self.castling_rights[Color::White].short {
            castling.push('K');
        }
        if self.castling_rights[Color::White].long {
            castling.push('Q');
        }
        if self.castling_rights[Color::Black].short {
            castling.push('k');
        }
        if self.castling_rights[Color::Black].long {
            castling.push('q');
        }

        if castling.is_empty() {
            castling = String::from("-");
        }
        castling
    }

    /// The most recently applied move, if any.
    ///
    /// This is what a front end wants for last-move highlighting.
    #[inline(always)]
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// Every move applied to this position, oldest first.
    #[inline(always)]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Applies the move if it is legal in the current position, returning an
    /// error otherwise.
    ///
    /// The supplied move is matched against the legal-move list by identity
    /// (origin, destination, promotion), and the fully-populated legal move is
    /// the one applied, so callers may pass a move constructed with partial
    /// metadata.
    pub fn make_move_checked(&mut self, mv: Move) -> Result<()> {
        match self.legal_moves().into_iter().find(|legal| *legal == mv) {
            Some(resolved) => {
                self.make_move(resolved);
                Ok(())
            }
            None => bail!("Move {mv} is not legal in the current position"),
        }
    }

    /// Apply the provided `moves` to the board. No enforcement of legality.
    #[inline(always)]
    pub fn make_moves(&mut self, moves: impl IntoIterator<Item = Move>) {
        for mv in moves {
            self.make_move(mv);
        }
    }

    /// Applies the move. No enforcement of legality.
    ///
    /// The move must have been drawn from the current legal-move list;
    /// applying anything else leaves the position in an unspecified state.
    pub fn make_move(&mut self, mv: Move) {
        // Remove the piece from its previous location, exiting early if there is no piece there
        let Some(piece) = self.board.take(mv.from()) else {
            return;
        };

        let color = piece.color();
        let to = mv.to();
        let from = mv.from();

        // Snapshot castling rights so undo can restore them exactly.
        self.rights_history.push(self.castling_rights);

        // Remove the captured piece. For en passant the captured pawn is
        // beside the moving pawn's start square, not on the destination.
        if mv.is_en_passant() {
            self.board.clear(Square::new(to.file(), from.rank()));
        } else if let Some(captured) = self.board.take(to) {
            // Capturing a rook on its home corner revokes the owner's right
            // on that side, even though the rook belongs to the opponent.
            let owner = captured.color();
            if to == Square::H1.rank_relative_to(owner) {
                self.castling_rights[owner].short = false;
            } else if to == Square::A1.rank_relative_to(owner) {
                self.castling_rights[owner].long = false;
            }
        }

        // Place the piece in its new position, promoting pawns to Queens.
        let placed = if mv.is_promotion() {
            Piece::new(color, PieceKind::Queen)
        } else {
            piece
        };
        self.board.place(placed, to);

        // Castling also relocates the matching rook.
        if mv.is_castle() {
            let (rook_from, rook_to) = if mv.kind() == MoveKind::ShortCastle {
                (Square::H1, Square::F1)
            } else {
                (Square::A1, Square::D1)
            };
            let rook_from = rook_from.rank_relative_to(color);
            let rook_to = rook_to.rank_relative_to(color);
            let rook = self.board.take(rook_from).unwrap();
            self.board.place(rook, rook_to);
        }

        // Keep the King cache and castling rights in sync.
        match piece.kind() {
            PieceKind::King => {
                self.king_square[color] = to;
                self.castling_rights[color] = CastlingRights::NONE;
            }
            PieceKind::Rook => {
                if from == Square::H1.rank_relative_to(color) {
                    self.castling_rights[color].short = false;
                } else if from == Square::A1.rank_relative_to(color) {
                    self.castling_rights[color].long = false;
                }
            }
            _ => {}
        }

        // A double pawn push opens an en passant window for exactly one ply;
        // every other move closes it.
        self.ep_square = if mv.kind() == MoveKind::PawnDoublePush {
            from.forward_by(color, 1)
        } else {
            None
        };

        self.history.push(mv);
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Undoes the most recent move, restoring the position exactly as it was
    /// before that move was made.
    ///
    /// Does nothing if no moves have been made.
    pub fn undo_move(&mut self) {
        let Some(mv) = self.history.pop() else {
            return;
        };

        let piece = mv.piece();
        let color = piece.color();
        let to = mv.to();
        let from = mv.from();

        // Put the moved piece back. For promotions this resurrects the pawn,
        // discarding the Queen that was placed.
        self.board.clear(to);
        self.board.place(piece, from);

        // Restore the captured piece, which for en passant sits beside the
        // start square rather than on the destination.
        if let Some(captured) = mv.captured() {
            let captured_square = if mv.is_en_passant() {
                Square::new(to.file(), from.rank())
            } else {
                to
            };
            self.board.place(captured, captured_square);
        }

        // Walk the castled rook back home.
        if mv.is_castle() {
            let (rook_home, rook_castled) = if mv.kind() == MoveKind::ShortCastle {
                (Square::H1, Square::F1)
            } else {
                (Square::A1, Square::D1)
            };
            let rook_home = rook_home.rank_relative_to(color);
            let rook_castled = rook_castled.rank_relative_to(color);
            let rook = self.board.take(rook_castled).unwrap();
            self.board.place(rook, rook_home);
        }

        if piece.is_king() {
            self.king_square[color] = from;
        }

        if let Some(rights) = self.rights_history.pop() {
            self.castling_rights = rights;
        }

        self.ep_square = mv.prior_ep_square();
        self.side_to_move = self.side_to_move.opponent();
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_fen(s)
    }
}

impl Default for Position {
    #[inline(always)]
    fn default() -> Self {
        // Safe unwrap because the FEN for startpos is always valid
        Self::from_fen(FEN_STARTPOS).unwrap()
    }
}

impl fmt::Display for Position {
    /// Display this position's FEN string
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(f)?;
        writeln!(f, "      FEN: {}", self.to_fen())?;
        writeln!(f, "     Side: {}", self.side_to_move)?;
        writeln!(f, " Castling: {}", self.castling_rights_uci())?;
        let ep = self
            .ep_square
            .map(|square| square.to_uci())
            .unwrap_or(String::from("-"));
        write!(f, "       EP: {ep}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FEN_KIWIPETE;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    fn uci(position: &Position, mv: &str) -> Move {
        Move::from_uci(position, mv).unwrap()
    }

    #[test]
    fn test_fen_round_trip() {
        for fen in [FEN_STARTPOS, FEN_KIWIPETE] {
            assert_eq!(position(fen).to_fen(), fen);
        }
    }

    #[test]
    fn test_make_undo_round_trip_all_root_moves() {
        let mut pos = Position::default();
        let original = pos.clone();

        for mv in pos.legal_moves() {
            pos.make_move(mv);
            pos.undo_move();
            assert_eq!(pos, original, "make/undo of {mv} did not restore the position");
        }
    }

    #[test]
    fn test_make_undo_round_trip_deep_line() {
        // A line exercising a capture, an en passant capture, and castling.
        let line = [
            "e2e4", "d7d5", "e4d5", "g8f6", "g1f3", "c7c5", "d5c6", "b8c6",
            "f1c4", "e7e6", "e1g1",
        ];

        let mut pos = Position::default();
        for mv in line {
            let mv = uci(&pos, mv);
            pos.make_move(mv);
        }

        assert_eq!(pos.king_square(Color::White), Square::G1);
        assert_eq!(pos.castling_rights_uci(), "kq");

        for _ in line {
            pos.undo_move();
        }
        assert_eq!(pos.to_fen(), FEN_STARTPOS);
        assert_eq!(pos.king_square(Color::White), Square::E1);
        assert_eq!(pos.king_square(Color::Black), Square::E1.rank_relative_to(Color::Black));
    }

    #[test]
    fn test_make_undo_round_trip_promotion() {
        let fen = "8/P7/8/8/8/8/7k/4K3 w - - 0 1";
        let mut pos = position(fen);
        let mv = uci(&pos, "a7a8");
        assert!(mv.is_promotion());

        pos.make_move(mv);
        assert_eq!(
            pos.board().piece_at(Square::from_uci("a8").unwrap()),
            Some(Piece::from_uci('Q').unwrap())
        );

        pos.undo_move();
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut pos = Position::default();
        let original = pos.clone();
        pos.undo_move();
        assert_eq!(pos, original);
    }

    #[test]
    fn test_en_passant_window_opens_and_closes() {
        let mut pos = Position::default();
        pos.make_move(uci(&pos, "e2e4"));
        assert_eq!(pos.ep_square(), Some(Square::from_uci("e3").unwrap()));

        pos.make_move(uci(&pos, "g8f6"));
        assert_eq!(pos.ep_square(), None);
    }

    // There are four cases in which castling rights can be lost:
    //  1. The King was moved
    //  2. A Rook was moved
    //  3. A Rook was captured
    //  4. Castling was performed

    #[test]
    fn test_castling_rights_update_on_king_move() {
        let mut pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

        // Moving the White King should remove White's castling rights
        pos.make_move(uci(&pos, "e1d1"));
        assert_eq!(pos.castling_rights_uci(), "kq");

        // Same for Black
        pos.make_move(uci(&pos, "e8f8"));
        assert_eq!(pos.castling_rights_uci(), "-");

        // Moving the White King back should NOT restore castling rights
        pos.make_move(uci(&pos, "d1e1"));
        assert_eq!(pos.castling_rights_uci(), "-");

        // Same for Black
        pos.make_move(uci(&pos, "f8e8"));
        assert_eq!(pos.castling_rights_uci(), "-");
    }

    #[test]
    fn test_castling_rights_update_on_rook_move() {
        let mut pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

        // Moving a Rook should disable castling for that side
        pos.make_move(uci(&pos, "a1b1"));
        assert_eq!(pos.castling_rights_uci(), "Kkq");

        // Same for Black
        pos.make_move(uci(&pos, "a8b8"));
        assert_eq!(pos.castling_rights_uci(), "Kk");

        // Moving the Rook back should NOT re-enable castling for that side
        pos.make_move(uci(&pos, "b1a1"));
        assert_eq!(pos.castling_rights_uci(), "Kk");

        // Same for Black
        pos.make_move(uci(&pos, "b8a8"));
        assert_eq!(pos.castling_rights_uci(), "Kk");
    }

    #[test]
    fn test_castling_rights_update_on_rook_captured() {
        let mut pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

        // Capturing a Rook disables castling on that side for the side that
        // lost the Rook. White used its a1 Rook to capture, so White loses
        // its queen-side right as well.
        pos.make_move(uci(&pos, "a1a8"));
        assert_eq!(pos.castling_rights_uci(), "Kk");

        // Same for Black, on the other side
        pos.make_move(uci(&pos, "h8h1"));
        assert_eq!(pos.castling_rights_uci(), "-");
    }

    #[test]
    fn test_castling_rights_update_on_castling_performed() {
        let mut pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

        // Performing castling should remove that side's rights altogether
        pos.make_move(uci(&pos, "e1g1"));
        assert_eq!(pos.castling_rights_uci(), "kq");

        // Same for Black, on the other side
        pos.make_move(uci(&pos, "e8c8"));
        assert_eq!(pos.castling_rights_uci(), "-");
    }

    #[test]
    fn test_castling_relocates_rook_and_undo_reverses_it() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut pos = position(fen);

        pos.make_move(uci(&pos, "e1c1"));
        assert_eq!(pos.board().kind_at(Square::C1), Some(PieceKind::King));
        assert_eq!(pos.board().kind_at(Square::D1), Some(PieceKind::Rook));
        assert!(!pos.board().has(Square::A1));
        assert_eq!(pos.king_square(Color::White), Square::C1);

        pos.undo_move();
        assert_eq!(pos.to_fen(), fen);
        assert_eq!(pos.king_square(Color::White), Square::E1);
    }

    #[test]
    fn test_make_move_checked_rejects_illegal_moves() {
        let mut pos = Position::default();
        let illegal = Move::new(&pos, Square::E1, Square::E1.rank_relative_to(Color::Black), MoveKind::Quiet);
        assert!(pos.make_move_checked(illegal).is_err());
        assert!(pos.make_move_checked(uci(&pos, "e2e4")).is_ok());
    }
}
