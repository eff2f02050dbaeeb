/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Not},
    str::FromStr,
};

use anyhow::{bail, Result};

/// The color of a player (or of a piece belonging to that player).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Number of colors.
    pub const COUNT: usize = 2;

    /// Both colors, in index order.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// An index for this [`Color`], usable with arrays of length [`Color::COUNT`].
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the opposite color.
    ///
    /// # Example
    /// ```
    /// # use skewer_types::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns `true` if this is [`Color::White`].
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Returns `true` if this is [`Color::Black`].
    #[inline(always)]
    pub const fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }

    /// Creates a [`Color`] from a FEN-style char: `w`/`W` or `b`/`B`.
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => bail!("Invalid color char: expected 'w' or 'b', got {c:?}"),
        }
    }
}

impl Not for Color {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "w" | "W" => Ok(Self::White),
            "b" | "B" => Ok(Self::Black),
            _ => bail!("Invalid color string: expected \"w\" or \"b\", got {s:?}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.is_white() { 'w' } else { 'b' })
    }
}

impl<T> Index<Color> for [T; Color::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, color: Color) -> &Self::Output {
        &self[color.index()]
    }
}

impl<T> IndexMut<Color> for [T; Color::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        &mut self[color.index()]
    }
}

/// The kind of a chess piece, independent of its color.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 6;

    /// All piece kinds, in index order.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::Pawn,
            Self::Knight,
            Self::Bishop,
            Self::Rook,
            Self::Queen,
            Self::King,
        ]
    }

    /// An index for this [`PieceKind`], usable with arrays of length [`PieceKind::COUNT`].
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Creates a [`PieceKind`] from a FEN-style char, ignoring case.
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_lowercase() {
            'p' => Ok(Self::Pawn),
            'n' => Ok(Self::Knight),
            'b' => Ok(Self::Bishop),
            'r' => Ok(Self::Rook),
            'q' => Ok(Self::Queen),
            'k' => Ok(Self::King),
            _ => bail!("Invalid piece char: {c:?}"),
        }
    }

    /// The lowercase FEN char for this kind.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// The uppercase letter used in Standard Algebraic Notation.
    ///
    /// Pawns have no letter in SAN; callers are expected to omit it themselves.
    #[inline(always)]
    pub const fn san_letter(&self) -> char {
        self.char().to_ascii_uppercase()
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A chess piece: a [`Color`] and a [`PieceKind`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    /// Creates a new [`Piece`] from the given color and kind.
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Creates a [`Piece`] from a FEN char: uppercase is White, lowercase is Black.
    ///
    /// # Example
    /// ```
    /// # use skewer_types::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::from_uci('N').unwrap(), Piece::new(Color::White, PieceKind::Knight));
    /// assert_eq!(Piece::from_uci('q').unwrap(), Piece::new(Color::Black, PieceKind::Queen));
    /// ```
    pub fn from_uci(c: char) -> Result<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Self::new(color, PieceKind::from_char(c)?))
    }

    /// The [`Color`] of this piece.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// The [`PieceKind`] of this piece.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// The FEN char of this piece: uppercase for White, lowercase for Black.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self.color {
            Color::White => self.kind.char().to_ascii_uppercase(),
            Color::Black => self.kind.char(),
        }
    }

    /// Returns `true` if this piece is a Pawn.
    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// Returns `true` if this piece is a Rook.
    #[inline(always)]
    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    /// Returns `true` if this piece is a King.
    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_uci_round_trip() {
        for c in "PNBRQKpnbrqk".chars() {
            let piece = Piece::from_uci(c).unwrap();
            assert_eq!(piece.char(), c);
        }
        assert!(Piece::from_uci('x').is_err());
    }

    #[test]
    fn test_color_indexing() {
        let mut rights = [0u8; Color::COUNT];
        rights[Color::Black] = 7;
        assert_eq!(rights[Color::White], 0);
        assert_eq!(rights[Color::Black], 7);
        assert_eq!(!Color::White, Color::Black);
    }
}
