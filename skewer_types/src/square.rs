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

use super::Color;

/// A vertical file (column) on a chessboard. File 0 is the a-file.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
#[repr(transparent)]
pub struct File(pub(crate) u8);

impl File {
    /// Number of files on a chessboard.
    pub const COUNT: usize = 8;

    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    /// Creates a new [`File`], returning an error if `file` is out of bounds.
    pub fn new(file: u8) -> Result<Self> {
        if file >= Self::COUNT as u8 {
            bail!("Invalid file index: must be in [0, 8). Got {file}");
        }
        Ok(Self(file))
    }

    /// Creates a new [`File`] without bounds checking. Caller guarantees `file < 8`.
    #[inline(always)]
    pub const fn new_unchecked(file: u8) -> Self {
        Self(file)
    }

    /// Creates a [`File`] from a char in `a..=h` (case-insensitive).
    pub fn from_char(c: char) -> Result<Self> {
        let lower = c.to_ascii_lowercase();
        if !('a'..='h').contains(&lower) {
            bail!("Invalid file char: must be in 'a'..='h'. Got {c:?}");
        }
        Ok(Self(lower as u8 - b'a'))
    }

    /// The zero-based index of this file.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// The lowercase letter of this file, `a..=h`.
    #[inline(always)]
    pub const fn char(&self) -> char {
        (b'a' + self.0) as char
    }

    /// An iterator over all files, a through h.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A horizontal rank (row) on a chessboard.
///
/// Rank 0 is White's back rank (rank "1" in algebraic notation);
/// rank 7 is Black's back rank.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
#[repr(transparent)]
pub struct Rank(pub(crate) u8);

impl Rank {
    /// Number of ranks on a chessboard.
    pub const COUNT: usize = 8;

    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);

    /// Creates a new [`Rank`], returning an error if `rank` is out of bounds.
    pub fn new(rank: u8) -> Result<Self> {
        if rank >= Self::COUNT as u8 {
            bail!("Invalid rank index: must be in [0, 8). Got {rank}");
        }
        Ok(Self(rank))
    }

    /// Creates a new [`Rank`] without bounds checking. Caller guarantees `rank < 8`.
    #[inline(always)]
    pub const fn new_unchecked(rank: u8) -> Self {
        Self(rank)
    }

    /// The zero-based index of this rank.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// The digit of this rank in algebraic notation, `1..=8`.
    #[inline(always)]
    pub const fn char(&self) -> char {
        (b'1' + self.0) as char
    }

    /// The back rank of `color`: rank 1 for White, rank 8 for Black.
    #[inline(always)]
    pub const fn first(color: Color) -> Self {
        match color {
            Color::White => Self::ONE,
            Color::Black => Self::EIGHT,
        }
    }

    /// The pawn home rank of `color`: rank 2 for White, rank 7 for Black.
    #[inline(always)]
    pub const fn second(color: Color) -> Self {
        match color {
            Color::White => Self::TWO,
            Color::Black => Self::SEVEN,
        }
    }

    /// The promotion rank of `color`: rank 8 for White, rank 1 for Black.
    #[inline(always)]
    pub const fn eighth(color: Color) -> Self {
        Self::first(color.opponent())
    }

    /// An iterator over all ranks, 1 through 8.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A single square on a chessboard, indexed `rank * 8 + file`.
///
/// Square 0 is a1 and square 63 is h8, so White's pieces start on low indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// Number of squares on a chessboard.
    pub const COUNT: usize = 64;

    pub const A1: Self = Self(0);
    pub const B1: Self = Self(1);
    pub const C1: Self = Self(2);
    pub const D1: Self = Self(3);
    pub const E1: Self = Self(4);
    pub const F1: Self = Self(5);
    pub const G1: Self = Self(6);
    pub const H1: Self = Self(7);

    /// Creates a new [`Square`] from the given file and rank.
    ///
    /// # Example
    /// ```
    /// # use skewer_types::{File, Rank, Square};
    /// assert_eq!(Square::new(File::E, Rank::ONE), Square::E1);
    /// ```
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(rank.0 * 8 + file.0)
    }

    /// Creates a new [`Square`] from a raw index, returning an error if out of bounds.
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= Self::COUNT {
            bail!("Invalid square index: must be in [0, 64). Got {index}");
        }
        Ok(Self(index as u8))
    }

    /// Creates a [`Square`] from an algebraic coordinate string like `e4`.
    ///
    /// # Example
    /// ```
    /// # use skewer_types::{File, Rank, Square};
    /// assert_eq!(Square::from_uci("a1").unwrap(), Square::A1);
    /// assert_eq!(Square::from_uci("c7").unwrap(), Square::new(File::C, Rank::SEVEN));
    /// assert!(Square::from_uci("j9").is_err());
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self> {
        let mut chars = uci.trim().chars();
        let file = File::from_char(chars.next().ok_or(anyhow!("Empty square string"))?)?;
        let rank_char = chars.next().ok_or(anyhow!("Square string too short: {uci:?}"))?;
        let digit = rank_char
            .to_digit(10)
            .ok_or(anyhow!("Invalid rank char: {rank_char:?}"))?;
        if !(1..=8).contains(&digit) {
            bail!("Invalid rank digit: must be in 1..=8. Got {digit}");
        }
        Ok(Self::new(file, Rank(digit as u8 - 1)))
    }

    /// The algebraic coordinate of this square, e.g. `e4`.
    #[inline(always)]
    pub fn to_uci(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// The raw index of this square, in `0..64`.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// The [`File`] of this square.
    #[inline(always)]
    pub const fn file(&self) -> File {
        File(self.0 % 8)
    }

    /// The [`Rank`] of this square.
    #[inline(always)]
    pub const fn rank(&self) -> Rank {
        Rank(self.0 / 8)
    }

    /// Mirrors this square's rank for Black, leaving it unchanged for White.
    ///
    /// Useful for describing castling geometry relative to the mover.
    ///
    /// # Example
    /// ```
    /// # use skewer_types::{Color, Square};
    /// assert_eq!(Square::E1.rank_relative_to(Color::White), Square::E1);
    /// assert_eq!(Square::E1.rank_relative_to(Color::Black), Square::from_uci("e8").unwrap());
    /// ```
    #[inline(always)]
    pub const fn rank_relative_to(self, color: Color) -> Self {
        match color {
            Color::White => self,
            Color::Black => Self((7 - self.0 / 8) * 8 + self.0 % 8),
        }
    }

    /// Offsets this square by a (rank, file) delta, returning `None` if the
    /// result would fall off the board.
    ///
    /// # Example
    /// ```
    /// # use skewer_types::Square;
    /// assert_eq!(Square::E1.offset(1, 0), Some(Square::from_uci("e2").unwrap()));
    /// assert_eq!(Square::A1.offset(0, -1), None);
    /// ```
    #[inline(always)]
    pub fn offset(self, delta_rank: i8, delta_file: i8) -> Option<Self> {
        let rank = self.rank().0 as i8 + delta_rank;
        let file = self.file().0 as i8 + delta_file;
        ((0..8).contains(&rank) && (0..8).contains(&file))
            .then(|| Self::new(File(file as u8), Rank(rank as u8)))
    }

    /// The square one step toward the opponent's back rank, `n` times.
    #[inline(always)]
    pub fn forward_by(self, color: Color, n: i8) -> Option<Self> {
        match color {
            Color::White => self.offset(n, 0),
            Color::Black => self.offset(-n, 0),
        }
    }

    /// The square one step toward this color's own back rank, `n` times.
    #[inline(always)]
    pub fn backward_by(self, color: Color, n: i8) -> Option<Self> {
        self.forward_by(color.opponent(), n)
    }

    /// Absolute file distance between two squares.
    #[inline(always)]
    pub const fn distance_files(&self, other: Self) -> u8 {
        self.file().0.abs_diff(other.file().0)
    }

    /// Absolute rank distance between two squares.
    #[inline(always)]
    pub const fn distance_ranks(&self, other: Self) -> u8 {
        self.rank().0.abs_diff(other.rank().0)
    }

    /// Returns `true` if this square lies in the central 4x4 region (c3 through f6).
    #[inline(always)]
    pub const fn is_central(&self) -> bool {
        let file = self.0 % 8;
        let rank = self.0 / 8;
        2 <= file && file <= 5 && 2 <= rank && rank <= 5
    }

    /// An iterator over all 64 squares, a1 through h8.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, square: Square) -> &Self::Output {
        &self[square.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self[square.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_uci_round_trip() {
        for square in Square::iter() {
            assert_eq!(Square::from_uci(&square.to_uci()).unwrap(), square);
        }
    }

    #[test]
    fn test_square_geometry() {
        let e4 = Square::from_uci("e4").unwrap();
        assert_eq!(e4.file(), File::E);
        assert_eq!(e4.rank(), Rank::FOUR);
        assert_eq!(e4.offset(1, 1), Some(Square::from_uci("f5").unwrap()));
        assert_eq!(e4.forward_by(Color::Black, 1), Some(Square::from_uci("e3").unwrap()));
        assert!(e4.is_central());
        assert!(!Square::A1.is_central());

        let h8 = Square::from_uci("h8").unwrap();
        assert_eq!(h8.offset(1, 0), None);
        assert_eq!(h8.offset(0, 1), None);
        assert_eq!(h8.distance_files(Square::A1), 7);
        assert_eq!(h8.distance_ranks(Square::A1), 7);
    }

    #[test]
    fn test_rank_relative_to() {
        assert_eq!(Square::G1.rank_relative_to(Color::White), Square::G1);
        assert_eq!(
            Square::G1.rank_relative_to(Color::Black),
            Square::from_uci("g8").unwrap()
        );
        assert_eq!(Rank::first(Color::Black), Rank::EIGHT);
        assert_eq!(Rank::second(Color::Black), Rank::SEVEN);
        assert_eq!(Rank::eighth(Color::Black), Rank::ONE);
    }
}
