/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

pub use skewer_types::*;

/// Fully legal move generation: pins, checks, attack queries, and game status.
mod movegen;
/// Enums and structs for modeling the movement of a piece on a chessboard.
mod moves;
/// Utility functions for performance testing of move generation.
mod perft;
/// A chessboard, complete with piece placements, castling rights, and reversible move application.
mod position;
/// Fixed-depth negamax search with alpha-beta pruning and quiescence.
mod search;

pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use position::*;
pub use search::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::perft::*;
    pub use crate::position::*;
    pub use crate::search::*;
    pub use skewer_types::*;
}
