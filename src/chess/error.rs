//! Failures reported by the rules engine.

use crate::chess::core::{Piece, Player, Square};

/// Errors produced by [`crate::chess::game::Game`] and
/// [`crate::chess::board::Board`].
///
/// There are two kinds of them. [`Error::IllegalMove`] is an ordinary outcome
/// of asking the engine to play a move it does not allow; the game is left
/// untouched and the caller may try another move. The others mean the board
/// itself is corrupted (e.g. a king was never placed) and no answer about
/// check or legality can be given for it. Use
/// [`Error::is_invariant_violation`] to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The move is not legal for the player to move.
    #[error("illegal move {from}-{to}")]
    IllegalMove {
        #[allow(missing_docs)]
        from: Square,
        #[allow(missing_docs)]
        to: Square,
    },
    /// Every player needs exactly one king for check to be defined.
    #[error("expected 1 {player:?} king, got {count}")]
    KingCount {
        #[allow(missing_docs)]
        player: Player,
        #[allow(missing_docs)]
        count: u8,
    },
    /// A piece that should be on the board was not found.
    #[error("piece {piece} is not on the board")]
    PieceNotFound {
        #[allow(missing_docs)]
        piece: Piece,
    },
}

impl Error {
    /// True for errors caused by a corrupted board rather than by the move
    /// being requested.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        !matches!(self, Self::IllegalMove { .. })
    }
}
