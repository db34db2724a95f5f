//! Movement and capture rules of each piece kind, and the attack test built on
//! top of them.
//!
//! The predicates only look at the geometry of a move and at the pieces
//! standing strictly between its ends. Who owns the destination square, whose
//! turn it is and whether the mover's king ends up attacked is decided by
//! [`crate::chess::game::Game`].

use crate::chess::board::Board;
use crate::chess::core::{Move, Piece, PieceKind, Player, Square};

impl Piece {
    /// Whether the piece can relocate along `next_move` given the pieces
    /// blocking its path.
    ///
    /// ```
    /// use arbiter::chess::core::{Move, Piece, PieceKind, Player, Square};
    ///
    /// let pawn = Piece::new(Player::White, PieceKind::Pawn);
    /// assert!(pawn.can_move(Move::new(Square::A2, Square::A4), &[]));
    /// assert!(!pawn.can_move(Move::new(Square::A2, Square::B3), &[]));
    /// ```
    #[must_use]
    pub fn can_move(&self, next_move: Move, pieces_in_path: &[Self]) -> bool {
        let clear_path = pieces_in_path.is_empty();
        match self.kind {
            PieceKind::Pawn => {
                clear_path
                    && next_move.is_vertical()
                    && match next_move.forward_distance(self.owner) {
                        1 => true,
                        2 => !self.has_moved(),
                        _ => false,
                    }
            },
            // Knights jump: whatever stands in between does not matter.
            PieceKind::Knight => matches!(
                (next_move.horizontal_distance(), next_move.vertical_distance()),
                (1, 2) | (2, 1)
            ),
            PieceKind::Bishop => clear_path && next_move.is_diagonal(),
            PieceKind::Rook => clear_path && (next_move.is_horizontal() || next_move.is_vertical()),
            PieceKind::Queen => clear_path && next_move.is_straight(),
            PieceKind::King => {
                next_move.is_straight()
                    && next_move
                        .horizontal_distance()
                        .max(next_move.vertical_distance())
                        == 1
            },
        }
    }

    /// Whether the piece can take whatever stands on `next_move.to`. Only
    /// pawns capture differently from how they move: one square diagonally
    /// forward and never straight ahead.
    #[must_use]
    pub fn can_capture(&self, next_move: Move, pieces_in_path: &[Self]) -> bool {
        match self.kind {
            PieceKind::Pawn => {
                next_move.is_diagonal() && next_move.forward_distance(self.owner) == 1
            },
            PieceKind::Knight
            | PieceKind::Bishop
            | PieceKind::Rook
            | PieceKind::Queen
            | PieceKind::King => self.can_move(next_move, pieces_in_path),
        }
    }
}

/// Checks whether `player` can capture with the piece on `next_move.from` the
/// piece on `next_move.to`. Both squares have to be occupied, the attacker has
/// to belong to `player` and the defender to the other side.
pub(super) fn is_valid_capture(board: &Board, next_move: Move, player: Player) -> bool {
    let (Some(attacker), Some(defender)) = (
        board.piece_at(next_move.from),
        board.piece_at(next_move.to),
    ) else {
        return false;
    };
    if attacker.belongs_to(player.opponent()) || defender.belongs_to(attacker.owner) {
        return false;
    }
    attacker.can_capture(next_move, &board.pieces_in_path(next_move))
}

/// Checks whether any piece of the `player`'s opponent could capture on
/// `target`.
pub(super) fn is_attackable_by_opponent(board: &Board, player: Player, target: Square) -> bool {
    let attacker = player.opponent();
    board
        .pieces(attacker)
        .any(|(square, _)| is_valid_capture(board, Move::new(square, target), attacker))
}
