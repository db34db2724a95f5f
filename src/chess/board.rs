//! Square-centric ("mailbox") board: every square maps to at most one piece.

use std::fmt;

use arrayvec::ArrayVec;
use itertools::Itertools;

use crate::chess::core::{
    File,
    Move,
    Piece,
    PieceKind,
    Player,
    Rank,
    Square,
    BOARD_SIZE,
    MAX_PATH_LENGTH,
};
use crate::chess::error::Error;

/// Piece placement on the 8x8 board.
///
/// The board only stores pieces and never judges moves: [`Board::apply_move`]
/// relocates whatever it is asked to. Copies are fully independent (pieces are
/// plain values), which is what [`Board::simulate`] relies on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE as usize],
}

impl Board {
    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE as usize],
        }
    }

    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use arbiter::chess::board::Board;
    /// use arbiter::chess::core::{PieceKind, Player, Square};
    ///
    /// let board = Board::initial();
    /// assert_eq!(board.pieces(Player::White).count(), 16);
    /// assert_eq!(board.piece_at(Square::D8).map(|piece| piece.kind), Some(PieceKind::Queen));
    /// ```
    #[must_use]
    pub fn initial() -> Self {
        const BACKRANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Self::empty();
        for player in [Player::White, Player::Black] {
            for (file, kind) in File::iter().zip(BACKRANK) {
                board.put_piece(
                    Square::new(file, Rank::backrank(player)),
                    Piece::new(player, kind),
                );
                board.put_piece(
                    Square::new(file, Rank::pawns_starting(player)),
                    Piece::new(player, PieceKind::Pawn),
                );
            }
        }
        board
    }

    /// Copies the board and applies `next_move` to the copy. The original is
    /// left untouched.
    #[must_use]
    pub fn simulate(&self, next_move: Move) -> Self {
        let mut board = self.clone();
        board.apply_move(next_move);
        board
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn has_piece_on(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn has_no_piece_on(&self, square: Square) -> bool {
        !self.has_piece_on(square)
    }

    /// Places the piece on the square, replacing the previous occupant.
    pub fn put_piece(&mut self, square: Square, piece: Piece) {
        self.squares[square as usize] = Some(piece);
    }

    /// Removes the occupant of the square (if any) and returns it.
    pub fn clear_square(&mut self, square: Square) -> Option<Piece> {
        self.squares[square as usize].take()
    }

    /// Moves the piece from `next_move.from` to `next_move.to` and marks it as
    /// moved. Whatever stood on the destination is replaced: this is how
    /// captures happen. Legality is not checked.
    pub fn apply_move(&mut self, next_move: Move) {
        let piece = self.clear_square(next_move.from).map(|mut piece| {
            piece.mark_moved();
            piece
        });
        if piece.is_none() {
            log::warn!("applying {next_move} without a piece on {}", next_move.from);
        }
        self.squares[next_move.to as usize] = piece;
    }

    /// Occupants of the squares strictly between the ends of a straight-line
    /// move. Jumps have no path, so nothing can block them.
    #[must_use]
    pub fn pieces_in_path(&self, next_move: Move) -> ArrayVec<Piece, MAX_PATH_LENGTH> {
        next_move
            .path()
            .into_iter()
            .filter_map(|square| self.piece_at(square))
            .collect()
    }

    /// Pieces of the `player` together with their squares, in square order.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter()
            .filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
            .filter(move |(_, piece)| piece.belongs_to(player))
    }

    /// Returns the king of the `player`.
    ///
    /// # Errors
    ///
    /// [`Error::KingCount`] unless there is exactly one such king: check can
    /// not be decided on such board.
    pub fn find_king(&self, player: Player) -> Result<Piece, Error> {
        self.king(player).map(|(_, king)| king)
    }

    /// Returns the square of the `player`'s king.
    ///
    /// # Errors
    ///
    /// Same as [`Board::find_king`].
    pub fn king_square(&self, player: Player) -> Result<Square, Error> {
        self.king(player).map(|(square, _)| square)
    }

    /// Finds the first square (in square order) holding an equal piece.
    ///
    /// # Errors
    ///
    /// [`Error::PieceNotFound`] if there is no such piece.
    pub fn position_of(&self, piece: &Piece) -> Result<Square, Error> {
        Square::iter()
            .find(|square| self.piece_at(*square).as_ref() == Some(piece))
            .ok_or(Error::PieceNotFound { piece: *piece })
    }

    fn king(&self, player: Player) -> Result<(Square, Piece), Error> {
        self.pieces(player)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .exactly_one()
            .map_err(|kings| Error::KingCount {
                player,
                count: u8::try_from(kings.count()).unwrap_or(u8::MAX),
            })
    }
}

const RANK_SEPARATOR: &str = "  --------------------------------";

impl fmt::Display for Board {
    /// Draws the board as a text grid, rank 8 at the top:
    ///
    /// ```text
    ///
    ///     A   B   C   D   E   F   G   H
    ///   --------------------------------
    /// 8 |bR |bN |bB |bQ |bK |bB |bN |bR |
    ///   --------------------------------
    /// ...
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "    {}", File::iter().join("   "))?;
        for rank in Rank::iter().rev() {
            writeln!(f, "{RANK_SEPARATOR}")?;
            write!(f, "{rank} |")?;
            for file in File::iter() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece} |")?,
                    None => f.write_str("   |")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "{RANK_SEPARATOR}")
    }
}
