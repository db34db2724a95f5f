//! The rules engine: decides which moves are legal, plays them and answers
//! whether a player is in check or checkmate.

use arrayvec::ArrayVec;
use log::{debug, trace};

use crate::chess::attacks;
use crate::chess::board::Board;
use crate::chess::core::{Move, Player, Square};
use crate::chess::error::Error;

/// A king has at most 8 neighbouring squares.
const MAX_KING_DESTINATIONS: usize = 8;

/// A game in progress: the authoritative [`Board`] and the player to move.
///
/// The only way to change the state is [`Game::make_move`]. Queries never
/// mutate the board: hypothetical moves are tried on a [`Board::simulate`]d
/// copy.
///
/// There is no "game over" state. After each move the caller is expected to
/// poll [`Game::is_current_player_in_checkmate`] and stop once it is true.
///
/// ```
/// use arbiter::chess::board::Board;
/// use arbiter::chess::core::{Move, Player, Square};
/// use arbiter::chess::game::Game;
///
/// let mut game = Game::new(Board::initial());
/// assert_eq!(game.current_player(), Player::White);
/// game.make_move(Move::new(Square::E2, Square::E4))?;
/// assert_eq!(game.current_player(), Player::Black);
/// assert!(game.make_move(Move::new(Square::E4, Square::E5)).is_err());
/// # Ok::<(), arbiter::chess::error::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    current_player: Player,
}

impl Game {
    /// Starts a game on the given board with White to move.
    #[must_use]
    pub const fn new(board: Board) -> Self {
        Self::with_side_to_move(board, Player::White)
    }

    /// Starts a game on the given board with `player` to move.
    #[must_use]
    pub const fn with_side_to_move(board: Board, player: Player) -> Self {
        Self {
            board,
            current_player: player,
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn current_player(&self) -> Player {
        self.current_player
    }

    /// The player who delivered the mate. Only meaningful once
    /// [`Game::is_current_player_in_checkmate`] returned true.
    #[must_use]
    pub const fn winning_player(&self) -> Player {
        self.current_player.opponent()
    }

    /// Plays the move if it is legal and passes the turn to the opponent.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalMove`] if [`Game::can_move`] rejects the move; the game
    /// is not changed then. Errors of [`Game::can_move`] are propagated as is.
    pub fn make_move(&mut self, next_move: Move) -> Result<(), Error> {
        if !self.can_move(next_move)? {
            debug!("{:?} can not play {next_move}", self.current_player);
            return Err(Error::IllegalMove {
                from: next_move.from,
                to: next_move.to,
            });
        }
        self.board.apply_move(next_move);
        debug!("{:?} played {next_move}", self.current_player);
        self.current_player = self.current_player.opponent();
        Ok(())
    }

    /// Checks whether the player to move may play `next_move`: it has to be
    /// either a valid relocation ([`Game::can_make`]) or a valid capture
    /// ([`Game::can_capture`]), and it must not leave the player's own king
    /// attacked.
    ///
    /// # Errors
    ///
    /// [`Error::KingCount`] if the player to move does not have exactly one
    /// king.
    pub fn can_move(&self, next_move: Move) -> Result<bool, Error> {
        if !(self.can_make(next_move) || self.can_capture(next_move)) {
            return Ok(false);
        }
        let simulated = self.board.simulate(next_move);
        let king = simulated.king_square(self.current_player)?;
        if attacks::is_attackable_by_opponent(&simulated, self.current_player, king) {
            trace!("{next_move} would leave {king} attacked");
            return Ok(false);
        }
        Ok(true)
    }

    /// Checks whether `next_move` is a valid non-capturing move of the player
    /// to move: there is a piece of theirs on `from`, it can get to `to` and
    /// `to` is empty.
    #[must_use]
    pub fn can_make(&self, next_move: Move) -> bool {
        let Some(piece) = self.board.piece_at(next_move.from) else {
            return false;
        };
        !piece.belongs_to(self.current_player.opponent())
            && piece.can_move(next_move, &self.board.pieces_in_path(next_move))
            && self.board.has_no_piece_on(next_move.to)
    }

    /// Checks whether `next_move` is a valid capture of the player to move:
    /// their piece on `from` can take an opponent's piece on `to`.
    #[must_use]
    pub fn can_capture(&self, next_move: Move) -> bool {
        attacks::is_valid_capture(&self.board, next_move, self.current_player)
    }

    /// Checks whether the player to move is in check.
    ///
    /// # Errors
    ///
    /// [`Error::KingCount`] if the player does not have exactly one king.
    pub fn is_current_player_in_check(&self) -> Result<bool, Error> {
        self.is_player_in_check(self.current_player)
    }

    /// Checks whether any of the opponent's pieces can capture the `player`'s
    /// king.
    ///
    /// # Errors
    ///
    /// [`Error::KingCount`] if the player does not have exactly one king.
    pub fn is_player_in_check(&self, player: Player) -> Result<bool, Error> {
        let king = self.board.king_square(player)?;
        Ok(attacks::is_attackable_by_opponent(&self.board, player, king))
    }

    /// Checks whether the player to move is checkmated. See
    /// [`Game::is_player_in_checkmate`].
    ///
    /// # Errors
    ///
    /// [`Error::KingCount`] if the player does not have exactly one king.
    pub fn is_current_player_in_checkmate(&self) -> Result<bool, Error> {
        self.is_player_in_checkmate(self.current_player)
    }

    /// Checks whether the `player` is in check and their king can not step
    /// out of it.
    ///
    /// Only king moves are tried: a check that could be answered by capturing
    /// the checking piece or blocking its line with another piece is still
    /// reported as checkmate when the king has nowhere to go.
    ///
    /// # Errors
    ///
    /// [`Error::KingCount`] if the player does not have exactly one king.
    pub fn is_player_in_checkmate(&self, player: Player) -> Result<bool, Error> {
        if !self.is_player_in_check(player)? {
            return Ok(false);
        }
        let king_square = self.board.king_square(player)?;
        let can_escape = self
            .king_destinations(player, king_square)?
            .into_iter()
            .any(|destination| {
                let simulated = self.board.simulate(Move::new(king_square, destination));
                let attacked = attacks::is_attackable_by_opponent(&simulated, player, destination);
                trace!("{player:?} king escape to {destination}: attacked = {attacked}");
                !attacked
            });
        Ok(!can_escape)
    }

    /// Squares the `player`'s king could step on if attacks were ignored: one
    /// square away and not occupied by a piece of the same player.
    fn king_destinations(
        &self,
        player: Player,
        king_square: Square,
    ) -> Result<ArrayVec<Square, MAX_KING_DESTINATIONS>, Error> {
        let king = self.board.find_king(player)?;
        Ok(Square::iter()
            .filter(|destination| *destination != king_square)
            .filter(|destination| {
                let next_move = Move::new(king_square, *destination);
                king.can_move(next_move, &self.board.pieces_in_path(next_move))
            })
            .filter(|destination| {
                self.board
                    .piece_at(*destination)
                    .map_or(true, |piece| !piece.belongs_to(player))
            })
            .collect())
    }
}
