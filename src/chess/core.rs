//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::{iter, mem};

use anyhow::bail;
use arrayvec::ArrayVec;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// The longest straight line on the board has 6 squares between its ends.
pub const MAX_PATH_LENGTH: usize = BOARD_WIDTH as usize - 2;

/// Squares strictly between the two ends of a straight-line move.
pub type Path = ArrayVec<Square, MAX_PATH_LENGTH>;

/// A request to relocate whatever stands on `from` to `to`. The move does not
/// own a piece and carries no legality information: it is evaluated against a
/// [`crate::chess::board::Board`] and the player to move by
/// [`crate::chess::game::Game`].
///
/// A move where `from == to` is representable but never legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    #[allow(missing_docs)]
    pub from: Square,
    #[allow(missing_docs)]
    pub to: Square,
}

impl Move {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Both ends are on the same rank.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        self.from.is_horizontal_to(self.to)
    }

    /// Both ends are on the same file.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        self.from.is_vertical_to(self.to)
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn is_diagonal(self) -> bool {
        self.from.is_diagonal_to(self.to)
    }

    /// Horizontal, vertical or diagonal: the moves that have a [`Path`].
    #[must_use]
    pub const fn is_straight(self) -> bool {
        self.is_horizontal() || self.is_vertical() || self.is_diagonal()
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn horizontal_distance(self) -> u8 {
        self.from.horizontal_distance_to(self.to)
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn vertical_distance(self) -> u8 {
        self.from.vertical_distance_to(self.to)
    }

    /// Number of ranks the move advances from the `player`'s point of view:
    /// positive towards the opponent's backrank, negative when retreating.
    ///
    /// ```
    /// use arbiter::chess::core::{Move, Player, Square};
    ///
    /// let push = Move::new(Square::E2, Square::E4);
    /// assert_eq!(push.forward_distance(Player::White), 2);
    /// assert_eq!(push.forward_distance(Player::Black), -2);
    /// ```
    #[must_use]
    pub const fn forward_distance(self, player: Player) -> i8 {
        let (from, to) = (self.from.rank() as i8, self.to.rank() as i8);
        match player {
            Player::White => to - from,
            Player::Black => from - to,
        }
    }

    /// Squares strictly between `from` and `to` if the move is a straight line
    /// (horizontal, vertical or diagonal). Any other move is a jump and has an
    /// empty path.
    ///
    /// ```
    /// use arbiter::chess::core::{Move, Square};
    ///
    /// let path = Move::new(Square::A3, Square::E7).path();
    /// assert_eq!(path.as_slice(), &[Square::B4, Square::C5, Square::D6]);
    /// assert!(Move::new(Square::A1, Square::G3).path().is_empty());
    /// ```
    #[must_use]
    pub fn path(self) -> Path {
        match Direction::between(self.from, self.to) {
            Some(direction) => iter::successors(self.from.shift(direction), |square| {
                square.shift(direction)
            })
            .take_while(|square| *square != self.to)
            .collect(),
            None => Path::new(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Board squares: from left to right, from bottom to the top:
///
/// ```
/// use arbiter::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A4 as u8, 8 * 3);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// Square is a compact representation using only one byte.
///
/// ```
/// use arbiter::chess::core::Square;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        unsafe { mem::transmute(file as u8 + (rank as u8) * BOARD_WIDTH) }
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        unsafe { mem::transmute(self as u8 % BOARD_WIDTH) }
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        unsafe { mem::transmute(self as u8 / BOARD_WIDTH) }
    }

    /// All squares in index order: A1, B1, ..., H1, A2, ..., H8.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..BOARD_SIZE).filter_map(|index| Self::try_from(index).ok())
    }

    /// Same rank.
    #[must_use]
    pub const fn is_horizontal_to(self, other: Self) -> bool {
        self.rank() as u8 == other.rank() as u8
    }

    /// Same file.
    #[must_use]
    pub const fn is_vertical_to(self, other: Self) -> bool {
        self.file() as u8 == other.file() as u8
    }

    /// Both squares are on one diagonal. A square is not diagonal to itself.
    #[must_use]
    pub const fn is_diagonal_to(self, other: Self) -> bool {
        let distance = self.horizontal_distance_to(other);
        distance != 0 && distance == self.vertical_distance_to(other)
    }

    /// Absolute difference between the files.
    #[must_use]
    pub const fn horizontal_distance_to(self, other: Self) -> u8 {
        (self.file() as u8).abs_diff(other.file() as u8)
    }

    /// Absolute difference between the ranks.
    #[must_use]
    pub const fn vertical_distance_to(self, other: Self) -> u8 {
        (self.rank() as u8).abs_diff(other.rank() as u8)
    }

    /// Returns the neighbouring square in given direction or `None` if it
    /// would fall off the board.
    #[must_use]
    pub fn shift(self, direction: Direction) -> Option<Self> {
        let (file_delta, rank_delta) = direction.deltas();
        let file = (self.file() as u8).checked_add_signed(file_delta)?;
        let rank = (self.rank() as u8).checked_add_signed(rank_delta)?;
        Some(Self::new(File::try_from(file).ok()?, Rank::try_from(rank).ok()?))
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its position on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        // Exclusive range patterns are not allowed:
        // https://github.com/rust-lang/rust/issues/37854
        const MAX_INDEX: u8 = BOARD_SIZE - 1;
        match square_index {
            0..=MAX_INDEX => Ok(unsafe { mem::transmute::<u8, Self>(square_index) }),
            _ => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// Files from A to H.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..BOARD_WIDTH).map(|column| unsafe { mem::transmute::<u8, Self>(column) })
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'A' + *self as u8) as char)
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match column {
            0..=7 => Ok(unsafe { mem::transmute::<u8, Self>(column) }),
            _ => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    /// Ranks from One to Eight.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..BOARD_WIDTH).map(|row| unsafe { mem::transmute::<u8, Self>(row) })
    }

    /// Rank where the `player`'s pieces other than pawns start.
    #[must_use]
    pub const fn backrank(player: Player) -> Self {
        match player {
            Player::White => Self::One,
            Player::Black => Self::Eight,
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn pawns_starting(player: Player) -> Self {
        match player {
            Player::White => Self::Two,
            Player::Black => Self::Seven,
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match row {
            0..=7 => Ok(unsafe { mem::transmute::<u8, Self>(row) }),
            _ => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Glyph used in the text board: algebraic letter for pieces, 'x' for
    /// pawns.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Pawn => 'x',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

/// Represents a specific piece owned by a player.
///
/// Pieces are plain values: copying a board copies every piece together with
/// its "moved" state, and pieces with equal owner, kind and state compare
/// equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
    moved: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self {
            owner,
            kind,
            moved: false,
        }
    }

    /// Whether the piece was moved at least once. Only pawns care: an unmoved
    /// pawn may advance two squares.
    #[must_use]
    pub const fn has_moved(self) -> bool {
        self.moved
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn belongs_to(self, player: Player) -> bool {
        self.owner == player
    }

    pub(super) fn mark_moved(&mut self) {
        self.moved = true;
    }
}

impl fmt::Display for Piece {
    /// Two-character code: owner ('w'/'b') followed by [`PieceKind::symbol`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.owner, self.kind.symbol())
    }
}

/// Directions on the board from a perspective of White player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Right,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    /// (file, rank) step.
    const fn deltas(self) -> (i8, i8) {
        match self {
            Self::UpLeft => (-1, 1),
            Self::Up => (0, 1),
            Self::UpRight => (1, 1),
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::DownLeft => (-1, -1),
            Self::Down => (0, -1),
            Self::DownRight => (1, -1),
        }
    }

    /// Direction of the straight line leading from `from` to `to`, if there
    /// is one.
    #[must_use]
    pub fn between(from: Square, to: Square) -> Option<Self> {
        if from == to || !Move::new(from, to).is_straight() {
            return None;
        }
        let file_step = (to.file() as i8 - from.file() as i8).signum();
        let rank_step = (to.rank() as i8 - from.rank() as i8).signum();
        Some(match (file_step, rank_step) {
            (-1, 1) => Self::UpLeft,
            (0, 1) => Self::Up,
            (1, 1) => Self::UpRight,
            (1, 0) => Self::Right,
            (-1, 0) => Self::Left,
            (-1, -1) => Self::DownLeft,
            (0, -1) => Self::Down,
            (1, -1) => Self::DownRight,
            _ => unreachable!("distinct squares on a straight line have a direction"),
        })
    }
}

#[cfg(test)]
mod test {
    use std::mem::{size_of, size_of_val};

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rank() {
        assert_eq!(
            (0..=BOARD_WIDTH)
                .filter_map(|idx| Rank::try_from(idx).ok())
                .collect::<Vec<Rank>>(),
            vec![
                Rank::One,
                Rank::Two,
                Rank::Three,
                Rank::Four,
                Rank::Five,
                Rank::Six,
                Rank::Seven,
                Rank::Eight,
            ]
        );
        assert_eq!(Rank::iter().collect::<Vec<_>>().len(), BOARD_WIDTH as usize);
    }

    #[test]
    #[should_panic(expected = "rank should be within 0..BOARD_WIDTH, got 8")]
    fn rank_from_incorrect_index() {
        let _ = Rank::try_from(BOARD_WIDTH).unwrap();
    }

    #[test]
    fn file() {
        assert_eq!(
            (0..=BOARD_WIDTH)
                .filter_map(|idx| File::try_from(idx).ok())
                .collect::<Vec<File>>(),
            File::iter().collect::<Vec<_>>()
        );
        assert_eq!(File::A.to_string(), "A");
        assert_eq!(File::H.to_string(), "H");
    }

    #[test]
    #[should_panic(expected = "file should be within 0..BOARD_WIDTH, got 8")]
    fn file_from_incorrect_index() {
        let _ = File::try_from(BOARD_WIDTH).unwrap();
    }

    #[test]
    fn square() {
        let squares: Vec<_> = [
            0u8,
            BOARD_SIZE - 1,
            BOARD_WIDTH - 1,
            BOARD_WIDTH,
            BOARD_WIDTH * 2 + 5,
            BOARD_SIZE,
        ]
        .iter()
        .filter_map(|square| Square::try_from(*square).ok())
        .collect();
        assert_eq!(
            squares,
            vec![Square::A1, Square::H8, Square::H1, Square::A2, Square::F3,]
        );
        let squares: Vec<_> = [
            (File::B, Rank::Three),
            (File::F, Rank::Five),
            (File::H, Rank::Eight),
            (File::E, Rank::Four),
        ]
        .iter()
        .map(|(file, rank)| Square::new(*file, *rank))
        .collect();
        assert_eq!(
            squares,
            vec![Square::B3, Square::F5, Square::H8, Square::E4]
        );
        assert!(Square::iter().map(|square| square as u8).eq(0..BOARD_SIZE));
        assert_eq!(Square::iter().next_back(), Some(Square::H8));
        assert!(Square::iter().all(|square| Square::new(square.file(), square.rank()) == square));
        assert_eq!(Square::C7.to_string(), "C7");
    }

    #[test]
    #[should_panic(expected = "square index should be in 0..BOARD_SIZE, got 64")]
    fn square_from_incorrect_index() {
        let _ = Square::try_from(BOARD_SIZE).unwrap();
    }

    #[test]
    fn primitive_size() {
        assert_eq!(size_of::<Square>(), 1);
        assert_eq!(size_of::<Piece>(), size_of::<Option<Piece>>());
        // A whole board fits into a couple of cache lines.
        let squares: [Option<Piece>; BOARD_SIZE as usize] = [None; BOARD_SIZE as usize];
        assert!(size_of_val(&squares) <= 4 * BOARD_SIZE as usize);
    }

    #[test]
    fn relations() {
        assert!(Square::A3.is_diagonal_to(Square::E7));
        assert!(Square::H1.is_diagonal_to(Square::A8));
        assert!(!Square::A3.is_diagonal_to(Square::A3));
        assert!(!Square::A1.is_diagonal_to(Square::B3));

        assert!(Square::C3.is_horizontal_to(Square::H3));
        assert!(!Square::C3.is_horizontal_to(Square::C4));
        assert!(Square::C3.is_vertical_to(Square::C8));
        assert!(!Square::C3.is_vertical_to(Square::D3));

        assert_eq!(Square::B1.horizontal_distance_to(Square::G5), 5);
        assert_eq!(Square::G5.horizontal_distance_to(Square::B1), 5);
        assert_eq!(Square::B1.vertical_distance_to(Square::G5), 4);
        assert_eq!(Square::G5.vertical_distance_to(Square::B1), 4);
    }

    #[test]
    fn within_board_shift() {
        let square = Square::E4;
        assert_eq!(square.shift(Direction::Left), Some(Square::D4));
        assert_eq!(square.shift(Direction::Up), Some(Square::E5));
        assert_eq!(square.shift(Direction::UpRight), Some(Square::F5));
        assert_eq!(square.shift(Direction::UpLeft), Some(Square::D5));
        assert_eq!(square.shift(Direction::Right), Some(Square::F4));
        assert_eq!(square.shift(Direction::Down), Some(Square::E3));
        assert_eq!(square.shift(Direction::DownRight), Some(Square::F3));
        assert_eq!(square.shift(Direction::DownLeft), Some(Square::D3));
    }

    #[test]
    fn corner_squares_shift() {
        let square = Square::A1;
        assert_eq!(square.shift(Direction::Up), Some(Square::A2));
        assert_eq!(square.shift(Direction::UpRight), Some(Square::B2));
        assert_eq!(square.shift(Direction::Right), Some(Square::B1));
        for direction in [
            Direction::Left,
            Direction::UpLeft,
            Direction::Down,
            Direction::DownRight,
            Direction::DownLeft,
        ] {
            assert_eq!(square.shift(direction), None);
        }

        let square = Square::H8;
        assert_eq!(square.shift(Direction::Left), Some(Square::G8));
        assert_eq!(square.shift(Direction::Down), Some(Square::H7));
        assert_eq!(square.shift(Direction::DownLeft), Some(Square::G7));
        for direction in [
            Direction::Up,
            Direction::UpRight,
            Direction::UpLeft,
            Direction::DownRight,
            Direction::Right,
        ] {
            assert_eq!(square.shift(direction), None);
        }
    }

    #[test]
    fn direction_between() {
        assert_eq!(
            Direction::between(Square::C1, Square::A3),
            Some(Direction::UpLeft)
        );
        assert_eq!(
            Direction::between(Square::G6, Square::A6),
            Some(Direction::Left)
        );
        assert_eq!(
            Direction::between(Square::A5, Square::A3),
            Some(Direction::Down)
        );
        assert_eq!(Direction::between(Square::E4, Square::F6), None);
        assert_eq!(Direction::between(Square::E4, Square::E4), None);
    }

    #[test]
    fn paths() {
        assert_eq!(Move::new(Square::C1, Square::A3).path().as_slice(), &[Square::B2]);
        assert_eq!(Move::new(Square::C1, Square::E3).path().as_slice(), &[Square::D2]);
        assert_eq!(Move::new(Square::A5, Square::A3).path().as_slice(), &[Square::A4]);
        assert_eq!(Move::new(Square::C3, Square::C5).path().as_slice(), &[Square::C4]);
        assert_eq!(
            Move::new(Square::C3, Square::H3).path().as_slice(),
            &[Square::D3, Square::E3, Square::F3, Square::G3]
        );
        assert_eq!(
            Move::new(Square::G6, Square::A6).path().as_slice(),
            &[
                Square::F6,
                Square::E6,
                Square::D6,
                Square::C6,
                Square::B6
            ]
        );
        // Path never includes either end.
        assert!(!Move::new(Square::D4, Square::D6).path().contains(&Square::D6));
        assert!(!Move::new(Square::D4, Square::D6).path().contains(&Square::D4));
        // Neighbours and jumps have no path.
        assert!(Move::new(Square::D4, Square::D5).path().is_empty());
        assert!(Move::new(Square::A1, Square::G3).path().is_empty());
        assert!(Move::new(Square::B1, Square::C3).path().is_empty());
        assert!(Move::new(Square::B1, Square::B1).path().is_empty());
        // The longest lines.
        assert_eq!(Move::new(Square::A1, Square::H8).path().len(), MAX_PATH_LENGTH);
        assert_eq!(Move::new(Square::H1, Square::H8).path().len(), MAX_PATH_LENGTH);
    }

    #[test]
    fn forward_distance() {
        let retreat = Move::new(Square::D5, Square::D3);
        assert_eq!(retreat.forward_distance(Player::White), -2);
        assert_eq!(retreat.forward_distance(Player::Black), 2);
        assert_eq!(
            Move::new(Square::D4, Square::E5).forward_distance(Player::White),
            1
        );
    }

    #[test]
    fn symbols() {
        assert_eq!(Piece::new(Player::White, PieceKind::Rook).to_string(), "wR");
        assert_eq!(Piece::new(Player::Black, PieceKind::Pawn).to_string(), "bx");
        assert_eq!(Piece::new(Player::Black, PieceKind::Knight).to_string(), "bN");
        assert_eq!(Move::new(Square::E2, Square::E4).to_string(), "E2E4");
    }

    #[test]
    fn opponent() {
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(Player::Black.opponent(), Player::White);
    }
}
