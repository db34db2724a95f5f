//! Chess rules engine: decides whether a move is legal, plays it and tells
//! when a player is in check or checkmate.
//!
//! The engine covers the movement and capture rules of all six piece kinds.
//! Castling, en passant, promotion and draws are not part of the rules it
//! enforces.
//!
//! ```
//! use arbiter::{Board, Game, Move, Square};
//!
//! let mut game = Game::new(Board::initial());
//! for (from, to) in [
//!     (Square::F2, Square::F3),
//!     (Square::E7, Square::E5),
//!     (Square::G2, Square::G4),
//!     (Square::D8, Square::H4),
//! ] {
//!     game.make_move(Move::new(from, to))?;
//! }
//! assert!(game.is_current_player_in_check()?);
//! assert!(game.is_current_player_in_checkmate()?);
//! assert_eq!(game.winning_player(), arbiter::Player::Black);
//! # Ok::<(), arbiter::Error>(())
//! ```

#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::private_doc_tests,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![deny(clippy::perf)]

pub mod chess;

pub use chess::board::Board;
pub use chess::core::{File, Move, Piece, PieceKind, Player, Rank, Square};
pub use chess::error::Error;
pub use chess::game::Game;
