//! A minesweeper player that never guesses when it can deduce.
//!
//! The [`KnowledgeBase`] is the engine; [`Minesweeper`] is the board it plays
//! against and [`Player`] drives a game between the two.
mod internal_util;
pub mod game;
pub mod infer;
pub mod play;

pub use game::{BoardError, Minesweeper};
pub use infer::{BoardSize, Cell, KnowledgeBase, Sentence};
pub use play::{Outcome, Player, Step, Tally};
