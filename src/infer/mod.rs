//! Propositional inference over clue sentences.
//!
//! Each probed cell contributes a [`Sentence`] about its neighbours to a
//! [`KnowledgeBase`], which closes over two rules until nothing new follows:
//!
//! - A sentence whose count is zero, or equal to its size, settles all of its
//!   cells.
//! - If one sentence's cells are a subset of another's, the difference of
//!   the two is itself a sentence.
mod knowledge;
mod types;

pub use knowledge::KnowledgeBase;
pub use types::{BoardSize, Cell, Sentence};
