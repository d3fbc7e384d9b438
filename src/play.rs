use rand::Rng;
use tracing::{info, warn};

use crate::game::Minesweeper;
use crate::infer::{Cell, KnowledgeBase};

/// What happened on a single move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `cell` was safe and its clue has been recorded
    Revealed { cell: Cell, guessed: bool },
    /// `cell` was a mine
    Lost(Cell),
    /// No unprobed, non-mine cells are left
    Exhausted,
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every mine has been flagged
    Won,
    /// Probed a mine
    Lost(Cell),
    /// Ran out of moves without flagging every mine
    Stuck,
}

/// Running totals for a game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub moves: usize,
    pub guesses: usize,
}

/// Plays one game: feeds clues from the board into the engine and the
/// engine's moves back to the board.
#[derive(Debug)]
pub struct Player<'a, R: Rng + ?Sized> {
    game: Minesweeper,
    ai: KnowledgeBase,
    rng: &'a mut R,
    tally: Tally,
}
impl<'a, R: Rng + ?Sized> Player<'a, R> {
    pub fn new(game: Minesweeper, rng: &'a mut R) -> Self {
        Self {
            ai: KnowledgeBase::new(game.size()),
            game,
            rng,
            tally: Tally::default(),
        }
    }

    pub fn game(&self) -> &Minesweeper {
        &self.game
    }

    pub fn ai(&self) -> &KnowledgeBase {
        &self.ai
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Make one move, preferring a known safe cell and guessing only when
    /// there is none
    pub fn step(&mut self) -> Step {
        let (cell, guessed) = if let Some(cell) = self.ai.make_safe_move() {
            (cell, false)
        } else if let Some(cell) = self.ai.make_random_move(&mut *self.rng) {
            warn!(?cell, "no known safe move, guessing");
            (cell, true)
        } else {
            return Step::Exhausted;
        };

        self.tally.moves += 1;
        if guessed {
            self.tally.guesses += 1;
        }
        if self.game.is_mine(cell) {
            return Step::Lost(cell);
        }

        let count = self.game.nearby_mines(cell);
        info!(?cell, count, guessed, "revealed");
        self.ai.record_clue(cell, count);
        for &mine in self.ai.mines() {
            self.game.flag(mine);
        }
        Step::Revealed { cell, guessed }
    }

    /// Play until the game is decided
    pub fn run(&mut self) -> Outcome {
        let outcome = loop {
            if self.game.won() {
                break Outcome::Won;
            }
            match self.step() {
                Step::Revealed { .. } => (),
                Step::Lost(cell) => break Outcome::Lost(cell),
                Step::Exhausted => {
                    break if self.game.won() {
                        Outcome::Won
                    } else {
                        Outcome::Stuck
                    };
                },
            }
        };
        info!(
            ?outcome,
            moves = self.tally.moves,
            guesses = self.tally.guesses,
            "game over"
        );
        outcome
    }
}
