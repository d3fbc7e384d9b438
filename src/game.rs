use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use thiserror::Error;

use crate::infer::{BoardSize, Cell};

/// A board that can't be built as requested
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error(
        "Board must be rectangular (row {row} has length {found}, expected length \
         {expected})"
    )]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("Invalid character '{ch}' at ({row}, {col})")]
    InvalidCharacter { ch: char, row: usize, col: usize },
    #[error("Cannot place {mines} mines on a board of {cells} cells")]
    TooManyMines { mines: usize, cells: usize },
}

/// The real board: where the mines are, and which ones the player has
/// flagged. This is what the engine plays against; it knows nothing about
/// inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minesweeper {
    size: BoardSize,
    mines: HashSet<Cell>,
    /// Cells the player has flagged as mines
    mines_found: HashSet<Cell>,
}
impl Minesweeper {
    /// Scatter `mines` mines uniformly at random over a board of `size`.
    ///
    /// # Errors
    ///
    /// If either dimension is zero, or there are more mines than cells.
    pub fn new<R: Rng + ?Sized>(
        size: BoardSize,
        mines: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        if size.height == 0 || size.width == 0 {
            return Err(BoardError::EmptyBoard);
        }
        if mines > size.total_cells() {
            return Err(BoardError::TooManyMines {
                mines,
                cells: size.total_cells(),
            });
        }
        let mut placed = HashSet::with_capacity(mines);
        while placed.len() != mines {
            placed.insert((rng.gen_range(0..size.height), rng.gen_range(0..size.width)));
        }
        Ok(Self {
            size,
            mines: placed,
            mines_found: HashSet::new(),
        })
    }

    /// Build a board from an ASCII-encoded layout, where:
    /// - `*` is a mine
    /// - `.` is a clear cell
    /// - Trailing or leading whitespace is ignored
    ///
    /// # Errors
    ///
    /// If the layout is empty, not rectangular, or contains any other
    /// character.
    pub fn from_layout(encoded: &str) -> Result<Self, BoardError> {
        let lines = encoded.trim().lines().map(str::trim).collect::<Vec<_>>();
        let width = lines.first().map_or(0, |line| line.chars().count());
        if width == 0 {
            return Err(BoardError::EmptyBoard);
        }
        let mut mines = HashSet::new();
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(BoardError::RaggedRow {
                    row,
                    found,
                    expected: width,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '*' => {
                        mines.insert((row, col));
                    },
                    '.' => (),
                    _ => return Err(BoardError::InvalidCharacter { ch, row, col }),
                }
            }
        }
        Ok(Self {
            size: BoardSize::new(lines.len(), width),
            mines,
            mines_found: HashSet::new(),
        })
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    pub fn mines_found(&self) -> &HashSet<Cell> {
        &self.mines_found
    }

    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// The number of mines adjacent to `cell`, not counting `cell` itself
    pub fn nearby_mines(&self, cell: Cell) -> usize {
        self.size
            .neighbours(cell)
            .filter(|neighbour| self.is_mine(*neighbour))
            .count()
    }

    /// Flag `cell` as a mine
    pub fn flag(&mut self, cell: Cell) {
        self.mines_found.insert(cell);
    }

    /// Has every mine, and nothing else, been flagged?
    pub fn won(&self) -> bool {
        self.mines_found == self.mines
    }
}
impl fmt::Display for Minesweeper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = format!("{}-", "--".repeat(self.size.width));
        for row in 0..self.size.height {
            writeln!(f, "{rule}")?;
            for col in 0..self.size.width {
                f.write_str(if self.is_mine((row, col)) { "|X" } else { "| " })?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_from_layout() {
        let game = Minesweeper::from_layout(
            "
            *..
            .*.
            ",
        )
        .unwrap();
        assert_eq!(game.size(), BoardSize::new(2, 3));
        assert_eq!(game.mines(), &HashSet::from([(0, 0), (1, 1)]));
        assert!(game.is_mine((1, 1)));
        assert!(!game.is_mine((0, 1)));
    }

    #[test]
    fn test_layout_errors() {
        assert_eq!(Minesweeper::from_layout("  \n "), Err(BoardError::EmptyBoard));
        assert_eq!(
            Minesweeper::from_layout("..\n...").unwrap_err(),
            BoardError::RaggedRow {
                row: 1,
                found: 3,
                expected: 2
            }
        );
        assert_eq!(
            Minesweeper::from_layout("..\n.x").unwrap_err(),
            BoardError::InvalidCharacter {
                ch: 'x',
                row: 1,
                col: 1
            }
        );
    }

    #[test]
    fn test_nearby_mines() {
        let game = Minesweeper::from_layout(
            "
            *.*
            ...
            **.
            ",
        )
        .unwrap();
        assert_eq!(game.nearby_mines((1, 1)), 4);
        assert_eq!(game.nearby_mines((0, 1)), 2);
        // A mine doesn't count itself
        assert_eq!(game.nearby_mines((0, 0)), 0);
        assert_eq!(game.nearby_mines((2, 2)), 1);
    }

    #[test]
    fn test_random_placement() {
        let mut rng = StdRng::seed_from_u64(3);
        let game = Minesweeper::new(BoardSize::new(8, 8), 8, &mut rng).unwrap();
        assert_eq!(game.mines().len(), 8);
        assert!(game.mines().iter().all(|&cell| game.size().contains(cell)));

        let full = Minesweeper::new(BoardSize::new(2, 2), 4, &mut rng).unwrap();
        assert_eq!(full.mines().len(), 4);
    }

    #[test]
    fn test_placement_errors() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Minesweeper::new(BoardSize::new(2, 2), 5, &mut rng),
            Err(BoardError::TooManyMines { mines: 5, cells: 4 })
        );
        assert_eq!(
            Minesweeper::new(BoardSize::new(0, 4), 0, &mut rng),
            Err(BoardError::EmptyBoard)
        );
    }

    #[test]
    fn test_won() {
        let mut game = Minesweeper::from_layout("*.\n.*").unwrap();
        assert!(!game.won());
        game.flag((0, 0));
        assert!(!game.won());
        game.flag((1, 1));
        assert!(game.won());
    }

    #[test]
    fn test_display() {
        let game = Minesweeper::from_layout("*.\n..").unwrap();
        assert_eq!(game.to_string(), "-----\n|X| |\n-----\n| | |\n-----");
    }
}
