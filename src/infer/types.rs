use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;

/// A board position, as `(row, col)`.
pub type Cell = (usize, usize);

/// The fixed dimensions of a board.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSize {
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
}
impl BoardSize {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    pub fn total_cells(&self) -> usize {
        self.height * self.width
    }

    pub fn contains(&self, (row, col): Cell) -> bool {
        row < self.height && col < self.width
    }

    /// Every cell on the board, in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        (0..self.height).cartesian_product(0..self.width)
    }

    /// The in-bounds cells a king's move away from `cell` (never `cell`
    /// itself)
    pub fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> {
        crate::internal_util::adjacent(cell, *self)
    }
}

/// A logical statement about the board: exactly `count` of `cells` are mines.
///
/// `cells` only ever holds cells whose status is still undetermined; as facts
/// become known the engine strips them out via [`Sentence::mark_mine`] and
/// [`Sentence::mark_safe`], so a sentence only ever shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sentence {
    #[cfg(test)]
    pub cells: HashSet<Cell>,
    #[cfg(not(test))]
    /// The cells this statement talks about
    cells: HashSet<Cell>,
    #[cfg(test)]
    pub count: usize,
    #[cfg(not(test))]
    /// How many of `cells` are mines
    count: usize,
}
impl Sentence {
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Self {
        let cells: HashSet<_> = cells.into_iter().collect();
        debug_assert!(
            count <= cells.len(),
            "Sentence with more mines than cells"
        );
        Self { cells, count }
    }

    pub fn cells(&self) -> &HashSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// An empty sentence asserts `0 = 0` and carries no information
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every cell is a mine if the count covers all of them.
    ///
    /// An empty sentence yields nothing.
    pub fn known_mines(&self) -> HashSet<Cell> {
        if self.count > 0 && self.count == self.cells.len() {
            self.cells.clone()
        } else {
            HashSet::new()
        }
    }

    /// Every cell is safe if the count is zero
    pub fn known_safes(&self) -> HashSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            HashSet::new()
        }
    }

    pub fn mark_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            debug_assert!(self.count > 0, "Mine marked in a sentence with no mines left");
            self.count = self.count.saturating_sub(1);
        }
    }

    pub fn mark_safe(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            debug_assert!(
                self.count <= self.cells.len(),
                "Safe cell marked in a sentence that needs all its cells to be mines"
            );
        }
    }

    /// Is this sentence's cell set contained within `other`'s?
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.cells.is_subset(&other.cells)
    }
}
impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}} = {}",
            self.cells
                .iter()
                .sorted()
                .map(|(row, col)| format!("({row}, {col})"))
                .join(", "),
            self.count
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_full_sentence_is_all_mines() {
        let sentence = Sentence::new([(0, 1), (1, 1)], 2);
        assert_eq!(sentence.known_mines(), HashSet::from([(0, 1), (1, 1)]));
        assert!(sentence.known_safes().is_empty());
    }

    #[test]
    fn test_zero_sentence_is_all_safe() {
        let sentence = Sentence::new([(0, 1), (1, 1), (1, 0)], 0);
        assert_eq!(
            sentence.known_safes(),
            HashSet::from([(0, 1), (1, 1), (1, 0)])
        );
        assert!(sentence.known_mines().is_empty());
    }

    #[test]
    fn test_partial_sentence_knows_nothing() {
        let sentence = Sentence::new([(0, 1), (1, 1), (1, 0)], 2);
        assert!(sentence.known_mines().is_empty());
        assert!(sentence.known_safes().is_empty());
    }

    #[test]
    fn test_empty_sentence() {
        let sentence = Sentence::new([], 0);
        assert!(sentence.is_empty());
        assert!(sentence.known_mines().is_empty());
        assert!(sentence.known_safes().is_empty());
    }

    #[test]
    fn test_mark_mine() {
        let mut sentence = Sentence::new([(0, 0), (0, 1), (0, 2)], 2);
        sentence.mark_mine((0, 1));
        assert_eq!(sentence, Sentence::new([(0, 0), (0, 2)], 1));
        // Second time is a no-op
        sentence.mark_mine((0, 1));
        assert_eq!(sentence, Sentence::new([(0, 0), (0, 2)], 1));
        // As is a cell the sentence never held
        sentence.mark_mine((5, 5));
        assert_eq!(sentence, Sentence::new([(0, 0), (0, 2)], 1));
    }

    #[test]
    fn test_mark_safe() {
        let mut sentence = Sentence::new([(0, 0), (0, 1), (0, 2)], 1);
        sentence.mark_safe((0, 0));
        assert_eq!(sentence, Sentence::new([(0, 1), (0, 2)], 1));
        sentence.mark_safe((0, 0));
        assert_eq!(sentence, Sentence::new([(0, 1), (0, 2)], 1));
        assert!(sentence.count <= sentence.cells.len());
    }

    #[test]
    fn test_equality_ignores_order() {
        assert_eq!(
            Sentence::new([(2, 2), (1, 1), (0, 0)], 1),
            Sentence::new([(0, 0), (1, 1), (2, 2)], 1),
        );
        assert_ne!(
            Sentence::new([(0, 0), (1, 1)], 1),
            Sentence::new([(0, 0), (1, 1)], 2),
        );
    }

    #[test]
    fn test_display() {
        let sentence = Sentence::new([(1, 0), (0, 1)], 1);
        assert_eq!(sentence.to_string(), "{(0, 1), (1, 0)} = 1");
    }

    #[test]
    fn test_neighbours_clip_to_bounds() {
        let size = BoardSize::new(3, 4);
        assert_eq!(
            size.neighbours((0, 0)).sorted().collect_vec(),
            vec![(0, 1), (1, 0), (1, 1)]
        );
        assert_eq!(size.neighbours((1, 1)).count(), 8);
        assert_eq!(
            size.neighbours((2, 3)).sorted().collect_vec(),
            vec![(1, 2), (1, 3), (2, 2)]
        );
        assert_eq!(BoardSize::new(1, 1).neighbours((0, 0)).count(), 0);
    }

    #[test]
    fn test_cells_row_major() {
        let size = BoardSize::new(2, 2);
        assert_eq!(
            size.cells().collect_vec(),
            vec![(0, 0), (0, 1), (1, 0), (1, 1)]
        );
    }
}
