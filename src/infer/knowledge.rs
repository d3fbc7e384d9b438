use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::infer::{BoardSize, Cell, Sentence};
use crate::internal_util::undetermined;

/// The inference engine for a single game.
///
/// Holds every [`Sentence`] accepted as true so far, and the facts derived
/// from them. The only way in is [`KnowledgeBase::record_clue`]; the only ways
/// out are the two move queries and the read-only accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnowledgeBase {
    size: BoardSize,
    /// Cells the driver has been told to probe
    moves_made: HashSet<Cell>,
    /// Cells proven not to be mines
    safes: HashSet<Cell>,
    /// Cells proven to be mines
    mines: HashSet<Cell>,
    /// Accepted sentences, in insertion order
    knowledge: Vec<Sentence>,
}
impl KnowledgeBase {
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            moves_made: HashSet::new(),
            safes: HashSet::new(),
            mines: HashSet::new(),
            knowledge: Vec::new(),
        }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn moves_made(&self) -> &HashSet<Cell> {
        &self.moves_made
    }

    pub fn safes(&self) -> &HashSet<Cell> {
        &self.safes
    }

    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    /// Record `cell` as a mine, everywhere it appears
    pub fn mark_mine(&mut self, cell: Cell) {
        debug_assert!(
            !self.safes.contains(&cell),
            "{cell:?} is already known to be safe"
        );
        if self.mines.insert(cell) {
            trace!(?cell, "mine");
        }
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell);
        }
    }

    /// Record `cell` as safe, everywhere it appears
    pub fn mark_safe(&mut self, cell: Cell) {
        debug_assert!(
            !self.mines.contains(&cell),
            "{cell:?} is already known to be a mine"
        );
        if self.safes.insert(cell) {
            trace!(?cell, "safe");
        }
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell);
        }
    }

    /// Accept the board's report that `count` of `cell`'s neighbours are
    /// mines, and draw every conclusion that follows.
    ///
    /// Must be called exactly once per probed cell.
    pub fn record_clue(&mut self, cell: Cell, count: usize) {
        debug_assert!(self.size.contains(cell), "{cell:?} is off the board");
        debug_assert!(
            !self.moves_made.contains(&cell),
            "{cell:?} has already been probed"
        );
        self.moves_made.insert(cell);
        self.mark_safe(cell);

        let sentence = self.normalised(self.size.neighbours(cell), count);
        debug!(?cell, %sentence, "recorded clue");
        self.knowledge.push(sentence);

        self.close();
    }

    /// Build a sentence from `cells`, removing every cell whose status is
    /// already known and discounting the known mines from `count`
    fn normalised(&self, cells: impl IntoIterator<Item = Cell>, count: usize) -> Sentence {
        let (cells, known_mines) = undetermined(
            cells,
            |cell| self.mines.contains(cell),
            |cell| self.safes.contains(cell),
        );
        debug_assert!(known_mines <= count, "More known mines than the clue allows");
        Sentence::new(cells, count.saturating_sub(known_mines))
    }

    /// Alternate fact extraction and subset inference until neither finds
    /// anything new
    fn close(&mut self) {
        let mut rounds = 0;
        loop {
            rounds += 1;
            let absorbed = self.absorb_facts();
            let derived = self.derive_subsets();
            if !absorbed && !derived {
                break;
            }
        }
        debug!(
            rounds,
            sentences = self.knowledge.len(),
            mines = self.mines.len(),
            safes = self.safes.len(),
            "knowledge closed"
        );
    }

    /// Mark every cell that some sentence pins down, repeating until no
    /// sentence pins down anything new. Returns whether anything was marked.
    fn absorb_facts(&mut self) -> bool {
        let mut changed = false;
        loop {
            let mut mines = HashSet::new();
            let mut safes = HashSet::new();
            for sentence in &self.knowledge {
                mines.extend(sentence.known_mines());
                safes.extend(sentence.known_safes());
            }
            mines.retain(|cell| !self.mines.contains(cell));
            safes.retain(|cell| !self.safes.contains(cell));
            if mines.is_empty() && safes.is_empty() {
                return changed;
            }
            changed = true;
            for cell in mines {
                self.mark_mine(cell);
            }
            for cell in safes {
                self.mark_safe(cell);
            }
        }
    }

    /// For every pair of sentences where one's cells are contained in the
    /// other's, add the difference as a new sentence. Returns whether any
    /// sentence was added.
    fn derive_subsets(&mut self) -> bool {
        let mut derived = Vec::new();
        for (i, sub) in self.knowledge.iter().enumerate() {
            if sub.is_empty() {
                // Subtracting nothing reproduces the superset
                continue;
            }
            for (j, sup) in self.knowledge.iter().enumerate() {
                if i == j || sub == sup || !sub.is_subset_of(sup) {
                    continue;
                }
                let Some(count) = sup.count().checked_sub(sub.count()) else {
                    debug_assert!(false, "{sub} is not consistent with {sup}");
                    continue;
                };
                let cells = sup.cells().difference(sub.cells()).copied();
                derived.push(self.normalised(cells, count));
            }
        }

        let mut changed = false;
        for sentence in derived {
            if !self.knowledge.contains(&sentence) {
                debug!(%sentence, "derived");
                self.knowledge.push(sentence);
                changed = true;
            }
        }
        changed
    }

    /// The first cell in row-major order known to be safe but not yet probed
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.size
            .cells()
            .find(|cell| self.safes.contains(cell) && !self.moves_made.contains(cell))
    }

    /// A uniformly random cell that has not been probed and is not a known
    /// mine
    pub fn make_random_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        let candidates: Vec<_> = self
            .size
            .cells()
            .filter(|cell| !self.mines.contains(cell) && !self.moves_made.contains(cell))
            .collect();
        candidates.choose(rng).copied()
    }
}
