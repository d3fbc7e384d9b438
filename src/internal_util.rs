use std::cmp::min;

use itertools::Itertools;

use crate::infer::{BoardSize, Cell};

/// Cells adjacent to `(row, col)`, clipped to the board and excluding the cell
/// itself
pub(crate) fn adjacent(
    (row, col): Cell,
    size: BoardSize,
) -> impl Iterator<Item = Cell> {
    // An empty range on either axis leaves nothing to visit
    let rows = row.saturating_sub(1)..min(row + 2, size.height);
    let cols = col.saturating_sub(1)..min(col + 2, size.width);
    rows.cartesian_product(cols)
        .filter(move |&other| other != (row, col))
}

/// Split `cells` into those whose status is still unknown, and the number of
/// them already known to be mines.
///
/// Cells for which `is_safe` holds are dropped silently.
pub(crate) fn undetermined(
    cells: impl IntoIterator<Item = Cell>,
    is_mine: impl Fn(&Cell) -> bool,
    is_safe: impl Fn(&Cell) -> bool,
) -> (Vec<Cell>, usize) {
    let mut known_mines = 0;
    let unknown = cells
        .into_iter()
        .filter(|cell| {
            if is_mine(cell) {
                known_mines += 1;
                false
            } else {
                !is_safe(cell)
            }
        })
        .collect();
    (unknown, known_mines)
}
