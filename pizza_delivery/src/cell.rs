use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use crate::bitset::bitset_traits;

/// The board is always `BOARD_SIZE` x `BOARD_SIZE` cells.
pub const BOARD_SIZE: u8 = 7;

const NUM_CELLS: u8 = BOARD_SIZE * BOARD_SIZE;

const VALID_BITS: u64 = (1u64 << NUM_CELLS) - 1;

/// A single cell on the board.
///
/// Rows grow downwards and columns grow to the right, both starting at 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    /// Where all teams start.
    pub const CENTER: Cell = Cell {
        row: BOARD_SIZE / 2,
        col: BOARD_SIZE / 2,
    };

    /// Returns `None` if the coordinates are outside of the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        let cell = Cell { row, col };
        cell.is_in_bounds().then_some(cell)
    }

    pub fn is_in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    pub fn is_center(self) -> bool {
        self == Self::CENTER
    }

    /// The number of king moves needed to get from one cell to the other.
    pub fn chebyshev_distance(self, other: Cell) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Exactly one step away, diagonals included.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.chebyshev_distance(other) == 1
    }

    /// The up to eight cells around this one that are on the board.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        (-1i8..=1)
            .flat_map(|dr| (-1i8..=1).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| (dr, dc) != (0, 0))
            .filter_map(move |(dr, dc)| {
                let row = self.row.checked_add_signed(dr)?;
                let col = self.col.checked_add_signed(dc)?;
                Cell::new(row, col)
            })
    }

    /// Iterates over the whole board in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..NUM_CELLS).map(Cell::from_index)
    }

    pub(crate) fn to_index(self) -> u8 {
        debug_assert!(self.is_in_bounds());
        self.row * BOARD_SIZE + self.col
    }

    pub(crate) fn from_index(idx: u8) -> Self {
        debug_assert!(idx < NUM_CELLS);
        Cell {
            row: idx / BOARD_SIZE,
            col: idx % BOARD_SIZE,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A compact set of [`Cell`]s.
///
/// Like the rest of the game state, this is an immutable `Copy` type:
/// `insert` and `remove` return a new set.
///
/// ```
/// use pizza_delivery::{Cell, CellSet};
/// let set = CellSet::new().insert(Cell::CENTER).insert(Cell { row: 0, col: 1 });
/// assert_eq!(Vec::from_iter(set), vec![Cell { row: 0, col: 1 }, Cell::CENTER]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSet {
    // Only the low 49 bits are used.
    bits: u64,
}

bitset_traits!(CellSet, VALID_BITS);

impl CellSet {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    /// Every cell on the board.
    pub fn full() -> Self {
        Self { bits: VALID_BITS }
    }

    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn contains(self, cell: Cell) -> bool {
        (self.bits & (1u64 << cell.to_index())) != 0
    }

    #[must_use]
    pub fn insert(self, cell: Cell) -> Self {
        Self {
            bits: self.bits | (1u64 << cell.to_index()),
        }
    }

    #[must_use]
    pub fn remove(self, cell: Cell) -> Self {
        Self {
            bits: self.bits & !(1u64 << cell.to_index()),
        }
    }

    /// The cells of `self` that are not in `other`.
    #[must_use]
    pub fn difference(self, other: CellSet) -> Self {
        self & !other
    }

    /// The `n`-th cell in row-major order, if there are that many.
    pub fn nth(self, n: usize) -> Option<Cell> {
        self.into_iter().nth(n)
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        let mut bits = 0;
        for cell in iter {
            bits |= 1u64 << cell.to_index();
        }
        Self { bits }
    }
}

impl IntoIterator for CellSet {
    type Item = Cell;

    type IntoIter = CellSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CellSetIter { bits: self.bits }
    }
}

/// Iterator for a [`CellSet`] that returns cells in row-major order.
#[derive(Clone, Copy, Debug)]
pub struct CellSetIter {
    bits: u64,
}

impl Iterator for CellSetIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let idx = self.bits.trailing_zeros() as u8;
            self.bits ^= 1u64 << idx;
            Some(Cell::from_index(idx))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for CellSetIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for CellSetIter {}
