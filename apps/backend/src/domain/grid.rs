//! 5×5 bingo grid addressing.
//!
//! A cell `(letter, row)` maps to a flat index in `0..25`: the letter block is
//! the outer coordinate and the row the inner one, so column `B` occupies
//! indices `0..5`, `I` occupies `5..10`, and so on. The free cell `(N, 3)` is
//! index 12.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const GRID_SIZE: u8 = 5;
pub const CELL_COUNT: u8 = GRID_SIZE * GRID_SIZE;
pub const FREE_CELL: u8 = 12;

/// Column letter of a bingo card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    B,
    I,
    N,
    G,
    O,
}

impl Letter {
    pub const ALL: [Letter; 5] = [Letter::B, Letter::I, Letter::N, Letter::G, Letter::O];

    pub fn ordinal(self) -> u8 {
        match self {
            Letter::B => 0,
            Letter::I => 1,
            Letter::N => 2,
            Letter::G => 3,
            Letter::O => 4,
        }
    }

    /// Inclusive range of numbers printed under this letter (B 1-15 … O 61-75).
    pub fn number_range(self) -> std::ops::RangeInclusive<u8> {
        let lo = self.ordinal() * 15 + 1;
        lo..=lo + 14
    }

    /// Letter whose column a called number belongs to.
    pub fn for_number(number: u8) -> Option<Letter> {
        if !(1..=75).contains(&number) {
            return None;
        }
        Some(Self::ALL[((number - 1) / 15) as usize])
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Letter::B => 'B',
            Letter::I => 'I',
            Letter::N => 'N',
            Letter::G => 'G',
            Letter::O => 'O',
        };
        write!(f, "{c}")
    }
}

/// A single addressed cell. `row` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub letter: Letter,
    pub row: u8,
}

impl CellPos {
    pub fn new(letter: Letter, row: u8) -> Option<Self> {
        (1..=GRID_SIZE).contains(&row).then_some(Self { letter, row })
    }

    pub fn index(self) -> u8 {
        self.letter.ordinal() * GRID_SIZE + (self.row - 1)
    }

    pub fn from_index(index: u8) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }
        Some(Self {
            letter: Letter::ALL[(index / GRID_SIZE) as usize],
            row: index % GRID_SIZE + 1,
        })
    }

    pub fn is_free(self) -> bool {
        self.index() == FREE_CELL
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.row)
    }
}

/// Set of grid cells stored as a 25-bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellSet(u32);

impl CellSet {
    pub const EMPTY: CellSet = CellSet(0);
    pub const FULL: CellSet = CellSet((1 << CELL_COUNT) - 1);
    pub const FREE: CellSet = CellSet(1 << FREE_CELL);

    /// Builds a set from flat indices. Out-of-range indices are ignored.
    pub const fn of(indices: &[u8]) -> CellSet {
        let mut bits = 0u32;
        let mut i = 0;
        while i < indices.len() {
            if indices[i] < CELL_COUNT {
                bits |= 1 << indices[i];
            }
            i += 1;
        }
        CellSet(bits)
    }

    /// Every cell in the given row (1-based).
    pub const fn row(row: u8) -> CellSet {
        let r = row - 1;
        CellSet::of(&[r, r + 5, r + 10, r + 15, r + 20])
    }

    /// Every cell under the given letter.
    pub const fn column(letter_ordinal: u8) -> CellSet {
        let base = letter_ordinal * GRID_SIZE;
        CellSet::of(&[base, base + 1, base + 2, base + 3, base + 4])
    }

    pub const fn union(self, other: CellSet) -> CellSet {
        CellSet(self.0 | other.0)
    }

    pub const fn without(self, other: CellSet) -> CellSet {
        CellSet(self.0 & !other.0)
    }

    pub const fn intersection(self, other: CellSet) -> CellSet {
        CellSet(self.0 & other.0)
    }

    pub fn insert(&mut self, index: u8) {
        if index < CELL_COUNT {
            self.0 |= 1 << index;
        }
    }

    pub fn contains(self, index: u8) -> bool {
        index < CELL_COUNT && self.0 & (1 << index) != 0
    }

    pub fn is_subset_of(self, other: CellSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Cells other than the free centre.
    pub fn playable(self) -> CellSet {
        self.without(CellSet::FREE)
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..CELL_COUNT).filter(move |i| self.contains(*i))
    }
}

impl FromIterator<u8> for CellSet {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut set = CellSet::EMPTY;
        for i in iter {
            set.insert(i);
        }
        set
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().filter_map(CellPos::from_index).map(|p| p.to_string()))
            .finish()
    }
}
