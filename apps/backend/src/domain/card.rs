//! Player cards and called numbers.

use std::collections::BTreeSet;

use crate::domain::grid::{CellPos, CellSet, CELL_COUNT, FREE_CELL};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

/// Stored marker for the free centre cell.
pub const FREE_MARKER: u8 = 0;

/// A 5×5 card: 24 numbers plus the free centre, in flat grid order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    cells: [u8; CELL_COUNT as usize],
}

impl Card {
    /// Builds a card from 25 stored cells (`0` marks the free centre).
    ///
    /// Cards are persisted by another system, so a malformed layout is
    /// reported as data corruption rather than a caller mistake.
    pub fn from_cells(cells: &[u8]) -> Result<Self, DomainError> {
        let corrupt = |detail: String| DomainError::infra(InfraErrorKind::DataCorruption, detail);

        let cells: [u8; CELL_COUNT as usize] = cells
            .try_into()
            .map_err(|_| corrupt(format!("card has {} cells, expected 25", cells.len())))?;

        let mut seen = BTreeSet::new();
        for (index, number) in cells.iter().copied().enumerate() {
            let pos = CellPos::from_index(index as u8)
                .ok_or_else(|| corrupt(format!("cell index {index} out of range")))?;
            if pos.is_free() {
                if number != FREE_MARKER {
                    return Err(corrupt(format!("free cell {pos} holds number {number}")));
                }
                continue;
            }
            if !pos.letter.number_range().contains(&number) {
                return Err(corrupt(format!(
                    "number {number} at {pos} is outside column {}",
                    pos.letter
                )));
            }
            if !seen.insert(number) {
                return Err(corrupt(format!("number {number} appears twice")));
            }
        }

        Ok(Self { cells })
    }

    pub fn number_at(&self, pos: CellPos) -> Option<u8> {
        let n = self.cells[pos.index() as usize];
        (n != FREE_MARKER).then_some(n)
    }

    /// The 24 playable numbers.
    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().copied().filter(|n| *n != FREE_MARKER)
    }

    /// Marked cells for the given calls; the free cell is always marked.
    pub fn marked_cells(&self, called: &CalledNumbers) -> CellSet {
        let mut marked = CellSet::FREE;
        for (index, number) in self.cells.iter().enumerate() {
            if index as u8 != FREE_CELL && called.contains(*number) {
                marked.insert(index as u8);
            }
        }
        marked
    }

    /// How many of the card's playable numbers have been called.
    pub fn hits(&self, called: &CalledNumbers) -> usize {
        self.numbers().filter(|n| called.contains(*n)).count()
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

/// Numbers drawn so far in a round, in call order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalledNumbers {
    order: Vec<u8>,
    set: BTreeSet<u8>,
}

impl CalledNumbers {
    pub fn new(numbers: &[u8]) -> Result<Self, DomainError> {
        let mut called = Self::default();
        for &n in numbers {
            if !(1..=75).contains(&n) {
                return Err(DomainError::validation(
                    ValidationKind::CalledNumberOutOfRange,
                    format!("called number {n} is outside 1..=75"),
                ));
            }
            if !called.set.insert(n) {
                return Err(DomainError::validation(
                    ValidationKind::DuplicateCalledNumber,
                    format!("number {n} was called twice"),
                ));
            }
            called.order.push(n);
        }
        Ok(called)
    }

    pub fn contains(&self, number: u8) -> bool {
        self.set.contains(&number)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.order
    }
}
