//! Deterministic card layouts shared by unit and integration tests.

use crate::domain::grid::{CellSet, FREE_CELL};

/// Column-ordered sample card:
/// B 1-5, I 16-20, N 31,32,free,33,34, G 46-50, O 61-65.
pub fn sample_card_cells() -> Vec<u8> {
    vec![
        1, 2, 3, 4, 5, //
        16, 17, 18, 19, 20, //
        31, 32, 0, 33, 34, //
        46, 47, 48, 49, 50, //
        61, 62, 63, 64, 65,
    ]
}

/// Numbers of the sample card that sit on the given cells (free cell skipped).
pub fn sample_numbers_for(cells: CellSet) -> Vec<u8> {
    let layout = sample_card_cells();
    cells
        .iter()
        .filter(|i| *i != FREE_CELL)
        .map(|i| layout[i as usize])
        .collect()
}

/// Numbers that never appear on the sample card, usable as filler calls.
pub fn sample_misses() -> Vec<u8> {
    let layout = sample_card_cells();
    (1..=75).filter(|n| !layout.contains(n)).collect()
}
