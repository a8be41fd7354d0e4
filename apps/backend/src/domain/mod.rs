//! Domain layer: pure bingo logic with no I/O.

pub mod card;
pub mod claims;
pub mod economics;
pub mod fixtures;
pub mod grid;
pub mod matching;
pub mod patterns;
pub mod roster;

#[cfg(test)]
mod tests_claims;
#[cfg(test)]
mod tests_props_patterns;

// Re-exports for ergonomics
pub use card::{CalledNumbers, Card};
pub use claims::{Combinator, WinCondition};
pub use economics::RoundEconomics;
pub use grid::{CellPos, CellSet, Letter};
pub use patterns::PatternName;
pub use roster::CardRoster;
