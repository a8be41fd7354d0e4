//! Pattern matching engine: a pure function of marked cells and a pattern.

use crate::domain::grid::CellSet;
use crate::domain::patterns::{lines, CompositeRule, PatternName, PatternRule, CORNERS, CORNER_SQUARES};

/// Result of a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch {
    pub pattern: PatternName,
    /// Cells that satisfied the pattern. `None` for threshold patterns, which
    /// have no fixed shape to compare against.
    pub witness: Option<CellSet>,
}

impl PatternMatch {
    /// True when the marked playable cells are exactly the witness cells.
    pub fn is_exact(&self, marked: CellSet) -> bool {
        match self.witness {
            Some(witness) => marked.playable() == witness.playable(),
            None => false,
        }
    }
}

/// Evaluate one pattern against a marked-cell set.
pub fn evaluate(marked: CellSet, pattern: PatternName) -> Option<PatternMatch> {
    let witness = match pattern.rule() {
        PatternRule::Simple { variations } => {
            Some(first_marked(marked, variations.iter().copied())?)
        }
        PatternRule::Meta { threshold } if marked.playable().len() >= *threshold => None,
        PatternRule::Meta { .. } => return None,
        PatternRule::Composite(rule) => Some(evaluate_composite(marked, *rule)?),
    };
    Some(PatternMatch { pattern, witness })
}

/// Every registered pattern the marked cells satisfy.
pub fn matching_patterns(marked: CellSet) -> Vec<PatternMatch> {
    PatternName::ALL
        .into_iter()
        .filter_map(|p| evaluate(marked, p))
        .collect()
}

fn first_marked(marked: CellSet, variations: impl IntoIterator<Item = CellSet>) -> Option<CellSet> {
    variations.into_iter().find(|v| v.is_subset_of(marked))
}

fn evaluate_composite(marked: CellSet, rule: CompositeRule) -> Option<CellSet> {
    match rule {
        CompositeRule::AnyCornerSquare => first_marked(marked, CORNER_SQUARES),
        CompositeRule::AnyLineOrCorner => {
            let line = first_marked(marked, lines())?;
            let corner = CORNERS.into_iter().find(|c| marked.contains(*c))?;
            Some(line.union(CellSet::of(&[corner])))
        }
        CompositeRule::AnyTwoLinesOrCorners => {
            // Lines first, then single corners; the first two components form the witness.
            let components: Vec<CellSet> = lines()
                .into_iter()
                .filter(|l| l.is_subset_of(marked))
                .chain(
                    CORNERS
                        .into_iter()
                        .filter(|c| marked.contains(*c))
                        .map(|c| CellSet::of(&[c])),
                )
                .take(2)
                .collect();
            match components.as_slice() {
                [a, b] => Some(a.union(*b)),
                _ => None,
            }
        }
    }
}
