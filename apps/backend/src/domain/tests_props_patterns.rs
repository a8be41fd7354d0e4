//! Property tests for the pattern matching engine (pure domain, no DB).
//!
//! Properties tested:
//! - A blackout card satisfies every simple pattern
//! - A card with only the free cell satisfies no simple pattern and no
//!   threshold pattern above one
//! - Adding marks never un-matches a pattern
//! - A returned witness is always fully marked

use proptest::prelude::*;

use crate::domain::grid::{CellSet, CELL_COUNT};
use crate::domain::matching::evaluate;
use crate::domain::patterns::{PatternName, PatternRule};

fn marked_cells() -> impl Strategy<Value = CellSet> {
    prop::collection::vec(0u8..CELL_COUNT, 0..25)
        .prop_map(|cells| cells.into_iter().collect::<CellSet>().union(CellSet::FREE))
}

fn pattern() -> impl Strategy<Value = PatternName> {
    prop::sample::select(PatternName::ALL.to_vec())
}

#[test]
fn blackout_matches_every_simple_pattern() {
    for name in PatternName::ALL {
        if matches!(name.rule(), PatternRule::Simple { .. }) {
            assert!(evaluate(CellSet::FULL, name).is_some(), "{name} should match");
        }
    }
}

#[test]
fn free_cell_alone_matches_nothing_meaningful() {
    for name in PatternName::ALL {
        match name.rule() {
            PatternRule::Simple { .. } | PatternRule::Composite(_) => {
                assert!(evaluate(CellSet::FREE, name).is_none(), "{name} should not match");
            }
            PatternRule::Meta { threshold } if *threshold > 1 => {
                assert!(evaluate(CellSet::FREE, name).is_none(), "{name} should not match");
            }
            PatternRule::Meta { .. } => {}
        }
    }
}

proptest! {
    #[test]
    fn prop_more_marks_never_unmatch(
        base in marked_cells(),
        extra in marked_cells(),
        name in pattern(),
    ) {
        if evaluate(base, name).is_some() {
            prop_assert!(evaluate(base.union(extra), name).is_some());
        }
    }

    #[test]
    fn prop_witness_is_marked(marked in marked_cells(), name in pattern()) {
        if let Some(found) = evaluate(marked, name) {
            if let Some(witness) = found.witness {
                prop_assert!(witness.is_subset_of(marked));
            }
        }
    }

    #[test]
    fn prop_each_variation_matches_itself(name in pattern()) {
        if let PatternRule::Simple { variations } = name.rule() {
            for v in variations {
                let marked = v.union(CellSet::FREE);
                let found = evaluate(marked, name);
                prop_assert!(found.is_some());
                prop_assert!(found.unwrap().witness.unwrap().is_subset_of(marked));
            }
        }
    }
}
