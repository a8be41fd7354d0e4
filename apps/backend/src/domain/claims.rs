//! Claim evaluation: win conditions, the bad-bingo rule and bonus planning.
//!
//! Everything here is pure; the win-check service decides what to persist.

use serde::{Deserialize, Serialize};

use crate::domain::card::{CalledNumbers, Card};
use crate::domain::grid::CellSet;
use crate::domain::matching::{evaluate, PatternMatch};
use crate::domain::patterns::PatternName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    And,
    Or,
}

/// Pattern(s) a card must satisfy to win the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinCondition {
    pub primary: PatternName,
    pub secondary: Option<(Combinator, PatternName)>,
}

impl WinCondition {
    pub fn single(primary: PatternName) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn and(primary: PatternName, other: PatternName) -> Self {
        Self {
            primary,
            secondary: Some((Combinator::And, other)),
        }
    }

    pub fn or(primary: PatternName, other: PatternName) -> Self {
        Self {
            primary,
            secondary: Some((Combinator::Or, other)),
        }
    }
}

/// Outcome of checking one card against the calls so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub won: bool,
    pub matches: Vec<PatternMatch>,
    pub bad_bingo: bool,
    /// Marked playable cells equal the winning shape exactly.
    pub exact: bool,
    pub marked: CellSet,
}

impl ClaimOutcome {
    pub fn matched_patterns(&self) -> Vec<PatternName> {
        self.matches.iter().map(|m| m.pattern).collect()
    }
}

/// Evaluate a claim. `bad_bingo_calls` is `Some(n)` when the house accepts a
/// card with zero hits after exactly `n` calls as a win.
pub fn evaluate_claim(
    card: &Card,
    called: &CalledNumbers,
    condition: &WinCondition,
    bad_bingo_calls: Option<usize>,
) -> ClaimOutcome {
    let marked = card.marked_cells(called);
    let primary = evaluate(marked, condition.primary);

    let (won, matches, exact) = match condition.secondary {
        None => {
            let exact = primary.is_some_and(|m| m.is_exact(marked));
            (primary.is_some(), primary.into_iter().collect(), exact)
        }
        Some((Combinator::And, other)) => match (primary, evaluate(marked, other)) {
            (Some(a), Some(b)) => {
                let exact = match (a.witness, b.witness) {
                    (Some(wa), Some(wb)) => marked.playable() == wa.union(wb).playable(),
                    _ => false,
                };
                (true, vec![a, b], exact)
            }
            _ => (false, Vec::new(), false),
        },
        Some((Combinator::Or, other)) => {
            let found: Vec<PatternMatch> = primary.into_iter().chain(evaluate(marked, other)).collect();
            let exact = found.iter().any(|m| m.is_exact(marked));
            (!found.is_empty(), found, exact)
        }
    };

    if !won {
        if let Some(calls) = bad_bingo_calls {
            if called.len() == calls && card.hits(called) == 0 {
                return ClaimOutcome {
                    won: true,
                    matches: Vec::new(),
                    bad_bingo: true,
                    exact: false,
                    marked,
                };
            }
        }
    }

    ClaimOutcome {
        won,
        matches,
        bad_bingo: false,
        exact,
        marked,
    }
}

/// Fixed bonus paid for an exact win at a given call count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedTier {
    pub calls: usize,
    pub amount: i64,
}

pub fn default_fixed_tiers() -> Vec<FixedTier> {
    [(4, 1000), (5, 500), (6, 300), (7, 200)]
        .into_iter()
        .map(|(calls, amount)| FixedTier { calls, amount })
        .collect()
}

/// What kind of bonus a winning claim is eligible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusPlan {
    None,
    Fixed { amount: i64 },
    /// Pay the active pool.
    Pool,
    /// Pay the active pool only if the house's one-shot global flag is armed.
    PoolIfGlobalArmed,
}

pub fn plan_bonus(
    outcome: &ClaimOutcome,
    calls: usize,
    dynamic_enabled: bool,
    dynamic_trigger_calls: usize,
    tiers: &[FixedTier],
) -> BonusPlan {
    if !outcome.won || !outcome.exact {
        return BonusPlan::None;
    }
    if dynamic_enabled {
        return if calls == dynamic_trigger_calls {
            BonusPlan::Pool
        } else {
            BonusPlan::PoolIfGlobalArmed
        };
    }
    tiers
        .iter()
        .find(|t| t.calls == calls)
        .map_or(BonusPlan::None, |t| BonusPlan::Fixed { amount: t.amount })
}
