//! Claim evaluation and bonus planning tests (pure domain, no DB).

use crate::domain::card::{CalledNumbers, Card};
use crate::domain::claims::{
    default_fixed_tiers, evaluate_claim, plan_bonus, BonusPlan, WinCondition,
};
use crate::domain::fixtures::{sample_card_cells, sample_misses, sample_numbers_for};
use crate::domain::grid::CellSet;
use crate::domain::patterns::{PatternName, CORNER_SQUARES};

fn card() -> Card {
    Card::from_cells(&sample_card_cells()).unwrap()
}

fn calls(numbers: &[u8]) -> CalledNumbers {
    CalledNumbers::new(numbers).unwrap()
}

#[test]
fn middle_row_at_four_calls_earns_top_tier() {
    let numbers = sample_numbers_for(CellSet::row(3));
    assert_eq!(numbers.len(), 4);
    let called = calls(&numbers);

    let outcome = evaluate_claim(&card(), &called, &WinCondition::single(PatternName::Row), None);
    assert!(outcome.won);
    assert!(outcome.exact);
    assert_eq!(outcome.matched_patterns(), vec![PatternName::Row]);

    let plan = plan_bonus(&outcome, called.len(), false, 4, &default_fixed_tiers());
    assert_eq!(plan, BonusPlan::Fixed { amount: 1000 });
}

#[test]
fn same_row_after_ten_calls_wins_without_bonus() {
    let mut numbers = sample_numbers_for(CellSet::row(3));
    // Six extra on-card numbers from the top row.
    numbers.extend([1, 16, 31, 46, 2, 17]);
    let called = calls(&numbers);
    assert_eq!(called.len(), 10);

    let outcome = evaluate_claim(&card(), &called, &WinCondition::single(PatternName::Row), None);
    assert!(outcome.won);
    assert!(!outcome.exact);
    assert_eq!(
        plan_bonus(&outcome, called.len(), false, 4, &default_fixed_tiers()),
        BonusPlan::None
    );
}

#[test]
fn off_card_calls_keep_exactness_but_change_the_tier() {
    let mut numbers = sample_numbers_for(CellSet::row(3));
    numbers.extend(sample_misses().into_iter().take(2));
    let called = calls(&numbers);

    let outcome = evaluate_claim(&card(), &called, &WinCondition::single(PatternName::Row), None);
    assert!(outcome.exact);
    assert_eq!(
        plan_bonus(&outcome, called.len(), false, 4, &default_fixed_tiers()),
        BonusPlan::Fixed { amount: 300 }
    );
}

#[test]
fn dynamic_bonus_only_at_trigger_count() {
    let exact_four = calls(&sample_numbers_for(CellSet::row(3)));
    let outcome = evaluate_claim(&card(), &exact_four, &WinCondition::single(PatternName::Row), None);
    assert_eq!(plan_bonus(&outcome, 4, true, 4, &[]), BonusPlan::Pool);

    let top_row = calls(&sample_numbers_for(CellSet::row(1)));
    let outcome = evaluate_claim(&card(), &top_row, &WinCondition::single(PatternName::Row), None);
    assert!(outcome.exact);
    assert_eq!(plan_bonus(&outcome, 5, true, 4, &[]), BonusPlan::PoolIfGlobalArmed);
}

#[test]
fn and_condition_requires_both_patterns() {
    let square = CORNER_SQUARES[0];
    let called = calls(&sample_numbers_for(square));
    let cond = WinCondition::and(PatternName::AnyCornerSquare, PatternName::Row);
    assert!(!evaluate_claim(&card(), &called, &cond, None).won);

    let both = square.union(CellSet::row(3));
    let called = calls(&sample_numbers_for(both));
    let outcome = evaluate_claim(&card(), &called, &cond, None);
    assert!(outcome.won);
    assert!(outcome.exact);
    assert_eq!(outcome.matches.len(), 2);
}

#[test]
fn or_condition_accepts_either_pattern() {
    let called = calls(&sample_numbers_for(CellSet::column(0)));
    let cond = WinCondition::or(PatternName::Row, PatternName::Column);
    let outcome = evaluate_claim(&card(), &called, &cond, None);
    assert!(outcome.won);
    assert_eq!(outcome.matched_patterns(), vec![PatternName::Column]);
}

#[test]
fn bad_bingo_needs_exact_call_count_and_zero_hits() {
    let misses: Vec<u8> = sample_misses().into_iter().take(15).collect();
    let called = calls(&misses);
    let cond = WinCondition::single(PatternName::Blackout);

    let outcome = evaluate_claim(&card(), &called, &cond, Some(15));
    assert!(outcome.won);
    assert!(outcome.bad_bingo);
    assert!(outcome.matches.is_empty());
    assert_eq!(plan_bonus(&outcome, 15, false, 4, &default_fixed_tiers()), BonusPlan::None);

    // Rule disabled.
    assert!(!evaluate_claim(&card(), &called, &cond, None).won);

    // One hit spoils it.
    let mut with_hit = misses[..14].to_vec();
    with_hit.push(1);
    assert!(!evaluate_claim(&card(), &calls(&with_hit), &cond, Some(15)).won);

    // Fourteen calls is too early.
    assert!(!evaluate_claim(&card(), &calls(&misses[..14]), &cond, Some(15)).won);
}

#[test]
fn meta_pattern_wins_are_never_bonus_eligible() {
    let called = calls(&[1, 2, 3, 4, 5, 16, 17, 18]);
    let outcome = evaluate_claim(&card(), &called, &WinCondition::single(PatternName::AnyEight), None);
    assert!(outcome.won);
    assert!(!outcome.exact);
}
