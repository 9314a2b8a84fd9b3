//! Integration tests for the bet grammar.
//!
//! Covers the five pattern families, the shorthand expansions, the
//! canonical parlet ordering, the triplet reclassification rule and
//! the no-drop property.

use bolita_core::{extract_bets, BetCategory};

fn numbers(line: &str) -> Vec<String> {
    extract_bets(line).bets.iter().map(|b| b.number.clone()).collect()
}

// ─────────────────────────────────────────────────────────────────────
// Shorthand expansions
// ─────────────────────────────────────────────────────────────────────

#[test]
fn terminal_expands_ascending() {
    let expected: Vec<String> = (0..10).map(|t| format!("{t}7")).collect();
    assert_eq!(numbers("terminal 7-10"), expected);
    assert_eq!(numbers("ter 7-10"), expected);
    assert_eq!(numbers("t 7-10"), expected);
    assert_eq!(numbers("07-97-10"), expected);
}

#[test]
fn pairs_expand_to_the_ten_doubles() {
    let expected: Vec<String> = (0..10).map(|d| format!("{d}{d}")).collect();
    assert_eq!(numbers("parejas-10"), expected);
    assert_eq!(numbers("las parejas 10"), expected);
    assert_eq!(numbers("00 al 99-10"), expected);
    assert_eq!(numbers("00-99-10"), expected);
}

#[test]
fn decade_expands_ascending() {
    let expected: Vec<String> = (70..80).map(|n| n.to_string()).collect();
    assert_eq!(numbers("los 70-10"), expected);
    assert_eq!(numbers("del 70-10"), expected);
    assert_eq!(numbers("70-79-10"), expected);
    assert_eq!(numbers("70 al 79-10"), expected);
}

#[test]
fn bounded_numeric_range_expands() {
    let expected: Vec<String> = (15..=25).map(|n| n.to_string()).collect();
    assert_eq!(numbers("15 al 25-5"), expected);
    // Wider than 20 numbers: not a recognized range.
    let ex = extract_bets("10 al 45-5");
    assert_eq!(ex.bets.len(), 1);
    assert!(ex.bets[0].is_error());
}

#[test]
fn inverted_decade_phrasing() {
    let expected: Vec<String> = (40..50).map(|n| n.to_string()).collect();
    assert_eq!(numbers("10 a todos los 40"), expected);
    assert_eq!(numbers("10 pesos a todos los 40"), expected);
    let ex = extract_bets("10 a todos los 40");
    assert!(ex.bets.iter().all(|b| b.amount == 10 && b.category == BetCategory::Fixed));
}

#[test]
fn mixed_decades_are_not_a_range() {
    // 70-89 spans two decades, so the decade-range form rejects it and
    // the line falls through to the generic family: a fixed play on 70
    // staking 89 plus a runner stake of 10.
    let ex = extract_bets("70-89-10");
    assert_eq!(ex.bets.len(), 1);
    let b = &ex.bets[0];
    assert_eq!(b.category, BetCategory::Fixed);
    assert_eq!((b.number.as_str(), b.amount, b.runner1), ("70", 89, 10));
}

// ─────────────────────────────────────────────────────────────────────
// Canonical numbers
// ─────────────────────────────────────────────────────────────────────

#[test]
fn parlet_orders_pair_canonically() {
    for line in ["70x38-15", "38x70-15", "70*38-15", "70×38-15"] {
        let ex = extract_bets(line);
        assert_eq!(ex.bets.len(), 1, "line {line:?}");
        assert_eq!(ex.bets[0].category, BetCategory::Parlet);
        assert_eq!(ex.bets[0].number, "38x70");
        assert_eq!(ex.bets[0].amount, 15);
    }
}

#[test]
fn generic_zero_pads_by_width() {
    let ex = extract_bets("5-10\n023-4\n150-10");
    let got: Vec<(BetCategory, &str)> = ex
        .bets
        .iter()
        .map(|b| (b.category, b.number.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (BetCategory::Fixed, "05"),
            (BetCategory::Hundred, "023"),
            (BetCategory::Hundred, "150"),
        ]
    );
}

#[test]
fn generic_accepts_number_lists() {
    let ex = extract_bets("12,34,56-10");
    let got: Vec<&str> = ex.bets.iter().map(|b| b.number.as_str()).collect();
    assert_eq!(got, vec!["12", "34", "56"]);
    assert!(ex.bets.iter().all(|b| b.amount == 10));
}

// ─────────────────────────────────────────────────────────────────────
// Triplet inference
// ─────────────────────────────────────────────────────────────────────

#[test]
fn three_positive_amounts_make_a_triplet() {
    let ex = extract_bets("50-10-20-30");
    assert_eq!(ex.bets.len(), 1);
    let b = &ex.bets[0];
    assert_eq!(b.category, BetCategory::Triplet);
    assert_eq!((b.amount, b.runner1, b.runner2), (10, 20, 30));
}

#[test]
fn two_amounts_stay_fixed() {
    let ex = extract_bets("50-10-20");
    assert_eq!(ex.bets[0].category, BetCategory::Fixed);
    assert_eq!(ex.bets[0].runner1, 20);
}

#[test]
fn a_zero_amount_blocks_triplet_inference() {
    let ex = extract_bets("50-10-0-30");
    assert_eq!(ex.bets[0].category, BetCategory::Fixed);
}

#[test]
fn triplet_rule_applies_to_expansions_too() {
    for line in ["terminal 7-10-20-30", "parejas-10-20-30", "los 40-10-20-30"] {
        let ex = extract_bets(line);
        assert_eq!(ex.bets.len(), 10, "line {line:?}");
        assert!(
            ex.bets.iter().all(|b| b.category == BetCategory::Triplet),
            "line {line:?}"
        );
    }
}

#[test]
fn hundreds_never_become_triplets() {
    // Runner stakes do not attach to a three-digit play.
    let ex = extract_bets("150-10-20-30");
    assert_eq!(ex.bets[0].category, BetCategory::Hundred);
    assert_eq!(ex.bets[0].runner1, 0);
}

// ─────────────────────────────────────────────────────────────────────
// No-drop property
// ─────────────────────────────────────────────────────────────────────

#[test]
fn every_digit_line_yields_at_least_one_bet() {
    let text = "50-10\nnonsense with 1 digit\n38x70-5\nterminal 3-2\npure words only";
    let ex = extract_bets(text);

    // Lines with a digit survive into final_text, in order.
    assert_eq!(
        ex.final_text,
        "50-10\nnonsense with 1 digit\n38x70-5\nterminal 3-2"
    );

    // Each surviving line is covered exactly once by the bets' source
    // lines, in order.
    let mut seen = Vec::new();
    for bet in &ex.bets {
        if seen.last() != Some(&bet.source_line) {
            seen.push(bet.source_line.clone());
        }
    }
    let expected: Vec<String> = ex.final_text.lines().map(String::from).collect();
    assert_eq!(seen, expected);

    // The unrecognized line is an Error bet with zero stakes.
    assert_eq!(ex.unrecognized, vec!["nonsense with 1 digit"]);
    let err = ex.bets.iter().find(|b| b.is_error()).unwrap();
    assert_eq!(err.stake(), 0);
    assert_eq!(err.number, "ND");
}

#[test]
fn garbage_without_digits_yields_nothing() {
    let ex = extract_bets("this has no numbers");
    assert!(ex.bets.is_empty());
    assert!(ex.unrecognized.is_empty());
}
