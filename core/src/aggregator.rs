//! Aggregator: reduces a bet sequence into category totals and
//! per-number breakdown maps.
//!
//! Derived, read-only data: a `TotalsSummary` is always recomputed from
//! its source bets, never edited in place. `Error` bets contribute to
//! nothing here.

use crate::grammar::{Bet, BetCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-category sums plus sorted per-number breakdowns.
///
/// `runner1`/`runner2` sum the secondary stakes of `Fixed` bets.
/// `Triplet` bets are a three-stake wager on one number, so their full
/// stake lands in the `triplet` bucket and nowhere else. `total` is the
/// stake sum over all non-Error bets; the category columns partition it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalsSummary {
    pub fixed: u64,
    pub hundred: u64,
    pub parlet: u64,
    pub triplet: u64,
    pub runner1: u64,
    pub runner2: u64,
    pub total: u64,
    pub fixed_details: BTreeMap<String, u64>,
    pub hundred_details: BTreeMap<String, u64>,
    pub parlet_details: BTreeMap<String, u64>,
    pub triplet_details: BTreeMap<String, u64>,
}

/// Reduce a bet sequence into a `TotalsSummary`.
pub fn aggregate(bets: &[Bet]) -> TotalsSummary {
    let mut summary = TotalsSummary::default();

    for bet in bets {
        match bet.category {
            BetCategory::Error => {
                // An error bet carrying money is a classifier bug.
                debug_assert_eq!(bet.stake(), 0, "error bet with non-zero stake");
                continue;
            }
            BetCategory::Fixed => {
                summary.fixed += bet.amount;
                summary.runner1 += bet.runner1;
                summary.runner2 += bet.runner2;
                bump(&mut summary.fixed_details, &bet.number, bet.amount);
            }
            BetCategory::Hundred => {
                summary.hundred += bet.amount;
                bump(&mut summary.hundred_details, &bet.number, bet.amount);
            }
            BetCategory::Parlet => {
                summary.parlet += bet.amount;
                bump(&mut summary.parlet_details, &bet.number, bet.amount);
            }
            BetCategory::Triplet => {
                summary.triplet += bet.stake();
                bump(&mut summary.triplet_details, &bet.number, bet.stake());
            }
        }
        summary.total += bet.stake();
    }

    summary
}

/// Add into a breakdown map, keeping zero-valued entries out.
fn bump(map: &mut BTreeMap<String, u64>, number: &str, amount: u64) {
    if amount > 0 {
        *map.entry(number.to_string()).or_insert(0) += amount;
    }
}
