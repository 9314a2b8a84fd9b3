//! Payout rate tables and their resolution order.
//!
//! A seller is priced by their own override when one exists, else by
//! the operator-wide default. No table at all is a hard failure: no
//! wager can be priced without one.

use crate::error::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};

/// Per-category payout multipliers plus the commission the seller keeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub fixed: u64,
    pub hundred: u64,
    pub parlet: u64,
    pub triplet: u64,
    pub runner1: u64,
    pub runner2: u64,
    /// 0-100, fractional allowed.
    pub commission_percent: f64,
}

/// Resolution precedence: seller override, else operator default.
///
/// Kept storage-free so the precedence rule is testable on its own;
/// `LedgerStore::effective_rates` feeds it the two lookups.
pub fn resolve_effective_rates(
    seller_id: &str,
    seller_override: Option<RateTable>,
    operator_default: Option<RateTable>,
) -> LedgerResult<RateTable> {
    seller_override
        .or(operator_default)
        .ok_or_else(|| LedgerError::MissingRates {
            seller_id: seller_id.to_string(),
        })
}
