//! The daily winning-number tuple.
//!
//! Supplied by the external result-consensus subsystem; immutable once
//! recorded and uniquely keyed by `(date, shift)`.

use crate::types::Shift;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningNumber {
    pub date: NaiveDate,
    pub shift: Shift,
    /// Digit of hundreds, 0-9.
    pub hundred_digit: u8,
    /// The main two-digit number, zero-padded.
    pub fixed: String,
    /// First secondary drawn number ("corrido"), two digits.
    pub runner1: String,
    /// Second secondary drawn number, two digits.
    pub runner2: String,
}

impl WinningNumber {
    /// The three-digit number matched by `Hundred` bets.
    pub fn full_hundred(&self) -> String {
        format!("{}{}", self.hundred_digit, self.fixed)
    }

    /// The pool a parlet member may land in: the fixed number and both
    /// runners.
    pub fn winner_pool(&self) -> [&str; 3] {
        [&self.fixed, &self.runner1, &self.runner2]
    }
}
