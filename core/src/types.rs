//! Shared primitive types used across the entire ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stable, unique identifier for a ticket seller.
pub type SellerId = String;

/// A stable, unique identifier for a bank (the counterparty the seller
/// forwards tickets to and settles against).
pub type BankId = String;

/// One of the two daily draw windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Am,
    Pm,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Am => "am",
            Shift::Pm => "pm",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "am" => Ok(Shift::Am),
            "pm" => Ok(Shift::Pm),
            other => Err(format!("unknown shift '{other}' (expected am or pm)")),
        }
    }
}
