//! bolita-core: bet extraction and settlement engine for a numbers-game
//! ledger.
//!
//! Pipeline: `normalizer` cleans a raw chat transcript, `grammar`
//! classifies each line into `Bet` records, `aggregator` reduces them
//! into a `TotalsSummary`, and `settlement` reconciles the stored bets
//! against a `WinningNumber` under a `RateTable`.
//!
//! The four pipeline stages are pure functions over in-memory data.
//! `store` is the only module that talks to SQLite; `intake` and
//! `settlement::SettlementEngine` orchestrate the pure stages around it.

pub mod aggregator;
pub mod draw;
pub mod error;
pub mod grammar;
pub mod intake;
pub mod normalizer;
pub mod rates;
pub mod settlement;
pub mod store;
pub mod types;

pub use aggregator::{aggregate, TotalsSummary};
pub use draw::WinningNumber;
pub use error::{LedgerError, LedgerResult};
pub use grammar::{extract_bets, Bet, BetCategory, Extraction};
pub use normalizer::normalize;
pub use rates::{resolve_effective_rates, RateTable};
pub use settlement::{SettlementEngine, SettlementResult};
pub use types::Shift;
