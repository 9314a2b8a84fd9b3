//! Settlement engine: reconciles stored bets against a winning number
//! and nets the result into a cash balance for the seller.
//!
//! `calculate_prizes` is the pure core; `SettlementEngine` wraps it
//! with the store lookups (effective rates, winning number, tickets)
//! and, on `process`, the exactly-once persistence step.

use crate::{
    draw::WinningNumber,
    error::{LedgerError, LedgerResult},
    grammar::{Bet, BetCategory},
    rates::RateTable,
    store::LedgerStore,
    types::{BankId, SellerId, Shift},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prize totals per bet category, in the same money unit as the stakes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeBreakdown {
    pub fixed: u64,
    pub hundred: u64,
    pub parlet: u64,
    pub triplet: u64,
    pub runners: u64,
}

impl PrizeBreakdown {
    pub fn total(&self) -> u64 {
        self.fixed + self.hundred + self.parlet + self.triplet + self.runners
    }
}

/// The computed net cash result for one (seller, bank, date, shift).
///
/// `applied_rates` is snapshotted because rate tables may change after
/// the fact; the settlement must stay auditable against the rates that
/// actually priced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementResult {
    pub seller_id: SellerId,
    pub bank_id: BankId,
    pub date: NaiveDate,
    pub shift: Shift,
    pub total_sales: u64,
    pub commission_amount: f64,
    pub net_sales: f64,
    pub total_prizes: u64,
    pub final_balance: f64,
    pub prizes_breakdown: PrizeBreakdown,
    pub applied_rates: RateTable,
}

/// Pure payout calculation over a flat bet sequence.
///
/// Rules:
///   - `Fixed` pays `amount * rate.fixed` when the number is the drawn
///     fixed number; `Hundred` analogously against the full hundred;
///     `Triplet` against the fixed number with its own multiplier.
///   - Runner stakes on `Fixed` and `Triplet` bets pay against the two
///     drawn runners, independently of the primary match.
///   - `Parlet` pays when both members land in the winner pool
///     {fixed, runner1, runner2}. A double pair such as `50x50` needs
///     the value in two distinct pool slots; one slot cannot satisfy
///     both members.
pub fn calculate_prizes(bets: &[Bet], win: &WinningNumber, rates: &RateTable) -> PrizeBreakdown {
    let mut breakdown = PrizeBreakdown::default();
    let win_fixed = win.fixed.as_str();
    let win_hundred = win.full_hundred();
    let pool = win.winner_pool();

    for bet in bets {
        match bet.category {
            BetCategory::Error => continue,
            BetCategory::Fixed => {
                if bet.number == win_fixed {
                    breakdown.fixed += bet.amount * rates.fixed;
                }
            }
            BetCategory::Hundred => {
                if bet.number == win_hundred {
                    breakdown.hundred += bet.amount * rates.hundred;
                }
            }
            BetCategory::Triplet => {
                if bet.number == win_fixed {
                    breakdown.triplet += bet.amount * rates.triplet;
                }
            }
            BetCategory::Parlet => {
                if parlet_wins(&bet.number, &pool) {
                    breakdown.parlet += bet.amount * rates.parlet;
                }
            }
        }

        // Runner stakes ride on the same number, evaluated on their own.
        if matches!(bet.category, BetCategory::Fixed | BetCategory::Triplet) {
            if bet.runner1 > 0 && bet.number == win.runner1 {
                breakdown.runners += bet.runner1 * rates.runner1;
            }
            if bet.runner2 > 0 && bet.number == win.runner2 {
                breakdown.runners += bet.runner2 * rates.runner2;
            }
        }
    }

    breakdown
}

/// Both parlet members must be covered by the pool; a double pair
/// requires two distinct slots carrying the value.
fn parlet_wins(number: &str, pool: &[&str; 3]) -> bool {
    let Some((a, b)) = number.split_once('x') else {
        return false;
    };
    if a == b {
        pool.iter().filter(|slot| **slot == a).count() >= 2
    } else {
        pool.contains(&a) && pool.contains(&b)
    }
}

pub struct SettlementEngine<'a> {
    store: &'a mut LedgerStore,
}

impl<'a> SettlementEngine<'a> {
    pub fn new(store: &'a mut LedgerStore) -> Self {
        Self { store }
    }

    /// Compute a settlement without persisting anything. Pure and
    /// repeatable for a given store state.
    pub fn preview(
        &self,
        seller_id: &str,
        bank_id: &str,
        date: NaiveDate,
        shift: Shift,
    ) -> LedgerResult<SettlementResult> {
        let rates = self.store.effective_rates(seller_id)?;

        let win = self.store.winning_number(date, shift)?.ok_or_else(|| {
            LedgerError::MissingWinningNumber {
                date: date.to_string(),
                shift: shift.to_string(),
            }
        })?;

        let tickets = self.store.tickets_for(seller_id, bank_id, date, shift)?;
        if tickets.is_empty() {
            return Err(LedgerError::NoTickets {
                seller_id: seller_id.to_string(),
                bank_id: bank_id.to_string(),
                date: date.to_string(),
                shift: shift.to_string(),
            });
        }

        let total_sales: u64 = tickets.iter().map(|t| t.summary.total).sum();
        let all_bets: Vec<Bet> = tickets.into_iter().flat_map(|t| t.bets).collect();

        let breakdown = calculate_prizes(&all_bets, &win, &rates);
        let total_prizes = breakdown.total();

        let commission_amount = total_sales as f64 * rates.commission_percent / 100.0;
        let net_sales = total_sales as f64 - commission_amount;
        let final_balance = net_sales - total_prizes as f64;

        log::debug!(
            "settlement preview seller={seller_id} bank={bank_id} {date} {shift}: \
             sales={total_sales} prizes={total_prizes} balance={final_balance:.2}"
        );

        Ok(SettlementResult {
            seller_id: seller_id.to_string(),
            bank_id: bank_id.to_string(),
            date,
            shift,
            total_sales,
            commission_amount,
            net_sales,
            total_prizes,
            final_balance,
            prizes_breakdown: breakdown,
            applied_rates: rates,
        })
    }

    /// Compute and persist: one settlement row plus one signed cash
    /// ledger entry, committed atomically. At most once per
    /// (seller, bank, date, shift); a second call fails with
    /// `DuplicateSettlement` and writes nothing.
    pub fn process(
        &mut self,
        seller_id: &str,
        bank_id: &str,
        date: NaiveDate,
        shift: Shift,
    ) -> LedgerResult<SettlementResult> {
        let result = self.preview(seller_id, bank_id, date, shift)?;

        let settlement_id = Uuid::new_v4().to_string();
        self.store.persist_settlement(&settlement_id, &result)?;

        log::info!(
            "settlement {settlement_id} processed: seller={seller_id} bank={bank_id} \
             {date} {shift} balance={:.2}",
            result.final_balance
        );

        Ok(result)
    }
}
