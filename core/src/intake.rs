//! Ticket intake: from raw transcript to persisted ticket record.
//!
//! Orchestrates the pure pipeline (normalize, extract, aggregate)
//! around the store. Acceptance policy: a ticket with any unrecognized
//! line is rejected whole, with the offending lines surfaced to the
//! caller; a ticket with no valid bet at all is rejected too. The
//! preview of prizes is attached opportunistically when the draw for
//! the ticket's shift is already known.

use crate::{
    aggregator::{aggregate, TotalsSummary},
    error::{LedgerError, LedgerResult},
    grammar::{extract_bets, Bet},
    normalizer::normalize,
    rates::resolve_effective_rates,
    settlement::{calculate_prizes, PrizeBreakdown},
    store::LedgerStore,
    types::{BankId, SellerId, Shift},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered ticket: the audit trace (raw + cleaned text + bets)
/// plus the derived summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub seller_id: SellerId,
    pub bank_id: BankId,
    pub date: NaiveDate,
    pub shift: Shift,
    pub raw_text: String,
    pub final_text: String,
    pub bets: Vec<Bet>,
    pub summary: TotalsSummary,
    pub prizes_preview: Option<PrizesPreview>,
}

/// Informational prize preview computed at intake time when the
/// winning number for the ticket's shift already exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizesPreview {
    pub total_prizes: u64,
    pub breakdown: PrizeBreakdown,
    pub winning_number: String,
}

pub struct TicketIntake<'a> {
    store: &'a mut LedgerStore,
}

impl<'a> TicketIntake<'a> {
    pub fn new(store: &'a mut LedgerStore) -> Self {
        Self { store }
    }

    /// Normalize, classify, validate, aggregate and persist one ticket.
    pub fn register_ticket(
        &mut self,
        seller_id: &str,
        bank_id: &str,
        date: NaiveDate,
        shift: Shift,
        raw_text: &str,
    ) -> LedgerResult<Ticket> {
        let clean = normalize(raw_text);
        let extraction = extract_bets(&clean);

        if !extraction.unrecognized.is_empty() {
            return Err(LedgerError::UnprocessedLines {
                count: extraction.unrecognized.len(),
                lines: extraction.unrecognized,
            });
        }
        if extraction.bets.is_empty() {
            return Err(LedgerError::EmptyTicket);
        }

        let summary = aggregate(&extraction.bets);
        let prizes_preview = self.preview_prizes(seller_id, date, shift, &extraction.bets)?;

        let ticket = Ticket {
            id: Uuid::new_v4().to_string(),
            seller_id: seller_id.to_string(),
            bank_id: bank_id.to_string(),
            date,
            shift,
            raw_text: raw_text.to_string(),
            final_text: extraction.final_text,
            bets: extraction.bets,
            summary,
            prizes_preview,
        };

        self.store.insert_ticket(&ticket)?;
        log::info!(
            "ticket {} registered: seller={seller_id} bank={bank_id} {date} {shift} total={}",
            ticket.id,
            ticket.summary.total
        );

        Ok(ticket)
    }

    /// Best effort: missing draw or missing rates just means no preview.
    fn preview_prizes(
        &self,
        seller_id: &str,
        date: NaiveDate,
        shift: Shift,
        bets: &[Bet],
    ) -> LedgerResult<Option<PrizesPreview>> {
        let Some(win) = self.store.winning_number(date, shift)? else {
            return Ok(None);
        };

        let seller = self.store.seller_rates(seller_id)?;
        let operator = self.store.operator_rates()?;
        let Ok(rates) = resolve_effective_rates(seller_id, seller, operator) else {
            return Ok(None);
        };

        let breakdown = calculate_prizes(bets, &win, &rates);
        Ok(Some(PrizesPreview {
            total_prizes: breakdown.total(),
            breakdown,
            winning_number: format!("{}-{}", win.hundred_digit, win.fixed),
        }))
    }
}
