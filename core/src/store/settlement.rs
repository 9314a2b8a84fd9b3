use super::LedgerStore;
use crate::{
    error::{LedgerError, LedgerResult},
    settlement::SettlementResult,
};
use rusqlite::params;
use uuid::Uuid;

/// One signed cash movement created by settlement processing.
#[derive(Debug, Clone)]
pub struct LedgerEntryRow {
    pub entry_id: String,
    pub settlement_id: String,
    pub direction: String,
    pub amount: f64,
    pub description: String,
}

impl LedgerStore {
    /// Persist a computed settlement and its cash ledger entry in one
    /// transaction. The UNIQUE(seller, bank, date, shift) index makes a
    /// second attempt for the same key fail with `DuplicateSettlement`
    /// before any ledger entry is written.
    pub fn persist_settlement(
        &mut self,
        settlement_id: &str,
        result: &SettlementResult,
    ) -> LedgerResult<()> {
        let applied_rates_json = serde_json::to_string(&result.applied_rates)?;
        let breakdown_json = serde_json::to_string(&result.prizes_breakdown)?;

        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO settlement
             (settlement_id, seller_id, bank_id, date, shift,
              total_sales, commission_amount, net_sales, total_prizes, final_balance,
              applied_rates_json, breakdown_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                settlement_id,
                result.seller_id,
                result.bank_id,
                result.date.to_string(),
                result.shift.as_str(),
                result.total_sales as i64,
                result.commission_amount,
                result.net_sales,
                result.total_prizes as i64,
                result.final_balance,
                applied_rates_json,
                breakdown_json,
            ],
        )
        .map_err(|err| map_conflict(err, result))?;

        let direction = if result.final_balance >= 0.0 {
            "income"
        } else {
            "outcome"
        };
        tx.execute(
            "INSERT INTO ledger_entry
             (entry_id, settlement_id, seller_id, bank_id, direction, amount, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                Uuid::new_v4().to_string(),
                settlement_id,
                result.seller_id,
                result.bank_id,
                direction,
                result.final_balance.abs(),
                format!("Automatic settlement, bank {}", result.bank_id),
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    pub fn settlement_count(&self) -> LedgerResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM settlement", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn ledger_entries_for(
        &self,
        seller_id: &str,
        bank_id: &str,
    ) -> LedgerResult<Vec<LedgerEntryRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT entry_id, settlement_id, direction, amount, description
             FROM ledger_entry
             WHERE seller_id = ?1 AND bank_id = ?2
             ORDER BY created_at ASC, entry_id ASC",
        )?;
        let rows = stmt
            .query_map(params![seller_id, bank_id], |row| {
                Ok(LedgerEntryRow {
                    entry_id: row.get(0)?,
                    settlement_id: row.get(1)?,
                    direction: row.get(2)?,
                    amount: row.get(3)?,
                    description: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

/// Translate the UNIQUE-index violation into the domain conflict error.
fn map_conflict(err: rusqlite::Error, result: &SettlementResult) -> LedgerError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            LedgerError::DuplicateSettlement {
                seller_id: result.seller_id.clone(),
                bank_id: result.bank_id.clone(),
                date: result.date.to_string(),
                shift: result.shift.to_string(),
            }
        }
        _ => LedgerError::Database(err),
    }
}
