use super::LedgerStore;
use crate::{
    error::LedgerResult,
    rates::{resolve_effective_rates, RateTable},
};
use rusqlite::{params, OptionalExtension, Row};

fn rate_table_from_row(row: &Row<'_>) -> rusqlite::Result<RateTable> {
    Ok(RateTable {
        fixed: row.get::<_, i64>(0)? as u64,
        hundred: row.get::<_, i64>(1)? as u64,
        parlet: row.get::<_, i64>(2)? as u64,
        triplet: row.get::<_, i64>(3)? as u64,
        runner1: row.get::<_, i64>(4)? as u64,
        runner2: row.get::<_, i64>(5)? as u64,
        commission_percent: row.get(6)?,
    })
}

impl LedgerStore {
    /// Replace the operator-wide default rate table.
    pub fn set_operator_rates(&self, rates: &RateTable) -> LedgerResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO operator_rates
             (id, fixed, hundred, parlet, triplet, runner1, runner2, commission_percent)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                rates.fixed as i64,
                rates.hundred as i64,
                rates.parlet as i64,
                rates.triplet as i64,
                rates.runner1 as i64,
                rates.runner2 as i64,
                rates.commission_percent,
            ],
        )?;
        Ok(())
    }

    /// Set or replace a seller-specific override.
    pub fn set_seller_rates(&self, seller_id: &str, rates: &RateTable) -> LedgerResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO seller_rates
             (seller_id, fixed, hundred, parlet, triplet, runner1, runner2, commission_percent)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                seller_id,
                rates.fixed as i64,
                rates.hundred as i64,
                rates.parlet as i64,
                rates.triplet as i64,
                rates.runner1 as i64,
                rates.runner2 as i64,
                rates.commission_percent,
            ],
        )?;
        Ok(())
    }

    pub fn operator_rates(&self) -> LedgerResult<Option<RateTable>> {
        let row = self
            .conn
            .query_row(
                "SELECT fixed, hundred, parlet, triplet, runner1, runner2, commission_percent
                 FROM operator_rates WHERE id = 1",
                [],
                rate_table_from_row,
            )
            .optional()?;
        Ok(row)
    }

    pub fn seller_rates(&self, seller_id: &str) -> LedgerResult<Option<RateTable>> {
        let row = self
            .conn
            .query_row(
                "SELECT fixed, hundred, parlet, triplet, runner1, runner2, commission_percent
                 FROM seller_rates WHERE seller_id = ?1",
                params![seller_id],
                rate_table_from_row,
            )
            .optional()?;
        Ok(row)
    }

    /// The rate table pricing this seller: their override, else the
    /// operator default. No table at all is a hard failure.
    pub fn effective_rates(&self, seller_id: &str) -> LedgerResult<RateTable> {
        let seller = self.seller_rates(seller_id)?;
        let operator = self.operator_rates()?;
        resolve_effective_rates(seller_id, seller, operator)
    }
}
