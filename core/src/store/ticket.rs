use super::LedgerStore;
use crate::{
    error::LedgerResult,
    intake::{PrizesPreview, Ticket},
    types::Shift,
};
use chrono::NaiveDate;
use rusqlite::params;

impl LedgerStore {
    pub fn insert_ticket(&self, ticket: &Ticket) -> LedgerResult<()> {
        let preview_json = ticket
            .prizes_preview
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.conn.execute(
            "INSERT INTO ticket
             (ticket_id, seller_id, bank_id, date, shift,
              raw_text, final_text, bets_json, summary_json, preview_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                ticket.id,
                ticket.seller_id,
                ticket.bank_id,
                ticket.date.to_string(),
                ticket.shift.as_str(),
                ticket.raw_text,
                ticket.final_text,
                serde_json::to_string(&ticket.bets)?,
                serde_json::to_string(&ticket.summary)?,
                preview_json,
            ],
        )?;
        Ok(())
    }

    /// All tickets for one (seller, bank, date, shift), oldest first.
    pub fn tickets_for(
        &self,
        seller_id: &str,
        bank_id: &str,
        date: NaiveDate,
        shift: Shift,
    ) -> LedgerResult<Vec<Ticket>> {
        let mut stmt = self.conn.prepare(
            "SELECT ticket_id, raw_text, final_text, bets_json, summary_json, preview_json
             FROM ticket
             WHERE seller_id = ?1 AND bank_id = ?2 AND date = ?3 AND shift = ?4
             ORDER BY created_at ASC, ticket_id ASC",
        )?;
        let rows = stmt
            .query_map(
                params![seller_id, bank_id, date.to_string(), shift.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, Option<String>>(5)?,
                    ))
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;

        let mut tickets = Vec::with_capacity(rows.len());
        for (id, raw_text, final_text, bets_json, summary_json, preview_json) in rows {
            let prizes_preview: Option<PrizesPreview> = preview_json
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?;
            tickets.push(Ticket {
                id,
                seller_id: seller_id.to_string(),
                bank_id: bank_id.to_string(),
                date,
                shift,
                raw_text,
                final_text,
                bets: serde_json::from_str(&bets_json)?,
                summary: serde_json::from_str(&summary_json)?,
                prizes_preview,
            });
        }
        Ok(tickets)
    }

    pub fn ticket_count(&self) -> LedgerResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM ticket", [], |row| row.get(0))?;
        Ok(count)
    }
}
