use super::LedgerStore;
use crate::{draw::WinningNumber, error::LedgerResult, types::Shift};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

impl LedgerStore {
    /// Record the winning tuple for one draw. The primary key on
    /// (date, shift) makes it immutable once created.
    pub fn insert_winning_number(&self, win: &WinningNumber) -> LedgerResult<()> {
        self.conn.execute(
            "INSERT INTO winning_number (date, shift, hundred_digit, fixed, runner1, runner2)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                win.date.to_string(),
                win.shift.as_str(),
                win.hundred_digit as i64,
                win.fixed,
                win.runner1,
                win.runner2,
            ],
        )?;
        Ok(())
    }

    pub fn winning_number(
        &self,
        date: NaiveDate,
        shift: Shift,
    ) -> LedgerResult<Option<WinningNumber>> {
        let row = self
            .conn
            .query_row(
                "SELECT hundred_digit, fixed, runner1, runner2
                 FROM winning_number WHERE date = ?1 AND shift = ?2",
                params![date.to_string(), shift.as_str()],
                |row| {
                    Ok(WinningNumber {
                        date,
                        shift,
                        hundred_digit: row.get::<_, i64>(0)? as u8,
                        fixed: row.get(1)?,
                        runner1: row.get(2)?,
                        runner2: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }
}
