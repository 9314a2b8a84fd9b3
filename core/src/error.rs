use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{count} line(s) could not be processed")]
    UnprocessedLines { count: usize, lines: Vec<String> },

    #[error("Ticket contains no valid bets")]
    EmptyTicket,

    #[error("No winning number recorded for {date} {shift}")]
    MissingWinningNumber { date: String, shift: String },

    #[error("No rate table resolves for seller '{seller_id}'")]
    MissingRates { seller_id: String },

    #[error("No tickets for seller '{seller_id}' at bank '{bank_id}' on {date} {shift}")]
    NoTickets {
        seller_id: String,
        bank_id: String,
        date: String,
        shift: String,
    },

    #[error("Settlement already exists for seller '{seller_id}' at bank '{bank_id}' on {date} {shift}")]
    DuplicateSettlement {
        seller_id: String,
        bank_id: String,
        date: String,
        shift: String,
    },

    #[error("Invalid bet: {0}")]
    InvalidBet(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
