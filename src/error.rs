use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum JournalError {
    #[error("invalid fee schedule: {field} {reason}")]
    InvalidFeesConfig { field: &'static str, reason: String },

    #[error("trade {ticker} is not open")]
    NotOpen { ticker: String },

    #[error("cannot exit {requested} shares of {ticker}: only {available} shares available")]
    InvalidExitSize {
        ticker: String,
        requested: f64,
        available: f64,
    },

    #[error("invalid sell price: {0}")]
    InvalidSellPrice(f64),

    #[error("buy price is required for open trade {ticker}")]
    MissingBuyPrice { ticker: String },

    #[error("sell price is required for closed trade {ticker}")]
    MissingSellPrice { ticker: String },

    #[error("trade {ticker} needs a risk percentage or risk in dollars")]
    MissingRisk { ticker: String },
}
