use chrono::NaiveDate;
use tracing::debug;

use crate::error::JournalError;
use crate::journal::types::{Trade, TradeStatus};

/// Remaining share counts below this are treated as a full exit.
const SHARE_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq)]
pub enum ExitOutcome {
    /// The whole position was sold; the trade is now closed.
    Full(Trade),
    /// Part of the position was sold. `closed` records the exited shares,
    /// `remaining` is the original open trade with the reduced share count.
    Partial { closed: Trade, remaining: Trade },
}

/// Exit `shares_to_exit` shares of an open trade at `sell_price`.
pub fn exit_position(
    trade: &Trade,
    shares_to_exit: f64,
    sell_price: f64,
    exit_date: NaiveDate,
    notes: &str,
) -> Result<ExitOutcome, JournalError> {
    if trade.status != TradeStatus::Open {
        return Err(JournalError::NotOpen {
            ticker: trade.ticker.clone(),
        });
    }
    if !shares_to_exit.is_finite() || shares_to_exit <= 0.0 || shares_to_exit > trade.shares {
        return Err(JournalError::InvalidExitSize {
            ticker: trade.ticker.clone(),
            requested: shares_to_exit,
            available: trade.shares,
        });
    }
    if !sell_price.is_finite() || sell_price < 0.0 {
        return Err(JournalError::InvalidSellPrice(sell_price));
    }

    let mut remaining_shares = trade.shares - shares_to_exit;
    if remaining_shares.abs() < SHARE_EPSILON {
        remaining_shares = 0.0;
    }

    let mut closed = trade.clone();
    closed.sell_price = Some(sell_price);
    closed.status = TradeStatus::Closed;
    closed.exit_date = Some(exit_date);
    closed.shares = shares_to_exit;

    if remaining_shares == 0.0 {
        if !notes.is_empty() {
            closed.notes = append_note(&trade.notes, "Exit", notes);
        }
        debug!(ticker = %trade.ticker, shares = shares_to_exit, "full exit");
        return Ok(ExitOutcome::Full(closed));
    }

    closed.id = None;
    closed.notes = append_note(&trade.notes, "Partial exit", notes);

    let mut remaining = trade.clone();
    remaining.shares = remaining_shares;

    debug!(
        ticker = %trade.ticker,
        exited = shares_to_exit,
        remaining = remaining_shares,
        "partial exit"
    );
    Ok(ExitOutcome::Partial { closed, remaining })
}

fn append_note(existing: &str, label: &str, note: &str) -> String {
    format!("{existing} | {label}: {note}")
        .trim_matches(|c| c == ' ' || c == '|')
        .to_string()
}
