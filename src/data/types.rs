use chrono::NaiveDate;
use serde::Deserialize;

use crate::journal::types::{Trade, TradeStatus};

/// One row of a trade import CSV. Blank numeric cells read as `None`; a
/// missing status is inferred from the sell price.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub ticker: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub exit_date: Option<NaiveDate>,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub shares: f64,
    #[serde(default)]
    pub status: Option<TradeStatus>,
    #[serde(default)]
    pub risk: Option<f64>,
    #[serde(default)]
    pub risk_dollars: Option<f64>,
    #[serde(default)]
    pub account_balance: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TradeRecord {
    pub fn into_trade(self) -> Trade {
        let sell_price = self.sell_price.filter(|p| *p > 0.0);
        let status = self.status.unwrap_or(if sell_price.is_some() {
            TradeStatus::Closed
        } else {
            TradeStatus::Open
        });

        Trade {
            id: self.id.filter(|s| !s.is_empty()),
            ticker: self.ticker.trim().to_uppercase(),
            date: self.date,
            exit_date: self.exit_date,
            buy_price: self.buy_price,
            sell_price,
            shares: self.shares,
            status,
            risk: self.risk,
            risk_dollars: self.risk_dollars,
            account_balance: self.account_balance,
            notes: self.notes.unwrap_or_default(),
        }
    }
}
