use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::JournalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Closed,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Open => "open",
            TradeStatus::Closed => "closed",
        }
    }
}

/// A single journal entry: one position, entered once and optionally exited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub ticker: String,
    /// Entry date
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<NaiveDate>,
    #[serde(default)]
    pub buy_price: Option<f64>,
    #[serde(default)]
    pub sell_price: Option<f64>,
    /// Fractional shares are allowed
    pub shares: f64,
    pub status: TradeStatus,
    /// Risk as a percentage of account balance (0-100)
    #[serde(default)]
    pub risk: Option<f64>,
    #[serde(default)]
    pub risk_dollars: Option<f64>,
    /// Account balance the risk figures were derived against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_balance: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Zero counts as unset, the same as a missing value.
fn is_set(value: Option<f64>) -> bool {
    value.map_or(false, |v| v != 0.0)
}

impl Trade {
    pub fn open(ticker: &str, date: NaiveDate, buy_price: f64, shares: f64) -> Self {
        Self {
            id: None,
            ticker: ticker.to_string(),
            date,
            exit_date: None,
            buy_price: Some(buy_price),
            sell_price: None,
            shares,
            status: TradeStatus::Open,
            risk: None,
            risk_dollars: None,
            account_balance: None,
            notes: String::new(),
        }
    }

    pub fn closed(
        ticker: &str,
        date: NaiveDate,
        buy_price: f64,
        sell_price: f64,
        shares: f64,
    ) -> Self {
        Self {
            sell_price: Some(sell_price),
            status: TradeStatus::Closed,
            ..Self::open(ticker, date, buy_price, shares)
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    /// Both legs priced and the position closed: the only case with a realized P&L.
    pub fn is_complete(&self) -> bool {
        self.is_closed() && self.buy_price.is_some() && self.sell_price.is_some()
    }

    /// Date a trade is reported under: the exit date for closed trades that
    /// have one, the entry date otherwise.
    pub fn effective_date(&self) -> NaiveDate {
        match (self.status, self.exit_date) {
            (TradeStatus::Closed, Some(exit)) => exit,
            _ => self.date,
        }
    }

    pub fn buy_notional(&self) -> f64 {
        self.buy_price.unwrap_or(0.0) * self.shares
    }

    pub fn sell_notional(&self) -> f64 {
        self.sell_price.unwrap_or(0.0) * self.shares
    }

    /// Entry rules: open trades need a buy price, closed trades a sell
    /// price, and every trade a risk percentage or a risk amount.
    pub fn validate(&self) -> Result<(), JournalError> {
        match self.status {
            TradeStatus::Open if !is_set(self.buy_price) => {
                return Err(JournalError::MissingBuyPrice {
                    ticker: self.ticker.clone(),
                })
            }
            TradeStatus::Closed if !is_set(self.sell_price) => {
                return Err(JournalError::MissingSellPrice {
                    ticker: self.ticker.clone(),
                })
            }
            _ => {}
        }

        if !is_set(self.risk) && !is_set(self.risk_dollars) {
            return Err(JournalError::MissingRisk {
                ticker: self.ticker.clone(),
            });
        }
        Ok(())
    }

    /// Derive whichever of `risk` / `risk_dollars` is missing from the other
    /// and record the balance used. Non-positive balances leave the trade as is.
    pub fn fill_risk(&mut self, account_balance: f64) {
        if account_balance.is_nan() || account_balance <= 0.0 {
            return;
        }
        match (self.risk, self.risk_dollars) {
            (Some(pct), dollars) if is_set(Some(pct)) && !is_set(dollars) => {
                self.risk_dollars = Some(pct / 100.0 * account_balance);
            }
            (pct, Some(dollars)) if is_set(Some(dollars)) && !is_set(pct) => {
                self.risk = Some(dollars / account_balance * 100.0);
            }
            _ => {}
        }
        self.account_balance = Some(account_balance);
    }
}
