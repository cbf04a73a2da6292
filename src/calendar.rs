use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::fees::FeesConfig;
use crate::journal::types::Trade;
use crate::metrics::realized_pnls;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    pub pnl: f64,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
}

/// Realized P&L per calendar day, keyed on each closed trade's effective date.
pub fn daily_pnl(trades: &[Trade], fees: Option<&FeesConfig>) -> BTreeMap<NaiveDate, DayStats> {
    let complete: Vec<Trade> = trades.iter().filter(|t| t.is_complete()).cloned().collect();
    let pnls = realized_pnls(&complete, fees);

    let mut days: BTreeMap<NaiveDate, DayStats> = BTreeMap::new();
    for (trade, (pnl, _)) in complete.iter().zip(pnls) {
        let day = days.entry(trade.effective_date()).or_default();
        day.pnl += pnl;
        day.trades += 1;
        if pnl > 0.0 {
            day.wins += 1;
        } else if pnl < 0.0 {
            day.losses += 1;
        }
    }
    days
}
