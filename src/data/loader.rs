use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::data::types::TradeRecord;
use crate::error::JournalError;
use crate::fees::FeesConfig;
use crate::journal::types::Trade;

/// Load trades from a `.csv` or `.json` file. JSON files hold an array of
/// trades and any trade failing entry validation fails the load. CSV rows
/// without a positive buy price or share count, or failing validation, are
/// skipped.
pub fn load_trades(path: &Path) -> Result<Vec<Trade>> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());

    let trades = match ext.as_deref() {
        Some("csv") => load_trades_csv(path)?,
        Some("json") => {
            let json_str = fs::read_to_string(path)
                .with_context(|| format!("Failed to read trades file: {}", path.display()))?;
            let trades = serde_json::from_str::<Vec<Trade>>(&json_str)
                .with_context(|| format!("Failed to parse trades JSON: {}", path.display()))?;

            let mut prepared = Vec::with_capacity(trades.len());
            for (idx, mut trade) in trades.into_iter().enumerate() {
                trade.ticker = trade.ticker.trim().to_uppercase();
                prepare_trade(&mut trade)
                    .with_context(|| format!("Invalid trade at index {idx} in {}", path.display()))?;
                prepared.push(trade);
            }
            prepared
        }
        _ => anyhow::bail!(
            "Unsupported trades file {} (expected .csv or .json)",
            path.display()
        ),
    };

    info!(path = %path.display(), count = trades.len(), "loaded trades");
    Ok(trades)
}

fn load_trades_csv(path: &Path) -> Result<Vec<Trade>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

    let mut trades = Vec::new();
    for (idx, result) in rdr.deserialize().enumerate() {
        // Header is line 1
        let line = idx + 2;
        let record: TradeRecord =
            result.with_context(|| format!("Invalid trade row at line {line}"))?;

        let valid_buy = record.buy_price.map_or(false, |p| p > 0.0);
        if !valid_buy || record.shares <= 0.0 || record.ticker.trim().is_empty() {
            warn!(line, ticker = %record.ticker, "skipping trade row without ticker, buy price or shares");
            continue;
        }
        let mut trade = record.into_trade();
        if let Err(e) = prepare_trade(&mut trade) {
            warn!(line, ticker = %trade.ticker, error = %e, "skipping invalid trade row");
            continue;
        }
        trades.push(trade);
    }

    Ok(trades)
}

/// Fill derived risk fields from the trade's own balance, then apply the
/// entry rules.
fn prepare_trade(trade: &mut Trade) -> Result<(), JournalError> {
    if let Some(balance) = trade.account_balance {
        trade.fill_risk(balance);
    }
    trade.validate()
}

/// Load and validate a fee schedule. A missing file yields the default schedule.
pub fn load_fees_config(path: Option<&Path>) -> Result<FeesConfig> {
    let config = match path {
        None => FeesConfig::default(),
        Some(path) if !path.exists() => {
            warn!(path = %path.display(), "fees config not found, using defaults");
            FeesConfig::default()
        }
        Some(path) => {
            let json_str = fs::read_to_string(path)
                .with_context(|| format!("Failed to read fees config: {}", path.display()))?;
            serde_json::from_str::<FeesConfig>(&json_str)
                .with_context(|| format!("Failed to parse fees config JSON: {}", path.display()))?
        }
    };

    config.validate()?;
    Ok(config)
}
