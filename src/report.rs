use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::fees::{gross_pnl, CompleteTradeFees, FeeCalculator, FeesConfig};
use crate::journal::types::{Trade, TradeStatus};
use crate::metrics::{compute_metrics, TradeMetrics};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeReport {
    pub ticker: String,
    pub date: NaiveDate,
    pub exit_date: Option<NaiveDate>,
    pub status: TradeStatus,
    pub shares: f64,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub fees: CompleteTradeFees,
    pub gross_pnl: f64,
    pub net_pnl: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalReport {
    pub fees_config: FeesConfig,
    pub trades: Vec<TradeReport>,
    pub metrics: TradeMetrics,
}

pub fn build_report(trades: &[Trade], config: &FeesConfig) -> JournalReport {
    let calc = FeeCalculator::new(config.clone());
    let rows = trades
        .iter()
        .map(|t| TradeReport {
            ticker: t.ticker.clone(),
            date: t.date,
            exit_date: t.exit_date,
            status: t.status,
            shares: t.shares,
            buy_price: t.buy_price,
            sell_price: t.sell_price,
            fees: calc.compute_complete_trade_fees(t),
            gross_pnl: gross_pnl(t),
            net_pnl: calc.compute_net_pnl(t),
        })
        .collect();

    JournalReport {
        fees_config: config.clone(),
        trades: rows,
        metrics: compute_metrics(trades, Some(config)),
    }
}

/// Path of the per-trade CSV written next to the JSON report.
pub fn trades_csv_path(out_path: &Path) -> PathBuf {
    let base_path = out_path.parent().unwrap_or(Path::new("."));
    let base_name = out_path.file_stem().and_then(|s| s.to_str()).unwrap_or("report");
    base_path.join(format!("{}_trades.csv", base_name))
}

pub fn write_report(report: &JournalReport, out_path: &Path) -> Result<()> {
    let json_str = serde_json::to_string_pretty(report)?;
    std::fs::write(out_path, json_str)?;

    // Amounts are written at two decimals; the JSON keeps full precision
    let trades_path = trades_csv_path(out_path);
    let mut wtr = csv::Writer::from_path(&trades_path)?;
    wtr.write_record([
        "ticker",
        "date",
        "exit_date",
        "status",
        "shares",
        "buy_price",
        "sell_price",
        "buy_fees",
        "sell_fees",
        "total_fees",
        "gross_pnl",
        "net_pnl",
    ])?;
    for row in &report.trades {
        wtr.write_record([
            row.ticker.clone(),
            row.date.to_string(),
            row.exit_date.map(|d| d.to_string()).unwrap_or_default(),
            row.status.as_str().to_string(),
            row.shares.to_string(),
            row.buy_price.map(|p| p.to_string()).unwrap_or_default(),
            row.sell_price.map(|p| p.to_string()).unwrap_or_default(),
            format!("{:.2}", row.fees.buy_fees),
            format!("{:.2}", row.fees.sell_fees),
            format!("{:.2}", row.fees.total_fees),
            format!("{:.2}", row.gross_pnl),
            format!("{:.2}", row.net_pnl),
        ])?;
    }
    wtr.flush()?;

    info!(
        json = %out_path.display(),
        csv = %trades_path.display(),
        trades = report.trades.len(),
        "report written"
    );
    Ok(())
}
