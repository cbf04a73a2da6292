use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::calendar::daily_pnl;
use crate::data::{load_fees_config, load_trades};
use crate::fees::{FeeCalculator, FeesConfig};
use crate::journal::{exit_position, ExitOutcome, Trade, TradeStatus};
use crate::metrics::{compute_metrics, filter_by_date};
use crate::report::{build_report, write_report};
use crate::util::{parse_date, parse_optional_date};

#[derive(Parser)]
#[command(name = "trade-journal")]
#[command(about = "Trading journal fee, P&L and performance tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Fee schedule source plus per-run overrides of the per-trade components.
#[derive(Args, Debug, Clone, Default)]
pub struct FeeArgs {
    /// Path to fees config JSON (defaults apply when omitted or missing)
    #[arg(long)]
    pub fees_config: Option<PathBuf>,
    /// Brokerage percentage per leg
    #[arg(long)]
    pub brokerage_pct: Option<f64>,
    /// Brokerage cap per leg in USD
    #[arg(long)]
    pub brokerage_max_usd: Option<f64>,
    /// Exchange transaction charges percentage
    #[arg(long)]
    pub exchange_pct: Option<f64>,
    /// IFSCA turnover fees percentage
    #[arg(long)]
    pub ifsca_pct: Option<f64>,
    /// Flat platform fee per leg in USD
    #[arg(long)]
    pub platform_fee_usd: Option<f64>,
}

impl FeeArgs {
    pub fn resolve(&self) -> Result<FeesConfig> {
        let mut config = load_fees_config(self.fees_config.as_deref())?;
        if let Some(v) = self.brokerage_pct {
            config.brokerage_percentage = v;
        }
        if let Some(v) = self.brokerage_max_usd {
            config.brokerage_max_usd = v;
        }
        if let Some(v) = self.exchange_pct {
            config.exchange_transaction_charges_percentage = v;
        }
        if let Some(v) = self.ifsca_pct {
            config.ifsca_turnover_fees_percentage = v;
        }
        if let Some(v) = self.platform_fee_usd {
            config.platform_fee_usd = v;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the fee breakdown and net P&L of a single trade
    Fees {
        /// Buy price per share
        #[arg(long)]
        buy_price: f64,
        /// Sell price per share (omit for an open trade)
        #[arg(long)]
        sell_price: Option<f64>,
        /// Number of shares
        #[arg(long)]
        shares: f64,
        #[command(flatten)]
        fees: FeeArgs,
    },
    /// Write a per-trade fee and P&L report (JSON plus CSV)
    Report {
        /// Trades file (.csv or .json)
        #[arg(long)]
        trades: PathBuf,
        #[command(flatten)]
        fees: FeeArgs,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Output file path (JSON)
        #[arg(long, default_value = "report.json")]
        out: PathBuf,
    },
    /// Print journal performance metrics
    Metrics {
        /// Trades file (.csv or .json)
        #[arg(long)]
        trades: PathBuf,
        #[command(flatten)]
        fees: FeeArgs,
        /// Ignore fees and report gross P&L
        #[arg(long)]
        gross: bool,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Print realized P&L per day
    Calendar {
        /// Trades file (.csv or .json)
        #[arg(long)]
        trades: PathBuf,
        #[command(flatten)]
        fees: FeeArgs,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Exit an open position in a JSON journal, fully or partially
    Exit {
        /// Journal file (.json), rewritten in place
        #[arg(long)]
        journal: PathBuf,
        /// Ticker of the open position
        #[arg(long)]
        ticker: String,
        /// Shares to sell
        #[arg(long)]
        shares: f64,
        /// Sell price per share
        #[arg(long)]
        sell_price: f64,
        /// Exit date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Note appended to the trade
        #[arg(long, default_value = "")]
        notes: String,
    },
}

fn load_filtered(trades: &Path, from: Option<&str>, to: Option<&str>) -> Result<Vec<Trade>> {
    let from = parse_optional_date(from)?;
    let to = parse_optional_date(to)?;
    let all = load_trades(trades)?;
    if from.is_none() && to.is_none() {
        return Ok(all);
    }
    let filtered = filter_by_date(&all, from, to);
    info!(total = all.len(), kept = filtered.len(), "filtered trades by date");
    Ok(filtered)
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Fees {
                buy_price,
                sell_price,
                shares,
                fees,
            } => {
                let config = fees.resolve()?;
                let today = chrono::Local::now().date_naive();
                let trade = match sell_price {
                    Some(sell) => Trade::closed("-", today, buy_price, sell, shares),
                    None => Trade::open("-", today, buy_price, shares),
                };

                let calc = FeeCalculator::new(config);
                let fees = calc.compute_complete_trade_fees(&trade);
                let out = serde_json::json!({
                    "fees": fees,
                    "net_pnl": calc.compute_net_pnl(&trade),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
                Ok(())
            }
            Commands::Report {
                trades,
                fees,
                from,
                to,
                out,
            } => {
                let config = fees.resolve()?;
                let trades = load_filtered(&trades, from.as_deref(), to.as_deref())?;
                let report = build_report(&trades, &config);
                write_report(&report, &out)?;
                println!("Report complete. Results written to {}", out.display());
                Ok(())
            }
            Commands::Metrics {
                trades,
                fees,
                gross,
                from,
                to,
            } => {
                let config = fees.resolve()?;
                let trades = load_filtered(&trades, from.as_deref(), to.as_deref())?;
                let metrics = compute_metrics(&trades, (!gross).then_some(&config));
                println!("{}", serde_json::to_string_pretty(&metrics)?);
                Ok(())
            }
            Commands::Calendar {
                trades,
                fees,
                from,
                to,
            } => {
                let config = fees.resolve()?;
                let trades = load_filtered(&trades, from.as_deref(), to.as_deref())?;
                for (day, stats) in daily_pnl(&trades, Some(&config)) {
                    println!(
                        "{day}  {:>12.2}  trades={} wins={} losses={}",
                        stats.pnl, stats.trades, stats.wins, stats.losses
                    );
                }
                Ok(())
            }
            Commands::Exit {
                journal,
                ticker,
                shares,
                sell_price,
                date,
                notes,
            } => {
                let exit_date = match date {
                    Some(d) => parse_date(&d)?,
                    None => chrono::Local::now().date_naive(),
                };
                let ticker = ticker.trim().to_uppercase();
                if journal.extension().and_then(|s| s.to_str()) != Some("json") {
                    anyhow::bail!("Journal must be a .json file: {}", journal.display());
                }

                let mut trades = load_trades(&journal)?;
                let idx = trades
                    .iter()
                    .position(|t| {
                        t.ticker.eq_ignore_ascii_case(&ticker) && t.status == TradeStatus::Open
                    })
                    .with_context(|| format!("No open trade found for {ticker}"))?;

                match exit_position(&trades[idx], shares, sell_price, exit_date, &notes)? {
                    ExitOutcome::Full(closed) => {
                        closed.validate()?;
                        trades[idx] = closed;
                        println!("Trade fully exited: {shares} shares of {ticker}");
                    }
                    ExitOutcome::Partial { closed, remaining } => {
                        closed.validate()?;
                        remaining.validate()?;
                        let left = remaining.shares;
                        trades[idx] = remaining;
                        trades.push(closed);
                        println!(
                            "Partial exit: {shares} shares of {ticker} exited, {left} remaining"
                        );
                    }
                }

                let json_str = serde_json::to_string_pretty(&trades)?;
                std::fs::write(&journal, json_str)
                    .with_context(|| format!("Failed to write journal: {}", journal.display()))?;
                Ok(())
            }
        }
    }
}
