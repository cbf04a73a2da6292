use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fees::{gross_pnl, FeeCalculator, FeesConfig};
use crate::journal::types::Trade;

/// Journal performance summary over closed trades.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeMetrics {
    pub net_pnl: f64,
    pub total_fees: f64,
    pub trade_expectancy: f64,
    pub profit_factor: f64,
    pub win_percentage: f64,
    pub avg_win: f64,
    /// Absolute value
    pub avg_loss: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
}

/// Realized P&L of every complete trade, net of fees when a schedule is given.
pub fn realized_pnls(trades: &[Trade], fees: Option<&FeesConfig>) -> Vec<(f64, f64)> {
    let calc = fees.cloned().map(FeeCalculator::new);
    trades
        .iter()
        .filter(|t| t.is_complete())
        .map(|t| match &calc {
            Some(calc) => {
                let fees = calc.compute_complete_trade_fees(t).total_fees;
                (gross_pnl(t) - fees, fees)
            }
            None => (gross_pnl(t), 0.0),
        })
        .collect()
}

pub fn compute_metrics(trades: &[Trade], fees: Option<&FeesConfig>) -> TradeMetrics {
    let results = realized_pnls(trades, fees);
    if results.is_empty() {
        return TradeMetrics::default();
    }

    let total_trades = results.len();
    let net_pnl: f64 = results.iter().map(|(pnl, _)| pnl).sum();
    let total_fees: f64 = results.iter().map(|(_, fee)| fee).sum();

    let wins: Vec<f64> = results.iter().map(|r| r.0).filter(|p| *p > 0.0).collect();
    let losses: Vec<f64> = results.iter().map(|r| r.0).filter(|p| *p < 0.0).collect();

    let gross_profit: f64 = wins.iter().sum();
    let gross_loss: f64 = losses.iter().sum::<f64>().abs();

    let win_percentage = wins.len() as f64 / total_trades as f64 * 100.0;
    let avg_win = if wins.is_empty() {
        0.0
    } else {
        gross_profit / wins.len() as f64
    };
    let avg_loss = if losses.is_empty() {
        0.0
    } else {
        gross_loss / losses.len() as f64
    };

    let loss_pct = losses.len() as f64 / total_trades as f64;
    let trade_expectancy = (win_percentage / 100.0) * avg_win - loss_pct * avg_loss;

    // No losing trades: gross profit stands in as the factor
    let profit_factor = if losses.is_empty() {
        gross_profit
    } else {
        gross_profit / gross_loss
    };

    let best_trade = results.iter().map(|r| r.0).fold(f64::NEG_INFINITY, f64::max);
    let worst_trade = results.iter().map(|r| r.0).fold(f64::INFINITY, f64::min);

    TradeMetrics {
        net_pnl,
        total_fees,
        trade_expectancy,
        profit_factor,
        win_percentage,
        avg_win,
        avg_loss,
        best_trade,
        worst_trade,
        total_trades,
        winning_trades: wins.len(),
        losing_trades: losses.len(),
    }
}

/// Keep trades whose effective date falls within `[from, to]`. Either bound
/// may be omitted.
pub fn filter_by_date(
    trades: &[Trade],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<Trade> {
    trades
        .iter()
        .filter(|t| {
            let d = t.effective_date();
            from.map_or(true, |f| d >= f) && to.map_or(true, |e| d <= e)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn journal() -> Vec<Trade> {
        vec![
            Trade::closed("AAPL", day(1, 15), 150.0, 165.0, 100.0),
            Trade::closed("TSLA", day(1, 18), 240.0, 225.0, 50.0),
            Trade::closed("MSFT", day(1, 22), 380.0, 395.0, 25.0),
            Trade::open("NVDA", day(1, 25), 620.0, 10.0),
        ]
    }

    #[test]
    fn test_gross_metrics() {
        let m = compute_metrics(&journal(), None);
        // 1500 - 750 + 375
        assert!((m.net_pnl - 1125.0).abs() < 1e-9);
        assert_eq!(m.total_trades, 3);
        assert_eq!(m.winning_trades, 2);
        assert_eq!(m.losing_trades, 1);
        assert!((m.win_percentage - 66.666_666_666).abs() < 1e-6);
        assert!((m.avg_win - 937.5).abs() < 1e-9);
        assert!((m.avg_loss - 750.0).abs() < 1e-9);
        assert!((m.profit_factor - 2.5).abs() < 1e-9);
        // 2/3 * 937.5 - 1/3 * 750
        assert!((m.trade_expectancy - 375.0).abs() < 1e-9);
        assert_eq!(m.best_trade, 1500.0);
        assert_eq!(m.worst_trade, -750.0);
        assert_eq!(m.total_fees, 0.0);
    }

    #[test]
    fn test_net_metrics_subtract_fees() {
        let fees = FeesConfig::default();
        let gross = compute_metrics(&journal(), None);
        let net = compute_metrics(&journal(), Some(&fees));
        assert!(net.total_fees > 0.0);
        assert!((gross.net_pnl - net.net_pnl - net.total_fees).abs() < 1e-9);
    }

    #[test]
    fn test_realized_pnls_agree_with_calculator() {
        let fees = FeesConfig::default();
        let calc = FeeCalculator::new(fees.clone());
        let trades = journal();
        let pnls = realized_pnls(&trades, Some(&fees));
        assert_eq!(pnls.len(), 3);
        for (trade, (pnl, fee)) in trades.iter().filter(|t| t.is_complete()).zip(pnls) {
            assert!((pnl - calc.compute_net_pnl(trade)).abs() < 1e-9);
            assert_eq!(fee, calc.compute_complete_trade_fees(trade).total_fees);
        }
    }

    #[test]
    fn test_no_closed_trades_yields_zeroes() {
        let trades = vec![Trade::open("NVDA", day(1, 25), 620.0, 10.0)];
        assert_eq!(compute_metrics(&trades, None), TradeMetrics::default());
    }

    #[test]
    fn test_profit_factor_without_losses() {
        let trades = vec![Trade::closed("AAPL", day(1, 15), 10.0, 12.0, 10.0)];
        let m = compute_metrics(&trades, None);
        assert_eq!(m.profit_factor, 20.0);
        assert_eq!(m.avg_loss, 0.0);
    }

    #[test]
    fn test_filter_by_date_uses_exit_date() {
        let mut trades = journal();
        trades[0].exit_date = Some(day(2, 3));

        let jan = filter_by_date(&trades, Some(day(1, 1)), Some(day(1, 31)));
        assert_eq!(jan.len(), 3);
        assert!(jan.iter().all(|t| t.ticker != "AAPL"));

        let feb = filter_by_date(&trades, Some(day(2, 1)), None);
        assert_eq!(feb.len(), 1);
        assert_eq!(feb[0].ticker, "AAPL");
    }

    #[test]
    fn test_filter_by_date_inclusive_bounds() {
        let trades = journal();
        let hits = filter_by_date(&trades, Some(day(1, 18)), Some(day(1, 22)));
        assert_eq!(hits.len(), 2);
    }
}
