use serde::{Deserialize, Serialize};

use crate::error::JournalError;
use crate::journal::types::Trade;

/// Per-user brokerage fee schedule.
///
/// Percentages are expressed in percent (0.25 means 0.25%), USD amounts are
/// absolute. Only the brokerage, exchange, IFSCA and platform components
/// enter per-trade fees; the remaining charges are account-level and kept
/// for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeesConfig {
    pub brokerage_percentage: f64,
    /// Cap on brokerage per leg
    pub brokerage_max_usd: f64,
    pub exchange_transaction_charges_percentage: f64,
    pub ifsca_turnover_fees_percentage: f64,
    /// Flat fee charged on every leg (buy, and sell if it occurs)
    pub platform_fee_usd: f64,
    pub withdrawal_fee_usd: f64,
    pub amc_yearly_usd: f64,
    pub account_opening_fee_usd: f64,
    pub tracking_charges_usd: f64,
    pub profile_verification_fee_usd: f64,
}

impl Default for FeesConfig {
    fn default() -> Self {
        Self {
            brokerage_percentage: 0.25,
            brokerage_max_usd: 25.0,
            exchange_transaction_charges_percentage: 0.12,
            ifsca_turnover_fees_percentage: 0.0001,
            platform_fee_usd: 0.0,
            withdrawal_fee_usd: 0.0,
            amc_yearly_usd: 0.0,
            account_opening_fee_usd: 0.0,
            tracking_charges_usd: 0.0,
            profile_verification_fee_usd: 0.0,
        }
    }
}

impl FeesConfig {
    pub fn validate(&self) -> Result<(), JournalError> {
        check(
            "brokerage_percentage",
            self.brokerage_percentage,
            |v| (0.0..=10.0).contains(&v),
            "must be between 0 and 10",
        )?;

        let non_negative = [
            ("brokerage_max_usd", self.brokerage_max_usd),
            (
                "exchange_transaction_charges_percentage",
                self.exchange_transaction_charges_percentage,
            ),
            (
                "ifsca_turnover_fees_percentage",
                self.ifsca_turnover_fees_percentage,
            ),
            ("platform_fee_usd", self.platform_fee_usd),
            ("withdrawal_fee_usd", self.withdrawal_fee_usd),
            ("amc_yearly_usd", self.amc_yearly_usd),
            ("account_opening_fee_usd", self.account_opening_fee_usd),
            ("tracking_charges_usd", self.tracking_charges_usd),
            (
                "profile_verification_fee_usd",
                self.profile_verification_fee_usd,
            ),
        ];
        for (field, value) in non_negative {
            check(field, value, |v| v >= 0.0, "cannot be negative")?;
        }

        Ok(())
    }
}

fn check(
    field: &'static str,
    value: f64,
    ok: impl Fn(f64) -> bool,
    reason: &str,
) -> Result<(), JournalError> {
    if !value.is_finite() {
        return Err(JournalError::InvalidFeesConfig {
            field,
            reason: format!("must be a finite number (got {value})"),
        });
    }
    if !ok(value) {
        return Err(JournalError::InvalidFeesConfig {
            field,
            reason: format!("{reason} (got {value})"),
        });
    }
    Ok(())
}

/// Fees charged on one leg (buy or sell) of a trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LegFees {
    pub brokerage: f64,
    pub exchange_charges: f64,
    pub ifsca_fees: f64,
    pub platform_fee: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub buy_brokerage: f64,
    pub sell_brokerage: f64,
    pub buy_exchange_charges: f64,
    pub sell_exchange_charges: f64,
    pub buy_ifsca_fees: f64,
    pub sell_ifsca_fees: f64,
    pub buy_platform_fee: f64,
    pub sell_platform_fee: f64,
    pub brokerage: f64,
    pub exchange_charges: f64,
    pub ifsca_fees: f64,
    pub platform_fees: f64,
}

impl FeeBreakdown {
    fn from_legs(buy: &LegFees, sell: &LegFees) -> Self {
        Self {
            buy_brokerage: buy.brokerage,
            sell_brokerage: sell.brokerage,
            buy_exchange_charges: buy.exchange_charges,
            sell_exchange_charges: sell.exchange_charges,
            buy_ifsca_fees: buy.ifsca_fees,
            sell_ifsca_fees: sell.ifsca_fees,
            buy_platform_fee: buy.platform_fee,
            sell_platform_fee: sell.platform_fee,
            brokerage: buy.brokerage + sell.brokerage,
            exchange_charges: buy.exchange_charges + sell.exchange_charges,
            ifsca_fees: buy.ifsca_fees + sell.ifsca_fees,
            platform_fees: buy.platform_fee + sell.platform_fee,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompleteTradeFees {
    pub total_fees: f64,
    pub buy_fees: f64,
    pub sell_fees: f64,
    pub breakdown: FeeBreakdown,
}

#[derive(Debug, Clone, Default)]
pub struct FeeCalculator {
    config: FeesConfig,
}

impl FeeCalculator {
    pub fn new(config: FeesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeesConfig {
        &self.config
    }

    /// Fees for one leg with the given notional value. Brokerage is capped at
    /// `brokerage_max_usd`; the other percentage components are uncapped.
    pub fn compute_leg_fees(&self, notional: f64) -> LegFees {
        let cfg = &self.config;
        let brokerage =
            (notional * cfg.brokerage_percentage / 100.0).min(cfg.brokerage_max_usd);
        let exchange_charges = notional * cfg.exchange_transaction_charges_percentage / 100.0;
        let ifsca_fees = notional * cfg.ifsca_turnover_fees_percentage / 100.0;
        let platform_fee = cfg.platform_fee_usd;

        LegFees {
            brokerage,
            exchange_charges,
            ifsca_fees,
            platform_fee,
            total: brokerage + exchange_charges + ifsca_fees + platform_fee,
        }
    }

    /// Entry cost of a position: the buy leg only.
    pub fn compute_trade_fees(&self, trade: &Trade) -> LegFees {
        self.compute_leg_fees(trade.buy_notional())
    }

    pub fn compute_complete_trade_fees(&self, trade: &Trade) -> CompleteTradeFees {
        let buy = self.compute_trade_fees(trade);

        if !trade.is_closed() || trade.sell_price.is_none() {
            return CompleteTradeFees {
                total_fees: buy.total,
                buy_fees: buy.total,
                sell_fees: 0.0,
                breakdown: FeeBreakdown::from_legs(&buy, &LegFees::default()),
            };
        }

        // Cap and platform fee apply per leg, not to the round trip
        let sell = self.compute_leg_fees(trade.sell_notional());

        CompleteTradeFees {
            total_fees: buy.total + sell.total,
            buy_fees: buy.total,
            sell_fees: sell.total,
            breakdown: FeeBreakdown::from_legs(&buy, &sell),
        }
    }

    /// Realized P&L net of round-trip fees. Zero unless the trade is closed
    /// with both prices present. No rounding is applied.
    pub fn compute_net_pnl(&self, trade: &Trade) -> f64 {
        if !trade.is_complete() {
            return 0.0;
        }
        gross_pnl(trade) - self.compute_complete_trade_fees(trade).total_fees
    }
}

/// Realized P&L before fees, with the same completeness guard as net P&L.
pub fn gross_pnl(trade: &Trade) -> f64 {
    match (trade.is_closed(), trade.buy_price, trade.sell_price) {
        (true, Some(buy), Some(sell)) => (sell - buy) * trade.shares,
        _ => 0.0,
    }
}
