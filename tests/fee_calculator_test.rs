#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use trade_journal::fees::{FeeCalculator, FeesConfig};
    use trade_journal::journal::{Trade, TradeStatus};

    fn sample_config() -> FeesConfig {
        FeesConfig {
            brokerage_percentage: 0.1,
            brokerage_max_usd: 20.0,
            exchange_transaction_charges_percentage: 0.05,
            ifsca_turnover_fees_percentage: 0.0001,
            platform_fee_usd: 2.0,
            ..FeesConfig::default()
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn closed_trade() -> Trade {
        Trade::closed("AAPL", date(), 100.0, 110.0, 10.0)
    }

    fn open_trade() -> Trade {
        Trade::open("AAPL", date(), 100.0, 10.0)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_closed_round_trip_scenario() {
        let calc = FeeCalculator::new(sample_config());
        let fees = calc.compute_complete_trade_fees(&closed_trade());

        // Buy leg on 1000: 1 + 0.5 + 0.001 + 2
        assert_close(fees.buy_fees, 3.501);
        // Sell leg on 1100: 1.1 + 0.55 + 0.0011 + 2
        assert_close(fees.sell_fees, 3.6511);
        assert_close(fees.total_fees, 7.1521);

        assert_close(fees.breakdown.buy_brokerage, 1.0);
        assert_close(fees.breakdown.sell_brokerage, 1.1);
        assert_close(fees.breakdown.brokerage, 2.1);
        assert_close(fees.breakdown.exchange_charges, 1.05);
        assert_close(fees.breakdown.ifsca_fees, 0.0021);

        // 100 gross minus fees
        assert_close(calc.compute_net_pnl(&closed_trade()), 92.8479);
    }

    #[test]
    fn test_open_trade_scenario() {
        let calc = FeeCalculator::new(sample_config());
        let trade = open_trade();
        let fees = calc.compute_complete_trade_fees(&trade);

        assert_eq!(fees.sell_fees, 0.0);
        assert_eq!(fees.total_fees, fees.buy_fees);
        assert_close(fees.total_fees, 3.501);
        assert_eq!(fees.total_fees, calc.compute_trade_fees(&trade).total);
        assert_eq!(fees.breakdown.sell_brokerage, 0.0);
        assert_eq!(fees.breakdown.sell_exchange_charges, 0.0);
        assert_eq!(fees.breakdown.sell_ifsca_fees, 0.0);
        assert_eq!(fees.breakdown.platform_fees, 2.0);

        assert_eq!(calc.compute_net_pnl(&trade), 0.0);
    }

    #[test]
    fn test_closed_total_is_sum_of_legs() {
        let calc = FeeCalculator::new(FeesConfig {
            platform_fee_usd: 1.25,
            ..FeesConfig::default()
        });
        for (buy, sell, shares) in [(10.0, 12.5, 3.0), (999.0, 1.0, 0.5), (0.01, 0.02, 1e6)] {
            let trade = Trade::closed("X", date(), buy, sell, shares);
            let fees = calc.compute_complete_trade_fees(&trade);
            assert_eq!(fees.total_fees, fees.buy_fees + fees.sell_fees);
            assert_eq!(fees.breakdown.platform_fees, 2.0 * 1.25);
        }
    }

    #[test]
    fn test_brokerage_cap_applies_per_leg() {
        let calc = FeeCalculator::new(FeesConfig {
            brokerage_percentage: 1.0,
            brokerage_max_usd: 15.0,
            exchange_transaction_charges_percentage: 0.0,
            ifsca_turnover_fees_percentage: 0.0,
            platform_fee_usd: 0.0,
            ..FeesConfig::default()
        });
        // Each leg alone: 1% of 1000 = 10 and 1% of 1200 = 12, both under the cap.
        // The combined 22 exceeds the cap but is not clamped.
        let trade = Trade::closed("X", date(), 100.0, 120.0, 10.0);
        let fees = calc.compute_complete_trade_fees(&trade);
        assert_close(fees.breakdown.brokerage, 22.0);

        // Sell leg alone over the cap
        let trade = Trade::closed("X", date(), 100.0, 200.0, 10.0);
        let fees = calc.compute_complete_trade_fees(&trade);
        assert_close(fees.breakdown.buy_brokerage, 10.0);
        assert_close(fees.breakdown.sell_brokerage, 15.0);
    }

    #[test]
    fn test_zero_shares_yield_zero() {
        let calc = FeeCalculator::new(FeesConfig {
            platform_fee_usd: 0.0,
            ..sample_config()
        });
        let open = Trade::open("X", date(), 100.0, 0.0);
        let closed = Trade::closed("X", date(), 100.0, 110.0, 0.0);

        assert_eq!(calc.compute_trade_fees(&open).total, 0.0);
        assert_eq!(calc.compute_complete_trade_fees(&open).total_fees, 0.0);
        assert_eq!(calc.compute_complete_trade_fees(&closed).total_fees, 0.0);
        assert_eq!(calc.compute_net_pnl(&open), 0.0);
        assert_eq!(calc.compute_net_pnl(&closed), 0.0);
    }

    #[test]
    fn test_net_pnl_guards() {
        let calc = FeeCalculator::new(sample_config());

        let mut missing_sell = closed_trade();
        missing_sell.sell_price = None;
        assert_eq!(calc.compute_net_pnl(&missing_sell), 0.0);

        let mut missing_buy = closed_trade();
        missing_buy.buy_price = None;
        assert_eq!(calc.compute_net_pnl(&missing_buy), 0.0);

        let mut open_with_sell = closed_trade();
        open_with_sell.status = TradeStatus::Open;
        assert_eq!(calc.compute_net_pnl(&open_with_sell), 0.0);
        assert_eq!(calc.compute_complete_trade_fees(&open_with_sell).sell_fees, 0.0);
    }

    #[test]
    fn test_losing_trade_net_pnl() {
        let calc = FeeCalculator::new(sample_config());
        let trade = Trade::closed("TSLA", date(), 240.0, 225.0, 50.0);
        let fees = calc.compute_complete_trade_fees(&trade);
        assert_close(calc.compute_net_pnl(&trade), -750.0 - fees.total_fees);
    }

    #[test]
    fn test_computation_is_repeatable() {
        let calc = FeeCalculator::new(sample_config());
        let trade = closed_trade();
        assert_eq!(
            calc.compute_complete_trade_fees(&trade),
            calc.compute_complete_trade_fees(&trade)
        );
        assert_eq!(calc.compute_net_pnl(&trade), calc.compute_net_pnl(&trade));
    }
}
