#[cfg(test)]
mod tests {
    use bs_greeks::prelude::*;
    use bs_greeks::pricing::{IvTarget, solve_iv_fast};

    #[test]
    fn test_below_intrinsic_falls_back_to_auto() {
        let config = EngineConfig::default();
        for (kind, spot, strike, price) in [
            (OptionKind::Call, 150.0, 100.0, 45.0),
            (OptionKind::Put, 60.0, 100.0, 35.0),
        ] {
            let option = OptionContract::new(kind, spot, strike, 0.5).with_npv(price);
            let target = IvTarget::from_option(&option, config.risk_free_rate).unwrap();
            assert!(matches!(
                solve_iv_fast(&target, true),
                Err(PricingError::BelowIntrinsic { .. })
            ));

            let mut fast = option.clone();
            let mut auto = option.clone();
            let fast_iv = implied_volatility_fast(&mut fast, &config).unwrap();
            let auto_iv = implied_volatility_auto(&mut auto, 0.0, &config).unwrap();
            assert!((fast_iv - auto_iv).abs() < 1e-4);
        }
    }

    #[test]
    fn test_deep_itm_price_solves_on_both_paths() {
        let config = EngineConfig::default();
        let price = value_price(OptionKind::Call, 140.0, 100.0, 0.25, 0.35, config.risk_free_rate);
        let option = OptionContract::call(140.0, 100.0, 0.25).with_npv(price);

        let mut fast = option.clone();
        let mut auto = option.clone();
        let fast_iv = implied_volatility_fast(&mut fast, &config).unwrap();
        let auto_iv = implied_volatility_auto(&mut auto, 0.0, &config).unwrap();
        assert!((fast_iv - 0.35).abs() < 1e-3);
        assert!((fast_iv - auto_iv).abs() < 1e-3);
    }

    #[test]
    fn test_solve_exact_zero_sentinel_is_recorded() {
        let config = EngineConfig::default();
        let mut option = OptionContract::call(100.0, 100.0, 0.5).with_npv(500.0);

        solve_exact(&mut option, false, &config).unwrap();
        assert_eq!(option.iv, Some(0.0));
        assert_eq!(option.npv, Some(500.0));
    }

    #[test]
    fn test_known_iv_skips_solver() {
        let config = EngineConfig::default();
        // The observed price is inconsistent on purpose; a known iv wins.
        let mut option = OptionContract::call(100.0, 100.0, 0.5).with_iv(0.2).with_npv(99.0);

        solve_fast(&mut option, true, &config).unwrap();
        assert_eq!(option.iv, Some(0.2));
        let expected = value_price(OptionKind::Call, 100.0, 100.0, 0.5, 0.2, config.risk_free_rate);
        assert!((option.npv.unwrap() - expected).abs() < 1e-12);
    }
}
