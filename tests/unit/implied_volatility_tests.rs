#[cfg(test)]
mod tests {
    use bs_greeks::prelude::*;

    const TOLERANCE: f64 = 1e-4;

    #[test]
    fn test_round_trip_fast_and_auto() {
        let config = EngineConfig::default();
        let rate = config.risk_free_rate;
        for kind in [OptionKind::Call, OptionKind::Put] {
            for strike in [95.0, 100.0, 105.0] {
                for time in [0.25, 0.5, 1.0] {
                    for vol in [0.05, 0.2, 0.5, 1.0, 2.0] {
                        let price = value_price(kind, 100.0, strike, time, vol, rate);
                        let option = OptionContract::new(kind, 100.0, strike, time).with_npv(price);

                        let mut fast = option.clone();
                        let fast_iv = implied_volatility_fast(&mut fast, &config).unwrap();
                        assert!(
                            (fast_iv - vol).abs() < TOLERANCE,
                            "fast {kind} K={strike} T={time}: {fast_iv} vs {vol}"
                        );

                        let mut auto = option.clone();
                        let auto_iv = implied_volatility_auto(&mut auto, 0.0, &config).unwrap();
                        assert!(
                            (auto_iv - vol).abs() < TOLERANCE,
                            "auto {kind} K={strike} T={time}: {auto_iv} vs {vol}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_guessed_search_near_the_root() {
        let config = EngineConfig::default();
        let price = value_price(OptionKind::Call, 100.0, 100.0, 0.5, 0.45, config.risk_free_rate);
        let mut option = OptionContract::call(100.0, 100.0, 0.5).with_npv(price);

        let iv = implied_volatility_auto(&mut option, 0.4, &config).unwrap();
        assert!((iv - 0.45).abs() < TOLERANCE);
    }

    #[test]
    fn test_unsolvable_prices_return_zero() {
        let config = EngineConfig::default();
        for price in [-1.0, 100.5, 250.0] {
            let mut option = OptionContract::call(100.0, 100.0, 0.5).with_npv(price);
            let iv = implied_volatility_auto(&mut option, 0.0, &config).unwrap();
            assert_eq!(iv, 0.0, "price {price}");
        }
    }

    #[test]
    fn test_missing_npv_is_fatal() {
        let config = EngineConfig::default();
        let mut option = OptionContract::put(100.0, 100.0, 0.5);
        assert!(matches!(
            implied_volatility_fast(&mut option, &config),
            Err(PricingError::MissingInput { .. })
        ));
    }

    #[test]
    fn test_custom_rate_is_used() {
        let config = EngineConfig::default().with_risk_free_rate(0.05);
        let price = value_price(OptionKind::Put, 100.0, 110.0, 1.0, 0.3, 0.05);
        let mut option = OptionContract::put(100.0, 110.0, 1.0).with_npv(price);

        let iv = implied_volatility_fast(&mut option, &config).unwrap();
        assert!((iv - 0.3).abs() < TOLERANCE);
    }
}
