#[cfg(test)]
mod tests {
    use bs_greeks::prelude::*;

    const PARITY_TOLERANCE: f64 = 1e-6;

    #[test]
    fn test_put_call_parity_across_grid() {
        for spot in [80.0, 100.0, 125.0] {
            for strike in [90.0, 100.0, 110.0] {
                for time in [7.0 / 365.25, 0.5, 2.0] {
                    for vol in [0.1, 0.4, 1.2] {
                        for rate in [0.0, BASE_RATE, 0.05] {
                            let call = value_price(OptionKind::Call, spot, strike, time, vol, rate);
                            let put = value_price(OptionKind::Put, spot, strike, time, vol, rate);
                            let expected = spot - strike * (-rate * time).exp();
                            assert!(
                                (call - put - expected).abs() < PARITY_TOLERANCE,
                                "parity broken for S={spot} K={strike} T={time} vol={vol} r={rate}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_reference_case() {
        let time = 30.0 / 365.25;
        let price = value_price(OptionKind::Call, 100.0, 100.0, time, 0.20, 0.0007);
        assert!((price - 2.2892).abs() < 1e-3);

        let greeks = price_first_greeks(OptionKind::Call, 100.0, 100.0, time, 0.20, 0.0007);
        assert!((greeks.delta - 0.512).abs() < 1e-3);
        assert!((greeks.vega - 0.114).abs() < 1e-3);
        assert!(price_gamma(OptionKind::Call, 100.0, 100.0, time, 0.20, 0.0007) > 0.0);
    }

    #[test]
    fn test_kind_strings_parse_case_insensitively() {
        for kind in ["c", "C", "call", "Call", "CALL"] {
            let option = OptionContract::parse(kind, 100.0, 100.0, 0.5).unwrap();
            assert_eq!(option.kind, OptionKind::Call);
        }
        for kind in ["p", "P", "put", "Put"] {
            let option = OptionContract::parse(kind, 100.0, 100.0, 0.5).unwrap();
            assert_eq!(option.kind, OptionKind::Put);
        }
    }

    #[test]
    fn test_invalid_kind_is_a_usage_error() {
        let err = OptionContract::parse("straddle", 100.0, 100.0, 0.5).unwrap_err();
        assert!(matches!(err, PricingError::InvalidKind { .. }));
        assert!(err.is_usage_error());
    }

    #[test]
    fn test_option_serializes_with_greeks() {
        let config = EngineConfig::default();
        let mut option = OptionContract::call(100.0, 100.0, 0.25).with_iv(0.2);
        solve_fast(&mut option, true, &config).unwrap();

        let json = serde_json::to_string(&option).unwrap();
        let back: OptionContract = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, OptionKind::Call);
        assert!(back.greeks.is_some());
    }
}
