#[cfg(test)]
mod tests {
    use bs_greeks::prelude::*;

    fn relative_gap(a: f64, b: f64) -> f64 {
        (a - b).abs() / b.abs().max(1e-12)
    }

    #[test]
    fn test_sign_sanity_across_grid() {
        let analytical = AnalyticalGreeks::default();
        for strike in [70.0, 90.0, 100.0, 110.0, 130.0] {
            for time in [14.0 / 365.25, 0.25, 1.0] {
                for vol in [0.1, 0.3, 0.8] {
                    let call = price_first_greeks(OptionKind::Call, 100.0, strike, time, vol, BASE_RATE);
                    let put = price_first_greeks(OptionKind::Put, 100.0, strike, time, vol, BASE_RATE);
                    // Deep in or out of the money the deltas round to exactly 0 or ±1.
                    assert!((0.0..=1.0).contains(&call.delta), "call K={strike} T={time} vol={vol}");
                    assert!((-1.0..=0.0).contains(&put.delta), "put K={strike} T={time} vol={vol}");
                    if (90.0..=110.0).contains(&strike) && time >= 0.25 {
                        assert!(call.delta > 0.0 && call.delta < 1.0);
                        assert!(put.delta > -1.0 && put.delta < 0.0);
                    }
                    assert!(call.vega >= 0.0 && put.vega >= 0.0);

                    for kind in [OptionKind::Call, OptionKind::Put] {
                        assert!(price_gamma(kind, 100.0, strike, time, vol, BASE_RATE) >= 0.0);
                        let fast = analytical.greeks(kind, 100.0, strike, time, BASE_RATE, vol);
                        assert!(fast.gamma >= 0.0 && fast.vega >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_strategies_agree_near_the_money() {
        let analytical = AnalyticalGreeks::default();
        for kind in [OptionKind::Call, OptionKind::Put] {
            for strike in [95.0, 100.0, 105.0] {
                for time in [30.0 / 365.25, 0.5] {
                    let exact = price_first_greeks(kind, 100.0, strike, time, 0.25, 0.01);
                    let fast = analytical.greeks(kind, 100.0, strike, time, 0.01, 0.25);
                    let gamma = price_gamma(kind, 100.0, strike, time, 0.25, 0.01);

                    assert!(relative_gap(exact.delta, fast.delta) < 0.01);
                    assert!(relative_gap(exact.vega, fast.vega) < 0.01);
                    assert!(relative_gap(exact.theta, fast.theta) < 0.01);
                    assert!(relative_gap(gamma, fast.gamma) < 0.01);
                }
            }
        }
    }

    #[test]
    fn test_exact_and_fast_solves_agree() {
        let config = EngineConfig::default();
        let mut exact = OptionContract::put(100.0, 102.0, 0.3).with_iv(0.3);
        let mut fast = exact.clone();

        solve_exact(&mut exact, true, &config).unwrap();
        solve_fast(&mut fast, true, &config).unwrap();

        let (a, b) = (exact.greeks.unwrap(), fast.greeks.unwrap());
        assert!((exact.npv.unwrap() - fast.npv.unwrap()).abs() < 1e-9);
        assert!(relative_gap(a.delta, b.delta) < 1e-6);
        assert!(relative_gap(a.gamma, b.gamma) < 1e-6);
        assert!(relative_gap(a.theta, b.theta) < 1e-6);
        assert!(relative_gap(a.vega, b.vega) < 1e-6);
    }

    #[test]
    fn test_all_second_order_greeks_are_finite() {
        let which = SecondOrder::ALL;
        let values = price_second_greeks(OptionKind::Call, 100.0, 100.0, 0.5, 0.2, 0.02, &which);
        assert_eq!(values.len(), 5);
        assert!(values.iter().all(|v| v.is_finite()));
        // Gamma and vomma of an at-the-money option.
        assert!(values[0] > 0.0);
        assert!(values[3].abs() < 1.0);
    }

    #[test]
    fn test_second_order_from_indices() {
        let which: Vec<SecondOrder> = [0, 3]
            .into_iter()
            .map(SecondOrder::from_index)
            .collect::<Result<_, _>>()
            .unwrap();
        let values = price_second_greeks(OptionKind::Put, 100.0, 90.0, 1.0, 0.3, 0.0, &which);
        let gamma = price_gamma(OptionKind::Put, 100.0, 90.0, 1.0, 0.3, 0.0);
        assert!((values[0] - gamma).abs() < 1e-12);
    }

    #[test]
    fn test_greeks_unwrap_tracked_values() {
        use bs_greeks::pricing::{DifferentiableScalar, Tape};

        let tape = Tape::new();
        let x = tape.variable(2.0);
        let y = x * x;
        let slope = y.gradient_with(&x);

        let greeks = Greeks::new(y, slope, 0.5, 1.0);
        assert_eq!(greeks.theta, 4.0);
        assert_eq!(greeks.delta, 4.0);
        assert!((slope.value() - 4.0).abs() < 1e-12);
    }
}
