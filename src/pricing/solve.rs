//! Entry points that fill in an option's volatility, price and Greeks.

use super::analytical::AnalyticalGreeks;
use super::black_scholes::value_price;
use super::config::EngineConfig;
use super::derivatives::{price_first_greeks, price_gamma};
use super::error::Result;
use super::solver::{implied_volatility_auto, implied_volatility_fast};
use super::types::{Greeks, OptionContract};
use tracing::{debug, warn};

/// Exact Greeks by automatic differentiation.
///
/// Solves `iv` from `npv` with the bracketed search when `iv` is missing,
/// then computes price, theta, delta, vega and gamma by differentiating the
/// valuation function. `npv` is overwritten when `compute_npv` is set.
pub fn solve_exact<'a>(
    option: &'a mut OptionContract,
    compute_npv: bool,
    config: &EngineConfig,
) -> Result<&'a mut OptionContract> {
    let iv = match option.solved_iv() {
        Some(iv) => iv,
        None => implied_volatility_auto(option, 0.0, config)?,
    };
    let rate = config.risk_free_rate;

    let first = price_first_greeks(
        option.kind,
        option.underlying,
        option.strike,
        option.expiry,
        iv,
        rate,
    );
    let gamma = price_gamma(
        option.kind,
        option.underlying,
        option.strike,
        option.expiry,
        iv,
        rate,
    );

    if compute_npv {
        option.npv = Some(first.npv);
    }
    option.greeks = Some(Greeks::new(first.theta, first.delta, gamma, first.vega));
    debug!("exact {} K={}: iv={} {:?}", option.kind, option.strike, iv, option.greeks);

    Ok(option)
}

/// Fast Greeks from closed-form formulas.
///
/// Solves `iv` analytically when it is missing (falling back to the bracketed
/// search), recomputes `npv` when `compute_npv` is set, and fills in the four
/// first-order Greeks. A non-finite recomputed price leaves `npv` unchanged.
pub fn solve_fast<'a>(
    option: &'a mut OptionContract,
    compute_npv: bool,
    config: &EngineConfig,
) -> Result<&'a mut OptionContract> {
    let iv = match option.solved_iv() {
        Some(iv) => iv,
        None => implied_volatility_fast(option, config)?,
    };
    let rate = config.risk_free_rate;

    if compute_npv {
        let npv = value_price(
            option.kind,
            option.underlying,
            option.strike,
            option.expiry,
            iv,
            rate,
        );
        if npv.is_finite() {
            option.npv = Some(npv);
        } else {
            warn!("revaluation at iv={} gave {}, keeping npv {:?}", iv, npv, option.npv);
        }
    }

    let greeks = AnalyticalGreeks::new(config.quiet).greeks(
        option.kind,
        option.underlying,
        option.strike,
        option.expiry,
        rate,
        iv,
    );
    option.greeks = Some(greeks);
    debug!("fast {} K={}: iv={} {}", option.kind, option.strike, iv, greeks);

    Ok(option)
}
