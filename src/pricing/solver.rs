//! Implied volatility solvers.
//!
//! Three ways to invert the valuation function against an observed price:
//!
//! - [`solve_iv_guessed`]: secant search from a starting guess. Fast, but a
//!   poor guess makes it diverge and the failure is returned to the caller.
//! - [`solve_iv_bracketed`]: Brent search over `[1e-12, 5000]`. Always converges
//!   when the price is attainable.
//! - [`solve_iv_fast`]: rational analytical inversion, no iteration.
//!
//! The `implied_volatility_*` functions work on an [`OptionContract`] and
//! store the result in its `iv` field.

use super::analytical::AnalyticalGreeks;
use super::black_scholes::value_price;
use super::config::{EngineConfig, SolverConfig};
use super::error::Result;
use super::root::{brent, secant};
use super::types::{OptionContract, OptionKind};
use tracing::{trace, warn};

/// Inputs of a single implied volatility search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IvTarget {
    /// Call or put.
    pub kind: OptionKind,
    /// Observed price to reproduce.
    pub price: f64,
    /// Underlying price.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to expiry in years.
    pub time: f64,
    /// Risk-free rate.
    pub rate: f64,
}

impl IvTarget {
    /// Builds a search target from an option's observed price.
    pub fn from_option(option: &OptionContract, rate: f64) -> Result<Self> {
        Ok(Self {
            kind: option.kind,
            price: option.require_npv()?,
            spot: option.underlying,
            strike: option.strike,
            time: option.expiry,
            rate,
        })
    }

    /// Pricing error `V(σ) - price`.
    #[must_use]
    pub fn objective(&self, vol: f64) -> f64 {
        value_price(self.kind, self.spot, self.strike, self.time, vol, self.rate) - self.price
    }
}

/// Secant search seeded at `guess`.
pub fn solve_iv_guessed(target: &IvTarget, guess: f64, config: &SolverConfig) -> Result<f64> {
    let (iv, iterations) = secant(|vol| target.objective(vol), guess, config)?;
    trace!("secant iv {} after {} iterations", iv, iterations);
    Ok(iv)
}

/// Brent search over the configured bracket.
///
/// Returns [`PricingError::NotBracketed`] when the price cannot be reached
/// by any volatility in the bracket.
pub fn solve_iv_bracketed(target: &IvTarget, config: &SolverConfig) -> Result<f64> {
    let (iv, iterations) = brent(
        |vol| target.objective(vol),
        config.bracket_low,
        config.bracket_high,
        config,
    )?;
    trace!("bracketed iv {} after {} iterations", iv, iterations);
    Ok(iv)
}

/// Analytical inversion.
pub fn solve_iv_fast(target: &IvTarget, quiet: bool) -> Result<f64> {
    AnalyticalGreeks::new(quiet).implied_volatility(
        target.kind,
        target.price,
        target.spot,
        target.strike,
        target.time,
        target.rate,
    )
}

/// Numerical implied volatility, stored into `option.iv`.
///
/// With a nonzero `guess` the secant search is used and divergence is an
/// error. With `guess == 0.0` the bracketed search is used; it never fails on
/// numerical grounds and yields `0.0` when the price is unattainable. The
/// only error on that path is a missing `npv`.
pub fn implied_volatility_auto(
    option: &mut OptionContract,
    guess: f64,
    config: &EngineConfig,
) -> Result<f64> {
    let target = IvTarget::from_option(option, config.risk_free_rate)?;

    let iv = if guess != 0.0 {
        solve_iv_guessed(&target, guess, &config.solver)?
    } else {
        match solve_iv_bracketed(&target, &config.solver) {
            Ok(iv) => iv,
            Err(err) => {
                warn!("no implied volatility for price {}: {}", target.price, err);
                0.0
            }
        }
    };

    option.iv = Some(iv);
    Ok(iv)
}

/// Analytical implied volatility, stored into `option.iv`.
///
/// When the analytical inversion fails (typically a deep in-the-money price
/// below intrinsic value) the bracketed numerical search is used instead.
pub fn implied_volatility_fast(option: &mut OptionContract, config: &EngineConfig) -> Result<f64> {
    let target = IvTarget::from_option(option, config.risk_free_rate)?;

    match solve_iv_fast(&target, config.quiet) {
        Ok(iv) => {
            option.iv = Some(iv);
            Ok(iv)
        }
        Err(err) => {
            warn!("analytical iv failed ({}), using bracketed search", err);
            implied_volatility_auto(option, 0.0, config)
        }
    }
}
