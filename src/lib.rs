//! # bs-greeks
//!
//! Theoretical option prices, Greeks and implied volatility under the
//! Black-Scholes model.
//!
//! Every function is a pure computation over scalar inputs apart from the
//! solve entry points, which fill in the [`OptionContract`](pricing::OptionContract)
//! passed to them. There is no shared mutable state, so independent options
//! can be priced on as many threads as the caller likes.
//!
//! ## Choosing a path
//!
//! | Need | Function |
//! |------|----------|
//! | Price only | [`value_price`](pricing::value_price) |
//! | Exact first-order Greeks | [`price_first_greeks`](pricing::price_first_greeks) |
//! | Second-order Greeks | [`price_second_greeks`](pricing::price_second_greeks) |
//! | Everything, exact | [`solve_exact`](pricing::solve_exact) |
//! | Everything, fast | [`solve_fast`](pricing::solve_fast) |
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`trace` for solver iterations, `debug`
//! for results, `warn` when a fallback is taken) and never installs a
//! subscriber itself.

pub mod pricing;

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::pricing::{
        AnalyticalGreeks, BASE_RATE, DAYS_PER_YEAR, EngineConfig, FirstOrderGreeks, Greeks,
        OptionContract, OptionKind, PricingError, SecondOrder, SolverConfig,
        implied_volatility_auto, implied_volatility_fast, price_first_greeks, price_gamma,
        price_second_greeks, solve_exact, solve_fast, value_price,
    };
}
