//! Black-Scholes valuation, Greeks and implied volatility.
//!
//! This module prices European options under the Black-Scholes model and
//! derives their sensitivities in two interchangeable ways:
//!
//! - **Exact**: the valuation function is evaluated on a reverse-mode
//!   autodiff tape and differentiated, which also yields second-order
//!   Greeks such as gamma, charm, veta, vomma and vera.
//! - **Fast**: closed-form first-order Greeks with no differentiation
//!   machinery, roughly an order of magnitude quicker.
//!
//! Implied volatility is obtained by analytical inversion, by a secant
//! search from a guess, or by a bracketed Brent search that never fails.
//!
//! # Example
//!
//! ```
//! use bs_greeks::prelude::*;
//!
//! let config = EngineConfig::default();
//! let mut option = OptionContract::parse("call", 100.0, 100.0, 30.0 / 365.25)
//!     .unwrap()
//!     .with_npv(2.29);
//!
//! solve_fast(&mut option, true, &config).unwrap();
//! let greeks = option.greeks.unwrap();
//! assert!(greeks.delta > 0.5 && greeks.delta < 0.53);
//! ```

mod analytical;
mod autodiff;
mod black_scholes;
mod config;
mod derivatives;
mod error;
mod root;
mod solve;
mod solver;
mod types;

pub use analytical::AnalyticalGreeks;
pub use autodiff::{DifferentiableScalar, Tape, Var};
pub use black_scholes::{Scalar, lower_bound, norm_cdf, norm_pdf, upper_bound, value, value_price};
pub use config::{BASE_RATE, DAYS_PER_YEAR, EngineConfig, SolverConfig};
pub use derivatives::{price_first_greeks, price_gamma, price_second_greeks};
pub use error::{PricingError, Result};
pub use root::{brent, secant};
pub use solve::{solve_exact, solve_fast};
pub use solver::{
    IvTarget, implied_volatility_auto, implied_volatility_fast, solve_iv_bracketed, solve_iv_fast,
    solve_iv_guessed,
};
pub use types::{FirstOrderGreeks, Greeks, OptionContract, OptionKind, SecondOrder};
