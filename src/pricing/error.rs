//! Error types for option valuation and implied volatility.

use std::fmt;

/// Errors raised by the pricing engine.
///
/// Usage errors (`InvalidKind`, `MissingInput`, `InvalidSecondOrder`) are always
/// surfaced. The numerical variants are tagged so callers can pick a fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Option kind did not start with `c` or `p`.
    InvalidKind {
        /// The rejected kind string.
        kind: String,
    },

    /// Neither an implied volatility nor an observed price was supplied.
    MissingInput {
        /// Description of what is missing.
        message: String,
    },

    /// Second-order Greek index outside `0..=4`.
    InvalidSecondOrder {
        /// The rejected index.
        index: usize,
    },

    /// Observed price is below the (discounted) intrinsic value.
    BelowIntrinsic {
        /// Observed price.
        price: f64,
        /// Discounted intrinsic value.
        intrinsic: f64,
    },

    /// Observed price is at or above the maximum value the option can take.
    AboveMaximum {
        /// Observed price.
        price: f64,
        /// Upper price bound.
        maximum: f64,
    },

    /// Bracketed root finder found no sign change between the bracket ends.
    NotBracketed {
        /// Lower end of the bracket.
        low: f64,
        /// Upper end of the bracket.
        high: f64,
    },

    /// Iterative root finder did not converge.
    ConvergenceFailure {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last volatility estimate before giving up.
        last_iv: f64,
    },

    /// A computation produced a non-finite value.
    NumericalFailure {
        /// Description of the failure.
        message: String,
    },
}

impl PricingError {
    /// Returns true for errors that come from bad caller input rather than numerics.
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            PricingError::InvalidKind { .. }
                | PricingError::MissingInput { .. }
                | PricingError::InvalidSecondOrder { .. }
        )
    }
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidKind { kind } => {
                write!(f, "invalid option kind {kind:?}, expected 'c'/'call' or 'p'/'put'")
            }
            PricingError::MissingInput { message } => {
                write!(f, "missing input: {message}")
            }
            PricingError::InvalidSecondOrder { index } => {
                write!(f, "second-order index {index} is out of range 0..=4")
            }
            PricingError::BelowIntrinsic { price, intrinsic } => {
                write!(
                    f,
                    "price {price:.4} is below intrinsic value {intrinsic:.4}"
                )
            }
            PricingError::AboveMaximum { price, maximum } => {
                write!(f, "price {price:.4} is at or above maximum value {maximum:.4}")
            }
            PricingError::NotBracketed { low, high } => {
                write!(f, "no sign change in volatility bracket [{low}, {high}]")
            }
            PricingError::ConvergenceFailure {
                iterations,
                last_iv,
            } => {
                write!(
                    f,
                    "solver did not converge after {iterations} iterations, last IV: {last_iv:.4}"
                )
            }
            PricingError::NumericalFailure { message } => {
                write!(f, "numerical failure: {message}")
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Result alias used throughout the pricing engine.
pub type Result<T> = std::result::Result<T, PricingError>;
