//! Option and Greeks records.

use super::error::{PricingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Option kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

impl OptionKind {
    /// Single-character flag, `'c'` or `'p'`.
    #[must_use]
    pub fn flag(self) -> char {
        match self {
            OptionKind::Call => 'c',
            OptionKind::Put => 'p',
        }
    }

    /// Returns true for calls.
    #[must_use]
    pub fn is_call(self) -> bool {
        self == OptionKind::Call
    }
}

impl FromStr for OptionKind {
    type Err = PricingError;

    /// Matches case-insensitively on the first character, so `"c"`, `"Call"`
    /// and `"CALL"` are all calls.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('c') => Ok(OptionKind::Call),
            Some('p') => Ok(OptionKind::Put),
            _ => Err(PricingError::InvalidKind {
                kind: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => write!(f, "call"),
            OptionKind::Put => write!(f, "put"),
        }
    }
}

/// First-order sensitivities plus gamma.
///
/// Fields are always plain `f64`. The constructor takes anything convertible
/// into `f64`, which includes tracked autodiff variables, and unwraps it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Value decay per calendar day.
    pub theta: f64,
    /// Price sensitivity to the underlying.
    pub delta: f64,
    /// Delta sensitivity to the underlying.
    pub gamma: f64,
    /// Price change for a one percentage point move in volatility.
    pub vega: f64,
}

impl Greeks {
    /// Creates a Greeks record, unwrapping each input to a plain scalar.
    #[must_use]
    pub fn new(
        theta: impl Into<f64>,
        delta: impl Into<f64>,
        gamma: impl Into<f64>,
        vega: impl Into<f64>,
    ) -> Self {
        Self {
            theta: theta.into(),
            delta: delta.into(),
            gamma: gamma.into(),
            vega: vega.into(),
        }
    }
}

impl fmt::Display for Greeks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "theta={:.6} delta={:.6} gamma={:.6} vega={:.6}",
            self.theta, self.delta, self.gamma, self.vega
        )
    }
}

/// Price together with the first-order Greeks from one differentiation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FirstOrderGreeks {
    /// Theoretical value.
    pub npv: f64,
    /// Value decay per calendar day.
    pub theta: f64,
    /// Price sensitivity to the underlying.
    pub delta: f64,
    /// Price change for a one percentage point move in volatility.
    pub vega: f64,
}

/// Second-order sensitivities addressable by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecondOrder {
    /// ∂²V/∂S² (index 0).
    Gamma,
    /// ∂²V/∂T∂S per calendar day (index 1).
    Charm,
    /// ∂²V/∂T∂σ per calendar day and vol point (index 2).
    Veta,
    /// ∂²V/∂σ² (index 3).
    Vomma,
    /// ∂²V/∂σ∂r (index 4).
    Vera,
}

impl SecondOrder {
    /// All second-order sensitivities in index order.
    pub const ALL: [SecondOrder; 5] = [
        SecondOrder::Gamma,
        SecondOrder::Charm,
        SecondOrder::Veta,
        SecondOrder::Vomma,
        SecondOrder::Vera,
    ];

    /// Looks up a sensitivity by its numeric index.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(PricingError::InvalidSecondOrder { index })
    }

    /// Numeric index of this sensitivity.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// An option contract with its inputs and computed outputs.
///
/// Either `iv` or `npv` must be set before solving. Orchestration fills in
/// the missing one together with `greeks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Call or put.
    pub kind: OptionKind,
    /// Current underlying price.
    pub underlying: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to expiration in years (e.g., 2 days = 2.0 / 365.25).
    pub expiry: f64,
    /// Implied volatility (0.30 = 30%). `0.0` marks an unsolvable price.
    pub iv: Option<f64>,
    /// Theoretical value, or the observed price when solving for `iv`.
    pub npv: Option<f64>,
    /// Sensitivities, filled in by the solve functions.
    pub greeks: Option<Greeks>,
}

impl OptionContract {
    /// Creates a contract with no volatility, price or Greeks yet.
    #[must_use]
    pub fn new(kind: OptionKind, underlying: f64, strike: f64, expiry: f64) -> Self {
        Self {
            kind,
            underlying,
            strike,
            expiry,
            iv: None,
            npv: None,
            greeks: None,
        }
    }

    /// Creates a contract from a kind string such as `"call"` or `"P"`.
    pub fn parse(kind: &str, underlying: f64, strike: f64, expiry: f64) -> Result<Self> {
        Ok(Self::new(kind.parse()?, underlying, strike, expiry))
    }

    /// Creates a call contract.
    #[must_use]
    pub fn call(underlying: f64, strike: f64, expiry: f64) -> Self {
        Self::new(OptionKind::Call, underlying, strike, expiry)
    }

    /// Creates a put contract.
    #[must_use]
    pub fn put(underlying: f64, strike: f64, expiry: f64) -> Self {
        Self::new(OptionKind::Put, underlying, strike, expiry)
    }

    /// Sets a known implied volatility.
    #[must_use]
    pub fn with_iv(mut self, iv: f64) -> Self {
        self.iv = Some(iv);
        self
    }

    /// Sets an observed price.
    #[must_use]
    pub fn with_npv(mut self, npv: f64) -> Self {
        self.npv = Some(npv);
        self
    }

    /// Implied volatility if it is usable, treating `0.0` as absent.
    #[must_use]
    pub fn solved_iv(&self) -> Option<f64> {
        self.iv.filter(|iv| *iv != 0.0)
    }

    /// Observed price, or a usage error when there is none.
    ///
    /// A price of `0.0` carries no volatility information and counts as missing.
    pub fn require_npv(&self) -> Result<f64> {
        self.npv.filter(|npv| *npv != 0.0).ok_or_else(|| PricingError::MissingInput {
            message: "an 'npv' is required to derive 'iv' when no 'iv' is given".to_string(),
        })
    }
}
