//! Black-Scholes valuation.
//!
//! The pricing formula is written once over the [`Scalar`] trait so the same
//! code evaluates on plain `f64` and on tracked autodiff variables.

use super::autodiff::Var;
use super::types::OptionKind;
use implied_vol::{DefaultSpecialFn, SpecialFn};
use std::f64::consts::PI;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Arithmetic needed by the Black-Scholes formula.
pub trait Scalar:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Add<f64, Output = Self>
    + Mul<f64, Output = Self>
{
    /// Natural logarithm.
    fn ln(self) -> Self;
    /// Natural exponential.
    fn exp(self) -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Standard normal cumulative distribution.
    fn norm_cdf(self) -> Self;
}

impl Scalar for f64 {
    fn ln(self) -> Self {
        f64::ln(self)
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn norm_cdf(self) -> Self {
        DefaultSpecialFn::norm_cdf(self)
    }
}

impl Scalar for Var<'_> {
    fn ln(self) -> Self {
        Var::ln(self)
    }

    fn exp(self) -> Self {
        Var::exp(self)
    }

    fn sqrt(self) -> Self {
        Var::sqrt(self)
    }

    fn norm_cdf(self) -> Self {
        Var::norm_cdf(self)
    }
}

/// Standard normal probability density function.
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution function.
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    DefaultSpecialFn::norm_cdf(x)
}

/// Calculates d1 and d2 of the Black-Scholes formula.
///
/// d1 = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d2 = d1 - σ√T
pub fn d1_d2<S: Scalar>(spot: S, strike: S, time: S, vol: S, rate: S) -> (S, S) {
    let vol_sqrt_time = vol * time.sqrt();
    let d1 = ((spot / strike).ln() + (rate + vol * vol * 0.5) * time) / vol_sqrt_time;
    (d1, d1 - vol_sqrt_time)
}

/// Theoretical option value.
///
/// For calls: C = S·N(d1) - K·e^(-rT)·N(d2)
/// For puts:  P = K·e^(-rT)·N(-d2) - S·N(-d1)
///
/// Inputs are not validated: non-positive spot, strike, time or volatility
/// give NaN or infinite results.
pub fn value<S: Scalar>(kind: OptionKind, spot: S, strike: S, time: S, vol: S, rate: S) -> S {
    let (d1, d2) = d1_d2(spot, strike, time, vol, rate);
    let discounted_strike = strike * (-(rate * time)).exp();

    match kind {
        OptionKind::Call => spot * d1.norm_cdf() - discounted_strike * d2.norm_cdf(),
        OptionKind::Put => discounted_strike * (-d2).norm_cdf() - spot * (-d1).norm_cdf(),
    }
}

/// Theoretical option value on plain floats.
///
/// # Arguments
/// - `kind`: Call or put
/// - `spot`: Underlying price (S)
/// - `strike`: Strike price (K)
/// - `time`: Time to expiry in years (T)
/// - `vol`: Volatility (σ, 0.30 = 30%)
/// - `rate`: Risk-free rate (r)
#[must_use]
pub fn value_price(kind: OptionKind, spot: f64, strike: f64, time: f64, vol: f64, rate: f64) -> f64 {
    value(kind, spot, strike, time, vol, rate)
}

/// Discounted intrinsic value, the lower bound of a European option price.
#[must_use]
pub fn lower_bound(kind: OptionKind, spot: f64, strike: f64, time: f64, rate: f64) -> f64 {
    let discounted_strike = strike * (-rate * time).exp();
    match kind {
        OptionKind::Call => (spot - discounted_strike).max(0.0),
        OptionKind::Put => (discounted_strike - spot).max(0.0),
    }
}

/// Upper bound of a European option price.
#[must_use]
pub fn upper_bound(kind: OptionKind, spot: f64, strike: f64, time: f64, rate: f64) -> f64 {
    match kind {
        OptionKind::Call => spot,
        OptionKind::Put => strike * (-rate * time).exp(),
    }
}
