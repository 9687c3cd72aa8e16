//! Exact Greeks by reverse-mode differentiation of the valuation function.

use super::autodiff::{DifferentiableScalar, Tape};
use super::black_scholes::value;
use super::config::DAYS_PER_YEAR;
use super::types::{FirstOrderGreeks, OptionKind, SecondOrder};
use tracing::trace;

/// Price and first-order Greeks from a single reverse sweep.
///
/// Spot, time and volatility are tracked; strike and rate are held fixed.
///
/// - theta = -∂V/∂T / 365.25 (time to expiry shrinks as days pass)
/// - delta = ∂V/∂S
/// - vega = ∂V/∂σ / 100 (per volatility point)
#[must_use]
pub fn price_first_greeks(
    kind: OptionKind,
    spot: f64,
    strike: f64,
    time: f64,
    vol: f64,
    rate: f64,
) -> FirstOrderGreeks {
    let tape = Tape::new();
    let s = tape.variable(spot);
    let k = tape.constant(strike);
    let t = tape.variable(time);
    let sigma = tape.variable(vol);
    let r = tape.constant(rate);

    let npv = value(kind, s, k, t, sigma, r);
    let grads = npv.gradients(&[s, t, sigma]);

    let greeks = FirstOrderGreeks {
        npv: npv.value(),
        theta: -grads[1].value() / DAYS_PER_YEAR,
        delta: grads[0].value(),
        vega: grads[2].value() / 100.0,
    };
    trace!("first-order greeks ({} nodes): {:?}", tape.len(), greeks);
    greeks
}

/// Requested second-order Greeks, in request order.
///
/// Each entry gets its own tape with only the two variables it needs
/// tracked; a tape's recorded graph belongs to one forward pass.
#[must_use]
pub fn price_second_greeks(
    kind: OptionKind,
    spot: f64,
    strike: f64,
    time: f64,
    vol: f64,
    rate: f64,
    which: &[SecondOrder],
) -> Vec<f64> {
    which
        .iter()
        .map(|&greek| second_order(kind, [spot, strike, time, vol, rate], greek))
        .collect()
}

/// Gamma only, the default second-order request.
#[must_use]
pub fn price_gamma(kind: OptionKind, spot: f64, strike: f64, time: f64, vol: f64, rate: f64) -> f64 {
    second_order(kind, [spot, strike, time, vol, rate], SecondOrder::Gamma)
}

const SPOT: usize = 0;
const TIME: usize = 2;
const VOL: usize = 3;
const RATE: usize = 4;

fn second_order(kind: OptionKind, inputs: [f64; 5], greek: SecondOrder) -> f64 {
    // (first variable, second variable, scale)
    let (first, second, scale) = match greek {
        SecondOrder::Gamma => (SPOT, SPOT, 1.0),
        SecondOrder::Charm => (SPOT, TIME, 1.0 / DAYS_PER_YEAR),
        SecondOrder::Veta => (VOL, TIME, 1.0 / (100.0 * DAYS_PER_YEAR)),
        SecondOrder::Vomma => (VOL, VOL, 1.0),
        SecondOrder::Vera => (VOL, RATE, 1.0),
    };

    let tape = Tape::new();
    let vars: Vec<_> = inputs
        .iter()
        .enumerate()
        .map(|(i, &x)| tape.input(x, i == first || i == second))
        .collect();

    let npv = value(kind, vars[0], vars[1], vars[2], vars[3], vars[4]);
    let gradient = npv.gradient_with(&vars[first]);
    let result = gradient.gradient_with(&vars[second]).value() * scale;

    trace!("{:?} = {} ({} nodes)", greek, result, tape.len());
    result
}
