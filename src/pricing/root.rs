//! Scalar root finders used by the implied volatility solver.

use super::config::SolverConfig;
use super::error::{PricingError, Result};
use tracing::trace;

/// Secant root finder seeded at `guess`.
///
/// Converges quickly near the root but offers no guarantee: a guess far from
/// the root may diverge, which is reported as
/// [`PricingError::ConvergenceFailure`].
pub fn secant<F>(f: F, guess: f64, config: &SolverConfig) -> Result<(f64, u32)>
where
    F: Fn(f64) -> f64,
{
    let step = if guess >= 0.0 { 1e-4 } else { -1e-4 };
    let mut p0 = guess;
    let mut p1 = guess * (1.0 + 1e-4) + step;
    let mut q0 = f(p0);
    let mut q1 = f(p1);
    if q1.abs() < q0.abs() {
        std::mem::swap(&mut p0, &mut p1);
        std::mem::swap(&mut q0, &mut q1);
    }

    for iteration in 0..config.max_iterations {
        if q1 == q0 {
            if p1 != p0 {
                return Err(PricingError::ConvergenceFailure {
                    iterations: iteration + 1,
                    last_iv: p1,
                });
            }
            return Ok(((p1 + p0) / 2.0, iteration + 1));
        }

        let p = if q1.abs() > q0.abs() {
            (-q0 / q1 * p1 + p0) / (1.0 - q0 / q1)
        } else {
            (-q1 / q0 * p0 + p1) / (1.0 - q1 / q0)
        };
        trace!("secant iteration {}: x={}", iteration, p);

        if !p.is_finite() {
            return Err(PricingError::ConvergenceFailure {
                iterations: iteration + 1,
                last_iv: p1,
            });
        }

        if (p - p1).abs() <= config.secant_tolerance {
            return Ok((p, iteration + 1));
        }

        p0 = p1;
        q0 = q1;
        p1 = p;
        q1 = f(p1);
    }

    Err(PricingError::ConvergenceFailure {
        iterations: config.max_iterations,
        last_iv: p1,
    })
}

/// Brent's method on `[low, high]`.
///
/// Guaranteed to converge when `f(low)` and `f(high)` have opposite signs;
/// otherwise fails with [`PricingError::NotBracketed`].
pub fn brent<F>(f: F, low: f64, high: f64, config: &SolverConfig) -> Result<(f64, u32)>
where
    F: Fn(f64) -> f64,
{
    let mut x_pre = low;
    let mut x_cur = high;
    let mut f_pre = f(x_pre);
    let mut f_cur = f(x_cur);

    if !f_pre.is_finite() || !f_cur.is_finite() || f_pre * f_cur > 0.0 {
        return Err(PricingError::NotBracketed { low, high });
    }
    if f_pre == 0.0 {
        return Ok((x_pre, 0));
    }
    if f_cur == 0.0 {
        return Ok((x_cur, 0));
    }

    // x_blk is the contrapoint: f changes sign between x_cur and x_blk.
    let mut x_blk = 0.0;
    let mut f_blk = 0.0;
    let mut s_pre = 0.0;
    let mut s_cur = 0.0;

    for iteration in 0..config.max_iterations {
        if f_pre != 0.0 && f_cur != 0.0 && f_pre.is_sign_negative() != f_cur.is_sign_negative() {
            x_blk = x_pre;
            f_blk = f_pre;
            s_pre = x_cur - x_pre;
            s_cur = s_pre;
        }
        if f_blk.abs() < f_cur.abs() {
            x_pre = x_cur;
            x_cur = x_blk;
            x_blk = x_pre;

            f_pre = f_cur;
            f_cur = f_blk;
            f_blk = f_pre;
        }

        let delta = (config.tolerance + config.relative_tolerance * x_cur.abs()) / 2.0;
        let s_bis = (x_blk - x_cur) / 2.0;
        if f_cur == 0.0 || s_bis.abs() < delta {
            return Ok((x_cur, iteration + 1));
        }

        if s_pre.abs() > delta && f_cur.abs() < f_pre.abs() {
            let s_try = if x_pre == x_blk {
                // secant step
                -f_cur * (x_cur - x_pre) / (f_cur - f_pre)
            } else {
                // inverse quadratic interpolation
                let d_pre = (f_pre - f_cur) / (x_pre - x_cur);
                let d_blk = (f_blk - f_cur) / (x_blk - x_cur);
                -f_cur * (f_blk * d_blk - f_pre * d_pre) / (d_blk * d_pre * (f_blk - f_pre))
            };

            if 2.0 * s_try.abs() < s_pre.abs().min(3.0 * s_bis.abs() - delta) {
                s_pre = s_cur;
                s_cur = s_try;
            } else {
                s_pre = s_bis;
                s_cur = s_bis;
            }
        } else {
            s_pre = s_bis;
            s_cur = s_bis;
        }

        x_pre = x_cur;
        f_pre = f_cur;
        if s_cur.abs() > delta {
            x_cur += s_cur;
        } else {
            x_cur += if s_bis > 0.0 { delta } else { -delta };
        }

        f_cur = f(x_cur);
        trace!("brent iteration {}: x={} f={}", iteration, x_cur, f_cur);
        if !f_cur.is_finite() {
            return Err(PricingError::NumericalFailure {
                message: format!("objective is {f_cur} at {x_cur}"),
            });
        }
    }

    Err(PricingError::ConvergenceFailure {
        iterations: config.max_iterations,
        last_iv: x_cur,
    })
}
