//! Tape-based reverse-mode automatic differentiation.
//!
//! Every operation on a [`Var`] appends a node to its [`Tape`]. Local partial
//! derivatives are stored as nodes on the same tape, and the reverse sweep
//! builds adjoints out of ordinary tape operations. A gradient is therefore
//! itself a tracked [`Var`] and can be differentiated again, which is how the
//! second-order Greeks are computed.
//!
//! A tape records one forward evaluation. Build a fresh tape for every pass.

use implied_vol::{DefaultSpecialFn, SpecialFn};
use std::cell::RefCell;
use std::f64::consts::PI;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Index of the constant `1.0` seeded into every tape.
const ONE: usize = 0;
/// Index of the constant `-1.0` seeded into every tape.
const NEG_ONE: usize = 1;

/// A scalar that can report its value and its derivative with respect to
/// another scalar of the same kind.
pub trait DifferentiableScalar: Sized {
    /// Plain value of this scalar.
    fn value(&self) -> f64;

    /// Derivative of `self` with respect to `respect_to`.
    ///
    /// The result is itself differentiable when the implementation supports
    /// higher-order derivatives.
    fn gradient_with(&self, respect_to: &Self) -> Self;
}

#[derive(Debug, Clone, Copy)]
struct Node {
    value: f64,
    tracked: bool,
    /// `(parent, partial)` pairs; `partial` is the node holding ∂self/∂parent.
    parents: [Option<(usize, usize)>; 2],
}

/// Recording of one forward evaluation.
#[derive(Debug)]
pub struct Tape {
    nodes: RefCell<Vec<Node>>,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Creates an empty tape.
    #[must_use]
    pub fn new() -> Self {
        let constant = |value| Node {
            value,
            tracked: false,
            parents: [None, None],
        };
        Self {
            nodes: RefCell::new(vec![constant(1.0), constant(-1.0)]),
        }
    }

    /// Adds an input that derivatives can be taken with respect to.
    pub fn variable(&self, value: f64) -> Var<'_> {
        self.push(value, true)
    }

    /// Adds an input that is held fixed.
    pub fn constant(&self, value: f64) -> Var<'_> {
        self.push(value, false)
    }

    /// Adds an input that is tracked only when `tracked` is true.
    pub fn input(&self, value: f64, tracked: bool) -> Var<'_> {
        self.push(value, tracked)
    }

    /// Number of recorded nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// Returns true if only the seeded constants are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 2
    }

    fn push(&self, value: f64, tracked: bool) -> Var<'_> {
        let mut nodes = self.nodes.borrow_mut();
        let index = nodes.len();
        nodes.push(Node {
            value,
            tracked,
            parents: [None, None],
        });
        Var {
            tape: self,
            index,
            value,
            tracked,
        }
    }

    fn set_parents(&self, index: usize, parents: [Option<(usize, usize)>; 2]) {
        self.nodes.borrow_mut()[index].parents = parents;
    }

    fn at(&self, index: usize) -> Var<'_> {
        let node = self.nodes.borrow()[index];
        Var {
            tape: self,
            index,
            value: node.value,
            tracked: node.tracked,
        }
    }

    /// Reverse sweep from `output`, returning the adjoint of every earlier node.
    fn adjoints<'t>(&'t self, output: Var<'t>) -> Vec<Option<Var<'t>>> {
        let mut adjoints: Vec<Option<Var<'t>>> = vec![None; output.index + 1];
        if !output.tracked {
            return adjoints;
        }
        adjoints[output.index] = Some(self.at(ONE));

        for i in (0..=output.index).rev() {
            let Some(adjoint) = adjoints[i] else {
                continue;
            };
            let parents = self.nodes.borrow()[i].parents;
            for (parent, partial) in parents.into_iter().flatten() {
                let contribution = adjoint * self.at(partial);
                adjoints[parent] = Some(match adjoints[parent] {
                    Some(accumulated) => accumulated + contribution,
                    None => contribution,
                });
            }
        }

        adjoints
    }
}

/// A scalar recorded on a [`Tape`].
#[derive(Debug, Clone, Copy)]
pub struct Var<'t> {
    tape: &'t Tape,
    index: usize,
    value: f64,
    tracked: bool,
}

impl<'t> Var<'t> {
    /// Returns true if this value depends on a tracked input.
    #[must_use]
    pub fn is_tracked(&self) -> bool {
        self.tracked
    }

    /// Derivatives of `self` with respect to each of `wrt`, from one sweep.
    pub fn gradients(&self, wrt: &[Var<'t>]) -> Vec<Var<'t>> {
        let adjoints = self.tape.adjoints(*self);
        wrt.iter()
            .map(|v| {
                adjoints
                    .get(v.index)
                    .copied()
                    .flatten()
                    .unwrap_or_else(|| self.tape.constant(0.0))
            })
            .collect()
    }

    fn lift(&self, value: f64) -> Var<'t> {
        self.tape.constant(value)
    }

    fn unary(self, value: f64, partial: impl FnOnce(Var<'t>, Var<'t>) -> Var<'t>) -> Var<'t> {
        if !self.tracked {
            return self.lift(value);
        }
        let out = self.tape.push(value, true);
        let d = partial(self, out);
        self.tape.set_parents(out.index, [Some((self.index, d.index)), None]);
        out
    }

    fn binary(
        self,
        rhs: Var<'t>,
        value: f64,
        d_lhs: impl FnOnce() -> Var<'t>,
        d_rhs: impl FnOnce() -> Var<'t>,
    ) -> Var<'t> {
        debug_assert!(std::ptr::eq(self.tape, rhs.tape), "vars from different tapes");
        if !self.tracked && !rhs.tracked {
            return self.lift(value);
        }
        let out = self.tape.push(value, true);
        let lhs_edge = self.tracked.then(|| (self.index, d_lhs().index));
        let rhs_edge = rhs.tracked.then(|| (rhs.index, d_rhs().index));
        self.tape.set_parents(out.index, [lhs_edge, rhs_edge]);
        out
    }

    /// Reciprocal, `1 / self`.
    #[must_use]
    pub fn recip(self) -> Var<'t> {
        self.unary(self.value.recip(), |_, out| -(out * out))
    }

    /// Natural exponential.
    #[must_use]
    pub fn exp(self) -> Var<'t> {
        self.unary(self.value.exp(), |_, out| out)
    }

    /// Natural logarithm.
    #[must_use]
    pub fn ln(self) -> Var<'t> {
        self.unary(self.value.ln(), |x, _| x.recip())
    }

    /// Square root.
    #[must_use]
    pub fn sqrt(self) -> Var<'t> {
        self.unary(self.value.sqrt(), |_, out| out.recip() * 0.5)
    }

    /// Standard normal density.
    #[must_use]
    pub fn norm_pdf(self) -> Var<'t> {
        (self * self * -0.5).exp() * (1.0 / (2.0 * PI).sqrt())
    }

    /// Standard normal cumulative distribution.
    #[must_use]
    pub fn norm_cdf(self) -> Var<'t> {
        self.unary(DefaultSpecialFn::norm_cdf(self.value), |x, _| x.norm_pdf())
    }
}

impl DifferentiableScalar for Var<'_> {
    fn value(&self) -> f64 {
        self.value
    }

    fn gradient_with(&self, respect_to: &Self) -> Self {
        self.gradients(std::slice::from_ref(respect_to))[0]
    }
}

impl From<Var<'_>> for f64 {
    fn from(var: Var<'_>) -> f64 {
        var.value
    }
}

impl<'t> Add for Var<'t> {
    type Output = Var<'t>;

    fn add(self, rhs: Var<'t>) -> Var<'t> {
        let tape = self.tape;
        self.binary(rhs, self.value + rhs.value, || tape.at(ONE), || tape.at(ONE))
    }
}

impl<'t> Sub for Var<'t> {
    type Output = Var<'t>;

    fn sub(self, rhs: Var<'t>) -> Var<'t> {
        let tape = self.tape;
        self.binary(
            rhs,
            self.value - rhs.value,
            || tape.at(ONE),
            || tape.at(NEG_ONE),
        )
    }
}

impl<'t> Mul for Var<'t> {
    type Output = Var<'t>;

    fn mul(self, rhs: Var<'t>) -> Var<'t> {
        self.binary(rhs, self.value * rhs.value, || rhs, || self)
    }
}

impl<'t> Div for Var<'t> {
    type Output = Var<'t>;

    fn div(self, rhs: Var<'t>) -> Var<'t> {
        self * rhs.recip()
    }
}

impl<'t> Neg for Var<'t> {
    type Output = Var<'t>;

    fn neg(self) -> Var<'t> {
        let tape = self.tape;
        self.unary(-self.value, |_, _| tape.at(NEG_ONE))
    }
}

impl<'t> Add<f64> for Var<'t> {
    type Output = Var<'t>;

    fn add(self, rhs: f64) -> Var<'t> {
        self + self.lift(rhs)
    }
}

impl<'t> Sub<f64> for Var<'t> {
    type Output = Var<'t>;

    fn sub(self, rhs: f64) -> Var<'t> {
        self - self.lift(rhs)
    }
}

impl<'t> Mul<f64> for Var<'t> {
    type Output = Var<'t>;

    fn mul(self, rhs: f64) -> Var<'t> {
        self * self.lift(rhs)
    }
}

impl<'t> Div<f64> for Var<'t> {
    type Output = Var<'t>;

    fn div(self, rhs: f64) -> Var<'t> {
        self * self.lift(rhs.recip())
    }
}
