//! Engine and solver configuration.

use serde::{Deserialize, Serialize};

/// Default annualized risk-free rate.
///
/// Roughly the effective federal funds rate; pass an explicit rate per call
/// or through [`EngineConfig`] when it matters.
pub const BASE_RATE: f64 = 0.0007;

/// Calendar days per year, used to express theta and charm per day.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Configuration for the implied volatility root finders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum iterations before giving up.
    pub max_iterations: u32,
    /// Absolute convergence tolerance on volatility.
    pub tolerance: f64,
    /// Relative convergence tolerance on volatility.
    pub relative_tolerance: f64,
    /// Step tolerance for the guess-seeded secant search.
    pub secant_tolerance: f64,
    /// Lower end of the bracketed search.
    pub bracket_low: f64,
    /// Upper end of the bracketed search (default: 5000 = 500000%).
    pub bracket_high: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 2e-12,
            relative_tolerance: 4.0 * f64::EPSILON,
            secant_tolerance: 1.48e-8,
            bracket_low: 1e-12,
            bracket_high: 5000.0,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the absolute convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the bracket searched when no starting guess is supplied.
    #[must_use]
    pub fn with_bracket(mut self, low: f64, high: f64) -> Self {
        self.bracket_low = low;
        self.bracket_high = high;
        self
    }
}

/// Top-level configuration for the orchestration entry points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Annualized risk-free rate used when the caller does not pass one.
    pub risk_free_rate: f64,
    /// Suppress diagnostic output from the analytical Greeks calculator.
    pub quiet: bool,
    /// Root finder settings.
    pub solver: SolverConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: BASE_RATE,
            quiet: true,
            solver: SolverConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Creates a new engine configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Enables or disables analytical diagnostics.
    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Replaces the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
