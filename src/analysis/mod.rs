//! Solver selection and runtime options

use crate::results::EnvelopeScope;
use serde::{Deserialize, Serialize};

/// Which solver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisType {
    /// First-order linear direct-stiffness solve
    Linear,
    /// Geometrically non-linear solve using Galambos stability functions
    Nonlinear,
}

impl Default for AnalysisType {
    fn default() -> Self {
        Self::Linear
    }
}

/// Runtime parameters for a solve. There is no hidden global configuration — every
/// tunable here is an explicit field with a documented default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub analysis_type: AnalysisType,
    /// Non-linear fixed-point iteration cap
    pub max_iterations: usize,
    /// Non-linear convergence tolerance on `‖P_new − P_old‖₂`
    pub tolerance: f64,
    /// Sample-station count for linear displacement curves
    pub linear_samples: usize,
    /// Interior station count for the non-linear finite-difference grid; the
    /// effective count is `max(100, L/20)` capped at this value
    pub nonlinear_max_stations: usize,
    /// Which cases contribute to the envelope scan
    pub envelope_scope: EnvelopeScope,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            analysis_type: AnalysisType::Linear,
            max_iterations: 20,
            tolerance: 1e-3,
            linear_samples: 20,
            nonlinear_max_stations: 1000,
            envelope_scope: EnvelopeScope::All,
        }
    }
}

impl AnalysisOptions {
    pub fn linear() -> Self {
        Self::default()
    }

    pub fn nonlinear() -> Self {
        Self {
            analysis_type: AnalysisType::Nonlinear,
            ..Self::default()
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_linear_samples(mut self, samples: usize) -> Self {
        self.linear_samples = samples;
        self
    }

    pub fn with_envelope_scope(mut self, scope: EnvelopeScope) -> Self {
        self.envelope_scope = scope;
        self
    }
}
