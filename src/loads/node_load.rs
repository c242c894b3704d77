//! Nodal forces and moments, tagged by load case

use serde::{Deserialize, Serialize};

/// A force/moment applied directly to a node under one raw load case.
///
/// `pangle` rotates `(px, py)` before assembly — this lets a single load
/// case apply an inclined force without the caller having to pre-resolve components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeLoad {
    pub px: f64,
    pub py: f64,
    pub mz: f64,
    pub pangle: f64,
    pub case: String,
}

impl NodeLoad {
    pub fn new(px: f64, py: f64, mz: f64, pangle: f64, case: &str) -> Self {
        Self {
            px,
            py,
            mz,
            pangle,
            case: case.to_string(),
        }
    }

    /// Force-only load with no rotation of the force vector
    pub fn force(px: f64, py: f64, case: &str) -> Self {
        Self::new(px, py, 0.0, 0.0, case)
    }

    pub fn fx(px: f64, case: &str) -> Self {
        Self::force(px, 0.0, case)
    }

    pub fn fy(py: f64, case: &str) -> Self {
        Self::force(0.0, py, case)
    }

    pub fn moment(mz: f64, case: &str) -> Self {
        Self::new(0.0, 0.0, mz, 0.0, case)
    }

    /// `(Px, Py)` rotated by `pangle` into the global frame
    pub fn rotated_force(&self) -> (f64, f64) {
        let (s, c) = self.pangle.sin_cos();
        (self.px * c - self.py * s, self.px * s + self.py * c)
    }
}
