//! Material properties

use serde::{Deserialize, Serialize};

/// Material properties relevant to 2D frame analysis: stiffness and thermal expansion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus), consistent force/area units
    pub e: f64,
    /// Coefficient of thermal expansion
    pub alpha: f64,
}

impl Material {
    pub fn new(e: f64, alpha: f64) -> Self {
        Self { e, alpha }
    }

    /// A representative structural steel (SI units, Pa and 1/K)
    pub fn steel() -> Self {
        Self::new(200e9, 1.2e-5)
    }

    /// A representative structural concrete (SI units, Pa and 1/K)
    pub fn concrete() -> Self {
        Self::new(25e9, 1.0e-5)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steel_has_expected_modulus() {
        assert_eq!(Material::steel().e, 200e9);
    }
}
