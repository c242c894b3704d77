//! Cross-section properties for 2D frame members

use serde::{Deserialize, Serialize};

/// Cross-sectional properties: moment of inertia, area, and the distances from the
/// centroid to the extreme (top/bottom) fibers used by the thermal-gradient terms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Section {
    /// Moment of inertia about the bending axis
    pub i: f64,
    /// Cross-sectional area
    pub a: f64,
    /// Distance from centroid to the top fiber
    pub ysup: f64,
    /// Distance from centroid to the bottom fiber
    pub yinf: f64,
}

impl Section {
    /// User-supplied properties directly
    pub fn generic(i: f64, a: f64, ysup: f64, yinf: f64) -> Self {
        Self { i, a, ysup, yinf }
    }

    /// Solid or hollow circular section from outer/inner diameter (`dint = 0` for solid)
    pub fn circle(dext: f64, dint: f64) -> Self {
        let i = std::f64::consts::PI * (dext.powi(4) - dint.powi(4)) / 64.0;
        let a = std::f64::consts::PI * (dext.powi(2) - dint.powi(2)) / 4.0;
        Self {
            i,
            a,
            ysup: dext / 2.0,
            yinf: dext / 2.0,
        }
    }

    /// Solid rectangular section of width `b` and depth `h`
    pub fn rectangle(b: f64, h: f64) -> Self {
        Self {
            i: b * h.powi(3) / 12.0,
            a: b * h,
            ysup: h / 2.0,
            yinf: h / 2.0,
        }
    }

    /// Symmetric I/wide-flange section: flange width `bf`, flange thickness `tf`,
    /// web (clear) depth `d`, web thickness `t`
    pub fn symmetric_i(bf: f64, tf: f64, d: f64, t: f64) -> Self {
        let i = (bf * (d + 2.0 * tf).powi(3) - (bf - t) * d.powi(3)) / 12.0;
        let a = 2.0 * bf * tf + d * t;
        Self {
            i,
            a,
            ysup: tf + d / 2.0,
            yinf: tf + d / 2.0,
        }
    }

    /// Asymmetric I section: bottom flange (`bf1`, `tf1`), top flange (`bf2`, `tf2`),
    /// web clear depth `d`, web thickness `t`. The composite centroid `yg` is measured
    /// from the bottom fiber; each part contributes its own moment of inertia `IN_k` plus
    /// the parallel-axis term `A_k·(G_k − yg)²`.
    pub fn asymmetric_i(bf1: f64, tf1: f64, bf2: f64, tf2: f64, d: f64, t: f64) -> Self {
        let areas = [bf1 * tf1, t * d, bf2 * tf2];
        let centroids = [tf1 / 2.0, tf1 + d / 2.0, tf1 + d + tf2 / 2.0];
        let own_inertias = [
            bf1 * tf1.powi(3) / 12.0,
            t * d.powi(3) / 12.0,
            bf2 * tf2.powi(3) / 12.0,
        ];

        let a: f64 = areas.iter().sum();
        let yg: f64 = areas
            .iter()
            .zip(centroids.iter())
            .map(|(ai, gi)| ai * gi)
            .sum::<f64>()
            / a;

        let i: f64 = (0..3)
            .map(|k| own_inertias[k] + areas[k] * (centroids[k] - yg).powi(2))
            .sum();

        Self {
            i,
            a,
            yinf: yg,
            ysup: tf1 + d + tf2 - yg,
        }
    }

    /// `ysup + yinf`, the section height used by the thermal-gradient term
    pub fn height(&self) -> f64 {
        self.ysup + self.yinf
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::rectangle(0.2, 0.2)
    }
}
