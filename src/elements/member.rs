//! Member element - a prismatic 2D frame element (beam/column)

use serde::{Deserialize, Serialize};

/// End-release flags for a member's rotational continuity (member/internal hinge).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberReleases {
    /// Rotation released at the i-end
    pub start: bool,
    /// Rotation released at the j-end
    pub end: bool,
}

impl MemberReleases {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn pin_start() -> Self {
        Self { start: true, end: false }
    }

    pub fn pin_end() -> Self {
        Self { start: false, end: true }
    }

    pub fn pin_both() -> Self {
        Self { start: true, end: true }
    }

    /// Release flag at end `0` (i) or `1` (j)
    pub fn at(&self, end: usize) -> bool {
        match end {
            0 => self.start,
            1 => self.end,
            _ => panic!("member end index must be 0 or 1"),
        }
    }
}

/// A prismatic 2D frame member connecting node `i` to node `j`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Name of the i-node (start)
    pub i_node: String,
    /// Name of the j-node (end)
    pub j_node: String,
    /// Name of the material
    pub material: String,
    /// Name of the section
    pub section: String,

    /// Rotational end releases (member/internal hinge)
    pub releases: MemberReleases,

    /// Axial pre-strain multiplied by length (initial imperfection)
    pub tensile: f64,
    /// Mid-span camber amplitude (initial imperfection)
    pub curvature: f64,

    /// Internal ID (dense, stable for a solve), assigned on insertion
    #[serde(skip)]
    pub(crate) id: Option<usize>,
    /// Computed length, filled in during topology preparation
    #[serde(skip)]
    pub(crate) length: Option<f64>,
    /// Computed angle from i to j (atan2-style), filled in during topology preparation
    #[serde(skip)]
    pub(crate) angle: Option<f64>,
}

impl Member {
    /// Create a new member with no releases and no imperfections
    pub fn new(i_node: &str, j_node: &str, material: &str, section: &str) -> Self {
        Self {
            i_node: i_node.to_string(),
            j_node: j_node.to_string(),
            material: material.to_string(),
            section: section.to_string(),
            releases: MemberReleases::none(),
            tensile: 0.0,
            curvature: 0.0,
            id: None,
            length: None,
            angle: None,
        }
    }

    /// Set end releases
    pub fn with_releases(mut self, releases: MemberReleases) -> Self {
        self.releases = releases;
        self
    }

    /// Set initial imperfections: axial pre-strain×L and mid-span camber
    pub fn with_imperfections(mut self, tensile: f64, curvature: f64) -> Self {
        self.tensile = tensile;
        self.curvature = curvature;
        self
    }

    /// Member length, once computed by the topology builder
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// Member angle (radians, atan2 convention), once computed
    pub fn angle(&self) -> Option<f64> {
        self.angle
    }

    /// Whether vertical, within numerical tolerance — the special case needed
    /// for tangent-line logic in angle-dependent formulas.
    pub fn is_vertical(angle: f64) -> bool {
        let half_pi = std::f64::consts::FRAC_PI_2;
        let three_half_pi = 3.0 * half_pi;
        (angle - half_pi).abs() < 1e-9 || (angle - three_half_pi).abs() < 1e-9
    }
}
