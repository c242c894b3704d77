//! Distributed, thermal and imperfection loading on a member, tagged by load case

use serde::{Deserialize, Serialize};

/// Per-case loading carried by a member: a uniform distributed load (in either the
/// global or the member-local frame) plus top/bottom fiber temperatures for the
/// thermal-gradient equivalent load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberLoad {
    /// Distributed load component along X (global or local, see `local`)
    pub qx: f64,
    /// Distributed load component along Y (global or local, see `local`)
    pub qy: f64,
    /// If true, `(qx, qy)` are already in the member-local frame; otherwise global
    pub local: bool,
    /// Top fiber temperature
    pub tsup: f64,
    /// Bottom fiber temperature
    pub tinf: f64,
    pub case: String,
}

impl MemberLoad {
    pub fn new(qx: f64, qy: f64, local: bool, tsup: f64, tinf: f64, case: &str) -> Self {
        Self {
            qx,
            qy,
            local,
            tsup,
            tinf,
            case: case.to_string(),
        }
    }

    /// A uniform load in global axes only
    pub fn distributed_global(qx: f64, qy: f64, case: &str) -> Self {
        Self::new(qx, qy, false, 0.0, 0.0, case)
    }

    /// A uniform load already expressed in the member's local axes
    pub fn distributed_local(qx: f64, qy: f64, case: &str) -> Self {
        Self::new(qx, qy, true, 0.0, 0.0, case)
    }

    /// A thermal gradient only, no distributed load
    pub fn thermal(tsup: f64, tinf: f64, case: &str) -> Self {
        Self::new(0.0, 0.0, false, tsup, tinf, case)
    }
}

impl Default for MemberLoad {
    fn default() -> Self {
        Self::new(0.0, 0.0, false, 0.0, 0.0, "Case 1")
    }
}
