//! Result types produced by a solve

use serde::{Deserialize, Serialize};

/// Member end-forces and end-displacements in the rotated-local frame for one case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MemberEndState {
    /// `Fe[case][member]`: end-forces `[Ni, Vi, Mi, Nj, Vj, Mj]` after subtracting
    /// the equivalent fixed-end vector
    pub forces: [f64; 6],
    /// `d[case][member]`: end-displacements `[ui, vi, ri, uj, vj, rj]`
    pub displacements: [f64; 6],
}

/// `FR[case][node]`: reaction `(Rx, Ry, Mz)`, already rotated back to global axes.
/// `None` for a node with no restraint in any direction (no reaction to report).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reaction {
    pub rx: f64,
    pub ry: f64,
    pub mz: f64,
}

impl Reaction {
    pub fn zero() -> Self {
        Self { rx: 0.0, ry: 0.0, mz: 0.0 }
    }

    pub fn force_magnitude(&self) -> f64 {
        (self.rx.powi(2) + self.ry.powi(2)).sqrt()
    }
}

/// `displacements[case][member]`: the member-local elastic curve sampled along its length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplacementCurve {
    pub x: Vec<f64>,
    pub u: Vec<f64>,
    pub v: Vec<f64>,
    pub r: Vec<f64>,
}

/// `forces[case][member]`: internal force diagrams sampled along the member's length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForceCurve {
    pub x: Vec<f64>,
    pub n: Vec<f64>,
    pub v: Vec<f64>,
    pub m: Vec<f64>,
}

/// A `(value, argCase)` pair — the envelope extreme and which case produced it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Extreme {
    pub value: f64,
    pub case: usize,
}

impl Extreme {
    fn worst(current: Option<Self>, candidate: f64, case: usize, want_max: bool) -> Self {
        match current {
            None => Extreme { value: candidate, case },
            Some(cur) => {
                let better = if want_max {
                    candidate > cur.value
                } else {
                    candidate < cur.value
                };
                if better {
                    Extreme { value: candidate, case }
                } else {
                    cur
                }
            }
        }
    }
}

/// `max[member], min[member]`: per-component envelope across the configured case scope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MemberEnvelope {
    pub axial_max: Extreme,
    pub axial_min: Extreme,
    pub shear_max: Extreme,
    pub shear_min: Extreme,
    pub moment_max: Extreme,
    pub moment_min: Extreme,
}

/// Which cases an envelope scan considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeScope {
    All,
    CasesOnly,
    CombosOnly,
}

/// Non-linear iteration outcome for one case — solver metadata, not a structural
/// quantity, so it travels alongside the result bundle rather than inside it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NonlinearCaseReport {
    pub converged: bool,
    pub iterations: usize,
    pub residual_norm: f64,
}

/// Per-case plot scale constants (`resultsConstant[k]`, k=0..3): the factor that
/// normalizes each quantity's largest magnitude across the case to amplitude 20 in
/// view units, so a displaced-shape or force-diagram plot stays legible regardless
/// of the model's actual units.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DisplayScales {
    pub displacement: f64,
    pub axial: f64,
    pub shear: f64,
    pub moment: f64,
}

impl DisplayScales {
    /// Scan `case`'s already-filled curves for each quantity's largest magnitude
    /// and derive the four scale constants from it.
    pub fn from_case(case: &CaseResults) -> Self {
        let max_abs = |values: Box<dyn Iterator<Item = f64> + '_>| values.fold(0.0_f64, |acc, v| acc.max(v.abs()));

        let displacement = max_abs(Box::new(
            case.displacement_curves.iter().flat_map(|c| c.u.iter().chain(c.v.iter()).copied()),
        ));
        let axial = max_abs(Box::new(case.force_curves.iter().flat_map(|c| c.n.iter().copied())));
        let shear = max_abs(Box::new(case.force_curves.iter().flat_map(|c| c.v.iter().copied())));
        let moment = max_abs(Box::new(case.force_curves.iter().flat_map(|c| c.m.iter().copied())));

        Self {
            displacement: Results::display_scale(displacement),
            axial: Results::display_scale(axial),
            shear: Results::display_scale(shear),
            moment: Results::display_scale(moment),
        }
    }
}

/// Everything produced by solving a single case index (raw load case or combination).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResults {
    /// Per-member end-forces/displacements, indexed by member id
    pub member_states: Vec<MemberEndState>,
    /// Per-node reaction, indexed by node id (`None` for unrestrained nodes)
    pub reactions: Vec<Option<Reaction>>,
    /// Per-member elastic curve, filled in by post-processing
    pub displacement_curves: Vec<DisplacementCurve>,
    /// Per-member internal-force diagram, filled in by post-processing
    pub force_curves: Vec<ForceCurve>,
    /// Present only for a non-linear solve
    pub nonlinear: Option<NonlinearCaseReport>,
    /// Plot scale constants for this case, filled in once the curves above are;
    /// `DisplayScales::default()`-equivalent zero value until then.
    pub display_scales: DisplayScales,
}

/// The full result bundle of a solve: one `CaseResults` per case index (raw load
/// cases first, then combinations, matching the combination evaluator's index space),
/// plus the per-member envelopes computed over the requested scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Results {
    pub cases: Vec<CaseResults>,
    pub envelopes: Vec<MemberEnvelope>,
    pub ndof: usize,
}

impl Results {
    /// Recompute `envelopes` by scanning `self.cases` under `scope`. `n_raw_cases` is
    /// the number of raw load cases (case indices `< n_raw_cases` are "cases", the
    /// rest are "combos") as required by `EnvelopeScope`.
    pub fn compute_envelopes(&mut self, n_members: usize, n_raw_cases: usize, scope: EnvelopeScope) {
        let mut envelopes = vec![
            MemberEnvelope {
                axial_max: Extreme { value: f64::NEG_INFINITY, case: 0 },
                axial_min: Extreme { value: f64::INFINITY, case: 0 },
                shear_max: Extreme { value: f64::NEG_INFINITY, case: 0 },
                shear_min: Extreme { value: f64::INFINITY, case: 0 },
                moment_max: Extreme { value: f64::NEG_INFINITY, case: 0 },
                moment_min: Extreme { value: f64::INFINITY, case: 0 },
            };
            n_members
        ];

        for (case_idx, case) in self.cases.iter().enumerate() {
            let in_scope = match scope {
                EnvelopeScope::All => true,
                EnvelopeScope::CasesOnly => case_idx < n_raw_cases,
                EnvelopeScope::CombosOnly => case_idx >= n_raw_cases,
            };
            if !in_scope {
                continue;
            }
            for (m, curve) in case.force_curves.iter().enumerate() {
                let env = &mut envelopes[m];
                for &n in &curve.n {
                    env.axial_max = Extreme::worst(Some(env.axial_max), n, case_idx, true);
                    env.axial_min = Extreme::worst(Some(env.axial_min), n, case_idx, false);
                }
                for &v in &curve.v {
                    env.shear_max = Extreme::worst(Some(env.shear_max), v, case_idx, true);
                    env.shear_min = Extreme::worst(Some(env.shear_min), v, case_idx, false);
                }
                for &mo in &curve.m {
                    env.moment_max = Extreme::worst(Some(env.moment_max), mo, case_idx, true);
                    env.moment_min = Extreme::worst(Some(env.moment_min), mo, case_idx, false);
                }
            }
        }
        self.envelopes = envelopes;
    }

    /// `resultsConstant[k] = 20 / max|quantity|`, falling back to 1.0 when the
    /// maximum is zero.
    pub fn display_scale(max_abs_value: f64) -> f64 {
        if max_abs_value.abs() < 1e-12 {
            1.0
        } else {
            20.0 / max_abs_value.abs()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_scale_falls_back_to_one_when_quantity_is_zero() {
        assert_eq!(Results::display_scale(0.0), 1.0);
    }

    #[test]
    fn display_scale_normalizes_to_twenty_units() {
        assert!((Results::display_scale(4.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn extreme_worst_tracks_max_and_min_independently() {
        let mut cur_max = None;
        cur_max = Some(Extreme::worst(cur_max, 3.0, 0, true));
        cur_max = Some(Extreme::worst(cur_max, 7.0, 1, true));
        cur_max = Some(Extreme::worst(cur_max, 2.0, 2, true));
        assert_eq!(cur_max.unwrap().value, 7.0);
        assert_eq!(cur_max.unwrap().case, 1);
    }
}
