//! Non-linear solve using Galambos stability functions

use log::{debug, warn};
use nalgebra::DMatrix;

use crate::equivalent_loads::Equivalent;
use crate::error::{FEAError, FEAResult};
use crate::math::{self, Mat6};
use crate::model::Model;
use crate::results::{CaseResults, DisplayScales, MemberEndState, NonlinearCaseReport};
use crate::rotation;
use crate::topology::Topology;

use super::{accumulate_reactions, add_springs, finalize_reactions, full_member_vector, prescribed_vector};

const STABILITY_EPSILON: f64 = 1e-9;

/// Stability functions `C(βL), S(βL)`. Falls back to the linear values
/// `(4, 2)` for a negligible axial force or bending stiffness, which is exactly
/// the `P → 0` limit — the mechanism by which this solver reduces to the linear
/// one.
fn stability_functions(p: f64, ei: f64, length: f64) -> (f64, f64) {
    if p.abs() < STABILITY_EPSILON || ei < STABILITY_EPSILON {
        return (4.0, 2.0);
    }
    let beta_l = (p.abs() / ei).sqrt() * length;
    let (c, s) = if p < 0.0 {
        (
            (1.0 - beta_l / beta_l.tan()) / beta_l.powi(2),
            (beta_l / beta_l.sin() - 1.0) / beta_l.powi(2),
        )
    } else {
        (
            (beta_l / beta_l.tanh() - 1.0) / beta_l.powi(2),
            (1.0 - beta_l / beta_l.sinh()) / beta_l.powi(2),
        )
    };
    let denom = c * c - s * s;
    (c / denom, s / denom)
}

fn member_stiffness(ea: f64, ei: f64, length: f64, p: f64) -> Mat6 {
    let (big_c, big_s) = stability_functions(p, ei, length);
    let a0 = ea / length;
    let a1 = 2.0 * ei * (big_c + big_s) / length.powi(3) + p / length;
    let a2 = ei * (big_c + big_s) / length.powi(2);
    let a3 = big_c * ei / length;
    let a4 = big_s * ei / length;
    math::member_stiffness_from_coeffs(a0, a1, a2, a3, a4)
}

pub fn solve(
    model: &Model,
    topo: &Topology,
    lengths_angles: &[(f64, f64)],
    equivalent: &Equivalent,
    max_iterations: usize,
    tolerance: f64,
) -> FEAResult<CaseResults> {
    let n_members = model.members().len();
    let mut axial = vec![0.0_f64; n_members];
    let mut last_case: Option<CaseResults> = None;
    let mut converged = false;
    let mut iterations = 0;
    let mut residual_norm = f64::INFINITY;

    for iter in 0..max_iterations.max(1) {
        iterations = iter + 1;
        let (case, next_axial) = iterate(model, topo, lengths_angles, equivalent, &axial)?;
        residual_norm = axial
            .iter()
            .zip(next_axial.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt();
        debug!("nonlinear iteration {}: residual={residual_norm}", iter + 1);
        axial = next_axial;
        last_case = Some(case);
        if residual_norm < tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!("nonlinear solve reached iteration limit ({iterations}) without converging, residual={residual_norm}");
    }

    let mut case = last_case.expect("at least one iteration always runs when max_iterations >= 1");
    case.nonlinear = Some(NonlinearCaseReport {
        converged,
        iterations,
        residual_norm,
    });
    Ok(case)
}

fn iterate(
    model: &Model,
    topo: &Topology,
    lengths_angles: &[(f64, f64)],
    equivalent: &Equivalent,
    axial: &[f64],
) -> FEAResult<(CaseResults, Vec<f64>)> {
    let ndof = topo.ndof;
    let mut k = DMatrix::<f64>::zeros(ndof, ndof);
    let mut f = equivalent.f_reduced.clone();
    let mut member_kg = Vec::with_capacity(model.members().len());
    let mut member_transform = Vec::with_capacity(model.members().len());

    for (m, member) in model.members().iter().enumerate() {
        let (length, angle) = lengths_angles[m];
        let material = &model.materials()[&member.material];
        let section = &model.sections()[&member.section];
        let k_local = member_stiffness(material.e * section.a, material.e * section.i, length, axial[m]);

        let i = model.node_index(&member.i_node)?;
        let j = model.node_index(&member.j_node)?;
        let r = rotation::member_rotation_matrix(angle);
        let ri = rotation::oblique_matrix(&model.nodes()[i], &model.nodes()[j]);
        let t: Mat6 = r * ri;
        let kg: Mat6 = t.transpose() * k_local * t;

        let dofs = topo.member_dof[m];
        for a in 0..6 {
            let da = dofs[a];
            if da < 0 {
                continue;
            }
            for b in 0..6 {
                let db = dofs[b];
                if db < 0 {
                    continue;
                }
                k[(da as usize, db as usize)] += kg[(a, b)];
            }
        }

        let v = prescribed_vector(&model.nodes()[i], &model.nodes()[j], &dofs);
        let fd = kg * v;
        for a in 0..6 {
            if dofs[a] >= 0 {
                f[dofs[a] as usize] -= fd[a];
            }
        }

        member_kg.push(kg);
        member_transform.push(t);
    }

    add_springs(model, topo, &mut k);

    let u = if ndof > 0 {
        math::solve_linear_system(&k, &f).ok_or(FEAError::SingularMatrix)?
    } else {
        nalgebra::DVector::zeros(0)
    };

    let mut member_states = Vec::with_capacity(model.members().len());
    let mut reactions_raw = vec![[0.0f64; 3]; model.nodes().len()];
    let mut next_axial = vec![0.0_f64; model.members().len()];

    for (m, member) in model.members().iter().enumerate() {
        let i = model.node_index(&member.i_node)?;
        let j = model.node_index(&member.j_node)?;
        let dofs = topo.member_dof[m];
        let u_full = full_member_vector(&u, &model.nodes()[i], &model.nodes()[j], &dofs);

        let kg = member_kg[m];
        let t = member_transform[m];
        let internal = kg * u_full;
        let f0_local = equivalent.per_member[m].f0_local;
        let fe_local = t * internal - f0_local;
        let d_local = t * u_full;

        next_axial[m] = fe_local[3];

        member_states.push(MemberEndState {
            forces: math::vec6_to_array(fe_local),
            displacements: math::vec6_to_array(d_local),
        });

        // See solver::linear::solve: a member's own equivalent load never enters the
        // reduced system at a restrained DOF, so the reaction needs it folded back in.
        let fe_global = internal - t.transpose() * f0_local;
        accumulate_reactions(&mut reactions_raw, i, j, &dofs, &fe_global);
    }

    let reactions = finalize_reactions(model, reactions_raw, &equivalent.node_applied);

    Ok((
        CaseResults {
            member_states,
            reactions,
            displacement_curves: Vec::new(),
            force_curves: Vec::new(),
            nonlinear: None,
            display_scales: DisplayScales::default(),
        },
        next_axial,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn stability_functions_reduce_to_linear_at_zero_axial_force() {
        let (c, s) = stability_functions(0.0, 1e3, 5.0);
        assert_relative_eq!(c, 4.0, epsilon = 1e-12);
        assert_relative_eq!(s, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn member_stiffness_matches_linear_stiffness_at_zero_axial_force() {
        let ea = 1e6;
        let ei = 1e3;
        let length = 5.0;
        let nonlinear = member_stiffness(ea, ei, length, 0.0);
        let linear = math::linear_member_stiffness(ea, ei, length);
        assert_relative_eq!(nonlinear, linear, epsilon = 1e-9);
    }
}
