//! Linear direct-stiffness solve

use nalgebra::DMatrix;

use crate::equivalent_loads::Equivalent;
use crate::error::{FEAError, FEAResult};
use crate::math::{self, Mat6};
use crate::model::Model;
use crate::results::{CaseResults, DisplayScales, MemberEndState};
use crate::rotation;
use crate::topology::Topology;

use super::{accumulate_reactions, add_springs, finalize_reactions, full_member_vector, prescribed_vector};

pub fn solve(
    model: &Model,
    topo: &Topology,
    lengths_angles: &[(f64, f64)],
    equivalent: &Equivalent,
) -> FEAResult<CaseResults> {
    let ndof = topo.ndof;
    let mut k = DMatrix::<f64>::zeros(ndof, ndof);
    let mut f = equivalent.f_reduced.clone();
    let mut member_kg = Vec::with_capacity(model.members().len());
    let mut member_transform = Vec::with_capacity(model.members().len());

    for (m, member) in model.members().iter().enumerate() {
        let (length, angle) = lengths_angles[m];
        let material = &model.materials()[&member.material];
        let section = &model.sections()[&member.section];
        let k_local = math::linear_member_stiffness(material.e * section.a, material.e * section.i, length);

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

        member_states.push(MemberEndState {
            forces: math::vec6_to_array(fe_local),
            displacements: math::vec6_to_array(d_local),
        });

        // Reactions need the real end force in global axes, not the bare elastic
        // term: a member's own equivalent load (distributed/thermal/imperfection)
        // never entered the reduced system at a restrained DOF (`scatter` only
        // touches free entries), so it has to be folded back in here.
        let fe_global = internal - t.transpose() * f0_local;
        accumulate_reactions(&mut reactions_raw, i, j, &dofs, &fe_global);
    }

    let reactions = finalize_reactions(model, reactions_raw, &equivalent.node_applied);

    Ok(CaseResults {
        member_states,
        reactions,
        displacement_curves: Vec::new(),
        force_curves: Vec::new(),
        nonlinear: None,
        display_scales: DisplayScales::default(),
    })
}
