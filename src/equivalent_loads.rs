//! Equivalent load builder: distributed/thermal/imperfection fixed-end
//! vectors, nodal force assembly, all scattered into the reduced force vector.

use nalgebra::DVector;

use crate::error::FEAResult;
use crate::math::Vec6;
use crate::model::Model;
use crate::rotation;
use crate::topology::Topology;

/// Per-member data needed later by post-processing: the combined local distributed
/// load and the local equivalent fixed-end vector (before it was rotated to global
/// and scattered).
#[derive(Debug, Clone)]
pub struct MemberEquivalent {
    pub qx_local: f64,
    pub qy_local: f64,
    pub f0_local: Vec6,
}

/// Output of the equivalent-load builder for one case: the per-member local data
/// plus the assembled reduced force vector `F0 + FN` (member equivalent loads and
/// nodal forces; prescribed-displacement reduction is applied by the solver, which
/// needs the per-iteration member stiffness to compute it).
#[derive(Debug, Clone)]
pub struct Equivalent {
    pub per_member: Vec<MemberEquivalent>,
    pub f_reduced: DVector<f64>,
    /// Combined `(Px, Py, Mz)` applied directly at each node for this case, before
    /// scatter — needed by the solver's reaction-equilibrium subtraction.
    pub node_applied: Vec<(f64, f64, f64)>,
}

pub fn build(
    model: &Model,
    topo: &Topology,
    lengths_angles: &[(f64, f64)],
    coeffs: &[f64],
) -> FEAResult<Equivalent> {
    let case_index = |name: &str| model.load_cases().iter().position(|c| c.name == name);

    let mut per_member = Vec::with_capacity(model.members().len());
    let mut f_reduced = DVector::<f64>::zeros(topo.ndof.max(1));
    if topo.ndof == 0 {
        f_reduced = DVector::<f64>::zeros(0);
    }

    for (m, member) in model.members().iter().enumerate() {
        let (length, angle) = lengths_angles[m];
        let material = &model.materials()[&member.material];
        let section = &model.sections()[&member.section];

        let mut qx = 0.0;
        let mut qy = 0.0;
        let mut tsup = 0.0;
        let mut tinf = 0.0;
        for load in model.member_loads_for(m) {
            let Some(ci) = case_index(&load.case) else { continue };
            let c = coeffs[ci];
            if c == 0.0 {
                continue;
            }
            let (lqx, lqy) = if load.local {
                (load.qx, load.qy)
            } else {
                crate::math::global_to_local_2(load.qx, load.qy, angle)
            };
            qx += c * lqx;
            qy += c * lqy;
            tsup += c * load.tsup;
            tinf += c * load.tinf;
        }

        let fq = Vec6::new(
            qx * length / 2.0,
            qy * length / 2.0,
            qy * length.powi(2) / 12.0,
            qx * length / 2.0,
            qy * length / 2.0,
            -qy * length.powi(2) / 12.0,
        );

        let h = section.height();
        let t0 = if h > 0.0 {
            (tsup * section.ysup + tinf * section.yinf) / h
        } else {
            0.0
        };
        let delta_t = tsup - tinf;
        let ea = material.e * section.a;
        let ei = material.e * section.i;
        let ft = if h > 0.0 {
            Vec6::new(-ea * material.alpha * t0, 0.0, ei * material.alpha * delta_t / h, ea * material.alpha * t0, 0.0, -ei * material.alpha * delta_t / h)
        } else {
            Vec6::zeros()
        };

        let e_mod = member.tensile;
        let f_mod = member.curvature;
        let fimp = Vec6::new(
            e_mod * ea / length,
            0.0,
            8.0 * ei * f_mod / length.powi(2),
            -e_mod * ea / length,
            0.0,
            -8.0 * ei * f_mod / length.powi(2),
        );

        let f0_local = fq + ft + fimp;

        let i = model.node_index(&member.i_node)?;
        let j = model.node_index(&member.j_node)?;
        let r = rotation::member_rotation_matrix(angle);
        let ri = rotation::oblique_matrix(&model.nodes()[i], &model.nodes()[j]);
        let f0_global = ri.transpose() * r.transpose() * f0_local;

        if topo.ndof > 0 {
            scatter(&mut f_reduced, &topo.member_dof[m], &f0_global);
        }

        per_member.push(MemberEquivalent {
            qx_local: qx,
            qy_local: qy,
            f0_local,
        });
    }

    // Nodal forces, combined per case and scattered (Mz fans out to every rotation
    // DOF at a hinged node — the moment must act on every released rotation).
    let mut node_applied = Vec::with_capacity(model.nodes().len());
    for (n, _node) in model.nodes().iter().enumerate() {
        let mut px = 0.0;
        let mut py = 0.0;
        let mut mz = 0.0;
        for load in model.node_loads_for(n) {
            let Some(ci) = case_index(&load.case) else { continue };
            let c = coeffs[ci];
            if c == 0.0 {
                continue;
            }
            let (gx, gy) = load.rotated_force();
            px += c * gx;
            py += c * gy;
            mz += c * load.mz;
        }
        if topo.ndof > 0 {
            if topo.node_x[n] >= 0 {
                f_reduced[topo.node_x[n] as usize] += px;
            }
            if topo.node_y[n] >= 0 {
                f_reduced[topo.node_y[n] as usize] += py;
            }
            for &dof in &topo.node_rotations[n] {
                if dof >= 0 {
                    f_reduced[dof as usize] += mz;
                }
            }
        }
        node_applied.push((px, py, mz));
    }

    Ok(Equivalent {
        per_member,
        f_reduced,
        node_applied,
    })
}

fn scatter(f: &mut DVector<f64>, member_dof: &[i64; 6], f0_global: &Vec6) {
    for k in 0..6 {
        let dof = member_dof[k];
        if dof >= 0 {
            f[dof as usize] += f0_global[k];
        }
    }
}
