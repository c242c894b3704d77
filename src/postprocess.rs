//! Post-processing: per-member displacement and internal-force curves.

use nalgebra::DMatrix;

use crate::analysis::AnalysisOptions;
use crate::equivalent_loads::Equivalent;
use crate::model::Model;
use crate::results::{CaseResults, DisplacementCurve, ForceCurve};

/// Fill `displacement_curves` and `force_curves` on an already-solved case, using
/// the linear (direct integration) or non-linear (finite-difference) formulas.
pub fn fill_curves(
    model: &Model,
    lengths_angles: &[(f64, f64)],
    equivalent: &Equivalent,
    options: &AnalysisOptions,
    nonlinear: bool,
    case: &mut CaseResults,
) {
    for (m, member) in model.members().iter().enumerate() {
        let (length, _angle) = lengths_angles[m];
        let material = &model.materials()[&member.material];
        let section = &model.sections()[&member.section];
        let ei = material.e * section.i;
        let state = case.member_states[m];
        let qx = equivalent.per_member[m].qx_local;
        let qy = equivalent.per_member[m].qy_local;

        let (disp, force) = if nonlinear {
            nonlinear_curves(length, ei, qx, qy, &state, options.nonlinear_max_stations)
        } else {
            linear_curves(length, ei, qy, &state, options.linear_samples)
        };
        case.displacement_curves.push(disp);
        case.force_curves.push(force);
    }
}

/// Direct integration of the elastic curve for a uniform local distributed load.
fn linear_curves(
    length: f64,
    ei: f64,
    qy: f64,
    state: &crate::results::MemberEndState,
    samples: usize,
) -> (DisplacementCurve, ForceCurve) {
    let [u0, v0, r0, u1, v1, _r1] = state.displacements;
    let fe = state.forces;
    let shear = fe[1];
    let moment = -fe[2];
    let n0 = -fe[0];
    let n1 = fe[3];
    let shear_end = -fe[4];

    let n_stations = samples.max(1);
    let mut x = Vec::with_capacity(n_stations + 2);
    let mut u = Vec::with_capacity(n_stations + 2);
    let mut v = Vec::with_capacity(n_stations + 2);
    let mut r = Vec::with_capacity(n_stations + 2);
    let mut n = Vec::with_capacity(n_stations + 2);
    let mut vv = Vec::with_capacity(n_stations + 2);
    let mut mm = Vec::with_capacity(n_stations + 2);

    x.push(0.0);
    u.push(u0);
    v.push(v0);
    r.push(r0);
    n.push(n0);
    vv.push(shear);
    mm.push(moment);

    for k in 1..=n_stations {
        let xi = length * k as f64 / (n_stations + 1) as f64;
        x.push(xi);
        u.push(u0 + (u1 - u0) * xi / length);
        if ei.abs() > 1e-12 {
            v.push(v0 + r0 * xi + (moment * xi.powi(2) / 2.0 + shear * xi.powi(3) / 6.0 + qy * xi.powi(4) / 24.0) / ei);
            r.push(r0 + (shear * xi.powi(2) / 2.0 + qy * xi.powi(3) / 6.0) / ei);
        } else {
            v.push(v0);
            r.push(r0);
        }
        n.push(if xi < length / 2.0 { n0 } else { n1 });
        vv.push(if xi < length / 2.0 { shear } else { shear_end });
        mm.push(moment + shear * xi + 0.5 * qy * xi.powi(2));
    }

    x.push(length);
    u.push(u1);
    v.push(v1);
    r.push(state.displacements[5]);
    n.push(n1);
    vv.push(shear_end);
    mm.push(moment + shear * length + 0.5 * qy * length.powi(2));

    (
        DisplacementCurve { x: x.clone(), u, v, r },
        ForceCurve { x, n, v: vv, m: mm },
    )
}

/// Finite-difference elastic curve with axial-force coupling. `state.forces[3]` is the converged member axial force (tension
/// positive), reused here as the `N` term in the tridiagonal diagonal coefficient.
fn nonlinear_curves(
    length: f64,
    ei: f64,
    qx: f64,
    qy: f64,
    state: &crate::results::MemberEndState,
    max_stations: usize,
) -> (DisplacementCurve, ForceCurve) {
    let [u0, v0, r0, u1, v1, r1] = state.displacements;
    let fe = state.forces;
    let shear = fe[1];
    let moment = -fe[2];
    let axial = fe[3];

    let n_stations = ((length / 20.0).ceil() as usize).max(100).min(max_stations.max(1));
    let h = length / n_stations as f64;
    let interior = n_stations.saturating_sub(1);

    let stations: Vec<f64> = (1..n_stations).map(|i| i as f64 * h).collect();

    let v = if interior == 0 {
        Vec::new()
    } else {
        let mut a = DMatrix::<f64>::zeros(interior, interior);
        let mut rhs = nalgebra::DVector::<f64>::zeros(interior);
        let off = ei / h.powi(2);
        for (row, &xi) in stations.iter().enumerate() {
            let diag = axial - 2.0 * ei / h.powi(2) + qx * xi / 2.0;
            a[(row, row)] = diag;
            if row > 0 {
                a[(row, row - 1)] = off;
            }
            if row + 1 < interior {
                a[(row, row + 1)] = off;
            }
            rhs[row] = -moment + shear * xi + qy * xi.powi(2) / 2.0;
        }
        rhs[0] -= ei * v0 / h.powi(2);
        if interior > 0 {
            let last = interior - 1;
            rhs[last] -= ei * v1 / h.powi(2);
        }
        a.lu().solve(&rhs).map(|sol| sol.iter().copied().collect()).unwrap_or_default()
    };

    let r = if interior == 0 {
        Vec::new()
    } else {
        let mut a = DMatrix::<f64>::zeros(interior, interior);
        let mut rhs = nalgebra::DVector::<f64>::zeros(interior);
        let off = ei / h.powi(2);
        for (row, &xi) in stations.iter().enumerate() {
            let diag = axial - 2.0 * ei / h.powi(2) + qx * xi / 2.0;
            a[(row, row)] = diag;
            if row > 0 {
                a[(row, row - 1)] = off;
            }
            if row + 1 < interior {
                a[(row, row + 1)] = off;
            }
            rhs[row] = shear + qy * xi;
        }
        rhs[0] -= ei * r0 / h.powi(2);
        if interior > 0 {
            let last = interior - 1;
            rhs[last] -= ei * r1 / h.powi(2);
        }
        a.lu().solve(&rhs).map(|sol| sol.iter().copied().collect()).unwrap_or_default()
    };

    let mut x = vec![0.0];
    let mut u = vec![u0];
    let mut vout = vec![v0];
    let mut rout = vec![r0];
    for (k, &xi) in stations.iter().enumerate() {
        x.push(xi);
        u.push(u0 + (u1 - u0) * xi / length);
        vout.push(*v.get(k).unwrap_or(&v0));
        rout.push(*r.get(k).unwrap_or(&r0));
    }
    x.push(length);
    u.push(u1);
    vout.push(v1);
    rout.push(r1);

    let mut n_arr = Vec::with_capacity(x.len());
    let mut v_arr = Vec::with_capacity(x.len());
    let mut m_arr = Vec::with_capacity(x.len());
    for (k, &xi) in x.iter().enumerate() {
        let vx = vout[k];
        n_arr.push(axial);
        m_arr.push(moment + shear * xi + 0.5 * qy * xi.powi(2) + (axial + 0.5 * qx) * (vx - v0));
        v_arr.push(shear + qy * xi + 0.5 * qx * (vx - v0) - 0.5 * qx * xi * rout[k]);
    }

    (
        DisplacementCurve { x: x.clone(), u, v: vout, r: rout },
        ForceCurve { x, n: n_arr, v: v_arr, m: m_arr },
    )
}
