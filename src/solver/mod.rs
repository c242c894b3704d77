//! The two solve loops: linear direct stiffness and the non-linear
//! Galambos stability-function iteration. Shared assembly helpers live
//! here; each solver's own loop lives in its submodule.

pub mod linear;
pub mod nonlinear;

use crate::elements::Node;
use crate::math::Vec6;
use crate::model::Model;
use crate::topology::Topology;

/// The 6 prescribed-displacement values for a member's DOF slots — non-zero only
/// at entries the topology marked `-1` (restrained), zero at free entries (the
/// solver doesn't need a value there; it's solving for it).
pub fn prescribed_vector(i_node: &Node, j_node: &Node, dofs: &[i64; 6]) -> Vec6 {
    let raw = [
        i_node.dx, i_node.dy, i_node.drz, j_node.dx, j_node.dy, j_node.drz,
    ];
    let mut v = Vec6::zeros();
    for k in 0..6 {
        if dofs[k] < 0 {
            v[k] = raw[k];
        }
    }
    v
}

/// The full 6-vector of member-end DOF values: solved value at free entries,
/// prescribed value at restrained ones.
pub fn full_member_vector(
    u: &nalgebra::DVector<f64>,
    i_node: &Node,
    j_node: &Node,
    dofs: &[i64; 6],
) -> Vec6 {
    let raw = [
        i_node.dx, i_node.dy, i_node.drz, j_node.dx, j_node.dy, j_node.drz,
    ];
    let mut v = Vec6::zeros();
    for k in 0..6 {
        v[k] = if dofs[k] >= 0 { u[dofs[k] as usize] } else { raw[k] };
    }
    v
}

/// Add each node's elastic spring stiffness to the corresponding diagonal entry.
pub fn add_springs(model: &Model, topo: &Topology, k: &mut nalgebra::DMatrix<f64>) {
    for (n, node) in model.nodes().iter().enumerate() {
        if topo.node_x[n] >= 0 && node.kx != 0.0 {
            let d = topo.node_x[n] as usize;
            k[(d, d)] += node.kx;
        }
        if topo.node_y[n] >= 0 && node.ky != 0.0 {
            let d = topo.node_y[n] as usize;
            k[(d, d)] += node.ky;
        }
        if node.kz != 0.0 {
            for &dof in &topo.node_rotations[n] {
                if dof >= 0 {
                    let d = dof as usize;
                    k[(d, d)] += node.kz;
                }
            }
        }
    }
}

/// Accumulate a member's two ends' real global end force (elastic term minus the
/// member's own equivalent load, in global axes) into each node's `[Rx, Ry, Mz]`
/// reaction accumulator, but only at restrained channels.
pub fn accumulate_reactions(
    reactions_raw: &mut [[f64; 3]],
    i: usize,
    j: usize,
    dofs: &[i64; 6],
    fe_global: &Vec6,
) {
    for pos in 0..6 {
        if dofs[pos] >= 0 {
            continue;
        }
        let node = if pos < 3 { i } else { j };
        let channel = pos % 3;
        reactions_raw[node][channel] += fe_global[pos];
    }
}

/// Subtract the applied nodal force and rotate `(Rx, Ry)` back to global axes,
/// producing `None` for a node with no restraint at all. Only channels the node
/// actually restrains contribute a reaction — a nodal hinge frees every rotation
/// slot regardless of `node.rz` (see `topology::build_topology`), so the rotation
/// channel is gated the same way here.
pub fn finalize_reactions(
    model: &Model,
    reactions_raw: Vec<[f64; 3]>,
    node_applied: &[(f64, f64, f64)],
) -> Vec<Option<crate::results::Reaction>> {
    model
        .nodes()
        .iter()
        .enumerate()
        .map(|(n, node)| {
            if !node.is_supported() {
                return None;
            }
            let (px, py, mz) = node_applied[n];
            let rx = if node.rx { reactions_raw[n][0] - px } else { 0.0 };
            let ry = if node.ry { reactions_raw[n][1] - py } else { 0.0 };
            let rz = if node.rz && !node.hinge {
                reactions_raw[n][2] - mz
            } else {
                0.0
            };
            let (gx, gy) = if node.support_angle != 0.0 {
                crate::math::rotate_2(rx, ry, node.support_angle)
            } else {
                (rx, ry)
            };
            Some(crate::results::Reaction { rx: gx, ry: gy, mz: rz })
        })
        .collect()
}
