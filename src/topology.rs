//! Topology & DOF builder: maps physical nodes + hinges to the reduced
//! vector of unknowns, and builds each member's 6-entry DOF index vector.

use crate::error::{FEAError, FEAResult};
use crate::model::Model;

/// A DOF entry is either `-1` (fixed by support / Dirichlet) or a non-negative
/// index into the reduced unknown vector of size `ndof`.
pub type DofEntry = i64;

/// Per-node and per-member DOF bookkeeping for a single solve.
#[derive(Debug, Clone)]
pub struct Topology {
    /// Size of the reduced unknown vector
    pub ndof: usize,
    /// Number of members incident on each node
    pub nelem: Vec<usize>,
    /// Extra rotation DOFs at each node from a nodal hinge
    pub dof_extras: Vec<usize>,
    /// Extra rotation DOFs at each node from member/internal hinges
    pub dof_int: Vec<usize>,
    /// Translation-X DOF entry per node
    pub node_x: Vec<DofEntry>,
    /// Translation-Y DOF entry per node
    pub node_y: Vec<DofEntry>,
    /// Rotation DOF entries per node (length `1 + dof_extras[i] + dof_int[i]`)
    pub node_rotations: Vec<Vec<DofEntry>>,
    /// Per-member 6-entry DOF index vector `[Xi, Yi, Ri, Xj, Yj, Rj]`
    pub member_dof: Vec<[DofEntry; 6]>,
}

impl Topology {
    /// Count of `-1` entries across the full DOF layout (translations + rotations).
    /// Used by the DOF-conservation property.
    pub fn fixed_count(&self) -> usize {
        let mut n = 0;
        for &e in self.node_x.iter().chain(self.node_y.iter()) {
            if e < 0 {
                n += 1;
            }
        }
        for rotations in &self.node_rotations {
            n += rotations.iter().filter(|&&e| e < 0).count();
        }
        n
    }

    /// Total DOF slots before reduction: `3·nnodes + Σ(dof_extras + dof_int)`.
    pub fn total_slots(&self) -> usize {
        self.ndof + self.fixed_count()
    }
}

/// Build the topology for a model. Members are traversed in ascending, stable
/// member-index order throughout (both for DOF-slot consumption and everywhere
/// else) so that hinge-slot assignment is deterministic across runs of the same
/// model — see DESIGN.md's resolution of the DOF-slot-order open question.
pub fn build_topology(model: &Model) -> FEAResult<Topology> {
    let n_nodes = model.nodes.len();
    let n_members = model.members.len();

    let mut nelem = vec![0usize; n_nodes];
    for member in &model.members {
        let i = model.node_index(&member.i_node)?;
        let j = model.node_index(&member.j_node)?;
        nelem[i] += 1;
        nelem[j] += 1;
    }

    let mut dof_int = vec![0usize; n_nodes];
    for member in &model.members {
        let i = model.node_index(&member.i_node)?;
        let j = model.node_index(&member.j_node)?;
        if !model.nodes[i].hinge && nelem[i] > 1 && member.releases.at(0) {
            dof_int[i] += 1;
        }
        if !model.nodes[j].hinge && nelem[j] > 1 && member.releases.at(1) {
            dof_int[j] += 1;
        }
    }

    let mut dof_extras = vec![0usize; n_nodes];
    for i in 0..n_nodes {
        if model.nodes[i].hinge && nelem[i] > 0 {
            dof_extras[i] = nelem[i] - 1;
        }
        // Promotion rule: a node whose internal-hinge count equals its member
        // count behaves exactly like a nodal hinge.
        if nelem[i] > 0 && dof_int[i] == nelem[i] {
            dof_extras[i] = nelem[i] - 1;
            dof_int[i] = 0;
        }
    }

    let mut next_free: i64 = 0;
    let mut node_x = vec![0 as DofEntry; n_nodes];
    let mut node_y = vec![0 as DofEntry; n_nodes];
    let mut node_rotations: Vec<Vec<DofEntry>> = Vec::with_capacity(n_nodes);

    for i in 0..n_nodes {
        let node = &model.nodes[i];

        node_x[i] = if node.rx {
            -1
        } else {
            let idx = next_free;
            next_free += 1;
            idx
        };
        node_y[i] = if node.ry {
            -1
        } else {
            let idx = next_free;
            next_free += 1;
            idx
        };

        let n_rot = 1 + dof_extras[i] + dof_int[i];
        let mut rotations = Vec::with_capacity(n_rot);
        if n_rot == 1 {
            rotations.push(if node.rz {
                -1
            } else {
                let idx = next_free;
                next_free += 1;
                idx
            });
        } else {
            for _ in 0..n_rot {
                rotations.push(next_free);
                next_free += 1;
            }
        }
        node_rotations.push(rotations);
    }

    let ndof = next_free as usize;

    // Slot counters: one "extras" counter and one "int" counter per node, advanced
    // as members are traversed in ascending member-index order.
    let mut hinge_base_claimed = vec![false; n_nodes];
    let mut extras_done = vec![0usize; n_nodes];
    let mut int_done = vec![0usize; n_nodes];

    let mut member_dof = Vec::with_capacity(n_members);
    for member in &model.members {
        let i = model.node_index(&member.i_node)?;
        let j = model.node_index(&member.j_node)?;

        let ri = rotation_dof_for_end(
            i,
            0,
            member,
            &dof_extras,
            &dof_int,
            &mut hinge_base_claimed,
            &mut extras_done,
            &mut int_done,
            &node_rotations,
        );
        let rj = rotation_dof_for_end(
            j,
            1,
            member,
            &dof_extras,
            &dof_int,
            &mut hinge_base_claimed,
            &mut extras_done,
            &mut int_done,
            &node_rotations,
        );

        member_dof.push([node_x[i], node_y[i], ri, node_x[j], node_y[j], rj]);
    }

    Ok(Topology {
        ndof,
        nelem,
        dof_extras,
        dof_int,
        node_x,
        node_y,
        node_rotations,
        member_dof,
    })
}

#[allow(clippy::too_many_arguments)]
fn rotation_dof_for_end(
    node_idx: usize,
    end: usize,
    member: &crate::elements::Member,
    dof_extras: &[usize],
    dof_int: &[usize],
    hinge_base_claimed: &mut [bool],
    extras_done: &mut [usize],
    int_done: &mut [usize],
    node_rotations: &[Vec<DofEntry>],
) -> DofEntry {
    if dof_extras[node_idx] > 0 {
        if !hinge_base_claimed[node_idx] {
            hinge_base_claimed[node_idx] = true;
            node_rotations[node_idx][0]
        } else {
            let slot = 1 + extras_done[node_idx];
            extras_done[node_idx] += 1;
            node_rotations[node_idx][slot]
        }
    } else if dof_int[node_idx] > 0 && member.releases.at(end) {
        let slot = 1 + int_done[node_idx];
        int_done[node_idx] += 1;
        node_rotations[node_idx][slot]
    } else {
        node_rotations[node_idx][0]
    }
}

/// Model-inconsistency validation ahead of topology construction.
pub fn validate_model(model: &Model) -> FEAResult<()> {
    if model.nodes.is_empty() || model.members.is_empty() {
        return Ok(());
    }
    for member in &model.members {
        if !model.materials.contains_key(&member.material) {
            return Err(FEAError::MaterialNotFound(member.material.clone()));
        }
        if !model.sections.contains_key(&member.section) {
            return Err(FEAError::SectionNotFound(member.section.clone()));
        }
        let i = model.node_index(&member.i_node)?;
        let j = model.node_index(&member.j_node)?;
        let length = model.nodes[i].distance_to(&model.nodes[j]);
        if length < 1e-10 {
            return Err(FEAError::InvalidGeometry(format!(
                "member {}-{} has zero length",
                member.i_node, member.j_node
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Material, Member, Node, Section};

    fn simple_beam_model() -> Model {
        let mut model = Model::new();
        model.add_material("Steel", Material::new(1e6, 1e-5)).unwrap();
        model.add_section("Sec", Section::generic(1e3, 1.0, 0.1, 0.1)).unwrap();
        model.add_node("n1", Node::pinned(0.0, 0.0)).unwrap();
        model.add_node("n2", Node::roller_y(10.0, 0.0)).unwrap();
        model.add_member("m1", Member::new("n1", "n2", "Steel", "Sec")).unwrap();
        model
    }

    #[test]
    fn dof_conservation_holds_for_simple_beam() {
        let model = simple_beam_model();
        let topo = build_topology(&model).unwrap();
        assert_eq!(topo.total_slots(), 3 * model.nodes.len());
    }

    #[test]
    fn pinned_and_roller_fix_expected_translations() {
        let model = simple_beam_model();
        let topo = build_topology(&model).unwrap();
        assert_eq!(topo.node_x[0], -1);
        assert_eq!(topo.node_y[0], -1);
        assert_ne!(topo.node_x[1], -1);
        assert_eq!(topo.node_y[1], -1);
    }

    #[test]
    fn nodal_hinge_grants_one_extra_rotation_dof_per_extra_member() {
        let mut model = Model::new();
        model.add_material("Steel", Material::new(1e6, 1e-5)).unwrap();
        model.add_section("Sec", Section::generic(1e3, 1.0, 0.1, 0.1)).unwrap();
        model.add_node("center", Node::new(0.0, 0.0).with_hinge()).unwrap();
        model.add_node("a", Node::fixed(-5.0, 0.0)).unwrap();
        model.add_node("b", Node::fixed(5.0, 0.0)).unwrap();
        model.add_node("c", Node::fixed(0.0, 5.0)).unwrap();
        model.add_member("m1", Member::new("a", "center", "Steel", "Sec")).unwrap();
        model.add_member("m2", Member::new("center", "b", "Steel", "Sec")).unwrap();
        model.add_member("m3", Member::new("center", "c", "Steel", "Sec")).unwrap();

        let topo = build_topology(&model).unwrap();
        let center = model.node_index("center").unwrap();
        assert_eq!(topo.nelem[center], 3);
        assert_eq!(topo.dof_extras[center], 2);
        assert_eq!(topo.node_rotations[center].len(), 3);
    }

    #[test]
    fn internal_hinge_promotes_to_nodal_hinge_when_all_ends_released() {
        let mut model = Model::new();
        model.add_material("Steel", Material::new(1e6, 1e-5)).unwrap();
        model.add_section("Sec", Section::generic(1e3, 1.0, 0.1, 0.1)).unwrap();
        model.add_node("center", Node::new(0.0, 0.0)).unwrap();
        model.add_node("a", Node::fixed(-5.0, 0.0)).unwrap();
        model.add_node("b", Node::fixed(5.0, 0.0)).unwrap();
        model
            .add_member(
                "m1",
                Member::new("a", "center", "Steel", "Sec")
                    .with_releases(crate::elements::MemberReleases::pin_end()),
            )
            .unwrap();
        model
            .add_member(
                "m2",
                Member::new("center", "b", "Steel", "Sec")
                    .with_releases(crate::elements::MemberReleases::pin_start()),
            )
            .unwrap();

        let topo = build_topology(&model).unwrap();
        let center = model.node_index("center").unwrap();
        assert_eq!(topo.dof_int[center], 0);
        assert_eq!(topo.dof_extras[center], 1);
    }
}
