//! Geometry/model store: nodes, members, materials, sections, load cases and
//! combinations, plus the solve orchestration that ties the rest of the crate
//! together.

use std::collections::HashMap;

use log::{debug, info};

use crate::analysis::{AnalysisOptions, AnalysisType};
use crate::elements::{Material, Member, Node, Section};
use crate::equivalent_loads;
use crate::error::{FEAError, FEAResult};
use crate::loads::{LoadCase, LoadCombination, MemberLoad, NodeLoad};
use crate::postprocess;
use crate::results::{CaseResults, Results};
use crate::solver::{linear, nonlinear};
use crate::topology::{self, Topology};

/// The in-memory structural model. Node and member insertion order is preserved
/// and exposed as a stable dense index (`node_index`/`member_index`) — this is
/// load-bearing for the topology builder's deterministic DOF-slot assignment,
/// not merely a convenience.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub(crate) nodes: Vec<Node>,
    node_names: Vec<String>,
    node_lookup: HashMap<String, usize>,

    pub(crate) members: Vec<Member>,
    member_names: Vec<String>,
    member_lookup: HashMap<String, usize>,

    pub(crate) materials: HashMap<String, Material>,
    pub(crate) sections: HashMap<String, Section>,

    load_cases: Vec<LoadCase>,
    case_lookup: HashMap<String, usize>,
    combinations: Vec<LoadCombination>,
    combo_lookup: HashMap<String, usize>,

    node_loads: Vec<Vec<NodeLoad>>,
    member_loads: Vec<Vec<MemberLoad>>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Insertion -------------------------------------------------------

    pub fn add_node(&mut self, name: &str, mut node: Node) -> FEAResult<usize> {
        if self.node_lookup.contains_key(name) {
            return Err(FEAError::DuplicateName(name.to_string()));
        }
        let id = self.nodes.len();
        node.id = Some(id);
        self.nodes.push(node);
        self.node_names.push(name.to_string());
        self.node_lookup.insert(name.to_string(), id);
        self.node_loads.push(Vec::new());
        Ok(id)
    }

    pub fn add_member(&mut self, name: &str, mut member: Member) -> FEAResult<usize> {
        if self.member_lookup.contains_key(name) {
            return Err(FEAError::DuplicateName(name.to_string()));
        }
        self.node_index(&member.i_node)?;
        self.node_index(&member.j_node)?;
        let id = self.members.len();
        member.id = Some(id);
        self.members.push(member);
        self.member_names.push(name.to_string());
        self.member_lookup.insert(name.to_string(), id);
        self.member_loads.push(Vec::new());
        Ok(id)
    }

    pub fn add_material(&mut self, name: &str, material: Material) -> FEAResult<()> {
        if self.materials.contains_key(name) {
            return Err(FEAError::DuplicateName(name.to_string()));
        }
        self.materials.insert(name.to_string(), material);
        Ok(())
    }

    pub fn add_section(&mut self, name: &str, section: Section) -> FEAResult<()> {
        if self.sections.contains_key(name) {
            return Err(FEAError::DuplicateName(name.to_string()));
        }
        self.sections.insert(name.to_string(), section);
        Ok(())
    }

    pub fn add_load_case(&mut self, name: &str) -> FEAResult<usize> {
        if self.case_lookup.contains_key(name) {
            return Err(FEAError::DuplicateName(name.to_string()));
        }
        let idx = self.load_cases.len();
        self.load_cases.push(LoadCase::new(name));
        self.case_lookup.insert(name.to_string(), idx);
        Ok(idx)
    }

    pub fn add_combination(&mut self, combo: LoadCombination) -> FEAResult<usize> {
        if self.combo_lookup.contains_key(&combo.name) {
            return Err(FEAError::DuplicateName(combo.name.clone()));
        }
        let idx = self.combinations.len();
        self.combo_lookup.insert(combo.name.clone(), idx);
        self.combinations.push(combo);
        Ok(idx)
    }

    pub fn add_node_load(&mut self, node_name: &str, load: NodeLoad) -> FEAResult<()> {
        let idx = self.node_index(node_name)?;
        self.node_loads[idx].push(load);
        Ok(())
    }

    pub fn add_member_load(&mut self, member_name: &str, load: MemberLoad) -> FEAResult<()> {
        let idx = self.member_index(member_name)?;
        self.member_loads[idx].push(load);
        Ok(())
    }

    // --- Lookup ------------------------------------------------------------

    pub fn node_index(&self, name: &str) -> FEAResult<usize> {
        self.node_lookup
            .get(name)
            .copied()
            .ok_or_else(|| FEAError::NodeNotFound(name.to_string()))
    }

    pub fn member_index(&self, name: &str) -> FEAResult<usize> {
        self.member_lookup
            .get(name)
            .copied()
            .ok_or_else(|| FEAError::MemberNotFound(name.to_string()))
    }

    pub fn node_name(&self, idx: usize) -> &str {
        &self.node_names[idx]
    }

    pub fn member_name(&self, idx: usize) -> &str {
        &self.member_names[idx]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn node_names(&self) -> &[String] {
        &self.node_names
    }

    pub fn member_names(&self) -> &[String] {
        &self.member_names
    }

    pub fn materials(&self) -> &HashMap<String, Material> {
        &self.materials
    }

    pub fn sections(&self) -> &HashMap<String, Section> {
        &self.sections
    }

    pub fn load_cases(&self) -> &[LoadCase] {
        &self.load_cases
    }

    pub fn combinations(&self) -> &[LoadCombination] {
        &self.combinations
    }

    pub fn node_loads_for(&self, node_idx: usize) -> &[NodeLoad] {
        &self.node_loads[node_idx]
    }

    pub fn member_loads_for(&self, member_idx: usize) -> &[MemberLoad] {
        &self.member_loads[member_idx]
    }

    /// Total number of case indices: raw load cases followed by combinations,
    /// matching the combination evaluator's index space.
    pub fn total_cases(&self) -> usize {
        self.load_cases.len() + self.combinations.len()
    }

    pub fn n_raw_cases(&self) -> usize {
        self.load_cases.len()
    }

    /// Combination evaluator: for case index `n`, the coefficient vector of
    /// length `nc` to linearly combine the raw load cases.
    pub fn combo_vector(&self, case_index: usize) -> FEAResult<Vec<f64>> {
        let nc = self.load_cases.len();
        if case_index < nc {
            let mut v = vec![0.0; nc];
            v[case_index] = 1.0;
            return Ok(v);
        }
        let combo = self
            .combinations
            .get(case_index - nc)
            .ok_or_else(|| FEAError::InvalidInput(format!("case index {case_index} out of range")))?;
        Ok(self
            .load_cases
            .iter()
            .map(|case| combo.factor(&case.name))
            .collect())
    }

    // --- Solve orchestration -------------------------------------------------

    /// Run a full solve: topology → (rotations, equivalent loads) → solver →
    /// post-processing, for every case index, then compute envelopes.
    pub fn analyze(&self, options: &AnalysisOptions) -> FEAResult<Results> {
        topology::validate_model(self)?;

        if self.nodes.is_empty() || self.members.is_empty() {
            return Ok(Results {
                cases: Vec::new(),
                envelopes: Vec::new(),
                ndof: 0,
            });
        }

        let topo = topology::build_topology(self)?;
        let total_cases = self.total_cases();

        info!(
            "solving {} case(s), {} node(s), {} member(s), ndof={}, solver={:?}",
            total_cases,
            self.nodes.len(),
            self.members.len(),
            topo.ndof,
            options.analysis_type
        );
        debug!("topology: extras={:?} int={:?}", topo.dof_extras, topo.dof_int);

        let lengths_angles = self.compute_lengths_and_angles(&topo)?;

        let mut cases = Vec::with_capacity(total_cases);
        for case_index in 0..total_cases {
            let coeffs = self.combo_vector(case_index)?;
            let equivalent = equivalent_loads::build(self, &topo, &lengths_angles, &coeffs)?;

            let mut case_result: CaseResults = match options.analysis_type {
                AnalysisType::Linear => linear::solve(self, &topo, &lengths_angles, &equivalent)?,
                AnalysisType::Nonlinear => nonlinear::solve(
                    self,
                    &topo,
                    &lengths_angles,
                    &equivalent,
                    options.max_iterations,
                    options.tolerance,
                )?,
            };

            postprocess::fill_curves(
                self,
                &lengths_angles,
                &equivalent,
                options,
                matches!(options.analysis_type, AnalysisType::Nonlinear),
                &mut case_result,
            );
            case_result.display_scales = crate::results::DisplayScales::from_case(&case_result);

            cases.push(case_result);
        }

        let mut results = Results {
            cases,
            envelopes: Vec::new(),
            ndof: topo.ndof,
        };
        results.compute_envelopes(self.members.len(), self.n_raw_cases(), options.envelope_scope);
        Ok(results)
    }

    /// Per-member length and angle, computed once and shared by every case of a solve.
    pub(crate) fn compute_lengths_and_angles(&self, _topo: &Topology) -> FEAResult<Vec<(f64, f64)>> {
        self.members
            .iter()
            .map(|member| {
                let i = self.node_index(&member.i_node)?;
                let j = self.node_index(&member.j_node)?;
                let ni = &self.nodes[i];
                let nj = &self.nodes[j];
                let length = ni.distance_to(nj);
                let angle = (nj.y - ni.y).atan2(nj.x - ni.x);
                Ok((length, angle))
            })
            .collect()
    }
}
