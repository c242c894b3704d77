//! A native Rust 2D structural frame analysis library.
//!
//! Planar frames of prismatic beam/column members, solved by the direct
//! stiffness method:
//! - Nodal and member (internal) hinges
//! - Oblique supports, elastic springs, prescribed displacements
//! - Uniform distributed loads, thermal gradients, initial imperfections
//! - Load cases and linear combinations
//! - Linear (first-order) and non-linear (Galambos stability-function) analysis
//! - A line-oriented text format for saving and loading a model
//!
//! ## Example
//! ```rust
//! use fea_solver::prelude::*;
//!
//! let mut model = Model::new();
//! model.add_material("Steel", Material::steel()).unwrap();
//! model.add_section("Sec", Section::rectangle(0.3, 0.5)).unwrap();
//! model.add_node("n1", Node::pinned(0.0, 0.0)).unwrap();
//! model.add_node("n2", Node::roller_y(6.0, 0.0)).unwrap();
//! model.add_member("m1", Member::new("n1", "n2", "Steel", "Sec")).unwrap();
//! model.add_load_case("Dead").unwrap();
//! model
//!     .add_member_load("m1", MemberLoad::distributed_local(0.0, -10_000.0, "Dead"))
//!     .unwrap();
//!
//! let results = model.analyze(&AnalysisOptions::linear()).unwrap();
//! assert_eq!(results.cases.len(), 1);
//! ```

pub mod analysis;
pub mod elements;
pub mod equivalent_loads;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod postprocess;
pub mod results;
pub mod rotation;
pub mod serialize;
pub mod solver;
pub mod topology;

/// Re-export of the common types needed to build and solve a model.
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, AnalysisType};
    pub use crate::elements::{Material, Member, MemberReleases, Node, Section};
    pub use crate::error::{FEAError, FEAResult};
    pub use crate::loads::{LoadCase, LoadCombination, MemberLoad, NodeLoad};
    pub use crate::model::Model;
    pub use crate::results::{
        CaseResults, DisplacementCurve, EnvelopeScope, Extreme, ForceCurve, MemberEndState, MemberEnvelope,
        NonlinearCaseReport, Reaction, Results,
    };
}
