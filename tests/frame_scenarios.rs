//! End-to-end scenarios and cross-cutting invariants for the 2D frame solver.

use approx::assert_relative_eq;
use fea_solver::prelude::*;
use fea_solver::topology;

fn steel_like() -> (Material, Section) {
    // E = 1 so that Section.i / Section.a double as EI / EA directly.
    (Material::new(1.0, 0.0), Section::generic(1.0e3, 1.0e6, 0.1, 0.1))
}

#[test]
fn s1_simply_supported_beam_matches_closed_form() {
    let (mat, sec) = steel_like();
    let mut model = Model::new();
    model.add_material("Mat", mat).unwrap();
    model.add_section("Sec", sec).unwrap();
    model.add_node("n1", Node::pinned(0.0, 0.0)).unwrap();
    model.add_node("n2", Node::roller_y(10.0, 0.0)).unwrap();
    model.add_member("m1", Member::new("n1", "n2", "Mat", "Sec")).unwrap();
    model.add_load_case("q").unwrap();
    model.add_member_load("m1", MemberLoad::distributed_local(0.0, -1.0, "q")).unwrap();

    let options = AnalysisOptions::linear().with_linear_samples(1);
    let results = model.analyze(&options).unwrap();
    let case = &results.cases[0];

    let r1 = case.reactions[0].unwrap();
    let r2 = case.reactions[1].unwrap();
    assert_relative_eq!(r1.ry, 5.0, epsilon = 1e-6);
    assert_relative_eq!(r2.ry, 5.0, epsilon = 1e-6);

    // With one interior station, the sample lands exactly at mid-span.
    let mid_moment = case.force_curves[0].m[1];
    assert_relative_eq!(mid_moment, 12.5, epsilon = 1e-6);

    let mid_deflection = case.displacement_curves[0].v[1];
    assert_relative_eq!(mid_deflection.abs(), 50_000.0 / 384.0, epsilon = 1e-3);
}

#[test]
fn s2_cantilever_matches_closed_form() {
    let (mat, sec) = steel_like();
    let mut model = Model::new();
    model.add_material("Mat", mat).unwrap();
    model.add_section("Sec", sec).unwrap();
    model.add_node("n1", Node::fixed(0.0, 0.0)).unwrap();
    model.add_node("n2", Node::new(5.0, 0.0)).unwrap();
    model.add_member("m1", Member::new("n1", "n2", "Mat", "Sec")).unwrap();
    model.add_load_case("tip").unwrap();
    model.add_node_load("n2", NodeLoad::fy(-10.0, "tip")).unwrap();

    let results = model.analyze(&AnalysisOptions::linear()).unwrap();
    let case = &results.cases[0];

    let r1 = case.reactions[0].unwrap();
    assert_relative_eq!(r1.ry, 10.0, epsilon = 1e-6);
    assert_relative_eq!(r1.mz, 50.0, epsilon = 1e-6);

    let tip_deflection = case.member_states[0].displacements[4];
    assert_relative_eq!(tip_deflection.abs(), 10.0 * 125.0 / 3000.0, epsilon = 1e-6);
}

#[test]
fn s3_portal_frame_hinged_top_has_zero_moment_at_hinges() {
    let (mat, sec) = steel_like();
    let mut model = Model::new();
    model.add_material("Mat", mat).unwrap();
    model.add_section("Sec", sec).unwrap();
    model.add_node("n1", Node::fixed(0.0, 0.0)).unwrap();
    model.add_node("n2", Node::new(0.0, 4.0).with_hinge()).unwrap();
    model.add_node("n3", Node::new(6.0, 4.0).with_hinge()).unwrap();
    model.add_node("n4", Node::fixed(6.0, 0.0)).unwrap();
    model.add_member("col1", Member::new("n1", "n2", "Mat", "Sec")).unwrap();
    model.add_member("beam", Member::new("n2", "n3", "Mat", "Sec")).unwrap();
    model.add_member("col2", Member::new("n3", "n4", "Mat", "Sec")).unwrap();
    model.add_load_case("q").unwrap();
    model.add_member_load("beam", MemberLoad::distributed_local(0.0, -1.0, "q")).unwrap();

    let results = model.analyze(&AnalysisOptions::linear()).unwrap();
    let case = &results.cases[0];

    // col1's j-end and beam's i-end both land on node n2's hinge; col2's i-end and
    // beam's j-end both land on node n3's hinge. A nodal hinge gives each member an
    // independent rotation DOF there, so the moment each member reports at that end
    // is fully released.
    let col1_j_moment = case.member_states[0].forces[5];
    let beam_i_moment = case.member_states[1].forces[2];
    let beam_j_moment = case.member_states[1].forces[5];
    let col2_i_moment = case.member_states[2].forces[2];

    assert_relative_eq!(col1_j_moment, 0.0, epsilon = 1e-6);
    assert_relative_eq!(beam_i_moment, 0.0, epsilon = 1e-6);
    assert_relative_eq!(beam_j_moment, 0.0, epsilon = 1e-6);
    assert_relative_eq!(col2_i_moment, 0.0, epsilon = 1e-6);
}

#[test]
fn s4_oblique_roller_reaction_lies_on_support_axis() {
    let (mat, sec) = steel_like();
    let mut model = Model::new();
    model.add_material("Mat", mat).unwrap();
    model.add_section("Sec", sec).unwrap();
    // n1: free in x, restrained in y and rotation (a roller_y alone would leave the
    // whole span one rigid-body rotation short of being kinematically determinate,
    // since n2 only contributes a single oblique constraint line).
    model
        .add_node("n1", Node { rz: true, ..Node::roller_y(0.0, 0.0) })
        .unwrap();
    model
        .add_node(
            "n2",
            Node::roller_y(10.0, 0.0).with_support_angle(std::f64::consts::FRAC_PI_4),
        )
        .unwrap();
    model.add_member("m1", Member::new("n1", "n2", "Mat", "Sec")).unwrap();
    model.add_load_case("h").unwrap();
    model.add_node_load("n1", NodeLoad::fx(10.0, "h")).unwrap();

    let results = model.analyze(&AnalysisOptions::linear()).unwrap();
    let r2 = results.cases[0].reactions[1].unwrap();

    // A reaction confined to a 45-degree support axis has equal-magnitude components.
    assert_relative_eq!(r2.rx.abs(), r2.ry.abs(), epsilon = 1e-6);
}

#[test]
fn s5_axial_compression_amplifies_lateral_deflection() {
    let (mat, sec) = steel_like();
    let mut model = Model::new();
    model.add_material("Mat", mat).unwrap();
    model.add_section("Sec", sec).unwrap();
    model.add_node("n1", Node::fixed(0.0, 0.0)).unwrap();
    model.add_node("n2", Node::new(0.0, 10.0)).unwrap();
    model.add_member("col", Member::new("n1", "n2", "Mat", "Sec")).unwrap();
    model.add_load_case("p").unwrap();
    // A small lateral nudge alongside a large compressive axial load.
    model.add_node_load("n2", NodeLoad::new(1.0, -20.0, 0.0, 0.0, "p")).unwrap();

    let linear = model.analyze(&AnalysisOptions::linear()).unwrap();
    let nonlinear = model
        .analyze(&AnalysisOptions::nonlinear().with_max_iterations(30).with_tolerance(1e-6))
        .unwrap();

    let lateral_linear = linear.cases[0].member_states[0].displacements[4].abs();
    let lateral_nonlinear = nonlinear.cases[0].member_states[0].displacements[4].abs();

    assert!(
        lateral_nonlinear > lateral_linear,
        "expected P-Delta amplification: linear={lateral_linear}, nonlinear={lateral_nonlinear}"
    );
    assert!(nonlinear.cases[0].nonlinear.unwrap().converged);
}

#[test]
fn s6_thermal_gradient_produces_constant_moment_and_no_axial_force() {
    // Both ends fully fixed: the span can't adopt its free thermal curvature, so a
    // constant restraining moment develops (unlike a determinate pin/roller span,
    // which just curves stress-free). Equal top/bottom temperatures keep the mean
    // temperature rise at zero, so no axial force develops either.
    let mut model = Model::new();
    model.add_material("Mat", Material::new(1.0, 1.0e-5)).unwrap();
    model.add_section("Sec", Section::generic(1.0e3, 1.0e6, 0.05, 0.05)).unwrap();
    model.add_node("n1", Node::fixed(0.0, 0.0)).unwrap();
    model.add_node("n2", Node::fixed(10.0, 0.0)).unwrap();
    model.add_member("m1", Member::new("n1", "n2", "Mat", "Sec")).unwrap();
    model.add_load_case("thermal").unwrap();
    model
        .add_member_load("m1", MemberLoad::thermal(10.0, -10.0, "thermal"))
        .unwrap();

    let results = model.analyze(&AnalysisOptions::linear()).unwrap();
    let case = &results.cases[0];

    let restrained_moment = 1.0e-5 * 1.0e3 * 20.0 / 0.1;
    for &m in &case.force_curves[0].m {
        assert_relative_eq!(m, restrained_moment, epsilon = 1e-6);
    }
    for &n in &case.force_curves[0].n {
        assert_relative_eq!(n, 0.0, epsilon = 1e-9);
    }

    let r1 = case.reactions[0].unwrap();
    let r2 = case.reactions[1].unwrap();
    assert_relative_eq!(r1.rx, 0.0, epsilon = 1e-9);
    assert_relative_eq!(r1.ry, 0.0, epsilon = 1e-9);
    assert_relative_eq!(r2.rx, 0.0, epsilon = 1e-9);
    assert_relative_eq!(r2.ry, 0.0, epsilon = 1e-9);
    assert_relative_eq!(r1.mz, -restrained_moment, epsilon = 1e-6);
    assert_relative_eq!(r2.mz, restrained_moment, epsilon = 1e-6);
}

#[test]
fn dof_conservation_holds_across_a_multi_member_model() {
    let (mat, sec) = steel_like();
    let mut model = Model::new();
    model.add_material("Mat", mat).unwrap();
    model.add_section("Sec", sec).unwrap();
    model.add_node("n1", Node::fixed(0.0, 0.0)).unwrap();
    model.add_node("n2", Node::new(0.0, 4.0).with_hinge()).unwrap();
    model.add_node("n3", Node::new(6.0, 4.0).with_hinge()).unwrap();
    model.add_node("n4", Node::fixed(6.0, 0.0)).unwrap();
    model.add_member("col1", Member::new("n1", "n2", "Mat", "Sec")).unwrap();
    model.add_member("beam", Member::new("n2", "n3", "Mat", "Sec")).unwrap();
    model.add_member("col2", Member::new("n3", "n4", "Mat", "Sec")).unwrap();

    let topo = topology::build_topology(&model).unwrap();
    let expected_slots: usize = 3 * model.nodes().len()
        + topo.dof_extras.iter().sum::<usize>()
        + topo.dof_int.iter().sum::<usize>();
    assert_eq!(topo.total_slots(), expected_slots);
}

#[test]
fn superposition_holds_for_a_linear_combination() {
    let (mat, sec) = steel_like();
    let mut model = Model::new();
    model.add_material("Mat", mat).unwrap();
    model.add_section("Sec", sec).unwrap();
    model.add_node("n1", Node::pinned(0.0, 0.0)).unwrap();
    model.add_node("n2", Node::roller_y(10.0, 0.0)).unwrap();
    model.add_member("m1", Member::new("n1", "n2", "Mat", "Sec")).unwrap();
    model.add_load_case("A").unwrap();
    model.add_load_case("B").unwrap();
    model.add_member_load("m1", MemberLoad::distributed_local(0.0, -1.0, "A")).unwrap();
    model.add_node_load("n2", NodeLoad::fy(-3.0, "B")).unwrap();
    model
        .add_combination(LoadCombination::new("combo").with_case("A", 1.5).with_case("B", -2.0))
        .unwrap();

    let results = model.analyze(&AnalysisOptions::linear()).unwrap();
    let a = &results.cases[0];
    let b = &results.cases[1];
    let combo = &results.cases[2];

    for m in 0..model.members().len() {
        for k in 0..6 {
            let expected = 1.5 * a.member_states[m].forces[k] - 2.0 * b.member_states[m].forces[k];
            assert_relative_eq!(combo.member_states[m].forces[k], expected, epsilon = 1e-9);
        }
    }
}

#[test]
fn envelopes_bound_every_sampled_force_value() {
    let (mat, sec) = steel_like();
    let mut model = Model::new();
    model.add_material("Mat", mat).unwrap();
    model.add_section("Sec", sec).unwrap();
    model.add_node("n1", Node::pinned(0.0, 0.0)).unwrap();
    model.add_node("n2", Node::roller_y(10.0, 0.0)).unwrap();
    model.add_member("m1", Member::new("n1", "n2", "Mat", "Sec")).unwrap();
    model.add_load_case("A").unwrap();
    model.add_load_case("B").unwrap();
    model.add_member_load("m1", MemberLoad::distributed_local(0.0, -1.0, "A")).unwrap();
    model.add_member_load("m1", MemberLoad::distributed_local(0.0, -3.0, "B")).unwrap();

    let results = model.analyze(&AnalysisOptions::linear()).unwrap();
    let env = &results.envelopes[0];

    for case in &results.cases {
        for &m in &case.force_curves[0].m {
            assert!(m <= env.moment_max.value + 1e-9);
            assert!(m >= env.moment_min.value - 1e-9);
        }
    }
}
