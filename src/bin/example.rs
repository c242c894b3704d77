//! Portal frame example: fixed columns, a beam with a hinged connection at one
//! end, dead and wind load cases, and a factored combination.

use fea_solver::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut model = Model::new();

    model.add_material("Steel", Material::steel())?;
    model.add_section("W12x26", Section::generic(8.49e-5, 0.00494, 0.15, 0.15))?;

    let height = 4.0;
    let span = 6.0;

    model.add_node("N1", Node::fixed(0.0, 0.0))?;
    model.add_node("N2", Node::fixed(span, 0.0))?;
    model.add_node("N3", Node::new(0.0, height))?;
    model.add_node("N4", Node::new(span, height))?;

    model.add_member("Col1", Member::new("N1", "N3", "Steel", "W12x26"))?;
    model.add_member("Col2", Member::new("N2", "N4", "Steel", "W12x26"))?;
    model.add_member(
        "Beam",
        Member::new("N3", "N4", "Steel", "W12x26").with_releases(MemberReleases::pin_end()),
    )?;

    model.add_load_case("Dead")?;
    model.add_load_case("Wind")?;

    model.add_member_load("Beam", MemberLoad::distributed_local(0.0, -20_000.0, "Dead"))?;
    model.add_node_load("N3", NodeLoad::fx(10_000.0, "Wind"))?;

    model.add_combination(LoadCombination::new("1.4D").with_case("Dead", 1.4))?;
    model.add_combination(
        LoadCombination::new("1.2D + 1.0W")
            .with_case("Dead", 1.2)
            .with_case("Wind", 1.0),
    )?;

    let results = model.analyze(&AnalysisOptions::linear())?;

    for (case_idx, case) in results.cases.iter().enumerate() {
        let label = if case_idx < model.n_raw_cases() {
            model.load_cases()[case_idx].name.clone()
        } else {
            model.combinations()[case_idx - model.n_raw_cases()].name.clone()
        };
        println!("=== {label} ===");
        for (node_idx, reaction) in case.reactions.iter().enumerate() {
            if let Some(r) = reaction {
                println!(
                    "  reaction at {}: Rx={:.1} Ry={:.1} Mz={:.1}",
                    model.node_name(node_idx),
                    r.rx,
                    r.ry,
                    r.mz
                );
            }
        }
        for (member_idx, state) in case.member_states.iter().enumerate() {
            println!(
                "  member {}: N_i={:.1} V_i={:.1} M_i={:.1}",
                model.member_name(member_idx),
                state.forces[0],
                state.forces[1],
                state.forces[2]
            );
        }
    }

    let text = fea_solver::serialize::save(&model);
    let reloaded = fea_solver::serialize::load(&text)?;
    println!(
        "\nround-tripped model: {} node(s), {} member(s)",
        reloaded.nodes().len(),
        reloaded.members().len()
    );

    Ok(())
}
