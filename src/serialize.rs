//! Model (de)serialization: a line-oriented text format, the only externally
//! observable persistence contract for this crate.
//!
//! Nodes and members are not named in the file — a record's position within its
//! section IS its dense index, matching the model store's own stable insertion
//! order. On load, synthetic names (`N0`, `M0`, ...) are assigned so the model can
//! still be built through the named API.

use crate::elements::{Material, Member, MemberReleases, Node, Section};
use crate::error::{FEAError, FEAResult};
use crate::loads::{LoadCombination, MemberLoad, NodeLoad};
use crate::model::Model;

const SENTINEL: char = '¬';
const SECTIONS_ORDER: [&str; 6] = ["LOADCASES", "COMBINATIONS", "MATERIALS", "SECTIONS", "NODES", "MEMBERS"];

enum Tok {
    Plain(String),
    Quoted(String),
}

fn tokenize(line: &str) -> Vec<Tok> {
    let mut toks = Vec::new();
    let mut outside = String::new();
    let mut quoted = String::new();
    let mut in_quote = false;
    for ch in line.chars() {
        if ch == SENTINEL {
            if in_quote {
                toks.push(Tok::Quoted(std::mem::take(&mut quoted)));
            } else {
                for t in outside.split_whitespace() {
                    toks.push(Tok::Plain(t.to_string()));
                }
                outside.clear();
            }
            in_quote = !in_quote;
        } else if in_quote {
            quoted.push(ch);
        } else {
            outside.push(ch);
        }
    }
    for t in outside.split_whitespace() {
        toks.push(Tok::Plain(t.to_string()));
    }
    toks
}

fn quote(name: &str) -> String {
    format!("{SENTINEL}{name}{SENTINEL}")
}

struct Cursor {
    toks: Vec<Tok>,
    pos: usize,
}

impl Cursor {
    fn new(line: &str) -> Self {
        Self { toks: tokenize(line), pos: 0 }
    }

    fn next_plain(&mut self) -> FEAResult<&str> {
        match self.toks.get(self.pos) {
            Some(Tok::Plain(s)) => {
                self.pos += 1;
                Ok(s)
            }
            _ => Err(FEAError::ParseError("expected a plain token".into())),
        }
    }

    fn next_quoted(&mut self) -> FEAResult<String> {
        match self.toks.get(self.pos) {
            Some(Tok::Quoted(s)) => {
                self.pos += 1;
                Ok(s.clone())
            }
            _ => Err(FEAError::ParseError("expected a quoted token".into())),
        }
    }

    fn next_f64(&mut self) -> FEAResult<f64> {
        self.next_plain()?
            .parse()
            .map_err(|_| FEAError::ParseError("expected a number".into()))
    }

    fn next_usize(&mut self) -> FEAResult<usize> {
        self.next_plain()?
            .parse()
            .map_err(|_| FEAError::ParseError("expected an integer".into()))
    }

    fn next_bool(&mut self) -> FEAResult<bool> {
        Ok(self.next_f64()? != 0.0)
    }

    fn remaining(&self) -> usize {
        self.toks.len() - self.pos
    }
}

/// Write the model to the text format, in the canonical section order.
pub fn save(model: &Model) -> String {
    let mut out = String::new();

    out.push_str("LOADCASES\n");
    for case in model.load_cases() {
        out.push_str(&quote(&case.name));
        out.push('\n');
    }

    out.push_str("COMBINATIONS\n");
    for combo in model.combinations() {
        out.push_str(&quote(&combo.name));
        for case in model.load_cases() {
            out.push(' ');
            out.push_str(&combo.factor(&case.name).to_string());
        }
        out.push('\n');
    }

    out.push_str("MATERIALS\n");
    for (name, mat) in model.materials() {
        out.push_str(&format!("{} {} {}\n", quote(name), mat.e, mat.alpha));
    }

    out.push_str("SECTIONS\n");
    for (name, sec) in model.sections() {
        out.push_str(&format!("{} 0 {} {} {} {}\n", quote(name), sec.i, sec.a, sec.ysup, sec.yinf));
    }

    out.push_str("NODES\n");
    for (idx, node) in model.nodes().iter().enumerate() {
        out.push_str(&format!(
            "{} {} {} {} {} {} {} {} {} {} {} {} {}",
            node.x,
            node.y,
            node.rx as u8,
            node.ry as u8,
            node.rz as u8,
            node.support_angle,
            node.kx,
            node.ky,
            node.kz,
            node.dx,
            node.dy,
            node.drz,
            node.hinge as u8,
        ));
        for case in model.load_cases() {
            let load = model
                .node_loads_for(idx)
                .iter()
                .find(|l| l.case == case.name)
                .cloned()
                .unwrap_or_else(|| NodeLoad::new(0.0, 0.0, 0.0, 0.0, &case.name));
            out.push_str(&format!(" {} {} {} {}", load.px, load.py, load.mz, load.pangle));
        }
        out.push('\n');
    }

    out.push_str("MEMBERS\n");
    for member in model.members() {
        let i = model.node_index(&member.i_node).unwrap_or(0);
        let j = model.node_index(&member.j_node).unwrap_or(0);
        out.push_str(&format!(
            "{} {} {} {} {} {} {} {}",
            i,
            j,
            quote(&member.material),
            quote(&member.section),
            member.tensile,
            member.curvature,
            member.releases.start as u8,
            member.releases.end as u8,
        ));
        let midx = member.id.unwrap_or(0);
        for case in model.load_cases() {
            let load = model
                .member_loads_for(midx)
                .iter()
                .find(|l| l.case == case.name)
                .cloned()
                .unwrap_or_else(|| MemberLoad::new(0.0, 0.0, false, 0.0, 0.0, &case.name));
            out.push_str(&format!(
                " {} {} {} {} {}",
                load.qx,
                load.qy,
                load.local as u8,
                load.tsup,
                load.tinf
            ));
        }
        out.push('\n');
    }

    out
}

/// Parse the text format. Section order in the input is NOT required; the
/// initial section defaults to `LOADCASES` if the first non-empty line is not a
/// recognized keyword.
pub fn load(text: &str) -> FEAResult<Model> {
    let mut model = Model::new();
    let mut section = "LOADCASES";
    let mut nc = 0usize;
    let mut node_counter = 0usize;
    let mut member_counter = 0usize;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if SECTIONS_ORDER.contains(&line) {
            section = SECTIONS_ORDER.iter().find(|&&s| s == line).unwrap();
            continue;
        }

        match section {
            "LOADCASES" => {
                let mut c = Cursor::new(line);
                let name = c.next_quoted()?;
                model.add_load_case(&name)?;
                nc += 1;
            }
            "COMBINATIONS" => {
                let mut c = Cursor::new(line);
                let name = c.next_quoted()?;
                let mut combo = LoadCombination::new(&name);
                for case in model.load_cases().to_vec() {
                    let f = c.next_f64()?;
                    combo = combo.with_case(&case.name, f);
                }
                model.add_combination(combo)?;
            }
            "MATERIALS" => {
                let mut c = Cursor::new(line);
                let name = c.next_quoted()?;
                let e = c.next_f64()?;
                let alpha = c.next_f64()?;
                model.add_material(&name, Material::new(e, alpha))?;
            }
            "SECTIONS" => {
                let mut c = Cursor::new(line);
                let name = c.next_quoted()?;
                let type_id = c.next_usize()?;
                let section_value = match type_id {
                    0 => Section::generic(c.next_f64()?, c.next_f64()?, c.next_f64()?, c.next_f64()?),
                    1 => Section::circle(c.next_f64()?, c.next_f64()?),
                    2 => Section::rectangle(c.next_f64()?, c.next_f64()?),
                    3 => Section::symmetric_i(c.next_f64()?, c.next_f64()?, c.next_f64()?, c.next_f64()?),
                    4 => Section::asymmetric_i(
                        c.next_f64()?,
                        c.next_f64()?,
                        c.next_f64()?,
                        c.next_f64()?,
                        c.next_f64()?,
                        c.next_f64()?,
                    ),
                    other => return Err(FEAError::ParseError(format!("unknown section type id {other}"))),
                };
                model.add_section(&name, section_value)?;
            }
            "NODES" => {
                let mut c = Cursor::new(line);
                let x = c.next_f64()?;
                let y = c.next_f64()?;
                let rx = c.next_bool()?;
                let ry = c.next_bool()?;
                let rz = c.next_bool()?;
                let angle = c.next_f64()?;
                let kx = c.next_f64()?;
                let ky = c.next_f64()?;
                let kz = c.next_f64()?;
                let dx = c.next_f64()?;
                let dy = c.next_f64()?;
                let drz = c.next_f64()?;
                let hinge = c.next_bool()?;
                let mut node = Node::new(x, y);
                node.rx = rx;
                node.ry = ry;
                node.rz = rz;
                node.support_angle = angle;
                node.kx = kx;
                node.ky = ky;
                node.kz = kz;
                node.dx = dx;
                node.dy = dy;
                node.drz = drz;
                node.hinge = hinge;
                let name = format!("N{node_counter}");
                node_counter += 1;
                model.add_node(&name, node)?;
                while c.remaining() >= 4 {
                    let px = c.next_f64()?;
                    let py = c.next_f64()?;
                    let mz = c.next_f64()?;
                    let pangle = c.next_f64()?;
                    let case_idx = (c.pos - 17) / 4; // 13 node fields + 4 per case
                    let case_name = model
                        .load_cases()
                        .get(case_idx)
                        .map(|lc| lc.name.clone())
                        .unwrap_or_default();
                    if (px, py, mz, pangle) != (0.0, 0.0, 0.0, 0.0) && !case_name.is_empty() {
                        model.add_node_load(&name, NodeLoad::new(px, py, mz, pangle, &case_name))?;
                    }
                }
            }
            "MEMBERS" => {
                let mut c = Cursor::new(line);
                let i = c.next_usize()?;
                let j = c.next_usize()?;
                let material = c.next_quoted()?;
                let sec = c.next_quoted()?;
                let tensile = c.next_f64()?;
                let curvature = c.next_f64()?;
                let rel_start = c.next_bool()?;
                let rel_end = c.next_bool()?;
                let i_name = format!("N{i}");
                let j_name = format!("N{j}");
                let member = Member::new(&i_name, &j_name, &material, &sec)
                    .with_releases(MemberReleases { start: rel_start, end: rel_end })
                    .with_imperfections(tensile, curvature);
                let name = format!("M{member_counter}");
                member_counter += 1;
                model.add_member(&name, member)?;
                let mut idx = 0;
                while c.remaining() >= 5 {
                    let qx = c.next_f64()?;
                    let qy = c.next_f64()?;
                    let local = c.next_bool()?;
                    let tsup = c.next_f64()?;
                    let tinf = c.next_f64()?;
                    if let Some(case) = model.load_cases().get(idx) {
                        let case_name = case.name.clone();
                        if (qx, qy, tsup, tinf) != (0.0, 0.0, 0.0, 0.0) {
                            model.add_member_load(&name, MemberLoad::new(qx, qy, local, tsup, tinf, &case_name))?;
                        }
                    }
                    idx += 1;
                }
            }
            other => {
                return Err(FEAError::ParseError(format!("unrecognized section '{other}'")));
            }
        }
    }

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Material, Node, Section};

    #[test]
    fn round_trips_a_simple_beam_model() {
        let mut model = Model::new();
        model.add_load_case("Dead").unwrap();
        model.add_material("Steel", Material::new(2e8, 1.2e-5)).unwrap();
        model.add_section("Sec", Section::rectangle(0.3, 0.5)).unwrap();
        model.add_node("n1", Node::pinned(0.0, 0.0)).unwrap();
        model.add_node("n2", Node::roller_y(10.0, 0.0)).unwrap();
        model.add_member("m1", Member::new("n1", "n2", "Steel", "Sec")).unwrap();
        model
            .add_member_load("m1", MemberLoad::distributed_local(0.0, -1.0, "Dead"))
            .unwrap();

        let text = save(&model);
        let reloaded = load(&text).unwrap();

        assert_eq!(reloaded.nodes().len(), model.nodes().len());
        assert_eq!(reloaded.members().len(), model.members().len());
        assert_eq!(reloaded.load_cases().len(), model.load_cases().len());
        assert!((reloaded.nodes()[1].x - 10.0).abs() < 1e-9);
        assert_eq!(reloaded.member_loads_for(0).len(), 1);
        assert!((reloaded.member_loads_for(0)[0].qy + 1.0).abs() < 1e-9);
    }

    #[test]
    fn reader_accepts_sections_in_any_order() {
        let text = "MATERIALS\n¬Steel¬ 2e8 1.2e-5\nLOADCASES\n¬Dead¬\nSECTIONS\n¬Sec¬ 2 0.3 0.5\nNODES\n0 0 1 1 0 0 0 0 0 0 0 0 0 0 0 0 0\n10 0 0 1 0 0 0 0 0 0 0 0 0 0 0 0 0\nCOMBINATIONS\nMEMBERS\n0 1 ¬Steel¬ ¬Sec¬ 0 0 0 0 0 0 0 0 0\n";
        let model = load(text).unwrap();
        assert_eq!(model.nodes().len(), 2);
        assert_eq!(model.members().len(), 1);
    }
}
