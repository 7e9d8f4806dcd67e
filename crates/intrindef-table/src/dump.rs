//! Human-readable intrinsic table dump for debugging and snapshot tests.
//!
//! Each array is printed as a `[section]` with one entry per line. Entries are
//! prefixed by a short tag and their index:
//! - `T` type matchers, `N` number matchers, `M` matcher indices
//! - `TT` template types, `TN` template numbers, `P` parameters
//! - `O` overloads, `C` const-eval function indices

use std::fmt::Write as _;

use crate::rows::{IntrinsicRow, IntrinsicTable, OverloadRow};

/// Generate a human-readable dump of the table.
pub fn dump(table: &IntrinsicTable) -> String {
    let mut out = String::new();

    dump_matchers(&mut out, table);
    dump_matcher_indices(&mut out, table);
    dump_template_types(&mut out, table);
    dump_template_numbers(&mut out, table);
    dump_parameters(&mut out, table);
    dump_overloads(&mut out, table);
    dump_const_eval(&mut out, table);
    dump_intrinsics(&mut out, table);

    out
}

/// Digits needed to print the largest index of a `count`-element array.
fn width_for_count(count: usize) -> usize {
    count.saturating_sub(1).max(1).to_string().len()
}

fn offset(tag: &str, offset: Option<u32>, count: u32) -> String {
    match offset {
        Some(o) => format!("{tag}{o}:{count}"),
        None => format!("{tag}-:{count}"),
    }
}

fn dump_matchers(out: &mut String, table: &IntrinsicTable) {
    let w = width_for_count(table.type_matchers.len());
    writeln!(out, "[type_matchers]").unwrap();
    for (i, slot) in table.type_matchers.iter().enumerate() {
        writeln!(out, "T{i:0w$} = {slot}").unwrap();
    }
    out.push('\n');

    let w = width_for_count(table.number_matchers.len());
    writeln!(out, "[number_matchers]").unwrap();
    for (i, slot) in table.number_matchers.iter().enumerate() {
        writeln!(out, "N{i:0w$} = {slot}").unwrap();
    }
    out.push('\n');
}

fn dump_matcher_indices(out: &mut String, table: &IntrinsicTable) {
    let w = width_for_count(table.matcher_indices.len());
    writeln!(out, "[matcher_indices]").unwrap();
    for (i, index) in table.matcher_indices.iter().enumerate() {
        writeln!(out, "M{i:0w$} = {index}").unwrap();
    }
    out.push('\n');
}

fn dump_template_types(out: &mut String, table: &IntrinsicTable) {
    let w = width_for_count(table.template_types.len());
    writeln!(out, "[template_types]").unwrap();
    for (i, t) in table.template_types.iter().enumerate() {
        match t.matcher_index {
            Some(m) => writeln!(out, "TT{i:0w$} = {}  ; T{m}", t.name).unwrap(),
            None => writeln!(out, "TT{i:0w$} = {}", t.name).unwrap(),
        }
    }
    out.push('\n');
}

fn dump_template_numbers(out: &mut String, table: &IntrinsicTable) {
    let w = width_for_count(table.template_numbers.len());
    writeln!(out, "[template_numbers]").unwrap();
    for (i, t) in table.template_numbers.iter().enumerate() {
        match t.matcher_index {
            Some(m) => writeln!(out, "TN{i:0w$} = {}  ; N{m}", t.name).unwrap(),
            None => writeln!(out, "TN{i:0w$} = {}", t.name).unwrap(),
        }
    }
    out.push('\n');
}

fn dump_parameters(out: &mut String, table: &IntrinsicTable) {
    let w = width_for_count(table.parameters.len());
    writeln!(out, "[parameters]").unwrap();
    for (i, p) in table.parameters.iter().enumerate() {
        let usage = p.usage.as_deref().unwrap_or("_");
        let indices = match p.matcher_indices_offset {
            Some(o) => format!("M{o}"),
            None => "M-".to_string(),
        };
        writeln!(out, "P{i:0w$} = {usage} @ {indices}").unwrap();
    }
    out.push('\n');
}

fn dump_overloads(out: &mut String, table: &IntrinsicTable) {
    let w = width_for_count(table.overloads.len());
    writeln!(out, "[overloads]").unwrap();
    for (i, o) in table.overloads.iter().enumerate() {
        writeln!(out, "O{i:0w$} = {}", format_overload(o)).unwrap();
    }
    out.push('\n');
}

fn format_overload(o: &OverloadRow) -> String {
    let mut line = format!(
        "{:<4} {} {} {}",
        o.kind.keyword(),
        offset("P", o.parameters_offset, o.num_parameters),
        offset("TT", o.template_types_offset, o.num_template_types),
        offset("TN", o.template_numbers_offset, o.num_template_numbers),
    );
    if let Some(ret) = o.return_matcher_indices_offset {
        write!(line, " -> M{ret}").unwrap();
    }
    if let Some(c) = o.const_eval_function_offset {
        write!(line, " C{c}").unwrap();
    }
    write!(line, "  ; {}", o.stages).unwrap();
    if o.must_use {
        line.push_str(" must_use");
    }
    if o.is_deprecated {
        line.push_str(" deprecated");
    }
    line
}

fn dump_const_eval(out: &mut String, table: &IntrinsicTable) {
    let w = width_for_count(table.const_eval_function_indices.len());
    writeln!(out, "[const_eval]").unwrap();
    for (i, &index) in table.const_eval_function_indices.iter().enumerate() {
        let name = table
            .const_eval_functions
            .get(index as usize)
            .map(String::as_str)
            .unwrap_or("?");
        writeln!(out, "C{i:0w$} = {index}  ; {name}").unwrap();
    }
    out.push('\n');
}

fn dump_intrinsics(out: &mut String, table: &IntrinsicTable) {
    for (title, rows) in table.families() {
        writeln!(out, "[{}]", title.replace(' ', "_")).unwrap();
        for row in rows {
            dump_intrinsic(out, row);
        }
        out.push('\n');
    }
}

fn dump_intrinsic(out: &mut String, row: &IntrinsicRow) {
    writeln!(
        out,
        "{} {}",
        row.name,
        offset("O", row.overloads_offset, row.num_overloads)
    )
    .unwrap();
    for desc in &row.overload_descriptions {
        writeln!(out, "  ; {desc}").unwrap();
    }
}
