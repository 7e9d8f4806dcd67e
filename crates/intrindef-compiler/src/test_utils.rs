//! Test utilities shared by the unit tests of every stage.

use intrindef_table::{IntrinsicTable, dump};

use crate::emit::build_intrinsic_table;
use crate::parser::{Ast, parse};
use crate::permute::{Permutation, PermuteOptions, permute};
use crate::sem::Sem;

/// Origin label used for every test source.
pub const ORIGIN: &str = "origin";

pub fn parse_ok(source: &str) -> Ast {
    match parse(source, ORIGIN) {
        Ok(ast) => ast,
        Err(e) => panic!("expected source to parse, got: {e}"),
    }
}

/// The one-line rendering of the parse error for `source`.
pub fn parse_err(source: &str) -> String {
    match parse(source, ORIGIN) {
        Ok(ast) => panic!("expected a parse error, got:\n{ast}"),
        Err(e) => e.to_string(),
    }
}

pub fn resolve_ok(source: &str) -> Sem {
    match crate::resolve(source, ORIGIN) {
        Ok(sem) => sem,
        Err(e) => panic!("expected source to resolve, got: {e}"),
    }
}

/// The one-line rendering of the parse or resolve error for `source`.
pub fn resolve_err(source: &str) -> String {
    match crate::resolve(source, ORIGIN) {
        Ok(_) => panic!("expected a resolve error"),
        Err(e) => e.to_string(),
    }
}

/// Descriptions of every permutation of the `n`-th overload of `intrinsic`.
pub fn permute_ok(source: &str, intrinsic: &str, n: usize) -> Vec<Permutation> {
    let sem = resolve_ok(source);
    let Some(overload) = sem.find_overload(intrinsic, n) else {
        panic!("no overload {n} of '{intrinsic}'");
    };
    match permute(&sem, overload, &PermuteOptions::default()) {
        Ok(perms) => perms,
        Err(e) => panic!("expected overload to permute, got: {e}"),
    }
}

/// One description per line.
pub fn permute_descriptions(source: &str, intrinsic: &str) -> String {
    permute_ok(source, intrinsic, 0)
        .iter()
        .map(|p| p.description.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn permute_err(source: &str, intrinsic: &str) -> String {
    let sem = resolve_ok(source);
    let Some(overload) = sem.find_overload(intrinsic, 0) else {
        panic!("no overload of '{intrinsic}'");
    };
    match permute(&sem, overload, &PermuteOptions::default()) {
        Ok(perms) => panic!("expected a generation error, got {} permutations", perms.len()),
        Err(e) => e.to_string(),
    }
}

pub fn table_ok(source: &str) -> IntrinsicTable {
    let sem = resolve_ok(source);
    match build_intrinsic_table(&sem) {
        Ok(table) => table,
        Err(e) => panic!("expected table to build, got: {e}"),
    }
}

pub fn table_dump(source: &str) -> String {
    dump(&table_ok(source))
}
