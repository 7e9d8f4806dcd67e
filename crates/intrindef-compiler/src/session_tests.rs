use std::sync::Arc;

use indoc::indoc;

use crate::Session;
use crate::permute::PermuteOptions;
use crate::test_utils::ORIGIN;

const SOURCE: &str = indoc! {r#"
type f32
type i32
match fi: f32 | i32
fn f<T: fi>(T) -> T
fn g(f32)
"#};

fn session(source: &str) -> Session {
    Session::new(source, ORIGIN).unwrap()
}

#[test]
fn session_is_shareable() {
    fn assert_sync<T: Send + Sync>() {}
    assert_sync::<Session>();
}

#[test]
fn table_is_built_once() {
    let session = session(SOURCE);

    let first = session.intrinsic_table().unwrap();
    let second = session.intrinsic_table().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.builtins.len(), 2);
}

#[test]
fn permutations_are_cached_per_overload() {
    let session = session(SOURCE);
    let f = session.sem().find_overload("f", 0).unwrap();
    let g = session.sem().find_overload("g", 0).unwrap();

    let first = session.permutations(f).unwrap();
    let again = session.permutations(f).unwrap();
    let other = session.permutations(g).unwrap();

    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(first.len(), 2);
    assert_eq!(other.len(), 1);
}

#[test]
fn all_permutations_in_table_order() {
    let session = session(SOURCE);

    let all = session.all_permutations().unwrap();

    let descriptions: Vec<&str> = all
        .iter()
        .flat_map(|(_, perms)| perms.iter().map(|p| p.description.as_str()))
        .collect();
    insta::assert_snapshot!(descriptions.join("\n"), @r"
    fn f(f32) -> f32
    fn f(i32) -> i32
    fn g(f32)
    ");
}

#[test]
fn hashes_collide_across_overloads() {
    let session = session("type f32 type i32 fn f(f32) fn g(i32)")
        .with_options(PermuteOptions::new().with_hash_len(0));
    let f = session.sem().find_overload("f", 0).unwrap();
    let g = session.sem().find_overload("g", 0).unwrap();

    session.permutations(f).unwrap();
    let err = session.permutations(g).unwrap_err();

    insta::assert_snapshot!(err, @"origin:1:32 hash '' collides for 'fn f(f32)' and 'fn g(i32)', use a longer hash");
}

#[test]
fn resolve_errors_surface_from_new() {
    let Err(err) = Session::new("type X type X", ORIGIN) else {
        panic!("expected an error");
    };

    insta::assert_snapshot!(err, @r"
    origin:1:13 'X' already declared
    First declared here: origin:1:6
    ");
    assert_eq!(err.location().map(|l| l.column), Some(13));
}

#[test]
fn generation_errors_render_against_source() {
    let source = "type bool type array<T> fn f(a: array<bool>)";
    let session = session(source);
    let f = session.sem().find_overload("f", 0).unwrap();

    let err = session.permutations(f).unwrap_err();

    let out = err.render(session.source(), false);

    assert!(out.contains("parameter 0 has no permutations"));
    assert!(out.contains("origin:1:28"));
    assert!(out.contains("fn f(a: array<bool>)"));
}
