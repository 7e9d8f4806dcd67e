use indoc::indoc;

use super::{PermuteOptions, hash, permute};
use crate::sem::TemplateArg;
use crate::test_utils::{permute_descriptions, permute_err, permute_ok, resolve_ok};

const POINTERS: &str = indoc! {r#"
enum address_space { function, private, workgroup, uniform, storage, @internal handle }
enum access { read, write, read_write }
type f32
type ptr<S: address_space, T, A: access>
"#};

#[test]
fn non_templated_overload_has_one_permutation() {
    let perms = permute_ok("type f32 @must_use fn f() -> f32", "f", 0);

    assert_eq!(perms.len(), 1);
    let perm = &perms[0];
    assert_eq!(perm.description, "fn f() -> f32");
    assert_eq!(perm.hash, "c65b6f");
    assert!(perm.overload.must_use);
    assert!(perm.template_args.is_empty());
}

#[test]
fn independent_parameters_multiply() {
    let input = indoc! {r#"
    type f32
    type i32
    type u32
    match fiu32: f32 | i32 | u32
    match fi32: f32 | i32
    fn f(a: fiu32, b: fi32)
    "#};

    insta::assert_snapshot!(permute_descriptions(input, "f"), @r"
    fn f(a: f32, b: f32)
    fn f(a: f32, b: i32)
    fn f(a: i32, b: f32)
    fn f(a: i32, b: i32)
    fn f(a: u32, b: f32)
    fn f(a: u32, b: i32)
    ");
}

#[test]
fn template_numbers_are_outermost() {
    let input = indoc! {r#"
    type f32
    type i32
    type vec<N: num, T>
    match fi: f32 | i32
    fn f<N: num>(v: vec<N, fi>)
    "#};

    insta::assert_snapshot!(permute_descriptions(input, "f"), @r"
    fn f(v: vec<2, f32>)
    fn f(v: vec<2, i32>)
    fn f(v: vec<3, f32>)
    fn f(v: vec<3, i32>)
    fn f(v: vec<4, f32>)
    fn f(v: vec<4, i32>)
    ");
}

#[test]
fn template_args_follow_declaration_order() {
    let input = "type f32 type vec<N: num, T> fn length<N: num>(v: vec<N, f32>) -> f32";

    let perms = permute_ok(input, "length", 0);

    let numbers: Vec<_> = perms.iter().map(|p| p.template_args.clone()).collect();
    assert_eq!(
        numbers,
        vec![
            vec![TemplateArg::Number(2)],
            vec![TemplateArg::Number(3)],
            vec![TemplateArg::Number(4)],
        ]
    );
    assert_eq!(perms[1].description, "fn length(v: vec<3, f32>) -> f32");
}

#[test]
fn configured_template_numbers() {
    let sem = resolve_ok("type f32 type vec<N: num, T> fn f<N: num>(vec<N, f32>)");
    let overload = sem.find_overload("f", 0).unwrap();
    let options = PermuteOptions::new().with_template_numbers([4]);

    let perms = permute(&sem, overload, &options).unwrap();

    assert_eq!(perms.len(), 1);
    assert_eq!(perms[0].description, "fn f(vec<4, f32>)");
}

#[test]
fn unconstrained_type_ranges_over_plain_types() {
    let input = indoc! {r#"
    type f32
    type vec<N: num, T>
    type _hidden
    type i32
    fn f<T>(T) -> T
    "#};

    insta::assert_snapshot!(permute_descriptions(input, "f"), @r"
    fn f(f32) -> f32
    fn f(i32) -> i32
    ");
}

#[test]
fn pointer_address_space_and_access_pairs() {
    let input = format!("{POINTERS}fn load<S: address_space, A: access>(p: ptr<S, f32, A>) -> f32");

    insta::assert_snapshot!(permute_descriptions(&input, "load"), @r"
    fn load(p: ptr<function, f32, read_write>) -> f32
    fn load(p: ptr<private, f32, read_write>) -> f32
    fn load(p: ptr<workgroup, f32, read_write>) -> f32
    fn load(p: ptr<uniform, f32, read>) -> f32
    fn load(p: ptr<storage, f32, read>) -> f32
    fn load(p: ptr<storage, f32, read_write>) -> f32
    ");
}

#[test]
fn workgroup_pointer_restricts_stages() {
    let input = format!("{POINTERS}fn load<S: address_space>(p: ptr<S, f32, read_write>) -> f32");

    let perms = permute_ok(&input, "load", 0);

    let stages: Vec<String> = perms
        .iter()
        .map(|p| format!("{}: {}", p.template_args.len(), p.overload.stages))
        .collect();
    insta::assert_snapshot!(stages.join("\n"), @r"
    1: vertex, fragment, compute
    1: vertex, fragment, compute
    1: compute
    1: vertex, fragment, compute
    ");
}

#[test]
fn declared_stages_are_kept() {
    let input = format!(
        r#"{POINTERS}@stage("fragment") fn load(p: ptr<workgroup, f32, read_write>) -> f32"#
    );

    let perms = permute_ok(&input, "load", 0);

    assert_eq!(perms.len(), 1);
    assert_eq!(perms[0].overload.stages.to_string(), "");
}

#[test]
fn array_elements_must_be_storable() {
    let input = indoc! {r#"
    type bool
    type f32
    type fa
    type array<T>
    match scalar: bool | f32 | fa
    fn f(a: array<scalar>)
    "#};

    insta::assert_snapshot!(permute_descriptions(input, "f"), @"fn f(a: array<f32>)");
}

#[test]
fn identical_descriptions_are_emitted_once() {
    let perms = permute_ok("type f32 type i32 fn f<T>() -> f32", "f", 0);

    assert_eq!(perms.len(), 1);
    assert_eq!(perms[0].description, "fn f() -> f32");
}

#[test]
fn const_parameters_and_operators() {
    let perms = permute_ok("type f32 fn f(@const x: f32)", "f", 0);
    assert_eq!(perms[0].description, "fn f(const x: f32)");

    let perms = permute_ok("type f32 op + (f32, f32) -> f32", "+", 0);
    assert_eq!(perms[0].description, "op +(f32, f32) -> f32");
}

#[test]
fn parameter_without_legal_types() {
    insta::assert_snapshot!(
        permute_err("type bool type array<T> fn f(a: array<bool>)", "f"),
        @"origin:1:28 parameter 0 has no permutations"
    );
}

#[test]
fn template_type_without_legal_types() {
    insta::assert_snapshot!(
        permute_err("type _x match m: _x fn f<T: m>(T)", "f"),
        @"origin:1:24 template type 'T' has no permutations"
    );
}

#[test]
fn return_type_must_be_pinned() {
    insta::assert_snapshot!(
        permute_err("type f32 type i32 match fi: f32 | i32 fn f(x: fi) -> fi", "f"),
        @"origin:1:42 return type is not pinned"
    );
}

#[test]
fn permuting_twice_is_stable() {
    let input = format!("{POINTERS}fn load<S: address_space, A: access>(p: ptr<S, f32, A>) -> f32");
    let sem = resolve_ok(&input);
    let overload = sem.find_overload("load", 0).unwrap();
    let options = PermuteOptions::default();

    let first = permute(&sem, overload, &options).unwrap();
    let second = permute(&sem, overload, &options).unwrap();

    let key = |perms: &[super::Permutation]| -> Vec<(String, String)> {
        perms
            .iter()
            .map(|p| (p.description.clone(), p.hash.clone()))
            .collect()
    };
    assert_eq!(key(&first), key(&second));
}

#[test]
fn hash_is_truncated_sha256() {
    assert_eq!(
        hash("fn f(f32)", 64),
        "8d0f27194b2fc34e6e8ef1159f006306c0237f4fb385229945b3cdc845458f7d"
    );
    assert_eq!(hash("fn f(i32)", 6), "376be6");
}

#[test]
fn hash_collision_is_an_error() {
    let sem = resolve_ok("type f32 type i32 fn f<T>(T)");
    let overload = sem.find_overload("f", 0).unwrap();
    let options = PermuteOptions::new().with_hash_len(0);

    let err = permute(&sem, overload, &options).unwrap_err();

    insta::assert_snapshot!(err, @"origin:1:22 hash '' collides for 'fn f(f32)' and 'fn f(i32)', use a longer hash");
}

#[test]
fn serializes_description_and_hash_only() {
    let perms = permute_ok("type f32 @must_use fn f() -> f32", "f", 0);

    let json = serde_json::to_string(&perms[0]).unwrap();

    assert_eq!(json, r#"{"description":"fn f() -> f32","hash":"c65b6f"}"#);
}

#[test]
fn enum_values_in_template_number_slots() {
    let input = indoc! {r#"
    enum e { a, b, @internal _c }
    match m: e.a | e.b
    type A<N: num>
    fn f(x: A<m>, y: A<e>)
    "#};

    insta::assert_snapshot!(permute_descriptions(input, "f"), @r"
    fn f(x: A<a>, y: A<a>)
    fn f(x: A<a>, y: A<b>)
    fn f(x: A<b>, y: A<a>)
    fn f(x: A<b>, y: A<b>)
    ");
}

#[test]
fn template_enum_in_template_number_slot() {
    let input = indoc! {r#"
    enum e { a, b }
    type A<N: num>
    fn f<E: e>(A<E>)
    "#};

    insta::assert_snapshot!(permute_descriptions(input, "f"), @r"
    fn f(A<a>)
    fn f(A<b>)
    ");
}
