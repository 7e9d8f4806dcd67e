use indoc::indoc;

use crate::sem::{Named, TemplateArg, TemplateParamKind};
use crate::test_utils::{resolve_err, resolve_ok};

#[test]
fn must_use_function_with_return_type() {
    let sem = resolve_ok("type f32 @must_use fn f() -> f32");

    assert_eq!(sem.builtins.len(), 1);
    let intrinsic = &sem[sem.builtins[0]];
    assert_eq!(intrinsic.name, "f");
    assert_eq!(intrinsic.overloads.len(), 1);

    let overload = &sem[intrinsic.overloads[0]];
    assert!(overload.must_use);
    let ret = overload.return_type.as_ref().unwrap();
    assert_eq!(sem.describe(ret.target), "type 'f32'");
}

#[test]
fn must_use_without_return_type() {
    insta::assert_snapshot!(
        resolve_err("@must_use fn f()"),
        @"origin:1:2 @must_use can only be used on a function with a return type"
    );
}

#[test]
fn duplicate_type() {
    insta::assert_snapshot!(resolve_err("type X type X"), @r"
    origin:1:13 'X' already declared
    First declared here: origin:1:6
    ");
}

#[test]
fn duplicate_across_kinds() {
    insta::assert_snapshot!(resolve_err("enum e { a } match e: a"), @r"
    origin:1:20 'e' already declared
    First declared here: origin:1:6
    ");
}

#[test]
fn duplicate_enum_entry() {
    insta::assert_snapshot!(resolve_err("enum e { a, a }"), @r"
    origin:1:13 duplicate enum entry 'a'
    First declared here: origin:1:10
    ");
}

#[test]
fn duplicate_template_parameter() {
    insta::assert_snapshot!(resolve_err("fn f<T, T>()"), @r"
    origin:1:9 'T' already declared
    First declared here: origin:1:6
    ");
}

#[test]
fn enum_matcher_option_must_exist() {
    insta::assert_snapshot!(
        resolve_err("enum e { a } match m: e.a | e.b"),
        @"origin:1:31 enum 'e' does not contain 'b'"
    );
}

#[test]
fn enum_matcher_options_share_one_enum() {
    insta::assert_snapshot!(
        resolve_err("enum e { a } enum f { b } match m: e.a | f.b"),
        @"origin:1:42 mismatched enums 'e' and 'f' in matcher"
    );
}

#[test]
fn enum_matcher_owner_must_be_an_enum() {
    insta::assert_snapshot!(
        resolve_err("type t match m: t.a"),
        @"origin:1:17 cannot use type 't' as enum matcher option"
    );
    insta::assert_snapshot!(
        resolve_err("match m: e.a"),
        @"origin:1:10 cannot resolve 'e'"
    );
}

#[test]
fn duplicate_matcher_options() {
    insta::assert_snapshot!(
        resolve_err("type f32 match m: f32 | f32"),
        @"origin:1:25 duplicate option 'f32' in matcher"
    );
    insta::assert_snapshot!(
        resolve_err("enum e { a } match m: e.a | e.a"),
        @"origin:1:31 duplicate option 'e.a' in matcher"
    );
}

#[test]
fn type_matcher_options_must_be_types() {
    insta::assert_snapshot!(
        resolve_err("type f32 match fs: f32 match m: fs"),
        @"origin:1:33 cannot use type matcher 'fs' as type matcher option"
    );
}

#[test]
fn type_matcher_options_take_no_template_arguments() {
    insta::assert_snapshot!(
        resolve_err("type f32 type box<T> match m: box<f32>"),
        @"origin:1:31 type matcher option 'box<f32>' cannot take template arguments"
    );
}

#[test]
fn unresolved_name() {
    insta::assert_snapshot!(resolve_err("fn f(x: T)"), @"origin:1:9 cannot resolve 'T'");
}

#[test]
fn type_used_as_template_number() {
    insta::assert_snapshot!(
        resolve_err("type A<N: num> type B fn f(A<B>)"),
        @"origin:1:30 cannot use type 'B' as template number"
    );
}

#[test]
fn enum_values_fill_template_numbers() {
    let input = indoc! {r#"
    enum e { a, b }
    match m: e.a | e.b
    type A<N: num>
    fn f(A<a>)
    fn g(A<m>)
    fn h<E: e>(A<E>)
    fn k(A<e>)
    fn n<N: num>(A<N>)
    "#};

    let sem = resolve_ok(input);

    let types: Vec<String> = ["f", "g", "h", "k", "n"]
        .iter()
        .map(|name| {
            let overload = &sem[sem.find_overload(name, 0).unwrap()];
            sem.fqn(&overload.parameters[0].ty).to_string()
        })
        .collect();
    assert_eq!(types, vec!["A<a>", "A<m>", "A<E>", "A<e>", "A<N>"]);

    let k = &sem[sem.find_overload("k", 0).unwrap()];
    let TemplateArg::Name(arg) = &k.parameters[0].ty.args[0] else {
        panic!("expected a name argument");
    };
    assert!(matches!(arg.target, Named::EnumMatcher(_)));
}

#[test]
fn template_argument_categories() {
    insta::assert_snapshot!(
        resolve_err("enum e { a } type A<T> fn f(A<a>)"),
        @"origin:1:31 cannot use enum entry 'e.a' as template type"
    );
    insta::assert_snapshot!(
        resolve_err("enum e { a } enum g { b } type A<E: e> fn f(A<b>)"),
        @"origin:1:47 cannot use enum entry 'g.b' as template enum 'e'"
    );
    insta::assert_snapshot!(
        resolve_err("type f32 type A<N: num> fn f<T>(A<T>)"),
        @"origin:1:35 cannot use template type as template number"
    );
}

#[test]
fn template_argument_count() {
    insta::assert_snapshot!(
        resolve_err("type f32 type vec<N: num, T> fn f(vec<f32>)"),
        @"origin:1:35 'vec' requires 2 template arguments, but 1 were provided"
    );
    insta::assert_snapshot!(
        resolve_err("type f32 fn f(f32<f32>)"),
        @"origin:1:15 'f32' requires 0 template arguments, but 1 were provided"
    );
}

#[test]
fn template_parameters_take_no_arguments() {
    insta::assert_snapshot!(
        resolve_err("fn f<T>(T<T>)"),
        @"origin:1:9 'T' is a template parameter and does not accept template arguments"
    );
}

#[test]
fn invalid_template_parameter_constraint() {
    insta::assert_snapshot!(
        resolve_err("fn f<T, U: T>()"),
        @"origin:1:12 invalid template parameter type template type"
    );
}

#[test]
fn value_types_must_be_types() {
    insta::assert_snapshot!(
        resolve_err("enum e { a } fn f(e)"),
        @"origin:1:19 cannot use enum 'e' as parameter type"
    );
    insta::assert_snapshot!(
        resolve_err("enum e { a } fn f() -> a"),
        @"origin:1:24 cannot use enum entry 'e.a' as return type"
    );
    insta::assert_snapshot!(
        resolve_err("enum e { a } fn f<N: num>(N)"),
        @"origin:1:27 cannot use template number as parameter type"
    );
}

#[test]
fn operator_and_converter_arity() {
    insta::assert_snapshot!(
        resolve_err("type f32 op + (f32, f32, f32)"),
        @"origin:1:13 operators must have either 1 or 2 parameters"
    );
    insta::assert_snapshot!(
        resolve_err("type f32 conv f32(f32, f32)"),
        @"origin:1:15 converters must have exactly 1 parameter"
    );
}

#[test]
fn forward_references() {
    let sem = resolve_ok("fn f(x: late) -> fs match fs: late type late");

    let overload = &sem[sem.find_overload("f", 0).unwrap()];
    assert_eq!(sem.fqn(&overload.parameters[0].ty).to_string(), "late");
    assert_eq!(sem.type_matchers[0].types.len(), 1);
}

#[test]
fn template_parameters_shadow_globals() {
    let sem = resolve_ok("type T fn f<T>(T)");

    let overload = &sem[sem.find_overload("f", 0).unwrap()];
    let Named::TemplateParam(param) = overload.parameters[0].ty.target else {
        panic!("expected the template parameter");
    };
    assert_eq!(
        sem[param].kind,
        TemplateParamKind::Type { constraint: None }
    );
}

#[test]
fn template_parameter_kinds() {
    let input = indoc! {r#"
    enum access { read, write }
    type f32
    match rw: access.read | access.write
    fn f<T: f32, N: num, A: access, B: rw, C: read>()
    "#};

    let sem = resolve_ok(input);
    let overload = &sem[sem.find_overload("f", 0).unwrap()];

    let kinds: Vec<String> = overload
        .template_params
        .iter()
        .map(|&p| format!("{}: {}", sem[p].name, sem.describe(Named::TemplateParam(p))))
        .collect();
    insta::assert_snapshot!(kinds.join("\n"), @r"
    T: template type
    N: template number
    A: template enum 'access'
    B: template enum 'access'
    C: template enum 'access'
    ");
    assert_eq!(overload.template_types.len(), 1);
    assert_eq!(overload.template_numbers.len(), 4);
}

#[test]
fn enum_entries_become_single_option_matchers() {
    let sem = resolve_ok("enum e { a, b } type t<E: e> fn f(t<a>) fn g(t<a>)");

    let names: Vec<&str> = sem.enum_matchers.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["e", "a"]);
    assert_eq!(sem.enum_matchers[1].options.len(), 1);

    let overload = &sem[sem.find_overload("g", 0).unwrap()];
    assert_eq!(sem.fqn(&overload.parameters[0].ty).to_string(), "t<a>");
}

#[test]
fn overloads_group_by_family_and_name() {
    let input = indoc! {r#"
    type f32
    fn f(f32)
    op - (f32) -> f32
    op - (f32, f32) -> f32
    ctor f32() -> f32
    conv f32(f32) -> f32
    fn f(f32, f32)
    "#};

    let sem = resolve_ok(input);

    let families: Vec<String> = sem
        .families()
        .iter()
        .map(|(title, ids)| {
            let entries: Vec<String> = ids
                .iter()
                .map(|&id| format!("{} x{}", sem[id].name, sem[id].overloads.len()))
                .collect();
            format!("{title}: {}", entries.join(", "))
        })
        .collect();
    insta::assert_snapshot!(families.join("\n"), @r"
    builtins: f x2
    unary operators: - x1
    binary operators: - x1
    constructors and converters: f32 x2
    ");
}

#[test]
fn template_maxima_and_parameter_names() {
    let input = indoc! {r#"
    enum access { read }
    type f32
    type vec<N: num, T>
    fn a<T, U>(x: T, y: U)
    fn b<N: num, A: access, T>(v: vec<N, T>, x: T)
    fn c(f32)
    "#};

    let sem = resolve_ok(input);

    assert_eq!(sem.max_template_types, 2);
    assert_eq!(sem.max_template_numbers, 2);
    assert_eq!(sem.unique_parameter_names, vec!["v", "x", "y"]);
}

#[test]
fn overload_description_is_the_printed_declaration() {
    let sem = resolve_ok(r#"type f32 @stage("compute") fn f(@const x: f32) -> f32"#);

    let overload = &sem[sem.find_overload("f", 0).unwrap()];

    insta::assert_snapshot!(overload.description, @r#"@stage("compute") fn f(@const x: f32) -> f32"#);
    assert_eq!(overload.location.to_string(), "origin:1:31");
}
