use super::{FullyQualifiedName, Named, TemplateArg, TypeId};
use crate::test_utils::resolve_ok;

#[test]
fn display_nested_names() {
    let sem = resolve_ok(
        "enum access { read } type f32 type vec<N: num, T> type ptr<T, A: access> fn f(p: ptr<f32, read>)",
    );
    let f32 = FullyQualifiedName::new(Named::Type(TypeId::from_raw(0)));
    let vec3 = FullyQualifiedName::with_args(
        Named::Type(TypeId::from_raw(1)),
        vec![TemplateArg::Number(3), f32.clone().into()],
    );

    assert_eq!(sem.fqn(&f32).to_string(), "f32");
    assert_eq!(sem.fqn(&vec3).to_string(), "vec<3, f32>");

    let overload = &sem[sem.find_overload("f", 0).unwrap()];
    assert_eq!(sem.fqn(&overload.parameters[0].ty).to_string(), "ptr<f32, read>");
}

#[test]
fn name_args_skip_numbers() {
    let f32 = FullyQualifiedName::new(Named::Type(TypeId::from_raw(0)));
    let vec = FullyQualifiedName::with_args(
        Named::Type(TypeId::from_raw(1)),
        vec![TemplateArg::Number(2), f32.clone().into()],
    );

    let names: Vec<_> = vec.name_args().collect();

    assert_eq!(names, vec![&f32]);
}

#[test]
fn describe_entities() {
    let sem = resolve_ok("enum e { a } type t match m: t match n: e.a fn f<T, N: num, E: e>()");

    let overload = &sem[sem.find_overload("f", 0).unwrap()];
    let mut described: Vec<String> = vec![
        sem.describe(Named::Enum(super::EnumId::from_raw(0))),
        sem.describe(Named::EnumEntry(super::EnumEntryId::from_raw(0))),
        sem.describe(Named::Type(TypeId::from_raw(0))),
        sem.describe(Named::TypeMatcher(super::TypeMatcherId::from_raw(0))),
        sem.describe(Named::EnumMatcher(super::EnumMatcherId::from_raw(0))),
    ];
    described.extend(
        overload
            .template_params
            .iter()
            .map(|&p| sem.describe(Named::TemplateParam(p))),
    );

    insta::assert_snapshot!(described.join("\n"), @r"
    enum 'e'
    enum entry 'e.a'
    type 't'
    type matcher 'm'
    enum matcher 'n'
    template type
    template number
    template enum 'e'
    ");
}
