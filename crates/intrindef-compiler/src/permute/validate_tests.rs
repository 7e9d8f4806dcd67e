use indoc::indoc;

use super::{is_storable, validate};
use crate::sem::{EnumEntryId, FullyQualifiedName, Named, Sem, TemplateArg, TypeId};
use crate::test_utils::resolve_ok;

const UNIVERSE: &str = indoc! {r#"
enum address_space { function, private, workgroup, uniform, storage, handle }
enum access { read, write, read_write }
type bool
type f32
type fa
type sampler
type texture_2d<T>
type vec<N: num, T>
type array<T>
type ptr<S: address_space, T, A: access>
type _internal
"#};

fn ty(sem: &Sem, name: &str) -> FullyQualifiedName {
    let index = sem.types.iter().position(|t| t.name == name).unwrap();
    FullyQualifiedName::new(Named::Type(TypeId::from_raw(index as u32)))
}

fn entry(sem: &Sem, name: &str) -> FullyQualifiedName {
    let index = sem.enum_entries.iter().position(|e| e.name == name).unwrap();
    FullyQualifiedName::new(Named::EnumEntry(EnumEntryId::from_raw(index as u32)))
}

fn templated(sem: &Sem, name: &str, args: Vec<TemplateArg>) -> FullyQualifiedName {
    FullyQualifiedName::with_args(ty(sem, name).target, args)
}

fn ptr(sem: &Sem, space: &str, element: FullyQualifiedName, access: &str) -> FullyQualifiedName {
    templated(
        sem,
        "ptr",
        vec![entry(sem, space).into(), element.into(), entry(sem, access).into()],
    )
}

#[test]
fn pointer_legality_table() {
    let sem = resolve_ok(UNIVERSE);
    let spaces = ["function", "private", "workgroup", "uniform", "storage", "handle"];
    let accesses = ["read", "write", "read_write"];

    let mut lines = Vec::new();
    for space in spaces {
        let legal: Vec<&str> = accesses
            .into_iter()
            .filter(|access| validate(&sem, &ptr(&sem, space, ty(&sem, "f32"), access)).is_some())
            .collect();
        lines.push(format!("{space}: {}", legal.join(", ")));
    }

    insta::assert_snapshot!(lines.join("\n"), @r"
    function: read_write
    private: read_write
    workgroup: read_write
    uniform: read
    storage: read, read_write
    handle: read
    ");
}

#[test]
fn workgroup_pointer_is_compute_only() {
    let sem = resolve_ok(UNIVERSE);

    let stages = validate(&sem, &ptr(&sem, "workgroup", ty(&sem, "f32"), "read_write")).unwrap();
    assert_eq!(stages.to_string(), "compute");

    let stages = validate(&sem, &ptr(&sem, "storage", ty(&sem, "f32"), "read_write")).unwrap();
    assert_eq!(stages.to_string(), "vertex, fragment, compute");
}

#[test]
fn workgroup_pointer_needs_storable_element() {
    let sem = resolve_ok(UNIVERSE);

    let fits = |element: FullyQualifiedName| {
        validate(&sem, &ptr(&sem, "workgroup", element, "read_write")).is_some()
    };

    assert!(!fits(ty(&sem, "bool")));
    assert!(!fits(ty(&sem, "sampler")));
    assert!(fits(ty(&sem, "f32")));
    // Other address spaces take any element.
    assert!(validate(&sem, &ptr(&sem, "function", ty(&sem, "bool"), "read_write")).is_some());
}

#[test]
fn storable_types() {
    let sem = resolve_ok(UNIVERSE);
    let vec3 = |element: &str| {
        templated(
            &sem,
            "vec",
            vec![TemplateArg::Number(3), ty(&sem, element).into()],
        )
    };

    assert!(is_storable(&sem, &ty(&sem, "f32")));
    assert!(is_storable(&sem, &vec3("f32")));
    assert!(!is_storable(&sem, &ty(&sem, "bool")));
    assert!(!is_storable(&sem, &ty(&sem, "sampler")));
    assert!(!is_storable(
        &sem,
        &templated(&sem, "texture_2d", vec![ty(&sem, "f32").into()])
    ));
    assert!(!is_storable(&sem, &ty(&sem, "fa")));
    assert!(!is_storable(&sem, &vec3("fa")));
}

#[test]
fn arrays_reject_unstorable_elements() {
    let sem = resolve_ok(UNIVERSE);
    let array = |element: FullyQualifiedName| templated(&sem, "array", vec![element.into()]);

    assert!(validate(&sem, &array(ty(&sem, "f32"))).is_some());
    assert!(validate(&sem, &array(ty(&sem, "bool"))).is_none());
    assert!(validate(&sem, &array(ty(&sem, "fa"))).is_none());
}

#[test]
fn internal_names_are_rejected_at_any_depth() {
    let sem = resolve_ok(UNIVERSE);

    assert!(validate(&sem, &ty(&sem, "_internal")).is_none());
    let nested = templated(
        &sem,
        "vec",
        vec![TemplateArg::Number(2), ty(&sem, "_internal").into()],
    );
    assert!(validate(&sem, &nested).is_none());
}
