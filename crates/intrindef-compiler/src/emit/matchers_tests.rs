use indoc::indoc;

use super::Matchers;
use crate::sem::{EnumEntryId, Named, TypeId, TypeMatcherId};
use crate::test_utils::resolve_ok;

fn slots(matchers: &Matchers) -> String {
    let types = matchers.type_slots().iter().map(|s| s.to_string());
    let numbers = matchers.number_slots().iter().map(|s| s.to_string());
    format!(
        "types: {}\nnumbers: {}",
        types.collect::<Vec<_>>().join(", "),
        numbers.collect::<Vec<_>>().join(", ")
    )
}

#[test]
fn template_slots_come_first() {
    let input = indoc! {r#"
    enum access { read, write }
    type f32
    type i32
    match fi: f32 | i32
    match writable: access.write
    fn f<T: fi, U, A: access>(T, U)
    "#};

    let sem = resolve_ok(input);
    let matchers = Matchers::new(&sem);

    insta::assert_snapshot!(slots(&matchers), @r"
    types: <template 0>, <template 1>, type f32, type i32, match fi
    numbers: <template 0>, match writable, match access
    ");
}

#[test]
fn index_of_declared_entities() {
    let sem = resolve_ok("type f32 type i32 match fi: f32 | i32");
    let matchers = Matchers::new(&sem);

    assert_eq!(matchers.index_of(Named::Type(TypeId::from_raw(1))), Some(1));
    assert_eq!(
        matchers.index_of(Named::TypeMatcher(TypeMatcherId::from_raw(0))),
        Some(2)
    );
}

#[test]
fn enum_entries_have_no_slot() {
    let sem = resolve_ok("enum e { a }");
    let matchers = Matchers::new(&sem);

    assert_eq!(
        matchers.index_of(Named::EnumEntry(EnumEntryId::from_raw(0))),
        None
    );
    assert!(matchers.number_slots().is_empty());
}
