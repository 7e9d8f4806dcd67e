use super::dump::dump;
use super::rows::*;

fn abs_table() -> IntrinsicTable {
    IntrinsicTable {
        type_matchers: vec![
            MatcherSlot::Template(0),
            MatcherSlot::Type("f32".into()),
            MatcherSlot::TypeMatcher("fiu32".into()),
        ],
        number_matchers: vec![
            MatcherSlot::Template(0),
            MatcherSlot::EnumMatcher("read_write".into()),
        ],
        matcher_indices: vec![0, 1],
        template_types: vec![TemplateTypeRow {
            name: "T".into(),
            matcher_index: Some(2),
        }],
        template_numbers: vec![],
        parameters: vec![ParameterRow {
            usage: Some("x".into()),
            matcher_indices_offset: Some(0),
        }],
        overloads: vec![OverloadRow {
            num_parameters: 1,
            num_template_types: 1,
            num_template_numbers: 0,
            template_types_offset: Some(0),
            template_numbers_offset: None,
            parameters_offset: Some(0),
            return_matcher_indices_offset: Some(0),
            const_eval_function_offset: Some(0),
            stages: StageUses::ALL,
            must_use: true,
            is_deprecated: false,
            kind: OverloadKind::Builtin,
        }],
        const_eval_function_indices: vec![0],
        const_eval_functions: vec!["abs".into()],
        builtins: vec![IntrinsicRow {
            name: "abs".into(),
            overload_descriptions: vec!["fn abs<T: fiu32>(x: T) -> T".into()],
            num_overloads: 1,
            overloads_offset: Some(0),
        }],
        ..Default::default()
    }
}

#[test]
fn dump_empty_table() {
    let table = IntrinsicTable::default();

    insta::assert_snapshot!(dump(&table), @r"
    [type_matchers]

    [number_matchers]

    [matcher_indices]

    [template_types]

    [template_numbers]

    [parameters]

    [overloads]

    [const_eval]

    [builtins]

    [unary_operators]

    [binary_operators]

    [constructors_and_converters]
    ");
}

#[test]
fn dump_single_builtin() {
    insta::assert_snapshot!(dump(&abs_table()), @r"
    [type_matchers]
    T0 = <template 0>
    T1 = type f32
    T2 = match fiu32

    [number_matchers]
    N0 = <template 0>
    N1 = match read_write

    [matcher_indices]
    M0 = 0
    M1 = 1

    [template_types]
    TT0 = T  ; T2

    [template_numbers]

    [parameters]
    P0 = x @ M0

    [overloads]
    O0 = fn   P0:1 TT0:1 TN-:0 -> M0 C0  ; vertex, fragment, compute must_use

    [const_eval]
    C0 = 0  ; abs

    [builtins]
    abs O0:1
      ; fn abs<T: fiu32>(x: T) -> T

    [unary_operators]

    [binary_operators]

    [constructors_and_converters]
    ");
}

#[test]
fn indices_are_padded_to_the_widest() {
    let table = IntrinsicTable {
        matcher_indices: (0..11).collect(),
        ..Default::default()
    };

    let out = dump(&table);

    assert!(out.contains("M00 = 0\n"));
    assert!(out.contains("M10 = 10\n"));
}

#[test]
fn table_accessors_follow_offsets() {
    let table = abs_table();
    let abs = &table.builtins[0];

    let overloads = table.overloads_of(abs);
    assert_eq!(overloads.len(), 1);

    let overload = &overloads[0];
    assert_eq!(table.parameters_of(overload)[0].usage.as_deref(), Some("x"));
    assert_eq!(table.template_types_of(overload)[0].name, "T");
    assert!(table.template_numbers_of(overload).is_empty());
    assert_eq!(table.const_eval_function_of(overload), Some("abs"));
    assert_eq!(table.matcher_indices_from(1), &[1]);
    assert!(table.matcher_indices_from(5).is_empty());
}

#[test]
fn stage_uses_display() {
    assert_eq!(StageUses::ALL.to_string(), "vertex, fragment, compute");
    assert_eq!(StageUses::NONE.to_string(), "");
    let compute_only = StageUses {
        vertex: false,
        fragment: false,
        compute: true,
    };
    assert_eq!(compute_only.list(), vec!["compute"]);
}
