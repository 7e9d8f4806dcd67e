//! Attribute interpretation per declaration kind.

use intrindef_table::{OverloadKind, StageUses};

use crate::diagnostics::{ResolveError, SourceMap};
use crate::parser::ast::{Attribute, IntrinsicDecl, Literal};

type Result<T> = std::result::Result<T, ResolveError>;

fn error(map: &SourceMap, attr: &Attribute, message: impl Into<String>) -> ResolveError {
    ResolveError::new(map.location(attr.name.span), message)
}

fn unknown(map: &SourceMap, attr: &Attribute) -> ResolveError {
    error(map, attr, format!("unknown attribute '@{}'", attr.name()))
}

fn expect_no_values(map: &SourceMap, attr: &Attribute) -> Result<()> {
    if attr.values.is_empty() {
        Ok(())
    } else {
        Err(error(
            map,
            attr,
            format!("@{} does not accept any values", attr.name()),
        ))
    }
}

/// Declarations that accept no attributes at all: enums and matchers.
pub(super) fn none(map: &SourceMap, attributes: &[Attribute]) -> Result<()> {
    match attributes.first() {
        Some(attr) => Err(unknown(map, attr)),
        None => Ok(()),
    }
}

/// Enum entries: `@internal`.
pub(super) fn enum_entry(map: &SourceMap, attributes: &[Attribute]) -> Result<bool> {
    let mut is_internal = false;
    for attr in attributes {
        match attr.name() {
            "internal" => {
                expect_no_values(map, attr)?;
                is_internal = true;
            }
            _ => return Err(unknown(map, attr)),
        }
    }
    Ok(is_internal)
}

#[derive(Debug, Default)]
pub(super) struct TypeAttributes {
    pub display: Option<String>,
    pub precedence: i64,
}

/// Types: `@display("fmt")`, `@precedence(N)`.
pub(super) fn type_decl(map: &SourceMap, attributes: &[Attribute]) -> Result<TypeAttributes> {
    let mut out = TypeAttributes::default();
    for attr in attributes {
        match (attr.name(), attr.values.as_slice()) {
            ("display", [Literal::String(s)]) => out.display = Some(s.clone()),
            ("display", _) => {
                return Err(error(map, attr, "@display expects a single string value"));
            }
            ("precedence", [Literal::Int(n)]) => out.precedence = *n,
            ("precedence", _) => {
                return Err(error(
                    map,
                    attr,
                    "@precedence expects a single integer value",
                ));
            }
            _ => return Err(unknown(map, attr)),
        }
    }
    Ok(out)
}

#[derive(Debug)]
pub(super) struct IntrinsicAttributes<'a> {
    pub stages: StageUses,
    /// The `@must_use` attribute itself, kept for error positions.
    pub must_use: Option<&'a Attribute>,
    pub is_deprecated: bool,
    pub const_eval_fn: Option<String>,
}

/// Intrinsics: `@stage(...)`, `@must_use`, `@deprecated`, `@const`.
pub(super) fn intrinsic<'a>(
    map: &SourceMap,
    decl: &'a IntrinsicDecl,
) -> Result<IntrinsicAttributes<'a>> {
    let mut stages: Option<StageUses> = None;
    let mut out = IntrinsicAttributes {
        stages: StageUses::ALL,
        must_use: None,
        is_deprecated: false,
        const_eval_fn: None,
    };

    for attr in &decl.attributes {
        match attr.name() {
            "stage" => {
                if attr.values.is_empty() {
                    return Err(error(map, attr, "@stage expects at least one stage"));
                }
                let set = stages.get_or_insert(StageUses::NONE);
                for value in &attr.values {
                    match value {
                        Literal::String(s) if s == "vertex" => set.vertex = true,
                        Literal::String(s) if s == "fragment" => set.fragment = true,
                        Literal::String(s) if s == "compute" => set.compute = true,
                        Literal::String(s) => {
                            return Err(error(map, attr, format!("unknown stage '{s}'")));
                        }
                        other => {
                            return Err(error(map, attr, format!("unknown stage '{other}'")));
                        }
                    }
                }
            }
            "must_use" => {
                expect_no_values(map, attr)?;
                out.must_use = Some(attr);
            }
            "deprecated" => {
                expect_no_values(map, attr)?;
                out.is_deprecated = true;
            }
            "const" => {
                out.const_eval_fn = Some(match attr.values.as_slice() {
                    [] => default_const_eval_fn(decl),
                    [Literal::String(s)] => s.clone(),
                    [_] => return Err(error(map, attr, "@const value must be a string")),
                    _ => return Err(error(map, attr, "@const expects at most one value")),
                });
            }
            _ => return Err(unknown(map, attr)),
        }
    }

    if let Some(stages) = stages {
        out.stages = stages;
    }
    Ok(out)
}

fn default_const_eval_fn(decl: &IntrinsicDecl) -> String {
    match decl.kind {
        OverloadKind::Builtin | OverloadKind::Operator => decl.name.text.clone(),
        OverloadKind::Constructor => "Ctor".to_string(),
        OverloadKind::Converter => "Conv".to_string(),
    }
}

#[derive(Debug)]
pub(super) struct ParameterAttributes {
    pub is_const: bool,
    pub test_value: f64,
}

/// Parameters: `@const`, `@test_value(v)`.
pub(super) fn parameter(map: &SourceMap, attributes: &[Attribute]) -> Result<ParameterAttributes> {
    let mut out = ParameterAttributes {
        is_const: false,
        test_value: 1.0,
    };
    for attr in attributes {
        match (attr.name(), attr.values.as_slice()) {
            ("const", _) => {
                expect_no_values(map, attr)?;
                out.is_const = true;
            }
            ("test_value", [Literal::Int(n)]) => out.test_value = *n as f64,
            ("test_value", [Literal::Float(v)]) => out.test_value = *v,
            ("test_value", _) => {
                return Err(error(
                    map,
                    attr,
                    "@test_value expects a single numeric value",
                ));
            }
            _ => return Err(unknown(map, attr)),
        }
    }
    Ok(out)
}
