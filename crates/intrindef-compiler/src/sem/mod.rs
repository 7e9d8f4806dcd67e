//! Semantic model produced by the resolver.
//!
//! Entities are arena-allocated in [`Sem`] and cross-referenced by handle.
//! Nothing here is mutated once [`resolve`](crate::analyze::resolve) returns.

mod fqn;
mod ids;

#[cfg(test)]
mod fqn_tests;

use std::ops::{Index, IndexMut};

use indexmap::IndexMap;
use intrindef_table::{OverloadKind, StageUses};

use crate::diagnostics::Location;

pub use fqn::{FqnDisplay, FullyQualifiedName, Named, TemplateArg};
pub use ids::{
    EnumEntryId, EnumId, EnumMatcherId, IntrinsicId, OverloadId, TemplateParamId, TypeId,
    TypeMatcherId,
};

/// Prefix of names that exist for the resolver but never reach user code.
pub const INTERNAL_PREFIX: char = '_';

#[derive(Clone, Debug)]
pub struct Enum {
    pub name: String,
    pub location: Location,
    /// Entries by name, in declaration order.
    pub entries: IndexMap<String, EnumEntryId>,
}

#[derive(Clone, Debug)]
pub struct EnumEntry {
    pub name: String,
    pub location: Location,
    pub owner: EnumId,
    /// Excluded from permutation.
    pub is_internal: bool,
}

#[derive(Clone, Debug)]
pub struct Type {
    pub name: String,
    pub location: Location,
    /// Pretty-printing template, the type name unless `@display` is given.
    pub display_name: String,
    pub precedence: i64,
    pub template_params: Vec<TemplateParamId>,
}

#[derive(Clone, Debug)]
pub struct TypeMatcher {
    pub name: String,
    pub location: Location,
    pub template_params: Vec<TemplateParamId>,
    pub types: Vec<TypeId>,
}

#[derive(Clone, Debug)]
pub struct EnumMatcher {
    pub name: String,
    pub location: Location,
    pub template_params: Vec<TemplateParamId>,
    pub owner: EnumId,
    pub options: Vec<EnumEntryId>,
}

#[derive(Clone, Debug)]
pub struct TemplateParam {
    pub name: String,
    pub location: Location,
    pub kind: TemplateParamKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TemplateParamKind {
    /// Ranges over a type or type matcher, or every plain type when unconstrained.
    Type {
        constraint: Option<FullyQualifiedName>,
    },
    /// Ranges over the options of `matcher`, which belongs to `owner`.
    Enum {
        owner: EnumId,
        matcher: EnumMatcherId,
    },
    /// Ranges over the configured template numbers.
    Number,
}

impl TemplateParamKind {
    /// Whether the param lands in an overload's template-number list.
    pub fn is_number_like(&self) -> bool {
        !matches!(self, Self::Type { .. })
    }
}

/// A named family of overloads.
#[derive(Clone, Debug)]
pub struct Intrinsic {
    pub name: String,
    pub overloads: Vec<OverloadId>,
}

#[derive(Clone, Debug)]
pub struct Overload {
    pub intrinsic: IntrinsicId,
    pub kind: OverloadKind,
    pub location: Location,
    /// Printed declaration.
    pub description: String,
    /// All template params in declaration order.
    pub template_params: Vec<TemplateParamId>,
    /// Template type params, in declaration order.
    pub template_types: Vec<TemplateParamId>,
    /// Template enum and number params, in declaration order.
    pub template_numbers: Vec<TemplateParamId>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<FullyQualifiedName>,
    pub stages: StageUses,
    pub must_use: bool,
    pub is_deprecated: bool,
    pub const_eval_fn: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: Option<String>,
    pub ty: FullyQualifiedName,
    pub is_const: bool,
    /// Argument value used by generated tests.
    pub test_value: f64,
}

/// The resolved declaration file.
#[derive(Clone, Debug, Default)]
pub struct Sem {
    pub enums: Vec<Enum>,
    pub enum_entries: Vec<EnumEntry>,
    pub types: Vec<Type>,
    pub type_matchers: Vec<TypeMatcher>,
    /// Declared matchers followed by synthetic ones created during resolution.
    pub enum_matchers: Vec<EnumMatcher>,
    pub template_params: Vec<TemplateParam>,
    pub intrinsics: Vec<Intrinsic>,
    pub overloads: Vec<Overload>,

    pub builtins: Vec<IntrinsicId>,
    pub unary_operators: Vec<IntrinsicId>,
    pub binary_operators: Vec<IntrinsicId>,
    pub constructors_and_converters: Vec<IntrinsicId>,

    /// Largest number of template types declared by one overload.
    pub max_template_types: usize,
    /// Largest number of template enums and numbers declared by one overload.
    pub max_template_numbers: usize,
    /// Distinct parameter names over all overloads, sorted.
    pub unique_parameter_names: Vec<String>,
}

impl Sem {
    pub fn name_of(&self, named: Named) -> &str {
        match named {
            Named::Enum(id) => &self[id].name,
            Named::EnumEntry(id) => &self[id].name,
            Named::Type(id) => &self[id].name,
            Named::TypeMatcher(id) => &self[id].name,
            Named::EnumMatcher(id) => &self[id].name,
            Named::TemplateParam(id) => &self[id].name,
        }
    }

    pub fn template_params_of(&self, named: Named) -> &[TemplateParamId] {
        match named {
            Named::Type(id) => &self[id].template_params,
            Named::TypeMatcher(id) => &self[id].template_params,
            Named::EnumMatcher(id) => &self[id].template_params,
            Named::Enum(_) | Named::EnumEntry(_) | Named::TemplateParam(_) => &[],
        }
    }

    /// Human-readable category and name, used in error messages.
    pub fn describe(&self, named: Named) -> String {
        match named {
            Named::Enum(id) => format!("enum '{}'", self[id].name),
            Named::EnumEntry(id) => {
                let entry = &self[id];
                format!("enum entry '{}.{}'", self[entry.owner].name, entry.name)
            }
            Named::Type(id) => format!("type '{}'", self[id].name),
            Named::TypeMatcher(id) => format!("type matcher '{}'", self[id].name),
            Named::EnumMatcher(id) => format!("enum matcher '{}'", self[id].name),
            Named::TemplateParam(id) => match &self[id].kind {
                TemplateParamKind::Type { .. } => "template type".to_string(),
                TemplateParamKind::Enum { owner, .. } => {
                    format!("template enum '{}'", self[*owner].name)
                }
                TemplateParamKind::Number => "template number".to_string(),
            },
        }
    }

    pub fn fqn<'a>(&'a self, fqn: &'a FullyQualifiedName) -> FqnDisplay<'a> {
        FqnDisplay { sem: self, fqn }
    }

    /// Every intrinsic family with its display title, in table order.
    pub fn families(&self) -> [(&'static str, &[IntrinsicId]); 4] {
        [
            ("builtins", self.builtins.as_slice()),
            ("unary operators", self.unary_operators.as_slice()),
            ("binary operators", self.binary_operators.as_slice()),
            (
                "constructors and converters",
                self.constructors_and_converters.as_slice(),
            ),
        ]
    }

    /// Looks an overload up by intrinsic name, `n` counting overloads in declaration order.
    pub fn find_overload(&self, intrinsic: &str, n: usize) -> Option<OverloadId> {
        self.intrinsics
            .iter()
            .filter(|i| i.name == intrinsic)
            .flat_map(|i| i.overloads.iter().copied())
            .nth(n)
    }
}

macro_rules! arena_index {
    ($($id:ty => $field:ident: $entity:ty),* $(,)?) => {
        $(
            impl Index<$id> for Sem {
                type Output = $entity;

                #[inline]
                fn index(&self, id: $id) -> &$entity {
                    &self.$field[id.index()]
                }
            }

            impl IndexMut<$id> for Sem {
                #[inline]
                fn index_mut(&mut self, id: $id) -> &mut $entity {
                    &mut self.$field[id.index()]
                }
            }
        )*
    };
}

arena_index! {
    EnumId => enums: Enum,
    EnumEntryId => enum_entries: EnumEntry,
    TypeId => types: Type,
    TypeMatcherId => type_matchers: TypeMatcher,
    EnumMatcherId => enum_matchers: EnumMatcher,
    TemplateParamId => template_params: TemplateParam,
    IntrinsicId => intrinsics: Intrinsic,
    OverloadId => overloads: Overload,
}
