//! Row types of the intrinsic table.
//!
//! Rows that point into other arrays are generic over the offset type `O`:
//! the table builder fills them with [`LutKey`](crate::LutKey)s while
//! sequences are still being collected, and the finished table uses `u32`
//! offsets into the compacted arrays.

use std::fmt;

use serde::Serialize;

/// Index into the type-matcher or number-matcher array.
pub type MatcherIndex = u32;

/// The set of shader stages an overload may be called from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct StageUses {
    pub vertex: bool,
    pub fragment: bool,
    pub compute: bool,
}

impl StageUses {
    pub const ALL: StageUses = StageUses {
        vertex: true,
        fragment: true,
        compute: true,
    };

    pub const NONE: StageUses = StageUses {
        vertex: false,
        fragment: false,
        compute: false,
    };

    /// Names of the enabled stages, in pipeline order.
    pub fn list(self) -> Vec<&'static str> {
        [
            ("vertex", self.vertex),
            ("fragment", self.fragment),
            ("compute", self.compute),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }
}

impl Default for StageUses {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for StageUses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.list().join(", "))
    }
}

/// Which declaration keyword introduced an overload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum OverloadKind {
    Builtin,
    Operator,
    Constructor,
    Converter,
}

impl OverloadKind {
    /// The declaration keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Builtin => "fn",
            Self::Operator => "op",
            Self::Constructor => "ctor",
            Self::Converter => "conv",
        }
    }
}

impl fmt::Display for OverloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A slot in one of the matcher arrays.
///
/// The first slots of each array are reserved for the template parameters of
/// whichever overload is being matched; the rest name declared matchers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum MatcherSlot {
    /// Reserved for the overload's N-th template type or number.
    Template(u32),
    Type(String),
    TypeMatcher(String),
    EnumMatcher(String),
}

impl fmt::Display for MatcherSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(i) => write!(f, "<template {i}>"),
            Self::Type(name) => write!(f, "type {name}"),
            Self::TypeMatcher(name) => write!(f, "match {name}"),
            Self::EnumMatcher(name) => write!(f, "match {name}"),
        }
    }
}

/// A template type of an overload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TemplateTypeRow {
    pub name: String,
    /// Constraint matcher, `None` when unconstrained.
    pub matcher_index: Option<MatcherIndex>,
}

/// A template number (or enum) of an overload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TemplateNumberRow {
    pub name: String,
    pub matcher_index: Option<MatcherIndex>,
}

/// A parameter of an overload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterRow<O = u32> {
    /// Parameter usage name, if the declaration named it.
    pub usage: Option<String>,
    /// Start of the parameter type's matcher-index run.
    pub matcher_indices_offset: Option<O>,
}

/// One overload of an intrinsic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct OverloadRow<O = u32> {
    pub num_parameters: u32,
    pub num_template_types: u32,
    pub num_template_numbers: u32,
    pub template_types_offset: Option<O>,
    pub template_numbers_offset: Option<O>,
    pub parameters_offset: Option<O>,
    pub return_matcher_indices_offset: Option<O>,
    pub const_eval_function_offset: Option<O>,
    pub stages: StageUses,
    pub must_use: bool,
    pub is_deprecated: bool,
    pub kind: OverloadKind,
}

/// A named family of overloads occupying a contiguous run of the overload array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IntrinsicRow<O = u32> {
    pub name: String,
    /// Printed declaration of every overload, in declaration order.
    pub overload_descriptions: Vec<String>,
    pub num_overloads: u32,
    pub overloads_offset: Option<O>,
}

/// The flattened, deduplicated tables for every intrinsic.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IntrinsicTable {
    pub type_matchers: Vec<MatcherSlot>,
    pub number_matchers: Vec<MatcherSlot>,
    pub matcher_indices: Vec<MatcherIndex>,
    pub template_types: Vec<TemplateTypeRow>,
    pub template_numbers: Vec<TemplateNumberRow>,
    pub parameters: Vec<ParameterRow>,
    pub overloads: Vec<OverloadRow>,
    /// Indices into `const_eval_functions`.
    pub const_eval_function_indices: Vec<u32>,
    pub const_eval_functions: Vec<String>,
    pub builtins: Vec<IntrinsicRow>,
    pub unary_operators: Vec<IntrinsicRow>,
    pub binary_operators: Vec<IntrinsicRow>,
    pub constructors_and_converters: Vec<IntrinsicRow>,
}

impl IntrinsicTable {
    /// Overload rows of an intrinsic.
    pub fn overloads_of(&self, intrinsic: &IntrinsicRow) -> &[OverloadRow] {
        match intrinsic.overloads_offset {
            Some(offset) => {
                let start = offset as usize;
                &self.overloads[start..start + intrinsic.num_overloads as usize]
            }
            None => &[],
        }
    }

    /// Parameter rows of an overload.
    pub fn parameters_of(&self, overload: &OverloadRow) -> &[ParameterRow] {
        slice(
            &self.parameters,
            overload.parameters_offset,
            overload.num_parameters,
        )
    }

    pub fn template_types_of(&self, overload: &OverloadRow) -> &[TemplateTypeRow] {
        slice(
            &self.template_types,
            overload.template_types_offset,
            overload.num_template_types,
        )
    }

    pub fn template_numbers_of(&self, overload: &OverloadRow) -> &[TemplateNumberRow] {
        slice(
            &self.template_numbers,
            overload.template_numbers_offset,
            overload.num_template_numbers,
        )
    }

    /// Name of the compile-time evaluation function of an overload, if any.
    pub fn const_eval_function_of(&self, overload: &OverloadRow) -> Option<&str> {
        let offset = overload.const_eval_function_offset?;
        let index = *self.const_eval_function_indices.get(offset as usize)?;
        self.const_eval_functions
            .get(index as usize)
            .map(String::as_str)
    }

    /// Matcher indices starting at `offset`.
    ///
    /// Runs are not length-prefixed: the consumer walks a type's nesting to
    /// know how many indices belong to it. This returns everything from
    /// `offset` to the end of the array.
    pub fn matcher_indices_from(&self, offset: u32) -> &[MatcherIndex] {
        self.matcher_indices.get(offset as usize..).unwrap_or(&[])
    }

    /// All intrinsic rows grouped by family, in emission order.
    pub fn families(&self) -> [(&'static str, &[IntrinsicRow]); 4] {
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
}

fn slice<T>(items: &[T], offset: Option<u32>, count: u32) -> &[T] {
    match offset {
        Some(offset) => {
            let start = offset as usize;
            &items[start..start + count as usize]
        }
        None => &[],
    }
}
