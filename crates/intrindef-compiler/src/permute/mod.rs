//! Expansion of templated overloads into concrete ones.
//!
//! A [`Permutation`] is one substitution of every template parameter and
//! every matcher in an overload's signature by a concrete alternative.
//! Expansion is a nested cartesian product:
//! - Template parameters, in declaration order, are the outermost loops
//! - Then each parameter type, in order
//! - Within a templated name, earlier arguments vary slower than later ones
//!
//! Combinations that break a legality rule (see [`validate`]) are dropped
//! silently. A slot left with no legal alternative at all is an error.

mod expand;
mod validate;

#[cfg(test)]
mod permute_tests;
#[cfg(test)]
mod validate_tests;

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt::Write as _;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::diagnostics::GenerationError;
use crate::sem::{
    FullyQualifiedName, Named, Overload, OverloadId, Parameter, Sem, TemplateArg,
    TemplateParamId, TemplateParamKind, TypeId,
};

pub use validate::{is_storable, validate};

use expand::{Bindings, Expander};

type Result<T> = std::result::Result<T, GenerationError>;

/// Settings for [`permute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermuteOptions {
    /// Values a `num` template parameter ranges over.
    pub template_numbers: Vec<u32>,
    /// Hex characters kept from each description hash.
    pub hash_len: usize,
}

impl Default for PermuteOptions {
    fn default() -> Self {
        Self {
            template_numbers: vec![2, 3, 4],
            hash_len: 6,
        }
    }
}

impl PermuteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template_numbers(mut self, numbers: impl Into<Vec<u32>>) -> Self {
        self.template_numbers = numbers.into();
        self
    }

    pub fn with_hash_len(mut self, len: usize) -> Self {
        self.hash_len = len;
        self
    }
}

/// One concrete instantiation of an overload.
#[derive(Clone, Debug, Serialize)]
pub struct Permutation {
    /// The overload with every template parameter substituted. Its template
    /// parameter lists are empty and its stages may be narrowed.
    #[serde(skip)]
    pub overload: Overload,
    /// Substituted value of each template parameter, in declaration order.
    #[serde(skip)]
    pub template_args: Vec<TemplateArg>,
    /// `<kw> <name>(<params>) -> <ret>`
    pub description: String,
    /// Truncated lowercase hex SHA-256 of `description`.
    pub hash: String,
}

/// Enumerate every concrete instantiation of `overload`.
///
/// The result only depends on the arguments, so callers may cache it.
pub fn permute(
    sem: &Sem,
    overload: OverloadId,
    options: &PermuteOptions,
) -> Result<Vec<Permutation>> {
    let perms = Permuter::new(sem, options).permute(overload)?;
    tracing::trace!(
        intrinsic = %sem[sem[overload].intrinsic].name,
        overload = overload.as_u32(),
        permutations = perms.len(),
        "permuted overload"
    );
    Ok(perms)
}

struct Permuter<'a> {
    sem: &'a Sem,
    options: &'a PermuteOptions,
    expander: Expander<'a>,
}

impl<'a> Permuter<'a> {
    fn new(sem: &'a Sem, options: &'a PermuteOptions) -> Self {
        Self {
            sem,
            options,
            expander: Expander::new(sem),
        }
    }

    fn permute(&self, id: OverloadId) -> Result<Vec<Permutation>> {
        let overload = &self.sem[id];
        let mut out = Vec::new();
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut descriptions: HashSet<String> = HashSet::new();
        let mut param_hits = vec![false; overload.parameters.len()];

        for bindings in self.bind_template_params(overload)? {
            let mut choices: Vec<Vec<FullyQualifiedName>> =
                Vec::with_capacity(overload.parameters.len());
            for (i, param) in overload.parameters.iter().enumerate() {
                let legal: Vec<FullyQualifiedName> = self
                    .expander
                    .expand_type(&param.ty, &bindings)?
                    .into_iter()
                    .filter(|fqn| validate(self.sem, fqn).is_some())
                    .collect();
                param_hits[i] |= !legal.is_empty();
                choices.push(legal);
            }

            let return_type = match &overload.return_type {
                Some(ret) => Some(self.pinned_return_type(overload, ret, &bindings)?),
                None => None,
            };

            for combo in cartesian(&choices) {
                let perm = self.concretize(overload, &bindings, combo, return_type.clone());
                if !descriptions.insert(perm.description.clone()) {
                    continue;
                }
                if let Some(other) = seen.insert(perm.hash.clone(), perm.description.clone()) {
                    return Err(collision(overload, &other, &perm));
                }
                out.push(perm);
            }
        }

        if let Some(i) = param_hits.iter().position(|hit| !hit) {
            return Err(GenerationError::at(
                overload.location.clone(),
                format!("parameter {i} has no permutations"),
            ));
        }
        Ok(out)
    }

    /// Every assignment of the overload's template parameters, lexicographic
    /// in declaration order.
    fn bind_template_params(&self, overload: &Overload) -> Result<Vec<Bindings>> {
        let mut states = vec![Bindings::new()];
        for &param in &overload.template_params {
            let mut next = Vec::new();
            for state in &states {
                let values = self.template_param_values(param, state)?;
                if values.is_empty() {
                    return Err(GenerationError::at(
                        overload.location.clone(),
                        format!(
                            "template {} '{}' has no permutations",
                            self.param_category(param),
                            self.sem[param].name
                        ),
                    ));
                }
                for value in values {
                    let mut bound = state.clone();
                    bound.insert(param, value);
                    next.push(bound);
                }
            }
            states = next;
        }
        Ok(states)
    }

    fn template_param_values(
        &self,
        param: TemplateParamId,
        bindings: &Bindings,
    ) -> Result<Vec<TemplateArg>> {
        let values = match &self.sem[param].kind {
            TemplateParamKind::Type { constraint: None } => self
                .plain_types()
                .map(|ty| FullyQualifiedName::new(Named::Type(ty)))
                .filter(|fqn| validate(self.sem, fqn).is_some())
                .map(TemplateArg::Name)
                .collect(),
            TemplateParamKind::Type {
                constraint: Some(constraint),
            } => self
                .expander
                .expand_type(constraint, bindings)?
                .into_iter()
                .filter(|fqn| validate(self.sem, fqn).is_some())
                .map(TemplateArg::Name)
                .collect(),
            TemplateParamKind::Enum { matcher, .. } => self
                .expander
                .enum_options(*matcher)
                .map(|e| TemplateArg::Name(FullyQualifiedName::new(Named::EnumEntry(e))))
                .collect(),
            TemplateParamKind::Number => self
                .options
                .template_numbers
                .iter()
                .map(|&n| TemplateArg::Number(n))
                .collect(),
        };
        Ok(values)
    }

    /// Types an unconstrained template type ranges over: every declared type
    /// without template parameters, in declaration order.
    fn plain_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.sem
            .types
            .iter()
            .enumerate()
            .filter(|(_, ty)| ty.template_params.is_empty())
            .map(|(i, _)| TypeId::from_raw(i as u32))
    }

    fn param_category(&self, param: TemplateParamId) -> &'static str {
        match self.sem[param].kind {
            TemplateParamKind::Type { .. } => "type",
            TemplateParamKind::Enum { .. } => "enum",
            TemplateParamKind::Number => "number",
        }
    }

    fn pinned_return_type(
        &self,
        overload: &Overload,
        ret: &FullyQualifiedName,
        bindings: &Bindings,
    ) -> Result<FullyQualifiedName> {
        let mut expanded = self.expander.expand_type(ret, bindings)?;
        if expanded.len() != 1 {
            return Err(GenerationError::at(
                overload.location.clone(),
                "return type is not pinned",
            ));
        }
        Ok(expanded.remove(0))
    }

    fn concretize(
        &self,
        overload: &Overload,
        bindings: &Bindings,
        types: Vec<FullyQualifiedName>,
        return_type: Option<FullyQualifiedName>,
    ) -> Permutation {
        let mut stages = overload.stages;
        let mut parameters = Vec::with_capacity(types.len());
        for (param, ty) in overload.parameters.iter().zip(types) {
            if let Some(narrowed) = validate(self.sem, &ty) {
                stages.vertex &= narrowed.vertex;
                stages.fragment &= narrowed.fragment;
                stages.compute &= narrowed.compute;
            }
            parameters.push(Parameter {
                ty,
                ..param.clone()
            });
        }

        let template_args = overload
            .template_params
            .iter()
            .filter_map(|p| bindings.get(p).cloned())
            .collect();

        let concrete = Overload {
            template_params: Vec::new(),
            template_types: Vec::new(),
            template_numbers: Vec::new(),
            parameters,
            return_type,
            stages,
            ..overload.clone()
        };
        let description = self.describe(&concrete);
        let hash = hash(&description, self.options.hash_len);
        Permutation {
            overload: concrete,
            template_args,
            description,
            hash,
        }
    }

    /// `<kw> <name>(<params>) -> <ret>`, params as `[const ][name: ]<type>`.
    fn describe(&self, overload: &Overload) -> String {
        let sem = self.sem;
        let mut out = format!(
            "{} {}(",
            overload.kind.keyword(),
            sem[overload.intrinsic].name
        );
        for (i, param) in overload.parameters.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if param.is_const {
                out.push_str("const ");
            }
            if let Some(name) = &param.name {
                write!(out, "{name}: ").unwrap();
            }
            write!(out, "{}", sem.fqn(&param.ty)).unwrap();
        }
        out.push(')');
        if let Some(ret) = &overload.return_type {
            write!(out, " -> {}", sem.fqn(ret)).unwrap();
        }
        out
    }
}

/// Truncated lowercase hex SHA-256 of `description`.
pub fn hash(description: &str, len: usize) -> String {
    let digest = Sha256::digest(description.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        write!(hex, "{byte:02x}").unwrap();
    }
    hex.truncate(len);
    hex
}

pub(crate) fn collision(overload: &Overload, a: &str, b: &Permutation) -> GenerationError {
    GenerationError::at(
        overload.location.clone(),
        format!(
            "hash '{}' collides for '{a}' and '{}', use a longer hash",
            b.hash, b.description
        ),
    )
}

/// Cartesian product, earlier lists varying slowest.
pub(crate) fn cartesian<T: Clone>(lists: &[Vec<T>]) -> Vec<Vec<T>> {
    let mut out: Vec<Vec<T>> = vec![Vec::new()];
    for list in lists {
        let mut next = Vec::with_capacity(out.len() * list.len());
        for prefix in &out {
            for item in list {
                let mut combo = prefix.clone();
                combo.push(item.clone());
                next.push(combo);
            }
        }
        out = next;
    }
    out
}
