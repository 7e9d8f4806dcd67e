//! Matcher and template-parameter expansion of resolved names.

use std::collections::HashMap;

use super::{Result, cartesian};
use crate::diagnostics::GenerationError;
use crate::sem::{
    EnumEntryId, EnumMatcherId, FullyQualifiedName, Named, Sem, TemplateArg, TemplateParamId,
};

/// Concrete value of each template parameter bound so far.
pub(super) type Bindings = HashMap<TemplateParamId, TemplateArg>;

pub(super) struct Expander<'a> {
    sem: &'a Sem,
}

impl<'a> Expander<'a> {
    pub fn new(sem: &'a Sem) -> Self {
        Self { sem }
    }

    /// Expand a name that must denote types, e.g. a parameter type.
    pub fn expand_type(
        &self,
        fqn: &FullyQualifiedName,
        bindings: &Bindings,
    ) -> Result<Vec<FullyQualifiedName>> {
        self.expand(fqn, bindings)?
            .into_iter()
            .map(|arg| match arg {
                TemplateArg::Name(fqn) => Ok(fqn),
                TemplateArg::Number(n) => Err(GenerationError::new(format!(
                    "expected a type, got the number {n}"
                ))),
            })
            .collect()
    }

    /// Every concrete alternative of `fqn`, in surface order.
    pub fn expand(&self, fqn: &FullyQualifiedName, bindings: &Bindings) -> Result<Vec<TemplateArg>> {
        let sem = self.sem;
        let out = match fqn.target {
            Named::TemplateParam(param) => match bindings.get(&param) {
                Some(value) => vec![value.clone()],
                None => {
                    return Err(GenerationError::new(format!(
                        "template parameter '{}' is unbound",
                        sem[param].name
                    )));
                }
            },
            Named::TypeMatcher(matcher) => sem[matcher]
                .types
                .iter()
                .map(|&ty| entity(Named::Type(ty)))
                .collect(),
            Named::EnumMatcher(matcher) => self
                .enum_options(matcher)
                .map(|e| entity(Named::EnumEntry(e)))
                .collect(),
            Named::Enum(id) => sem[id]
                .entries
                .values()
                .copied()
                .filter(|&e| !sem[e].is_internal)
                .map(|e| entity(Named::EnumEntry(e)))
                .collect(),
            Named::EnumEntry(_) => vec![entity(fqn.target)],
            Named::Type(_) => {
                let mut lists = Vec::with_capacity(fqn.args.len());
                for arg in &fqn.args {
                    lists.push(match arg {
                        TemplateArg::Name(inner) => self.expand(inner, bindings)?,
                        TemplateArg::Number(n) => vec![TemplateArg::Number(*n)],
                    });
                }
                cartesian(&lists)
                    .into_iter()
                    .map(|args| TemplateArg::Name(FullyQualifiedName::with_args(fqn.target, args)))
                    .collect()
            }
        };
        Ok(out)
    }

    /// Options of an enum matcher that are not internal.
    pub fn enum_options(&self, matcher: EnumMatcherId) -> impl Iterator<Item = EnumEntryId> + '_ {
        self.sem[matcher]
            .options
            .iter()
            .copied()
            .filter(|&e| !self.sem[e].is_internal)
    }
}

fn entity(target: Named) -> TemplateArg {
    TemplateArg::Name(FullyQualifiedName::new(target))
}
