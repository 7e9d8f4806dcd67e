//! Name resolution and structural checks.
//!
//! Turns an [`Ast`] into a cross-referenced [`Sem`]. The first violation
//! aborts resolution; no partial model is returned.

mod attributes;
mod resolver;
mod scope;

#[cfg(test)]
mod resolver_tests;

use crate::diagnostics::ResolveError;
use crate::parser::Ast;
use crate::sem::Sem;

pub fn resolve(ast: &Ast) -> Result<Sem, ResolveError> {
    let sem = resolver::Resolver::new(ast).run()?;
    tracing::debug!(
        enums = sem.enums.len(),
        types = sem.types.len(),
        type_matchers = sem.type_matchers.len(),
        enum_matchers = sem.enum_matchers.len(),
        intrinsics = sem.intrinsics.len(),
        overloads = sem.overloads.len(),
        max_template_types = sem.max_template_types,
        max_template_numbers = sem.max_template_numbers,
        "resolved declarations"
    );
    Ok(sem)
}
