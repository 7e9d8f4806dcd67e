//! Lexical scopes for name binding.
//!
//! The global scope holds enums, enum entries, types and matchers. Each
//! declaration with template parameters opens a child scope whose names
//! shadow the globals. Duplicate checks only look at the innermost scope.

use indexmap::IndexMap;

use crate::diagnostics::{Location, ResolveError};
use crate::sem::Named;

#[derive(Clone, Debug)]
pub(super) struct Declared {
    pub named: Named,
    pub location: Location,
}

#[derive(Debug, Default)]
pub(super) struct Scope<'p> {
    parent: Option<&'p Scope<'p>>,
    names: IndexMap<String, Declared>,
}

impl<'p> Scope<'p> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(&self) -> Scope<'_> {
        Scope {
            parent: Some(self),
            names: IndexMap::new(),
        }
    }

    /// Bind `name` in this scope, failing if it is already bound here.
    pub fn declare(
        &mut self,
        name: &str,
        named: Named,
        location: Location,
    ) -> Result<(), ResolveError> {
        if let Some(existing) = self.names.get(name) {
            return Err(ResolveError::duplicate(
                name,
                location,
                existing.location.clone(),
            ));
        }
        self.names
            .insert(name.to_owned(), Declared { named, location });
        Ok(())
    }

    /// Innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<&Declared> {
        match self.names.get(name) {
            Some(declared) => Some(declared),
            None => self.parent.and_then(|p| p.lookup(name)),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}
