use std::fmt;

use super::Sem;
use super::ids::*;

/// Anything a name can resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Named {
    Enum(EnumId),
    EnumEntry(EnumEntryId),
    Type(TypeId),
    TypeMatcher(TypeMatcherId),
    EnumMatcher(EnumMatcherId),
    TemplateParam(TemplateParamId),
}

/// A resolved, possibly templated reference such as `vec<3, f32>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FullyQualifiedName {
    pub target: Named,
    pub args: Vec<TemplateArg>,
}

/// A template argument. Numbers only appear once a number param is substituted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TemplateArg {
    Name(FullyQualifiedName),
    Number(u32),
}

impl FullyQualifiedName {
    pub fn new(target: Named) -> Self {
        Self {
            target,
            args: Vec::new(),
        }
    }

    pub fn with_args(target: Named, args: Vec<TemplateArg>) -> Self {
        Self { target, args }
    }

    /// Arguments that are names, skipping numbers.
    pub fn name_args(&self) -> impl Iterator<Item = &FullyQualifiedName> {
        self.args.iter().filter_map(|arg| match arg {
            TemplateArg::Name(fqn) => Some(fqn),
            TemplateArg::Number(_) => None,
        })
    }
}

impl From<FullyQualifiedName> for TemplateArg {
    fn from(fqn: FullyQualifiedName) -> Self {
        Self::Name(fqn)
    }
}

/// Prints a name with its arguments, e.g. `ptr<function, f32, read_write>`.
pub struct FqnDisplay<'a> {
    pub(super) sem: &'a Sem,
    pub(super) fqn: &'a FullyQualifiedName,
}

impl fmt::Display for FqnDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sem.name_of(self.fqn.target))?;
        if self.fqn.args.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (i, arg) in self.fqn.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match arg {
                TemplateArg::Name(fqn) => write!(f, "{}", self.sem.fqn(fqn))?,
                TemplateArg::Number(n) => write!(f, "{n}")?,
            }
        }
        f.write_str(">")
    }
}
