//! Owned syntax tree of a declaration file.
//!
//! Every node keeps the byte range of its name token so later stages can
//! report positioned errors. `Display` prints the canonical surface form,
//! which reparses to an equal tree (see [`Ast::eq_ignoring_spans`]).

use std::fmt;

use intrindef_table::OverloadKind;
use rowan::TextRange;

use crate::diagnostics::SourceMap;

/// A parsed declaration file, grouped by declaration kind in source order.
#[derive(Clone, Debug)]
pub struct Ast {
    pub source: SourceMap,
    pub enums: Vec<EnumDecl>,
    pub types: Vec<TypeDecl>,
    pub matchers: Vec<MatcherDecl>,
    pub builtins: Vec<IntrinsicDecl>,
    pub operators: Vec<IntrinsicDecl>,
    pub constructors: Vec<IntrinsicDecl>,
    pub converters: Vec<IntrinsicDecl>,
}

/// An identifier together with where it was written.
#[derive(Clone, Debug, PartialEq)]
pub struct Ident {
    pub text: String,
    pub span: TextRange,
}

/// `@name` or `@name(value, ...)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    /// Span covers the name only, not the `@`.
    pub name: Ident,
    pub values: Vec<Literal>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumDecl {
    pub attributes: Vec<Attribute>,
    pub name: Ident,
    pub entries: Vec<EnumEntry>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumEntry {
    pub attributes: Vec<Attribute>,
    pub name: Ident,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeDecl {
    pub attributes: Vec<Attribute>,
    pub name: Ident,
    pub template_params: Vec<TemplateParam>,
}

/// `Name` or `Name: constraint` inside a `<...>` parameter list.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateParam {
    pub name: Ident,
    pub constraint: Option<TemplatedName>,
}

/// `name` or `name<arg, ...>`, arguments recursively templated.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplatedName {
    pub name: Ident,
    pub args: Vec<TemplatedName>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatcherDecl {
    pub attributes: Vec<Attribute>,
    pub name: Ident,
    pub template_params: Vec<TemplateParam>,
    pub options: MatcherOptions,
}

/// Alternatives of a matcher. A matcher never mixes the two forms.
#[derive(Clone, Debug, PartialEq)]
pub enum MatcherOptions {
    Types(Vec<TemplatedName>),
    Members(Vec<MemberName>),
}

/// `Owner.Member`
#[derive(Clone, Debug, PartialEq)]
pub struct MemberName {
    pub owner: Ident,
    pub member: Ident,
}

/// A `fn`, `op`, `ctor` or `conv` declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct IntrinsicDecl {
    pub kind: OverloadKind,
    pub attributes: Vec<Attribute>,
    pub name: Ident,
    pub template_params: Vec<TemplateParam>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TemplatedName>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub attributes: Vec<Attribute>,
    pub name: Option<Ident>,
    pub ty: TemplatedName,
}

impl Ast {
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
            && self.types.is_empty()
            && self.matchers.is_empty()
            && self.intrinsics().next().is_none()
    }

    /// All intrinsic declarations: builtins, operators, constructors, converters.
    pub fn intrinsics(&self) -> impl Iterator<Item = &IntrinsicDecl> {
        self.builtins
            .iter()
            .chain(&self.operators)
            .chain(&self.constructors)
            .chain(&self.converters)
    }

    /// Structural equality that ignores source positions and origin.
    pub fn eq_ignoring_spans(&self, other: &Ast) -> bool {
        let a = self.clone().strip_spans();
        let b = other.clone().strip_spans();
        a.enums == b.enums
            && a.types == b.types
            && a.matchers == b.matchers
            && a.builtins == b.builtins
            && a.operators == b.operators
            && a.constructors == b.constructors
            && a.converters == b.converters
    }

    fn strip_spans(mut self) -> Self {
        for decl in &mut self.enums {
            strip_attributes(&mut decl.attributes);
            strip(&mut decl.name);
            for entry in &mut decl.entries {
                strip_attributes(&mut entry.attributes);
                strip(&mut entry.name);
            }
        }
        for decl in &mut self.types {
            strip_attributes(&mut decl.attributes);
            strip(&mut decl.name);
            strip_template_params(&mut decl.template_params);
        }
        for decl in &mut self.matchers {
            strip_attributes(&mut decl.attributes);
            strip(&mut decl.name);
            strip_template_params(&mut decl.template_params);
            match &mut decl.options {
                MatcherOptions::Types(names) => names.iter_mut().for_each(strip_templated),
                MatcherOptions::Members(members) => {
                    for m in members {
                        strip(&mut m.owner);
                        strip(&mut m.member);
                    }
                }
            }
        }
        for decl in self
            .builtins
            .iter_mut()
            .chain(&mut self.operators)
            .chain(&mut self.constructors)
            .chain(&mut self.converters)
        {
            strip_attributes(&mut decl.attributes);
            strip(&mut decl.name);
            strip_template_params(&mut decl.template_params);
            for param in &mut decl.parameters {
                strip_attributes(&mut param.attributes);
                if let Some(name) = &mut param.name {
                    strip(name);
                }
                strip_templated(&mut param.ty);
            }
            if let Some(ret) = &mut decl.return_type {
                strip_templated(ret);
            }
        }
        self
    }
}

fn strip(ident: &mut Ident) {
    ident.span = TextRange::default();
}

fn strip_attributes(attributes: &mut [Attribute]) {
    for attr in attributes {
        strip(&mut attr.name);
    }
}

fn strip_template_params(params: &mut [TemplateParam]) {
    for param in params {
        strip(&mut param.name);
        if let Some(c) = &mut param.constraint {
            strip_templated(c);
        }
    }
}

fn strip_templated(name: &mut TemplatedName) {
    strip(&mut name.name);
    name.args.iter_mut().for_each(strip_templated);
}

impl Attribute {
    pub fn name(&self) -> &str {
        &self.name.text
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            // Debug keeps the `.0` so the literal reparses as a float.
            Self::Float(v) => write!(f, "{v:?}"),
            Self::String(s) => write!(f, "\"{s}\""),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if !self.values.is_empty() {
            write!(f, "(")?;
            write_list(f, &self.values, ", ")?;
            write!(f, ")")?;
        }
        Ok(())
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_attributes(f: &mut fmt::Formatter<'_>, attributes: &[Attribute]) -> fmt::Result {
    for attr in attributes {
        write!(f, "{attr} ")?;
    }
    Ok(())
}

fn write_template_params(f: &mut fmt::Formatter<'_>, params: &[TemplateParam]) -> fmt::Result {
    if params.is_empty() {
        return Ok(());
    }
    write!(f, "<")?;
    write_list(f, params, ", ")?;
    write!(f, ">")
}

impl fmt::Display for TemplateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(c) = &self.constraint {
            write!(f, ": {c}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TemplatedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            write_list(f, &self.args, ", ")?;
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl fmt::Display for EnumEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_attributes(f, &self.attributes)?;
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for EnumDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_attributes(f, &self.attributes)?;
        write!(f, "enum {} {{", self.name)?;
        if !self.entries.is_empty() {
            write!(f, " ")?;
            write_list(f, &self.entries, ", ")?;
            write!(f, " ")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_attributes(f, &self.attributes)?;
        write!(f, "type {}", self.name)?;
        write_template_params(f, &self.template_params)
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.member)
    }
}

impl fmt::Display for MatcherDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_attributes(f, &self.attributes)?;
        write!(f, "match {}", self.name)?;
        write_template_params(f, &self.template_params)?;
        write!(f, ": ")?;
        match &self.options {
            MatcherOptions::Types(names) => write_list(f, names, " | "),
            MatcherOptions::Members(members) => write_list(f, members, " | "),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_attributes(f, &self.attributes)?;
        if let Some(name) = &self.name {
            write!(f, "{name}: ")?;
        }
        write!(f, "{}", self.ty)
    }
}

impl fmt::Display for IntrinsicDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_attributes(f, &self.attributes)?;
        write!(f, "{} {}", self.kind.keyword(), self.name)?;
        // `op < <T>` must not reprint as `op <<T>`.
        if self.kind == OverloadKind::Operator && !self.template_params.is_empty() {
            write!(f, " ")?;
        }
        write_template_params(f, &self.template_params)?;
        write!(f, "(")?;
        write_list(f, &self.parameters, ", ")?;
        write!(f, ")")?;
        if let Some(ret) = &self.return_type {
            write!(f, " -> {ret}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decls: Vec<&dyn fmt::Display> = self
            .enums
            .iter()
            .map(|d| d as &dyn fmt::Display)
            .chain(self.types.iter().map(|d| d as &dyn fmt::Display))
            .chain(self.matchers.iter().map(|d| d as &dyn fmt::Display))
            .chain(self.intrinsics().map(|d| d as &dyn fmt::Display))
            .collect();
        for decl in decls {
            writeln!(f, "{decl}")?;
        }
        Ok(())
    }
}
