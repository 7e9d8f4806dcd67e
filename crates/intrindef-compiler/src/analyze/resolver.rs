//! AST to semantic model.
//!
//! Resolution runs in passes so declarations may refer to later ones:
//! 1. Declare enums (with their entries), types and matchers globally
//! 2. Resolve type template parameters and type-matcher options
//! 3. Resolve builtins, operators, constructors and converters

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use intrindef_table::OverloadKind;
use rowan::TextRange;

use super::attributes;
use super::scope::Scope;
use crate::diagnostics::{Location, ResolveError};
use crate::parser::ast::{self, Ast, IntrinsicDecl, MatcherOptions, TemplatedName};
use crate::sem::*;

type Result<T> = std::result::Result<T, ResolveError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Family {
    Builtins,
    UnaryOperators,
    BinaryOperators,
    ConstructorsAndConverters,
}

pub(super) struct Resolver<'a> {
    ast: &'a Ast,
    sem: Sem,
    /// Single-option matchers standing in for enum entries used as names.
    entry_matchers: HashMap<EnumEntryId, EnumMatcherId>,
    /// Reverse of `entry_matchers`, for error messages.
    matcher_entries: HashMap<EnumMatcherId, EnumEntryId>,
    /// All-entries matchers for template params constrained by a whole enum.
    whole_enum_matchers: HashMap<EnumId, EnumMatcherId>,
    intrinsics: HashMap<(Family, String), IntrinsicId>,
    parameter_names: BTreeSet<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(ast: &'a Ast) -> Self {
        Self {
            ast,
            sem: Sem::default(),
            entry_matchers: HashMap::new(),
            matcher_entries: HashMap::new(),
            whole_enum_matchers: HashMap::new(),
            intrinsics: HashMap::new(),
            parameter_names: BTreeSet::new(),
        }
    }

    pub fn run(mut self) -> Result<Sem> {
        let ast = self.ast;
        let mut globals = Scope::new();

        for decl in &ast.enums {
            self.declare_enum(&mut globals, decl)?;
        }
        for decl in &ast.types {
            self.declare_type(&mut globals, decl)?;
        }
        for decl in &ast.matchers {
            self.declare_matcher(&mut globals, decl)?;
        }
        tracing::trace!(globals = globals.len(), "declared globals");

        for (index, decl) in ast.types.iter().enumerate() {
            let mut scope = globals.child();
            let params = self.template_params(&mut scope, &decl.template_params)?;
            self.sem[TypeId::from_raw(index as u32)].template_params = params;
        }
        for decl in &ast.matchers {
            self.resolve_matcher(&globals, decl)?;
        }

        for decl in ast.intrinsics() {
            self.resolve_intrinsic(&globals, decl)?;
        }

        Ok(self.finish())
    }

    fn finish(mut self) -> Sem {
        self.sem.unique_parameter_names = self.parameter_names.into_iter().collect();
        self.sem
    }

    fn location(&self, span: TextRange) -> Location {
        self.ast.source.location(span)
    }

    fn error(&self, span: TextRange, message: impl Into<String>) -> ResolveError {
        ResolveError::new(self.location(span), message)
    }

    fn declare_enum(&mut self, globals: &mut Scope, decl: &ast::EnumDecl) -> Result<()> {
        attributes::none(&self.ast.source, &decl.attributes)?;

        let enum_id = EnumId::from_raw(self.sem.enums.len() as u32);
        let location = self.location(decl.name.span);
        globals.declare(&decl.name.text, Named::Enum(enum_id), location.clone())?;

        let mut entries: IndexMap<String, EnumEntryId> = IndexMap::new();
        for entry in &decl.entries {
            let entry_location = self.location(entry.name.span);
            if let Some(&first) = entries.get(&entry.name.text) {
                return Err(ResolveError {
                    location: entry_location,
                    message: format!("duplicate enum entry '{}'", entry.name),
                    first_declared: Some(self.sem[first].location.clone()),
                });
            }
            let is_internal = attributes::enum_entry(&self.ast.source, &entry.attributes)?;

            let entry_id = EnumEntryId::from_raw(self.sem.enum_entries.len() as u32);
            globals.declare(
                &entry.name.text,
                Named::EnumEntry(entry_id),
                entry_location.clone(),
            )?;
            self.sem.enum_entries.push(EnumEntry {
                name: entry.name.text.clone(),
                location: entry_location,
                owner: enum_id,
                is_internal,
            });
            entries.insert(entry.name.text.clone(), entry_id);
        }

        self.sem.enums.push(Enum {
            name: decl.name.text.clone(),
            location,
            entries,
        });
        Ok(())
    }

    fn declare_type(&mut self, globals: &mut Scope, decl: &ast::TypeDecl) -> Result<()> {
        let attrs = attributes::type_decl(&self.ast.source, &decl.attributes)?;
        let id = TypeId::from_raw(self.sem.types.len() as u32);
        let location = self.location(decl.name.span);
        globals.declare(&decl.name.text, Named::Type(id), location.clone())?;

        self.sem.types.push(Type {
            name: decl.name.text.clone(),
            location,
            display_name: attrs.display.unwrap_or_else(|| decl.name.text.clone()),
            precedence: attrs.precedence,
            template_params: Vec::new(),
        });
        Ok(())
    }

    /// Declares a matcher. Enum matchers only depend on enums, so they are
    /// fully resolved here; type matchers get their options later.
    fn declare_matcher(&mut self, globals: &mut Scope, decl: &ast::MatcherDecl) -> Result<()> {
        attributes::none(&self.ast.source, &decl.attributes)?;
        let location = self.location(decl.name.span);

        match &decl.options {
            MatcherOptions::Types(_) => {
                let id = TypeMatcherId::from_raw(self.sem.type_matchers.len() as u32);
                globals.declare(&decl.name.text, Named::TypeMatcher(id), location.clone())?;
                self.sem.type_matchers.push(TypeMatcher {
                    name: decl.name.text.clone(),
                    location,
                    template_params: Vec::new(),
                    types: Vec::new(),
                });
            }
            MatcherOptions::Members(members) => {
                let id = EnumMatcherId::from_raw(self.sem.enum_matchers.len() as u32);
                globals.declare(&decl.name.text, Named::EnumMatcher(id), location.clone())?;

                let mut owner: Option<EnumId> = None;
                let mut options: Vec<EnumEntryId> = Vec::new();
                for member in members {
                    let enum_id = match globals.lookup(&member.owner.text).map(|d| d.named) {
                        Some(Named::Enum(e)) => e,
                        Some(other) => {
                            return Err(self.error(
                                member.owner.span,
                                format!(
                                    "cannot use {} as enum matcher option",
                                    self.sem.describe(other)
                                ),
                            ));
                        }
                        None => {
                            return Err(self.error(
                                member.owner.span,
                                format!("cannot resolve '{}'", member.owner),
                            ));
                        }
                    };
                    match owner {
                        None => owner = Some(enum_id),
                        Some(first) if first != enum_id => {
                            return Err(self.error(
                                member.owner.span,
                                format!(
                                    "mismatched enums '{}' and '{}' in matcher",
                                    self.sem[first].name, self.sem[enum_id].name
                                ),
                            ));
                        }
                        Some(_) => {}
                    }

                    let Some(&entry) = self.sem[enum_id].entries.get(&member.member.text) else {
                        return Err(self.error(
                            member.member.span,
                            format!(
                                "enum '{}' does not contain '{}'",
                                member.owner, member.member
                            ),
                        ));
                    };
                    if options.contains(&entry) {
                        return Err(self.error(
                            member.member.span,
                            format!("duplicate option '{member}' in matcher"),
                        ));
                    }
                    options.push(entry);
                }

                // The parser guarantees at least one alternative.
                let Some(owner) = owner else {
                    return Err(self.error(decl.name.span, "matcher has no options"));
                };
                self.sem.enum_matchers.push(EnumMatcher {
                    name: decl.name.text.clone(),
                    location,
                    template_params: Vec::new(),
                    owner,
                    options,
                });
            }
        }
        Ok(())
    }

    fn resolve_matcher(&mut self, globals: &Scope, decl: &ast::MatcherDecl) -> Result<()> {
        let Some(declared) = globals.lookup(&decl.name.text) else {
            return Err(self.error(
                decl.name.span,
                format!("cannot resolve '{}'", decl.name),
            ));
        };
        let target = declared.named;

        let mut scope = globals.child();
        let params = self.template_params(&mut scope, &decl.template_params)?;

        match (target, &decl.options) {
            // Options are bare types; templated instantiations are not matchable.
            (Named::TypeMatcher(id), MatcherOptions::Types(names)) => {
                let mut types: Vec<TypeId> = Vec::new();
                for name in names {
                    let fqn = self.lookup_named(&scope, name)?;
                    let Named::Type(ty) = fqn.target else {
                        return Err(self.error(
                            name.name.span,
                            format!(
                                "cannot use {} as type matcher option",
                                self.describe(fqn.target)
                            ),
                        ));
                    };
                    if !fqn.args.is_empty() {
                        return Err(self.error(
                            name.name.span,
                            format!("type matcher option '{name}' cannot take template arguments"),
                        ));
                    }
                    if types.contains(&ty) {
                        return Err(self.error(
                            name.name.span,
                            format!("duplicate option '{name}' in matcher"),
                        ));
                    }
                    types.push(ty);
                }
                let matcher = &mut self.sem[id];
                matcher.template_params = params;
                matcher.types = types;
            }
            (Named::EnumMatcher(id), _) => self.sem[id].template_params = params,
            _ => {}
        }
        Ok(())
    }

    /// Resolves and binds template parameters in `scope`.
    fn template_params(
        &mut self,
        scope: &mut Scope,
        params: &[ast::TemplateParam],
    ) -> Result<Vec<TemplateParamId>> {
        let mut ids = Vec::with_capacity(params.len());
        for param in params {
            let kind = match &param.constraint {
                None => TemplateParamKind::Type { constraint: None },
                Some(c) if c.name.text == "num" && c.args.is_empty() => TemplateParamKind::Number,
                Some(c) => {
                    let fqn = self.lookup_named(scope, c)?;
                    match fqn.target {
                        Named::Type(_) | Named::TypeMatcher(_) => TemplateParamKind::Type {
                            constraint: Some(fqn),
                        },
                        Named::Enum(owner) => TemplateParamKind::Enum {
                            owner,
                            matcher: self.whole_enum_matcher(owner),
                        },
                        Named::EnumMatcher(matcher) => TemplateParamKind::Enum {
                            owner: self.sem[matcher].owner,
                            matcher,
                        },
                        other => {
                            return Err(self.error(
                                c.name.span,
                                format!(
                                    "invalid template parameter type {}",
                                    self.describe(other)
                                ),
                            ));
                        }
                    }
                }
            };

            let id = TemplateParamId::from_raw(self.sem.template_params.len() as u32);
            let location = self.location(param.name.span);
            scope.declare(&param.name.text, Named::TemplateParam(id), location.clone())?;
            self.sem.template_params.push(TemplateParam {
                name: param.name.text.clone(),
                location,
                kind,
            });
            ids.push(id);
        }
        Ok(ids)
    }

    /// Resolves a templated name, checking arity and argument categories.
    fn lookup_named(&mut self, scope: &Scope, name: &TemplatedName) -> Result<FullyQualifiedName> {
        let Some(declared) = scope.lookup(&name.name.text) else {
            return Err(self.error(
                name.name.span,
                format!("cannot resolve '{}'", name.name),
            ));
        };
        let target = declared.named;

        if matches!(target, Named::TemplateParam(_)) && !name.args.is_empty() {
            return Err(self.error(
                name.name.span,
                format!(
                    "'{}' is a template parameter and does not accept template arguments",
                    name.name
                ),
            ));
        }

        let params = self.sem.template_params_of(target).to_vec();
        if params.len() != name.args.len() {
            return Err(self.error(
                name.name.span,
                format!(
                    "'{}' requires {} template arguments, but {} were provided",
                    name.name,
                    params.len(),
                    name.args.len()
                ),
            ));
        }

        let mut args = Vec::with_capacity(params.len());
        for (arg, param) in name.args.iter().zip(params) {
            let mut fqn = self.lookup_named(scope, arg)?;
            self.check_compatible(&fqn, param, arg.name.span)?;
            // A bare enum stands for every one of its entries.
            if let Named::Enum(owner) = fqn.target {
                fqn = FullyQualifiedName::new(Named::EnumMatcher(self.whole_enum_matcher(owner)));
            }
            args.push(TemplateArg::Name(fqn));
        }

        Ok(self.fully_qualified_name(target, args))
    }

    /// Rewrites enum entries into single-option matchers.
    fn fully_qualified_name(&mut self, target: Named, args: Vec<TemplateArg>) -> FullyQualifiedName {
        match target {
            Named::EnumEntry(entry) => {
                FullyQualifiedName::new(Named::EnumMatcher(self.entry_matcher(entry)))
            }
            _ => FullyQualifiedName::with_args(target, args),
        }
    }

    fn entry_matcher(&mut self, entry: EnumEntryId) -> EnumMatcherId {
        if let Some(&id) = self.entry_matchers.get(&entry) {
            return id;
        }
        let e = &self.sem[entry];
        let matcher = EnumMatcher {
            name: e.name.clone(),
            location: e.location.clone(),
            template_params: Vec::new(),
            owner: e.owner,
            options: vec![entry],
        };
        let id = self.push_enum_matcher(matcher);
        self.entry_matchers.insert(entry, id);
        self.matcher_entries.insert(id, entry);
        id
    }

    fn whole_enum_matcher(&mut self, owner: EnumId) -> EnumMatcherId {
        if let Some(&id) = self.whole_enum_matchers.get(&owner) {
            return id;
        }
        let e = &self.sem[owner];
        let matcher = EnumMatcher {
            name: e.name.clone(),
            location: e.location.clone(),
            template_params: Vec::new(),
            owner,
            options: e.entries.values().copied().collect(),
        };
        let id = self.push_enum_matcher(matcher);
        self.whole_enum_matchers.insert(owner, id);
        id
    }

    fn push_enum_matcher(&mut self, matcher: EnumMatcher) -> EnumMatcherId {
        let id = EnumMatcherId::from_raw(self.sem.enum_matchers.len() as u32);
        self.sem.enum_matchers.push(matcher);
        id
    }

    /// Like [`Sem::describe`], but names synthetic entry matchers by their entry.
    fn describe(&self, named: Named) -> String {
        match named {
            Named::EnumMatcher(id) => match self.matcher_entries.get(&id) {
                Some(&entry) => self.sem.describe(Named::EnumEntry(entry)),
                None => self.sem.describe(named),
            },
            _ => self.sem.describe(named),
        }
    }

    fn check_compatible(
        &self,
        arg: &FullyQualifiedName,
        param: TemplateParamId,
        span: TextRange,
    ) -> Result<()> {
        use TemplateParamKind as K;

        let param_kind = &self.sem[param].kind;
        let fits = match (arg.target, param_kind) {
            (Named::Type(_) | Named::TypeMatcher(_), K::Type { .. }) => true,
            (Named::EnumMatcher(m), K::Enum { owner, .. }) => self.sem[m].owner == *owner,
            (Named::EnumEntry(e), K::Enum { owner, .. }) => self.sem[e].owner == *owner,
            (Named::Enum(e), K::Enum { owner, .. }) => e == *owner,
            (Named::Enum(_) | Named::EnumMatcher(_) | Named::EnumEntry(_), K::Number) => true,
            (Named::TemplateParam(p), _) => match (&self.sem[p].kind, param_kind) {
                (K::Type { .. }, K::Type { .. }) => true,
                (K::Enum { owner: a, .. }, K::Enum { owner: b, .. }) => a == b,
                (K::Enum { .. } | K::Number, K::Number) => true,
                _ => false,
            },
            _ => false,
        };

        if fits {
            return Ok(());
        }
        Err(self.error(
            span,
            format!(
                "cannot use {} as {}",
                self.describe(arg.target),
                self.sem.describe(Named::TemplateParam(param))
            ),
        ))
    }

    /// Parameter and return types must denote a type, not an enum value.
    fn check_value_type(&self, fqn: &FullyQualifiedName, name: &TemplatedName, usage: &str) -> Result<()> {
        let ok = match fqn.target {
            Named::Type(_) | Named::TypeMatcher(_) => true,
            Named::TemplateParam(p) => matches!(self.sem[p].kind, TemplateParamKind::Type { .. }),
            _ => false,
        };
        if ok {
            return Ok(());
        }
        Err(self.error(
            name.name.span,
            format!("cannot use {} as {usage}", self.describe(fqn.target)),
        ))
    }

    fn resolve_intrinsic(&mut self, globals: &Scope, decl: &IntrinsicDecl) -> Result<()> {
        let ast = self.ast;
        let map = &ast.source;
        let mut scope = globals.child();
        let template_params = self.template_params(&mut scope, &decl.template_params)?;

        let mut parameters = Vec::with_capacity(decl.parameters.len());
        for param in &decl.parameters {
            let ty = self.lookup_named(&scope, &param.ty)?;
            self.check_value_type(&ty, &param.ty, "parameter type")?;
            let attrs = attributes::parameter(map, &param.attributes)?;
            if let Some(name) = &param.name {
                self.parameter_names.insert(name.text.clone());
            }
            parameters.push(Parameter {
                name: param.name.as_ref().map(|n| n.text.clone()),
                ty,
                is_const: attrs.is_const,
                test_value: attrs.test_value,
            });
        }

        let return_type = match &decl.return_type {
            Some(ret) => {
                let fqn = self.lookup_named(&scope, ret)?;
                self.check_value_type(&fqn, ret, "return type")?;
                Some(fqn)
            }
            None => None,
        };

        let attrs = attributes::intrinsic(map, decl)?;
        if let Some(attr) = attrs.must_use
            && return_type.is_none()
        {
            return Err(self.error(
                attr.name.span,
                "@must_use can only be used on a function with a return type",
            ));
        }

        let family = match decl.kind {
            OverloadKind::Builtin => Family::Builtins,
            OverloadKind::Operator => match parameters.len() {
                1 => Family::UnaryOperators,
                2 => Family::BinaryOperators,
                _ => {
                    return Err(self.error(
                        decl.name.span,
                        "operators must have either 1 or 2 parameters",
                    ));
                }
            },
            OverloadKind::Constructor => Family::ConstructorsAndConverters,
            OverloadKind::Converter => {
                if parameters.len() != 1 {
                    return Err(self.error(
                        decl.name.span,
                        "converters must have exactly 1 parameter",
                    ));
                }
                Family::ConstructorsAndConverters
            }
        };

        let (template_types, template_numbers): (Vec<_>, Vec<_>) = template_params
            .iter()
            .copied()
            .partition(|&p| !self.sem[p].kind.is_number_like());
        self.sem.max_template_types = self.sem.max_template_types.max(template_types.len());
        self.sem.max_template_numbers = self.sem.max_template_numbers.max(template_numbers.len());

        let intrinsic = self.intrinsic(family, &decl.name.text);
        let overload = OverloadId::from_raw(self.sem.overloads.len() as u32);
        let location = self.location(decl.name.span);
        tracing::trace!(
            intrinsic = %decl.name,
            overload = overload.as_u32(),
            "resolved overload"
        );
        self.sem.overloads.push(Overload {
            intrinsic,
            kind: decl.kind,
            location,
            description: decl.to_string(),
            template_params,
            template_types,
            template_numbers,
            parameters,
            return_type,
            stages: attrs.stages,
            must_use: attrs.must_use.is_some(),
            is_deprecated: attrs.is_deprecated,
            const_eval_fn: attrs.const_eval_fn,
        });
        self.sem[intrinsic].overloads.push(overload);
        Ok(())
    }

    /// The intrinsic named `name` in `family`, created on first use.
    fn intrinsic(&mut self, family: Family, name: &str) -> IntrinsicId {
        if let Some(&id) = self.intrinsics.get(&(family, name.to_owned())) {
            return id;
        }
        let id = IntrinsicId::from_raw(self.sem.intrinsics.len() as u32);
        self.sem.intrinsics.push(Intrinsic {
            name: name.to_owned(),
            overloads: Vec::new(),
        });
        let list = match family {
            Family::Builtins => &mut self.sem.builtins,
            Family::UnaryOperators => &mut self.sem.unary_operators,
            Family::BinaryOperators => &mut self.sem.binary_operators,
            Family::ConstructorsAndConverters => &mut self.sem.constructors_and_converters,
        };
        list.push(id);
        self.intrinsics.insert((family, name.to_owned()), id);
        id
    }
}
