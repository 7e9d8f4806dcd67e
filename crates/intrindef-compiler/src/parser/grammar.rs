//! Grammar productions.
//!
//! ```text
//! file        = decl*
//! decl        = attribute* (enum | type | match | intrinsic)
//! attribute   = '@' ident ('(' literal (',' literal)* ')')?
//! enum        = 'enum' ident '{' (attribute* ident ','?)* '}'
//! type        = 'type' ident tparams?
//! match       = 'match' ident tparams? ':' alt ('|' alt)*
//! alt         = tname | ident '.' ident
//! intrinsic   = ('fn' | 'op' | 'ctor' | 'conv') name tparams? '(' params? ')' ('->' tname)?
//! tparams     = '<' ident (':' tname)? (',' ident (':' tname)?)* '>'
//! tname       = ident ('<' tname (',' tname)* '>')?
//! param       = attribute* (ident ':')? tname
//! ```

use intrindef_table::OverloadKind;

use super::ast::*;
use super::core::{ParseResult, Parser};
use super::lexer::TokenKind;
use crate::diagnostics::ParseError;

impl Parser<'_> {
    pub fn parse_file(mut self) -> ParseResult<Ast> {
        let mut enums = Vec::new();
        let mut types = Vec::new();
        let mut matchers = Vec::new();
        let mut builtins = Vec::new();
        let mut operators = Vec::new();
        let mut constructors = Vec::new();
        let mut converters = Vec::new();

        while !self.eof() {
            let attributes = self.parse_attributes()?;
            match self.peek_kind() {
                Some(TokenKind::KwEnum) => enums.push(self.parse_enum(attributes)?),
                Some(TokenKind::KwType) => types.push(self.parse_type(attributes)?),
                Some(TokenKind::KwMatch) => matchers.push(self.parse_matcher(attributes)?),
                Some(TokenKind::KwFn) => {
                    builtins.push(self.parse_intrinsic(OverloadKind::Builtin, attributes)?)
                }
                Some(TokenKind::KwOp) => {
                    operators.push(self.parse_intrinsic(OverloadKind::Operator, attributes)?)
                }
                Some(TokenKind::KwCtor) => {
                    constructors.push(self.parse_intrinsic(OverloadKind::Constructor, attributes)?)
                }
                Some(TokenKind::KwConv) => {
                    converters.push(self.parse_intrinsic(OverloadKind::Converter, attributes)?)
                }
                _ => return Err(self.unexpected()),
            }
        }

        Ok(Ast {
            source: self.into_source_map(),
            enums,
            types,
            matchers,
            builtins,
            operators,
            constructors,
            converters,
        })
    }

    fn parse_attributes(&mut self) -> ParseResult<Vec<Attribute>> {
        let mut attributes = Vec::new();
        while self.eat(TokenKind::At).is_some() {
            let name = self.expect_ident("attribute name")?;
            let mut values = Vec::new();
            if self.eat(TokenKind::ParenOpen).is_some() {
                loop {
                    values.push(self.parse_literal()?);
                    if self.eat(TokenKind::Comma).is_none() {
                        break;
                    }
                }
                self.expect(TokenKind::ParenClose, "attribute list")?;
            }
            attributes.push(Attribute { name, values });
        }
        Ok(attributes)
    }

    fn parse_literal(&mut self) -> ParseResult<Literal> {
        let Some(token) = self.peek() else {
            return Err(self.expected("value", "attribute"));
        };
        let text = self.text(&token);
        let literal = match token.kind {
            TokenKind::Integer => text.parse().map(Literal::Int).map_err(|_| {
                ParseError::new(
                    self.location(token.span),
                    format!("invalid integer '{text}'"),
                )
            })?,
            TokenKind::Float => text.parse().map(Literal::Float).map_err(|_| {
                ParseError::new(self.location(token.span), format!("invalid float '{text}'"))
            })?,
            TokenKind::String => Literal::String(text[1..text.len() - 1].to_owned()),
            _ => return Err(self.expected("value", "attribute")),
        };
        self.bump();
        Ok(literal)
    }

    fn parse_enum(&mut self, attributes: Vec<Attribute>) -> ParseResult<EnumDecl> {
        self.expect(TokenKind::KwEnum, "enum declaration")?;
        let name = self.expect_ident("enum name")?;
        self.expect(TokenKind::BraceOpen, "enum declaration")?;

        let mut entries = Vec::new();
        while self.eat(TokenKind::BraceClose).is_none() {
            let attributes = self.parse_attributes()?;
            let name = self.expect_ident("enum entry")?;
            entries.push(EnumEntry { attributes, name });
            if self.eat(TokenKind::Comma).is_none() {
                self.expect(TokenKind::BraceClose, "enum declaration")?;
                break;
            }
        }

        Ok(EnumDecl {
            attributes,
            name,
            entries,
        })
    }

    fn parse_type(&mut self, attributes: Vec<Attribute>) -> ParseResult<TypeDecl> {
        self.expect(TokenKind::KwType, "type declaration")?;
        let name = self.expect_ident("type name")?;
        let template_params = self.parse_template_params()?;
        Ok(TypeDecl {
            attributes,
            name,
            template_params,
        })
    }

    fn parse_matcher(&mut self, attributes: Vec<Attribute>) -> ParseResult<MatcherDecl> {
        self.expect(TokenKind::KwMatch, "matcher declaration")?;
        let name = self.expect_ident("matcher name")?;
        let template_params = self.parse_template_params()?;
        self.expect(TokenKind::Colon, "matcher declaration")?;

        let mut types = Vec::new();
        let mut members = Vec::new();
        loop {
            let is_member = self.nth_kind(1) == Some(TokenKind::Dot);
            let start = self.peek();
            if is_member {
                let owner = self.expect_ident("matcher alternative")?;
                self.expect(TokenKind::Dot, "enum entry")?;
                let member = self.expect_ident("enum entry")?;
                members.push(MemberName { owner, member });
            } else {
                types.push(self.parse_templated_name("matcher alternative")?);
            }
            if !types.is_empty() && !members.is_empty() {
                let span = start.map_or_else(Default::default, |t| t.span);
                return Err(ParseError::new(
                    self.location(span),
                    "cannot mix types and enum entries in a matcher",
                ));
            }
            if self.eat(TokenKind::Pipe).is_none() {
                break;
            }
        }

        let options = if members.is_empty() {
            MatcherOptions::Types(types)
        } else {
            MatcherOptions::Members(members)
        };

        Ok(MatcherDecl {
            attributes,
            name,
            template_params,
            options,
        })
    }

    fn parse_intrinsic(
        &mut self,
        kind: OverloadKind,
        attributes: Vec<Attribute>,
    ) -> ParseResult<IntrinsicDecl> {
        let context = match kind {
            OverloadKind::Builtin => "function declaration",
            OverloadKind::Operator => "operator declaration",
            OverloadKind::Constructor => "constructor declaration",
            OverloadKind::Converter => "converter declaration",
        };
        self.bump();

        let name = if kind == OverloadKind::Operator {
            self.parse_operator_name()?
        } else {
            self.expect_ident(context)?
        };
        let template_params = self.parse_template_params()?;
        let parameters = self.parse_parameters(context)?;
        let return_type = match self.eat(TokenKind::Arrow) {
            Some(_) => Some(self.parse_templated_name("return type")?),
            None => None,
        };

        Ok(IntrinsicDecl {
            kind,
            attributes,
            name,
            template_params,
            parameters,
            return_type,
        })
    }

    /// An operator symbol. `<<` and `>>` arrive as two adjacent tokens.
    fn parse_operator_name(&mut self) -> ParseResult<Ident> {
        match self.peek() {
            Some(token) if token.kind.is_operator() => {
                self.bump();
                let joined = match token.kind {
                    TokenKind::Lt | TokenKind::Gt => self.eat_adjacent(token, token.kind),
                    _ => None,
                };
                let span = match joined {
                    Some(second) => token.span.cover(second.span),
                    None => token.span,
                };
                Ok(Ident {
                    text: self.source[std::ops::Range::<usize>::from(span)].to_owned(),
                    span,
                })
            }
            _ => Err(self.expected("operator", "operator declaration")),
        }
    }

    fn parse_template_params(&mut self) -> ParseResult<Vec<TemplateParam>> {
        let mut params = Vec::new();
        if self.eat(TokenKind::Lt).is_none() {
            return Ok(params);
        }
        loop {
            let name = self.expect_ident("template parameter")?;
            let constraint = match self.eat(TokenKind::Colon) {
                Some(_) => Some(self.parse_templated_name("template parameter type")?),
                None => None,
            };
            params.push(TemplateParam { name, constraint });
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::Gt, "template parameter list")?;
        Ok(params)
    }

    fn parse_templated_name(&mut self, context: &str) -> ParseResult<TemplatedName> {
        let name = self.expect_ident(context)?;
        let mut args = Vec::new();
        if self.eat(TokenKind::Lt).is_some() {
            loop {
                args.push(self.parse_templated_name("template argument")?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
            self.expect(TokenKind::Gt, "template argument list")?;
        }
        Ok(TemplatedName { name, args })
    }

    fn parse_parameters(&mut self, context: &str) -> ParseResult<Vec<Parameter>> {
        self.expect(TokenKind::ParenOpen, context)?;
        let mut parameters = Vec::new();
        if self.eat(TokenKind::ParenClose).is_some() {
            return Ok(parameters);
        }
        loop {
            let attributes = self.parse_attributes()?;
            let name = if self.at(TokenKind::Ident) && self.nth_kind(1) == Some(TokenKind::Colon) {
                let name = self.expect_ident("parameter")?;
                self.bump();
                Some(name)
            } else {
                None
            };
            let ty = self.parse_templated_name("parameter type")?;
            parameters.push(Parameter {
                attributes,
                name,
                ty,
            });
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::ParenClose, "parameter list")?;
        Ok(parameters)
    }
}
