//! Object literal member parsing.
//!
//! Members are properties (`key: value`), shorthand properties (`key`,
//! `key = default`), methods (`key() {}`, `get key() {}`, `set key(v)
//! {}`, `*key() {}`) and spread elements (`...expr`). Keys are
//! identifiers, keywords used as identifiers, or computed `[expr]` keys.

use crate::ast::*;
use crate::error::SyntaxError;
use crate::expr::ExprFlags;
use crate::Parser;
use juno_lex::Token;
use juno_util::Symbol;

impl<'a> Parser<'a> {
    /// Object literal: `{ member, member, ... }`.
    pub(crate) fn parse_object_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.start_node();
        self.expect(Token::LBrace)?;

        let mut members = Vec::new();
        while !self.check(&Token::RBrace) {
            members.push(self.parse_object_member()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
            if self.check(&Token::RBrace) {
                if let Some(last) = members.last_mut() {
                    last.meta_mut().trailing_comma = true;
                }
                break;
            }
        }
        self.expect(Token::RBrace)?;

        Ok(Expr::Object(ObjectExpr {
            members,
            meta: self.finish_node(),
        }))
    }

    /// One object member.
    fn parse_object_member(&mut self) -> Result<ObjectMember, SyntaxError> {
        self.start_node();

        if self.check(&Token::Ellipsis) {
            self.advance();
            let argument = self.parse_expr_post(ExprFlags::all().no_sequence())?;
            return Ok(ObjectMember::Spread(SpreadElement {
                argument: Box::new(argument),
                meta: self.finish_node(),
            }));
        }

        let generator = self.match_token(&Token::Star);

        let (mut key, mut computed) = self.parse_member_key()?;
        let mut kind = MethodKind::Method;

        // `get`/`set` directly followed by another key names an accessor;
        // otherwise it is an ordinary key (`{ get: 1 }`, `{ set }`).
        let accessor = match (&key, generator || computed) {
            (Expr::Ident(id), false) => match id.name.as_str() {
                "get" => Some(MethodKind::Get),
                "set" => Some(MethodKind::Set),
                _ => None,
            },
            _ => None,
        };
        if let Some(accessor_kind) = accessor {
            if self.member_key_follows() {
                kind = accessor_kind;
                let (actual_key, actual_computed) = self.parse_member_key()?;
                key = actual_key;
                computed = actual_computed;
                if !self.check(&Token::LParen) {
                    return Err(self.expected_error("("));
                }
            }
        }

        let token = self.current()?.token;
        match token {
            Token::Colon if kind == MethodKind::Method && !generator => {
                self.advance();
                let value = self.parse_expr_post(ExprFlags::all().no_sequence())?;
                Ok(ObjectMember::Property(ObjectProperty {
                    key: Box::new(key),
                    value: PropertyValue::Expr(Box::new(value)),
                    computed,
                    shorthand: false,
                    meta: self.finish_node(),
                }))
            }
            Token::Eq if kind == MethodKind::Method && !generator && !computed => {
                // shorthand with default, only valid once the enclosing
                // object is rewritten to a pattern
                self.advance();
                let right = self.parse_expr_post(ExprFlags::all().no_sequence())?;
                let id = match key {
                    Expr::Ident(id) => id,
                    other => {
                        let span = other.meta().span;
                        return Err(
                            self.reject(SyntaxError::InvalidPattern(other.kind_name().into()), span)
                        );
                    }
                };
                let meta = self.finish_node();
                let default = Pat::Assign(AssignPat {
                    left: Box::new(Pat::Ident(id.clone())),
                    right: Box::new(right),
                    meta,
                });
                Ok(ObjectMember::Property(ObjectProperty {
                    key: Box::new(Expr::Ident(id)),
                    value: PropertyValue::Pattern(Box::new(default)),
                    computed: false,
                    shorthand: true,
                    meta,
                }))
            }
            Token::LParen => {
                let params = self.parse_function_params()?;
                let body = self.parse_block()?;
                Ok(ObjectMember::Method(ObjectMethod {
                    kind,
                    key: Box::new(key),
                    params,
                    body,
                    computed,
                    generator,
                    is_async: false,
                    meta: self.finish_node(),
                }))
            }
            Token::Comma | Token::RBrace
                if kind == MethodKind::Method && !generator && !computed =>
            {
                // shorthand: value is the key itself
                let id = match key {
                    Expr::Ident(id) => id,
                    other => {
                        let span = other.meta().span;
                        return Err(
                            self.reject(SyntaxError::InvalidPattern(other.kind_name().into()), span)
                        );
                    }
                };
                Ok(ObjectMember::Property(ObjectProperty {
                    key: Box::new(Expr::Ident(id.clone())),
                    value: PropertyValue::Expr(Box::new(Expr::Ident(id))),
                    computed: false,
                    shorthand: true,
                    meta: self.finish_node(),
                }))
            }
            _ => Err(self.unexpected_current()),
        }
    }

    /// A member key: `[expr]`, an identifier, or a keyword used as an
    /// identifier.
    fn parse_member_key(&mut self) -> Result<(Expr, bool), SyntaxError> {
        let token = self.current()?.token;
        match token {
            Token::LBracket => {
                self.advance();
                let key = self.parse_expr(ExprFlags::all().no_sequence())?;
                self.expect(Token::RBracket)?;
                Ok((key, true))
            }
            Token::Ident(_) => Ok((Expr::Ident(self.parse_ident()?), false)),
            _ => Ok((Expr::Ident(self.keyword_as_ident()?), false)),
        }
    }

    /// Convert the current keyword token into an identifier node. Fails
    /// with `Token K is not a keyword` for anything else.
    pub(crate) fn keyword_as_ident(&mut self) -> Result<Ident, SyntaxError> {
        let tws = *self.current()?;
        if !tws.token.is_keyword() {
            let err = SyntaxError::NotAKeyword(tws.token.to_string());
            return Err(self.reject(err, Some(tws.span)));
        }
        self.start_node();
        self.advance();
        Ok(Ident {
            name: Symbol::intern(tws.token.name()),
            meta: self.finish_node(),
        })
    }

    /// True when the current token can be a (non-computed) member key:
    /// an identifier or a keyword.
    fn member_key_follows(&self) -> bool {
        match self.current() {
            Ok(tws) => matches!(tws.token, Token::Ident(_)) || tws.token.is_keyword(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_expression, ParseOptions};

    fn parse_object(source: &str) -> ObjectExpr {
        match parse_expression(source, ParseOptions::default()).unwrap() {
            Expr::Object(object) => object,
            other => panic!("expected object, got {}", other.kind_name()),
        }
    }

    fn parse_err(source: &str) -> String {
        parse_expression(source, ParseOptions::default())
            .unwrap_err()
            .to_string()
    }

    fn property(member: &ObjectMember) -> &ObjectProperty {
        match member {
            ObjectMember::Property(prop) => prop,
            other => panic!("expected property, got {}", other.kind_name()),
        }
    }

    fn method(member: &ObjectMember) -> &ObjectMethod {
        match member {
            ObjectMember::Method(m) => m,
            other => panic!("expected method, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_plain_property() {
        let object = parse_object("({ a: 1 })");
        let prop = property(&object.members[0]);
        assert!(!prop.shorthand);
        assert!(!prop.computed);
        assert!(matches!(
            prop.value,
            PropertyValue::Expr(ref e) if matches!(**e, Expr::Number(_))
        ));
    }

    #[test]
    fn test_keyword_key() {
        let object = parse_object("({ default: 1, new: 2 })");
        let prop = property(&object.members[0]);
        let Expr::Ident(key) = prop.key.as_ref() else {
            panic!("expected identifier key");
        };
        assert_eq!(key.name.as_str(), "default");
    }

    #[test]
    fn test_number_key_is_rejected() {
        assert_eq!(parse_err("({ 1: 2 })"), "Token 1 is not a keyword");
    }

    #[test]
    fn test_computed_key() {
        let object = parse_object("({ [a + 1]: 2 })");
        let prop = property(&object.members[0]);
        assert!(prop.computed);
        assert!(matches!(*prop.key, Expr::Binary(_)));
    }

    #[test]
    fn test_shorthand_property() {
        let object = parse_object("({ a, b })");
        let prop = property(&object.members[0]);
        assert!(prop.shorthand);
        let PropertyValue::Expr(value) = &prop.value else {
            panic!("expected expression value");
        };
        assert!(matches!(**value, Expr::Ident(_)));
    }

    #[test]
    fn test_shorthand_default() {
        let object = parse_object("({ a = 1 })");
        let prop = property(&object.members[0]);
        assert!(prop.shorthand);
        assert!(matches!(
            prop.value,
            PropertyValue::Pattern(ref p) if matches!(**p, Pat::Assign(_))
        ));
    }

    #[test]
    fn test_method() {
        let object = parse_object("({ run(a, b) { return a } })");
        let m = method(&object.members[0]);
        assert_eq!(m.kind, MethodKind::Method);
        assert_eq!(m.params.len(), 2);
        assert!(!m.generator);
    }

    #[test]
    fn test_generator_method() {
        let object = parse_object("({ *items() { yield 1 } })");
        let m = method(&object.members[0]);
        assert!(m.generator);
    }

    #[test]
    fn test_getter_and_setter() {
        let object = parse_object("({ get size() { return 1 }, set size(v) { } })");
        let getter = method(&object.members[0]);
        assert_eq!(getter.kind, MethodKind::Get);
        assert_eq!(getter.params.len(), 0);
        let Expr::Ident(key) = getter.key.as_ref() else {
            panic!("expected identifier key");
        };
        assert_eq!(key.name.as_str(), "size");

        let setter = method(&object.members[1]);
        assert_eq!(setter.kind, MethodKind::Set);
        assert_eq!(setter.params.len(), 1);
    }

    #[test]
    fn test_get_as_plain_key() {
        let object = parse_object("({ get: 1, set: 2 })");
        assert_eq!(object.members.len(), 2);
        assert!(matches!(object.members[0], ObjectMember::Property(_)));
    }

    #[test]
    fn test_get_as_shorthand() {
        let object = parse_object("({ get })");
        let prop = property(&object.members[0]);
        assert!(prop.shorthand);
    }

    #[test]
    fn test_getter_requires_parameter_list() {
        assert_eq!(parse_err("({ get size: 1 })"), "Unexpected token :, expected (");
    }

    #[test]
    fn test_spread_member() {
        let object = parse_object("({ a: 1, ...rest })");
        assert!(matches!(object.members[1], ObjectMember::Spread(_)));
    }

    #[test]
    fn test_trailing_comma_flag() {
        let object = parse_object("({ a: 1, b: 2, })");
        assert_eq!(object.members.len(), 2);
        assert!(object.members[1].meta().trailing_comma);
        assert!(!object.members[0].meta().trailing_comma);
    }

    #[test]
    fn test_empty_object() {
        let object = parse_object("({})");
        assert!(object.members.is_empty());
    }
}
