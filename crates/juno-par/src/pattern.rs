//! Expression-to-pattern rewriter.
//!
//! The grammar is ambiguous between expressions and destructuring
//! patterns, so the parser speculatively builds expression trees and
//! reinterprets them when context demands a binding pattern: function
//! parameters, variable declarators, assignment left-hand sides and arrow
//! parameter lists.
//!
//! The rewrite is structural and ownership-disciplined: [`to_pattern`]
//! consumes the expression and returns a freshly shaped [`Pat`]. An
//! identifier maps to itself, so rewriting is idempotent on anything that
//! is already pattern-shaped; nested values that were already rewritten
//! (an [`AssignTarget::Pattern`], a pattern-valued property) pass through
//! untouched. Node metadata, the trailing-comma flag included, is carried
//! across.
//!
//! Validation happens during the rewrite: a rest element must be the last
//! element of its pattern and must not carry a trailing comma, nested
//! assignments must use plain `=`, and object methods cannot appear in a
//! pattern at all.

use crate::ast::*;
use crate::error::SyntaxError;
use crate::Parser;

/// Rewrite an expression into a binding pattern.
pub(crate) fn to_pattern(expr: Expr) -> Result<Pat, SyntaxError> {
    match expr {
        Expr::Ident(id) => Ok(Pat::Ident(id)),

        Expr::Assignment(assign) => {
            if assign.op != AssignOp::Assign {
                return Err(SyntaxError::InvalidAssignmentPatternOperator(
                    assign.op.as_str().into(),
                ));
            }
            let left = match assign.left {
                AssignTarget::Pattern(pattern) => *pattern,
                AssignTarget::Expr(expr) => to_pattern(*expr)?,
            };
            Ok(Pat::Assign(AssignPat {
                left: Box::new(left),
                right: assign.right,
                meta: assign.meta,
            }))
        }

        Expr::Array(array) => {
            let len = array.elements.len();
            let mut elements = Vec::with_capacity(len);
            for (index, element) in array.elements.into_iter().enumerate() {
                let element = match element {
                    None => None,
                    Some(Expr::Spread(spread)) => {
                        if index + 1 != len {
                            return Err(SyntaxError::RestNotLastInPattern);
                        }
                        if spread.meta.trailing_comma {
                            return Err(SyntaxError::RestTrailingComma);
                        }
                        Some(Pat::Rest(RestElement {
                            argument: Box::new(to_pattern(*spread.argument)?),
                            meta: spread.meta,
                        }))
                    }
                    Some(other) => Some(to_pattern(other)?),
                };
                elements.push(element);
            }
            Ok(Pat::Array(ArrayPat {
                elements,
                meta: array.meta,
            }))
        }

        Expr::Object(object) => {
            let len = object.members.len();
            let mut members = Vec::with_capacity(len);
            for (index, member) in object.members.into_iter().enumerate() {
                match member {
                    ObjectMember::Spread(spread) => {
                        if index + 1 != len {
                            return Err(SyntaxError::RestNotLastInPattern);
                        }
                        if spread.meta.trailing_comma {
                            return Err(SyntaxError::RestTrailingComma);
                        }
                        members.push(ObjectMember::Rest(RestElement {
                            argument: Box::new(to_pattern(*spread.argument)?),
                            meta: spread.meta,
                        }));
                    }
                    ObjectMember::Rest(rest) => {
                        if index + 1 != len {
                            return Err(SyntaxError::RestNotLastInPattern);
                        }
                        members.push(ObjectMember::Rest(rest));
                    }
                    ObjectMember::Property(mut property) => {
                        property.value = match property.value {
                            PropertyValue::Expr(value) => {
                                PropertyValue::Pattern(Box::new(to_pattern(*value)?))
                            }
                            pattern @ PropertyValue::Pattern(_) => pattern,
                        };
                        members.push(ObjectMember::Property(property));
                    }
                    ObjectMember::Method(_) => {
                        return Err(SyntaxError::InvalidPattern("ObjectMethod".into()));
                    }
                }
            }
            Ok(Pat::Object(ObjectPat {
                members,
                meta: object.meta,
            }))
        }

        Expr::Spread(spread) => Ok(Pat::Rest(RestElement {
            argument: Box::new(to_pattern(*spread.argument)?),
            meta: spread.meta,
        })),

        other => Err(SyntaxError::InvalidPattern(other.kind_name().into())),
    }
}

impl<'a> Parser<'a> {
    /// Rewrite an expression to a pattern, attaching a source-pointer
    /// diagnostic on failure.
    pub(crate) fn expr_to_pattern(&mut self, expr: Expr) -> Result<Pat, SyntaxError> {
        let span = expr.meta().span;
        to_pattern(expr).map_err(|err| self.reject(err, span))
    }

    /// Rewrite a parameter list. Rest placement errors here use the
    /// parameter-list wording rather than the destructuring one.
    pub(crate) fn params_from_exprs(&mut self, exprs: Vec<Expr>) -> Result<Vec<Pat>, SyntaxError> {
        let len = exprs.len();
        let mut params = Vec::with_capacity(len);
        for (index, expr) in exprs.into_iter().enumerate() {
            let span = expr.meta().span;
            if matches!(expr, Expr::Spread(_)) {
                if index + 1 != len {
                    return Err(self.reject(SyntaxError::RestNotLastInParams, span));
                }
                if expr.meta().trailing_comma {
                    return Err(self.reject(SyntaxError::RestTrailingComma, span));
                }
            }
            let param = to_pattern(expr).map_err(|err| self.reject(err, span))?;
            params.push(param);
        }
        Ok(params)
    }

    /// Classify an assignment left-hand side. Destructuring-shaped sides
    /// are rewritten to patterns; everything else is carried as an
    /// expression, unvalidated.
    pub(crate) fn assignment_target(&mut self, expr: Expr) -> Result<AssignTarget, SyntaxError> {
        match expr {
            Expr::Ident(id) => Ok(AssignTarget::Pattern(Box::new(Pat::Ident(id)))),
            Expr::Array(_) | Expr::Object(_) | Expr::Spread(_) => {
                let span = expr.meta().span;
                let pattern = to_pattern(expr).map_err(|err| self.reject(err, span))?;
                Ok(AssignTarget::Pattern(Box::new(pattern)))
            }
            other => Ok(AssignTarget::Expr(Box::new(other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, parse_expression, ParseOptions};
    use juno_util::Symbol;

    fn ident(name: &str) -> Expr {
        Expr::Ident(Ident {
            name: Symbol::intern(name),
            meta: NodeMeta::default(),
        })
    }

    fn parse_err(source: &str) -> String {
        parse(source, ParseOptions::default())
            .unwrap_err()
            .to_string()
    }

    // =========================================================================
    // REWRITE RULES
    // =========================================================================

    #[test]
    fn test_identifier_maps_to_itself() {
        let pat = to_pattern(ident("x")).unwrap();
        let Pat::Ident(id) = pat else {
            panic!("expected identifier pattern");
        };
        assert_eq!(id.name.as_str(), "x");
    }

    #[test]
    fn test_rewrite_is_idempotent_on_identifiers() {
        // Rewriting the same shape twice produces the same pattern.
        let once = to_pattern(ident("x")).unwrap();
        let twice = to_pattern(ident("x")).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_assignment_becomes_default_pattern() {
        let expr = parse_expression("x = 1", ParseOptions::default()).unwrap();
        let pat = to_pattern(expr).unwrap();
        let Pat::Assign(assign) = pat else {
            panic!("expected assignment pattern");
        };
        assert!(matches!(*assign.left, Pat::Ident(_)));
        assert!(matches!(*assign.right, Expr::Number(_)));
    }

    #[test]
    fn test_compound_assignment_is_rejected() {
        let expr = parse_expression("x += 1", ParseOptions::default()).unwrap();
        let err = to_pattern(expr).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid assignment pattern operator +=, expected ="
        );
    }

    #[test]
    fn test_array_with_hole_and_rest() {
        let expr = parse_expression("[a, , ...rest]", ParseOptions::default()).unwrap();
        let Pat::Array(array) = to_pattern(expr).unwrap() else {
            panic!("expected array pattern");
        };
        assert!(matches!(array.elements[0], Some(Pat::Ident(_))));
        assert!(array.elements[1].is_none());
        assert!(matches!(array.elements[2], Some(Pat::Rest(_))));
    }

    #[test]
    fn test_nested_destructuring() {
        let expr = parse_expression("[{a}, [b]]", ParseOptions::default()).unwrap();
        let Pat::Array(array) = to_pattern(expr).unwrap() else {
            panic!("expected array pattern");
        };
        assert!(matches!(array.elements[0], Some(Pat::Object(_))));
        assert!(matches!(array.elements[1], Some(Pat::Array(_))));
    }

    #[test]
    fn test_object_property_value_becomes_pattern() {
        let expr = parse_expression("({a: b})", ParseOptions::default()).unwrap();
        let Pat::Object(object) = to_pattern(expr).unwrap() else {
            panic!("expected object pattern");
        };
        let ObjectMember::Property(prop) = &object.members[0] else {
            panic!("expected property");
        };
        assert!(matches!(prop.value, PropertyValue::Pattern(_)));
    }

    #[test]
    fn test_object_method_is_rejected() {
        let expr = parse_expression("({run() {}})", ParseOptions::default()).unwrap();
        let err = to_pattern(expr).unwrap_err();
        assert_eq!(err.to_string(), "Invalid pattern ObjectMethod");
    }

    #[test]
    fn test_top_level_spread_becomes_rest() {
        let expr = parse_expression("[...xs]", ParseOptions::default()).unwrap();
        let Pat::Array(array) = to_pattern(expr).unwrap() else {
            panic!("expected array pattern");
        };
        assert!(matches!(array.elements[0], Some(Pat::Rest(_))));
    }

    #[test]
    fn test_unrewritable_kinds_name_themselves() {
        for (source, kind) in [
            ("a + b", "BinaryExpression"),
            ("f()", "CallExpression"),
            ("a.b", "MemberExpression"),
            ("a ? b : c", "ConditionalExpression"),
            ("42", "NumericLiteral"),
        ] {
            let expr = parse_expression(source, ParseOptions::default()).unwrap();
            let err = to_pattern(expr).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid pattern {kind}"));
        }
    }

    // =========================================================================
    // REST PLACEMENT
    // =========================================================================

    #[test]
    fn test_rest_must_be_last_in_array_pattern() {
        let err = parse_err("const [...a, b] = x;");
        assert_eq!(
            err,
            "A rest element must be last in a destructuring pattern"
        );
    }

    #[test]
    fn test_rest_must_be_last_in_object_pattern() {
        let err = parse_err("const {...a, b} = x;");
        assert_eq!(
            err,
            "A rest element must be last in a destructuring pattern"
        );
    }

    #[test]
    fn test_rest_trailing_comma_in_pattern() {
        let err = parse_err("const [...a, ] = x;");
        assert_eq!(err, "A rest element cannot have a trailing comma");
    }

    #[test]
    fn test_rest_trailing_comma_in_params() {
        let err = parse_err("function f(...a, ) {}");
        assert_eq!(err, "A rest element cannot have a trailing comma");
    }

    #[test]
    fn test_trailing_comma_after_plain_element_is_fine() {
        assert!(parse("const [a, b, ] = x;", ParseOptions::default()).is_ok());
    }

    // =========================================================================
    // METADATA CARRY-OVER
    // =========================================================================

    #[test]
    fn test_meta_carried_across_rewrite() {
        let expr = parse_expression("[a, b]", ParseOptions::default()).unwrap();
        let span_before = expr.meta().span.unwrap();
        let pat = to_pattern(expr).unwrap();
        assert_eq!(pat.meta().span.unwrap(), span_before);
    }

    #[test]
    fn test_assignment_target_classification() {
        // identifier and destructuring go to patterns, member stays an
        // expression
        let expr = parse_expression("x = 1", ParseOptions::default()).unwrap();
        let Expr::Assignment(assign) = expr else {
            panic!("expected assignment");
        };
        assert!(matches!(assign.left, AssignTarget::Pattern(_)));

        let expr = parse_expression("x.y = 1", ParseOptions::default()).unwrap();
        let Expr::Assignment(assign) = expr else {
            panic!("expected assignment");
        };
        assert!(matches!(assign.left, AssignTarget::Expr(_)));
    }
}
