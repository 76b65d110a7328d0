//! Expression parsing
//!
//! Binary, ternary and assignment operators are handled by one precedence
//! climbing loop driven by the table in [`crate::full::precedence`]. Each
//! iteration folds one operator into the left operand; recursion happens
//! only for the right operand, at the next tighter level.
//!
//! ```text
//! unary   ::= prefix_op unary | '(' type ')' unary | postfix
//! postfix ::= primary ( '(' args? ')' | '[' expr ']' | '++' | '--' )*
//! primary ::= name | literal | '(' expr ')'
//! ```
//!
//! The false branch of `?:` is parsed at assignment level, so
//! `a = b ? c : d = e` groups as `a = (b ? c : (d = e))`.

use crate::ast::{Expression, Literal, LiteralKind, Type};
use crate::error::SyntaxError;
use crate::full::lexer::FullKind;
use crate::full::parser::Parser;
use crate::full::precedence::{self, Infix, Level, ASSIGNMENT};

impl<'src> Parser<'src> {
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, SyntaxError> {
        self.parse_expression_at(ASSIGNMENT)
    }

    fn parse_expression_at(&mut self, min_level: Level) -> Result<Expression, SyntaxError> {
        let start = self.start();
        let mut left = self.parse_unary()?;

        while let Some((infix, width)) = precedence::peek_infix(&self.cursor) {
            let level = infix.level();
            if level < min_level {
                break;
            }
            for _ in 0..width {
                self.cursor.advance();
            }

            left = match infix {
                Infix::Assign(op) => {
                    let value = self.parse_expression_at(ASSIGNMENT)?;
                    Expression::Assignment {
                        op,
                        target: Box::new(left),
                        value: Box::new(value),
                        span: self.span_from(start),
                    }
                }
                Infix::Ternary => {
                    let then_expr = self.parse_expression()?;
                    self.cursor.expect_token(FullKind::Colon)?;
                    let else_expr = self.parse_expression_at(ASSIGNMENT)?;
                    Expression::Ternary {
                        condition: Box::new(left),
                        then_expr: Box::new(then_expr),
                        else_expr: Box::new(else_expr),
                        span: self.span_from(start),
                    }
                }
                Infix::Binary(op) => {
                    let right = self.parse_expression_at(level + 1)?;
                    Expression::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                        span: self.span_from(start),
                    }
                }
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.start();

        if let Some(op) = precedence::prefix_op(self.cursor.peek_kind()) {
            self.cursor.advance();
            let operand = self.parse_unary()?;
            return Ok(Expression::Unary {
                op,
                operand: Box::new(operand),
                span: self.span_from(start),
            });
        }

        if self.cursor.check(FullKind::LeftParen) {
            if let Some(target_type) = self.try_parse_cast_type() {
                let operand = self.parse_unary()?;
                return Ok(Expression::Cast {
                    target_type,
                    operand: Box::new(operand),
                    span: self.span_from(start),
                });
            }
        }

        self.parse_postfix()
    }

    /// Consume `'(' type ')'` if it reads as a cast, otherwise leave the
    /// cursor on the `(`.
    ///
    /// Primitive, generic and array types always make a cast. A plain name
    /// in parentheses is a cast only when an operand follows directly;
    /// `(x) - y` stays a subtraction.
    fn try_parse_cast_type(&mut self) -> Option<Type> {
        let saved_pos = self.cursor.position();
        self.cursor.advance();

        let primitive = self.cursor.peek_kind().primitive().is_some();
        let target_type = match self.parse_type() {
            Ok(ty) if self.cursor.match_token(FullKind::RightParen) => ty,
            _ => {
                self.cursor.rewind(saved_pos);
                return None;
            }
        };

        let plain_name = matches!(
            &target_type,
            Type::Named { arguments, .. } if arguments.is_empty()
        );
        if primitive || !plain_name || self.at_cast_operand() {
            Some(target_type)
        } else {
            self.cursor.rewind(saved_pos);
            None
        }
    }

    fn at_cast_operand(&self) -> bool {
        let kind = self.cursor.peek_kind();
        kind.is_literal()
            || matches!(
                kind,
                FullKind::Identifier | FullKind::LeftParen | FullKind::Bang | FullKind::Tilde
            )
    }

    /// Calls, indexing and postfix `++`/`--`, applied left to right.
    fn parse_postfix(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.start();
        let mut expr = self.parse_primary()?;

        loop {
            if self.cursor.match_token(FullKind::LeftParen) {
                let arguments = self.parse_arguments()?;
                self.cursor.expect_token(FullKind::RightParen)?;
                expr = Expression::Invoke {
                    callee: Box::new(expr),
                    arguments,
                    span: self.span_from(start),
                };
            } else if self.cursor.match_token(FullKind::LeftBracket) {
                let index = self.parse_expression()?;
                self.cursor.expect_token(FullKind::RightBracket)?;
                expr = Expression::Index {
                    target: Box::new(expr),
                    index: Box::new(index),
                    span: self.span_from(start),
                };
            } else if let Some(op) = precedence::postfix_op(self.cursor.peek_kind()) {
                self.cursor.advance();
                expr = Expression::PostfixIncDec {
                    op,
                    operand: Box::new(expr),
                    span: self.span_from(start),
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expression>, SyntaxError> {
        let mut arguments = Vec::new();

        if self.cursor.check(FullKind::RightParen) {
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_expression()?);
            if !self.cursor.match_token(FullKind::Comma) {
                break;
            }
        }

        Ok(arguments)
    }

    fn parse_primary(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.start();
        let token = self.cursor.peek();

        if token.kind == FullKind::Identifier {
            let name = self.parse_name()?;
            return Ok(Expression::Name {
                name,
                span: self.span_from(start),
            });
        }

        if let Some(kind) = literal_kind(token.kind) {
            self.cursor.advance();
            return Ok(Expression::Literal {
                literal: Literal {
                    kind,
                    text: token.text.to_string(),
                },
                span: token.span,
            });
        }

        if self.cursor.match_token(FullKind::LeftParen) {
            let inner = self.parse_expression()?;
            self.cursor.expect_token(FullKind::RightParen)?;
            return Ok(Expression::Parenthesized {
                inner: Box::new(inner),
                span: self.span_from(start),
            });
        }

        Err(self.cursor.error_expected("expression"))
    }
}

fn literal_kind(kind: FullKind) -> Option<LiteralKind> {
    let literal = match kind {
        FullKind::IntegerLiteral => LiteralKind::Integer,
        FullKind::FloatLiteral => LiteralKind::Float,
        FullKind::BooleanLiteral => LiteralKind::Boolean,
        FullKind::CharLiteral => LiteralKind::Character,
        FullKind::StringLiteral => LiteralKind::String,
        FullKind::NullLiteral => LiteralKind::Null,
        FullKind::NodeMarker => LiteralKind::NodeMarker,
        FullKind::SignalMarker => LiteralKind::SignalMarker,
        _ => return None,
    };
    Some(literal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Span;

    fn parse(source: &str) -> Expression {
        let mut parser = Parser::new(source).unwrap();
        parser.parse_condition().unwrap()
    }

    fn sexpr(source: &str) -> String {
        parse(source).to_string()
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        assert_eq!(sexpr("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(sexpr("(1 + 2) * 3"), "(* (paren (+ 1 2)) 3)");
    }

    #[test]
    fn test_assignment_through_ternary_else() {
        assert_eq!(sexpr("a = b ? c : d = e"), "(= a (? b c (= d e)))");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(sexpr("a = b += c"), "(= a (+= b c))");
    }

    #[test]
    fn test_ternary_is_right_associative() {
        assert_eq!(sexpr("a ? b : c ? d : e"), "(? a b (? c d e))");
        assert_eq!(sexpr("a || b ? x = 1 : y"), "(? (|| a b) (= x 1) y)");
    }

    #[test]
    fn test_same_level_is_left_associative() {
        assert_eq!(sexpr("a * b * c"), "(* (* a b) c)");
        assert_eq!(sexpr("a && b && c"), "(&& (&& a b) c)");
    }

    #[test]
    fn test_every_binary_operator_has_its_own_level() {
        assert_eq!(sexpr("a - b + c"), "(- a (+ b c))");
        assert_eq!(sexpr("a + b - c"), "(- (+ a b) c)");
        assert_eq!(sexpr("a == b != c"), "(== a (!= b c))");
        assert_eq!(sexpr("a / b * c"), "(/ a (* b c))");
    }

    #[test]
    fn test_logical_and_bitwise_ladder() {
        assert_eq!(
            sexpr("a || b && c | d ^ e & f"),
            "(|| a (&& b (| c (^ d (& e f)))))"
        );
    }

    #[test]
    fn test_shift_operators() {
        assert_eq!(sexpr("a << 2 + b"), "(<< a (+ 2 b))");
        assert_eq!(sexpr("a >> b < c"), "(< (>> a b) c)");
        assert_eq!(sexpr("x <<= 1"), "(<<= x 1)");
    }

    #[test]
    fn test_split_shift_is_rejected() {
        let mut parser = Parser::new("a < < b").unwrap();
        let err = parser.parse_condition().unwrap_err();
        assert_eq!(err.expected(), "expression");
        assert_eq!(err.location().column, 5);
    }

    #[test]
    fn test_prefix_operators() {
        assert_eq!(sexpr("-a * !b"), "(* (- a) (! b))");
        assert_eq!(sexpr("~--x"), "(~ (-- x))");
        assert_eq!(sexpr("-a++"), "(- (post++ a))");
    }

    #[test]
    fn test_casts() {
        assert_eq!(sexpr("(int)x"), "(cast int x)");
        assert_eq!(sexpr("(int)x + 1"), "(+ (cast int x) 1)");
        assert_eq!(sexpr("(Foo)x"), "(cast Foo x)");
        assert_eq!(sexpr("(List<int>)-y"), "(cast List<int> (- y))");
        assert_eq!(sexpr("(float64[])data"), "(cast float64[] data)");
    }

    #[test]
    fn test_parenthesized_names_are_not_casts() {
        assert_eq!(sexpr("(x)"), "(paren x)");
        assert_eq!(sexpr("(x) - y"), "(- (paren x) y)");
        assert_eq!(sexpr("(a < b)"), "(paren (< a b))");
        assert_eq!(sexpr("(a[0])"), "(paren (index a 0))");
    }

    #[test]
    fn test_parenthesized_callee_reads_as_cast() {
        assert_eq!(sexpr("(f)(1)"), "(cast f (paren 1))");
        assert_eq!(sexpr("(f.g)(x)"), "(cast f.g (paren x))");
        assert_eq!(sexpr("f(1)"), "(call f 1)");
    }

    #[test]
    fn test_postfix_chains_left_to_right() {
        assert_eq!(sexpr("a[0]++"), "(post++ (index a 0))");
        assert_eq!(sexpr("f(a,b)[0]"), "(index (call f a b) 0)");
        assert_eq!(sexpr("f()(1)--"), "(post-- (call (call f) 1))");
    }

    #[test]
    fn test_dotted_names_and_markers() {
        assert_eq!(sexpr("story.flags.seen(@node, @sig)"), "(call story.flags.seen @node @sig)");
    }

    #[test]
    fn test_literal_kinds() {
        let kinds: Vec<_> = ["1", "1.5", "true", "'c'", "\"s\"", "null", "@node", "@sig"]
            .iter()
            .map(|source| match parse(source) {
                Expression::Literal { literal, .. } => literal.kind,
                other => panic!("expected literal, got {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                LiteralKind::Integer,
                LiteralKind::Float,
                LiteralKind::Boolean,
                LiteralKind::Character,
                LiteralKind::String,
                LiteralKind::Null,
                LiteralKind::NodeMarker,
                LiteralKind::SignalMarker,
            ]
        );
    }

    #[test]
    fn test_spans_cover_operands() {
        let source = "  foo(1) + bar[2]";
        let expr = parse(source);
        assert_eq!(expr.span(), Span::new(2, source.len()));
        if let Expression::Binary { left, right, .. } = expr {
            assert_eq!(&source[left.span().start..left.span().end], "foo(1)");
            assert_eq!(&source[right.span().start..right.span().end], "bar[2]");
        } else {
            panic!("expected binary expression");
        }
    }

    #[test]
    fn test_missing_operand() {
        let mut parser = Parser::new("a +").unwrap();
        let err = parser.parse_condition().unwrap_err();
        assert!(err.is_incomplete_input());
        assert_eq!(err.expected(), "expression");
    }

    #[test]
    fn test_missing_ternary_colon() {
        let mut parser = Parser::new("a ? b c").unwrap();
        let err = parser.parse_condition().unwrap_err();
        assert_eq!(err.expected(), "':'");
    }
}
