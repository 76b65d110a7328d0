//! Statement parsing
//!
//! ```text
//! statement ::= '{' statement+ '}'
//!             | 'if' '(' expr ')' statement ('else' statement)?
//!             | 'switch' '(' expr ')' '{' switch_label* '}'
//!             | 'break' ';'
//!             | type IDENTIFIER ('=' expr)? ';'
//!             | expr ';'
//! switch_label ::= ('case' expr | 'default') ':' statement*
//! ```
//!
//! A compound statement needs at least one inner statement, while a
//! scheduled-block body may be empty. An `else` always belongs to the
//! nearest `if` without one.

use crate::ast::{CaseLabel, Statement, SwitchCase};
use crate::block::{self, CloseAhead};
use crate::error::SyntaxError;
use crate::full::lexer::FullKind;
use crate::full::parser::Parser;

impl<'src> Parser<'src> {
    /// Statements up to the close delimiter of the enclosing scheduled
    /// block, which is only looked for between statements.
    pub(crate) fn parse_block_body(&mut self) -> Result<Vec<Statement>, SyntaxError> {
        let mut statements = Vec::new();

        while !self.cursor.is_at_end() && block::close_ahead(&self.cursor) == CloseAhead::No {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    pub(crate) fn parse_statement(&mut self) -> Result<Statement, SyntaxError> {
        match self.cursor.peek_kind() {
            FullKind::LeftBrace => self.parse_compound_statement(),
            FullKind::If => self.parse_if_statement(),
            FullKind::Switch => self.parse_switch_statement(),
            FullKind::Break => {
                let start = self.start();
                self.cursor.advance();
                self.cursor.expect_token(FullKind::Semicolon)?;
                Ok(Statement::Break {
                    span: self.span_from(start),
                })
            }
            _ if self.at_declaration() => self.parse_declaration(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_compound_statement(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.start();
        self.cursor.expect_token(FullKind::LeftBrace)?;

        if self.cursor.check(FullKind::RightBrace) {
            return Err(self.cursor.error_expected("statement"));
        }

        let mut statements = Vec::new();
        while !self.cursor.check(FullKind::RightBrace) && !self.cursor.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        self.cursor.expect_token(FullKind::RightBrace)?;

        Ok(Statement::Compound {
            statements,
            span: self.span_from(start),
        })
    }

    fn parse_if_statement(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.start();
        self.cursor.expect_token(FullKind::If)?;

        self.cursor.expect_token(FullKind::LeftParen)?;
        let condition = self.parse_expression()?;
        self.cursor.expect_token(FullKind::RightParen)?;

        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.cursor.match_token(FullKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
            span: self.span_from(start),
        })
    }

    fn parse_switch_statement(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.start();
        self.cursor.expect_token(FullKind::Switch)?;

        self.cursor.expect_token(FullKind::LeftParen)?;
        let selector = self.parse_expression()?;
        self.cursor.expect_token(FullKind::RightParen)?;
        self.cursor.expect_token(FullKind::LeftBrace)?;

        let mut cases = Vec::new();
        while !self.cursor.check(FullKind::RightBrace) {
            cases.push(self.parse_switch_case()?);
        }
        self.cursor.expect_token(FullKind::RightBrace)?;

        Ok(Statement::Switch {
            selector,
            cases,
            span: self.span_from(start),
        })
    }

    fn parse_switch_case(&mut self) -> Result<SwitchCase, SyntaxError> {
        let start = self.start();

        let label = if self.cursor.match_token(FullKind::Case) {
            CaseLabel::Case(self.parse_expression()?)
        } else if self.cursor.match_token(FullKind::Default) {
            CaseLabel::Default
        } else {
            return Err(self.cursor.error_expected("'case', 'default' or '}'"));
        };
        self.cursor.expect_token(FullKind::Colon)?;

        // Statements run until the next label; none at all is fine.
        let mut statements = Vec::new();
        while !matches!(
            self.cursor.peek_kind(),
            FullKind::Case | FullKind::Default | FullKind::RightBrace | FullKind::Eof
        ) {
            statements.push(self.parse_statement()?);
        }

        Ok(SwitchCase {
            label,
            statements,
            span: self.span_from(start),
        })
    }

    fn parse_declaration(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.start();

        let var_type = self.parse_type()?;
        let name = self.cursor.expect_identifier()?.to_string();
        let init = if self.cursor.match_token(FullKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.cursor.expect_token(FullKind::Semicolon)?;

        Ok(Statement::Declaration {
            var_type,
            name,
            init,
            span: self.span_from(start),
        })
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.start();
        let expr = self.parse_expression()?;
        self.cursor.expect_token(FullKind::Semicolon)?;
        Ok(Statement::Expression {
            expr,
            span: self.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{CaseLabel, Statement};
    use crate::error::RoutineError;
    use crate::full::parse;

    fn body(source: &str) -> Vec<Statement> {
        let program = parse(&format!("<- {source} ->")).unwrap();
        program.blocks.into_iter().next().unwrap().body
    }

    fn rendered(source: &str) -> Vec<String> {
        body(source).iter().map(ToString::to_string).collect()
    }

    fn syntax_error(source: &str) -> crate::error::SyntaxError {
        match parse(&format!("<- {source} ->")).unwrap_err() {
            RoutineError::Syntax(err) => err,
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_dangling_else_binds_to_inner_if() {
        assert_eq!(
            rendered("if (a) if (b) x; else y;"),
            vec!["(if a (if b x; else y;))"]
        );
    }

    #[test]
    fn test_else_after_compound_binds_to_outer_if() {
        assert_eq!(
            rendered("if (a) { if (b) x; } else y;"),
            vec!["(if a { (if b x;) } else y;)"]
        );
    }

    #[test]
    fn test_switch_cases() {
        let statements = body("switch (n) { case 1: case 2: x = 1; break; default: }");
        let Statement::Switch { cases, .. } = &statements[0] else {
            panic!("expected switch");
        };
        assert_eq!(cases.len(), 3);
        assert!(cases[0].statements.is_empty());
        assert_eq!(cases[1].statements.len(), 2);
        assert_eq!(cases[2].label, CaseLabel::Default);
        assert!(cases[2].statements.is_empty());
    }

    #[test]
    fn test_empty_switch() {
        assert_eq!(rendered("switch (n) { }"), vec!["(switch n)"]);
    }

    #[test]
    fn test_statement_before_first_label() {
        let err = syntax_error("switch (n) { x; }");
        assert_eq!(err.expected(), "'case', 'default' or '}'");
    }

    #[test]
    fn test_declarations() {
        assert_eq!(
            rendered("int x = 1; Map<string, int[]> m; story.Node n = @node; x = 2;"),
            vec![
                "(decl int x 1)",
                "(decl Map<string, int[]> m)",
                "(decl story.Node n @node)",
                "(= x 2);",
            ]
        );
    }

    #[test]
    fn test_generic_shaped_comparison_is_a_declaration() {
        assert_eq!(rendered("a < b > c;"), vec!["(decl a<b> c)"]);
        assert_eq!(rendered("a < b;"), vec!["(< a b);"]);
    }

    #[test]
    fn test_index_assignment_is_an_expression() {
        assert_eq!(rendered("a[0] = 1;"), vec!["(= (index a 0) 1);"]);
    }

    #[test]
    fn test_empty_compound_is_rejected() {
        let err = syntax_error("{ }");
        assert_eq!(err.expected(), "statement");
    }

    #[test]
    fn test_nested_compound() {
        assert_eq!(rendered("{ { break; } x++; }"), vec!["{ { break; } (post++ x); }"]);
    }

    #[test]
    fn test_dash_inside_expression_does_not_close_block() {
        assert_eq!(rendered("x = a - b > c;"), vec!["(= x (> (- a b) c));"]);
    }

    #[test]
    fn test_missing_semicolon() {
        let err = syntax_error("break");
        assert_eq!(err.expected(), "';'");
    }

    #[test]
    fn test_unclosed_if_condition() {
        let err = syntax_error("if (a x;");
        assert_eq!(err.expected(), "')'");
    }
}
