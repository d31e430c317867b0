//! Expression parsing, one method per precedence tier.
//!
//! Precedence low to high: equality, comparison, term, factor, primary.
//! Every binary operator is left-associative. The grammar has no prefix
//! operators: `-1` is not a signed literal and there is no unary minus, so
//! negative numbers can only arise from arithmetic.

use super::ast::{AstNode, BinOp};
use super::lexer::TokenKind;
use super::parse::{ParseError, Parser};

impl Parser {
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_equality()
    }

    /// `comparison (('==' | '!=') comparison)*`
    fn parse_equality(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.parse_comparison()?;

        while let Some(op) = self.match_binary_op(&[
            (TokenKind::EqualEqual, BinOp::Eq),
            (TokenKind::NotEqual, BinOp::Ne),
        ]) {
            let right = self.parse_comparison()?;
            expr = Self::binary(op, expr, right);
        }

        Ok(expr)
    }

    /// `term (('<' | '<=' | '>' | '>=') term)*`
    fn parse_comparison(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.parse_term()?;

        while let Some(op) = self.match_binary_op(&[
            (TokenKind::Greater, BinOp::Gt),
            (TokenKind::GreaterEqual, BinOp::Ge),
            (TokenKind::Less, BinOp::Lt),
            (TokenKind::LessEqual, BinOp::Le),
        ]) {
            let right = self.parse_term()?;
            expr = Self::binary(op, expr, right);
        }

        Ok(expr)
    }

    /// `factor (('+' | '-') factor)*`
    fn parse_term(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.parse_factor()?;

        while let Some(op) = self.match_binary_op(&[
            (TokenKind::Minus, BinOp::Sub),
            (TokenKind::Plus, BinOp::Add),
        ]) {
            let right = self.parse_factor()?;
            expr = Self::binary(op, expr, right);
        }

        Ok(expr)
    }

    /// `primary (('*' | '/') primary)*`
    fn parse_factor(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.parse_primary()?;

        while let Some(op) = self.match_binary_op(&[
            (TokenKind::Slash, BinOp::Div),
            (TokenKind::Star, BinOp::Mul),
        ]) {
            let right = self.parse_primary()?;
            expr = Self::binary(op, expr, right);
        }

        Ok(expr)
    }

    /// `NUMBER | STRING | BOOL | ask [STRING] | IDENT | '(' expression ')'`
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        if self.match_kind(TokenKind::Ask) {
            let keyword_span = self.previous().span;
            let (prompt, span) = if self.match_kind(TokenKind::String) {
                let token = self.previous();
                (Some(token.text.clone()), keyword_span.to(token.span))
            } else {
                (None, keyword_span)
            };
            return Ok(AstNode::Ask { prompt, span });
        }

        if self.match_kind(TokenKind::Number) {
            let token = self.previous().clone();
            let value: f64 = token.text.parse().map_err(|_| {
                ParseError::new(
                    format!("Invalid number literal '{}'", token.text),
                    token.span,
                )
            })?;
            return Ok(AstNode::NumberLiteral(value, token.span));
        }

        if self.match_kind(TokenKind::String) {
            let token = self.previous();
            return Ok(AstNode::TextLiteral(token.text.clone(), token.span));
        }

        if self.match_kind(TokenKind::Bool) {
            let token = self.previous();
            let value = token.text.eq_ignore_ascii_case("true")
                || token.text.eq_ignore_ascii_case("verdadeiro");
            return Ok(AstNode::BoolLiteral(value, token.span));
        }

        if self.match_kind(TokenKind::Identifier) {
            let token = self.previous();
            return Ok(AstNode::Ident(token.text.clone(), token.span));
        }

        if self.match_kind(TokenKind::LeftParen) {
            let expr = self.parse_expression()?;
            self.expect(TokenKind::RightParen, "')' after expression")?;
            return Ok(expr);
        }

        Err(self.unexpected("an expression"))
    }

    /// Consume the first matching operator token, if any.
    fn match_binary_op(&mut self, table: &[(TokenKind, BinOp)]) -> Option<BinOp> {
        for (kind, op) in table {
            if self.check(*kind) {
                self.advance();
                return Some(*op);
            }
        }
        None
    }

    fn binary(op: BinOp, left: AstNode, right: AstNode) -> AstNode {
        let span = left.span().to(*right.span());
        AstNode::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{AstNode, BinOp};
    use crate::parser::parse::parse;

    /// Parse `expr` in `show expr` position and return the expression node.
    fn parse_expr(expr: &str) -> AstNode {
        let source = format!(
            "building A\n  office B\n    employee Main\n      show {}\n",
            expr
        );
        let program = parse(&source).unwrap();

        let AstNode::Building { members, .. } = &program.buildings[0] else {
            panic!("expected building");
        };
        let AstNode::Office { members, .. } = &members[0] else {
            panic!("expected office");
        };
        let AstNode::Employee { body, .. } = &members[0] else {
            panic!("expected employee");
        };
        let AstNode::Show { expr, .. } = &body[0] else {
            panic!("expected show statement");
        };
        expr.as_ref().clone()
    }

    fn is_number(node: &AstNode, expected: f64) -> bool {
        matches!(node, AstNode::NumberLiteral(v, _) if *v == expected)
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let AstNode::Binary { op, left, right, .. } = parse_expr("1 + 2 * 3") else {
            panic!("expected binary expression");
        };

        assert_eq!(op, BinOp::Add);
        assert!(is_number(&left, 1.0));
        assert!(matches!(
            right.as_ref(),
            AstNode::Binary { op: BinOp::Mul, .. }
        ));
    }

    #[test]
    fn test_comparison_binds_tighter_than_equality() {
        let AstNode::Binary { op, left, right, .. } = parse_expr("1 < 2 == true") else {
            panic!("expected binary expression");
        };

        assert_eq!(op, BinOp::Eq);
        assert!(matches!(
            left.as_ref(),
            AstNode::Binary { op: BinOp::Lt, .. }
        ));
        assert!(matches!(right.as_ref(), AstNode::BoolLiteral(true, _)));
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let AstNode::Binary { op, left, right, .. } = parse_expr("10 - 2 - 3") else {
            panic!("expected binary expression");
        };

        assert_eq!(op, BinOp::Sub);
        assert!(matches!(
            left.as_ref(),
            AstNode::Binary { op: BinOp::Sub, .. }
        ));
        assert!(is_number(&right, 3.0));
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let AstNode::Binary { op, left, right, .. } = parse_expr("(1 + 2) * 3") else {
            panic!("expected binary expression");
        };

        assert_eq!(op, BinOp::Mul);
        assert!(matches!(
            left.as_ref(),
            AstNode::Binary { op: BinOp::Add, .. }
        ));
        assert!(is_number(&right, 3.0));
    }

    #[test]
    fn test_division_and_multiplication_share_a_tier() {
        let AstNode::Binary { op, left, .. } = parse_expr("8 / 2 * 4") else {
            panic!("expected binary expression");
        };

        assert_eq!(op, BinOp::Mul);
        assert!(matches!(
            left.as_ref(),
            AstNode::Binary { op: BinOp::Div, .. }
        ));
    }

    #[test]
    fn test_ask_with_prompt() {
        let expr = parse_expr("ask \"Name: \"");
        assert!(matches!(
            expr,
            AstNode::Ask { prompt: Some(p), .. } if p == "Name: "
        ));
    }

    #[test]
    fn test_ask_without_prompt() {
        let expr = parse_expr("ask");
        assert!(matches!(expr, AstNode::Ask { prompt: None, .. }));
    }

    #[test]
    fn test_localized_bool_literals() {
        assert!(matches!(
            parse_expr("verdadeiro"),
            AstNode::BoolLiteral(true, _)
        ));
        assert!(matches!(parse_expr("falso"), AstNode::BoolLiteral(false, _)));
    }

    #[test]
    fn test_unary_minus_is_rejected() {
        let source = "building A\n  office B\n    employee Main\n      show -1\n";
        let err = parse(source).unwrap_err();
        assert!(err.message.contains("Expected an expression"));
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let source = "building A\n  office B\n    employee Main\n      show (1 + 2\n";
        let err = parse(source).unwrap_err();
        assert!(err.message.contains("')'"));
    }
}
