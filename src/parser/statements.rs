//! Statement parsing: variable declarations, show, decide, and attach.

use super::ast::AstNode;
use super::lexer::TokenKind;
use super::parse::{ParseError, Parser};

impl Parser {
    /// Parse statements until the enclosing block closes.
    ///
    /// The list stops at `Dedent` (consumed here), at `else` (left for the
    /// decide statement that owns it), or at end of input.
    pub(crate) fn parse_statements(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut statements = Vec::new();

        while !self.is_at_end() && !self.check(TokenKind::Dedent) && !self.check(TokenKind::Else) {
            if self.match_kind(TokenKind::Newline) || self.match_kind(TokenKind::Indent) {
                continue;
            }
            statements.push(self.parse_statement()?);
        }

        self.match_kind(TokenKind::Dedent);

        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        match self.peek().kind {
            TokenKind::Attach => self.parse_attach(),
            TokenKind::Chest => self.parse_var_decl(),
            TokenKind::Show => self.parse_show(),
            TokenKind::Decide => self.parse_decide(),
            _ => Err(self.unexpected("a statement")),
        }
    }

    /// `chest NAME [= expression]`
    fn parse_var_decl(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.expect(TokenKind::Chest, "'chest'")?;
        let name = self.expect(TokenKind::Identifier, "variable name")?;

        let init = if self.match_kind(TokenKind::Assign) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };

        self.consume_statement_end();

        let span = match &init {
            Some(expr) => keyword.span.to(*expr.span()),
            None => keyword.span.to(name.span),
        };
        Ok(AstNode::VarDecl {
            name: name.text,
            init,
            span,
        })
    }

    /// `show expression`
    fn parse_show(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.expect(TokenKind::Show, "'show'")?;
        let expr = self.parse_expression()?;
        self.consume_statement_end();

        let span = keyword.span.to(*expr.span());
        Ok(AstNode::Show {
            expr: Box::new(expr),
            span,
        })
    }

    /// `decide condition <block> [else <block>]`
    ///
    /// There is no `else decide` chaining at the grammar level; a chained
    /// condition must be a decide statement nested inside the else-block.
    fn parse_decide(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.expect(TokenKind::Decide, "'decide'")?;
        let cond = self.parse_expression()?;
        let span = keyword.span.to(*cond.span());

        self.consume_block()?;
        let then_block = self.parse_statements()?;

        let else_block = if self.match_kind(TokenKind::Else) {
            self.consume_block()?;
            Some(self.parse_statements()?)
        } else {
            None
        };

        Ok(AstNode::Decide {
            cond: Box::new(cond),
            then_block,
            else_block,
            span,
        })
    }

    /// `attach MODULE`
    fn parse_attach(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.expect(TokenKind::Attach, "'attach'")?;
        let module = self.expect(TokenKind::Identifier, "module name")?;
        self.consume_statement_end();

        Ok(AstNode::Attach {
            module: module.text,
            span: keyword.span.to(module.span),
        })
    }

    /// A statement may end with a semicolon, a newline, or nothing at all
    /// when the enclosing block ends right after it.
    fn consume_statement_end(&mut self) {
        if self.match_kind(TokenKind::Semicolon) {
            return;
        }
        self.match_kind(TokenKind::Newline);
    }
}
