//! Declaration parsing: buildings, offices, and employees.

use super::ast::{AstNode, Parameter};
use super::lexer::TokenKind;
use super::parse::{ParseError, Parser};

impl Parser {
    /// `building NAME <block of offices>`
    pub(crate) fn parse_building(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.expect(TokenKind::Building, "'building'")?;
        let name = self.expect(TokenKind::Identifier, "building name")?;
        let span = keyword.span.to(name.span);

        self.consume_block()?;

        let mut members = Vec::new();
        while !self.is_at_end() && !self.check(TokenKind::Dedent) {
            if self.check(TokenKind::Office) {
                members.push(self.parse_office()?);
            } else if self.match_kind(TokenKind::Newline) || self.match_kind(TokenKind::Indent) {
                // Formatting tokens between members.
            } else {
                return Err(self.unexpected("'office'"));
            }
        }
        self.match_kind(TokenKind::Dedent);

        Ok(AstNode::Building {
            name: name.text,
            members,
            span,
        })
    }

    /// `office NAME <block of employees>`
    fn parse_office(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.expect(TokenKind::Office, "'office'")?;
        let name = self.expect(TokenKind::Identifier, "office name")?;
        let span = keyword.span.to(name.span);

        self.consume_block()?;

        let mut members = Vec::new();
        while !self.is_at_end() && !self.check(TokenKind::Dedent) {
            if self.check(TokenKind::Employee) {
                members.push(self.parse_employee()?);
            } else if self.match_kind(TokenKind::Newline) || self.match_kind(TokenKind::Indent) {
                // Formatting tokens between members.
            } else {
                return Err(self.unexpected("'employee'"));
            }
        }
        self.match_kind(TokenKind::Dedent);

        Ok(AstNode::Office {
            name: name.text,
            members,
            span,
        })
    }

    /// `employee NAME [(params)] <block of statements>`
    fn parse_employee(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.expect(TokenKind::Employee, "'employee'")?;
        let name = self.expect(TokenKind::Identifier, "employee name")?;
        let span = keyword.span.to(name.span);

        let parameters = self.parse_parameter_list()?;

        self.consume_block()?;
        let body = self.parse_statements()?;

        Ok(AstNode::Employee {
            name: name.text,
            parameters,
            body,
            span,
        })
    }

    /// Optional parenthesized parameter names after an employee name.
    /// There is no call syntax yet, so parameters stay surface-only.
    fn parse_parameter_list(&mut self) -> Result<Vec<Parameter>, ParseError> {
        let mut parameters = Vec::new();

        if !self.match_kind(TokenKind::LeftParen) {
            return Ok(parameters);
        }

        if self.match_kind(TokenKind::RightParen) {
            return Ok(parameters);
        }

        loop {
            let name = self.expect(TokenKind::Identifier, "parameter name")?;
            parameters.push(Parameter {
                name: name.text,
                type_hint: None,
            });

            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightParen, "')' after parameters")?;

        Ok(parameters)
    }

    /// Consume a block introduction: either a `{`, or newlines followed by
    /// an indent. Closing braces are not consumed anywhere; the `{` form
    /// still relies on indentation to end the block.
    pub(crate) fn consume_block(&mut self) -> Result<(), ParseError> {
        if self.match_kind(TokenKind::LeftBrace) {
            return Ok(());
        }

        while self.match_kind(TokenKind::Newline) {}

        if !self.check(TokenKind::Indent) {
            return Err(self.unexpected("an indented block"));
        }
        self.advance();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::AstNode;
    use crate::parser::parse::parse;

    #[test]
    fn test_nested_declaration_shape() {
        let source = r#"building App
  office Greeter
    employee Main
      show "hi"
"#;
        let program = parse(source).unwrap();
        assert_eq!(program.buildings.len(), 1);

        let AstNode::Building { name, members, .. } = &program.buildings[0] else {
            panic!("expected building");
        };
        assert_eq!(name, "App");
        assert_eq!(members.len(), 1);

        let AstNode::Office { name, members, .. } = &members[0] else {
            panic!("expected office");
        };
        assert_eq!(name, "Greeter");

        let AstNode::Employee { name, body, .. } = &members[0] else {
            panic!("expected employee");
        };
        assert_eq!(name, "Main");
        assert_eq!(body.len(), 1);
        assert!(matches!(body[0], AstNode::Show { .. }));
    }

    #[test]
    fn test_multiple_offices_and_employees() {
        let source = r#"building App
  office A
    employee One
      show 1
    employee Two
      show 2
  office B
    employee Three
      show 3
"#;
        let program = parse(source).unwrap();

        let AstNode::Building { members, .. } = &program.buildings[0] else {
            panic!("expected building");
        };
        assert_eq!(members.len(), 2);

        let AstNode::Office { members: employees, .. } = &members[0] else {
            panic!("expected office");
        };
        assert_eq!(employees.len(), 2);
    }

    #[test]
    fn test_employee_with_parameters() {
        let source = r#"building App
  office Math
    employee Add(a, b)
      show 1
"#;
        let program = parse(source).unwrap();

        let AstNode::Building { members, .. } = &program.buildings[0] else {
            panic!("expected building");
        };
        let AstNode::Office { members, .. } = &members[0] else {
            panic!("expected office");
        };
        let AstNode::Employee { parameters, .. } = &members[0] else {
            panic!("expected employee");
        };

        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters[0].name, "a");
        assert_eq!(parameters[1].name, "b");
        assert!(parameters[0].type_hint.is_none());
    }

    #[test]
    fn test_employee_with_empty_parameter_list() {
        let source = r#"building App
  office Math
    employee Main()
      show 1
"#;
        let program = parse(source).unwrap();

        let AstNode::Building { members, .. } = &program.buildings[0] else {
            panic!("expected building");
        };
        let AstNode::Office { members, .. } = &members[0] else {
            panic!("expected office");
        };
        let AstNode::Employee { parameters, .. } = &members[0] else {
            panic!("expected employee");
        };
        assert!(parameters.is_empty());
    }

    #[test]
    fn test_brace_block_intro() {
        // Braces introduce blocks but nothing consumes the closer, so only
        // unclosed braces combine with indentation-based block ends.
        let source = "building App {\n  office A {\n    employee Main {\n      show 1\n";
        let program = parse(source).unwrap();
        assert_eq!(program.buildings.len(), 1);
    }

    #[test]
    fn test_building_requires_name() {
        let err = parse("building\n").unwrap_err();
        assert!(err.message.contains("building name"));
    }

    #[test]
    fn test_building_members_must_be_offices() {
        let err = parse("building App\n  show 1\n").unwrap_err();
        assert!(err.message.contains("Expected 'office'"));
    }

    #[test]
    fn test_missing_block_is_rejected() {
        let err = parse("building App\nbuilding Next\n").unwrap_err();
        assert!(err.message.contains("indented block"));
    }
}
