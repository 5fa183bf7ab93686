//! Expression parser
//!
//! Parses rule text into Expression AST nodes.
//!
//! Grammar, loosest binding first:
//! ```text
//! expression := or_expr
//! or_expr    := and_expr ( "or" and_expr )*
//! and_expr   := not_expr ( "and" not_expr )*
//! not_expr   := "not" not_expr | primary
//! primary    := comparison | "(" expression ")"
//! comparison := IDENT COMPARATOR LITERAL
//! ```
//!
//! `and`/`or` chains associate to the left, so `a and b and c` parses as
//! `And(And(a, b), c)`.

use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use ruleforge_core::ast::Expression;
use ruleforge_core::Value;

/// Expression parser
///
/// Nesting of parenthesized groups and `not` prefixes is bounded by
/// `max_depth`; deeper input fails with [`ParseError::TooDeep`] instead of
/// exhausting the stack.
#[derive(Debug, Clone, Copy)]
pub struct ExpressionParser {
    max_depth: usize,
}

impl Default for ExpressionParser {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

impl ExpressionParser {
    /// Default nesting limit
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    /// Create a parser with a custom nesting limit
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Configured nesting limit
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse rule text with the default nesting limit
    pub fn parse(input: &str) -> Result<Expression> {
        Self::default().parse_str(input)
    }

    /// Parse rule text
    pub fn parse_str(&self, input: &str) -> Result<Expression> {
        let tokens = Lexer::tokenize(input)?;
        self.parse_tokens(&tokens)
    }

    /// Parse a token sequence produced by [`Lexer::tokenize`]
    pub fn parse_tokens(&self, tokens: &[Token]) -> Result<Expression> {
        let last = match tokens.last() {
            Some(token) => token,
            None => return Err(ParseError::EmptyInput),
        };
        if last.kind != TokenKind::Eof {
            return Err(ParseError::UnexpectedToken {
                position: last.position + last.lexeme.len(),
                expected: "end of input".to_string(),
                found: "end of token stream".to_string(),
            });
        }
        if tokens.len() == 1 {
            return Err(ParseError::EmptyInput);
        }

        let mut stream = TokenStream {
            tokens,
            pos: 0,
            depth: 0,
            max_depth: self.max_depth,
        };
        let expr = stream.parse_or()?;

        let trailing = stream.peek();
        if trailing.kind != TokenKind::Eof {
            return Err(stream.unexpected("'and', 'or' or end of input"));
        }
        Ok(expr)
    }
}

/// Cursor over a token slice ending in `Eof`
struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> TokenStream<'a> {
    fn peek(&self) -> &'a Token {
        // The slice is non-empty and ends with Eof
        let index = self.pos.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::UnexpectedToken {
            position: token.position,
            expected: expected.to_string(),
            found: token.kind.to_string(),
        }
    }

    fn enter(&mut self, position: usize) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(ParseError::TooDeep {
                position,
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_or(&mut self) -> Result<Expression> {
        let mut left = self.parse_and()?;
        while self.peek().kind == TokenKind::Or {
            self.advance();
            let right = self.parse_and()?;
            left = Expression::or(left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut left = self.parse_not()?;
        while self.peek().kind == TokenKind::And {
            self.advance();
            let right = self.parse_not()?;
            left = Expression::and(left, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expression> {
        if self.peek().kind != TokenKind::Not {
            return self.parse_primary();
        }

        let not_token = self.advance();
        self.enter(not_token.position)?;
        let operand = self.parse_not()?;
        self.leave();
        Ok(Expression::not(operand))
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let token = self.peek();
        match &token.kind {
            TokenKind::LeftParen => {
                self.advance();
                self.enter(token.position)?;
                let inner = self.parse_or()?;
                if self.peek().kind != TokenKind::RightParen {
                    return Err(self.unexpected("')'"));
                }
                self.advance();
                self.leave();
                Ok(inner)
            }
            TokenKind::Identifier(name) => {
                self.advance();
                self.parse_comparison(name)
            }
            _ => Err(self.unexpected("attribute name, 'not' or '('")),
        }
    }

    fn parse_comparison(&mut self, attribute: &str) -> Result<Expression> {
        let op = match &self.peek().kind {
            TokenKind::Comparison(op) => *op,
            _ => return Err(self.unexpected("comparison operator")),
        };
        self.advance();

        let literal = match &self.peek().kind {
            TokenKind::Integer(n) => Value::Integer(*n),
            TokenKind::Float(x) => Value::Float(*x),
            TokenKind::String(s) => Value::String(s.clone()),
            TokenKind::Boolean(b) => Value::Bool(*b),
            _ => return Err(self.unexpected("literal value")),
        };
        self.advance();

        Ok(Expression::comparison(attribute, op, literal))
    }
}
