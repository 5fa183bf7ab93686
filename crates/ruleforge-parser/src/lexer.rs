//! Lexer for rule text
//!
//! Splits rule text into tokens. Positions are byte offsets into the input so
//! errors can point at the exact place in the original text.

use crate::error::LexError;
use ruleforge_core::ast::ComparisonOp;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// Token kind with its decoded value
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Attribute name
    Identifier(String),

    /// Integer literal
    Integer(i64),

    /// Float literal
    Float(f64),

    /// String literal, escapes already decoded
    String(String),

    /// `true` / `false`
    Boolean(bool),

    /// One of `== != < <= > >=`
    Comparison(ComparisonOp),

    /// `and`
    And,

    /// `or`
    Or,

    /// `not`
    Not,

    /// `(`
    LeftParen,

    /// `)`
    RightParen,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Whether this token is a literal value
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Integer(_) | TokenKind::Float(_) | TokenKind::String(_) | TokenKind::Boolean(_)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::Integer(n) => write!(f, "number {}", n),
            TokenKind::Float(x) => write!(f, "number {}", x),
            TokenKind::String(s) => write!(f, "string {:?}", s),
            TokenKind::Boolean(b) => write!(f, "'{}'", b),
            TokenKind::Comparison(op) => write!(f, "'{}'", op),
            TokenKind::And => f.write_str("'and'"),
            TokenKind::Or => f.write_str("'or'"),
            TokenKind::Not => f.write_str("'not'"),
            TokenKind::LeftParen => f.write_str("'('"),
            TokenKind::RightParen => f.write_str("')'"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A token with its raw text and position
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,

    /// Source text of the token, as written
    pub lexeme: String,

    /// Byte offset of the first character
    pub position: usize,
}

impl Token {
    fn new(kind: TokenKind, lexeme: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }
}

/// Rule text lexer
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `input`
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Tokenize `input`. The result always ends with a single `Eof` token.
    pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Read the next token
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let (start, c) = match self.chars.peek().copied() {
            Some(next) => next,
            None => return Ok(Token::new(TokenKind::Eof, "", self.input.len())),
        };

        match c {
            '(' => {
                self.chars.next();
                Ok(Token::new(TokenKind::LeftParen, "(", start))
            }
            ')' => {
                self.chars.next();
                Ok(Token::new(TokenKind::RightParen, ")", start))
            }
            '=' | '!' | '<' | '>' => self.read_comparison(start, c),
            '"' => self.read_string(start),
            '-' if self.digit_follows_sign() => self.read_number(start),
            c if c.is_ascii_digit() => self.read_number(start),
            c if c.is_ascii_alphabetic() || c == '_' => Ok(self.read_word(start)),
            other => Err(LexError::UnexpectedCharacter {
                position: start,
                character: other,
            }),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some((_, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    /// Offset just past the last consumed character
    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(pos, _)| *pos)
            .unwrap_or(self.input.len())
    }

    fn digit_follows_sign(&self) -> bool {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        matches!(lookahead.next(), Some((_, c)) if c.is_ascii_digit())
    }

    fn read_comparison(&mut self, start: usize, first: char) -> Result<Token, LexError> {
        self.chars.next();
        let has_eq = matches!(self.chars.peek(), Some((_, '=')));
        if has_eq {
            self.chars.next();
        }

        let lexeme = &self.input[start..self.offset()];
        match ComparisonOp::from_symbol(lexeme) {
            Some(op) => Ok(Token::new(TokenKind::Comparison(op), lexeme, start)),
            // A lone `=` or `!`
            None => Err(LexError::UnexpectedCharacter {
                position: start,
                character: first,
            }),
        }
    }

    fn read_string(&mut self, start: usize) -> Result<Token, LexError> {
        // Opening quote
        self.chars.next();

        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some((_, '"')) => break,
                Some((escape_pos, '\\')) => match self.chars.next() {
                    Some((_, '"')) => value.push('"'),
                    Some((_, '\\')) => value.push('\\'),
                    Some((_, other)) => {
                        return Err(LexError::InvalidEscape {
                            position: escape_pos,
                            character: other,
                        })
                    }
                    None => return Err(LexError::UnterminatedString { position: start }),
                },
                Some((_, c)) => value.push(c),
                None => return Err(LexError::UnterminatedString { position: start }),
            }
        }

        let lexeme = &self.input[start..self.offset()];
        Ok(Token::new(TokenKind::String(value), lexeme, start))
    }

    fn read_number(&mut self, start: usize) -> Result<Token, LexError> {
        // Sign, when present
        if let Some((_, '-')) = self.chars.peek() {
            self.chars.next();
        }
        self.consume_digits();

        let mut is_float = false;
        if let Some((_, '.')) = self.chars.peek() {
            let mut lookahead = self.chars.clone();
            lookahead.next();
            if matches!(lookahead.next(), Some((_, c)) if c.is_ascii_digit()) {
                is_float = true;
                self.chars.next();
                self.consume_digits();
            }
        }

        let lexeme = &self.input[start..self.offset()];
        let kind = if is_float {
            // Digits with a single dot always parse
            match lexeme.parse::<f64>() {
                Ok(x) if x.is_finite() => TokenKind::Float(x),
                Ok(_) => {
                    return Err(LexError::FloatOverflow {
                        position: start,
                        literal: lexeme.to_string(),
                    })
                }
                Err(_) => {
                    return Err(LexError::UnexpectedCharacter {
                        position: start,
                        character: '.',
                    })
                }
            }
        } else {
            match lexeme.parse::<i64>() {
                Ok(n) => TokenKind::Integer(n),
                Err(_) => {
                    return Err(LexError::IntegerOverflow {
                        position: start,
                        literal: lexeme.to_string(),
                    })
                }
            }
        };
        Ok(Token::new(kind, lexeme, start))
    }

    fn consume_digits(&mut self) {
        while let Some((_, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self, start: usize) -> Token {
        while let Some((_, c)) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || *c == '_' {
                self.chars.next();
            } else {
                break;
            }
        }

        let lexeme = &self.input[start..self.offset()];
        let kind = match lexeme.to_ascii_lowercase().as_str() {
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "true" => TokenKind::Boolean(true),
            "false" => TokenKind::Boolean(false),
            _ => TokenKind::Identifier(lexeme.to_string()),
        };
        Token::new(kind, lexeme, start)
    }
}
