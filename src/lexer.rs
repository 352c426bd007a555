use crate::error::{ExprError, Span};
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Single-character tokens
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen,

    // Literals
    Number,
}

/// A lexeme together with its kind and byte span in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

/// Tokens consumed front to back. Nothing that has been popped comes back.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
    end: usize,
}

impl TokenStream {
    /// `end` is the input length, used to point errors at the end of input.
    pub fn new(tokens: Vec<Token>, end: usize) -> Self {
        Self {
            tokens: tokens.into(),
            end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn peek(&self) -> Result<&Token, ExprError> {
        self.tokens.front().ok_or_else(|| self.exhausted())
    }

    pub fn pop(&mut self) -> Result<Token, ExprError> {
        match self.tokens.pop_front() {
            Some(token) => Ok(token),
            None => Err(self.exhausted()),
        }
    }

    pub fn end_span(&self) -> Span {
        Span::single(self.end)
    }

    fn exhausted(&self) -> ExprError {
        ExprError::parse_error(
            self.end_span(),
            "Unexpected end of expression".to_string(),
        )
    }
}

pub struct Lexer {
    source: String,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
}

impl Lexer {
    pub fn new(source: String) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
        }
    }

    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, ExprError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        log::debug!("lexed {} tokens", self.tokens.len());
        Ok(std::mem::take(&mut self.tokens))
    }

    /// Scan the whole input into a stream ready for the parser.
    pub fn into_stream(mut self) -> Result<TokenStream, ExprError> {
        let tokens = self.scan_tokens()?;
        Ok(TokenStream::new(tokens, self.source.len()))
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) -> Result<(), ExprError> {
        let c = self.advance();

        match c {
            '+' => self.add_token(TokenType::Plus),
            '-' => self.add_token(TokenType::Minus),
            '*' => self.add_token(TokenType::Star),
            '/' => self.add_token(TokenType::Slash),
            '^' => self.add_token(TokenType::Caret),
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            ' ' | '\r' | '\t' | '\n' => {
                // Ignore whitespace
            }
            c if c.is_ascii_digit() => self.number()?,
            _ => {
                return Err(ExprError::lex_error(
                    Span::new(self.start, self.current),
                    format!("Unexpected character: '{}'", c),
                ));
            }
        }

        Ok(())
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current..].chars().next().unwrap_or('\0');
        self.current += c.len_utf8();
        c
    }

    fn peek(&self) -> char {
        self.source[self.current..].chars().next().unwrap_or('\0')
    }

    fn number(&mut self) -> Result<(), ExprError> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let number_slice = &self.source[self.start..self.current];
        if number_slice.parse::<i64>().is_err() {
            return Err(ExprError::lex_error(
                Span::new(self.start, self.current),
                format!("Invalid integer: {}", number_slice),
            ));
        }

        self.add_token(TokenType::Number);
        Ok(())
    }

    fn add_token(&mut self, token_type: TokenType) {
        let text = &self.source[self.start..self.current];
        self.tokens.push(Token::new(
            token_type,
            text.to_string(),
            Span::new(self.start, self.current),
        ));
    }
}

/// Convenience wrapper: lex `source` into a token stream.
pub fn lex(source: &str) -> Result<TokenStream, ExprError> {
    Lexer::new(source.to_string()).into_stream()
}
