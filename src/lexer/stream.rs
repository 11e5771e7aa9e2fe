//! Cursor over a token vector with single-token pushback.

use crate::error::ParserError;

use super::{Token, TokenWithPosition};

/// Token stream consumed by the declaration parser
///
/// `back()` undoes exactly the last `next()`. Grammar rules that would need
/// more lookahead read ahead and decide instead.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<TokenWithPosition>,
    current: usize,
    can_back: bool,
}

impl TokenStream {
    pub fn new(tokens: Vec<TokenWithPosition>) -> Self {
        Self {
            tokens,
            current: 0,
            can_back: false,
        }
    }

    /// Advance and return the current token, or `None` at end of stream
    pub fn next(&mut self) -> Option<TokenWithPosition> {
        let token = self.tokens.get(self.current).cloned();
        if token.is_some() {
            self.current += 1;
            self.can_back = true;
        } else {
            self.can_back = false;
        }
        token
    }

    /// Undo the last `next()`
    pub fn back(&mut self) {
        debug_assert!(self.can_back, "only one token of pushback is supported");
        if self.can_back {
            self.current -= 1;
            self.can_back = false;
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|t| &t.token)
    }

    /// Start offset of the token `next()` would return
    pub fn peek_span_start(&self) -> Option<usize> {
        self.tokens.get(self.current).map(|t| t.span.start)
    }

    pub fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Byte offset just past the last token, used for end-of-stream errors
    pub fn end_offset(&self) -> usize {
        self.tokens.last().map(|t| t.span.end).unwrap_or(0)
    }

    /// Advance, failing unless the token has the given kind
    pub fn expect(&mut self, kind: &Token) -> Result<TokenWithPosition, ParserError> {
        match self.next() {
            Some(token) if token.token.same_kind(kind) => Ok(token),
            Some(token) => Err(ParserError::unexpected(&token, kind.to_string())),
            None => Err(ParserError::eof(kind.to_string(), self.end_offset())),
        }
    }

    /// Advance until a token of the given kind has been consumed
    pub fn skip_to(&mut self, kind: &Token) -> Result<TokenWithPosition, ParserError> {
        while let Some(token) = self.next() {
            if token.token.same_kind(kind) {
                return Ok(token);
            }
        }
        Err(ParserError::eof(kind.to_string(), self.end_offset()))
    }

    /// Advance past a nested region whose opener has already been consumed
    pub fn skip_balanced_to(&mut self, close: &Token) -> Result<TokenWithPosition, ParserError> {
        let open = opener_of(close);
        let mut depth = 1usize;
        while let Some(token) = self.next() {
            if open.as_ref().is_some_and(|o| token.token.same_kind(o)) {
                depth += 1;
            } else if token.token.same_kind(close) {
                depth -= 1;
                if depth == 0 {
                    return Ok(token);
                }
            }
        }
        Err(ParserError::eof(close.to_string(), self.end_offset()))
    }

    /// Advance past one value without interpreting it
    ///
    /// Stops before the next `,` `;` `)` or `]` at nesting depth zero.
    pub fn skip_value(&mut self) -> Result<(), ParserError> {
        let mut depth = 0usize;
        loop {
            let Some(token) = self.next() else {
                return Err(ParserError::eof("value", self.end_offset()));
            };
            match token.token {
                Token::LeftParen | Token::LeftBracket | Token::LeftBrace | Token::StartHeredoc(_) => {
                    depth += 1
                }
                Token::RightParen | Token::RightBracket | Token::RightBrace | Token::EndHeredoc
                    if depth > 0 =>
                {
                    depth -= 1
                }
                Token::Comma | Token::Semicolon | Token::RightParen | Token::RightBracket
                    if depth == 0 =>
                {
                    self.back();
                    return Ok(());
                }
                Token::RightBrace => return Err(ParserError::unexpected(&token, "value")),
                _ => {}
            }
        }
    }
}

fn opener_of(close: &Token) -> Option<Token> {
    match close {
        Token::RightBrace => Some(Token::LeftBrace),
        Token::RightParen => Some(Token::LeftParen),
        Token::RightBracket => Some(Token::LeftBracket),
        Token::EndHeredoc => Some(Token::StartHeredoc(String::new())),
        _ => None,
    }
}
