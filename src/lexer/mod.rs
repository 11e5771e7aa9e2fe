//! Lexical analysis for PHP-style source files.
//!
//! The [`Token`] enum is a logos DFA covering the code between `<?php` and `?>`.
//! [`Lexer`] wraps it with the modal parts logos cannot express on its own:
//! inline markup outside the open/close tags and heredoc/nowdoc bodies, which
//! are captured verbatim up to their closing label.

mod stream;

pub use stream::TokenStream;

use logos::{FilterResult, Lexer as LogosLexer, Logos, Skip};
use std::collections::VecDeque;
use std::fmt;

/// Token types for the scripting language
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Tags and inline markup (produced by the `Lexer` wrapper)
    OpenTag,
    #[token("?>")]
    CloseTag,
    InlineHtml(String),

    // Keywords
    #[token("abstract", ignore(ascii_case))]
    Abstract,
    #[token("array", ignore(ascii_case))]
    Array,
    #[token("as", ignore(ascii_case))]
    As,
    #[token("callable", ignore(ascii_case))]
    Callable,
    #[token("class", ignore(ascii_case))]
    Class,
    #[token("const", ignore(ascii_case))]
    Const,
    #[token("extends", ignore(ascii_case))]
    Extends,
    #[token("final", ignore(ascii_case))]
    Final,
    #[token("function", ignore(ascii_case))]
    Function,
    #[token("implements", ignore(ascii_case))]
    Implements,
    #[token("interface", ignore(ascii_case))]
    Interface,
    #[token("namespace", ignore(ascii_case))]
    Namespace,
    #[token("new", ignore(ascii_case))]
    New,
    #[token("private", ignore(ascii_case))]
    Private,
    #[token("protected", ignore(ascii_case))]
    Protected,
    #[token("public", ignore(ascii_case))]
    Public,
    #[token("readonly", ignore(ascii_case))]
    Readonly,
    #[token("static", ignore(ascii_case))]
    Static,
    #[token("trait", ignore(ascii_case))]
    Trait,
    #[token("use", ignore(ascii_case))]
    Use,
    #[token("var", ignore(ascii_case))]
    Var,

    // Identifiers (must come after keywords to avoid conflicts)
    #[regex(
        r"[a-zA-Z_\u{80}-\u{10FFFF}][a-zA-Z0-9_\u{80}-\u{10FFFF}]*",
        |lex| lex.slice().to_owned(),
        priority = 1
    )]
    Identifier(String),

    /// Variable name without the leading `$`
    #[regex(
        r"\$[a-zA-Z_\u{80}-\u{10FFFF}][a-zA-Z0-9_\u{80}-\u{10FFFF}]*",
        |lex| lex.slice()[1..].to_owned()
    )]
    Variable(String),

    /// `/** … */`. Other block comments are skipped by the same callback
    #[token("/*", block_comment)]
    DocComment(String),

    // Literals
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice().to_owned())]
    #[regex(r"'([^'\\]|\\.)*'", |lex| lex.slice().to_owned())]
    #[regex(r"`([^`\\]|\\.)*`", |lex| lex.slice().to_owned())]
    ConstantString(String),

    #[regex(
        r"0[xX][0-9a-fA-F_]+|0[bB][01_]+|[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9]+)?|\.[0-9][0-9_]*([eE][+-]?[0-9]+)?",
        |lex| lex.slice().to_owned()
    )]
    Number(String),

    /// Heredoc/nowdoc label
    #[regex(
        r#"<<<[ \t]*("[A-Za-z_][A-Za-z0-9_]*"|'[A-Za-z_][A-Za-z0-9_]*'|[A-Za-z_][A-Za-z0-9_]*)\r?\n"#,
        heredoc_label
    )]
    StartHeredoc(String),
    EncapsedString(String),
    EndHeredoc,

    // Delimiters
    #[token("\\")]
    NsSeparator,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Equal,
    #[token("...")]
    Ellipsis,
    #[token("::")]
    DoubleColon,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Pipe,
    #[regex(r"\??->")]
    Arrow,

    // Everything else that can appear in skipped expressions
    #[regex(
        r"\?\?=?|===?|!==?|<=>|<=|>=|<>|=>|&&|\|\||\+\+|--|<<=?|>>=?|\*\*=?|[-+*/%.^&|]=|[-+*/%.<>!^~@$]",
        |lex| lex.slice().to_owned()
    )]
    Operator(String),

    // Comments (skip them)
    #[regex(r"//[^\n]*", logos::skip)]
    #[regex(r"#([^\[\n][^\n]*)?", logos::skip)]
    // Attributes are skipped as a whole bracketed region
    #[token("#[", skip_attribute)]
    // Error token for unrecognized input
    Error,
}

fn heredoc_label(lex: &mut LogosLexer<Token>) -> String {
    lex.slice()
        .trim_start_matches('<')
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_owned()
}

/// Consumes a block comment up to `*/`. An unterminated comment is an error
fn block_comment(lex: &mut LogosLexer<Token>) -> FilterResult<String, ()> {
    let Some(close) = lex.remainder().find("*/") else {
        lex.bump(lex.remainder().len());
        return FilterResult::Error(());
    };
    lex.bump(close + 2);

    // `/**` followed by whitespace opens a doc comment; `/**/` does not
    let text = lex.slice();
    if text.starts_with("/**") && text[3..].starts_with(char::is_whitespace) {
        FilterResult::Emit(text.to_owned())
    } else {
        FilterResult::Skip
    }
}

fn skip_attribute(lex: &mut LogosLexer<Token>) -> Skip {
    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut consumed = 0;

    for (idx, ch) in lex.remainder().char_indices() {
        consumed = idx + ch.len_utf8();
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' => quote = Some(ch),
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }

    lex.bump(consumed);
    Skip
}

impl Token {
    /// Whether both tokens are of the same kind, ignoring payloads
    pub fn same_kind(&self, other: &Token) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Reserved words, which may still be used as method or constant names
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Token::Abstract
                | Token::Array
                | Token::As
                | Token::Callable
                | Token::Class
                | Token::Const
                | Token::Extends
                | Token::Final
                | Token::Function
                | Token::Implements
                | Token::Interface
                | Token::Namespace
                | Token::New
                | Token::Private
                | Token::Protected
                | Token::Public
                | Token::Readonly
                | Token::Static
                | Token::Trait
                | Token::Use
                | Token::Var
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Token::OpenTag => "T_OPEN_TAG",
            Token::CloseTag => "T_CLOSE_TAG",
            Token::InlineHtml(_) => "T_INLINE_HTML",
            Token::Abstract => "T_ABSTRACT",
            Token::Array => "T_ARRAY",
            Token::As => "T_AS",
            Token::Callable => "T_CALLABLE",
            Token::Class => "T_CLASS",
            Token::Const => "T_CONST",
            Token::Extends => "T_EXTENDS",
            Token::Final => "T_FINAL",
            Token::Function => "T_FUNCTION",
            Token::Implements => "T_IMPLEMENTS",
            Token::Interface => "T_INTERFACE",
            Token::Namespace => "T_NAMESPACE",
            Token::New => "T_NEW",
            Token::Private => "T_PRIVATE",
            Token::Protected => "T_PROTECTED",
            Token::Public => "T_PUBLIC",
            Token::Readonly => "T_READONLY",
            Token::Static => "T_STATIC",
            Token::Trait => "T_TRAIT",
            Token::Use => "T_USE",
            Token::Var => "T_VAR",
            Token::Identifier(_) => "T_STRING",
            Token::Variable(_) => "T_VARIABLE",
            Token::DocComment(_) => "T_DOC_COMMENT",
            Token::ConstantString(_) => "T_CONSTANT_ENCAPSED_STRING",
            Token::Number(_) => "T_LNUMBER",
            Token::StartHeredoc(_) => "T_START_HEREDOC",
            Token::EncapsedString(_) => "T_ENCAPSED_AND_WHITESPACE",
            Token::EndHeredoc => "T_END_HEREDOC",
            Token::NsSeparator => "T_NS_SEPARATOR",
            Token::Ellipsis => "T_ELLIPSIS",
            Token::DoubleColon => "T_DOUBLE_COLON",
            Token::Arrow => "T_OBJECT_OPERATOR",
            Token::LeftParen => "'('",
            Token::RightParen => "')'",
            Token::LeftBrace => "'{'",
            Token::RightBrace => "'}'",
            Token::LeftBracket => "'['",
            Token::RightBracket => "']'",
            Token::Comma => "','",
            Token::Semicolon => "';'",
            Token::Equal => "'='",
            Token::Colon => "':'",
            Token::Question => "'?'",
            Token::Ampersand => "'&'",
            Token::Pipe => "'|'",
            Token::Operator(op) => return write!(f, "'{}'", op),
            Token::Error => "T_BAD_CHARACTER",
        };
        f.write_str(name)
    }
}

/// Position tracking for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new() -> Self {
        Position { line: 1, column: 1 }
    }

    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// A token with its raw text and position information
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPosition {
    pub token: Token,
    pub text: String,
    pub position: Position,
    pub span: logos::Span,
}

/// Lexer for PHP-style source files
pub struct Lexer<'a> {
    input: &'a str,
    /// `None` while outside the open/close tags
    inner: Option<LogosLexer<'a, Token>>,
    /// Byte offset of `inner`'s slice within `input`
    base: usize,
    html_offset: usize,
    queued: VecDeque<TokenWithPosition>,
    position: Position,
    last_end: usize,
}

impl<'a> Lexer<'a> {
    /// Starts in markup mode, like a source file on disk
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            inner: None,
            base: 0,
            html_offset: 0,
            queued: VecDeque::new(),
            position: Position::new(),
            last_end: 0,
        }
    }

    /// Starts directly in code mode, as if `<?php` preceded the input
    pub fn code(input: &'a str) -> Self {
        let mut lexer = Self::new(input);
        lexer.resume_code(0);
        lexer
    }

    /// Collect all tokens
    pub fn collect_tokens(self) -> Vec<TokenWithPosition> {
        self.collect()
    }

    fn resume_code(&mut self, offset: usize) {
        let input = self.input;
        self.inner = Some(Token::lexer(&input[offset..]));
        self.base = offset;
    }

    fn leave_code(&mut self, offset: usize) {
        self.inner = None;
        self.html_offset = offset;
    }

    fn make(&mut self, token: Token, start: usize, end: usize) -> TokenWithPosition {
        // Update position for any skipped content since last token
        if start > self.last_end {
            for ch in self.input[self.last_end..start].chars() {
                self.position.advance(ch);
            }
        }
        let position = self.position;
        for ch in self.input[start..end].chars() {
            self.position.advance(ch);
        }
        self.last_end = end;

        TokenWithPosition {
            token,
            text: self.input[start..end].to_owned(),
            position,
            span: start..end,
        }
    }

    fn scan_inline_html(&mut self) {
        let input = self.input;
        let start = self.html_offset;
        let rest = &input[start..];

        match find_open_tag(rest) {
            Some((idx, len)) => {
                if idx > 0 {
                    let html = self.make(Token::InlineHtml(rest[..idx].to_owned()), start, start + idx);
                    self.queued.push_back(html);
                }
                let tag_end = start + idx + len;
                let tag = self.make(Token::OpenTag, start + idx, tag_end);
                self.queued.push_back(tag);
                self.resume_code(tag_end);
            }
            None => {
                if !rest.is_empty() {
                    let html = self.make(Token::InlineHtml(rest.to_owned()), start, input.len());
                    self.queued.push_back(html);
                }
                self.html_offset = input.len();
            }
        }
    }

    fn scan_heredoc(&mut self, label: String, start: usize, end: usize) {
        let input = self.input;
        let head = self.make(Token::StartHeredoc(label.clone()), start, end);
        self.queued.push_back(head);

        match find_heredoc_end(&input[end..], &label) {
            Some((close_start, close_end)) => {
                let (close_start, close_end) = (end + close_start, end + close_end);
                if close_start > end {
                    let body = self.make(
                        Token::EncapsedString(input[end..close_start].to_owned()),
                        end,
                        close_start,
                    );
                    self.queued.push_back(body);
                }
                let tail = self.make(Token::EndHeredoc, close_start, close_end);
                self.queued.push_back(tail);
                self.resume_code(close_end);
            }
            None => {
                // Unterminated: the rest of the input is unusable
                let bad = self.make(Token::Error, end, input.len());
                self.queued.push_back(bad);
                self.leave_code(input.len());
            }
        }
    }

    fn next_code_token(&mut self) -> Option<TokenWithPosition> {
        let inner = self.inner.as_mut()?;
        let Some(result) = inner.next() else {
            self.leave_code(self.input.len());
            return None;
        };
        let span = inner.span();
        let (start, end) = (self.base + span.start, self.base + span.end);

        match result {
            Ok(Token::CloseTag) => {
                let token = self.make(Token::CloseTag, start, end);
                let offset = skip_single_newline(self.input, end);
                self.leave_code(offset);
                Some(token)
            }
            Ok(Token::StartHeredoc(label)) => {
                self.scan_heredoc(label, start, end);
                self.queued.pop_front()
            }
            Ok(token) => Some(self.make(token, start, end)),
            Err(_) => Some(self.make(Token::Error, start, end)),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = TokenWithPosition;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.queued.pop_front() {
                return Some(token);
            }
            if self.inner.is_some() {
                if let Some(token) = self.next_code_token() {
                    return Some(token);
                }
                continue;
            }
            if self.html_offset >= self.input.len() {
                return None;
            }
            self.scan_inline_html();
        }
    }
}

/// Finds `<?php` (any case) or `<?=`, returning its offset and length
fn find_open_tag(text: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(idx) = text[from..].find("<?") {
        let at = from + idx;
        let after = &text[at + 2..];
        if after.get(..3).is_some_and(|s| s.eq_ignore_ascii_case("php")) {
            return Some((at, 5));
        }
        if after.starts_with('=') {
            return Some((at, 3));
        }
        from = at + 2;
    }
    None
}

/// Finds the closing label line of a heredoc body, returning the label's range
fn find_heredoc_end(body: &str, label: &str) -> Option<(usize, usize)> {
    let mut line_start = 0;
    for line in body.split_inclusive('\n') {
        let trimmed = line.trim_start_matches([' ', '\t']);
        let indent = line.len() - trimmed.len();
        if let Some(after) = trimmed.strip_prefix(label) {
            if !after.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
                let start = line_start + indent;
                return Some((start, start + label.len()));
            }
        }
        line_start += line.len();
    }
    None
}

fn skip_single_newline(input: &str, offset: usize) -> usize {
    let rest = &input[offset..];
    if rest.starts_with("\r\n") {
        offset + 2
    } else if rest.starts_with('\n') {
        offset + 1
    } else {
        offset
    }
}
