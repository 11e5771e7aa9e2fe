//! メインパーサー構造とユーティリティ

use crate::ast::Namespace;
use crate::lexer::{Token, TokenStream, TokenWithPosition};

use super::context::ParseContext;
use super::{ParseError, ParseResult};

/// 宣言パーサー
///
/// トークン列を前から一度だけ読み、名前空間・クラス・関数の宣言を集める。
/// 関数本体や初期値の式は解釈せずに読み飛ばす。
pub struct Parser {
    pub(super) stream: TokenStream,
    pub(super) ctx: ParseContext,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPosition>) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            ctx: ParseContext::new(),
        }
    }

    /// ファイル全体を解析し、出現順の名前空間を返す
    pub fn parse(&mut self) -> ParseResult<Vec<Namespace>> {
        // `->class`や`Foo::class`の直後の名前は宣言ではない
        let mut after_member_access = false;

        while let Some(token) = self.stream.next() {
            if std::mem::take(&mut after_member_access)
                && (token.token.is_keyword() || matches!(token.token, Token::Identifier(_)))
            {
                continue;
            }

            match token.token {
                Token::InlineHtml(_) | Token::OpenTag | Token::CloseTag => {}
                Token::Namespace => self.parse_namespace()?,
                Token::Use => self.parse_use()?,
                Token::DocComment(_) | Token::Final | Token::Abstract | Token::Readonly => {
                    self.ctx.store(token)
                }
                Token::Interface | Token::Trait => {
                    let start = token.span.start;
                    self.ctx.store(token);
                    self.parse_class(start)?;
                }
                Token::Class => self.parse_class(token.span.start)?,
                Token::Function => self.parse_top_level_function(&token)?,
                Token::StartHeredoc(_) => {
                    self.stream.skip_balanced_to(&Token::EndHeredoc)?;
                }
                Token::New => self.skip_anonymous_class()?,
                Token::Arrow | Token::DoubleColon => {
                    self.ctx.discard_pending();
                    after_member_access = true;
                }
                Token::Identifier(ref word) if word.eq_ignore_ascii_case("enum") => {
                    self.skip_enum()?
                }
                _ => self.ctx.discard_pending(),
            }
        }

        self.ctx.discard_pending();
        Ok(std::mem::take(&mut self.ctx).finish())
    }

    /// `function`の後が名前なら関数宣言、`(`なら無名関数
    fn parse_top_level_function(&mut self, keyword: &TokenWithPosition) -> ParseResult<()> {
        let next = self.next_or_eof("function name or '('")?;
        let anonymous = match next.token {
            Token::LeftParen => true,
            Token::Ampersand => matches!(self.stream.peek(), Some(Token::LeftParen)),
            _ => false,
        };
        self.stream.back();

        if anonymous {
            log::trace!("skipping closure at {}:{}", keyword.position.line, keyword.position.column);
            self.ctx.discard_pending();
            self.stream.skip_to(&Token::LeftBrace)?;
            self.stream.skip_balanced_to(&Token::RightBrace)?;
            return Ok(());
        }

        let function = self.parse_function(keyword.span.start)?;
        log::debug!("function `{}`", function.name);
        self.ctx.namespace_mut().functions.push(function);
        Ok(())
    }

    /// `new class(...) extends A { ... }`を丸ごと読み飛ばす
    fn skip_anonymous_class(&mut self) -> ParseResult<()> {
        self.ctx.discard_pending();
        if !matches!(self.stream.peek(), Some(Token::Class)) {
            return Ok(());
        }
        self.stream.next();

        if matches!(self.stream.peek(), Some(Token::LeftParen)) {
            self.stream.next();
            self.stream.skip_balanced_to(&Token::RightParen)?;
        }
        self.stream.skip_to(&Token::LeftBrace)?;
        self.stream.skip_balanced_to(&Token::RightBrace)?;
        Ok(())
    }

    /// 列挙型の宣言は抽出対象外なので本体ごと読み飛ばす
    fn skip_enum(&mut self) -> ParseResult<()> {
        self.ctx.discard_pending();
        if !matches!(self.stream.peek(), Some(Token::Identifier(_))) {
            return Ok(());
        }
        self.stream.skip_to(&Token::LeftBrace)?;
        self.stream.skip_balanced_to(&Token::RightBrace)?;
        Ok(())
    }

    // ==================== ユーティリティメソッド ====================

    /// 次のトークンを取得。入力の終わりならエラー
    pub(super) fn next_or_eof(&mut self, expected: &str) -> ParseResult<TokenWithPosition> {
        self.stream
            .next()
            .ok_or_else(|| ParseError::eof(expected, self.stream.end_offset()))
    }

    /// 識別子、または名前として使われた予約語を期待
    pub(super) fn expect_name(&mut self, expected: &str) -> ParseResult<(String, TokenWithPosition)> {
        let token = self.next_or_eof(expected)?;
        match name_of(&token) {
            Some(name) => Ok((name, token)),
            None => Err(ParseError::unexpected(&token, expected)),
        }
    }

    /// `,`か`;`を読み、リストが続くかどうかを返す
    pub(super) fn list_continues(&mut self) -> ParseResult<bool> {
        let token = self.next_or_eof("',' or ';'")?;
        match token.token {
            Token::Comma => Ok(true),
            Token::Semicolon => Ok(false),
            _ => Err(ParseError::unexpected(&token, "',' or ';'")),
        }
    }
}

/// メソッド名や定数名には予約語も使える
pub(super) fn name_of(token: &TokenWithPosition) -> Option<String> {
    match &token.token {
        Token::Identifier(name) => Some(name.clone()),
        t if t.is_keyword() => Some(token.text.clone()),
        _ => None,
    }
}
