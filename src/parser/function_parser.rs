//! 関数・メソッド宣言の解析

use crate::ast::*;
use crate::lexer::Token;
use crate::resolve::{refine, DocTag};

use super::context::{Modifiers, FUNCTION_MODIFIERS};
use super::{ParseError, ParseResult, Parser};

impl Parser {
    /// `function`キーワードの直後から関数宣言を解析する
    ///
    /// 本体は読み飛ばす。型ヒントの無い引数と戻り値は
    /// ドキュメントコメントの`@param`・`@return`で補う。
    pub(super) fn parse_function(&mut self, keyword_start: usize) -> ParseResult<Function> {
        let modifiers =
            Modifiers::fold(self.ctx.take_pending(), FUNCTION_MODIFIERS, "function modifier")?;
        let start = modifiers.start.unwrap_or(keyword_start);

        let returns_reference = matches!(self.stream.peek(), Some(Token::Ampersand));
        if returns_reference {
            self.stream.next();
        }
        let (name, _) = self.expect_name("function name")?;
        self.stream.expect(&Token::LeftParen)?;

        let mut args = self.parse_arguments()?;
        let (return_type, end) = self.parse_function_tail()?;

        let doc = modifiers.doc;
        for arg in &mut args {
            arg.ty = refine(std::mem::take(&mut arg.ty), doc.as_deref(), DocTag::Param(&arg.name));
        }
        let return_type = refine(return_type, doc.as_deref(), DocTag::Return);

        Ok(Function {
            name,
            visibility: modifiers.visibility,
            is_static: modifiers.is_static,
            is_abstract: modifiers.is_abstract,
            is_final: modifiers.is_final,
            returns_reference,
            args,
            return_type,
            doc,
            span: Span::new(start, end),
        })
    }

    /// `(`の後から`)`までの引数リスト
    fn parse_arguments(&mut self) -> ParseResult<Vec<Variable>> {
        let mut args = Vec::new();
        loop {
            // 末尾のカンマは許すが、引数の無いカンマは許さない
            let token = self.next_or_eof("argument or ')'")?;
            match token.token {
                Token::RightParen => return Ok(args),
                Token::Comma => return Err(ParseError::unexpected(&token, "argument or ')'")),
                _ => {
                    self.stream.back();
                    args.push(self.parse_argument()?);
                }
            }

            let token = self.next_or_eof("',' or ')'")?;
            match token.token {
                Token::RightParen => return Ok(args),
                Token::Comma => {}
                _ => return Err(ParseError::unexpected(&token, "',' or ')'")),
            }
        }
    }

    /// `?Foo &...$name = default`
    fn parse_argument(&mut self) -> ParseResult<Variable> {
        let mut arg = Variable::default();
        let mut start = None;
        let mut typed = false;

        let end = loop {
            let token = self.next_or_eof("T_VARIABLE")?;
            start.get_or_insert(token.span.start);

            match token.token {
                Token::Variable(ref name) => {
                    arg.name = name.clone();
                    break token.span.end;
                }
                Token::Ampersand => arg.is_reference = true,
                Token::Ellipsis => arg.is_rest = true,
                // コンストラクタでのプロパティ昇格
                Token::Public => arg.visibility = Visibility::Public,
                Token::Protected => arg.visibility = Visibility::Protected,
                Token::Private => arg.visibility = Visibility::Private,
                Token::Readonly => arg.is_readonly = true,
                Token::Question
                | Token::Array
                | Token::Callable
                | Token::Static
                | Token::Identifier(_)
                | Token::NsSeparator
                    if !typed =>
                {
                    self.stream.back();
                    arg.ty = self.parse_inline_type()?;
                    typed = true;
                }
                _ => return Err(ParseError::unexpected(&token, "T_VARIABLE")),
            }
        };

        if matches!(self.stream.peek(), Some(Token::Equal)) {
            self.stream.next();
            self.stream.skip_value()?;
            arg.is_optional = true;
        }

        arg.span = Span::new(start.unwrap_or(end), end);
        Ok(arg)
    }

    /// 引数リストの後。戻り値の型と、宣言の終了位置を返す
    fn parse_function_tail(&mut self) -> ParseResult<(Type, usize)> {
        let mut return_type = Type::Unknown;
        let mut typed = false;

        loop {
            let token = self.next_or_eof("'{' or ';'")?;
            match token.token {
                Token::LeftBrace => {
                    let close = self.stream.skip_balanced_to(&Token::RightBrace)?;
                    return Ok((return_type, close.span.end));
                }
                Token::Semicolon => return Ok((return_type, token.span.end)),
                Token::Colon if !typed => {}
                _ if !typed => {
                    self.stream.back();
                    return_type = self.parse_inline_type()?;
                    typed = true;
                }
                _ => return Err(ParseError::unexpected(&token, "'{' or ';'")),
            }
        }
    }
}
