//! 型パスとインライン型ヒントの解析

use crate::ast::Type;
use crate::lexer::Token;
use crate::resolve::map_type;

use super::{ParseError, ParseResult, Parser};

impl Parser {
    /// `\A\B\C`形式の型パス
    ///
    /// 区切りの後に名前が続かない場合は区切りで終わるパスを返す（グループuse用）。
    pub(super) fn parse_type_path(&mut self) -> ParseResult<String> {
        let mut path = String::new();

        let mut token = self.next_or_eof("type name")?;
        if matches!(token.token, Token::NsSeparator) {
            path.push('\\');
            token = self.next_or_eof("type name")?;
        }
        match &token.token {
            Token::Identifier(name) => path.push_str(name),
            _ => return Err(ParseError::unexpected(&token, "type name")),
        }

        while matches!(self.stream.peek(), Some(Token::NsSeparator)) {
            self.stream.next();
            path.push('\\');
            match self.stream.next() {
                Some(token) => match &token.token {
                    Token::Identifier(name) => path.push_str(name),
                    _ => {
                        self.stream.back();
                        break;
                    }
                },
                None => break,
            }
        }

        Ok(path)
    }

    /// カンマ区切りの型パスの並び
    pub(super) fn parse_type_path_list(&mut self) -> ParseResult<Vec<String>> {
        let mut paths = vec![self.parse_type_path()?];
        while matches!(self.stream.peek(), Some(Token::Comma)) {
            self.stream.next();
            paths.push(self.parse_type_path()?);
        }
        Ok(paths)
    }

    /// 引数・戻り値・プロパティのインライン型ヒント
    ///
    /// `A|B`の共用体は型を特定できないので`Unknown`とする。
    pub(super) fn parse_inline_type(&mut self) -> ParseResult<Type> {
        let ty = self.parse_single_type()?;

        let mut is_union = false;
        while matches!(self.stream.peek(), Some(Token::Pipe)) {
            self.stream.next();
            self.parse_single_type()?;
            is_union = true;
        }

        Ok(if is_union { Type::Unknown } else { ty })
    }

    fn parse_single_type(&mut self) -> ParseResult<Type> {
        let token = self.next_or_eof("type")?;
        match token.token {
            // null許容は元の型として扱う
            Token::Question => self.parse_single_type(),
            Token::Array => Ok(Type::array_of(Type::Unknown)),
            Token::Callable => Ok(Type::Callable),
            Token::Static => Ok(Type::class("static")),
            Token::Identifier(_) | Token::NsSeparator => {
                self.stream.back();
                let path = self.parse_type_path()?;
                Ok(map_type(&path))
            }
            _ => Err(ParseError::unexpected(&token, "type")),
        }
    }
}
