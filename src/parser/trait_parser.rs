//! クラス本体内の`use`（トレイト合成）の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseError, ParseResult, Parser};

impl Parser {
    /// `use A, B;` または `use A, B { ... }`
    pub(super) fn parse_trait_use(&mut self) -> ParseResult<TraitUse> {
        let mut trait_use = TraitUse {
            traits: self.parse_type_path_list()?,
            ..TraitUse::default()
        };

        let token = self.next_or_eof("';' or '{'")?;
        match token.token {
            Token::Semicolon => return Ok(trait_use),
            Token::LeftBrace => {}
            _ => return Err(ParseError::unexpected(&token, "';' or '{'")),
        }

        loop {
            let token = self.next_or_eof("'}'")?;
            match token.token {
                Token::RightBrace => return Ok(trait_use),
                Token::Semicolon => {}
                _ => {
                    self.stream.back();
                    self.parse_trait_rule(&mut trait_use)?;
                }
            }
        }
    }

    /// `A::m as protected n;`・`m as n;`・`A::m insteadof B, C;`
    fn parse_trait_rule(&mut self, trait_use: &mut TraitUse) -> ParseResult<()> {
        let first = self.parse_type_path()?;

        let token = self.next_or_eof("'::' or 'as'")?;
        let (trait_name, method) = match token.token {
            Token::DoubleColon => {
                let (method, _) = self.expect_name("method name")?;
                (Some(first), method)
            }
            Token::As => {
                self.stream.back();
                (None, first)
            }
            _ => return Err(ParseError::unexpected(&token, "'::' or 'as'")),
        };

        let token = self.next_or_eof("'as' or 'insteadof'")?;
        match token.token {
            Token::As => {
                let alias = self.parse_trait_alias(trait_name, method)?;
                trait_use.aliases.push(alias);
                Ok(())
            }
            Token::Identifier(ref word) if word.eq_ignore_ascii_case("insteadof") => {
                let Some(trait_name) = trait_name else {
                    return Err(ParseError::unexpected(&token, "'as'"));
                };
                let instead_of = self.parse_type_path_list()?;
                self.stream.expect(&Token::Semicolon)?;
                trait_use.precedences.push(TraitPrecedence {
                    trait_name,
                    method,
                    instead_of,
                });
                Ok(())
            }
            _ => Err(ParseError::unexpected(&token, "'as' or 'insteadof'")),
        }
    }

    /// `as`の後。可視性と別名はどちらも省略できる
    fn parse_trait_alias(&mut self, trait_name: Option<String>, method: String) -> ParseResult<TraitAlias> {
        let mut visibility = None;
        let mut name = None;

        loop {
            let token = self.next_or_eof("';'")?;
            match token.token {
                Token::Semicolon => break,
                Token::Public if visibility.is_none() => visibility = Some(Visibility::Public),
                Token::Protected if visibility.is_none() => visibility = Some(Visibility::Protected),
                Token::Private if visibility.is_none() => visibility = Some(Visibility::Private),
                // 最後に現れた名前が別名になる
                Token::Identifier(ref alias) => name = Some(alias.clone()),
                ref t if t.is_keyword() => name = Some(token.text.clone()),
                _ => return Err(ParseError::unexpected(&token, "';'")),
            }
        }

        Ok(TraitAlias {
            trait_name,
            name: name.unwrap_or_else(|| method.clone()),
            method,
            visibility: visibility.unwrap_or_default(),
        })
    }
}
