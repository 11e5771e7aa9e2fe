//! 宣言（名前空間、use、クラス、プロパティ、定数）の解析

use crate::ast::*;
use crate::lexer::Token;
use crate::resolve::{refine, DocTag};

use super::context::{Modifiers, CLASS_MODIFIERS, CONST_MODIFIERS, FIELD_MODIFIERS};
use super::parser_impl::name_of;
use super::{ParseError, ParseResult, Parser};

/// `use`文の種類
#[derive(Debug, Clone, Copy)]
enum UseKind {
    Class,
    Function,
    Constant,
}

impl UseKind {
    fn build(self, path: String, alias: Option<String>) -> Use {
        match self {
            UseKind::Class => Use::Class { path, alias },
            UseKind::Function => Use::Function { path, alias },
            UseKind::Constant => Use::Constant { path, alias },
        }
    }
}

impl Parser {
    /// `namespace A\B;`・`namespace A\B { ... }`・`namespace { ... }`
    ///
    /// 宣言のたびに新しい名前空間を開く。波括弧の対応は追跡しない。
    pub(super) fn parse_namespace(&mut self) -> ParseResult<()> {
        self.ctx.discard_pending();

        let name = match self.stream.peek() {
            // `namespace\foo()`は名前空間相対の参照
            Some(Token::NsSeparator) => return Ok(()),
            Some(Token::LeftBrace) => String::new(),
            _ => self.parse_type_path()?,
        };

        let token = self.next_or_eof("'{' or ';'")?;
        if !matches!(token.token, Token::LeftBrace | Token::Semicolon) {
            return Err(ParseError::unexpected(&token, "'{' or ';'"));
        }

        log::debug!("namespace `{}`", name);
        self.ctx.open_namespace(name);
        Ok(())
    }

    /// トップレベルの`use`文
    pub(super) fn parse_use(&mut self) -> ParseResult<()> {
        self.ctx.discard_pending();

        let kind = match self.stream.peek() {
            Some(Token::Function) => {
                self.stream.next();
                UseKind::Function
            }
            Some(Token::Const) => {
                self.stream.next();
                UseKind::Constant
            }
            _ => UseKind::Class,
        };

        loop {
            let path = self.parse_type_path()?;
            if path.ends_with('\\') {
                self.stream.expect(&Token::LeftBrace)?;
                self.parse_group_use(kind, &path)?;
            } else {
                let alias = self.parse_use_alias()?;
                self.ctx.namespace_mut().uses.push(kind.build(path, alias));
            }

            if !self.list_continues()? {
                return Ok(());
            }
        }
    }

    /// `use A\{B, C as D};`の波括弧の中身
    fn parse_group_use(&mut self, kind: UseKind, prefix: &str) -> ParseResult<()> {
        loop {
            if matches!(self.stream.peek(), Some(Token::RightBrace)) {
                self.stream.next();
                return Ok(());
            }

            let path = self.parse_type_path()?;
            let alias = self.parse_use_alias()?;
            let full = format!("{}{}", prefix, path.trim_start_matches('\\'));
            self.ctx.namespace_mut().uses.push(kind.build(full, alias));

            let token = self.next_or_eof("',' or '}'")?;
            match token.token {
                Token::Comma => {}
                Token::RightBrace => return Ok(()),
                _ => return Err(ParseError::unexpected(&token, "',' or '}'")),
            }
        }
    }

    fn parse_use_alias(&mut self) -> ParseResult<Option<String>> {
        if !matches!(self.stream.peek(), Some(Token::As)) {
            return Ok(None);
        }
        self.stream.next();
        let token = self.stream.expect(&Token::Identifier(String::new()))?;
        Ok(Some(token.text))
    }

    /// クラス・インターフェース・トレイト宣言
    ///
    /// 保留中の修飾子（`interface`・`trait`を含む）はここで取り出される。
    pub(super) fn parse_class(&mut self, keyword_start: usize) -> ParseResult<()> {
        let modifiers = Modifiers::fold(self.ctx.take_pending(), CLASS_MODIFIERS, "class modifier")?;
        let start = modifiers.start.unwrap_or(keyword_start);

        let name = self.stream.expect(&Token::Identifier(String::new()))?;
        let mut class = Class {
            name: name.text,
            is_interface: modifiers.is_interface,
            is_trait: modifiers.is_trait,
            is_abstract: modifiers.is_abstract,
            is_final: modifiers.is_final,
            is_readonly: modifiers.is_readonly,
            doc: modifiers.doc,
            ..Class::default()
        };

        loop {
            let token = self.next_or_eof("'{'")?;
            match token.token {
                // インターフェースは複数のインターフェースを継承できる
                Token::Extends if class.is_interface => {
                    class.interfaces.extend(self.parse_type_path_list()?)
                }
                Token::Extends if class.parent.is_none() => {
                    class.parent = Some(self.parse_type_path()?)
                }
                Token::Implements if !class.is_interface => {
                    class.interfaces.extend(self.parse_type_path_list()?)
                }
                Token::LeftBrace => break,
                _ => return Err(ParseError::unexpected(&token, "'{'")),
            }
        }

        let end = self.parse_class_body(&mut class)?;
        class.span = Span::new(start, end);

        log::debug!(
            "class `{}` ({} methods, {} properties, {} constants)",
            class.name,
            class.functions.len(),
            class.variables.len(),
            class.constants.len()
        );
        self.ctx.namespace_mut().classes.push(class);
        Ok(())
    }

    /// クラス本体。閉じ波括弧の終了位置を返す
    fn parse_class_body(&mut self, class: &mut Class) -> ParseResult<usize> {
        loop {
            let token = self.next_or_eof("'}'")?;
            match token.token {
                Token::RightBrace => {
                    self.ctx.discard_pending();
                    return Ok(token.span.end);
                }
                Token::Use => {
                    self.ctx.discard_pending();
                    class.uses.push(Use::Trait(self.parse_trait_use()?));
                }
                Token::DocComment(_)
                | Token::Public
                | Token::Protected
                | Token::Private
                | Token::Static
                | Token::Final
                | Token::Abstract
                | Token::Readonly
                | Token::Var => self.ctx.store(token),
                Token::Function => {
                    let function = self.parse_function(token.span.start)?;
                    class.functions.push(function);
                }
                Token::Const => {
                    let constants = self.parse_constants(token.span.start)?;
                    class.constants.extend(constants);
                }
                Token::Variable(_) => {
                    self.stream.back();
                    let fields = self.parse_fields(token.span.start, Type::Unknown)?;
                    class.variables.extend(fields);
                }
                Token::Question
                | Token::Identifier(_)
                | Token::NsSeparator
                | Token::Array
                | Token::Callable => {
                    self.stream.back();
                    let ty = self.parse_inline_type()?;
                    let fields = self.parse_fields(token.span.start, ty)?;
                    class.variables.extend(fields);
                }
                _ => return Err(ParseError::unexpected(&token, "class member")),
            }
        }
    }

    /// `public int $a = 1, $b;` のように修飾子を共有するプロパティ宣言
    fn parse_fields(&mut self, start_hint: usize, ty: Type) -> ParseResult<Vec<Variable>> {
        let modifiers = Modifiers::fold(self.ctx.take_pending(), FIELD_MODIFIERS, "property modifier")?;
        let mut start = modifiers.start.unwrap_or(start_hint);
        let mut fields = Vec::new();

        loop {
            let token = self.stream.expect(&Token::Variable(String::new()))?;
            let name = match &token.token {
                Token::Variable(name) => name.clone(),
                _ => return Err(ParseError::unexpected(&token, "T_VARIABLE")),
            };

            let mut field = Variable {
                name,
                visibility: modifiers.visibility,
                is_static: modifiers.is_static,
                is_readonly: modifiers.is_readonly,
                ty: refine(ty.clone(), modifiers.doc.as_deref(), DocTag::Var),
                doc: modifiers.doc.clone(),
                span: Span::new(start, token.span.end),
                ..Variable::default()
            };

            if matches!(self.stream.peek(), Some(Token::Equal)) {
                self.stream.next();
                self.stream.skip_value()?;
                field.is_optional = true;
            }
            fields.push(field);

            if !self.list_continues()? {
                return Ok(fields);
            }
            start = self.stream.peek_span_start().unwrap_or(start);
        }
    }

    /// `const A = 1, B = 2;`
    fn parse_constants(&mut self, start_hint: usize) -> ParseResult<Vec<Constant>> {
        let modifiers = Modifiers::fold(self.ctx.take_pending(), CONST_MODIFIERS, "constant modifier")?;
        let mut start = modifiers.start.unwrap_or(start_hint);
        let mut constants = Vec::new();

        loop {
            let token = self.next_or_eof("constant name")?;
            let Some(name) = name_of(&token) else {
                return Err(ParseError::unexpected(&token, "constant name"));
            };

            if matches!(self.stream.peek(), Some(Token::Equal)) {
                self.stream.next();
                self.stream.skip_value()?;
            }

            constants.push(Constant {
                name,
                visibility: modifiers.visibility,
                is_final: modifiers.is_final,
                ty: refine(Type::Unknown, modifiers.doc.as_deref(), DocTag::Var),
                doc: modifiers.doc.clone(),
                span: Span::new(start, token.span.end),
            });

            if !self.list_continues()? {
                return Ok(constants);
            }
            start = self.stream.peek_span_start().unwrap_or(start);
        }
    }
}
