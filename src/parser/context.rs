//! 解析コンテキスト
//!
//! 名前空間の状態と、宣言キーワードより前に現れた修飾子トークン
//! （ドキュメントコメント・可視性・`static`・`final`・`abstract`など）の
//! FIFOバッファを保持します。

use std::collections::VecDeque;

use crate::ast::{Namespace, Visibility};
use crate::error::ParserError;
use crate::lexer::{Token, TokenWithPosition};

use super::ParseResult;

/// 解析中の状態
#[derive(Debug, Default)]
pub struct ParseContext {
    namespaces: Vec<Namespace>,
    /// 有効な名前空間（入れ子はないので高々一つ）
    active: Option<usize>,
    pending: VecDeque<TokenWithPosition>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 修飾子トークンを保留する
    pub fn store(&mut self, token: TokenWithPosition) {
        self.pending.push_back(token);
    }

    /// 保留中の修飾子をすべて取り出す。呼び出し後のバッファは必ず空
    pub fn take_pending(&mut self) -> Vec<TokenWithPosition> {
        self.pending.drain(..).collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// 宣言に結び付かなかった修飾子を捨てる
    pub fn discard_pending(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("discarding {} unattached modifier token(s)", self.pending.len());
            self.pending.clear();
        }
    }

    /// 新しい名前空間を開き、有効な名前空間を置き換える
    pub fn open_namespace(&mut self, name: String) {
        self.namespaces.push(Namespace::new(name));
        self.active = Some(self.namespaces.len() - 1);
    }

    /// 有効な名前空間。無ければ暗黙のグローバル名前空間を作る
    pub fn namespace_mut(&mut self) -> &mut Namespace {
        let index = match self.active {
            Some(index) => index,
            None => {
                self.namespaces.push(Namespace::new(""));
                let index = self.namespaces.len() - 1;
                self.active = Some(index);
                index
            }
        };
        &mut self.namespaces[index]
    }

    /// 解析結果を取り出す
    pub fn finish(self) -> Vec<Namespace> {
        self.namespaces
    }
}

/// 修飾子の集計結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modifiers {
    /// 最初の修飾子トークンの開始位置
    pub start: Option<usize>,
    pub doc: Option<String>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_readonly: bool,
    pub is_interface: bool,
    pub is_trait: bool,
}

impl Modifiers {
    /// 取り出した修飾子を集計する
    ///
    /// `accepted`に含まれない種類のトークンは構文エラー。
    pub fn fold(
        tokens: Vec<TokenWithPosition>,
        accepted: &[Token],
        expected: &str,
    ) -> ParseResult<Self> {
        let mut modifiers = Modifiers::default();

        for token in tokens {
            if !accepted.iter().any(|kind| token.token.same_kind(kind)) {
                return Err(ParserError::unexpected(&token, expected));
            }
            modifiers.start.get_or_insert(token.span.start);

            match token.token {
                Token::DocComment(text) => modifiers.doc = Some(text),
                Token::Public | Token::Var => modifiers.visibility = Visibility::Public,
                Token::Protected => modifiers.visibility = Visibility::Protected,
                Token::Private => modifiers.visibility = Visibility::Private,
                Token::Static => modifiers.is_static = true,
                Token::Abstract => modifiers.is_abstract = true,
                Token::Final => modifiers.is_final = true,
                Token::Readonly => modifiers.is_readonly = true,
                Token::Interface => modifiers.is_interface = true,
                Token::Trait => modifiers.is_trait = true,
                _ => {}
            }
        }

        Ok(modifiers)
    }
}

/// クラス宣言が受け付ける修飾子
pub const CLASS_MODIFIERS: &[Token] = &[
    Token::DocComment(String::new()),
    Token::Interface,
    Token::Trait,
    Token::Final,
    Token::Abstract,
    Token::Readonly,
];

/// 関数・メソッド宣言が受け付ける修飾子
pub const FUNCTION_MODIFIERS: &[Token] = &[
    Token::DocComment(String::new()),
    Token::Public,
    Token::Protected,
    Token::Private,
    Token::Static,
    Token::Abstract,
    Token::Final,
];

/// プロパティ宣言が受け付ける修飾子
pub const FIELD_MODIFIERS: &[Token] = &[
    Token::DocComment(String::new()),
    Token::Public,
    Token::Protected,
    Token::Private,
    Token::Static,
    Token::Readonly,
    Token::Var,
];

/// 定数宣言が受け付ける修飾子
pub const CONST_MODIFIERS: &[Token] = &[
    Token::DocComment(String::new()),
    Token::Public,
    Token::Protected,
    Token::Private,
    Token::Final,
];
