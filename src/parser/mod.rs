//! パーサーモジュール
//!
//! トークン列から宣言（名前空間・use・クラス・関数・プロパティ・定数）を抽出します。
//! 再帰下降構文解析を使用しますが、式や文は解釈せず、
//! 関数本体や初期値は括弧の対応だけを見て読み飛ばします。
//!
//! ## 修飾子の保留
//!
//! ドキュメントコメントや`public`・`static`・`abstract`などの修飾子は
//! 宣言キーワードより前に現れるため、いったん解析コンテキストに保留し、
//! 次の宣言がまとめて取り出します。
//!
//! ```php
//! /** @var int */
//! protected static $count = 0;
//! ```
//!
//! 宣言に結び付かなかった修飾子は、認識できない構文やクラスの閉じ波括弧で捨てられ、
//! 後続の宣言に紛れ込むことはありません。

mod context;
mod decl_parser;
mod function_parser;
mod parser_impl;
mod trait_parser;
mod type_parser;

// 公開API
pub use parser_impl::Parser;

use crate::ast::Namespace;
use crate::error::ParserError;
use crate::lexer::Lexer;

pub type ParseError = ParserError;
pub type ParseResult<T> = Result<T, ParseError>;

/// ソースコード文字列を直接解析する
///
/// 字句解析のエラートークンは検査しない。検査が必要な場合は
/// [`crate::driver::SourceUnit`]を使う。
pub fn parse_source(source: &str) -> ParseResult<Vec<Namespace>> {
    let mut parser = Parser::new(Lexer::new(source).collect_tokens());
    parser.parse()
}
