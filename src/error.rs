//! 統一的なエラーハンドリングモジュール
//!
//! 字句解析・構文解析・ファイル操作で発生するエラー型と、
//! codespan-reportingを使ったエラー報告の仕組みを提供します。

use crate::ast::Span;
use crate::lexer::TokenWithPosition;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// 宣言抽出全体の統一エラー型
#[derive(Error, Debug, Clone)]
pub enum DeclError {
    /// レキサーエラー
    #[error("字句解析エラー: {0}")]
    Lexer(#[from] LexerError),

    /// パーサーエラー
    #[error("構文解析エラー: {0}")]
    Parser(#[from] ParserError),

    /// ファイルI/Oエラー
    #[error("ファイル操作エラー: {0}")]
    Io(String),

    /// その他のエラー
    #[error("{0}")]
    Other(String),
}

/// レキサーエラーの詳細
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexerError {
    #[error("認識できないトークン: '{token}' ({line}:{column})")]
    UnrecognizedToken {
        token: String,
        line: usize,
        column: usize,
        span: Span,
    },
}

/// パーサーエラーの詳細
///
/// 文法規則に一致しないトークンはすべて`UnexpectedToken`になる。
/// `UnexpectedEof`は入力の途中終了を表す同種のエラー。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParserError {
    #[error("予期しないトークン: {expected}を期待しましたが、{found} '{value}' が見つかりました ({line}:{column})")]
    UnexpectedToken {
        expected: String,
        found: String,
        value: String,
        line: usize,
        column: usize,
        span: Span,
    },

    #[error("予期しない入力の終了: {expected}を期待していました")]
    UnexpectedEof { expected: String, span: Span },
}

impl ParserError {
    /// トークンから`UnexpectedToken`を作成
    pub fn unexpected(token: &TokenWithPosition, expected: impl Into<String>) -> Self {
        ParserError::UnexpectedToken {
            expected: expected.into(),
            found: token.token.to_string(),
            value: token.text.clone(),
            line: token.position.line,
            column: token.position.column,
            span: token.span.clone().into(),
        }
    }

    pub fn eof(expected: impl Into<String>, offset: usize) -> Self {
        ParserError::UnexpectedEof {
            expected: expected.into(),
            span: Span::new(offset, offset),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ParserError::UnexpectedToken { span, .. } | ParserError::UnexpectedEof { span, .. } => {
                *span
            }
        }
    }
}

/// エラー情報とソースコードの位置情報を含むエラー
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: DeclError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: DeclError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let (message, labels) = match &self.error {
            DeclError::Lexer(e) => match e {
                LexerError::UnrecognizedToken { token, span, .. } => (
                    format!("認識できないトークン: '{}'", token),
                    vec![Label::primary(self.file_id, span.start..span.end)
                        .with_message("ここに不正なトークンがあります")],
                ),
            },
            DeclError::Parser(e) => match e {
                ParserError::UnexpectedToken {
                    expected,
                    found,
                    value,
                    span,
                    ..
                } => (
                    format!("予期しないトークン: {}を期待しましたが、{}が見つかりました", expected, found),
                    vec![Label::primary(self.file_id, span.start..span.end)
                        .with_message(format!("'{}'", value))],
                ),
                ParserError::UnexpectedEof { expected, span } => (
                    format!("予期しない入力の終了: {}を期待していました", expected),
                    vec![Label::primary(self.file_id, span.start..span.end)],
                ),
            },
            DeclError::Io(message) => (format!("ファイル操作エラー: {}", message), vec![]),
            DeclError::Other(message) => (message.clone(), vec![]),
        };

        Diagnostic::error()
            .with_message(message)
            .with_labels(labels)
    }
}

/// 複数のエラーを蓄積するためのコレクター
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<DiagnosticError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// エラーを追加
    pub fn add_error(&mut self, error: DeclError, file_id: usize) {
        self.errors.push(DiagnosticError::new(error, file_id));
    }

    /// エラーがあるかどうか
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// エラーの数
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// すべてのエラーを取得
    pub fn errors(&self) -> &[DiagnosticError] {
        &self.errors
    }

    /// 最初のエラーを取得
    pub fn first_error(&self) -> Option<&DiagnosticError> {
        self.errors.first()
    }
}

/// Result型のエイリアス
pub type DeclResult<T> = Result<T, DeclError>;

impl From<std::io::Error> for DeclError {
    fn from(e: std::io::Error) -> Self {
        DeclError::Io(e.to_string())
    }
}
