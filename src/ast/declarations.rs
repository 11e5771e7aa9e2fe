//! 宣言の定義

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Span, Type, Use};

/// 可視性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// クラス・インターフェース・トレイト
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    /// 親クラス（単一継承）
    pub parent: Option<String>,
    /// クラスでは`implements`、インターフェースでは`extends`の一覧
    pub interfaces: Vec<String>,
    pub is_interface: bool,
    pub is_trait: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    /// `readonly class`
    pub is_readonly: bool,
    pub functions: Vec<Function>,
    pub variables: Vec<Variable>,
    pub constants: Vec<Constant>,
    /// トレイト合成（`Use::Trait`のみ）
    pub uses: Vec<Use>,
    pub doc: Option<String>,
    pub span: Span,
}

impl Class {
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants.iter().find(|c| c.name == name)
    }
}

/// 関数・メソッド宣言
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    /// 参照返し（`function &name()`）
    pub returns_reference: bool,
    pub args: Vec<Variable>,
    pub return_type: Type,
    pub doc: Option<String>,
    pub span: Span,
}

impl Function {
    pub fn arg(&self, name: &str) -> Option<&Variable> {
        self.args.iter().find(|a| a.name == name)
    }
}

/// フィールドまたは引数
///
/// 名前は先頭の`$`を含まない。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    /// デフォルト値を持つ
    pub is_optional: bool,
    pub is_rest: bool,
    pub is_reference: bool,
    pub is_readonly: bool,
    pub ty: Type,
    pub doc: Option<String>,
    pub span: Span,
}

/// クラス定数
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    pub visibility: Visibility,
    pub is_final: bool,
    pub ty: Type,
    pub doc: Option<String>,
    pub span: Span,
}
