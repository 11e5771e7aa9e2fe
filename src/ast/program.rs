//! 名前空間とインポート

use serde::{Deserialize, Serialize};

use super::{Class, Function, Visibility};

/// 名前空間
///
/// 名前が空文字列の場合はグローバル名前空間を表す。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    pub uses: Vec<Use>,
    pub classes: Vec<Class>,
    pub functions: Vec<Function>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_global(&self) -> bool {
        self.name.is_empty()
    }

    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.name == name)
    }
}

/// `use`文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Use {
    Class { path: String, alias: Option<String> },
    Function { path: String, alias: Option<String> },
    Constant { path: String, alias: Option<String> },
    Trait(TraitUse),
}

/// クラス本体内のトレイト合成
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TraitUse {
    pub traits: Vec<String>,
    pub aliases: Vec<TraitAlias>,
    pub precedences: Vec<TraitPrecedence>,
}

/// `Trait::method as [visibility] name;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitAlias {
    /// 修飾されていない`method as name`では`None`
    pub trait_name: Option<String>,
    pub method: String,
    pub visibility: Visibility,
    /// 別名が省略された場合は元のメソッド名
    pub name: String,
}

/// `Trait::method insteadof Other;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitPrecedence {
    pub trait_name: String,
    pub method: String,
    pub instead_of: Vec<String>,
}
