//! 型の定義

use serde::{Deserialize, Serialize};
use std::fmt;

/// 宣言に付与される型
///
/// 閉じた型の集合。`Array`と`Object`のみが再帰的だが、
/// 常に有限の文字列から構築されるため循環は発生しない。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Type {
    Int,
    Float,
    String,
    Bool,
    Array(Box<Type>),
    /// キー型と値型
    Object(Box<Type>, Box<Type>),
    Class(String),
    Callable,
    #[default]
    Unknown,
    Resource,
    Void,
}

impl Type {
    pub fn array_of(inner: Type) -> Self {
        Type::Array(Box::new(inner))
    }

    pub fn object_of(key: Type, value: Type) -> Self {
        Type::Object(Box::new(key), Box::new(value))
    }

    pub fn class(name: impl Into<String>) -> Self {
        Type::Class(name.into())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }
}

/// ドキュメントコメントと同じ表記で出力する
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Bool => write!(f, "bool"),
            Type::Array(inner) => write!(f, "array<{}>", inner),
            Type::Object(key, value) => write!(f, "object<{},{}>", key, value),
            Type::Class(name) => write!(f, "{}", name),
            Type::Callable => write!(f, "callable"),
            Type::Unknown => write!(f, "mixed"),
            Type::Resource => write!(f, "resource"),
            Type::Void => write!(f, "void"),
        }
    }
}
