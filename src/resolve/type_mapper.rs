//! 型表記文字列から`Type`への変換

use crate::ast::Type;

/// 型表記を型に変換する
///
/// スカラー型のキーワードは大文字小文字を区別しない。
/// 認識できない名前はクラス名として扱う。
pub fn map_type(raw: &str) -> Type {
    let raw = raw.trim();
    if raw.is_empty() {
        return Type::Unknown;
    }

    // 共用体型は扱わない
    if raw.contains('|') {
        return Type::Unknown;
    }

    if let Some(inner) = raw.strip_prefix('?') {
        return map_type(inner);
    }

    if let Some(prefix) = raw.strip_suffix("[]") {
        return Type::array_of(map_type(prefix));
    }

    if let Some((keyword, args)) = split_generic(raw) {
        return map_generic(&keyword, &split_top_level(args));
    }

    match raw.to_ascii_lowercase().as_str() {
        "int" | "integer" => Type::Int,
        "float" => Type::Float,
        "string" => Type::String,
        "bool" | "boolean" => Type::Bool,
        "array" => Type::array_of(Type::Unknown),
        "object" => Type::object_of(Type::String, Type::Unknown),
        "callable" => Type::Callable,
        "mixed" => Type::Unknown,
        "resource" => Type::Resource,
        "void" => Type::Void,
        _ => Type::Class(raw.to_string()),
    }
}

fn map_generic(keyword: &str, params: &[&str]) -> Type {
    match (keyword, params) {
        ("array", [value]) => Type::array_of(map_type(value)),
        // 数値インデックスの配列はインデックス型を捨てる
        ("array", [key, value]) if key.trim().eq_ignore_ascii_case("int") => {
            Type::array_of(map_type(value))
        }
        ("array", [key, value]) | ("object", [key, value]) => {
            Type::object_of(map_type(key), map_type(value))
        }
        ("object", [value]) => Type::object_of(Type::String, map_type(value)),
        _ => Type::Unknown,
    }
}

/// `array<...>`・`object<...>`をキーワード（小文字）と引数部分に分ける
fn split_generic(raw: &str) -> Option<(String, &str)> {
    let open = raw.find('<')?;
    let inner = raw.strip_suffix('>')?.get(open + 1..)?;
    let keyword = raw[..open].trim().to_ascii_lowercase();
    matches!(keyword.as_str(), "array" | "object").then_some((keyword, inner))
}

/// 山括弧の外側にあるカンマで分割する
fn split_top_level(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in args.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&args[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&args[start..]);
    parts
}
