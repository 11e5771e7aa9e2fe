//! ドキュメントコメントからの型注釈の抽出

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, space0, space1},
    combinator::{opt, value},
    sequence::{preceded, tuple},
    IResult,
};

use crate::ast::Type;

use super::{map_type, normalize_generic};

/// 参照するタグ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTag<'a> {
    Var,
    /// 引数名（`$`なし）
    Param(&'a str),
    Return,
}

impl DocTag<'_> {
    fn name(&self) -> &'static str {
        match self {
            DocTag::Var => "@var",
            DocTag::Param(_) => "@param",
            DocTag::Return => "@return",
        }
    }
}

/// タグに対応する型表記を取り出す
///
/// 行単位で走査し、最初に一致した行を採用する。
/// `@param`は引数名が一致する行のみを対象とする。
pub fn extract_tag_type(doc: &str, doc_tag: DocTag<'_>) -> Option<String> {
    doc.lines().find_map(|line| {
        let (_, (ty, var)) = tag_line(line, doc_tag.name()).ok()?;
        match doc_tag {
            DocTag::Param(name) if var != Some(name) => None,
            _ => Some(ty.to_string()),
        }
    })
}

/// 型注釈を型に解決する
///
/// 共用体（`int|string`）は`Unknown`に畳み込む。
pub fn resolve_annotation(raw: &str) -> Type {
    let raw = raw.trim();
    if raw.split('|').filter(|part| !part.trim().is_empty()).count() >= 2 {
        return Type::Unknown;
    }

    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("array<") || lower.starts_with("object<") {
        map_type(&normalize_generic(raw))
    } else {
        map_type(raw)
    }
}

/// ドキュメントコメントから型を求める。タグが無ければ`Unknown`
pub fn doc_type(doc: &str, doc_tag: DocTag<'_>) -> Type {
    extract_tag_type(doc, doc_tag)
        .map(|raw| resolve_annotation(&raw))
        .unwrap_or_default()
}

/// 現在の型が`Unknown`の場合のみドキュメントコメントで補う
pub fn refine(current: Type, doc: Option<&str>, doc_tag: DocTag<'_>) -> Type {
    if !current.is_unknown() {
        return current;
    }
    doc.map(|doc| doc_type(doc, doc_tag)).unwrap_or_default()
}

/// ` * @param array<int, Foo> $name ...` 形式の行を解析する
fn tag_line<'a>(line: &'a str, tag_name: &'static str) -> IResult<&'a str, (&'a str, Option<&'a str>)> {
    let (rest, _) = line_prefix(line)?;
    let (rest, _) = tag(tag_name)(rest)?;
    let (rest, _) = space1(rest)?;
    let (rest, ty) = type_token(rest)?;
    let (rest, var) = opt(preceded(space1, variable_name))(rest)?;
    Ok((rest, (ty, var)))
}

/// 行頭の空白・`/**`・`*`を読み飛ばす
fn line_prefix(input: &str) -> IResult<&str, ()> {
    value(
        (),
        tuple((space0, opt(tag("/**")), space0, take_while(|c| c == '*'), space0)),
    )(input)
}

/// 型表記。山括弧の内側では空白やカンマも型の一部とみなす
fn type_token(input: &str) -> IResult<&str, &str> {
    let mut depth = 0usize;
    let mut end = input.len();
    for (idx, ch) in input.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if depth == 0 && c.is_whitespace() => {
                end = idx;
                break;
            }
            '*' if depth == 0 && input[idx..].starts_with("*/") => {
                end = idx;
                break;
            }
            _ => {}
        }
    }

    if end == 0 {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TakeWhile1,
        )));
    }
    Ok((&input[end..], &input[..end]))
}

/// `$name`・`...$name`・`&$name`。名前全体を読むので部分一致しない
fn variable_name(input: &str) -> IResult<&str, &str> {
    preceded(
        tuple((opt(alt((tag("..."), tag("&")))), char('$'))),
        take_while1(|c: char| c.is_alphanumeric() || c == '_'),
    )(input)
}
