//! 型解決モジュール
//!
//! インライン型ヒントとドキュメントコメントの型注釈（`@var`・`@param`・`@return`）
//! を`Type`に変換します。インライン型が`Unknown`の場合のみ注釈で補います。

mod doc_tags;
mod generic_scanner;
mod type_mapper;

pub use doc_tags::{doc_type, extract_tag_type, refine, resolve_annotation, DocTag};
pub use generic_scanner::normalize_generic;
pub use type_mapper::map_type;
