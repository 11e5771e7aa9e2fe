//! エラーケースのパーサーテスト

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_missing_closing_brace() {
    // クラス本体の途中で入力が終わる
    let source = r#"<?php
    class A {
        public function f() {}
    "#;

    let error = assert_parse_error(source);
    assert!(matches!(error, ParseError::UnexpectedEof { .. }));
}

#[test]
fn test_unterminated_function_body() {
    // 関数本体の波括弧が閉じていない
    let error = assert_parse_error("<?php function f() { if (1) {");
    assert!(matches!(error, ParseError::UnexpectedEof { .. }));
}

#[test]
fn test_unexpected_class_member() {
    // クラス本体に現れない種類のトークン
    let error = assert_parse_error("<?php\nclass A {\n    42\n}");

    match error {
        ParseError::UnexpectedToken {
            expected,
            found,
            value,
            line,
            column,
            ..
        } => {
            assert_eq!(expected, "class member");
            assert_eq!(found, "T_LNUMBER");
            assert_eq!(value, "42");
            assert_eq!(line, 3);
            assert_eq!(column, 5);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_class_without_name() {
    // クラス名が無い
    let error = assert_parse_error("<?php class { }");
    assert!(matches!(
        error,
        ParseError::UnexpectedToken { ref expected, ref found, .. }
            if expected == "T_STRING" && found == "'{'"
    ));
}

#[test]
fn test_interface_cannot_implement() {
    // インターフェースにimplementsは書けない
    assert_parse_error("<?php interface I implements J {}");
}

#[test]
fn test_modifier_not_accepted_by_declaration() {
    // 宣言が受け付けない修飾子は構文エラー
    let error = assert_parse_error("<?php class A { static const X = 1; }");
    assert!(matches!(
        error,
        ParseError::UnexpectedToken { ref found, .. } if found == "T_STATIC"
    ));

    assert_parse_error("<?php class A { abstract $x; }");
    assert_parse_error("<?php class A { final var $x; }");
}

#[test]
fn test_bad_trait_rule() {
    // `::`も`as`も続かないトレイト規則
    assert_parse_error("<?php class A { use T { foo; } }");
    assert_parse_error("<?php class A { use T { foo insteadof B; } }");
}

#[test]
fn test_missing_argument_list() {
    // 関数名の後に引数リストが無い
    let error = assert_parse_error("<?php function f {}");
    assert!(matches!(
        error,
        ParseError::UnexpectedToken { ref found, .. } if found == "'{'"
    ));
}

#[test]
fn test_malformed_argument() {
    // 引数に変数名が無い
    assert_parse_error("<?php function f(int 5) {}");
}

#[test]
fn test_missing_namespace_terminator() {
    // 名前空間宣言の後に`;`も`{`も無い
    assert_parse_error("<?php namespace A class B {}");
}

#[test]
fn test_comma_without_argument() {
    // 引数の無いカンマは構文エラー
    let error = assert_parse_error("<?php function f(,, $x) {}");
    assert!(matches!(
        error,
        ParseError::UnexpectedToken { ref found, ref expected, .. }
            if found == "','" && expected == "argument or ')'"
    ));

    assert_parse_error("<?php function f($x,, $y) {}");
}

#[test]
fn test_arguments_need_separator() {
    // 引数の間にはカンマが必要
    let error = assert_parse_error("<?php function f($x $y) {}");
    assert!(matches!(
        error,
        ParseError::UnexpectedToken { ref found, .. } if found == "T_VARIABLE"
    ));
}

#[test]
fn test_unterminated_doc_comment() {
    // 閉じられていないドキュメントコメントは不正なトークン
    let error = assert_parse_error("<?php class A { /** never closed");
    assert!(matches!(
        error,
        ParseError::UnexpectedToken { ref found, .. } if found == "T_BAD_CHARACTER"
    ));
}
