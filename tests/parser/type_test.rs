//! インライン型とドキュメントコメントによる型解決のテスト

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case("int"; "lower")]
#[test_case("INT"; "upper")]
#[test_case("Int"; "title")]
fn test_inline_int_ignores_case(hint: &str) {
    // スカラー型のキーワードは大文字小文字を区別しない
    let source = format!("<?php function f({} $x) {{}}", hint);
    let function = single_function(&source);

    assert_eq!(function.args[0].ty, Type::Int);
}

#[test]
fn test_param_tag_fills_missing_type() {
    // 型ヒントが無い引数は@paramで補う
    let source = r#"<?php
    /**
     * @param string $x
     * @param int $count
     */
    function f($x, $count, $other) {}
    "#;

    let function = single_function(source);
    assert_eq!(function.arg("x").unwrap().ty, Type::String);
    assert_eq!(function.arg("count").unwrap().ty, Type::Int);
    assert_eq!(function.arg("other").unwrap().ty, Type::Unknown);
}

#[test]
fn test_inline_type_wins_over_doc() {
    // インライン型があればドキュメントコメントは無視する
    let source = r#"<?php
    /**
     * @param string $x
     * @return string
     */
    function f(int $x): int {}
    "#;

    let function = single_function(source);
    assert_eq!(function.args[0].ty, Type::Int);
    assert_eq!(function.return_type, Type::Int);
}

#[test]
fn test_union_annotation_is_unknown() {
    // 共用体の注釈は型を特定しない
    let source = r#"<?php
    /**
     * @param int|string $x
     * @return Foo|null
     */
    function f($x) {}
    "#;

    let function = single_function(source);
    assert_eq!(function.args[0].ty, Type::Unknown);
    assert_eq!(function.return_type, Type::Unknown);
}

#[test]
fn test_return_tag_generics() {
    // @returnの配列・連想配列表記
    let source = r#"<?php
    class A {
        /** @return int[] */
        public function a() {}
        /** @return array<int,Foo> */
        public function b() {}
        /** @return array<string, Foo> */
        public function c() {}
        /** @return array<string,array<int,Foo>> */
        public function d() {}
        /** @return mixed */
        public function e() {}
    }
    "#;

    let class = single_class(source);
    assert_eq!(class.function("a").unwrap().return_type, Type::array_of(Type::Int));
    assert_eq!(
        class.function("b").unwrap().return_type,
        Type::array_of(Type::class("Foo"))
    );
    assert_eq!(
        class.function("c").unwrap().return_type,
        Type::object_of(Type::String, Type::class("Foo"))
    );
    assert_eq!(
        class.function("d").unwrap().return_type,
        Type::object_of(Type::String, Type::array_of(Type::class("Foo")))
    );
    assert_eq!(class.function("e").unwrap().return_type, Type::Unknown);
}

#[test]
fn test_var_tag_on_property() {
    // プロパティの@var
    let source = r#"<?php
    class A {
        /** @var \App\Item[] */
        protected $items = [];
        /** @var bool */
        public int $count = 0;
    }
    "#;

    let class = single_class(source);
    assert_eq!(
        class.variable("items").unwrap().ty,
        Type::array_of(Type::class("\\App\\Item"))
    );
    // インライン型が優先される
    assert_eq!(class.variable("count").unwrap().ty, Type::Int);
}

#[test]
fn test_variadic_param_tag() {
    // 可変長引数の@param
    let source = "<?php /** @param string ...$parts */ function join(...$parts) {}";

    let function = single_function(source);
    assert!(function.args[0].is_rest);
    assert_eq!(function.args[0].ty, Type::String);
}

#[test]
fn test_type_display() {
    // 型の表示形式
    let source = "<?php /** @return array<string,int[]> */ function f() {}";

    let function = single_function(source);
    assert_eq!(function.return_type.to_string(), "object<string,array<int>>");
}
