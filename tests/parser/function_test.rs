//! 関数・メソッド宣言のパーサーテスト

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_function_with_parameters() {
    // 引数の型・参照渡し・可変長引数
    let function = single_function("<?php function f(int $a, &$b, string ...$rest) {}");

    assert_eq!(function.name, "f");
    assert_eq!(function.args.len(), 3);

    assert_eq!(function.args[0].name, "a");
    assert_eq!(function.args[0].ty, Type::Int);
    assert!(!function.args[0].is_reference);

    assert_eq!(function.args[1].name, "b");
    assert!(function.args[1].is_reference);
    assert_eq!(function.args[1].ty, Type::Unknown);

    assert_eq!(function.args[2].name, "rest");
    assert!(function.args[2].is_rest);
    assert_eq!(function.args[2].ty, Type::String);
}

#[test]
fn test_empty_function_parameters() {
    // 空の引数リスト
    let function = single_function("<?php function f() {}");

    assert!(function.args.is_empty());
    assert_eq!(function.return_type, Type::Unknown);
}

#[test]
fn test_default_values_skipped() {
    // 初期値は解釈せずに読み飛ばし、省略可能として記録する
    let source = r#"<?php
    function f(array $a = [1, 2], callable $c = null, ?Foo $f = null, $g = array('x' => [1]), $h) {}
    "#;
    let function = single_function(source);

    let names: Vec<_> = function.args.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c", "f", "g", "h"]);
    assert!(function.args[..4].iter().all(|a| a.is_optional));
    assert!(!function.args[4].is_optional);

    assert_eq!(function.args[0].ty, Type::array_of(Type::Unknown));
    assert_eq!(function.args[1].ty, Type::Callable);
    assert_eq!(function.args[2].ty, Type::class("Foo"));
}

#[test]
fn test_return_types() {
    // 戻り値の型ヒント
    let source = r#"<?php
    class A {
        public function a(): ?string {}
        public function b(): self {}
        public function c(): static {}
        public function d(): void {}
        public function e(): int|false {}
        public function &f(): array { return $this->x; }
    }
    "#;

    let class = single_class(source);
    assert_eq!(class.function("a").unwrap().return_type, Type::String);
    assert_eq!(class.function("b").unwrap().return_type, Type::class("self"));
    assert_eq!(class.function("c").unwrap().return_type, Type::class("static"));
    assert_eq!(class.function("d").unwrap().return_type, Type::Void);
    assert_eq!(class.function("e").unwrap().return_type, Type::Unknown);

    let f = class.function("f").unwrap();
    assert!(f.returns_reference);
    assert_eq!(f.return_type, Type::array_of(Type::Unknown));
}

#[test]
fn test_interface_methods_without_body() {
    // 本体の無いメソッド宣言
    let source = r#"<?php
    interface Repo {
        public function find(int $id): ?Entity;
        public function all();
    }
    "#;

    let class = single_class(source);
    assert_eq!(class.functions.len(), 2);
    assert_eq!(class.function("find").unwrap().return_type, Type::class("Entity"));
}

#[test]
fn test_body_is_skipped() {
    // 本体の中身は宣言として扱わない
    let source = r#"<?php
    function outer() {
        $x = '}';
        if (true) {
            function inner() {}
            class Hidden {}
        }
        return "{";
    }
    function after() {}
    "#;

    let namespaces = assert_parse_success(source);
    let names: Vec<_> = namespaces[0].functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["outer", "after"]);
    assert!(namespaces[0].classes.is_empty());
}

#[test]
fn test_closures_skipped() {
    // 無名関数は宣言ではない
    let source = r#"<?php
    $f = function ($x) use ($y) { return $x; };
    $g = static function () {};
    $h = function &() { static $v; return $v; };
    $i = fn($x) => $x * 2;
    function real() {}
    "#;

    let function = single_function(source);
    assert_eq!(function.name, "real");
}

#[test]
fn test_constructor_promotion() {
    // コンストラクタでのプロパティ昇格は引数の可視性として記録する
    let source = r#"<?php
    class Point {
        public function __construct(private int $x, protected $y = 0) {}
    }
    "#;

    let class = single_class(source);
    let constructor = class.function("__construct").unwrap();

    assert_eq!(constructor.args[0].visibility, Visibility::Private);
    assert_eq!(constructor.args[0].ty, Type::Int);
    assert_eq!(constructor.args[1].visibility, Visibility::Protected);
    assert!(constructor.args[1].is_optional);
}

#[test]
fn test_function_doc_kept() {
    // 関数のドキュメントコメント
    let function = single_function("<?php\n/**\n * Helper.\n */\nfunction helper() {}");

    assert_eq!(function.doc.as_deref(), Some("/**\n * Helper.\n */"));
}

#[test]
fn test_trailing_comma_in_arguments() {
    // 引数リスト末尾のカンマは許される
    let function = single_function("<?php function f(int $a, $b,) {}");

    let names: Vec<_> = function.args.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}
