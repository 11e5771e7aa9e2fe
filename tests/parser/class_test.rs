//! クラス・インターフェース・トレイト宣言のパーサーテスト

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_class_kinds_and_flags() {
    // abstract / final / interface / trait の判別
    let source = r#"<?php
    abstract class A {}
    final class B {}
    interface I {}
    trait T {}
    "#;

    let namespaces = assert_parse_success(source);
    let classes = &namespaces[0].classes;

    assert_eq!(classes.len(), 4);
    assert!(classes[0].is_abstract && !classes[0].is_final);
    assert!(classes[1].is_final && !classes[1].is_abstract);
    assert!(classes[2].is_interface && !classes[2].is_trait);
    assert!(classes[3].is_trait && !classes[3].is_interface);
}

#[test]
fn test_interface_extends_list() {
    // インターフェースのextendsはインターフェース一覧になる
    let class = single_class("<?php interface I extends J, K {}");

    assert!(class.is_interface);
    assert_eq!(class.interfaces, vec!["J".to_string(), "K".to_string()]);
    assert_eq!(class.parent, None);
}

#[test]
fn test_qualified_parent() {
    // 完全修飾名の親クラス
    let class = single_class("<?php class A extends \\Base\\Model implements \\Countable {}");

    assert_eq!(class.parent.as_deref(), Some("\\Base\\Model"));
    assert_eq!(class.interfaces, vec!["\\Countable".to_string()]);
}

#[test]
fn test_doc_comment_attached() {
    // 直前のドキュメントコメントはクラスに付く
    let class = single_class("<?php /** Class doc */ final class A {}");

    assert_eq!(class.doc.as_deref(), Some("/** Class doc */"));
    assert!(class.is_final);
}

#[test]
fn test_class_span_includes_modifiers() {
    // スパンは最初の修飾子から閉じ波括弧まで
    let source = "<?php /** d */ class A { }";
    let class = single_class(source);

    assert_eq!(class.span, Span::new(6, source.len()));
}

#[test]
fn test_doc_does_not_leak_past_statement() {
    // 文の前のドキュメントコメントは次のクラスに付かない
    let class = single_class("<?php /** orphan */ $x = 1; class A {}");

    assert_eq!(class.doc, None);
}

#[test]
fn test_stray_modifier_discarded_at_class_end() {
    // クラス末尾の余った修飾子は次の宣言に紛れ込まない
    let source = r#"<?php
    class A {
        /** stray */
    }
    class B {}
    "#;

    let namespaces = assert_parse_success(source);

    assert_eq!(namespaces[0].classes[1].name, "B");
    assert_eq!(namespaces[0].classes[1].doc, None);
}

#[test]
fn test_class_constant_access_is_not_declaration() {
    // `Foo::class`と`$obj->class`はクラス宣言ではない
    let source = r#"<?php
    $name = Foo::class;
    $other = $obj->class;
    class Real {}
    "#;

    let class = single_class(source);
    assert_eq!(class.name, "Real");
}

#[test]
fn test_anonymous_class_skipped() {
    // 無名クラスは本体ごと読み飛ばす
    let source = r#"<?php
    $o = new class(1, function () { return 2; }) extends Base {
        public function f() {}
    };
    class After {}
    "#;

    let class = single_class(source);
    assert_eq!(class.name, "After");
    assert!(class.functions.is_empty());
}

#[test]
fn test_enum_skipped() {
    // 列挙型は抽出しない
    let source = r#"<?php
    enum Suit: string {
        case Hearts = 'H';
        public function label(): string { return 'x'; }
    }
    class After {}
    "#;

    assert_eq!(single_class(source).name, "After");
}

#[test]
fn test_heredoc_contents_ignored() {
    // ヒアドキュメント内のクラス風テキストは宣言ではない
    let source = "<?php\n$s = <<<EOT\nclass Fake {\nEOT;\nclass Real {}\n";

    assert_eq!(single_class(source).name, "Real");
}

#[test]
fn test_inline_html_between_blocks() {
    // 開始・終了タグの外側は無視する
    let source = "<html><?php class A {} ?>\n<p>text</p><?php class B {}";

    let namespaces = assert_parse_success(source);
    let names: Vec<_> = namespaces[0].classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_properties() {
    // 修飾子を共有する複数プロパティと初期値
    let source = r#"<?php
    class A {
        public $a;
        protected static $b = 1, $c;
        var $d;
        private ?int $e = null;
    }
    "#;

    let class = single_class(source);
    let names: Vec<_> = class.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "d", "e"]);

    let a = class.variable("a").unwrap();
    assert_eq!(a.visibility, Visibility::Public);
    assert!(!a.is_static && !a.is_optional);

    let b = class.variable("b").unwrap();
    assert_eq!(b.visibility, Visibility::Protected);
    assert!(b.is_static && b.is_optional);

    let c = class.variable("c").unwrap();
    assert_eq!(c.visibility, Visibility::Protected);
    assert!(c.is_static && !c.is_optional);

    assert_eq!(class.variable("d").unwrap().visibility, Visibility::Public);

    let e = class.variable("e").unwrap();
    assert_eq!(e.visibility, Visibility::Private);
    assert_eq!(e.ty, Type::Int);
    assert!(e.is_optional);
}

#[test]
fn test_constants() {
    // 定数リストと@varによる型
    let source = r#"<?php
    class A {
        const X = 1, Y = [1, 2];
        /** @var string */
        private const Z = 'z';
    }
    "#;

    let class = single_class(source);
    let names: Vec<_> = class.constants.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["X", "Y", "Z"]);

    let z = class.constant("Z").unwrap();
    assert_eq!(z.visibility, Visibility::Private);
    assert_eq!(z.ty, Type::String);
    assert_eq!(class.constant("X").unwrap().ty, Type::Unknown);
}

#[test]
fn test_keywords_as_member_names() {
    // 予約語もメソッド名・定数名に使える
    let source = r#"<?php
    class A {
        public function list() {}
        public static function new() {}
        const DEFAULT = 1, CLASS = 2;
    }
    "#;

    let class = single_class(source);
    assert!(class.function("list").is_some());
    assert!(class.function("new").unwrap().is_static);
    assert!(class.constant("CLASS").is_some());
}

#[test]
fn test_methods_with_modifiers() {
    // メソッドの修飾子とドキュメントコメント
    let source = r#"<?php
    abstract class A {
        /** Does f */
        abstract protected function f(int $x): int;
        final public static function g() {}
        private function h() {}
    }
    "#;

    let class = single_class(source);
    assert!(class.is_abstract);

    let f = class.function("f").unwrap();
    assert!(f.is_abstract);
    assert_eq!(f.visibility, Visibility::Protected);
    assert_eq!(f.doc.as_deref(), Some("/** Does f */"));
    assert_eq!(f.return_type, Type::Int);

    let g = class.function("g").unwrap();
    assert!(g.is_final && g.is_static);
    assert_eq!(g.doc, None);

    assert_eq!(class.function("h").unwrap().visibility, Visibility::Private);
}

#[test]
fn test_attributes_ignored() {
    // 属性は読み飛ばす
    let source = r#"<?php
    #[Entity(table: "users")]
    class User {
        #[Column]
        public int $id;
    }
    "#;

    let class = single_class(source);
    assert_eq!(class.name, "User");
    assert_eq!(class.variable("id").unwrap().ty, Type::Int);
}

#[test]
fn test_field_modifiers_do_not_leak_into_method() {
    // プロパティの修飾子は次のメソッドに引き継がれない
    let source = r#"<?php
    class A {
        /** @var int */
        public static $a;
        function f() {}
    }
    "#;

    let class = single_class(source);
    assert!(class.variable("a").unwrap().is_static);

    let f = class.function("f").unwrap();
    assert!(!f.is_static);
    assert_eq!(f.visibility, Visibility::Public);
    assert_eq!(f.doc, None);
}

#[test]
fn test_constant_modifiers_do_not_leak_into_property() {
    // 定数の修飾子とドキュメントコメントは次のプロパティに付かない
    let source = r#"<?php
    class A {
        /** @var string */
        private const X = 'x';
        $b;
    }
    "#;

    let b = single_class(source).variable("b").unwrap().clone();
    assert_eq!(b.visibility, Visibility::Public);
    assert_eq!(b.ty, Type::Unknown);
}

#[test]
fn test_readonly_members() {
    // readonlyプロパティ・昇格引数・readonlyクラスとfinal定数
    let source = r#"<?php
    readonly class Point {
        final public const ORIGIN = 0;
        public readonly int $x;
        public function __construct(private readonly int $y, $z) {}
    }
    "#;

    let class = single_class(source);
    assert!(class.is_readonly);
    assert!(class.constant("ORIGIN").unwrap().is_final);

    let x = class.variable("x").unwrap();
    assert!(x.is_readonly);
    assert_eq!(x.ty, Type::Int);

    let ctor = class.function("__construct").unwrap();
    let y = ctor.arg("y").unwrap();
    assert!(y.is_readonly);
    assert_eq!(y.visibility, Visibility::Private);
    assert_eq!(y.ty, Type::Int);
    assert!(!ctor.arg("z").unwrap().is_readonly);
}
