//! 解析ドライバーモジュール
//!
//! ファイル単位の解析（`SourceUnit`）と、複数ファイルをまとめて解析し
//! 失敗したファイルを記録して次へ進む`BatchDriver`を提供します。

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use indexmap::IndexMap;

use crate::ast::{Namespace, Use};
use crate::error::{DeclError, DeclResult, ErrorCollector, LexerError};
use crate::lexer::{Lexer, Token, TokenWithPosition};
use crate::parser::Parser;

/// ソースをトークン列に変換する。不正な文字があれば最初の箇所でエラー
pub fn tokenize(source: &str) -> DeclResult<Vec<TokenWithPosition>> {
    let tokens = Lexer::new(source).collect_tokens();

    if let Some(bad) = tokens.iter().find(|t| matches!(t.token, Token::Error)) {
        return Err(LexerError::UnrecognizedToken {
            token: bad.text.clone(),
            line: bad.position.line,
            column: bad.position.column,
            span: bad.span.clone().into(),
        }
        .into());
    }

    Ok(tokens)
}

/// ソースを解析して名前空間の列を返す
pub fn parse(source: &str) -> DeclResult<Vec<Namespace>> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens);
    Ok(parser.parse()?)
}

/// 解析対象の一ファイル
pub struct SourceUnit {
    pub path: String,
    pub source: String,
    pub files: SimpleFiles<String, String>,
    pub file_id: usize,
}

impl SourceUnit {
    /// ファイルを読み込む
    pub fn new<P: AsRef<Path>>(path: P) -> DeclResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| DeclError::Io(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_string(&path.display().to_string(), source))
    }

    /// 文字列から作成（テスト用）
    pub fn from_string(name: &str, source: String) -> Self {
        let mut files = SimpleFiles::new();
        let file_id = files.add(name.to_string(), source.clone());

        Self {
            path: name.to_string(),
            source,
            files,
            file_id,
        }
    }

    pub fn tokenize(&self) -> DeclResult<Vec<TokenWithPosition>> {
        tokenize(&self.source)
    }

    pub fn parse(&self) -> DeclResult<Vec<Namespace>> {
        log::debug!("parsing {}", self.path);
        parse(&self.source)
    }
}

/// 複数ファイルの一括解析
///
/// 失敗したファイルは`ErrorCollector`に記録し、残りのファイルの解析を続ける。
pub struct BatchDriver {
    files: SimpleFiles<String, String>,
    results: IndexMap<String, Vec<Namespace>>,
    errors: ErrorCollector,
}

impl BatchDriver {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            results: IndexMap::new(),
            errors: ErrorCollector::new(),
        }
    }

    /// ファイルを読み込んで解析する。成功したかどうかを返す
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        let name = path.display().to_string();

        match fs::read_to_string(path) {
            Ok(source) => self.add_source(&name, source),
            Err(e) => {
                log::warn!("failed to read {}: {}", name, e);
                let file_id = self.files.add(name.clone(), String::new());
                self.errors
                    .add_error(DeclError::Io(format!("{}: {}", name, e)), file_id);
                false
            }
        }
    }

    /// 文字列を一ファイルとして解析する
    pub fn add_source(&mut self, name: &str, source: String) -> bool {
        let result = parse(&source);
        let file_id = self.files.add(name.to_string(), source);

        match result {
            Ok(namespaces) => {
                log::debug!("{}: {} namespace(s)", name, namespaces.len());
                self.results.insert(name.to_string(), namespaces);
                true
            }
            Err(e) => {
                log::warn!("skipping {}: {}", name, e);
                self.errors.add_error(e, file_id);
                false
            }
        }
    }

    /// 成功したファイルの解析結果（追加順）
    pub fn results(&self) -> &IndexMap<String, Vec<Namespace>> {
        &self.results
    }

    pub fn errors(&self) -> &ErrorCollector {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }

    /// 蓄積したエラーを標準エラー出力に報告
    pub fn report_diagnostics(&self) -> DeclResult<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let mut lock = writer.lock();
        self.emit_diagnostics(&mut lock)
    }

    /// 蓄積したエラーを任意の出力先に書き出す
    pub fn emit_diagnostics(&self, writer: &mut dyn WriteColor) -> DeclResult<()> {
        emit_all(writer, &self.files, &self.errors)
    }

    pub fn into_results(self) -> IndexMap<String, Vec<Namespace>> {
        self.results
    }
}

impl Default for BatchDriver {
    fn default() -> Self {
        Self::new()
    }
}

fn emit_all(
    writer: &mut dyn WriteColor,
    files: &SimpleFiles<String, String>,
    errors: &ErrorCollector,
) -> DeclResult<()> {
    let config = codespan_reporting::term::Config::default();
    for error in errors.errors() {
        let diagnostic = error.to_diagnostic();
        codespan_reporting::term::emit(writer, &config, files, &diagnostic)
            .map_err(|e| DeclError::Io(format!("Failed to emit diagnostic: {}", e)))?;
    }
    Ok(())
}

/// 宣言の一覧をインデント付きの概要として整形する
pub fn render_outline(namespaces: &[Namespace]) -> String {
    let mut out = String::new();

    for ns in namespaces {
        let name = if ns.is_global() { "(global)" } else { ns.name.as_str() };
        let _ = writeln!(out, "namespace {}", name);

        for u in &ns.uses {
            match u {
                Use::Class { path, alias } => outline_use(&mut out, "use", path, alias),
                Use::Function { path, alias } => outline_use(&mut out, "use function", path, alias),
                Use::Constant { path, alias } => outline_use(&mut out, "use const", path, alias),
                Use::Trait(_) => {}
            }
        }

        for function in &ns.functions {
            let _ = writeln!(out, "  function {}", signature(function));
        }

        for class in &ns.classes {
            let kind = if class.is_interface {
                "interface"
            } else if class.is_trait {
                "trait"
            } else {
                "class"
            };
            let _ = write!(out, "  {} {}", kind, class.name);
            if let Some(parent) = &class.parent {
                let _ = write!(out, " extends {}", parent);
            }
            if !class.interfaces.is_empty() {
                let _ = write!(out, " implements {}", class.interfaces.join(", "));
            }
            out.push('\n');

            for u in &class.uses {
                if let Use::Trait(t) = u {
                    let _ = writeln!(out, "    use {}", t.traits.join(", "));
                }
            }
            for constant in &class.constants {
                let _ = writeln!(out, "    const {}: {}", constant.name, constant.ty);
            }
            for variable in &class.variables {
                let _ = writeln!(
                    out,
                    "    {}{} ${}: {}",
                    variable.visibility,
                    if variable.is_static { " static" } else { "" },
                    variable.name,
                    variable.ty
                );
            }
            for function in &class.functions {
                let _ = writeln!(
                    out,
                    "    {}{} function {}",
                    function.visibility,
                    if function.is_static { " static" } else { "" },
                    signature(function)
                );
            }
        }
    }

    out
}

fn outline_use(out: &mut String, keyword: &str, path: &str, alias: &Option<String>) {
    match alias {
        Some(alias) => {
            let _ = writeln!(out, "  {} {} as {}", keyword, path, alias);
        }
        None => {
            let _ = writeln!(out, "  {} {}", keyword, path);
        }
    }
}

fn signature(function: &crate::ast::Function) -> String {
    let args: Vec<String> = function
        .args
        .iter()
        .map(|arg| {
            format!(
                "{}{}${}{}: {}",
                if arg.is_reference { "&" } else { "" },
                if arg.is_rest { "..." } else { "" },
                arg.name,
                if arg.is_optional { "?" } else { "" },
                arg.ty
            )
        })
        .collect();
    format!("{}({}): {}", function.name, args.join(", "), function.return_type)
}
