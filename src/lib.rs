//! PHP Declaration Extractor Library
//!
//! This library extracts namespaces, imports, classes, interfaces, traits,
//! functions, properties and constants from PHP-style source files, resolving
//! their types from inline hints and documentation annotations.

pub mod ast;
pub mod driver;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolve;

// Re-export commonly used types
pub use ast::{Class, Constant, Function, Namespace, Type, Use, Variable, Visibility};
pub use driver::{BatchDriver, SourceUnit};
pub use error::{DeclError, DeclResult, ErrorCollector};
pub use lexer::{Lexer, Token, TokenStream, TokenWithPosition};
pub use parser::{parse_source, ParseError, ParseResult, Parser};
