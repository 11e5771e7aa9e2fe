//! Declaration tree produced by the parser.
//!
//! The tree is purely structural: namespaces own classes and free functions,
//! classes own their members, and every member carries a resolved [`Type`].
//! No node refers back to its container.

use serde::{Deserialize, Serialize};

mod declarations;
mod program;
mod types;

pub use declarations::*;
pub use program::*;
pub use types::*;

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}
