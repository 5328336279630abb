/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of the Axe language.

*/

pub type LineNumber = usize;
pub type Column = std::ops::Range<usize>;

/// ## Source position
///
/// Lines count from 1, columns are character offsets within the line.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub line: LineNumber,
    pub column: Column,
}

impl Span {
    pub fn new(line: LineNumber, column: Column) -> Span {
        Span { line, column }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}..{}", self.line, self.column.start, self.column.end)
    }
}

#[macro_use]
mod error;
mod lex;
mod parse;

pub mod ast;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use error::ErrorKind;
pub use lex::lex;
pub use parse::parse;

#[cfg(test)]
mod tests;
