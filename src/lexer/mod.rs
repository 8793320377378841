//! Lexical analysis module.
//!
//! This module contains the reference scanner that turns Monkey source
//! text into the token stream the parser consumes. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords, identifiers, integer and string literals, operators
//! - Token position tracking for error reporting
//! - Line comments and whitespace

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
