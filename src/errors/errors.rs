use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::{Token, TokenKind}, Position};

/// A syntax error, located in the source and tied to the token that caused it.
#[derive(Error, Debug, Clone)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    token: Option<Token>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
            token: None,
        }
    }

    /// Builds an error positioned at the start of `token`.
    pub fn at_token(error_impl: ErrorImpl, token: &Token) -> Self {
        Error {
            internal_error: error_impl,
            position: token.span.start.clone(),
            token: Some(token.clone()),
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoPrefixParseFn { .. } => "NoPrefixParseFn",
            ErrorImpl::IllegalToken { .. } => "IllegalToken",
            ErrorImpl::IntegerParseError { .. } => "IntegerParseError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected: TokenKind::Identifier, .. } => {
                ErrorTip::Suggestion(String::from("expected a name here"))
            }
            ErrorImpl::UnexpectedToken { expected, actual: TokenKind::EOF, .. } => {
                ErrorTip::Suggestion(format!("input ended before `{}`, is something unclosed?", expected))
            }
            ErrorImpl::UnexpectedToken { expected, token, .. } => {
                ErrorTip::Suggestion(format!("insert `{}` before `{}`", expected, token))
            }
            ErrorImpl::NoPrefixParseFn { kind: TokenKind::CloseParen | TokenKind::CloseCurly, token } => {
                ErrorTip::Suggestion(format!("unbalanced `{}`", token))
            }
            ErrorImpl::NoPrefixParseFn { kind: TokenKind::EOF, .. } => {
                ErrorTip::Suggestion(String::from("expected an expression before the end of input"))
            }
            ErrorImpl::NoPrefixParseFn { token, .. } => {
                ErrorTip::Suggestion(format!("`{}` cannot start an expression", token))
            }
            ErrorImpl::IllegalToken { .. } => ErrorTip::None,
            ErrorImpl::IntegerParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid integer: `{}`, is it above the integer limit?",
                token
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("expected next token to be {expected}, got {actual} instead")]
    UnexpectedToken {
        expected: TokenKind,
        actual: TokenKind,
        token: String,
    },
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParseFn { kind: TokenKind, token: String },
    #[error("illegal character {token:?}")]
    IllegalToken { token: String },
    #[error("could not parse {token:?} as integer")]
    IntegerParseError { token: String },
}
