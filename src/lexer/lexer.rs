use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Handles a pattern match. Returns `None` for text that produces no token.
pub type RegexHandler = fn(&mut Lexer, String) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: two-character operators come before their one-character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: integer_handler },
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\"[^\"]*\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
    ];
}

/// Pull-based scanner. Yields tokens one at a time and finishes with a
/// single `EOF` token.
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            file: file_name,
            finished: false,
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn position_at(&self, offset: usize) -> Position {
        Position(offset as u32, Rc::clone(&self.file))
    }

    /// Builds a token starting at the current position and consumes `width` bytes.
    pub fn emit(&mut self, kind: TokenKind, value: String, width: usize) -> Token {
        let span = Span {
            start: self.position_at(self.pos),
            end: self.position_at(self.pos + width),
        };
        self.advance_n(width);

        MK_TOKEN!(kind, value, span)
    }

    fn illegal(&mut self) -> Token {
        let ch = self.remainder().chars().next().unwrap_or('\0');
        self.emit(TokenKind::Illegal, ch.to_string(), ch.len_utf8())
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        'scan: loop {
            if self.at_eof() {
                if self.finished {
                    return None;
                }
                self.finished = true;
                return Some(MK_TOKEN!(
                    TokenKind::EOF,
                    String::from("EOF"),
                    Span { start: self.position_at(self.pos), end: self.position_at(self.pos) }
                ));
            }

            for pattern in PATTERNS.iter() {
                let Some(matched) = pattern.regex.find(self.remainder()) else {
                    continue;
                };
                let matched = matched.as_str().to_string();

                match (pattern.handler)(self, matched) {
                    Some(token) => {
                        trace!("lexed {}", token);
                        return Some(token);
                    }
                    None => continue 'scan,
                }
            }

            return Some(self.illegal());
        }
    }
}

fn integer_handler(lexer: &mut Lexer, matched: String) -> Option<Token> {
    let width = matched.len();
    Some(lexer.emit(TokenKind::Integer, matched, width))
}

fn skip_handler(lexer: &mut Lexer, matched: String) -> Option<Token> {
    lexer.advance_n(matched.len());
    None
}

fn string_handler(lexer: &mut Lexer, matched: String) -> Option<Token> {
    let width = matched.len();
    let string_literal = String::from(&matched[1..width - 1]);

    Some(lexer.emit(TokenKind::String, string_literal, width))
}

fn symbol_handler(lexer: &mut Lexer, matched: String) -> Option<Token> {
    let width = matched.len();
    let kind = RESERVED_LOOKUP.get(matched.as_str()).copied().unwrap_or(TokenKind::Identifier);

    Some(lexer.emit(kind, matched, width))
}

/// Scans the whole source, `EOF` included.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    Lexer::new(source, file).collect()
}
