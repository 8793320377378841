//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Integer and string literals
//! - Operators and punctuation
//! - Comments and whitespace
//! - Illegal characters and positions

use super::{
    lexer::{tokenize, Lexer},
    tokens::TokenKind,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.mk".to_string()))
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("fn let true false if else return"),
        vec![
            TokenKind::Function,
            TokenKind::Let,
            TokenKind::True,
            TokenKind::False,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Return,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar_baz _underscore add2 letter".to_string(), None);

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar_baz");
    assert_eq!(tokens[2].value, "_underscore");
    assert_eq!(tokens[3].value, "add2");
    // Keyword prefixes do not split identifiers.
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "letter");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_integers_and_strings() {
    let tokens = tokenize(r#"5 838383 "foo bar" """#.to_string(), None);

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "5");
    assert_eq!(tokens[1].kind, TokenKind::Integer);
    assert_eq!(tokens[1].value, "838383");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "foo bar");
    assert_eq!(tokens[3].kind, TokenKind::String);
    assert_eq!(tokens[3].value, "");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("= + - ! * / < > == != , ; ( ) { }"),
        vec![
            TokenKind::Assignment,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Not,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_without_whitespace() {
    assert_eq!(
        kinds("x==!y;"),
        vec![
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::Not,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_program() {
    let source = "let five = 5;\nlet add = fn(x, y) {\n  x + y;\n};\nlet result = add(five, 10);";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Function,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::Identifier,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::CloseCurly,
            TokenKind::Semicolon,
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::Integer,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds("let x = 1; // trailing note\n// a whole line\nx"),
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_illegal_characters() {
    let tokens = tokenize("a @ \"open".to_string(), None);

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].value, "@");
    assert_eq!(tokens[2].kind, TokenKind::Illegal);
    assert_eq!(tokens[2].value, "\"");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "open");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("let x = \"hi\";".to_string(), Some("test.mk".to_string()));

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 3);
    assert_eq!(tokens[1].span.start.0, 4);
    assert_eq!(tokens[3].span.start.0, 8);
    assert_eq!(tokens[3].span.end.0, 12);
    assert_eq!(tokens[4].span.start.0, 12);
    assert_eq!(tokens[5].span.start.0, 13);
    assert_eq!(tokens[0].span.start.1.as_str(), "test.mk");
}

#[test]
fn test_streamed_token_positions() {
    let mut lexer = Lexer::new("a +\n  b".to_string(), Some("stream.mk".to_string()));

    let plus = lexer.nth(1).unwrap();
    assert_eq!(plus.kind, TokenKind::Plus);
    assert_eq!((plus.span.start.0, plus.span.end.0), (2, 3));

    let b = lexer.next().unwrap();
    assert_eq!((b.span.start.0, b.span.end.0), (6, 7));

    let eof = lexer.next().unwrap();
    assert_eq!(eof.kind, TokenKind::EOF);
    assert_eq!((eof.span.start.0, eof.span.end.0), (7, 7));
    assert_eq!(eof.span.start.1.as_str(), "stream.mk");
}

#[test]
fn test_lexer_emits_a_single_eof() {
    let mut lexer = Lexer::new(String::from("x"), None);

    assert_eq!(lexer.next().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lexer.next().unwrap().kind, TokenKind::EOF);
    assert!(lexer.next().is_none());
    assert!(lexer.next().is_none());
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
    assert_eq!(kinds("  \n\t "), vec![TokenKind::EOF]);
}

#[test]
fn test_token_kind_display() {
    assert_eq!(TokenKind::Assignment.to_string(), "=");
    assert_eq!(TokenKind::CloseParen.to_string(), ")");
    assert_eq!(TokenKind::Identifier.to_string(), "IDENT");
    assert_eq!(TokenKind::Integer.to_string(), "INT");
    assert_eq!(TokenKind::Function.to_string(), "fn");
    assert_eq!(TokenKind::EOF.to_string(), "EOF");
}
