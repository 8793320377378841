use crate::{
    ast::{
        ast::Stmt,
        expressions::SymbolExpr,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

/// Consumes the `;` ending a statement, when there is one.
fn skip_semicolon(parser: &mut Parser) {
    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expression = parse_expr(parser, BindingPower::Default)?;

    skip_semicolon(parser);

    Ok(Stmt::Expression(ExpressionStmt { expression }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    // let <identifier> = <expression>;
    let token = parser.current_token().clone();

    let name = parser.expect_peek(TokenKind::Identifier)?;
    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;

    skip_semicolon(parser);

    Ok(Stmt::Let(LetStmt {
        token,
        name: SymbolExpr { value: name.value.clone(), token: name },
        value,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    // Bare `return` is allowed before `;`, `}` and the end of input
    let value = if parser.peek_is(TokenKind::Semicolon)
        || parser.peek_is(TokenKind::CloseCurly)
        || parser.peek_is(TokenKind::EOF)
    {
        None
    } else {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    skip_semicolon(parser);

    Ok(Stmt::Return(ReturnStmt { token, value }))
}

/// Parses `{ ... }`. Starts on `{` and stops on the matching `}`.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let token = parser.current_token().clone();
    parser.enter_block();
    parser.advance();

    let mut body = Vec::new();
    while !parser.current_is(TokenKind::CloseCurly) {
        if parser.current_is(TokenKind::EOF) {
            let eof = parser.current_token();
            return Err(Error::at_token(
                ErrorImpl::UnexpectedToken {
                    expected: TokenKind::CloseCurly,
                    actual: TokenKind::EOF,
                    token: eof.value.clone(),
                },
                eof,
            ));
        }

        body.push(parse_stmt(parser)?);
        parser.advance();
    }

    parser.leave_block();

    Ok(BlockStmt { token, body })
}
