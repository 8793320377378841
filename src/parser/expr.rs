use log::trace;

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanExpr, CallExpr, FunctionExpr, IfExpr, InfixExpr, IntegerExpr, PrefixExpr, StringExpr,
            SymbolExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

/// Parses an expression whose operators all bind tighter than `bp`.
///
/// Starts on the first token of the expression and stops on its last one.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(no_prefix_error(parser));
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than bp, fold it into lhs
    while !parser.peek_is(TokenKind::Semicolon) && bp < parser.peek_binding_power() {
        let operator_bp = parser.peek_binding_power();
        let Some(led) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return Ok(left);
        };

        trace!("folding {} at {:?} into {}", parser.peek_token(), operator_bp, left);
        parser.advance();
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

fn no_prefix_error(parser: &Parser) -> Error {
    let token = parser.current_token();

    match token.kind {
        TokenKind::Illegal => Error::at_token(ErrorImpl::IllegalToken { token: token.value.clone() }, token),
        kind => Error::at_token(ErrorImpl::NoPrefixParseFn { kind, token: token.value.clone() }, token),
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Identifier => Ok(Expr::Symbol(SymbolExpr { value: token.value.clone(), token })),
        TokenKind::Integer => match token.value.parse::<i64>() {
            Ok(value) => Ok(Expr::Integer(IntegerExpr { value, token })),
            Err(_) => Err(Error::at_token(ErrorImpl::IntegerParseError { token: token.value.clone() }, &token)),
        },
        TokenKind::String => Ok(Expr::String(StringExpr { value: token.value.clone(), token })),
        TokenKind::True | TokenKind::False => Ok(Expr::Boolean(BooleanExpr {
            value: token.kind == TokenKind::True,
            token,
        })),
        _ => Err(no_prefix_error(parser)),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    // Same bp on the right: equal-precedence operators associate left
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(rhs),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // if (condition) { ... } else { ... }
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block_stmt(parser)?;

    let alternative = if parser.peek_is(TokenKind::Else) {
        parser.advance();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser)?)
    } else {
        None
    };

    Ok(Expr::If(IfExpr {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_function_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // fn(x, y) { ... }
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    let parameters = parse_function_parameters(parser)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser)?;

    Ok(Expr::Function(FunctionExpr {
        token,
        parameters,
        body,
    }))
}

fn parse_function_parameters(parser: &mut Parser) -> Result<Vec<SymbolExpr>, Error> {
    let mut parameters = Vec::new();

    if parser.peek_is(TokenKind::CloseParen) {
        parser.advance();
        return Ok(parameters);
    }

    let name = parser.expect_peek(TokenKind::Identifier)?;
    parameters.push(SymbolExpr { value: name.value.clone(), token: name });

    while parser.peek_is(TokenKind::Comma) {
        parser.advance();
        let name = parser.expect_peek(TokenKind::Identifier)?;
        parameters.push(SymbolExpr { value: name.value.clone(), token: name });
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(parameters)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        token,
        callee: Box::new(left),
        arguments,
    }))
}

/// Comma-separated expressions up to `end`. Starts on the opening token.
fn parse_expr_list(parser: &mut Parser, end: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut list = Vec::new();

    if parser.peek_is(end) {
        parser.advance();
        return Ok(list);
    }

    parser.advance();
    list.push(parse_expr(parser, BindingPower::Default)?);

    while parser.peek_is(TokenKind::Comma) {
        parser.advance();
        parser.advance();
        list.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect_peek(end)?;

    Ok(list)
}
