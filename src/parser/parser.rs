//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program-level entry
//! points. The parser reads tokens through a [`TokenCursor`] and uses a
//! Pratt parser approach with NUD/LED handlers for expressions.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Syntax errors never abort a parse. Each failed statement leaves one
//! error in the parser's [`Diagnostics`] and parsing resumes after it.

use std::{collections::HashMap, rc::Rc};

use log::{debug, info};

use crate::{
    ast::ast::Program,
    errors::{diagnostics::Diagnostics, errors::Error},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    cursor::TokenCursor,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// One parser handles one token stream; its diagnostics belong to that
/// parse alone.
pub struct Parser<'a> {
    /// Two-token window over the token source
    cursor: TokenCursor<'a>,
    /// The name of the source being parsed
    file: Rc<String>,
    /// Errors recorded so far
    diagnostics: Diagnostics,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Number of blocks the parser is currently inside
    block_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser over `tokens` with every lookup table registered.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Any token source; it is pulled lazily, one token per advance
    /// * `file` - Name of the source, used in diagnostics
    pub fn new<I>(tokens: I, file: Rc<String>) -> Self
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: 'a,
    {
        let mut parser = Parser {
            cursor: TokenCursor::new(tokens, Rc::clone(&file)),
            file,
            diagnostics: Diagnostics::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            block_depth: 0,
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Returns the current token.
    pub fn current_token(&self) -> &Token {
        self.cursor.current()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    /// Returns the token after the current one.
    pub fn peek_token(&self) -> &Token {
        self.cursor.peek()
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.cursor.peek_kind()
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.cursor.current_is(kind)
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.cursor.peek_is(kind)
    }

    /// Moves one token forward.
    pub fn advance(&mut self) {
        self.cursor.advance();
    }

    /// Advances onto the next token if it has the expected kind, otherwise
    /// returns an error describing what was found instead.
    pub fn expect_peek(&mut self, kind: TokenKind) -> Result<Token, Error> {
        self.cursor.expect_peek(kind)
    }

    /// Binding power of the next token; tokens that bind nothing get `Default`.
    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power_of(self.peek_token_kind())
    }

    fn binding_power_of(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix registration leaves the binding power table alone, so a token
    /// such as `-` or `(` keeps the power of its infix role.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.binding_power_lookup
            .insert(kind, BindingPower::Default);
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub(crate) fn enter_block(&mut self) {
        self.block_depth += 1;
    }

    pub(crate) fn leave_block(&mut self) {
        self.block_depth = self.block_depth.saturating_sub(1);
    }

    /// Errors recorded so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Parses statements until the end of input.
    ///
    /// A statement that fails to parse is left out of the program; its error
    /// goes to the diagnostics and parsing carries on after it.
    pub fn parse_program(&mut self) -> Program {
        info!("Beginning parse of {}", self.file);

        let mut statements = vec![];

        while !self.current_is(TokenKind::EOF) {
            match parse_stmt(self) {
                Ok(stmt) => {
                    debug!("parsed statement: {}", stmt);
                    statements.push(stmt);
                }
                Err(error) => {
                    self.diagnostics.push(error);
                    self.synchronize();
                }
            }
            self.advance();
        }

        info!(
            "Finished parse of {}: {} statements, {} errors",
            self.file,
            statements.len(),
            self.diagnostics.len()
        );

        Program { statements }
    }

    /// Skips the rest of a failed statement.
    ///
    /// Stops on the `;` that ends it, on the `}` that closes the last block
    /// still open at the failure (and a `;` right after it), or at end of
    /// input. Braces opened while skipping are matched before a `;` counts,
    /// and a `}` with no open block is skipped like any other token.
    fn synchronize(&mut self) {
        let mut depth = self.block_depth;
        let mut nested = 0usize;
        self.block_depth = 0;

        loop {
            match self.current_token_kind() {
                TokenKind::EOF => return,
                TokenKind::Semicolon if depth == 0 && nested == 0 => return,
                TokenKind::OpenCurly => nested += 1,
                TokenKind::CloseCurly if nested > 0 => nested -= 1,
                TokenKind::CloseCurly if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        if self.peek_is(TokenKind::Semicolon) {
                            self.advance();
                        }
                        return;
                    }
                }
                _ => {}
            }
            self.advance();
        }
    }
}

/// Parses a token stream into a program and the errors found on the way.
///
/// This is the main entry point for parsing. The program is always
/// returned; a non-empty diagnostics list means it is incomplete.
///
/// # Arguments
///
/// * `tokens` - Token source, ending with (or running out before) `EOF`
/// * `file` - Reference-counted string containing the source file name
pub fn parse<'a, I>(tokens: I, file: Rc<String>) -> (Program, Diagnostics)
where
    I: IntoIterator<Item = Token>,
    I::IntoIter: 'a,
{
    let mut parser = Parser::new(tokens, file);
    let program = parser.parse_program();

    (program, parser.into_diagnostics())
}

/// Lexes and parses `source` in one pass.
pub fn parse_source(source: &str, file: Option<String>) -> (Program, Diagnostics) {
    let lexer = Lexer::new(String::from(source), file);
    let file = lexer.file();

    parse(lexer, file)
}
