//! Error types and diagnostics collection for the parser.
//!
//! This module defines:
//!
//! - Error structures with source position information
//! - Specific error variants for each kind of syntax error
//! - The per-parse `Diagnostics` collector
//! - Helpful error messages and suggestions

pub mod diagnostics;
pub mod errors;
