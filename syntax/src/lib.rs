//! Parsing of BL, a small imperative language for programming robots.
//!
//! Source text goes through [`Scanner`] to become [`Tokens`], which [`Parser`] turns
//! into a [`Program`] or a [`Statement`] tree. Both print back as BL source.

pub mod condition;
pub mod parser;
mod printer;
pub mod program;
pub mod scanner;
pub mod statement;
pub mod token;

pub use condition::Condition;
pub use parser::{Parser, ParserError, parse_block, parse_program, parse_statement};
pub use program::{Context, Program};
pub use scanner::{Scanner, ScannerError};
pub use statement::{Block, Statement};
pub use token::Tokens;
