//! Recursive-descent parser for the tlang teaching language, grounded on
//! `original_source/diagram.cpp`'s `Diagram` class. Unlike the original,
//! parsing only builds a typed [`ast::Program`] and a [`SymbolTree`] — it
//! never executes anything; see `tlang-eval` for that half
//! (`SPEC_FULL.md` §3/§4.D).

pub mod ast;
mod grammar;
mod parser;

use tlang_lexer::{Diagnostic, TokenKind};
use tlang_symbols::SymbolTree;

pub use ast::Program;
pub use parser::Parser;

/// Parses a whole source string into a [`Program`] and the [`SymbolTree`]
/// built while doing so. The first error — lexical, syntactic, or semantic
/// — aborts parsing entirely, matching `spec.md`'s single-fatal-diagnostic
/// error model.
pub fn parse(source: &str) -> Result<(Program, SymbolTree), Diagnostic> {
    let mut p = Parser::new(source);
    let program = grammar::program::program(&mut p)?;

    if p.peek()? != TokenKind::End {
        return p.syn_err("Лишний текст в конце программы");
    }

    Ok((program, p.tree))
}
