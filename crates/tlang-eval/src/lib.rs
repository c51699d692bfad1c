//! Tree-walking evaluator for `tlang_parser::ast::Program`, grounded on
//! `original_source/tree.cpp`'s interpretation half of `Diagram`'s grammar
//! methods. Parsing (`tlang-parser`) has already built the whole AST and
//! symbol tree by the time anything here runs — see `SPEC_FULL.md` §3/§4.D
//! for why `while` re-iteration lives here instead of in the parser.

mod error;
mod interp;
mod trace;

pub use error::EvalError;
pub use interp::{run, Interp};
