use tlang_lexer::TokenKind;
use tlang_symbols::DataType;

use crate::parser::Parser;

/// Consumes one `Type` production (`spec.md` §4.C): a basic-width keyword
/// or a typedef name. Returns the basic element width and, for a typedef
/// that names an array, its element count (0 otherwise).
pub(crate) fn consume_type(p: &mut Parser) -> Result<(DataType, i32), tlang_lexer::Diagnostic> {
    let kind = p.peek()?;
    match kind {
        TokenKind::KwInt => {
            p.bump()?;
            Ok((DataType::Int, 0))
        }
        TokenKind::KwShort => {
            p.bump()?;
            Ok((DataType::Short, 0))
        }
        TokenKind::KwLong => {
            p.bump()?;
            Ok((DataType::Long, 0))
        }
        TokenKind::KwLongLong => {
            p.bump()?;
            Ok((DataType::LongLong, 0))
        }
        TokenKind::Ident => {
            let tok = p.bump()?;
            let sym = p.tree.lookup_type(&tok.lexeme).map_err(|e| p.sem_from(e))?;
            let node = p.tree.node(sym);
            Ok((node.basic_type, node.elem_count))
        }
        _ => p.syn_err("Ожидался тип данных"),
    }
}
