use tlang_lexer::{Diagnostic, TokenKind};
use tlang_symbols::DataType;

use crate::ast::{Program, Stmt};
use crate::grammar::decl::{const_decl, typedef_decl, var_decl};
use crate::grammar::stmt::block;
use crate::grammar::type_ref::consume_type;
use crate::parser::Parser;

fn starts_top_decl(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::KwInt
            | TokenKind::KwShort
            | TokenKind::KwLong
            | TokenKind::KwLongLong
            | TokenKind::Ident
            | TokenKind::KwTypedef
            | TokenKind::KwConst
    )
}

/// `Program := TopDecl*`
pub(crate) fn program(p: &mut Parser) -> Result<Program, Diagnostic> {
    let mut prog = Program::default();
    loop {
        let kind = p.peek()?;
        if !starts_top_decl(kind) {
            break;
        }
        top_decl(p, &mut prog)?;
    }
    Ok(prog)
}

/// `TopDecl := "int" ( "main" MainFunc | VarDecl )
///           | "typedef" TypeDefinition
///           | "const" ConstDecl
///           | ( "short" | "long" | "longlong" | IDENT ) VarDecl`
fn top_decl(p: &mut Parser, prog: &mut Program) -> Result<(), Diagnostic> {
    let kind = p.peek()?;
    match kind {
        TokenKind::KwInt => {
            p.bump()?;
            if p.peek()? == TokenKind::KwMain {
                p.bump()?;
                prog.main_body = Some(main_func(p)?);
            } else {
                p.current_decl_type = DataType::Int;
                p.current_arr_elem_count = 0;
                let decls = var_decl(p)?;
                prog.top_level.push(Stmt::Decl(decls));
            }
        }
        TokenKind::KwTypedef => {
            p.bump()?;
            typedef_decl(p)?;
        }
        TokenKind::KwConst => {
            p.bump()?;
            let decls = const_decl(p)?;
            prog.top_level.push(Stmt::Decl(decls));
        }
        TokenKind::KwShort | TokenKind::KwLong | TokenKind::KwLongLong | TokenKind::Ident => {
            let (basic_type, arr_elem_count) = consume_type(p)?;
            p.current_decl_type = basic_type;
            p.current_arr_elem_count = arr_elem_count;
            let decls = var_decl(p)?;
            prog.top_level.push(Stmt::Decl(decls));
        }
        _ => return p.syn_err("Ожидалось объявление верхнего уровня"),
    }
    Ok(())
}

/// `MainFunc := "(" ")" Block`
fn main_func(p: &mut Parser) -> Result<Stmt, Diagnostic> {
    p.expect(TokenKind::LParen, "Ожидалась '(' после main")?;
    p.expect(TokenKind::RParen, "Ожидалась ')' после '(' в объявлении main")?;
    block(p)
}
