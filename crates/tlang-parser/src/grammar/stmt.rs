use tlang_lexer::TokenKind;
use tlang_symbols::DataType;

use crate::ast::Stmt;
use crate::grammar::decl::{const_decl, var_decl};
use crate::grammar::expr::expr;
use crate::grammar::literal::parse_i32_literal;
use crate::grammar::type_ref::consume_type;
use crate::parser::Parser;

fn starts_type(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::KwInt | TokenKind::KwShort | TokenKind::KwLong | TokenKind::KwLongLong | TokenKind::Ident
    )
}

/// `Block := "{" BlockItems "}"`
pub(crate) fn block(p: &mut Parser) -> Result<Stmt, tlang_lexer::Diagnostic> {
    let open = p.expect(TokenKind::LBrace, "Ожидалась '{' для начала блока")?;
    let scope = p.tree.enter_scope(open.line, open.col);

    let items = block_items(p)?;

    p.expect(TokenKind::RBrace, "Ожидалась '}' для конца блока")?;
    p.tree.exit_scope().map_err(|e| p.sem_from(e))?;

    Ok(Stmt::Block { scope, items })
}

/// `BlockItems := ( VarDecl | ConstDecl | Stmt )*`
fn block_items(p: &mut Parser) -> Result<Vec<Stmt>, tlang_lexer::Diagnostic> {
    let mut items = Vec::new();
    loop {
        let kind = p.peek()?;
        if kind == TokenKind::RBrace || kind == TokenKind::End {
            break;
        }

        if kind == TokenKind::KwConst {
            p.bump()?;
            let decls = const_decl(p)?;
            items.push(Stmt::Decl(decls));
            continue;
        }

        if starts_type(kind) {
            let lead = p.bump()?;
            let after = p.peek()?;
            if after == TokenKind::Assign || after == TokenKind::LBracket {
                // Not a declaration after all — an assignment target.
                p.push_back(lead);
                items.push(stmt(p)?);
            } else {
                p.push_back(lead);
                let (basic_type, arr_elem_count) = consume_type(p)?;
                p.current_decl_type = basic_type;
                p.current_arr_elem_count = arr_elem_count;
                let decls = var_decl(p)?;
                items.push(Stmt::Decl(decls));
            }
            continue;
        }

        items.push(stmt(p)?);
    }
    Ok(items)
}

/// Resolves a `[Const]` array-index suffix against `name`'s declaration,
/// returning the synthesised `<name>_<i>` element symbol. Shared between
/// `Stmt`'s assignment target and `Prim`'s operand resolution.
pub(crate) fn resolve_indexed(
    p: &mut Parser,
    name: &str,
    base: tlang_symbols::SymbolId,
) -> Result<tlang_symbols::SymbolId, tlang_lexer::Diagnostic> {
    if p.tree.node(base).kind != DataType::Array {
        return p.sem_err(
            "Операция индексирования ([]) применима только к идентификаторам, объявленным как массив",
        );
    }
    p.bump()?; // '['
    let idx_kind = p.peek()?;
    if idx_kind != TokenKind::ConstDec && idx_kind != TokenKind::ConstHex {
        return p.syn_err("Ожидалась константа после '['");
    }
    let idx_tok = p.bump()?;
    let index = parse_i32_literal(
        &idx_tok,
        "Индекс при обращении к массиву не может превышать диапазон типа int",
    )?;
    let elem_count = p.tree.node(base).elem_count;
    if index < 0 || index >= elem_count {
        return p.sem_err(
            "Индекс при обращении к массиву должен быть больше или равен 0 и меньше указанного при объявлении размера",
        );
    }
    p.expect(TokenKind::RBracket, "Ожидалась ']' после константы")?;

    let elem_name = format!("{name}_{index}");
    p.tree.lookup_var(&elem_name).map_err(|e| p.sem_from(e))
}

/// `Stmt := ";" | Block | "while" WhileStmt | IDENT "[" Const "]"? "=" Expr ";"`
pub(crate) fn stmt(p: &mut Parser) -> Result<Stmt, tlang_lexer::Diagnostic> {
    let kind = p.peek()?;
    match kind {
        TokenKind::Semi => {
            p.bump()?;
            Ok(Stmt::Empty)
        }
        TokenKind::LBrace => block(p),
        TokenKind::KwWhile => {
            p.bump()?;
            while_stmt(p)
        }
        TokenKind::Ident => {
            let tok = p.bump()?;
            let name = tok.lexeme.clone();
            let (line, col) = (tok.line, tok.col);
            let base = p.tree.lookup_var(&name).map_err(|e| p.sem_from(e))?;
            if p.tree.node(base).is_const {
                return p.sem_err(
                    "Именованной константе может быть присвоено значение только при её объявлении",
                );
            }

            let target = if p.peek()? == TokenKind::LBracket {
                resolve_indexed(p, &name, base)?
            } else {
                if p.tree.node(base).kind == DataType::Array {
                    return p.sem_err("Нельзя использовать массив целиком в качестве операнда");
                }
                base
            };

            p.expect(TokenKind::Assign, "Ожидалось '=' после идентификатора (присваивание)")?;
            let value = expr(p)?;

            let target_is_int = p.tree.node(target).kind.is_integer();
            if !(target_is_int && value.ty().is_integer()) {
                return p.sem_err("Несоответствие типов в операторе присваивания");
            }

            p.expect(TokenKind::Semi, "Ожидалась ';' после оператора присваивания")?;
            Ok(Stmt::Assign { target, expr: value, line, col })
        }
        _ => p.syn_err("Неизвестная форма оператора"),
    }
}

/// `WhileStmt := "(" Expr ")" Stmt` — parsed once; re-iteration is the
/// evaluator's job (`SPEC_FULL.md` §3, the AST-materialization decision).
fn while_stmt(p: &mut Parser) -> Result<Stmt, tlang_lexer::Diagnostic> {
    let (line, col) = (p.cur.line, p.cur.col);
    p.expect(TokenKind::LParen, "Ожидалась '(' после while")?;
    let cond = expr(p)?;
    if !cond.ty().is_integer() {
        return p.sem_err("Выражение-условие должно иметь тип int / short / long / longlong");
    }
    p.expect(TokenKind::RParen, "Ожидалась ')' после выражения")?;
    let body = stmt(p)?;
    Ok(Stmt::While { cond, body: Box::new(body), line, col })
}
