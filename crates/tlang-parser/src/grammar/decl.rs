use tlang_lexer::{Diagnostic, TokenKind};
use tlang_symbols::DataType;

use crate::ast::DeclItem;
use crate::grammar::expr::expr;
use crate::parser::Parser;

fn is_int_like(ty: DataType) -> bool {
    ty.is_integer()
}

/// `IdInit := IDENT ( "=" Expr )?`
fn id_init(p: &mut Parser, const_flag: bool) -> Result<DeclItem, Diagnostic> {
    let tok = p.expect(TokenKind::Ident, "Ожидался идентификатор в списке объявлений")?;
    let name = tok.lexeme.clone();
    let (line, col) = (tok.line, tok.col);

    let mut elems = Vec::new();
    let symbol = if p.current_arr_elem_count > 0 {
        let arr = p
            .tree
            .declare(&name, DataType::Array, line, col)
            .map_err(|e| p.sem_from(e))?;
        p.tree.set_basic_type(arr, p.current_decl_type);
        p.tree.set_array_count(arr, p.current_arr_elem_count);

        for i in 0..p.current_arr_elem_count {
            let elem_name = format!("{name}_{i}");
            let elem = p
                .tree
                .declare(&elem_name, p.current_decl_type, line, col)
                .map_err(|e| p.sem_from(e))?;
            p.tree.set_index(elem, i);
            elems.push(elem);
        }
        arr
    } else {
        let sym = p
            .tree
            .declare(&name, p.current_decl_type, line, col)
            .map_err(|e| p.sem_from(e))?;
        if const_flag {
            p.tree.set_const(sym, true);
        }
        sym
    };

    let next = p.peek()?;
    if next == TokenKind::Assign {
        if p.tree.node(symbol).kind == DataType::Array {
            return p.sem_err("Нельзя ничего присваивать массиву целиком");
        }
        p.bump()?;
        let value = expr(p)?;

        let node_is_int = is_int_like(p.tree.node(symbol).kind);
        let expr_is_int = is_int_like(value.ty());
        if !(node_is_int && expr_is_int) {
            return p.sem_err(format!(
                "Несоответствие типов при инициализации переменной / именованной константы '{name}'"
            ));
        }

        Ok(DeclItem { symbol, elems, init: Some(value), line, col })
    } else {
        if const_flag {
            return p.syn_err("Ожидалось '=' в определении именованной константы");
        }
        Ok(DeclItem { symbol, elems, init: None, line, col })
    }
}

/// `IdInitList := IdInit ( "," IdInit )*`
fn id_init_list(p: &mut Parser, const_flag: bool) -> Result<Vec<DeclItem>, Diagnostic> {
    let mut items = vec![id_init(p, const_flag)?];
    while p.peek()? == TokenKind::Comma {
        p.bump()?;
        items.push(id_init(p, const_flag)?);
    }
    Ok(items)
}

/// `VarDecl := IdInitList ";"` — the type itself was already consumed by
/// the caller into `current_decl_type`/`current_arr_elem_count`.
pub(crate) fn var_decl(p: &mut Parser) -> Result<Vec<DeclItem>, Diagnostic> {
    let items = id_init_list(p, false)?;
    p.expect(TokenKind::Semi, "Ожидалась ';' в конце объявления переменных")?;
    Ok(items)
}

/// `ConstDecl := Type IdInitList(must-init) ";"` — the leading `const` has
/// already been consumed by the caller (`TopDecl`/`BlockItems`).
pub(crate) fn const_decl(p: &mut Parser) -> Result<Vec<DeclItem>, Diagnostic> {
    let (basic_type, arr_elem_count) = super::type_ref::consume_type(p)?;
    if arr_elem_count > 0 {
        return p.sem_err("Нельзя объявить именованную константу-массив");
    }
    p.current_decl_type = basic_type;
    p.current_arr_elem_count = 0;

    let items = id_init_list(p, true)?;
    p.expect(
        TokenKind::Semi,
        "Ожидалась ';' в конце объявления именованных констант",
    )?;
    Ok(items)
}

/// `TypeDefinition := Type IDENT ( "[" Const "]" )? ";"` — `typedef` has
/// already been consumed by the caller.
pub(crate) fn typedef_decl(p: &mut Parser) -> Result<(), Diagnostic> {
    let (basic_type, basic_arr_elem_count) = super::type_ref::consume_type(p)?;

    let name_tok = p.expect(
        TokenKind::Ident,
        "Ожидался идентификатор в определении метки типа",
    )?;
    let name = name_tok.lexeme.clone();
    let (line, col) = (name_tok.line, name_tok.col);

    let mut arr_elem_count = basic_arr_elem_count;
    if p.peek()? == TokenKind::LBracket {
        p.bump()?;
        let size_tok_kind = p.peek()?;
        if size_tok_kind != TokenKind::ConstDec && size_tok_kind != TokenKind::ConstHex {
            return p.syn_err("Ожидалась константа после '['");
        }
        let size_tok = p.bump()?;
        arr_elem_count = super::literal::parse_i32_literal(
            &size_tok,
            "Размерность массива не может превышать диапазон типа int",
        )?;
        if arr_elem_count <= 0 {
            return p.sem_err("Размерность массива должна быть больше 0");
        }
        p.expect(TokenKind::RBracket, "Ожидалась ']' после константы")?;

        if basic_arr_elem_count > 0 {
            return p.sem_err(
                "При объявлении массива через метку типа тип не может быть меткой типа для массива, объявленного ранее",
            );
        }
    }

    let typedef_id = p
        .tree
        .declare(&name, DataType::TypedefName, line, col)
        .map_err(|e| p.sem_from(e))?;
    p.tree.set_basic_type(typedef_id, basic_type);
    p.tree.set_array_count(typedef_id, arr_elem_count);

    p.expect(TokenKind::Semi, "Ожидалась ';' после определения метки")?;
    Ok(())
}
