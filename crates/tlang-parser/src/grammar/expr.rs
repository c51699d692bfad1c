use tlang_lexer::{Diagnostic, Token, TokenKind};
use tlang_symbols::{DataType, Value};

use crate::ast::{BinOp, Expr};
use crate::grammar::literal::parse_i64_literal;
use crate::grammar::stmt::resolve_indexed;
use crate::parser::Parser;

fn is_const_start(kind: TokenKind) -> bool {
    kind == TokenKind::ConstDec || kind == TokenKind::ConstHex
}

/// Builds a `Const` node from a literal token, applying `negative` before
/// picking the narrowest type that holds the (possibly negated) value —
/// mirrors `evaluateConstant`'s sign handling in `Prim`/`Expr`.
fn const_expr(tok: &Token, negative: bool) -> Result<Expr, Diagnostic> {
    let mut raw = parse_i64_literal(tok)?;
    if negative {
        raw = -raw;
    }
    let (value, ty) = Value::from_literal(raw);
    Ok(Expr::Const { value, ty, line: tok.line, col: tok.col })
}

/// `Expr := ( "+" | "-" )? Rel ( ( "==" | "!=" ) Rel )*`
///
/// A leading sign directly in front of a constant is handled by `Prim`
/// (the literal fuses the sign into its own value); a sign in front of
/// anything else is a full unary operator applied to the parsed operand.
pub(crate) fn expr(p: &mut Parser) -> Result<Expr, Diagnostic> {
    let lead_kind = p.peek()?;
    let sign = if lead_kind == TokenKind::Plus || lead_kind == TokenKind::Minus {
        let sign_tok = p.bump()?;
        let after = p.peek()?;
        if is_const_start(after) {
            // Let `Prim` fuse the sign into the literal.
            p.push_back(sign_tok);
            None
        } else {
            Some(sign_tok)
        }
    } else {
        None
    };

    let mut lhs = rel(p)?;

    if let Some(sign_tok) = sign {
        if !lhs.ty().is_integer() {
            return p.sem_err("Унарный '+'/'-' применим только к целым типам");
        }
        if sign_tok.kind == TokenKind::Minus {
            let ty = lhs.ty();
            let minus_one = Expr::Const { value: Value::from_literal(-1).0, ty, line: sign_tok.line, col: sign_tok.col };
            lhs = Expr::Binary {
                op: BinOp::Mul,
                lhs: Box::new(lhs),
                rhs: Box::new(minus_one),
                promote_to: ty,
                result_ty: ty,
                line: sign_tok.line,
                col: sign_tok.col,
            };
        }
        // Leading '+' is a no-op: `lhs` is returned unchanged.
    }

    loop {
        let kind = p.peek()?;
        let op = match kind {
            TokenKind::Eq => BinOp::Eq,
            TokenKind::Neq => BinOp::Neq,
            _ => break,
        };
        let op_tok = p.bump()?;
        let rhs = rel(p)?;
        if !(lhs.ty().is_integer() && rhs.ty().is_integer()) {
            return p.sem_err("Операнды для '=='/ '!=' должны быть одного типа (int)");
        }
        let promote_to = DataType::max_type(lhs.ty(), rhs.ty());
        lhs = Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            promote_to,
            result_ty: DataType::Int,
            line: op_tok.line,
            col: op_tok.col,
        };
    }
    Ok(lhs)
}

/// `Rel := Add ( ( "<" | "<=" | ">" | ">=" ) Add )*`
fn rel(p: &mut Parser) -> Result<Expr, Diagnostic> {
    let mut lhs = add(p)?;
    loop {
        let kind = p.peek()?;
        let op = match kind {
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Le => BinOp::Le,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Ge => BinOp::Ge,
            _ => break,
        };
        let op_tok = p.bump()?;
        let rhs = add(p)?;
        if !(lhs.ty().is_integer() && rhs.ty().is_integer()) {
            return p.sem_err("Операнды для '<, <=, >, >=' должны быть целыми (int / short / long / longlong)");
        }
        let promote_to = DataType::max_type(lhs.ty(), rhs.ty());
        lhs = Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            promote_to,
            result_ty: DataType::Int,
            line: op_tok.line,
            col: op_tok.col,
        };
    }
    Ok(lhs)
}

/// `Add := Mul ( ( "+" | "-" ) Mul )*`
fn add(p: &mut Parser) -> Result<Expr, Diagnostic> {
    let mut lhs = mul(p)?;
    loop {
        let kind = p.peek()?;
        let op = match kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            _ => break,
        };
        let op_tok = p.bump()?;
        let rhs = mul(p)?;
        if !(lhs.ty().is_integer() && rhs.ty().is_integer()) {
            return p.sem_err("Операнды для '+'/'-' должны быть целыми (int / short / long / longlong)");
        }
        let promote_to = DataType::max_type(lhs.ty(), rhs.ty());
        lhs = Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            promote_to,
            result_ty: promote_to,
            line: op_tok.line,
            col: op_tok.col,
        };
    }
    Ok(lhs)
}

/// `Mul := Prim ( ( "*" | "/" | "%" ) Prim )*`
fn mul(p: &mut Parser) -> Result<Expr, Diagnostic> {
    let mut lhs = prim(p)?;
    loop {
        let kind = p.peek()?;
        let op = match kind {
            TokenKind::Mult => BinOp::Mul,
            TokenKind::Div => BinOp::Div,
            TokenKind::Mod => BinOp::Mod,
            _ => break,
        };
        let op_tok = p.bump()?;
        let rhs = prim(p)?;
        if !(lhs.ty().is_integer() && rhs.ty().is_integer()) {
            return p.sem_err("Операнды для '*', '/', '%' должны быть целыми (int / short / long / longlong)");
        }
        let promote_to = DataType::max_type(lhs.ty(), rhs.ty());
        lhs = Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            promote_to,
            result_ty: promote_to,
            line: op_tok.line,
            col: op_tok.col,
        };
    }
    Ok(lhs)
}

/// `Prim := ( "-" Const ) | Const | "-" "(" Expr ")" | "(" Expr ")" | IDENT ( "[" Const "]" )?`
///
/// The `"-" "(" Expr ")"` arm deliberately differs from
/// `original_source/diagram.cpp`'s `Prim`, which requires the parenthesised
/// expression but then discards the sign — an apparent bug. This rewrite
/// applies the negation, consistent with `spec.md`'s documented unary-sign
/// semantics (see `DESIGN.md`).
fn prim(p: &mut Parser) -> Result<Expr, Diagnostic> {
    let kind = p.peek()?;

    if kind == TokenKind::Minus {
        let minus_tok = p.bump()?;
        let after = p.peek()?;
        if is_const_start(after) {
            let tok = p.bump()?;
            return const_expr(&tok, true);
        }
        if after != TokenKind::LParen {
            return p.syn_err("Ожидалась константа или выражение в скобках после '-'");
        }
        p.bump()?;
        let inner = expr(p)?;
        p.expect(TokenKind::RParen, "Ожидался ')' после выражения")?;
        if !inner.ty().is_integer() {
            return p.sem_err("Унарный '+'/'-' применим только к целым типам");
        }
        let ty = inner.ty();
        let minus_one = Expr::Const { value: Value::from_literal(-1).0, ty, line: minus_tok.line, col: minus_tok.col };
        return Ok(Expr::Binary {
            op: BinOp::Mul,
            lhs: Box::new(inner),
            rhs: Box::new(minus_one),
            promote_to: ty,
            result_ty: ty,
            line: minus_tok.line,
            col: minus_tok.col,
        });
    }

    if is_const_start(kind) {
        let tok = p.bump()?;
        return const_expr(&tok, false);
    }

    if kind == TokenKind::LParen {
        p.bump()?;
        let inner = expr(p)?;
        p.expect(TokenKind::RParen, "Ожидался ')' после выражения")?;
        return Ok(inner);
    }

    if kind == TokenKind::Ident {
        let tok = p.bump()?;
        let name = tok.lexeme.clone();
        let (line, col) = (tok.line, tok.col);
        let base = p.tree.lookup_var(&name).map_err(|e| p.sem_from(e))?;

        // Unlike `original_source/diagram.cpp`'s `Prim`, this does not check
        // `has_value` here: parsing builds the whole AST before any of it
        // runs, so a symbol's value is never set yet at parse time. The
        // "uninitialized use" checks move to `tlang-eval`, which walks the
        // tree after parsing completes (`SPEC_FULL.md` §4.D).
        let symbol = if p.peek()? == TokenKind::LBracket {
            resolve_indexed(p, &name, base)?
        } else {
            if p.tree.node(base).kind == DataType::Array {
                return p.sem_err("Нельзя использовать массив целиком в качестве операнда");
            }
            base
        };

        let ty = p.tree.node(symbol).kind;
        return Ok(Expr::Var { symbol, ty, line, col });
    }

    p.syn_err("Неизвестная форма оператора")
}
