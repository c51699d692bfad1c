use tlang_lexer::{Category, Diagnostic};
use tlang_parser::ast::{BinOp, DeclItem, Expr, Program, Stmt};
use tlang_symbols::{ArithOp, CmpOp, DataType, SymbolId, SymbolTree, Value};

use crate::error::EvalError;

/// Explicit interpreter context threaded through every evaluator function,
/// replacing `tree.h`'s `Cur` / `debug` / `interpretationEnabled` /
/// `currentArea` singletons (`SPEC_FULL.md` §5). `tree` is the same
/// `SymbolTree` the parser already built and fully shaped — the evaluator
/// only ever reads/writes value slots on existing nodes, it never declares
/// or enters/exits a scope of its own.
pub struct Interp<'a> {
    pub(crate) tree: &'a mut SymbolTree,
    pub(crate) debug: bool,
    pub(crate) current_scope: SymbolId,
}

/// Walks `program` exactly once: top-level statements (mostly
/// declarations — typedefs never produce a `Stmt` at all, they only
/// mutate the tree at parse time) in source order, then `main`'s body if
/// present. A `Stmt::While` node inside re-walks its own `body` subtree
/// for as long as its condition holds; that is the only source of
/// repetition (`SPEC_FULL.md` §3).
pub fn run(program: &Program, tree: &mut SymbolTree, debug: bool) -> Result<(), Diagnostic> {
    let root = tree.root();
    let mut interp = Interp { tree, debug, current_scope: root };
    for stmt in &program.top_level {
        interp.exec_stmt(stmt)?;
    }
    if let Some(main_body) = &program.main_body {
        interp.exec_stmt(main_body)?;
    }
    Ok(())
}

fn to_arith_op(op: BinOp) -> ArithOp {
    match op {
        BinOp::Add => ArithOp::Add,
        BinOp::Sub => ArithOp::Sub,
        BinOp::Mul => ArithOp::Mul,
        _ => unreachable!("to_arith_op called with a non-arithmetic operator"),
    }
}

fn to_cmp_op(op: BinOp) -> CmpOp {
    match op {
        BinOp::Eq => CmpOp::Eq,
        BinOp::Neq => CmpOp::Neq,
        BinOp::Lt => CmpOp::Lt,
        BinOp::Le => CmpOp::Le,
        BinOp::Gt => CmpOp::Gt,
        BinOp::Ge => CmpOp::Ge,
        _ => unreachable!("to_cmp_op called with a non-comparison operator"),
    }
}

impl Interp<'_> {
    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), Diagnostic> {
        match stmt {
            Stmt::Empty => Ok(()),
            Stmt::Block { scope, items } => {
                let prev = self.current_scope;
                self.current_scope = *scope;
                for item in items {
                    self.exec_stmt(item)?;
                }
                self.current_scope = prev;
                Ok(())
            }
            Stmt::Decl(items) => {
                for item in items {
                    self.exec_decl_item(item)?;
                }
                Ok(())
            }
            Stmt::Assign { target, expr, line, col } => {
                let (value, ty) = self.eval_expr(expr)?;
                self.assign(*target, value, ty, *line, *col)
            }
            Stmt::While { cond, body, .. } => {
                loop {
                    let (value, _) = self.eval_expr(cond)?;
                    let (as_int, _) = value.cast_to(DataType::Int);
                    if !as_int.is_truthy() {
                        break;
                    }
                    self.exec_stmt(body)?;
                }
                Ok(())
            }
        }
    }

    /// Clears the symbol's (and, for an array, every hidden element's)
    /// `has-value` bit before re-running its initialiser, if any. On the
    /// first run this is a no-op (the slot is already empty); on a
    /// `while` body's later iterations it is what gives the declaration
    /// "fresh scope entry" each time, per `spec.md` §4.D.
    fn exec_decl_item(&mut self, item: &DeclItem) -> Result<(), Diagnostic> {
        self.tree.reset_value(item.symbol);
        for elem in &item.elems {
            self.tree.reset_value(*elem);
        }
        if let Some(init) = &item.init {
            let (value, ty) = self.eval_expr(init)?;
            self.assign(item.symbol, value, ty, item.line, item.col)?;
        }
        Ok(())
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<(Value, DataType), Diagnostic> {
        match expr {
            Expr::Const { value, ty, .. } => Ok((*value, *ty)),

            Expr::Var { symbol, ty, line, col } => {
                let value = self.tree.get_value(*symbol).ok_or_else(|| {
                    let node = self.tree.node(*symbol);
                    let err = if node.index.is_some() {
                        EvalError::UninitializedArrayElem(node.name.clone())
                    } else {
                        EvalError::UninitializedVar(node.name.clone())
                    };
                    err.into_diagnostic(node.name.clone(), *line, *col)
                })?;
                Ok((value, *ty))
            }

            Expr::Binary { op, lhs, rhs, promote_to, result_ty, line, col } => {
                let (lval, lty) = self.eval_expr(lhs)?;
                let (rval, rty) = self.eval_expr(rhs)?;

                if lty != rty {
                    self.warn_debug_only(
                        *line,
                        *col,
                        format!(
                            "неявное преобразование типа {} к {} в арифметической операции",
                            lty.display_name(),
                            rty.display_name()
                        ),
                    );
                }

                let result = if op.is_comparison() {
                    Value::compare(to_cmp_op(*op), lval, rval, *promote_to)
                } else if matches!(op, BinOp::Div | BinOp::Mod) {
                    let computed = if *op == BinOp::Div {
                        Value::div(lval, rval, *promote_to)
                    } else {
                        Value::rem(lval, rval, *promote_to)
                    };
                    computed.ok_or_else(|| EvalError::DivisionByZero.into_diagnostic("", *line, *col))?
                } else {
                    Value::arith(to_arith_op(*op), lval, rval, *promote_to)
                };

                self.trace(
                    *line,
                    *col,
                    format!(
                        "{} {} {} = {}",
                        lval.as_i64(),
                        op.symbol(),
                        rval.as_i64(),
                        result.as_i64()
                    ),
                );

                Ok((result, *result_ty))
            }
        }
    }

    /// Casts `value` (statically typed `value_ty`) to `target`'s declared
    /// width and stores it, emitting the truncation warning (always, on
    /// magnitude loss) or the conversion warning (debug only, on a width
    /// change that didn't lose magnitude) per `spec.md` §4.D.
    fn assign(&mut self, target: SymbolId, value: Value, value_ty: DataType, line: u32, col: u32) -> Result<(), Diagnostic> {
        let dest_ty = self.tree.node(target).kind;
        let (converted, truncated) = value.cast_to(dest_ty);

        if truncated {
            self.warn_always(
                line,
                col,
                format!(
                    "значение {} обрезается при преобразовании к {}",
                    converted.as_i64(),
                    dest_ty.display_name()
                ),
            );
        } else if value_ty != dest_ty {
            self.warn_debug_only(
                line,
                col,
                format!(
                    "неявное преобразование типа {} к {} при присваивании",
                    value_ty.display_name(),
                    dest_ty.display_name()
                ),
            );
        }

        self.tree.set_value(target, converted);

        let name = self.tree.node(target).name.clone();
        self.trace(line, col, format!("Присваивание: {name} = {}", converted.as_i64()));
        Ok(())
    }

    /// Truncation warning: shown unconditionally, per `spec.md`'s
    /// "Warnings" category.
    fn warn_always(&self, line: u32, col: u32, msg: impl Into<String>) {
        eprintln!("{}", Diagnostic::new(Category::Warning, msg, "", line, col));
    }

    /// Conversion warning: widening/narrowing that didn't lose magnitude,
    /// shown only when `--debug` is enabled.
    fn warn_debug_only(&self, line: u32, col: u32, msg: impl Into<String>) {
        if self.debug {
            self.warn_always(line, col, msg);
        }
    }
}
