use tlang_lexer::Category;
use tlang_symbols::{DataType, SymbolId, SymbolTree, Value};

/// Finds a declared symbol by name anywhere in the tree, recursing into
/// nested scopes — the six scenarios below only need unique names, so a
/// depth-first search by name is enough without threading AST context
/// through from the parser.
fn find_named(tree: &SymbolTree, scope: SymbolId, name: &str) -> Option<SymbolId> {
    for child in tree.children(scope) {
        let node = tree.node(child);
        if node.name == name {
            return Some(child);
        }
        if node.kind == DataType::Scope {
            if let Some(found) = find_named(tree, child, name) {
                return Some(found);
            }
        }
    }
    None
}

fn run_interp(src: &str, debug: bool) -> Result<SymbolTree, tlang_lexer::Diagnostic> {
    let (program, mut tree) = tlang_parser::parse(src)?;
    tlang_eval::run(&program, &mut tree, debug)?;
    Ok(tree)
}

#[test]
fn scenario_1_arithmetic_and_hex_literal() {
    let src = "int main() { int a = 5, b = 0x0A; a = a + b; }";
    let tree = run_interp(src, false).expect("should run");
    let a = find_named(&tree, tree.root(), "a").unwrap();
    assert_eq!(tree.get_value(a), Some(Value::I32(15)));
}

#[test]
fn scenario_2_array_indexing_and_out_of_range() {
    let src = r#"
        typedef int T[3];
        int main() {
            T x;
            x[0] = 1;
            x[2] = x[0] + 4;
        }
    "#;
    let tree = run_interp(src, false).expect("should run");
    let x2 = find_named(&tree, tree.root(), "x_2").unwrap();
    assert_eq!(tree.get_value(x2), Some(Value::I32(5)));

    let oob = "typedef int T[3]; int main() { T x; x[3] = 0; }";
    let err = tlang_parser::parse(oob).unwrap_err();
    assert_eq!(err.category, Category::Semantic);
}

#[test]
fn scenario_3_const_short_truncates() {
    let src = "const short c = 70000; int main() { ; }";
    let tree = run_interp(src, false).expect("should run");
    let c = find_named(&tree, tree.root(), "c").unwrap();
    assert_eq!(tree.get_value(c), Some(Value::I16(70000i64 as i16)));
}

#[test]
fn scenario_4_uninitialised_use_is_interpretation_error() {
    let src = "int main() { int a; a = a + 1; }";
    let err = run_interp(src, false).unwrap_err();
    assert_eq!(err.category, Category::Interpretation);
}

#[test]
fn scenario_5_inner_scope_does_not_leak() {
    let src = "int main() { int a = 1; { int a2 = 2; } a = a + 0; }";
    let tree = run_interp(src, false).expect("should run");
    let a = find_named(&tree, tree.root(), "a").unwrap();
    assert_eq!(tree.get_value(a), Some(Value::I32(1)));
}

#[test]
fn scenario_5_same_name_shadow_does_not_duplicate_error() {
    // Same-named inner declaration in a nested scope is legal (different
    // scopes), unlike a repeat in the same scope.
    let src = "int main() { int a = 1; { int a = 2; } a = a + 0; }";
    let tree = run_interp(src, false).expect("should run");
    let outer = tree.children(tree.root());
    let main_scope = outer
        .iter()
        .copied()
        .find(|&id| tree.node(id).kind == DataType::Scope)
        .unwrap();
    let a = tree
        .children(main_scope)
        .into_iter()
        .find(|&id| tree.node(id).name == "a")
        .unwrap();
    assert_eq!(tree.get_value(a), Some(Value::I32(1)));
}

#[test]
fn scenario_6_while_loop_terminates() {
    let src = "int main() { int x = 10; while (x) { x = x - 1; } }";
    let tree = run_interp(src, false).expect("should run");
    let x = find_named(&tree, tree.root(), "x").unwrap();
    assert_eq!(tree.get_value(x), Some(Value::I32(0)));
}

#[test]
fn while_zero_never_runs_body() {
    let src = "int main() { int x = 0; while (x) { x = x + 1; } }";
    let tree = run_interp(src, false).expect("should run");
    let x = find_named(&tree, tree.root(), "x").unwrap();
    assert_eq!(tree.get_value(x), Some(Value::I32(0)));
}

#[test]
fn division_by_zero_is_interpretation_error() {
    let src = "int main() { int a = 1; int b = 0; a = a / b; }";
    let err = run_interp(src, false).unwrap_err();
    assert_eq!(err.category, Category::Interpretation);
}

#[test]
fn assignment_that_fits_does_not_truncate() {
    let src = "int main() { short s; s = 100; }";
    let tree = run_interp(src, false).expect("should run");
    let s = find_named(&tree, tree.root(), "s").unwrap();
    assert_eq!(tree.get_value(s), Some(Value::I16(100)));
}

#[test]
fn result_type_is_max_of_operand_ranks() {
    let src = "int main() { longlong big = 1; int small = 2; longlong r; r = big + small; }";
    let tree = run_interp(src, false).expect("should run");
    let r = find_named(&tree, tree.root(), "r").unwrap();
    assert_eq!(tree.get_value(r), Some(Value::I64(3)));
}

#[test]
fn while_loop_reinitialises_block_locals_each_iteration() {
    // The `while` body's local `y` must be re-declared (and re-run its
    // initialiser) on every pass — otherwise it would keep whatever value
    // the previous iteration left behind.
    let src = r#"
        int main() {
            int i = 0;
            int total = 0;
            while (i < 3) {
                int y = 1;
                total = total + y;
                i = i + 1;
            }
        }
    "#;
    let tree = run_interp(src, false).expect("should run");
    let total = find_named(&tree, tree.root(), "total").unwrap();
    assert_eq!(tree.get_value(total), Some(Value::I32(3)));
}
