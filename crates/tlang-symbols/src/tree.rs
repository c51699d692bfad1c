use std::fmt::Write as _;

use crate::data_type::DataType;
use crate::error::SymError;
use crate::node::{SymbolId, SymbolNode};
use crate::value::Value;

/// A rooted, arena-backed tree of lexical scopes, per `spec.md` §3/§4.B.
///
/// Nodes never move and never get removed once created — a scope's
/// children survive `exit_scope` so the whole tree can be printed after
/// parsing (`spec.md`'s Lifecycle paragraph).
pub struct SymbolTree {
    nodes: Vec<SymbolNode>,
    root: SymbolId,
    cur: SymbolId,
}

impl SymbolTree {
    pub fn new() -> Self {
        let root_node = SymbolNode::new(
            "<глобальная область видимости>".to_string(),
            DataType::Scope,
            0,
            0,
            None,
        );
        SymbolTree {
            nodes: vec![root_node],
            root: SymbolId(0),
            cur: SymbolId(0),
        }
    }

    pub fn root(&self) -> SymbolId {
        self.root
    }

    pub fn current(&self) -> SymbolId {
        self.cur
    }

    pub fn node(&self, id: SymbolId) -> &SymbolNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: SymbolId) -> &mut SymbolNode {
        &mut self.nodes[id.0]
    }

    fn push_node(&mut self, node: SymbolNode) -> SymbolId {
        let id = SymbolId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn append_child(&mut self, parent: SymbolId, child: SymbolId) {
        match self.nodes[parent.0].first_child {
            None => self.nodes[parent.0].first_child = Some(child),
            Some(first) => {
                let mut last = first;
                while let Some(next) = self.nodes[last.0].next_sibling {
                    last = next;
                }
                self.nodes[last.0].next_sibling = Some(child);
            }
        }
    }

    /// Children of `scope`, in source order — exactly the declarations of
    /// that block per invariant 4.
    pub fn children(&self, scope: SymbolId) -> Vec<SymbolId> {
        let mut out = Vec::new();
        let mut cursor = self.nodes[scope.0].first_child;
        while let Some(id) = cursor {
            out.push(id);
            cursor = self.nodes[id.0].next_sibling;
        }
        out
    }

    fn lookup_one_level(&self, scope: SymbolId, name: &str) -> Option<SymbolId> {
        self.children(scope).into_iter().find(|&id| self.nodes[id.0].name == name)
    }

    /// Fails with *duplicate declaration* (invariant 1) if `name` already
    /// names a direct child of the current scope.
    pub fn declare(&mut self, name: &str, kind: DataType, line: u32, col: u32) -> Result<SymbolId, SymError> {
        if self.lookup_one_level(self.cur, name).is_some() {
            return Err(SymError::Duplicate(name.to_string()));
        }
        let node = SymbolNode::new(name.to_string(), kind, line, col, Some(self.cur));
        let id = self.push_node(node);
        self.append_child(self.cur, id);
        Ok(id)
    }

    pub fn set_basic_type(&mut self, id: SymbolId, basic_type: DataType) {
        self.nodes[id.0].basic_type = basic_type;
    }

    pub fn set_array_count(&mut self, id: SymbolId, count: i32) {
        self.nodes[id.0].elem_count = count;
    }

    pub fn set_const(&mut self, id: SymbolId, is_const: bool) {
        self.nodes[id.0].is_const = is_const;
    }

    pub fn set_index(&mut self, id: SymbolId, index: i32) {
        self.nodes[id.0].index = Some(index);
    }

    /// Walks current scope outward to the root (invariant 2); rejects a
    /// resolved `TypedefName` as *not a variable*. The caller already holds
    /// the `(line, col)` of the referencing token and attaches it when
    /// turning a returned `SymError` into a `Diagnostic`.
    pub fn lookup_var(&self, name: &str) -> Result<SymbolId, SymError> {
        let mut scope = Some(self.cur);
        while let Some(s) = scope {
            if let Some(id) = self.lookup_one_level(s, name) {
                return if self.nodes[id.0].kind == DataType::TypedefName {
                    Err(SymError::NotAVariable(name.to_string()))
                } else {
                    Ok(id)
                };
            }
            scope = self.nodes[s.0].parent;
        }
        Err(SymError::UndeclaredVar(name.to_string()))
    }

    /// Typedefs resolve only against the root scope (invariant 3).
    pub fn lookup_type(&self, name: &str) -> Result<SymbolId, SymError> {
        match self.lookup_one_level(self.root, name) {
            Some(id) if self.nodes[id.0].kind == DataType::TypedefName => Ok(id),
            Some(_) => Err(SymError::NotATypeName(name.to_string())),
            None => Err(SymError::UndeclaredType(name.to_string())),
        }
    }

    pub fn enter_scope(&mut self, line: u32, col: u32) -> SymbolId {
        let node = SymbolNode::new(String::new(), DataType::Scope, line, col, Some(self.cur));
        let id = self.push_node(node);
        self.append_child(self.cur, id);
        self.cur = id;
        id
    }

    pub fn exit_scope(&mut self) -> Result<(), SymError> {
        match self.nodes[self.cur.0].parent {
            Some(parent) => {
                self.cur = parent;
                Ok(())
            }
            None => Err(SymError::ExitRootScope),
        }
    }

    pub fn set_value(&mut self, id: SymbolId, value: Value) {
        self.nodes[id.0].value = Some(value);
    }

    pub fn get_value(&self, id: SymbolId) -> Option<Value> {
        self.nodes[id.0].value
    }

    /// Clears a node's `has-value` bit. Used by the evaluator to give a
    /// `while` body's locals "fresh scope entry" on each iteration.
    pub fn reset_value(&mut self, id: SymbolId) {
        self.nodes[id.0].value = None;
    }

    /// Indented dump of the whole tree, for the non-interpreting run mode
    /// `spec.md` §6 describes.
    pub fn print(&self) -> String {
        let mut out = String::new();
        self.print_node(self.root, 0, &mut out);
        out
    }

    fn print_node(&self, id: SymbolId, depth: usize, out: &mut String) {
        let node = &self.nodes[id.0];
        let indent = "  ".repeat(depth);
        let label = self.make_label(node);
        let _ = writeln!(out, "{indent}{label}");
        for child in self.children(id) {
            self.print_node(child, depth + 1, out);
        }
    }

    fn make_label(&self, node: &SymbolNode) -> String {
        let name = if node.name.is_empty() { "<блок>" } else { node.name.as_str() };
        match node.kind {
            DataType::Scope => format!("{name} [область видимости]"),
            DataType::Array => format!(
                "{name}: массив[{}] из {}",
                node.elem_count,
                node.basic_type.display_name()
            ),
            DataType::TypedefName => format!(
                "{name}: метка типа -> {}{}",
                node.basic_type.display_name(),
                if node.elem_count > 0 {
                    format!("[{}]", node.elem_count)
                } else {
                    String::new()
                }
            ),
            _ => {
                let cst = if node.is_const { " const" } else { "" };
                let val = match node.value {
                    Some(v) => format!(" = {}", v.as_i64()),
                    None => String::new(),
                };
                format!("{name}: {}{cst}{val}", node.kind.display_name())
            }
        }
    }
}

impl Default for SymbolTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_then_lookup() {
        let mut tree = SymbolTree::new();
        let id = tree.declare("a", DataType::Int, 1, 0).unwrap();
        assert_eq!(tree.lookup_var("a").unwrap(), id);
    }

    #[test]
    fn duplicate_in_same_scope_errors() {
        let mut tree = SymbolTree::new();
        tree.declare("a", DataType::Int, 1, 0).unwrap();
        assert!(matches!(tree.declare("a", DataType::Int, 2, 0), Err(SymError::Duplicate(_))));
    }

    #[test]
    fn inner_scope_shadows_and_does_not_leak() {
        let mut tree = SymbolTree::new();
        let outer = tree.declare("a", DataType::Int, 1, 0).unwrap();
        tree.set_value(outer, Value::I32(1));

        tree.enter_scope(1, 5);
        let inner = tree.declare("a", DataType::Int, 1, 6).unwrap();
        tree.set_value(inner, Value::I32(2));
        assert_eq!(tree.lookup_var("a").unwrap(), inner);
        tree.exit_scope().unwrap();

        assert_eq!(tree.lookup_var("a").unwrap(), outer);
        assert_eq!(tree.get_value(outer), Some(Value::I32(1)));
    }

    #[test]
    fn undeclared_name_errors() {
        let tree = SymbolTree::new();
        assert!(matches!(tree.lookup_var("nope"), Err(SymError::UndeclaredVar(_))));
    }

    #[test]
    fn typedef_resolves_only_from_root() {
        let mut tree = SymbolTree::new();
        tree.declare("T", DataType::TypedefName, 1, 0).unwrap();
        tree.enter_scope(1, 0);
        // Still resolvable from inside a nested scope: typedefs are global.
        assert!(tree.lookup_type("T").is_ok());
    }

    #[test]
    fn exiting_root_scope_errors() {
        let mut tree = SymbolTree::new();
        assert!(matches!(tree.exit_scope(), Err(SymError::ExitRootScope)));
    }
}
