use crate::interp::Interp;

/// `DEBUG: [<scope>] (line:col) <msg>`, gated on `debug && interpreting` —
/// the evaluator only ever runs while interpreting, so `Interp::debug` is
/// the only gate left to check, matching
/// `original_source/tree.cpp`'s `PrintDebugInfo`.
impl Interp<'_> {
    pub(crate) fn trace(&self, line: u32, col: u32, msg: impl AsRef<str>) {
        if !self.debug {
            return;
        }
        let name = &self.tree.node(self.current_scope).name;
        let label = if name.is_empty() { "<блок>" } else { name.as_str() };
        println!("DEBUG: [{label}] ({line}:{col}) {}", msg.as_ref());
    }
}
