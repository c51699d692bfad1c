use tlang_lexer::{Category, Diagnostic};

/// Interpretation-time failures, per `spec.md` §7.4: use of uninitialised
/// storage and division/modulo by zero. Both are `Ошибка при интерпретации`
/// and fatal — there is no recovery, matching the rest of the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// `original_source/tree.cpp`'s `ExecuteArithmeticOp` uses the same
    /// literal message for both `/` and `%` by a zero right operand.
    #[error("Деление на ноль")]
    DivisionByZero,

    #[error("Использование неинициализированной переменной/именованной константы '{0}'")]
    UninitializedVar(String),

    #[error("Использование неинициализированного элемента массива '{0}'")]
    UninitializedArrayElem(String),
}

impl EvalError {
    pub fn into_diagnostic(self, lexeme: impl Into<String>, line: u32, col: u32) -> Diagnostic {
        Diagnostic::new(Category::Interpretation, self.to_string(), lexeme, line, col)
    }
}
