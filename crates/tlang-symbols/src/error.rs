use tlang_lexer::{Category, Diagnostic};

/// Semantic failures raised by the symbol arena itself — duplicate names,
/// unresolved names, and names used as the wrong kind. All of these are
/// `Семантическая ошибка` per `spec.md` §7.
#[derive(Debug, thiserror::Error)]
pub enum SymError {
    #[error("Повторное объявление идентификатора '{0}' в текущей области видимости")]
    Duplicate(String),

    #[error("Необъявленный идентификатор '{0}'")]
    UndeclaredVar(String),

    #[error("'{0}' является меткой типа и не может использоваться как переменная")]
    NotAVariable(String),

    #[error("Необъявленная метка типа '{0}'")]
    UndeclaredType(String),

    #[error("'{0}' не является меткой типа")]
    NotATypeName(String),

    #[error("Внутренняя ошибка: попытка выйти из глобальной области видимости")]
    ExitRootScope,
}

impl SymError {
    pub fn into_diagnostic(self, lexeme: impl Into<String>, line: u32, col: u32) -> Diagnostic {
        Diagnostic::new(Category::Semantic, self.to_string(), lexeme, line, col)
    }
}
