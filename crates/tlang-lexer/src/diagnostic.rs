use std::fmt;

/// One of the five error/warning categories `spec.md` §7 enumerates.
///
/// The Russian labels are the literal text the original tool prints; they
/// are part of the external contract, not a translatable UI string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Lexical,
    Syntactic,
    Semantic,
    Interpretation,
    Warning,
}

impl Category {
    fn label(self) -> &'static str {
        match self {
            Category::Lexical => "Лексическая ошибка",
            Category::Syntactic => "Синтаксическая ошибка",
            Category::Semantic => "Семантическая ошибка",
            Category::Interpretation => "Ошибка при интерпретации",
            Category::Warning => "Предупреждение",
        }
    }

    /// Warnings never halt the pipeline; every other category is fatal.
    pub fn is_fatal(self) -> bool {
        !matches!(self, Category::Warning)
    }
}

/// The single currency every crate's errors convert into before printing.
///
/// Mirrors the two-line stderr format required by `spec.md` §6:
/// ```text
/// <Category>: <message> (около '<lexeme>')
/// (строка <line>:<col>)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: Category,
    pub message: String,
    pub lexeme: String,
    pub line: u32,
    pub col: u32,
}

impl Diagnostic {
    pub fn new(
        category: Category,
        message: impl Into<String>,
        lexeme: impl Into<String>,
        line: u32,
        col: u32,
    ) -> Self {
        Diagnostic {
            category,
            message: message.into(),
            lexeme: lexeme.into(),
            line,
            col,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.category.is_fatal()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category.label(), self.message)?;
        if !self.lexeme.is_empty() {
            write!(f, " (около '{}')", self.lexeme)?;
        }
        write!(f, "\n(строка {}:{})", self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_lines() {
        let d = Diagnostic::new(Category::Syntactic, "Ожидалась ';'", "}", 3, 7);
        assert_eq!(
            d.to_string(),
            "Синтаксическая ошибка: Ожидалась ';' (около '}')\n(строка 3:7)"
        );
    }

    #[test]
    fn omits_lexeme_parenthetical_when_empty() {
        let d = Diagnostic::new(Category::Lexical, "неизвестная лексема ''", "", 1, 0);
        assert_eq!(
            d.to_string(),
            "Лексическая ошибка: неизвестная лексема ''\n(строка 1:0)"
        );
    }

    #[test]
    fn only_warning_is_non_fatal() {
        assert!(!Category::Warning.is_fatal());
        assert!(Category::Lexical.is_fatal());
        assert!(Category::Syntactic.is_fatal());
        assert!(Category::Semantic.is_fatal());
        assert!(Category::Interpretation.is_fatal());
    }
}
