use tlang_lexer::{Category, Diagnostic, Token, TokenKind};

/// Parses a `CONST_DEC`/`CONST_HEX` lexeme as a signed 64-bit value.
/// `CONST_DEC` is always read at radix 10, deliberately diverging from
/// `evaluateConstant`'s `std::stoll(value, nullptr, 0)` call, whose base-0
/// auto-detection reads any leading-zero decimal lexeme (e.g. `"0123"`) as
/// octal. `spec.md` §4.D specifies base-10 parsing outright, so this
/// workspace never detects octal. A lexeme that does not fit `i64` is a
/// semantic error — the grammar never produces malformed digit sequences,
/// only ones too large to hold.
pub(crate) fn parse_i64_literal(tok: &Token) -> Result<i64, Diagnostic> {
    let digits = if tok.kind == TokenKind::ConstHex {
        &tok.lexeme[2..]
    } else {
        tok.lexeme.as_str()
    };
    let radix = if tok.kind == TokenKind::ConstHex { 16 } else { 10 };
    i64::from_str_radix(digits, radix).map_err(|_| {
        Diagnostic::new(
            Category::Semantic,
            format!("Неверный формат константы '{}'", tok.lexeme),
            tok.lexeme.clone(),
            tok.line,
            tok.col,
        )
    })
}

/// Parses a constant as an `i32`, for array sizes and indices — both are
/// required to fit `int`'s range (`std::stoi`'s `out_of_range` in the
/// original becomes a semantic, not syntactic, error: `overflow_msg`).
pub(crate) fn parse_i32_literal(tok: &Token, overflow_msg: &str) -> Result<i32, Diagnostic> {
    let value = parse_i64_literal(tok)?;
    i32::try_from(value).map_err(|_| {
        Diagnostic::new(
            Category::Semantic,
            overflow_msg.to_string(),
            tok.lexeme.clone(),
            tok.line,
            tok.col,
        )
    })
}
