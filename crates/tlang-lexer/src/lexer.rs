use crate::token::{Token, TokenKind};

const MAX_LEXEME_LEN: usize = 20;

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

fn is_hex_digit(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

fn is_ident_start(c: u8) -> bool {
    is_letter(c) || c == b'_'
}

fn is_ident_part(c: u8) -> bool {
    is_letter(c) || is_digit(c) || c == b'_'
}

/// Forward-only scanner over a byte buffer, grounded in
/// `original_source/scanner.cpp`'s `getNextLex`. Pushback of already-lexed
/// tokens is the parser's responsibility (a small stack, as in the
/// original's `push_tok`/`push_lex`), not the lexer's — the lexer itself
/// never rewinds.
pub struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source: source.as_bytes(),
            pos: 0,
        }
    }

    fn peek_at(&self, offset: usize) -> u8 {
        let p = self.pos + offset;
        if p < self.source.len() {
            self.source[p]
        } else {
            0
        }
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn bump(&mut self) -> u8 {
        let c = self.peek();
        if self.pos < self.source.len() {
            self.pos += 1;
        }
        c
    }

    /// `1 + count('\n' in prefix)` and the offset since the last newline,
    /// recomputed from scratch each call, matching
    /// `Scanner::getLineCol`'s behaviour exactly.
    pub fn line_col(&self) -> (u32, u32) {
        self.line_col_at(self.pos)
    }

    fn line_col_at(&self, pos: usize) -> (u32, u32) {
        let mut line = 1u32;
        let mut col = 0u32;
        let end = pos.min(self.source.len());
        for &b in &self.source[..end] {
            if b == b'\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    fn skip_ignored(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.bump();
                }
                b'/' if self.peek_at(1) == b'/' => {
                    while self.peek() != b'\n' && self.peek() != 0 {
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_ignored();
        let (line, col) = self.line_col();
        let c = self.peek();

        if c == 0 {
            return Token::new(TokenKind::End, "", line, col);
        }
        if is_ident_start(c) {
            return self.lex_ident(line, col);
        }
        if is_digit(c) {
            return self.lex_number(line, col);
        }
        self.lex_operator(line, col)
    }

    fn lex_ident(&mut self, line: u32, col: u32) -> Token {
        let mut lex = String::new();
        lex.push(self.bump() as char);
        while is_ident_part(self.peek()) {
            lex.push(self.bump() as char);
        }

        let kind = TokenKind::keyword_from_str(&lex).unwrap_or(TokenKind::Ident);
        if kind == TokenKind::Ident && lex.len() > MAX_LEXEME_LEN {
            return Token::new(TokenKind::Error, lex, line, col);
        }
        Token::new(kind, lex, line, col)
    }

    fn lex_number(&mut self, line: u32, col: u32) -> Token {
        let first = self.bump();
        if first != b'0' {
            let mut lex = String::new();
            lex.push(first as char);
            while is_digit(self.peek()) {
                lex.push(self.bump() as char);
            }
            return if lex.len() > MAX_LEXEME_LEN {
                Token::new(TokenKind::Error, lex, line, col)
            } else {
                Token::new(TokenKind::ConstDec, lex, line, col)
            };
        }

        let next = self.peek();
        if next == b'x' || next == b'X' {
            self.bump();
            let mut lex = String::from("0");
            lex.push(next as char);
            if !is_hex_digit(self.peek()) {
                return Token::new(TokenKind::Error, lex, line, col);
            }
            while is_hex_digit(self.peek()) {
                lex.push(self.bump() as char);
            }
            return if lex.len() > MAX_LEXEME_LEN {
                Token::new(TokenKind::Error, lex, line, col)
            } else {
                Token::new(TokenKind::ConstHex, lex, line, col)
            };
        }

        if is_digit(next) {
            let mut lex = String::from("0");
            while is_digit(self.peek()) {
                lex.push(self.bump() as char);
            }
            return if lex.len() > MAX_LEXEME_LEN {
                Token::new(TokenKind::Error, lex, line, col)
            } else {
                Token::new(TokenKind::ConstDec, lex, line, col)
            };
        }

        Token::new(TokenKind::ConstDec, "0", line, col)
    }

    fn lex_operator(&mut self, line: u32, col: u32) -> Token {
        let c = self.bump();
        macro_rules! tok {
            ($kind:expr, $lex:expr) => {
                Token::new($kind, $lex, line, col)
            };
        }
        match c {
            b'+' => tok!(TokenKind::Plus, "+"),
            b'-' => tok!(TokenKind::Minus, "-"),
            b'*' => tok!(TokenKind::Mult, "*"),
            b'/' => tok!(TokenKind::Div, "/"),
            b'%' => tok!(TokenKind::Mod, "%"),
            b'=' => {
                if self.peek() == b'=' {
                    self.bump();
                    tok!(TokenKind::Eq, "==")
                } else {
                    tok!(TokenKind::Assign, "=")
                }
            }
            b'!' => {
                if self.peek() == b'=' {
                    self.bump();
                    tok!(TokenKind::Neq, "!=")
                } else {
                    tok!(TokenKind::Error, "!")
                }
            }
            b'<' => {
                if self.peek() == b'=' {
                    self.bump();
                    tok!(TokenKind::Le, "<=")
                } else {
                    tok!(TokenKind::Lt, "<")
                }
            }
            b'>' => {
                if self.peek() == b'=' {
                    self.bump();
                    tok!(TokenKind::Ge, ">=")
                } else {
                    tok!(TokenKind::Gt, ">")
                }
            }
            b';' => tok!(TokenKind::Semi, ";"),
            b',' => tok!(TokenKind::Comma, ","),
            b'(' => tok!(TokenKind::LParen, "("),
            b')' => tok!(TokenKind::RParen, ")"),
            b'{' => tok!(TokenKind::LBrace, "{"),
            b'}' => tok!(TokenKind::RBrace, "}"),
            b'[' => tok!(TokenKind::LBracket, "["),
            b']' => tok!(TokenKind::RBracket, "]"),
            other => Token::new(TokenKind::Error, (other as char).to_string(), line, col),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut lx = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let t = lx.next_token();
            let done = t.kind == TokenKind::End;
            out.push(t.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn keywords_and_ident() {
        assert_eq!(
            kinds("int short long longlong const typedef while main foo"),
            vec![
                TokenKind::KwInt,
                TokenKind::KwShort,
                TokenKind::KwLong,
                TokenKind::KwLongLong,
                TokenKind::KwConst,
                TokenKind::KwTypedef,
                TokenKind::KwWhile,
                TokenKind::KwMain,
                TokenKind::Ident,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn ident_exactly_20_is_accepted_21_errors() {
        let twenty = "a".repeat(20);
        let mut lx = Lexer::new(&twenty);
        assert_eq!(lx.next_token().kind, TokenKind::Ident);

        let twenty_one = "a".repeat(21);
        let mut lx = Lexer::new(&twenty_one);
        assert_eq!(lx.next_token().kind, TokenKind::Error);
    }

    #[test]
    fn decimal_with_leading_zero_stays_decimal() {
        let mut lx = Lexer::new("0123");
        let t = lx.next_token();
        assert_eq!(t.kind, TokenKind::ConstDec);
        assert_eq!(t.lexeme, "0123");
    }

    #[test]
    fn hex_without_digits_is_error() {
        let mut lx = Lexer::new("0x");
        let t = lx.next_token();
        assert_eq!(t.kind, TokenKind::Error);
        assert_eq!(t.lexeme, "0x");
    }

    #[test]
    fn hex_constant() {
        let mut lx = Lexer::new("0x0A");
        let t = lx.next_token();
        assert_eq!(t.kind, TokenKind::ConstHex);
        assert_eq!(t.lexeme, "0x0A");
    }

    #[test]
    fn two_char_operators_take_priority() {
        assert_eq!(kinds("== != <= >= < > ="), vec![
            TokenKind::Eq,
            TokenKind::Neq,
            TokenKind::Le,
            TokenKind::Ge,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Assign,
            TokenKind::End,
        ]);
    }

    #[test]
    fn bare_bang_is_error() {
        let mut lx = Lexer::new("!");
        let t = lx.next_token();
        assert_eq!(t.kind, TokenKind::Error);
        assert_eq!(t.lexeme, "!");
    }

    #[test]
    fn line_comment_is_skipped() {
        assert_eq!(kinds("// a whole comment\nint"), vec![TokenKind::KwInt, TokenKind::End]);
    }

    #[test]
    fn line_col_tracking() {
        let mut lx = Lexer::new("int\nfoo");
        lx.next_token();
        let t = lx.next_token();
        assert_eq!((t.line, t.col), (2, 0));
    }
}
