use tlang_lexer::{Category, Diagnostic, Lexer, Token, TokenKind};
use tlang_symbols::{DataType, SymError, SymbolTree};

/// Recursive-descent parser over `tlang_lexer`'s token stream.
///
/// One token of lookahead is kept via a small pushback stack
/// (`original_source/diagram.cpp`'s `push_tok`/`push_lex`), not a cursor
/// rewind — `peek` calls `next` and immediately pushes the result back, the
/// same trick `Diagram::peekToken` uses. Every error is fatal: the first
/// `Err` returned anywhere aborts parsing, matching `spec.md` §7's
/// propagation policy.
pub struct Parser<'a> {
    pub(crate) lexer: Lexer<'a>,
    pub(crate) pushback: Vec<Token>,
    pub(crate) cur: Token,
    pub(crate) tree: SymbolTree,

    /// The base type of the declaration currently being parsed, populated
    /// when a type is consumed and read back by `IdInit` — mirrors
    /// `Diagram::current_decl_type`.
    pub(crate) current_decl_type: DataType,
    /// Element count carried alongside `current_decl_type` when the type
    /// in scope is an array typedef.
    pub(crate) current_arr_elem_count: i32,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(source),
            pushback: Vec::new(),
            cur: Token::new(TokenKind::End, "", 1, 0),
            tree: SymbolTree::new(),
            current_decl_type: DataType::Undefined,
            current_arr_elem_count: 0,
        }
    }

    /// Consumes and returns the next token, updating `self.cur`. A lexical
    /// error aborts immediately — there is no pushback of an error token.
    pub(crate) fn bump(&mut self) -> Result<Token, Diagnostic> {
        let tok = match self.pushback.pop() {
            Some(t) => t,
            None => self.lexer.next_token(),
        };
        if tok.kind == TokenKind::Error {
            return Err(Diagnostic::new(
                Category::Lexical,
                format!("неизвестная лексема '{}'", tok.lexeme),
                tok.lexeme.clone(),
                tok.line,
                tok.col,
            ));
        }
        self.cur = tok.clone();
        Ok(tok)
    }

    /// Looks at the next token's kind without consuming it.
    pub(crate) fn peek(&mut self) -> Result<TokenKind, Diagnostic> {
        let tok = self.bump()?;
        let kind = tok.kind;
        self.pushback.push(tok);
        Ok(kind)
    }

    pub(crate) fn push_back(&mut self, tok: Token) {
        self.pushback.push(tok);
    }

    pub(crate) fn syn_err<T>(&self, msg: impl Into<String>) -> Result<T, Diagnostic> {
        Err(Diagnostic::new(
            Category::Syntactic,
            msg,
            self.cur.lexeme.clone(),
            self.cur.line,
            self.cur.col,
        ))
    }

    pub(crate) fn sem_err<T>(&self, msg: impl Into<String>) -> Result<T, Diagnostic> {
        Err(Diagnostic::new(
            Category::Semantic,
            msg,
            self.cur.lexeme.clone(),
            self.cur.line,
            self.cur.col,
        ))
    }

    pub(crate) fn sem_from(&self, err: SymError) -> Diagnostic {
        err.into_diagnostic(self.cur.lexeme.clone(), self.cur.line, self.cur.col)
    }

    /// Consumes the next token and fails with a syntax error unless it has
    /// `kind`.
    pub(crate) fn expect(&mut self, kind: TokenKind, msg: &str) -> Result<Token, Diagnostic> {
        let next_kind = self.peek()?;
        if next_kind != kind {
            return self.syn_err(msg);
        }
        self.bump()
    }
}
