//! Command-line driver for the tlang teaching-language toolchain, grounded
//! on `original_source/lab4.cpp`'s tiny `main`. The driver owns argument
//! handling, file loading, and the single diagnostic-print-and-exit path —
//! everything `spec.md` §1 calls out of scope for the core crates.

use std::fs;
use std::process::ExitCode;

use tlang_lexer::{Lexer, TokenKind};

mod args;

use args::Args;

/// Echoes every token the lexer produces, in its own pass over `source`
/// independent of the parser's own lexing — `spec.md` §6 only requires
/// this stream to be optional and ordered, not interleaved with parsing.
fn echo_tokens(source: &str) {
    let mut lexer = Lexer::new(source);
    loop {
        let tok = lexer.next_token();
        println!("Код: {}, Лексема: '{}'", tok.kind.code(), tok.lexeme);
        if matches!(tok.kind, TokenKind::End | TokenKind::Error) {
            break;
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse(std::env::args().skip(1));

    let bytes = match fs::read(&args.source_file) {
        Ok(bytes) => bytes,
        Err(_) => {
            eprintln!("Невозможно открыть {}", args.source_file);
            return ExitCode::from(2);
        }
    };
    // Only ASCII is lexically significant (`spec.md` §6); bytes outside
    // valid UTF-8 can only occur inside a skipped comment, where a lossy
    // replacement changes nothing observable.
    let source = String::from_utf8_lossy(&bytes).into_owned();

    if args.tokens {
        echo_tokens(&source);
    }

    let (program, mut tree) = match tlang_parser::parse(&source) {
        Ok(parsed) => parsed,
        Err(diagnostic) => {
            eprintln!("{diagnostic}");
            return ExitCode::FAILURE;
        }
    };

    if args.interp {
        if let Err(diagnostic) = tlang_eval::run(&program, &mut tree, args.debug) {
            eprintln!("{diagnostic}");
            return ExitCode::FAILURE;
        }
    }

    println!("Ошибок не обнаружено!");
    if tree.children(tree.root()).is_empty() {
        println!("<дерево семантики пусто>");
    } else {
        print!("{}", tree.print());
    }

    ExitCode::SUCCESS
}
