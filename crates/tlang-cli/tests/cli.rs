use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn source_file(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("create temp file");
    write!(f, "{contents}").expect("write temp file");
    f
}

#[test]
fn missing_source_file_exits_2() {
    Command::cargo_bin("tlang")
        .unwrap()
        .arg("/no/such/file.t")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Невозможно открыть"));
}

#[test]
fn valid_program_parses_with_exit_0() {
    let f = source_file("int main() { int a = 1; }");
    Command::cargo_bin("tlang")
        .unwrap()
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ошибок не обнаружено!"));
}

#[test]
fn syntax_error_exits_1_with_two_line_diagnostic() {
    let f = source_file("int main() { int a = 1 }");
    Command::cargo_bin("tlang")
        .unwrap()
        .arg(f.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Синтаксическая ошибка"))
        .stderr(predicate::str::contains("строка"));
}

#[test]
fn interp_flag_runs_the_program() {
    let f = source_file("int main() { int a; a = a + 1; }");
    Command::cargo_bin("tlang")
        .unwrap()
        .args(["--interp"])
        .arg(f.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Ошибка при интерпретации"));
}

#[test]
fn without_interp_uninitialised_use_is_not_evaluated() {
    // Parsing alone never reads a value, so the same program that fails
    // under --interp parses cleanly without it.
    let f = source_file("int main() { int a; a = a + 1; }");
    Command::cargo_bin("tlang")
        .unwrap()
        .arg(f.path())
        .assert()
        .success();
}

#[test]
fn tokens_flag_echoes_lexemes() {
    let f = source_file("int main() { ; }");
    Command::cargo_bin("tlang")
        .unwrap()
        .args(["--tokens"])
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Код: 1, Лексема: 'int'"));
}

#[test]
fn prints_tree_dump_when_program_has_declarations() {
    let f = source_file("int main() { ; }");
    Command::cargo_bin("tlang")
        .unwrap()
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("область видимости"));
}
