use ausdruck::expr::{EvalError, Val};
use ausdruck::interpreter;
use ausdruck::parser::{ParseErr, Parser};
use ausdruck::report::{ConsoleReporter, Reporter};
use ausdruck::scanner;
use ausdruck::token::TokenType;

use pretty_assertions::assert_eq;

/// Capturing stand-in for the console sink, so tests can look at the exact
/// diagnostics the core emitted.
#[derive(Debug, Default)]
struct Recorder {
    compile: Vec<String>,
    runtime: Vec<String>,
}

impl Reporter for Recorder {
    fn report(&mut self, line: usize, location: &str, message: &str) {
        self.compile
            .push(format!("[line {line}] Error{location}: {message}"));
    }

    fn runtime_error(&mut self, line: usize, message: &str) {
        self.runtime.push(format!("[line {line}] {message}"));
    }
}

#[test]
fn unexpected_character_is_reported_and_skipped() {
    let mut recorder = Recorder::default();
    let tokens = scanner::scan("(+@)", &mut recorder);

    let types: Vec<_> = tokens.into_iter().map(|t| t.data).collect();
    assert_eq!(
        types,
        vec![
            TokenType::LeftParen,
            TokenType::Plus,
            TokenType::RightParen,
            TokenType::Eof,
        ]
    );
    assert_eq!(
        recorder.compile,
        vec!["[line 1] Error: Unexpected character '@'".to_string()]
    );
    assert!(recorder.runtime.is_empty());
}

#[test]
fn every_bad_character_gets_its_own_diagnostic() {
    let mut recorder = Recorder::default();
    let tokens = scanner::scan("@#$", &mut recorder);

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].data, TokenType::Eof);
    assert_eq!(recorder.compile.len(), 3);
}

#[test]
fn unterminated_string_yields_no_token() {
    let mut recorder = Recorder::default();
    let tokens = scanner::scan("\"unterminated", &mut recorder);

    let types: Vec<_> = tokens.into_iter().map(|t| t.data).collect();
    assert_eq!(types, vec![TokenType::Eof]);
    assert_eq!(
        recorder.compile,
        vec!["[line 1] Error: Unterminated string".to_string()]
    );
}

#[test]
fn missing_close_paren_is_attributed_to_the_end() {
    let mut recorder = Recorder::default();
    let tokens = scanner::scan("(1 + 2", &mut recorder);
    let parsed = Parser::new(&tokens, &mut recorder).parse();

    let err = parsed.unwrap_err();
    assert!(matches!(err, ParseErr::ExpectRightParen { .. }));
    assert_eq!(err.token().data, TokenType::Eof);
    assert_eq!(
        recorder.compile,
        vec!["[line 1] Error at end: Expect ')' after expression".to_string()]
    );
}

#[test]
fn unexpected_token_in_primary_position() {
    let mut recorder = Recorder::default();
    let tokens = scanner::scan("1 + * 2", &mut recorder);
    let parsed = Parser::new(&tokens, &mut recorder).parse();

    let err = parsed.unwrap_err();
    assert!(matches!(err, ParseErr::ExpectExpression { .. }));
    assert_eq!(
        recorder.compile,
        vec!["[line 1] Error at '*': Expect expression".to_string()]
    );
}

#[test]
fn syntax_errors_are_reported_exactly_once() {
    let mut recorder = Recorder::default();
    let tokens = scanner::scan("((1 + 2", &mut recorder);
    let parsed = Parser::new(&tokens, &mut recorder).parse();

    assert!(parsed.is_err());
    assert_eq!(recorder.compile.len(), 1);
}

#[test]
fn adding_a_string_and_a_number_is_a_runtime_error() {
    let mut recorder = Recorder::default();
    let tokens = scanner::scan("\"a\" + 1", &mut recorder);
    let expr = Parser::new(&tokens, &mut recorder)
        .parse()
        .unwrap()
        .unwrap();

    let result = interpreter::interpret(&expr, &mut recorder);
    assert_eq!(result, Err(EvalError::AddOperands { line: 1 }));
    assert_eq!(
        recorder.runtime,
        vec!["[line 1] operands to + must be two numbers or two strings".to_string()]
    );
    // The compile-time flag channel stays untouched.
    assert!(recorder.compile.is_empty());
}

#[test]
fn negating_a_string_is_a_runtime_error() {
    let mut recorder = Recorder::default();
    let tokens = scanner::scan("-\"a\"", &mut recorder);
    let expr = Parser::new(&tokens, &mut recorder)
        .parse()
        .unwrap()
        .unwrap();

    let err = interpreter::interpret(&expr, &mut recorder).unwrap_err();
    assert!(matches!(err, EvalError::NotNumber { .. }));
    assert_eq!(
        recorder.runtime,
        vec!["[line 1] operand to - must be a number, got a".to_string()]
    );
}

#[test]
fn ordering_non_numbers_is_a_runtime_error() {
    let mut recorder = Recorder::default();
    let tokens = scanner::scan("1 < \"2\"", &mut recorder);
    let expr = Parser::new(&tokens, &mut recorder)
        .parse()
        .unwrap()
        .unwrap();

    let err = interpreter::interpret(&expr, &mut recorder).unwrap_err();
    assert_eq!(
        err,
        EvalError::NotNumbers {
            operator: "<".into(),
            left: Val::Num(1.0),
            right: Val::Str("2".into()),
            line: 1,
        }
    );
}

#[test]
fn runtime_errors_carry_the_operator_line() {
    let mut recorder = Recorder::default();
    let tokens = scanner::scan("1 +\n2 * \"x\"", &mut recorder);
    let expr = Parser::new(&tokens, &mut recorder)
        .parse()
        .unwrap()
        .unwrap();

    let err = interpreter::interpret(&expr, &mut recorder).unwrap_err();
    assert_eq!(err.line(), 2);
    assert!(recorder.runtime[0].starts_with("[line 2]"));
}

#[test]
fn the_left_operand_fails_first() {
    let mut recorder = Recorder::default();
    let tokens = scanner::scan("(\"x\" * 2) + (3 * \"y\")", &mut recorder);
    let expr = Parser::new(&tokens, &mut recorder)
        .parse()
        .unwrap()
        .unwrap();

    // Only the left subtree's error surfaces; the right one is never reached.
    let err = interpreter::interpret(&expr, &mut recorder).unwrap_err();
    assert_eq!(
        err,
        EvalError::NotNumbers {
            operator: "*".into(),
            left: Val::Str("x".into()),
            right: Val::Num(2.0),
            line: 1,
        }
    );
    assert_eq!(recorder.runtime.len(), 1);
}

#[test]
fn console_reporter_flags_are_independent() {
    let mut reporter = ConsoleReporter::new();
    let tokens = scanner::scan("\"a\" + 1", &mut reporter);
    let expr = Parser::new(&tokens, &mut reporter)
        .parse()
        .unwrap()
        .unwrap();
    assert!(!reporter.had_error);

    let _ = interpreter::interpret(&expr, &mut reporter);
    assert!(reporter.had_runtime_error);
    assert!(!reporter.had_error);

    reporter.reset();
    assert!(!reporter.had_error);
    assert!(!reporter.had_runtime_error);
}

#[test]
fn console_reporter_raises_the_compile_flag_on_scan_errors() {
    let mut reporter = ConsoleReporter::new();
    let tokens = scanner::scan("@", &mut reporter);
    assert!(reporter.had_error);
    assert!(!reporter.had_runtime_error);
    assert_eq!(tokens.len(), 1);
}
