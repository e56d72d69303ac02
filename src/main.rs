use std::{
    env::args_os,
    fs,
    io::{self, stdin, IsTerminal},
    path::Path,
    process::ExitCode,
};

use ausdruck::parser::Parser;
use ausdruck::report::ConsoleReporter;
use ausdruck::{interpreter, printer, scanner};

use log::{debug, trace};
use rustyline::error::ReadlineError;
use rustyline::validate::MatchingBracketValidator;
use rustyline::{Completer, Editor, Helper, Highlighter, Hinter, Validator};
use std::error::Error;

const EXIT_USAGE: u8 = 64;
const EXIT_DATA_ERR: u8 = 65;
const EXIT_SOFTWARE: u8 = 70;

fn main() -> ExitCode {
    env_logger::init();

    if args_os().len() > 2 {
        eprintln!("usage: ausdruck [script]");
        return ExitCode::from(EXIT_USAGE);
    }

    if let Some(arg) = args_os().nth(1) {
        run_file(Path::new(&arg))
    } else {
        match run_prompt() {
            Ok(code) => code,
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        }
    }
}

fn run_file(path: &Path) -> ExitCode {
    let content = fs::read_to_string(path).expect("Error reading file.");
    let mut reporter = ConsoleReporter::new();
    run(&content, &mut reporter);
    exit_status(&reporter)
}

#[derive(Helper, Completer, Hinter, Highlighter, Validator)]
struct ReplHelper {
    #[rustyline(Completer)]
    completer: (),
    #[rustyline(Validator)]
    validator: MatchingBracketValidator,
}

fn run_prompt() -> Result<ExitCode, Box<dyn Error>> {
    let mut reporter = ConsoleReporter::new();

    // Piped input is a one-shot run, not an interactive session.
    if !stdin().is_terminal() {
        let program = io::read_to_string(stdin().lock())?;
        run(&program, &mut reporter);
        return Ok(exit_status(&reporter));
    }

    let h = ReplHelper {
        completer: (),
        validator: MatchingBracketValidator::new(),
    };
    let mut rl = Editor::new()?;
    rl.set_helper(Some(h));

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                run(&line, &mut reporter);
                reporter.reset();
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                return Ok(ExitCode::SUCCESS)
            }
            Err(err) => return Err(Box::new(err)),
        }
    }
}

fn run(code: &str, reporter: &mut ConsoleReporter) {
    let tokens = scanner::scan(code, reporter);
    debug!("{tokens:?}");
    if reporter.had_error {
        return;
    }

    match Parser::new(&tokens, reporter).parse() {
        Ok(Some(expr)) => {
            trace!("{}", printer::print(&expr));
            if let Ok(val) = interpreter::interpret(&expr, reporter) {
                println!("{val}");
            }
        }
        Ok(None) => {}
        // Already reported through the reporter.
        Err(_) => {}
    }
}

fn exit_status(reporter: &ConsoleReporter) -> ExitCode {
    if reporter.had_error {
        ExitCode::from(EXIT_DATA_ERR)
    } else if reporter.had_runtime_error {
        ExitCode::from(EXIT_SOFTWARE)
    } else {
        ExitCode::SUCCESS
    }
}
