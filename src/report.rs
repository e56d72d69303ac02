/// Where the scanner, parser and evaluator send their diagnostics.
///
/// The core never prints or aborts on its own; it raises errors here and the
/// host decides what to do with the flags afterwards.
pub trait Reporter {
    fn report(&mut self, line: usize, location: &str, message: &str);

    fn runtime_error(&mut self, line: usize, message: &str);

    fn error(&mut self, line: usize, message: &str) {
        self.report(line, "", message);
    }
}

#[derive(Debug, Default)]
pub struct ConsoleReporter {
    pub had_error: bool,
    pub had_runtime_error: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Default::default()
    }

    // The REPL clears both flags before the next line.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, line: usize, location: &str, message: &str) {
        println!("[line {line}] Error{location}: {message}");
        self.had_error = true;
    }

    fn runtime_error(&mut self, line: usize, message: &str) {
        println!("[line {line}] {message}");
        self.had_runtime_error = true;
    }
}
