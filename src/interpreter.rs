use crate::expr::{EvalError, Expr, Val};
use crate::report::Reporter;

/// Evaluates the tree and forwards a runtime failure to the collaborator
/// exactly once, tagged with the offending operator's line. The error is
/// still returned so the caller can tell success from failure.
pub fn interpret(expr: &Expr, reporter: &mut dyn Reporter) -> Result<Val, EvalError> {
    match expr.eval() {
        Ok(val) => Ok(val),
        Err(err) => {
            reporter.runtime_error(err.line(), &err.to_string());
            Err(err)
        }
    }
}
