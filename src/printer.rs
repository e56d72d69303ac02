use crate::expr::Expr;
use crate::token::TokenType;

/// Renders a tree as a fully parenthesized prefix string, for example
/// `(* (group (+ 1 2)) 3)`. Total over any well-formed tree; it never
/// evaluates anything.
pub fn print(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Literal(tok) => {
            if tok.data == TokenType::Nil {
                out.push_str("nil");
            } else {
                out.push_str(&tok.lexeme);
            }
        }
        Expr::Grouping(inner) => parenthesize(out, "group", &[inner.as_ref()]),
        Expr::Unary(op, right) => parenthesize(out, &op.lexeme, &[right.as_ref()]),
        Expr::Binary(op, left, right) => {
            parenthesize(out, &op.lexeme, &[left.as_ref(), right.as_ref()])
        }
    }
}

fn parenthesize(out: &mut String, label: &str, children: &[&Expr]) {
    out.push('(');
    out.push_str(label);
    for child in children {
        out.push(' ');
        write_expr(out, child);
    }
    out.push(')');
}
