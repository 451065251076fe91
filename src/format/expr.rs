use crate::expr::{BinaryOp, Expr, Literal, UnaryOp};

/// Canonical single-line rendering.
///
/// Parenthesization is positional rather than precedence based: an operand
/// is wrapped only when it is itself an operator node under a word operator,
/// under `/`, or an additive node under `*`. Fractional literals count as `/`.
pub fn render(expr: &Expr) -> String {
    match expr {
        Expr::Literal(Literal::Number(n)) => n.to_string(),
        Expr::Literal(Literal::Bool(true)) => "True".to_string(),
        Expr::Literal(Literal::Bool(false)) => "False".to_string(),
        Expr::Variable(name) => name.clone(),
        Expr::List(items) => items.iter().map(render).collect::<Vec<_>>().join(", "),
        Expr::Objective(sense, var, value) => {
            format!("{sense} {} = {}", render(var), render(value))
        }
        Expr::Unary(op, inner) => {
            let glue = if *op == UnaryOp::Not { " " } else { "" };
            if binary_like(inner).is_some() {
                format!("{}{glue}({})", op.symbol(), render(inner))
            } else {
                format!("{}{glue}{}", op.symbol(), render(inner))
            }
        }
        Expr::Binary(op, left, right) => render_binary(*op, left, right),
    }
}

fn render_binary(op: BinaryOp, left: &Expr, right: &Expr) -> String {
    let spaced = op.is_logical() || op.is_comparison() || matches!(op, BinaryOp::Add | BinaryOp::Sub);
    let glue = if spaced { " " } else { "" };

    let (open, lglue) = if wraps(op, left) {
        ("(", format!("){glue}"))
    } else {
        ("", glue.to_string())
    };
    let (rglue, end) = if wraps(op, right) {
        (format!("{glue}("), ")")
    } else {
        (glue.to_string(), "")
    };

    if op == BinaryOp::Mul {
        if let Some(n) = left.as_number() {
            if n.is_minus_one() {
                return format!("{open}-{lglue}{rglue}{}{end}", render(right));
            }
            if n.is_one() {
                return format!("{open}{lglue}{rglue}{}{end}", render(right));
            }
        }
    }

    format!(
        "{open}{}{lglue}{}{rglue}{}{end}",
        render(left),
        op.symbol(),
        render(right)
    )
}

fn wraps(parent: BinaryOp, operand: &Expr) -> bool {
    if let Some(op) = binary_like(operand) {
        return parent.is_logical()
            || parent == BinaryOp::Div
            || (parent == BinaryOp::Mul && matches!(op, BinaryOp::Add | BinaryOp::Sub));
    }
    matches!(operand, Expr::Unary(..)) && parent.is_logical()
}

/// Operator a node renders with, treating `p/q` literals as divisions.
fn binary_like(expr: &Expr) -> Option<BinaryOp> {
    match expr {
        Expr::Binary(op, _, _) => Some(*op),
        Expr::Literal(Literal::Number(n)) if n.is_finite() && !n.is_integer() => Some(BinaryOp::Div),
        _ => None,
    }
}
