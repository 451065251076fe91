use std::collections::HashMap;

use crate::expr::Expr;

/// Substitute variable `var` with `replacement` throughout `expr`.
pub fn substitute(expr: &Expr, var: &str, replacement: &Expr) -> Expr {
    match expr {
        Expr::Variable(name) if name == var => replacement.clone(),
        Expr::Unary(op, a) => Expr::Unary(*op, substitute(a, var, replacement).boxed()),
        Expr::Binary(op, a, b) => Expr::Binary(
            *op,
            substitute(a, var, replacement).boxed(),
            substitute(b, var, replacement).boxed(),
        ),
        Expr::List(items) => Expr::List(
            items
                .iter()
                .map(|e| substitute(e, var, replacement))
                .collect(),
        ),
        Expr::Objective(sense, a, b) => Expr::Objective(
            *sense,
            substitute(a, var, replacement).boxed(),
            substitute(b, var, replacement).boxed(),
        ),
        _ => expr.clone(),
    }
}

/// Substitute several variables in one pass; replacements are not revisited.
pub fn substitute_all(expr: &Expr, replacements: &HashMap<String, Expr>) -> Expr {
    match expr {
        Expr::Variable(name) => replacements.get(name).cloned().unwrap_or_else(|| expr.clone()),
        Expr::Unary(op, a) => Expr::Unary(*op, substitute_all(a, replacements).boxed()),
        Expr::Binary(op, a, b) => Expr::Binary(
            *op,
            substitute_all(a, replacements).boxed(),
            substitute_all(b, replacements).boxed(),
        ),
        Expr::List(items) => Expr::List(
            items
                .iter()
                .map(|e| substitute_all(e, replacements))
                .collect(),
        ),
        Expr::Objective(sense, a, b) => Expr::Objective(
            *sense,
            substitute_all(a, replacements).boxed(),
            substitute_all(b, replacements).boxed(),
        ),
        Expr::Literal(_) => expr.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{add, int, mul, var};

    #[test]
    fn replaces_every_occurrence() {
        let expr = add(mul(int(2), var("x")), var("x"));
        let result = substitute(&expr, "x", &var("y"));
        assert_eq!(result, add(mul(int(2), var("y")), var("y")));
    }

    #[test]
    fn simultaneous_replacements_do_not_chain() {
        let expr = add(var("x"), var("y"));
        let map = HashMap::from([("x".to_string(), var("y")), ("y".to_string(), var("x"))]);
        assert_eq!(substitute_all(&expr, &map), add(var("y"), var("x")));
    }
}
