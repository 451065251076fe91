use rsimplex::error::LpError;
use rsimplex::prelude::{canon, norm};

fn expect_normalized(cases: &[(&str, &str)]) {
    for (input, expected) in cases {
        let actual = norm(input).expect("normalize input");
        assert_eq!(
            actual, *expected,
            "normalization mismatch for {input}: got {actual}, expected {expected}"
        );
    }
}

#[test]
fn literals_reduce_to_exact_fractions() {
    expect_normalized(&[
        ("1.0", "1"),
        ("1.5", "3/2"),
        ("2/4", "1/2"),
        ("4/4", "1"),
        ("-5", "-5"),
        ("--5", "5"),
        ("---5", "-5"),
        ("1+2+3", "6"),
    ]);
}

#[test]
fn additive_chains_follow_variable_order() {
    expect_normalized(&[
        ("x - (-1)", "x + 1"),
        ("(2*x)*7", "14*x"),
        ("x + 1 + x", "2*x + 1"),
        ("x + 1 + 2*x", "3*x + 1"),
        ("2*x + 1 + x", "3*x + 1"),
        ("2*x + 1 + 3*x", "5*x + 1"),
        ("x + y + x", "2*x + y"),
        ("x + y + y", "x + 2*y"),
        ("x + y + z + 1 + z + y + x", "2*x + 2*y + 2*z + 1"),
        ("x + y + z + 1 + z + y + x + z + y + x", "3*x + 3*y + 3*z + 1"),
        ("(x + y + z + 1 + 2*z + 2*y + 2*x) + z + y + x", "4*x + 4*y + 4*z + 1"),
        ("-(1*x + 3*y)", "-x + -3*y"),
        ("1*(1 + ((2 + (x*3)) + (2 * (y + 1) * 1))*2)", "6*x + 4*y + 9"),
        ("((2*x1) + ((x2*3) + x1)) - (2 + ((3 - 4) - 5))", "3*x1 + 3*x2 + 4"),
    ]);
}

#[test]
fn negation_is_pushed_to_the_leaves() {
    expect_normalized(&[
        ("not(not x)", "x"),
        ("not(x < 0)", "x >= 0"),
        ("not(x > 0)", "x <= 0"),
        ("not(x <= 0)", "x >= 0"),
        ("not(x >= 0)", "x <= 0"),
        ("not(x == 0)", "x != 0"),
        ("not(x != 0)", "x == 0"),
        ("not True", "False"),
        ("not False", "True"),
        ("not x or y", "(not x) or y"),
        ("x or not y", "x or (not y)"),
        ("not x or not y", "(not x) or (not y)"),
        ("not (x or y)", "(not x) and (not y)"),
        ("not (x or not y)", "(not x) and y"),
        ("not (x and y)", "(not x) or (not y)"),
        ("not (x and not y)", "(not x) or y"),
    ]);
}

#[test]
fn boolean_chains_collapse() {
    expect_normalized(&[
        ("x and x", "x"),
        ("x or x", "x"),
        ("x or not x", "True"),
        ("x or y or not x", "True"),
        ("x xor y", "(x or y) and ((not x) or (not y))"),
        ("x xor not y", "(x or (not y)) and ((not x) or y)"),
        ("x xor not x", "True"),
        ("x and y and x", "x and y"),
        ("x and y and not x", "False"),
        ("x and not x", "False"),
        ("x and True", "x"),
        ("x or True", "True"),
        ("True xor x", "not x"),
        ("x if y", "x or (not y)"),
        ("x iif y", "(x or (not y)) and (y or (not x))"),
    ]);
}

#[test]
fn comparisons_move_terms_left() {
    expect_normalized(&[
        ("x < 1", "x <= 1"),
        ("1 < x", "-x <= -1"),
        ("-x > 0", "x <= 0"),
        ("-x < 0", "x >= 0"),
        ("2*x1 + 2*x2 - 11 <= 0", "2*x1 + 2*x2 <= 11"),
        ("2*x1 - 11 <= - 2*x2", "2*x1 + 2*x2 <= 11"),
        ("x/2 + y/3 <= 1", "3*x + 2*y <= 6"),
        ("2*x + 4*y <= 6", "x + 2*y <= 3"),
        ("1.25*x + 0.5*y <= 0.75", "5*x + 2*y <= 3"),
        ("x + 1/2 <= 2", "2*x <= 3"),
        ("1 == 1", "True"),
        ("1 == 2", "False"),
        ("1 < 1", "False"),
        ("1 <= 1", "True"),
        ("1 <= 2", "True"),
        ("1 >= 2", "False"),
    ]);
}

#[test]
fn objectives_isolate_their_variable() {
    expect_normalized(&[
        ("max z = 0 + 1", "max z = 1"),
        ("max -z = -x", "max -z = -x"),
        ("max 2*z = -x", "max z = -1/2*x"),
        ("max 1/2*z = -x", "max z = -2*x"),
    ]);
}

#[test]
fn lists_expand_per_item() {
    expect_normalized(&[("x, y >= 0", "x >= 0, y >= 0")]);
}

#[test]
fn normalization_is_idempotent() {
    let inputs = [
        "x + y + z + 1 + z + y + x",
        "2*x1 - 11 <= - 2*x2",
        "x/2 + y/3 <= 1",
        "not (x and not y)",
        "x iif y",
        "max 2*z = -x",
    ];
    for input in inputs {
        let once = norm(input).expect("normalize once");
        let twice = norm(&once).expect("normalize twice");
        assert_eq!(once, twice, "not a fixed point: {input}");
    }
}

#[test]
fn variable_denominator_is_rejected() {
    assert!(matches!(norm("1 / x"), Err(LpError::NonLinear(_))));
}

#[test]
fn zero_scaled_objective_is_rejected() {
    assert!(matches!(norm("max 0*z = x"), Err(LpError::Objective(_))));
    assert!(matches!(canon("min 0*z = x"), Err(LpError::Objective(_))));
    assert_eq!(norm("max 2*z = x").unwrap(), "max z = 1/2*x");
}

#[test]
fn canonical_form_maximizes() {
    assert_eq!(canon("min z = 3*x - y").unwrap(), "max -z = -3*x + y");
    assert_eq!(canon("x >= 2").unwrap(), "-x <= -2");
    assert_eq!(canon("x <= 4").unwrap(), "x <= 4");
}
