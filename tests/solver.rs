use rsimplex::error::LpError;
use rsimplex::number::Number;
use rsimplex::solver::{Event, Phase};
use rsimplex::{Method, Model, SolverConfig, Status, solve_with};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "
max z = x1 + 2*x2
3*x1 <= 4
5*x2 <= 6
x1, x2 >= 0
";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("RSIMPLEX_LOG"))
        .with_test_writer()
        .try_init();
}

fn methods() -> [SolverConfig; 2] {
    [
        SolverConfig::new().with_method(Method::BigM),
        SolverConfig::new().with_method(Method::TwoPhase),
    ]
}

fn solve_text(text: &str, config: &SolverConfig) -> rsimplex::Solution {
    init_tracing();
    let model = Model::parse(text).expect("model");
    solve_with(&model, config).expect("solve")
}

fn frac(num: i64, den: i64) -> Number {
    Number::fraction(num, den)
}

#[test]
fn solves_sample_exactly() {
    for config in methods() {
        let solution = solve_text(SAMPLE, &config);
        assert_eq!(solution.status(), Status::Solved);
        assert_eq!(solution.summary.get("z"), Some(&frac(56, 15)));
        assert_eq!(solution.summary.get("x1"), Some(&frac(4, 3)));
        assert_eq!(solution.summary.get("x2"), Some(&frac(6, 5)));
        assert_eq!(
            solution.pivots,
            vec![
                ("x2".to_string(), "s2".to_string()),
                ("x1".to_string(), "s1".to_string()),
            ]
        );
    }
}

#[test]
fn summary_lists_objective_then_variables() {
    let solution = solve_text(SAMPLE, &SolverConfig::default());
    assert_eq!(
        solution.summary.to_string(),
        "SOLVED\nz = 56/15\nx1 = 4/3\nx2 = 6/5"
    );
}

#[test]
fn trace_brackets_every_pivot() {
    let solution = solve_text(SAMPLE, &SolverConfig::default());
    let steps = solution.trace.steps();
    assert!(matches!(steps.first().map(|s| &s.event), Some(Event::Initial)));
    assert!(matches!(steps.last().map(|s| &s.event), Some(Event::Final)));
    assert_eq!(solution.trace.pivots().count(), 2);
    assert_eq!(steps.last().map(|s| s.phase), Some(Phase::Simplex));

    let quiet = solve_text(SAMPLE, &SolverConfig::new().with_trace(false));
    assert!(quiet.trace.is_empty());
    assert_eq!(quiet.pivots.len(), 2);
}

#[test]
fn opposite_bounds_are_infeasible() {
    let text = "
max z = x
x >= 5
x <= 1
";
    for config in methods() {
        let solution = solve_text(text, &config);
        assert_eq!(solution.status(), Status::Infeasible, "{:?}", config.method);
        assert!(solution.summary.values.is_empty());
    }
}

#[test]
fn conflicting_rows_are_infeasible() {
    let text = "
max z = x + y
x + y <= 1
x + y >= 3
x, y >= 0
";
    for config in methods() {
        let solution = solve_text(text, &config);
        assert_eq!(solution.status(), Status::Infeasible, "{:?}", config.method);
    }
}

#[test]
fn missing_upper_bound_is_unbounded() {
    let text = "
max z = x
x >= 0
";
    for config in methods() {
        let solution = solve_text(text, &config);
        assert_eq!(solution.status(), Status::Unbounded);
        assert_eq!(solution.summary.get("z"), Some(&Number::PosInfinity));
        assert_eq!(solution.summary.get("x"), Some(&Number::PosInfinity));
    }
}

#[test]
fn unbounded_minimum_is_negative_infinity() {
    let text = "
min z = -x
x >= 0
";
    let solution = solve_text(text, &SolverConfig::default());
    assert_eq!(solution.status(), Status::Unbounded);
    assert_eq!(solution.summary.get("z"), Some(&Number::NegInfinity));
}

#[test]
fn unbounded_values_use_user_variables() {
    for config in methods() {
        let solution = solve_text("max z = -x\nx <= 3", &config);
        assert_eq!(solution.status(), Status::Unbounded, "{:?}", config.method);
        assert_eq!(solution.summary.get("z"), Some(&Number::PosInfinity));
        assert_eq!(solution.summary.get("x"), Some(&Number::NegInfinity));
        assert_eq!(solution.summary.get("x1"), None);

        let text = "
max z = x + y
x - y <= 1
x, y >= 2
";
        let solution = solve_text(text, &config);
        assert_eq!(solution.status(), Status::Unbounded, "{:?}", config.method);
        assert_eq!(solution.summary.get("y"), Some(&Number::PosInfinity));
        assert!(solution.summary.get("x1").is_none());
        assert!(solution.summary.get("x2").is_none());
        assert!(
            solution.summary.values.iter().skip(1).all(|(name, _)| name == "x" || name == "y"),
            "{}",
            solution.summary
        );
    }
}

#[test]
fn degenerate_artificial_separates_methods() {
    let text = "
max z = x + y
x + y == 3
x - y <= 1
x, y >= 0
";
    let big_m = solve_text(text, &SolverConfig::new().with_method(Method::BigM));
    assert_eq!(big_m.status(), Status::Solved);
    assert_eq!(big_m.summary.get("z"), Some(&Number::integer(3)));
    assert_eq!(big_m.summary.get("x"), Some(&Number::integer(2)));
    assert_eq!(big_m.summary.get("y"), Some(&Number::integer(1)));

    // Phase I ends at 0 with the artificial still basic.
    let two_phase = solve_text(text, &SolverConfig::new().with_method(Method::TwoPhase));
    assert_eq!(two_phase.status(), Status::Infeasible);
    assert!(two_phase.summary.values.is_empty());
}

#[test]
fn minimum_through_artificial_variable() {
    let text = "
min z = x + y
x + y >= 2
x, y >= 0
";
    for config in methods() {
        let solution = solve_text(text, &config);
        assert_eq!(solution.status(), Status::Solved, "{:?}", config.method);
        assert_eq!(solution.summary.get("z"), Some(&Number::integer(2)));
        assert_eq!(solution.summary.get("x"), Some(&Number::integer(2)));
        assert_eq!(solution.summary.get("y"), Some(&Number::zero()));

        let standard = solution.standard.as_ref().expect("standard form");
        assert_eq!(standard.artificials(), ["a1"]);
        let tableau = solution.tableau.as_ref().expect("tableau");
        assert!(standard.artificials().iter().all(|a| !tableau.is_basic(a)));
        assert!(!tableau.variables().iter().any(|v| v == "a1"));
    }
}

#[test]
fn finite_penalty_reaches_same_optimum() {
    let text = "
max z = 2*x + y
x + y <= 4
x + 3*y >= 6
x, y >= 0
";
    let config = SolverConfig::new().with_penalty("1000".parse().expect("penalty"));
    let solution = solve_text(text, &config);
    assert_eq!(solution.status(), Status::Solved);
    assert_eq!(solution.summary.get("z"), Some(&Number::integer(7)));
    assert_eq!(solution.summary.get("x"), Some(&Number::integer(3)));
    assert_eq!(solution.summary.get("y"), Some(&Number::integer(1)));

    let reference = solve_text(text, &SolverConfig::new().with_method(Method::TwoPhase));
    assert_eq!(reference.summary, solution.summary);
}

#[test]
fn bounded_variables_are_reported_in_user_terms() {
    let text = "
max z = x + y
x == 2
y <= 3
y >= 0
";
    let solution = solve_text(text, &SolverConfig::default());
    assert_eq!(solution.status(), Status::Solved);
    assert_eq!(solution.summary.get("z"), Some(&Number::integer(5)));
    assert_eq!(solution.summary.get("x"), Some(&Number::integer(2)));
    assert_eq!(solution.summary.get("y"), Some(&Number::integer(3)));
}

#[test]
fn shifted_and_flipped_bounds_resolve() {
    let lower = solve_text("min z = x\nx >= -2", &SolverConfig::default());
    assert_eq!(lower.status(), Status::Solved);
    assert_eq!(lower.summary.get("z"), Some(&Number::integer(-2)));
    assert_eq!(lower.summary.get("x"), Some(&Number::integer(-2)));

    let upper = solve_text("max z = x\nx <= 3", &SolverConfig::default());
    assert_eq!(upper.status(), Status::Solved);
    assert_eq!(upper.summary.get("z"), Some(&Number::integer(3)));
    assert_eq!(upper.summary.get("x"), Some(&Number::integer(3)));
}

#[test]
fn pivot_cap_stops_the_solve() {
    init_tracing();
    let model = Model::parse(SAMPLE).unwrap();
    let config = SolverConfig::new().with_max_pivots(1);
    assert_eq!(
        solve_with(&model, &config).unwrap_err(),
        LpError::IterationLimit(1)
    );
}

#[test]
fn disjunctions_are_rejected() {
    init_tracing();
    let model = Model::parse("max z = x\nx <= 1 or x >= 3\nx >= 0").unwrap();
    assert!(matches!(
        solve_with(&model, &SolverConfig::default()),
        Err(LpError::Unsupported(_))
    ));
}

#[test]
fn string_summary() {
    let text = rsimplex::prelude::summary("max z = x\nx <= 1\nx >= 0").unwrap();
    assert_eq!(text, "SOLVED\nz = 1\nx = 1");
}
