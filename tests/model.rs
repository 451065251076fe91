use rsimplex::error::LpError;
use rsimplex::format::model::{model as model_listing, program as program_listing, standard_form};
use rsimplex::{Expr, Model, Program, StandardForm, parse_constraint, parse_objective};

const SAMPLE: &str = "
# two products, two machines
max z = x1 + 2*x2
3*x1 <= 4
5*x2 <= 6   # second machine
x1 >= 0
x2 >= 0
";

#[test]
fn parses_objective_then_constraints() {
    let model = Model::parse(SAMPLE).unwrap();
    assert_eq!(model.objective_name(), "z");
    assert_eq!(model.variables(), ["x1", "x2"]);
    assert_eq!(model.constraints().len(), 4);
    assert_eq!(model.objective().to_string(), "max z = x1 + 2*x2");
}

#[test]
fn listing_groups_sign_constraints() {
    let model = Model::parse(SAMPLE).unwrap();
    assert_eq!(
        model_listing(&model),
        "max z = x1 + 2*x2\n3*x1 <= 4\n5*x2 <= 6\nx1, x2 >= 0"
    );
}

#[test]
fn rejects_malformed_models() {
    let cases = [
        ("3*x <= 1\nmax z = x", "Constraint found before objective function"),
        ("max z = x\nmin y = x", "Multiple objective function found"),
        ("x <= 1", "Constraint found before objective function"),
        ("", "No objective function found"),
        ("max z = x\nz <= 3", "Constraint uses objective as variable: z <= 3"),
    ];
    for (text, message) in cases {
        assert_eq!(
            Model::parse(text).unwrap_err(),
            LpError::Model(message.to_string()),
            "{text}"
        );
    }
}

#[test]
fn new_accepts_prebuilt_trees() {
    let objective = parse_objective("min cost = 2*a + b").unwrap();
    let constraints: Vec<Expr> = vec![parse_constraint("a + b >= 1").unwrap()];
    let model = Model::new(objective, constraints).unwrap();
    assert_eq!(model.objective_name(), "cost");
    assert_eq!(model.variables(), ["a", "b"]);
}

#[test]
fn program_is_canonical() {
    let program = Program::from_model(&Model::parse(SAMPLE).unwrap()).unwrap();
    assert!(!program.is_infeasible());
    assert_eq!(program.variables(), ["x1", "x2"]);
    assert_eq!(program.general_constraints().count(), 2);
    assert!(program.renames().is_empty());
    assert_eq!(
        program_listing(&program),
        "max z = x1 + 2*x2\n3*x1 <= 4\n5*x2 <= 6\nx1, x2 >= 0"
    );
}

#[test]
fn program_folds_bounds_into_substitutions() {
    let model = Model::parse("max z = x + y\nx + y <= 10\nx <= 3\ny == 2").unwrap();
    let program = Program::from_model(&model).unwrap();
    assert_eq!(program.renames().get("y").map(|e| e.to_string()).as_deref(), Some("2"));
    assert_eq!(program.renames().get("x").map(|e| e.to_string()).as_deref(), Some("-x1 + 3"));
    assert_eq!(program.initial_variables(), ["x", "y"]);
}

#[test]
fn free_variables_are_split() {
    let model = Model::parse("max z = x\nx + y <= 4\ny >= 0").unwrap();
    let program = Program::from_model(&model).unwrap();
    assert_eq!(
        program.renames().get("x").map(|e| e.to_string()).as_deref(),
        Some("x1 - x2")
    );
    assert!(program.variables().iter().any(|v| v == "x1"));
    assert!(program.variables().iter().any(|v| v == "x2"));
}

#[test]
fn unused_variables_are_dropped() {
    let model = Model::parse("max z = x\nx <= 1\nx >= 0\ny >= 5\ny <= 1").unwrap();
    let program = Program::from_model(&model).unwrap();
    assert!(program.is_infeasible());
    assert_eq!(program.initial_variables(), ["x"]);
}

#[test]
fn false_constraints_mark_infeasible() {
    let model = Model::parse("max z = x\nx <= 1\nx >= 0\n1 >= 2").unwrap();
    let program = Program::from_model(&model).unwrap();
    assert!(program.is_infeasible());
}

#[test]
fn standard_form_adds_slacks_and_artificials() {
    let model = Model::parse("max z = x + y\nx + y <= 4\nx + y >= 1\nx, y >= 0").unwrap();
    let program = Program::from_model(&model).unwrap();
    let standard = StandardForm::from_program(&program).unwrap();
    assert_eq!(standard.slacks(), ["s1", "s2"]);
    assert_eq!(standard.artificials(), ["a1"]);
    assert_eq!(standard.basis(), ["s1", "a1"]);
    assert_eq!(standard.equalities().len(), 2);
    assert!(standard.is_artificial("a1"));
    assert!(!standard.is_artificial("s2"));
    assert_eq!(standard.variables(), ["x", "y", "s1", "s2", "a1"]);

    let listing = standard_form(&standard);
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "max z = x + y");
    assert_eq!(lines[3], "x, y, s1, s2, a1 >= 0");
}
