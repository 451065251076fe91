use rsimplex::format::{TableauFormat, dictionary, model::program};
use rsimplex::{Method, SolverConfig};
use tracing_subscriber::EnvFilter;

const MODEL: &str = "
max z = x1 + 2*x2
3*x1 <= 4
5*x2 <= 6
x1, x2 >= 0
";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("RSIMPLEX_LOG"))
        .init();

    let config = match SolverConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return;
        }
    };
    let method = match config.method {
        Method::BigM => "Big-M",
        Method::TwoPhase => "two-phase",
    };

    match rsimplex::prelude::solve_with(MODEL, &config) {
        Ok(solution) => {
            println!("# program ({method})\n{}\n", program(&solution.program));
            for step in solution.trace.steps() {
                println!("* {} / {}", step.phase, step.event);
                match TableauFormat::default().render(&step.tableau) {
                    Ok(grid) => println!("{grid}\n"),
                    Err(err) => eprintln!("render error: {err}"),
                }
            }
            if let Some(tableau) = &solution.tableau {
                match dictionary(tableau) {
                    Ok(dict) => println!("{dict}\n"),
                    Err(err) => eprintln!("render error: {err}"),
                }
            }
            println!("{}", solution.summary);
        }
        Err(err) => eprintln!("solve error: {err}"),
    }
}
