use rsimplex::prelude::{canon, norm};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("RSIMPLEX_LOG"))
        .init();

    let inputs = [
        "x + 1 + x",
        "2*x1 + 2*x2 - 11 <= 0",
        "1 < x",
        "x <= 1 xor y >= 2",
        "not (x <= 2 and y >= 1)",
        "min z = 3*x - y",
        "x == 4",
    ];
    for input in inputs {
        match (norm(input), canon(input)) {
            (Ok(normal), Ok(canonical)) => println!("{input}\n  normal:    {normal}\n  canonical: {canonical}"),
            (Err(err), _) | (_, Err(err)) => eprintln!("{input}: {err}"),
        }
    }
}
