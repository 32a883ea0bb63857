use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use troop::{parse_notes, tally, Bounding, Engine};

#[derive(Parser)]
#[command(
    name = "troop",
    version,
    about = "Simulates a troop of item-juggling actors and reports the level of monkey business"
)]
struct Cli {
    /// Path to the notes file describing the troop.
    input: PathBuf,

    /// Number of rounds to simulate.
    #[arg(long, default_value_t = 20)]
    rounds: u64,

    /// Skip the divide-by-three relief step and bound worry levels by
    /// the product of all divisors instead.
    #[arg(long)]
    no_relief: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("read {}", cli.input.display()))?;
    let actors = parse_notes(&text)?;

    let bounding = if cli.no_relief {
        Bounding::Modulo
    } else {
        Bounding::Relief
    };

    let mut engine = Engine::new(actors, bounding)?;
    engine.run(cli.rounds);

    for (id, count) in tally::busiest(engine.inspections()) {
        info!(%id, count, "inspections");
    }

    // The answer is the only thing that goes to stdout.
    println!("{}", engine.monkey_business());
    Ok(())
}
