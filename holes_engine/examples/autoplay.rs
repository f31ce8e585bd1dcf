use clap::Parser;
use holes_engine::{SimConfig, Simulation};
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Watch agents wander a grid full of hidden holes.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value_t = 12)]
    rows: usize,
    #[arg(long, default_value_t = 30)]
    columns: usize,
    /// Defaults to a tenth of the cells.
    #[arg(long)]
    holes: Option<usize>,
    /// Defaults to a tenth of the cells.
    #[arg(long)]
    agents: Option<usize>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Milliseconds to wait between turns.
    #[arg(long, default_value_t = 500)]
    speed: u64,
    #[arg(long, default_value_t = 1000)]
    max_turns: usize,
    /// Highlight what this agent knows about the grid.
    #[arg(long)]
    focus: Option<usize>,
    /// A JSON config file, used instead of the grid flags above.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> holes_engine::Result<()> {
    // Logs go to stderr so they don't get wiped when the grid is redrawn
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("holes_engine=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SimConfig::from_json(&fs::read_to_string(path)?)?,
        None => SimConfig {
            rows: args.rows,
            columns: args.columns,
            holes: args.holes,
            agents: args.agents,
            seed: args.seed,
        },
    };

    let mut simulation = Simulation::new(&config)?;
    simulation.draw(args.focus)?;

    while !simulation.is_finished() && simulation.turn() < args.max_turns {
        thread::sleep(Duration::from_millis(args.speed));

        let log = simulation.step();
        simulation.draw(args.focus)?;

        for message in log.messages() {
            println!("{}", message);
        }
    }

    println!(
        "\nSimulation ended after {} turns with {} agents alive",
        simulation.turn(),
        simulation.live_agents()
    );

    Ok(())
}
