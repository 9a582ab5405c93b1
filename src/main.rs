use anyhow::{ensure, Result};
use clap::Parser;
use log::info;

use shipment_scoring::scoring::{DemoTrial, ScoringEngine};

#[derive(Parser)]
#[command(name = "shipment_scoring")]
#[command(about = "Score a demo kitting/assembly trial")]
struct Cli {
    /// Seed for the generated trial
    #[arg(long, default_value = "7")]
    seed: u64,

    /// Number of orders in the trial
    #[arg(long, default_value = "3")]
    orders: usize,

    /// Penalty subtracted from the final score
    #[arg(long, default_value = "0")]
    penalty: i32,

    /// Largest pose perturbation applied to submissions (metres / radians)
    #[arg(long, default_value = "0.01")]
    noise: f64,

    /// Record a collision at the end of the trial
    #[arg(long)]
    collision: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,shipment_scoring=info"),
    )
    .init();

    let cli = Cli::parse();
    ensure!(cli.noise >= 0.0, "noise must not be negative, got {}", cli.noise);

    println!("Scoring demo trial (seed {}, {} orders)...", cli.seed, cli.orders);

    let mut trial = DemoTrial::generate(cli.seed, cli.orders, cli.noise);
    let end_time = trial.events.iter().map(|event| event.time()).fold(0.0, f64::max);
    if cli.collision {
        trial = trial.with_collision(end_time);
    }

    let engine = ScoringEngine::new();
    trial.replay(&engine);
    info!("Replayed {} events up to {:.1}s", trial.events.len(), end_time);

    let score = engine.game_score(cli.penalty);
    println!();
    score.print_summary();
    info!("=== SCORING COMPLETE ===");

    Ok(())
}
