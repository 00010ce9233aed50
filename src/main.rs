use clap::{Parser, Subcommand};
use groundforge::scenario::Scenario;
use std::process;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Rupture + site scenario (JSON).
    #[arg(global = true, short, long, default_value = "data/scenario.json")]
    scenario: String,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Distance metrics and directivity geometry for the scenario
    Distances(cmd::distances::DistancesArgs),
    /// Mean and sigma per model and intensity measure
    Evaluate(cmd::evaluate::EvaluateArgs),
    /// Exceedance-probability curve over a range of intensity levels
    Curve(cmd::curve::CurveArgs),
    /// Median shaking over a lat/lon grid of sites
    Grid(cmd::grid::GridArgs),
    /// Lognormal realizations of the combined model at one site
    Sample(cmd::sample::SampleArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    println!("\n🌍 Loading scenario: {}", cli.scenario);
    let scenario = Scenario::load_from_file(&cli.scenario).unwrap_or_else(|e| {
        eprintln!("❌ {e}");
        process::exit(1);
    });

    let result = match &cli.command {
        Commands::Distances(args) => cmd::distances::run(args, &scenario),
        Commands::Evaluate(args) => cmd::evaluate::run(args, &scenario),
        Commands::Curve(args) => cmd::curve::run(args, &scenario),
        Commands::Grid(args) => cmd::grid::run(args, &scenario),
        Commands::Sample(args) => cmd::sample::run(args, &scenario),
    };

    if let Err(e) = result {
        eprintln!("\n❌ {e}");
        process::exit(1);
    }
}
