//! Dodecahedron Acoustics Simulator - command line interface
//!
//! Matches hole diameters against an instrument catalog and simulates wave
//! propagation between the holes.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dodecasim::cli::{
    CliResult, ConfigArgs, GeometryArgs, MatchArgs, ResonanceArgs, SimulateArgs,
};
use dodecasim::constants::APP_NAME;

/// Dodecahedron Acoustics Simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Match hole diameters against an instrument catalog
    Match(MatchArgs),
    /// Simulate wave propagation from one hole to the others
    Simulate(SimulateArgs),
    /// List the hole positions a simulation model runs on
    Geometry(GeometryArgs),
    /// Rank holes by natural frequency against a target
    Resonance(ResonanceArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Match(args) => args.execute(),
            Self::Simulate(args) => args.execute(),
            Self::Geometry(args) => args.execute(),
            Self::Resonance(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays parseable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err}");
        std::process::exit(err.code.code());
    }
}
