mod cli;

use clap::{Parser, Subcommand};
use tracing::{error, Level};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity of the program:
    /// -v for debug, -vv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate the solvent accessible surface area of atoms or residues
    Sasa(cli::sasa::Args),
    /// Calculate how much of each residue's surface is occluded by the other chains
    Occlusion(cli::occlusion::Args),
}

fn main() {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let result = match &args.command {
        Commands::Sasa(args) => cli::sasa::run(args),
        Commands::Occlusion(args) => cli::occlusion::run(args),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}
