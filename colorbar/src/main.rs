use clap::{Parser, Subcommand};
use colorbar_core::cli;
use colorbar_core::cli::conf::ConfigCmd;
use colorbar_core::cli::serve::ServeArgs;
use colorbar_core::cli::watch::WatchArgs;

#[derive(Parser, Debug)]
#[command(
    name = "colorbar",
    version,
    about = "colorbar: fault-injecting color backend and live per-color health chart"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve /color and /metrics (default)
    Serve(ServeArgs),

    /// Poll a backend and chart the answers per color
    Watch(WatchArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Serve(args)) => cli::serve::run(args),
        Some(Command::Watch(args)) => cli::watch::run(args),
        Some(Command::Config { cmd }) => cli::conf::run(cmd),
        None => cli::serve::run(ServeArgs::default()),
    }
}
