use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use photoshare::config::{load_config, print_schema};
use photoshare::startup::{run, Command};
use photoshare::utils::logger::init_logging;

#[derive(Parser, Debug)]
#[command(name = "photoshare", about = "Command line client for the photoshare gallery")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, env = "PHOTOSHARE_CONFIG", default_value = "photoshare.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.command == Command::Schema {
        return match print_schema() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match run(config, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
