mod cli;
mod commands;
mod config;
mod logging;

use clap::Parser;
use cli::Cli;
use config::CliConfig;
use tracing::{debug, error};

fn main() {
    logging::init();
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid permalink configuration");
            eprintln!("Invalid configuration: {err}");
            std::process::exit(1);
        }
    };
    let scheme = cli.scheme.unwrap_or(config.scheme);
    debug!(?scheme, max_via = config.max_via, "configuration loaded");

    match commands::run(&cli.command, scheme, &config) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
