use clap::Parser;
use habitui::cli::commands::Cli;
use habitui::cli::handlers;
use habitui::io::config_io;
use habitui::io::logging::{self, LogTarget};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => run_tui(&cli),
        Some(_) => handlers::dispatch(cli),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run_tui(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let path = handlers::config_path(cli)?;
    let config = config_io::read_config(&path)?;
    // The terminal belongs to the UI; logs only go to a configured file
    logging::init(&config.log, LogTarget::FileOnly)?;
    let client = handlers::connect(&config)?;
    habitui::tui::run(client, &config.ui)
}
