use clap::Parser;
use hrval_cli::cli::Cli;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    if let Err(e) = hrval_cli::run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}
