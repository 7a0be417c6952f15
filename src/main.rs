use clap::Parser;
use timetrack::cli::commands::Cli;
use timetrack::cli::handlers;
use timetrack::io::logging::{self, LogTarget};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // The TUI owns the terminal, so it logs to a file
    let target = match cli.command {
        None => LogTarget::File(handlers::log_file(&cli)),
        Some(_) => LogTarget::Stderr,
    };
    logging::init(&target, &cli.log_level)?;

    let config = handlers::load_config(cli.config.as_deref())?;
    handlers::dispatch(cli, config)
}
