//! uastd CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uastd::cli::{self, Cli, Commands, DriversCommand, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins unless --verbose asks for everything.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Drivers {
            command: DriversCommand::List(args),
        } => cli::run_drivers_list(args, config),
        Commands::Lang(args) => cli::run_lang(args, config),
        Commands::Uast(args) => cli::run_uast(args, config),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
