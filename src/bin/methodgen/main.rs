//! methodgen CLI - P/Invoke binding generator for annotated native sources

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use methodgen::GenerateError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        // Generation errors carry source spans; let miette render them.
        match e.downcast::<GenerateError>() {
            Ok(err) => eprintln!("{:?}", miette::Report::new(err)),
            Err(e) => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("methodgen=debug")
    } else {
        EnvFilter::new("methodgen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    let color = !cli.no_color;

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, cli.config, color),
        Commands::Inspect(args) => commands::inspect::execute(args, cli.config),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
