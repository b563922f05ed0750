//! Cobertura CLI
//!
//! Loads a coverage workbook and a PDET municipality list, evaluates one
//! dashboard view and prints it as JSON on stdout. Logs go to stderr.

mod commands;

use clap::Parser;
use commands::Cli;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match commands::run(&cli) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
