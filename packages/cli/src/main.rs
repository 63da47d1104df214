mod commands;
mod config;
mod watcher;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use commands::{
    catalog, export, init, validate, CatalogArgs, ExportArgs, InitArgs, ValidateArgs,
};

/// Pagesmith CLI - export drag-and-drop page documents as framework code
#[derive(Parser, Debug)]
#[command(name = "pagesmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create pagesmith.config.json and an example document
    Init(InitArgs),

    /// Generate code for a document
    Export(ExportArgs),

    /// Check a document's structure and element props
    Validate(ValidateArgs),

    /// List the available component types
    Catalog(CatalogArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Export(args) => export(args, &cwd),
            Command::Validate(args) => validate(args, &cwd),
            Command::Catalog(args) => catalog(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
