//! Medreport CLI - Analyze medical reports from the command line.

use clap::Parser;
use medreport_cli::commands;
use medreport_cli::{Cli, Command, Config, Formatter};
use medreport_extractor::PdfTextExtractor;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> medreport_cli::Result<()> {
    // A .env file is optional
    let _ = dotenvy::dotenv();

    // Logs go to stderr so JSON output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(model) = cli.model {
        config.set_model(model)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let extractor = PdfTextExtractor::new();

    let output = match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &extractor, &formatter)?,
        Command::Analyze(args) => {
            let analyzer = commands::build_analyzer(&config)?;
            commands::execute_analyze(args, &extractor, &analyzer, &formatter)?
        }
        Command::Chat(args) => {
            let analyzer = commands::build_analyzer(&config)?;
            commands::execute_chat(args, &analyzer, &formatter)?
        }
    };

    println!("{}", output);
    Ok(())
}
