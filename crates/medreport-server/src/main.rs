//! Medreport Server CLI
//!
//! Starts the HTTP server for medical report analysis.

use medreport_server::{build_state, config::ServerConfig, serve, ServerError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ServerError> {
    // A .env file is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Note: No config file specified, using defaults");
        eprintln!("Usage: medreport-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default_config()
    };

    // The provider's blocking HTTP client is created and finally dropped
    // outside the async runtime; `state` keeps the last reference here.
    let state = build_state(&config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(serve(&config, state.clone()));
    drop(runtime);
    drop(state);

    result
}

fn print_help() {
    println!("Medreport Server - Medical Report Analysis over HTTP");
    println!();
    println!("USAGE:");
    println!("    medreport-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    medreport-server --config config/server.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default '127.0.0.1')");
    println!("    - bind_port: Port number (default 5000)");
    println!("    - max_upload_bytes: Largest accepted upload (default 16 MiB)");
    println!("    - [llm] endpoint, model, api_key_env, timeout_secs");
    println!("    - [analyzer] max_text_length (optional), strip_code_fences");
    println!();
    println!("ENVIRONMENT:");
    println!("    GEMINI_API_KEY     API key (name set by llm.api_key_env; .env is read)");
    println!("    RUST_LOG           Log filter (default 'info')");
    println!();
}
