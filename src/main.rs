use std::fs::File;
use std::path::Path;

use clap::Parser;
use wizi_quiz::config::{Args, Config};

/// Logs go to a file only; stdout belongs to the terminal UI.
fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&filters)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args = Args::parse();
    let config = match Config::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if let Some(path) = &config.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Cannot open log file {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    if let Err(e) = wizi_quiz::run(config).await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
