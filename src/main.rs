// src/main.rs
use std::path::PathBuf;
use std::process::exit;
use anyhow::Result;
use clap::Parser;
use tracing::{error, Level};

use coldreach::{App, Config};

#[derive(Parser)]
#[command(name = "coldreach")]
#[command(about = "AI-powered market research and cold email generator")]
struct Args {
    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; the interactive prompts own stdout, so keep the
    // default level quiet unless --verbose is given
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            exit(1);
        }
    };

    let app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            exit(1);
        }
    };

    if let Err(e) = app.run().await {
        error!("Run failed: {}", e);
        exit(1);
    }

    Ok(())
}
