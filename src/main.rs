//! sentiprobe command-line entry point
//!
//! Checks for an API token, optionally verifies it, then analyzes either a
//! single `--text` argument or lines read interactively from stdin.

use clap::Parser;
use sentiprobe::cli::{Cli, Command, generate_config_template};
use sentiprobe::config::Config;
use sentiprobe::models::ApiToken;
use sentiprobe::prober::Prober;
use sentiprobe::{preflight, repl, telemetry};
use std::path::Path;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before parsing so HF_TOKEN from the file reaches clap
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    if let Some(Command::Config { output }) = &cli.command {
        let template = generate_config_template();
        match output {
            Some(path) => {
                std::fs::write(path, template)?;
                println!("Configuration template written to {}", path);
            }
            None => print!("{}", template),
        }
        return Ok(());
    }

    let (config_path, required) = cli.config_path();
    let config = Config::load(Path::new(config_path), required)?;

    let log_level = if cli.verbose {
        "debug"
    } else {
        config.observability.log_level.as_str()
    };
    telemetry::init(log_level);

    let token = match ApiToken::from_optional(cli.token.clone()) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "Cannot start without an API token");
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let prober = Prober::from_config(&config, token)?;
    tracing::info!(
        candidates = prober.candidates().len(),
        "Starting sentiprobe"
    );

    let mut stdout = std::io::stdout();

    if !cli.skip_preflight {
        preflight::check_token(prober.client(), &mut stdout).await;
    }

    if let Some(text) = cli.text.as_deref().map(str::trim) {
        if text.is_empty() {
            eprintln!("❌ --text cannot be empty");
            std::process::exit(1);
        }
        if !repl::analyze(&prober, text, &mut stdout).await? {
            std::process::exit(1);
        }
        return Ok(());
    }

    repl::run_repl(&prober, BufReader::new(tokio::io::stdin()), &mut stdout).await?;

    Ok(())
}
