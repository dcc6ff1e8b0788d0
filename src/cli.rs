//! Command-line interface for sentiprobe
//!
//! Provides argument parsing and subcommand handling for the sentiprobe binary.

use clap::{Parser, Subcommand};

/// Default configuration file, read only if present
pub const DEFAULT_CONFIG_PATH: &str = "sentiprobe.toml";

/// Sentiment analysis against hosted inference models
#[derive(Parser)]
#[command(name = "sentiprobe")]
#[command(version)]
#[command(about = "Sentiment analysis against hosted inference models with fallback")]
#[command(
    long_about = "sentiprobe sends text to a list of hosted sentiment models, trying each \
    in order until one answers, and prints the classification. Without --text it runs \
    an interactive prompt."
)]
pub struct Cli {
    /// Path to configuration file (optional unless given explicitly)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Hugging Face access token
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Analyze this text once and exit instead of prompting
    #[arg(short, long)]
    pub text: Option<String>,

    /// Skip the token identity check
    #[arg(long)]
    pub skip_preflight: bool,

    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Config path to load and whether it must exist
    pub fn config_path(&self) -> (&str, bool) {
        match &self.config {
            Some(path) => (path.as_str(), true),
            None => (DEFAULT_CONFIG_PATH, false),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# sentiprobe Configuration
# =========================
#
# Every setting below is optional; the values shown are the defaults.
# The API token is never read from this file: set HF_TOKEN in the
# environment or in a .env file next to where you run sentiprobe.

# ─────────────────────────────────────────────────────────────────────────────
# API
# ─────────────────────────────────────────────────────────────────────────────

[api]
# The model id is appended to this URL: {inference_base_url}/{model}
inference_base_url = "https://api-inference.huggingface.co/models"

# Identity lookup used to verify the token at startup
whoami_url = "https://huggingface.co/api/whoami"

# Per-request timeout in seconds (1-300)
request_timeout_seconds = 30

# ─────────────────────────────────────────────────────────────────────────────
# COLD-START RETRY
# ─────────────────────────────────────────────────────────────────────────────
#
# A model answering 503 is still loading. It is retried exactly once after
# this pause; any other failure moves straight to the next model.

[retry]
cold_start_delay_seconds = 10

# ─────────────────────────────────────────────────────────────────────────────
# MODELS
# ─────────────────────────────────────────────────────────────────────────────
#
# Tried in order, one at a time. The first model that answers wins.

[models]
candidates = [
    "cardiffnlp/twitter-roberta-base-sentiment-latest",
    "distilbert-base-uncased-finetuned-sst-2-english",
    "nlptown/bert-base-multilingual-uncased-sentiment",
]

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error" (logs go to stderr)
log_level = "info"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Clap's built-in verification for the CLI structure
        Cli::command().debug_assert();
    }

    #[test]
    fn default_config_path_is_optional() {
        let cli = Cli::parse_from(["sentiprobe"]);
        assert_eq!(cli.config_path(), (DEFAULT_CONFIG_PATH, false));
        assert!(cli.command.is_none());
        assert!(cli.text.is_none());
        assert!(!cli.skip_preflight);
    }

    #[test]
    fn custom_config_path_is_required() {
        let cli = Cli::parse_from(["sentiprobe", "--config", "custom.toml"]);
        assert_eq!(cli.config_path(), ("custom.toml", true));
    }

    #[test]
    fn one_shot_text() {
        let cli = Cli::parse_from(["sentiprobe", "--text", "great stuff", "--skip-preflight"]);
        assert_eq!(cli.text.as_deref(), Some("great stuff"));
        assert!(cli.skip_preflight);
    }

    #[test]
    fn token_flag() {
        let cli = Cli::parse_from(["sentiprobe", "--token", "hf_flag"]);
        assert_eq!(cli.token.as_deref(), Some("hf_flag"));
    }

    #[test]
    fn config_subcommand() {
        let cli = Cli::parse_from(["sentiprobe", "config"]);
        assert!(matches!(
            cli.command,
            Some(Command::Config { output: None })
        ));
    }

    #[test]
    fn config_subcommand_with_output() {
        let cli = Cli::parse_from(["sentiprobe", "config", "-o", "my-config.toml"]);
        assert!(matches!(
            cli.command,
            Some(Command::Config { output: Some(ref path) }) if path == "my-config.toml"
        ));
    }

    #[test]
    fn template_is_valid_toml() {
        let template = generate_config_template();
        // Should parse without errors
        let result: Result<toml::Value, _> = toml::from_str(template);
        assert!(
            result.is_ok(),
            "Template should be valid TOML: {:?}",
            result.err()
        );
    }

    #[test]
    fn template_has_all_sections() {
        let template = generate_config_template();
        assert!(template.contains("[api]"));
        assert!(template.contains("[retry]"));
        assert!(template.contains("[models]"));
        assert!(template.contains("[observability]"));
    }
}
