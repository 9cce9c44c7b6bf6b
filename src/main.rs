//! llmcall CLI
//!
//! Single-shot command-line front end: resolves the provider registry,
//! issues one provider call, and prints the normalized result as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use llmcall::config::defaults;
use llmcall::utils::render::{render_error, render_output};
use llmcall::{AppError, LlmClient, ProduceRequest, ProviderRegistry};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::info;

/// llmcall - one request shape over many LLM provider APIs
#[derive(Parser, Debug)]
#[command(name = "llmcall")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// LLM provider name (as registered in the config file)
    #[arg(short = 'p', long = "provider")]
    provider: Option<String>,

    /// Model name passed through to the provider
    #[arg(short = 'm', long = "model")]
    model: Option<String>,

    /// Prompt for the LLM (may also be piped via stdin)
    prompt: Option<String>,

    /// Show token usage statistics
    #[arg(short = 'u', long = "show-usage")]
    show_usage: bool,

    /// Include the full provider response in the output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Path to the provider configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

/// Available commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Install the default provider configuration
    Setup,
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Some(Commands::Setup) = cli.command {
        match run_setup() {
            Ok(()) => return,
            Err(e) => fail("configuration_error", &format!("{:#}", e)),
        }
    }

    match run(cli).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        }
        Err(e) => fail(e.error_type(), &e.to_string()),
    }
}

/// Run one produce invocation and return the rendered output
async fn run(cli: Cli) -> Result<serde_json::Value, AppError> {
    // Credentials may live in a .env file next to the invocation
    dotenv::dotenv().ok();

    let registry = match &cli.config {
        Some(path) => ProviderRegistry::load(path),
        None => ProviderRegistry::load_default(),
    }?;

    let provider = cli
        .provider
        .as_deref()
        .map(str::to_lowercase)
        .ok_or_else(|| config_error("No provider given. Use -p/--provider."))?;
    let model = cli
        .model
        .clone()
        .ok_or_else(|| config_error("No model given. Use -m/--model."))?;
    let prompt = read_prompt(cli.prompt.as_deref())?;

    let client = LlmClient::new(registry)?;
    let request = ProduceRequest::new(provider, model, prompt);
    let result = client.produce(&request, cli.verbose).await?;

    Ok(render_output(&result, cli.show_usage, cli.verbose))
}

/// Resolve the prompt from piped stdin or the positional argument
fn read_prompt(arg: Option<&str>) -> Result<String, AppError> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        let mut piped = String::new();
        stdin
            .lock()
            .read_to_string(&mut piped)
            .context("Failed to read prompt from stdin")?;
        let piped = piped.trim().to_string();
        if !piped.is_empty() {
            return Ok(piped);
        }
    }

    match arg {
        Some(prompt) => Ok(prompt.to_string()),
        None => Err(config_error(
            "No prompt provided. Pass it as an argument or pipe it in.",
        )),
    }
}

/// Install the default configuration
fn run_setup() -> Result<()> {
    let (path, written) = defaults::install_default_config()?;
    if written {
        println!("Installed default config: {}", path.display());
    } else {
        println!("Config file already exists: {}", path.display());
    }
    Ok(())
}

fn config_error(message: &str) -> AppError {
    AppError::Config(anyhow::anyhow!(message.to_string()))
}

/// Print an error envelope and exit non-zero
fn fail(error_type: &str, message: &str) -> ! {
    let envelope = render_error(error_type, message);
    println!("{}", serde_json::to_string_pretty(&envelope).unwrap_or_default());
    std::process::exit(1);
}

/// Initialize logging system
///
/// Logs go to stderr so stdout carries nothing but the JSON output.
fn init_logging() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if log_format == "json" {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .with_writer(std::io::stderr)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Logging system initialized");
}
