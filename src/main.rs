use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod images;
mod lm;
mod output;
mod placeholder;
mod prompts;
mod util;
mod workflow;

use cli::{Command, RootArgs};
use config::GeneratorConfig;
use lm::Provider;

fn main() -> Result<()> {
    let args = RootArgs::parse();

    match args.command {
        Command::Generate(generate) => {
            init_tracing(generate.verbose);
            workflow::run_generate(&generate)
        }
        Command::Check => cmd_check(),
    }
}

/// Route workflow notes and per-call telemetry to stderr. `RUST_LOG` wins
/// when set; otherwise `--verbose` controls how much of the run is narrated.
fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "pagesmith=info"
    } else {
        "pagesmith=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_check() -> Result<()> {
    let config = GeneratorConfig::from_env()?;

    for provider in [Provider::OpenRouter, Provider::Gemini] {
        let key_state = if config.api_key_for(provider).is_some() {
            "set"
        } else {
            "not set"
        };
        println!(
            "{provider}: {} {key_state}, model {}",
            provider.key_var(),
            config.model_for(provider)
        );
    }
    println!("default provider: {}", config.default_provider());
    println!("max refine passes: {}", config.max_refine_passes);
    Ok(())
}
