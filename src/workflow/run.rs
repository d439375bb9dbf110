//! Entry point for the `pagesmith generate` command.
//!
//! Wires CLI arguments, environment configuration, and image loading into a
//! single workflow run, then writes and prints the result in the requested
//! format.

use crate::cli::{GenerateArgs, OutputFormat};
use crate::config::GeneratorConfig;
use crate::images::{self, ImagePayload, ProvidedImage};
use crate::lm::{client_for, Provider};
use crate::output;
use crate::workflow::graph::run_steps;
use crate::workflow::state::GenerationState;
use anyhow::Result;
use serde::Serialize;

/// Everything a caller needs from a finished run.
#[derive(Debug, Serialize)]
pub struct RunOutcome {
    pub log: Vec<String>,
    pub markup: String,
    pub design_analysis: String,
}

/// Run the full workflow against the chosen backend.
pub fn run_generation(
    template: ImagePayload,
    provided: Vec<ProvidedImage>,
    provider: Provider,
    config: &GeneratorConfig,
) -> Result<RunOutcome> {
    let lm = client_for(provider, config)?;
    let mut state = GenerationState::new(template, provided);
    let opening = format!(
        "starting generation via {provider} ({} provided images)",
        state.provided_count()
    );
    state.note(opening);

    run_steps(&mut state, lm.as_ref(), config.max_refine_passes)?;

    Ok(RunOutcome {
        log: state.log().to_vec(),
        markup: state.markup,
        design_analysis: state.design_analysis,
    })
}

/// Run the generate workflow from parsed CLI arguments.
pub fn run_generate(args: &GenerateArgs) -> Result<()> {
    let mut config = GeneratorConfig::from_env()?;
    if let Some(passes) = args.max_passes {
        config.max_refine_passes = passes;
    }
    config.validate()?;

    let template = images::load_image(&args.template)?;
    let provided = images::load_provided_images(&args.images)?;
    let provider = args.provider.unwrap_or_else(|| config.default_provider());

    if args.verbose {
        eprintln!(
            "generate: provider {} model {} ({} provided images)",
            provider,
            config.model_for(provider),
            provided.len()
        );
    }

    let outcome = run_generation(template, provided, provider, &config)?;
    let path = output::save_document(args.out.as_deref(), &outcome.markup)?;

    if args.verbose {
        eprintln!("generate: finished ({} log entries)", outcome.log.len());
    }

    match args.output {
        OutputFormat::Html => println!("{}", outcome.markup),
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(&outcome)?;
            println!("{text}");
        }
        OutputFormat::Path => println!("{}", path.display()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_with_log_and_markup() {
        let outcome = RunOutcome {
            log: vec!["starting generation via gemini (0 provided images)".to_string()],
            markup: "<html></html>".to_string(),
            design_analysis: "two column layout".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["markup"], "<html></html>");
        assert_eq!(json["design_analysis"], "two column layout");
        assert!(json["log"][0]
            .as_str()
            .unwrap()
            .starts_with("starting generation"));
    }
}
