//! CLI argument parsing for the generation workflow.
//!
//! The CLI is intentionally thin: it parses arguments and routes to the
//! workflow, so the generation logic stays reusable and testable on its own.
use crate::lm::Provider;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Root CLI entrypoint for the generation workflow.
///
/// Keeping a single `RootArgs` type makes command routing obvious and avoids
/// hidden defaults in subcommand constructors.
#[derive(Parser, Debug)]
#[command(
    name = "pagesmith",
    version,
    about = "Generate a self-contained HTML/CSS page from a design template image",
    after_help = "Commands:\n  generate --template <IMG>  Generate a styled HTML document from a template image\n  check                      Report backend credentials and model selection\n\nExamples:\n  pagesmith generate --template mockup.png\n  pagesmith generate --template mockup.png --image logo.png --image team.jpg\n  pagesmith generate --template mockup.png --provider openrouter --output html\n  pagesmith generate --template mockup.png --max-passes 2 --out site/index.html\n  pagesmith check",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level workflow commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Generate(GenerateArgs),
    /// Report backend credentials and model selection
    Check,
}

/// What `generate` prints on stdout once the document is written.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// The generated HTML document
    Html,
    /// The run outcome (log, markup, design analysis) as JSON
    Json,
    /// The path the document was written to
    Path,
}

/// Generate command inputs for a single template image.
#[derive(Parser, Debug)]
#[command(about = "Generate a styled HTML document from a template image")]
pub struct GenerateArgs {
    /// Design template image to reproduce (PNG, JPEG, GIF, or WebP)
    #[arg(long, value_name = "IMG")]
    pub template: PathBuf,

    /// Image to place into the page; repeatable, consumed in slot order
    #[arg(long = "image", value_name = "IMG")]
    pub images: Vec<PathBuf>,

    /// Backend to call (defaults to gemini when GEMINI_API_KEY is set)
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,

    /// Write the document here instead of the default data directory
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Refinement passes to run before finalizing (overrides PAGESMITH_MAX_PASSES)
    #[arg(long, value_name = "N")]
    pub max_passes: Option<u32>,

    /// What to print on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Path)]
    pub output: OutputFormat,

    /// Emit a verbose transcript of the workflow
    #[arg(long)]
    pub verbose: bool,
}
