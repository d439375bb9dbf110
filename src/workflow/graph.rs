//! Step graph for the generation workflow.
//!
//! Seven steps with one data-dependent edge: after a refinement pass the
//! workflow either loops back to markup generation or proceeds to
//! finalization, depending on how many passes the caller budgeted.

use super::state::GenerationState;
use super::{analyze, extract, finalize, markup, merge, refine, styles};
use crate::lm::ReasoningClient;
use anyhow::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Analyze,
    Extract,
    GenerateMarkup,
    GenerateStyles,
    Merge,
    Refine,
    Finalize,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Analyze => "analyze",
            Step::Extract => "extract",
            Step::GenerateMarkup => "generate-markup",
            Step::GenerateStyles => "generate-styles",
            Step::Merge => "merge",
            Step::Refine => "refine",
            Step::Finalize => "finalize",
        };
        f.write_str(name)
    }
}

/// Successor of `current`. Only the Refine edge consults the state: the
/// workflow loops back for another markup round while passes remain.
pub fn next_step(current: Step, state: &GenerationState, max_passes: u32) -> Option<Step> {
    match current {
        Step::Analyze => Some(Step::Extract),
        Step::Extract => Some(Step::GenerateMarkup),
        Step::GenerateMarkup => Some(Step::GenerateStyles),
        Step::GenerateStyles => Some(Step::Merge),
        Step::Merge => Some(Step::Refine),
        Step::Refine => {
            if state.iteration_count < max_passes {
                Some(Step::GenerateMarkup)
            } else {
                Some(Step::Finalize)
            }
        }
        Step::Finalize => None,
    }
}

/// Drive the workflow from analysis to completion.
pub fn run_steps(
    state: &mut GenerationState,
    lm: &dyn ReasoningClient,
    max_passes: u32,
) -> Result<()> {
    let mut current = Some(Step::Analyze);
    while let Some(step) = current {
        tracing::debug!(step = %step, "run step");
        match step {
            Step::Analyze => analyze::run(state, lm)?,
            Step::Extract => {
                extract::run(state, lm)?;
            }
            Step::GenerateMarkup => markup::run(state, lm)?,
            Step::GenerateStyles => styles::run(state, lm)?,
            Step::Merge => merge::run(state)?,
            Step::Refine => refine::run(state, lm)?,
            Step::Finalize => finalize::run(state)?,
        }
        current = next_step(step, state, max_passes);
    }
    Ok(())
}
