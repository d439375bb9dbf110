//! Workflow orchestration for the template-to-document pipeline.
//!
//! Each step lives in its own module and works only against the shared
//! [`state::GenerationState`], so the step graph stays predictable and every
//! step can be driven in isolation from tests.
mod analyze;
mod extract;
mod finalize;
pub(crate) mod graph;
mod markup;
mod merge;
mod refine;
mod run;
pub(crate) mod state;
mod styles;

pub use graph::{next_step, run_steps, Step};
pub(crate) use run::run_generate;
pub use run::{run_generation, RunOutcome};
pub use state::{GenerationState, ImageSlot};
