//! Mutable state threaded through the generation steps.

use crate::images::{ImagePayload, ProvidedImage};
use serde::Serialize;
use serde_json::Value;

/// One image slot detected in the design, with its assigned placeholder token.
///
/// Serialized into the markup prompt so the model can place each `<img>` with
/// the right token.
#[derive(Debug, Clone, Serialize)]
pub struct ImageSlot {
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub purpose: String,
    pub size: String,
    pub description: String,
    pub token: String,
}

/// Everything the steps read and write during one generation run.
///
/// One value exists per run, owned by the controller and mutated in place by
/// each step. `provided_images` is fixed at construction and no step can
/// touch it; the reasoning service only ever learns its count. The progress
/// log is append-only through [`GenerationState::note`].
#[derive(Debug)]
pub struct GenerationState {
    pub template: ImagePayload,
    provided_images: Vec<ProvidedImage>,
    pub design_analysis: String,
    pub colors: Value,
    pub typography: Value,
    pub layout: Value,
    pub slots: Vec<ImageSlot>,
    pub markup: String,
    pub styles: String,
    /// Completed refinement passes. Monotonically non-decreasing.
    pub iteration_count: u32,
    log: Vec<String>,
}

impl GenerationState {
    pub fn new(template: ImagePayload, provided_images: Vec<ProvidedImage>) -> Self {
        Self {
            template,
            provided_images,
            design_analysis: String::new(),
            colors: Value::Null,
            typography: Value::Null,
            layout: Value::Null,
            slots: Vec::new(),
            markup: String::new(),
            styles: String::new(),
            iteration_count: 0,
            log: Vec::new(),
        }
    }

    /// Caller images in upload order. Read-only for the whole run.
    pub fn provided_images(&self) -> &[ProvidedImage] {
        &self.provided_images
    }

    pub fn provided_count(&self) -> usize {
        self.provided_images.len()
    }

    /// Append a progress entry and mirror it to the diagnostic log.
    pub fn note(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        tracing::info!("{entry}");
        self.log.push(entry);
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }
}

/// Fresh state over a synthetic template for tests.
#[cfg(test)]
pub(crate) fn test_state(provided_images: Vec<ProvidedImage>) -> GenerationState {
    GenerationState::new(
        ImagePayload {
            bytes: vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A],
            mime: "image/png",
        },
        provided_images,
    )
}
