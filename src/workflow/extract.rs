//! Element extraction: structured design attributes from the analysis.
//!
//! The response must be a JSON object. Anything else, from garbled fences to
//! a bare array, substitutes a fixed neutral element set so generation can
//! continue on a degraded path instead of aborting the run.

use super::state::{GenerationState, ImageSlot};
use crate::lm::{strip_code_fences, PromptPart, ReasoningClient};
use crate::placeholder;
use crate::prompts;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};

/// How the element set was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// The response parsed as the expected JSON object.
    Parsed,
    /// The response was unusable; neutral defaults were substituted.
    Fallback,
}

#[derive(Debug, Deserialize)]
struct RawElements {
    #[serde(default = "empty_object")]
    colors: Value,
    #[serde(default = "empty_object")]
    typography: Value,
    #[serde(default = "empty_object")]
    layout: Value,
    #[serde(default)]
    images: Vec<RawSlot>,
}

#[derive(Debug, Deserialize)]
struct RawSlot {
    #[serde(default)]
    location: String,
    #[serde(default = "default_slot_kind", rename = "type")]
    kind: String,
    #[serde(default)]
    purpose: String,
    #[serde(default)]
    size: String,
    #[serde(default)]
    description: String,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

fn default_slot_kind() -> String {
    "general".to_string()
}

/// Ask for the element JSON and populate the state. Returns which path the
/// element set came from.
pub fn run(state: &mut GenerationState, lm: &dyn ReasoningClient) -> Result<Extraction> {
    let prompt = prompts::extraction_prompt(&state.design_analysis, state.provided_count());
    let response = lm
        .invoke(&[PromptPart::Text(prompt)])
        .context("extract design elements")?;

    let json_text = strip_code_fences(&response, "json");
    let outcome = match parse_elements(&json_text) {
        Ok(raw) => {
            state.colors = raw.colors;
            state.typography = raw.typography;
            state.layout = raw.layout;
            state.slots = assign_tokens(raw.images, state.provided_count());
            Extraction::Parsed
        }
        Err(error) => {
            tracing::warn!(%error, "element extraction JSON unusable, using defaults");
            apply_default_elements(state);
            Extraction::Fallback
        }
    };

    match outcome {
        Extraction::Parsed => {
            let entry = format!("design elements extracted ({} image slots)", state.slots.len());
            state.note(entry);
        }
        Extraction::Fallback => {
            state.note("element extraction unusable, continuing with default elements");
        }
    }
    Ok(outcome)
}

/// Parse the element JSON, insisting on a top-level object. serde fills a
/// struct positionally from a JSON array, so an array response must be
/// rejected here to reach the fallback path.
fn parse_elements(json_text: &str) -> serde_json::Result<RawElements> {
    let value: Value = serde_json::from_str(json_text)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("top-level JSON is not an object"));
    }
    serde_json::from_value(value)
}

fn assign_tokens(raw: Vec<RawSlot>, provided_count: usize) -> Vec<ImageSlot> {
    raw.into_iter()
        .enumerate()
        .map(|(index, slot)| ImageSlot {
            location: slot.location,
            kind: slot.kind,
            purpose: slot.purpose,
            size: slot.size,
            description: slot.description,
            token: placeholder::slot_token(index, provided_count),
        })
        .collect()
}

/// Neutral element set used when extraction output is unusable.
fn apply_default_elements(state: &mut GenerationState) {
    state.colors = json!({
        "primary": "#FF6B35",
        "secondary": "#F7F7F7",
        "accent": "#004E89",
        "background": "#FFFFFF",
        "text": "#000000"
    });
    state.typography = json!({
        "heading": { "family": "Arial, sans-serif", "weight": "bold" },
        "body": { "family": "Arial, sans-serif", "weight": "normal" }
    });
    state.layout = json!({ "type": "flex", "columns": 2 });
    state.slots = Vec::new();
}
