//! Gemini backend speaking the generateContent REST API.
//!
//! Image parts ride as `inlineData` entries of base64 payload plus MIME type.
//! The credential travels as a query parameter, which is how this API wants
//! it rather than an Authorization header.

use super::{LmError, PromptPart, Provider, ReasoningClient};
use crate::util::error_snippet;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const GEMINI_URL_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    api_key: String,
    model: String,
    agent: ureq::Agent,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout_secs: u64) -> Self {
        Self {
            api_key,
            model,
            agent: super::http_agent(timeout_secs),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{GEMINI_URL_BASE}/models/{}:generateContent?key={}",
            self.model, self.api_key
        )
    }
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum GeminiPart<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData<'a>,
    },
}

#[derive(Serialize)]
struct GeminiInlineData<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

fn request_body<'a>(parts: &'a [PromptPart]) -> GeminiRequest<'a> {
    let parts = parts
        .iter()
        .map(|part| match part {
            PromptPart::Text(text) => GeminiPart::Text { text },
            PromptPart::Image { mime, base64_data } => GeminiPart::InlineData {
                inline_data: GeminiInlineData {
                    mime_type: mime,
                    data: base64_data,
                },
            },
        })
        .collect();
    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user",
            parts,
        }],
    }
}

fn response_text(parsed: GeminiResponse, status: u16) -> Result<String, LmError> {
    let provider = Provider::Gemini;
    if let Some(error) = parsed.error {
        return Err(LmError::Api {
            provider,
            status,
            detail: error.message,
        });
    }
    let text = parsed
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(LmError::EmptyResponse { provider });
    }
    Ok(text)
}

impl ReasoningClient for GeminiClient {
    fn invoke(&self, parts: &[PromptPart]) -> Result<String, LmError> {
        let provider = Provider::Gemini;
        let body = request_body(parts);
        let url = self.endpoint();

        let start = Instant::now();
        let mut response = self
            .agent
            .post(url.as_str())
            .send_json(body)
            .map_err(|error| LmError::Transport {
                provider,
                detail: error.to_string(),
            })?;
        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|error| LmError::Transport {
                provider,
                detail: error.to_string(),
            })?;
        let elapsed_ms = start.elapsed().as_millis();

        tracing::info!(
            elapsed_ms,
            prompt_bytes = super::text_bytes(parts),
            response_bytes = text.len(),
            status,
            "gemini invoke complete"
        );

        if !(200..300).contains(&status) {
            return Err(LmError::Api {
                provider,
                status,
                detail: error_snippet(&text),
            });
        }

        let parsed: GeminiResponse =
            serde_json::from_str(&text).map_err(|error| LmError::Transport {
                provider,
                detail: format!("decode response JSON: {error}"),
            })?;
        response_text(parsed, status)
    }
}
