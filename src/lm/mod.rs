//! Reasoning-service clients for the generation workflow.
//!
//! Steps talk to one synchronous [`ReasoningClient`]; the backends wrap the
//! OpenRouter chat-completions API and the Gemini generateContent API over
//! blocking HTTP. A prompt is an ordered part sequence so a step can attach
//! the template image without caring which wire format the backend speaks.
//!
//! Caller-provided images never travel through here. Only the template image
//! is ever sent; slot tokens keep everything else out of prompts.

mod gemini;
mod openrouter;

pub use gemini::GeminiClient;
pub use openrouter::OpenRouterClient;

use crate::config::{GeneratorConfig, GEMINI_KEY_VAR, OPENROUTER_KEY_VAR};
use std::fmt;
use std::time::Duration;

/// One segment of a prompt, in send order.
#[derive(Debug, Clone)]
pub enum PromptPart {
    Text(String),
    Image {
        mime: &'static str,
        base64_data: String,
    },
}

/// Backends able to serve the generation steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Provider {
    #[value(name = "openrouter")]
    OpenRouter,
    Gemini,
}

impl Provider {
    /// Environment variable holding the backend credential.
    pub fn key_var(self) -> &'static str {
        match self {
            Provider::OpenRouter => OPENROUTER_KEY_VAR,
            Provider::Gemini => GEMINI_KEY_VAR,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenRouter => f.write_str("openrouter"),
            Provider::Gemini => f.write_str("gemini"),
        }
    }
}

/// Failure modes for a reasoning-service call. Any of them aborts the run.
#[derive(Debug)]
pub enum LmError {
    /// No credential for the chosen backend.
    MissingKey {
        provider: Provider,
        env_var: &'static str,
    },
    /// The HTTP exchange itself failed, or the response body was unreadable.
    Transport { provider: Provider, detail: String },
    /// The service answered with an error status or error payload.
    Api {
        provider: Provider,
        status: u16,
        detail: String,
    },
    /// The service answered but carried no usable text.
    EmptyResponse { provider: Provider },
}

impl fmt::Display for LmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LmError::MissingKey { provider, env_var } => write!(
                f,
                "{provider} credential is not set; export {env_var} or pick another backend with --provider"
            ),
            LmError::Transport { provider, detail } => {
                write!(f, "{provider} request failed: {detail}")
            }
            LmError::Api {
                provider,
                status,
                detail,
            } => write!(f, "{provider} returned HTTP {status}: {detail}"),
            LmError::EmptyResponse { provider } => write!(f, "{provider} returned no content"),
        }
    }
}

impl std::error::Error for LmError {}

/// A synchronous text-generation backend.
pub trait ReasoningClient {
    /// Send ordered prompt parts and return the response text.
    fn invoke(&self, parts: &[PromptPart]) -> Result<String, LmError>;
}

/// Build the client for a backend, failing early when its key is absent.
pub fn client_for(
    provider: Provider,
    config: &GeneratorConfig,
) -> Result<Box<dyn ReasoningClient>, LmError> {
    let api_key = config
        .api_key_for(provider)
        .ok_or_else(|| LmError::MissingKey {
            provider,
            env_var: provider.key_var(),
        })?
        .to_string();
    let model = config.model_for(provider).to_string();
    let client: Box<dyn ReasoningClient> = match provider {
        Provider::OpenRouter => Box::new(OpenRouterClient::new(
            api_key,
            model,
            config.request_timeout_secs,
        )),
        Provider::Gemini => Box::new(GeminiClient::new(
            api_key,
            model,
            config.request_timeout_secs,
        )),
    };
    Ok(client)
}

/// Strip a Markdown code fence (tagged with `lang` or untagged) from a
/// response, returning the inner text. Unfenced text passes through trimmed.
pub fn strip_code_fences(text: &str, lang: &str) -> String {
    let text = text.trim();

    let tagged = format!("```{lang}");
    if let Some(start) = text.find(&tagged) {
        let start = start + tagged.len();
        if let Some(end) = text[start..].find("```") {
            return text[start..start + end].trim().to_string();
        }
    }

    if let Some(start) = text.find("```") {
        let start = start + 3;
        // Skip a language identifier if present
        let start = text[start..]
            .find('\n')
            .map(|i| start + i + 1)
            .unwrap_or(start);
        if let Some(end) = text[start..].find("```") {
            return text[start..start + end].trim().to_string();
        }
    }

    text.to_string()
}

pub(crate) fn http_agent(timeout_secs: u64) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(timeout_secs)))
        .http_status_as_error(false)
        .build();
    ureq::Agent::new_with_config(config)
}

/// Prompt text volume for invocation logs. Image parts count separately.
pub(crate) fn text_bytes(parts: &[PromptPart]) -> usize {
    parts
        .iter()
        .map(|part| match part {
            PromptPart::Text(text) => text.len(),
            PromptPart::Image { .. } => 0,
        })
        .sum()
}
