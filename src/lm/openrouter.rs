//! OpenRouter backend speaking the OpenAI-compatible chat-completions API.
//!
//! Image parts ride as `image_url` content entries carrying data URIs, which
//! is how the API accepts inline images.

use super::{LmError, PromptPart, Provider, ReasoningClient};
use crate::util::error_snippet;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

pub struct OpenRouterClient {
    api_key: String,
    model: String,
    agent: ureq::Agent,
}

impl OpenRouterClient {
    pub fn new(api_key: String, model: String, timeout_secs: u64) -> Self {
        Self {
            api_key,
            model,
            agent: super::http_agent(timeout_secs),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

fn request_body<'a>(model: &'a str, parts: &'a [PromptPart]) -> ChatRequest<'a> {
    let content = parts
        .iter()
        .map(|part| match part {
            PromptPart::Text(text) => ContentPart::Text { text },
            PromptPart::Image { mime, base64_data } => ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:{mime};base64,{base64_data}"),
                },
            },
        })
        .collect();
    ChatRequest {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content,
        }],
    }
}

fn response_text(parsed: ChatResponse, status: u16) -> Result<String, LmError> {
    let provider = Provider::OpenRouter;
    if let Some(error) = parsed.error {
        return Err(LmError::Api {
            provider,
            status,
            detail: error.message,
        });
    }
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(LmError::EmptyResponse { provider })
}

impl ReasoningClient for OpenRouterClient {
    fn invoke(&self, parts: &[PromptPart]) -> Result<String, LmError> {
        let provider = Provider::OpenRouter;
        let body = request_body(&self.model, parts);

        let start = Instant::now();
        let mut response = self
            .agent
            .post(OPENROUTER_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
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
            "openrouter invoke complete"
        );

        if !(200..300).contains(&status) {
            return Err(LmError::Api {
                provider,
                status,
                detail: error_snippet(&text),
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|error| LmError::Transport {
                provider,
                detail: format!("decode response JSON: {error}"),
            })?;
        response_text(parsed, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_text_and_image_parts() {
        let parts = [
            PromptPart::Text("describe this".to_string()),
            PromptPart::Image {
                mime: "image/png",
                base64_data: "aGVsbG8=".to_string(),
            },
        ];
        let body = request_body("meta-llama/llama-4-maverick:free", &parts);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "meta-llama/llama-4-maverick:free");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"][0]["type"], "text");
        assert_eq!(json["messages"][0]["content"][0]["text"], "describe this");
        assert_eq!(json["messages"][0]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][0]["content"][1]["image_url"]["url"],
            "data:image/png;base64,aGVsbG8="
        );
    }

    #[test]
    fn response_content_is_extracted() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "<html></html>"}}]}"#,
        )
        .unwrap();
        assert_eq!(response_text(parsed, 200).unwrap(), "<html></html>");
    }

    #[test]
    fn error_payload_is_surfaced() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"error": {"message": "quota exhausted", "code": 429}}"#)
                .unwrap();
        let error = response_text(parsed, 200).unwrap_err();
        assert!(error.to_string().contains("quota exhausted"));
    }

    #[test]
    fn empty_choices_is_an_empty_response() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            response_text(parsed, 200),
            Err(LmError::EmptyResponse { .. })
        ));
    }
}
