use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};

use super::ai_service::{CompletionProvider, InlineAttachment, ProviderError};
use super::prompt::PROMPT_VERSION;

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

// Non-text parts (function calls etc.) deserialize with `text: None` and are skipped.
#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

pub struct GeminiService {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(prompt: &str, attachment: Option<&InlineAttachment>) -> GenerateContentRequest {
        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];

        if let Some(attachment) = attachment {
            let encoded = general_purpose::STANDARD.encode(&attachment.data);
            log::debug!(
                "🔄 Inline {} attachment: {} bytes, {} base64 bytes",
                attachment.mime_type,
                attachment.data.len(),
                encoded.len()
            );
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: attachment.mime_type.clone(),
                    data: encoded,
                },
            });
        }

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
        }
    }

    fn completion_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            return match response.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => Err(ProviderError::Blocked(reason)),
                None => Err(ProviderError::EmptyResponse),
            };
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(text)
    }
}

#[async_trait::async_trait]
impl CompletionProvider for GeminiService {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(
        &self,
        prompt: &str,
        attachment: Option<&InlineAttachment>,
    ) -> Result<String, ProviderError> {
        let request = Self::build_request(prompt, attachment);

        log::info!(
            "🤖 Sending request to Gemini with model: {} (prompt v{})",
            self.model,
            PROMPT_VERSION
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        log::debug!("📥 Gemini response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Gemini API error ({}): {}", status, error_text);
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::Auth(status.as_u16(), error_text),
                429 => ProviderError::RateLimited(error_text),
                code => ProviderError::Status(code, error_text),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        log::debug!("📄 Raw Gemini response size: {} bytes", response_text.len());

        let parsed: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        Self::completion_text(parsed)
    }
}
