use std::time::Duration;

use thiserror::Error;

/// Binary payload sent inline next to the prompt (label photos).
#[derive(Debug, Clone)]
pub struct InlineAttachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("AI provider did not answer within {0:?}")]
    Timeout(Duration),
    #[error("AI provider unreachable: {0}")]
    Network(String),
    #[error("AI provider rejected credentials ({0}): {1}")]
    Auth(u16, String),
    #[error("AI provider rate limit hit: {0}")]
    RateLimited(String),
    #[error("AI provider error ({0}): {1}")]
    Status(u16, String),
    #[error("AI provider blocked the request: {0}")]
    Blocked(String),
    #[error("AI provider returned an empty completion")]
    EmptyResponse,
    #[error("AI provider returned an unreadable response: {0}")]
    MalformedResponse(String),
}

/// Trait for generative AI backends (Gemini, test doubles, ...)
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the raw completion text. No shape is assumed.
    async fn complete(
        &self,
        prompt: &str,
        attachment: Option<&InlineAttachment>,
    ) -> Result<String, ProviderError>;
}
