use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::models::{AnalysisRequest, AnalysisResult, Verdict};
use crate::services::prompt;
use crate::services::{extract_analysis, CompletionProvider, ExtractionError, InlineAttachment, ProviderError};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

impl AnalysisError {
    pub fn category(&self) -> &'static str {
        match self {
            AnalysisError::Provider(ProviderError::Timeout(_)) => "AI provider timeout",
            AnalysisError::Provider(_) => "AI provider error",
            AnalysisError::Extraction(error) => match error {
                ExtractionError::NoJsonObject { .. } => "No JSON in AI response",
                ExtractionError::Parse { .. } => "Invalid JSON from AI",
                ExtractionError::Schema { .. } => "AI response failed validation",
            },
        }
    }

    /// The completion text that failed extraction. Provider failures have none.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            AnalysisError::Provider(_) => None,
            AnalysisError::Extraction(error) => Some(error.raw()),
        }
    }

    /// Renderable stand-in result. Yellow: the analysis did not complete, so neither a
    /// positive nor a negative signal is given.
    pub fn fallback(&self) -> AnalysisResult {
        AnalysisResult {
            product_name: "Unknown".to_string(),
            inferred_intent: "Analysis failed".to_string(),
            verdict: Verdict::Yellow,
            reasoning: self.to_string(),
            key_insights: vec![
                self.category().to_string(),
                "Check server logs".to_string(),
                "Retry analysis".to_string(),
            ],
        }
    }
}

/// Runs one request through prompt → provider → extraction. Holds no per-request state.
pub struct AnalysisHandler {
    provider: Arc<dyn CompletionProvider>,
    timeout: Duration,
}

impl AnalysisHandler {
    pub fn new(provider: Arc<dyn CompletionProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let kind = request.kind();

        let (prompt, attachment) = match request {
            AnalysisRequest::Image { bytes, mime_type } => (
                prompt::image_prompt(),
                Some(InlineAttachment {
                    mime_type,
                    data: bytes,
                }),
            ),
            AnalysisRequest::Text { text } => (prompt::text_prompt(&text), None),
        };

        log::info!(
            "🧠 Running {} analysis via {} (timeout {:?})",
            kind,
            self.provider.name(),
            self.timeout
        );

        let completion = tokio::time::timeout(
            self.timeout,
            self.provider.complete(&prompt, attachment.as_ref()),
        )
        .await
        .map_err(|_| ProviderError::Timeout(self.timeout))??;

        log::debug!("🧠 Raw completion:\n{}", completion);

        let result = extract_analysis(&completion)?;

        log::info!("✅ {} analysis: '{}' → {}", kind, result.product_name, result.verdict);
        Ok(result)
    }
}
