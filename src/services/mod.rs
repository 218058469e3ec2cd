pub mod ai_service; // Provider trait + error taxonomy
pub mod extraction;
pub mod gemini; // Google Gemini generateContent client
pub mod prompt;

pub use ai_service::{CompletionProvider, InlineAttachment, ProviderError};
pub use extraction::{extract_analysis, ExtractionError};
pub use gemini::GeminiService;

#[cfg(test)]
pub mod mock;
