use std::sync::Mutex;
use std::time::Duration;

use super::ai_service::{CompletionProvider, InlineAttachment, ProviderError};

/// What the scripted provider does on every call.
pub enum Script {
    Reply(String),
    Fail(fn() -> ProviderError),
    Hang(Duration),
}

/// A test provider that replays a fixed behaviour and records what it was asked.
pub struct ScriptedProvider {
    script: Script,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(Script::Reply(text.into()))
    }

    pub fn failing(make_error: fn() -> ProviderError) -> Self {
        Self::new(Script::Fail(make_error))
    }

    pub fn hanging(delay: Duration) -> Self {
        Self::new(Script::Hang(delay))
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// (prompt, attachment mime type) per call.
    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        prompt: &str,
        attachment: Option<&InlineAttachment>,
    ) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), attachment.map(|a| a.mime_type.clone())));

        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail(make_error) => Err(make_error()),
            Script::Hang(delay) => {
                tokio::time::sleep(*delay).await;
                Ok("{}".to_string())
            }
        }
    }
}
