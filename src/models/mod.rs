use serde::Serialize;

/// What the client asked us to look at. Exactly one variant per request.
#[derive(Debug, Clone)]
pub enum AnalysisRequest {
    Image { bytes: Vec<u8>, mime_type: String },
    Text { text: String },
}

impl AnalysisRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisRequest::Image { .. } => "image",
            AnalysisRequest::Text { .. } => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Green,
    Yellow,
    Red,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::Green => "Green",
            Verdict::Yellow => "Yellow",
            Verdict::Red => "Red",
        };
        write!(f, "{}", s)
    }
}

impl Verdict {
    /// Case-sensitive: "green" or "RED" are rejected.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Green" => Some(Verdict::Green),
            "Yellow" => Some(Verdict::Yellow),
            "Red" => Some(Verdict::Red),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub product_name: String,
    pub inferred_intent: String,
    pub verdict: Verdict,
    pub reasoning: String,
    pub key_insights: Vec<String>,
}

/// Body of a 500 response: the fallback result, optionally with the provider text that broke it.
#[derive(Debug, Clone, Serialize)]
pub struct FallbackResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
