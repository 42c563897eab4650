use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct TextInput {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextMetrics {
    pub accuracy: f64,
    pub reliability: f64,
    pub response_time: f64,
    pub fact_check_confidence: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextReport {
    pub model: String,
    pub hallucination_score: f64,
    pub metrics: TextMetrics,
    pub analysis: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManipulatedRegion {
    #[serde(rename = "type")]
    pub kind: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageReport {
    pub filename: String,
    pub authentic: bool,
    pub confidence_score: f64,
    pub analysis: String,
    pub manipulated_regions: Vec<ManipulatedRegion>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManipulatedSegment {
    #[serde(rename = "type")]
    pub kind: String,
    pub start_time: f64,
    pub end_time: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideoReport {
    pub filename: String,
    pub authentic: bool,
    pub confidence_score: f64,
    pub analysis: String,
    pub manipulated_segments: Vec<ManipulatedSegment>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConversationTurn {
    pub text: String,
    pub sender: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayRequest {
    pub message: String,
    pub conversation_history: Vec<ConversationTurn>,
}

/// What `/misbot` sends back: `{"result": ...}` on success, `{"error": ...}`
/// otherwise. Both are delivered with a 200 status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayOutcome {
    Result(String),
    Error(String),
}
