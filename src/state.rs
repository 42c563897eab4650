use crate::relay::Relay;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// `api_key` is optional so the mock endpoints keep serving without it; only
/// the relay needs it.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_owned()),
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_owned()),
        }
    }
}

/// Read-only for the life of the process; handlers only ever borrow it.
pub struct AppState {
    pub relay: Relay,
}

impl AppState {
    pub fn new(gemini: GeminiConfig) -> color_eyre::Result<Self> {
        use color_eyre::eyre::WrapErr;
        let relay = Relay::new(gemini).wrap_err("Failed to build the upstream HTTP client")?;
        Ok(Self { relay })
    }
}
