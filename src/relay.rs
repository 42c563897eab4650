//! Forwards a conversation to the Gemini `generateContent` API and pulls the
//! reply text back out.
//!
//! The relay never fails past its own boundary: [`Relay::ask`] always yields a
//! [`RelayOutcome`], and the route serves it with a 200 status either way.

use {
    crate::{
        models::{ConversationTurn, RelayOutcome, RelayRequest},
        state::GeminiConfig,
    },
    serde::Serialize,
    serde_json::Value,
    thiserror::Error,
};

pub const FALLBACK_REPLY: &str = "No response from Gemini.";

const INSTRUCTION_PREFIX: &str = "Check the accuracy and authenticity of this statement:\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn for_sender(sender: &str) -> Self {
        if sender == "user" {
            Role::User
        } else {
            Role::Model
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

/// History turns in order, followed by the incoming message wrapped in the
/// fact-checking instruction.
pub fn build_contents(message: &str, history: &[ConversationTurn]) -> Vec<Content> {
    history
        .iter()
        .map(|turn| Content::text(Role::for_sender(&turn.sender), turn.text.as_str()))
        .chain(std::iter::once(Content::text(
            Role::User,
            format!("{INSTRUCTION_PREFIX}{message}"),
        )))
        .collect()
}

/// The first level of `candidates[0].content.parts[0].text` that was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingLevel {
    Candidates,
    Content,
    Parts,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(String),
    Missing(MissingLevel),
}

impl Extraction {
    pub fn into_reply(self) -> String {
        match self {
            Extraction::Found(text) => text,
            Extraction::Missing(_) => FALLBACK_REPLY.to_owned(),
        }
    }
}

pub fn extract_reply(body: &Value) -> Extraction {
    let Some(candidate) = body.get("candidates").and_then(|c| c.get(0)) else {
        return Extraction::Missing(MissingLevel::Candidates);
    };
    let Some(content) = candidate.get("content") else {
        return Extraction::Missing(MissingLevel::Content);
    };
    let Some(part) = content.get("parts").and_then(|p| p.get(0)) else {
        return Extraction::Missing(MissingLevel::Parts);
    };
    match part.get("text").and_then(Value::as_str) {
        Some(text) => Extraction::Found(text.to_owned()),
        None => Extraction::Missing(MissingLevel::Text),
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,

    #[error("Upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Upstream response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct Relay {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl Relay {
    pub fn new(config: GeminiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_base.trim_end_matches('/'),
            self.config.model,
            api_key,
        )
    }

    pub async fn ask(&self, request: &RelayRequest) -> RelayOutcome {
        match self.try_ask(request).await {
            Ok(reply) => RelayOutcome::Result(reply),
            Err(e) => {
                let category = match &e {
                    RelayError::MissingCredential => "config",
                    RelayError::Transport(_) => "transport",
                    RelayError::Decode(_) => "decode",
                };
                tracing::warn!(error = %e, category, "relay request failed");
                RelayOutcome::Error(e.to_string())
            }
        }
    }

    async fn try_ask(&self, request: &RelayRequest) -> Result<String, RelayError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(RelayError::MissingCredential)?;

        let payload = GenerateContentRequest {
            contents: build_contents(&request.message, &request.conversation_history),
        };

        tracing::debug!(
            model = %self.config.model,
            turns = payload.contents.len(),
            "sending conversation upstream"
        );

        // The URL carries the credential, so it is stripped from any error.
        let response = self
            .client
            .post(self.endpoint(api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Transport(e.without_url()))?;

        if !status.is_success() {
            tracing::warn!(%status, "upstream answered with a non-success status");
        }

        let value: Value = serde_json::from_str(&body)?;
        let extraction = extract_reply(&value);
        if let Extraction::Missing(level) = &extraction {
            tracing::debug!(?level, "upstream reply had no text, using fallback");
        }
        Ok(extraction.into_reply())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        mockito::Matcher,
        serde_json::json,
    };

    fn turn(text: &str, sender: &str) -> ConversationTurn {
        ConversationTurn {
            text: text.to_owned(),
            sender: sender.to_owned(),
        }
    }

    fn relay_for(api_base: &str) -> Relay {
        Relay::new(GeminiConfig {
            api_key: Some("test-key".to_owned()),
            api_base: api_base.to_owned(),
            model: "test-model".to_owned(),
        })
        .unwrap()
    }

    fn request(message: &str, history: Vec<ConversationTurn>) -> RelayRequest {
        RelayRequest {
            message: message.to_owned(),
            conversation_history: history,
        }
    }

    #[test]
    fn maps_senders_to_roles() {
        let contents = build_contents("is water wet?", &[turn("hi", "user"), turn("hello", "bot")]);
        let roles: Vec<Role> = contents.iter().map(|c| c.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Model, Role::User]);
        assert_eq!(contents[0].parts, vec![Part { text: "hi".into() }]);
        assert_eq!(contents[1].parts, vec![Part { text: "hello".into() }]);
    }

    #[test]
    fn sender_matching_is_exact() {
        assert_eq!(Role::for_sender("user"), Role::User);
        assert_eq!(Role::for_sender("User"), Role::Model);
        assert_eq!(Role::for_sender(""), Role::Model);
    }

    #[test]
    fn wraps_message_in_instruction() {
        let contents = build_contents("the moon is cheese", &[]);
        assert_eq!(contents.len(), 1);
        assert_eq!(
            contents[0].parts[0].text,
            "Check the accuracy and authenticity of this statement:\n\nthe moon is cheese"
        );
    }

    #[test]
    fn payload_serializes_as_contents() {
        let payload = GenerateContentRequest {
            contents: build_contents("x", &[turn("a", "bot")]),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["contents"][0]["role"], "model");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "a");
        assert_eq!(value["contents"][1]["role"], "user");
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "other" }] } }
            ]
        });
        assert_eq!(extract_reply(&body), Extraction::Found("first".into()));
    }

    #[test]
    fn reports_first_missing_level() {
        let cases = [
            (json!({}), MissingLevel::Candidates),
            (json!({ "candidates": [] }), MissingLevel::Candidates),
            (json!([1, 2]), MissingLevel::Candidates),
            (json!({ "candidates": [{}] }), MissingLevel::Content),
            (json!({ "candidates": [{ "content": {} }] }), MissingLevel::Parts),
            (json!({ "candidates": [{ "content": { "parts": [] } }] }), MissingLevel::Parts),
            (json!({ "candidates": [{ "content": { "parts": [{}] } }] }), MissingLevel::Text),
            (
                json!({ "candidates": [{ "content": { "parts": [{ "text": 5 }] } }] }),
                MissingLevel::Text,
            ),
        ];
        for (body, level) in cases {
            assert_eq!(extract_reply(&body), Extraction::Missing(level), "body: {body}");
        }
    }

    #[test]
    fn missing_reply_falls_back() {
        let reply = extract_reply(&json!({ "error": { "code": 400 } })).into_reply();
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn relays_reply_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/test-model:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "hi" }] },
                    { "role": "model", "parts": [{ "text": "hello" }] },
                    { "role": "user" }
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({ "candidates": [{ "content": { "parts": [{ "text": "Mostly accurate." }] } }] })
                    .to_string(),
            )
            .create_async()
            .await;

        let relay = relay_for(&server.url());
        let outcome = relay
            .ask(&request("claim", vec![turn("hi", "user"), turn("hello", "bot")]))
            .await;

        mock.assert_async().await;
        assert_eq!(outcome, RelayOutcome::Result("Mostly accurate.".into()));
    }

    #[tokio::test]
    async fn error_status_with_json_body_uses_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(400)
            .with_body(json!({ "error": { "message": "API key not valid" } }).to_string())
            .create_async()
            .await;

        let outcome = relay_for(&server.url()).ask(&request("claim", vec![])).await;
        assert_eq!(outcome, RelayOutcome::Result(FALLBACK_REPLY.into()));
    }

    #[tokio::test]
    async fn non_json_body_becomes_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(502)
            .with_body("<html>bad gateway</html>")
            .create_async()
            .await;

        let outcome = relay_for(&server.url()).ask(&request("claim", vec![])).await;
        match outcome {
            RelayOutcome::Error(message) => assert!(message.contains("not valid JSON")),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_failure_becomes_error_without_leaking_key() {
        let outcome = relay_for("http://127.0.0.1:1").ask(&request("claim", vec![])).await;
        match outcome {
            RelayOutcome::Error(message) => {
                assert!(message.starts_with("Upstream request failed"));
                assert!(!message.contains("test-key"));
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_credential_is_error_without_calling_upstream() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let relay = Relay::new(GeminiConfig {
            api_key: None,
            api_base: server.url(),
            model: "test-model".to_owned(),
        })
        .unwrap();
        let outcome = relay.ask(&request("claim", vec![])).await;

        mock.assert_async().await;
        assert_eq!(
            outcome,
            RelayOutcome::Error("GEMINI_API_KEY is not configured".into())
        );
    }
}
