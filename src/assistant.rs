//! AI health assistant — Gemini `generateContent` wrapper and chat session.
//!
//! The session owns the conversation transcript and the HTTP client; there
//! is no module-level handle. Requests are not retried and carry no
//! timeout — at most one is in flight because the session sits behind a
//! mutex in application state. Request failures are not fatal: the error
//! text becomes a system message in the transcript, shown inline in the
//! conversation.

use serde::{Deserialize, Serialize};

use crate::models::{ChatMessage, ChatRole};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Standing instruction defining the assistant's persona and guardrails.
pub const SYSTEM_INSTRUCTION: &str = "You are MediBuddy, a friendly and empathetic AI virtual health assistant. \
Your purpose is to provide general health information, answer health-related queries, and offer support. \
You are NOT a doctor and CANNOT give medical advice, diagnoses, or prescriptions. \
ALWAYS remind the user to consult a healthcare professional for any medical concerns or before making any health decisions. \
Keep responses concise, clear, and easy to understand. \
If a question is outside your scope, politely decline and suggest consulting a professional or a trusted medical source. \
If the user seems in distress or mentions a serious emergency, strongly advise them to contact emergency services or a doctor immediately. \
Do not ask for Personally Identifiable Information (PII) or Protected Health Information (PHI). \
Be cautious with drug information; provide general info but always state that this is not a substitute for advice from their doctor or pharmacist. \
Do not provide information that could be harmful.";

/// Extra instruction for one-shot health information queries.
const INFO_INSTRUCTION_SUFFIX: &str = " The user is asking for general health information or has a question. \
Provide a helpful, informative, and safe response.";

/// Greeting opening every fresh session.
pub const GREETING: &str = "Hello! I'm MediBuddy, your virtual health assistant. \
How can I help you today? Remember, I'm here for general information and support, not medical advice. \
For medical concerns, please consult a doctor.";

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("Assistant request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Assistant returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Assistant response contained no text")]
    EmptyResponse,
}

// ── Wire types (Gemini REST) ───────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: ContentBlock,
    contents: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContentBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

impl ContentBlock {
    fn instruction(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }

    fn turn(role: &str, text: &str) -> Self {
        Self {
            role: Some(role.into()),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentBlock>,
}

// ── Client ─────────────────────────────────────────────────

/// Thin client for the hosted Gemini chat API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from `GEMINI_API_KEY` / `GEMINI_MODEL` /
    /// `GEMINI_BASE_URL`. Returns `None` when no key is configured —
    /// chat features stay disabled for the whole process lifetime.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Some(Self::new(api_key, model, base_url))
    }

    async fn generate(
        &self,
        instruction: &str,
        contents: Vec<ContentBlock>,
    ) -> Result<String, AssistantError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = GenerateContentRequest {
            system_instruction: ContentBlock::instruction(instruction),
            contents,
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.candidates
            .into_iter()
            .flatten()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .find(|t| !t.is_empty())
            .ok_or(AssistantError::EmptyResponse)
    }
}

// ── Session ────────────────────────────────────────────────

/// How a user submission is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Conversational: full user/model history is sent.
    #[default]
    Chat,
    /// One-shot health information lookup: only the query is sent.
    Info,
}

/// A chat session owning its transcript.
pub struct ChatSession {
    client: GeminiClient,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            messages: vec![ChatMessage::new(ChatRole::Model, GREETING)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Drop the transcript and start over with a fresh greeting.
    pub fn reset(&mut self) {
        self.messages = vec![ChatMessage::new(ChatRole::Model, GREETING)];
    }

    /// Submit a user message and return the message to show for it:
    /// the model's reply, or a system message carrying the error text
    /// verbatim when the request fails.
    pub async fn send(&mut self, text: &str, mode: ChatMode) -> ChatMessage {
        self.messages.push(ChatMessage::new(ChatRole::User, text));

        let result = match mode {
            ChatMode::Chat => {
                self.client
                    .generate(SYSTEM_INSTRUCTION, history_contents(&self.messages))
                    .await
            }
            ChatMode::Info => {
                let instruction = format!("{SYSTEM_INSTRUCTION}{INFO_INSTRUCTION_SUFFIX}");
                self.client
                    .generate(&instruction, vec![ContentBlock::turn("user", text)])
                    .await
            }
        };

        let message = match result {
            Ok(reply) => ChatMessage::new(ChatRole::Model, reply),
            Err(e) => {
                tracing::error!(error = %e, "assistant request failed");
                ChatMessage::new(ChatRole::System, e.to_string())
            }
        };
        self.messages.push(message.clone());
        message
    }
}

/// Map the transcript to Gemini turns. System messages (greeting errors,
/// notices) never go back to the model.
fn history_contents(messages: &[ChatMessage]) -> Vec<ContentBlock> {
    messages
        .iter()
        .filter_map(|m| match m.role {
            ChatRole::User => Some(ContentBlock::turn("user", &m.text)),
            ChatRole::Model => Some(ContentBlock::turn("model", &m.text)),
            ChatRole::System => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GeminiClient {
        GeminiClient::new(
            "test-key".into(),
            DEFAULT_MODEL.into(),
            DEFAULT_BASE_URL.into(),
        )
    }

    #[test]
    fn new_session_opens_with_greeting() {
        let session = ChatSession::new(test_client());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, ChatRole::Model);
        assert!(session.messages()[0].text.starts_with("Hello! I'm MediBuddy"));
    }

    #[test]
    fn reset_drops_history() {
        let mut session = ChatSession::new(test_client());
        session
            .messages
            .push(ChatMessage::new(ChatRole::User, "hi"));
        session.reset();
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn history_excludes_system_messages() {
        let messages = vec![
            ChatMessage::new(ChatRole::Model, "greeting"),
            ChatMessage::new(ChatRole::User, "question"),
            ChatMessage::new(ChatRole::System, "an error happened"),
            ChatMessage::new(ChatRole::User, "again"),
        ];
        let contents = history_contents(&messages);
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role.as_deref(), Some("model"));
        assert_eq!(contents[1].role.as_deref(), Some("user"));
        assert_eq!(contents[2].role.as_deref(), Some("user"));
    }

    #[test]
    fn request_serializes_camel_case() {
        let request = GenerateContentRequest {
            system_instruction: ContentBlock::instruction("be nice"),
            contents: vec![ContentBlock::turn("user", "hi")],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        // Instruction block carries no role key at all.
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn response_text_extraction() {
        let raw = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"hello"}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let text = parsed
            .candidates
            .into_iter()
            .flatten()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .find(|t| !t.is_empty());
        assert_eq!(text.as_deref(), Some("hello"));
    }
}
