/// Request bodies for the `/api/chat` endpoint.
///
/// The relay deliberately types as little as possible: `messages` stays an
/// opaque JSON array so that whatever the client puts in a message (images,
/// tool calls, fields added by future Ollama versions) survives the trip
/// upstream untouched.
use serde::{Deserialize, Serialize};

/// Model used when the caller's request body has no `model` field.
pub const DEFAULT_MODEL: &str = "llama3";

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// What the caller sends us. Both fields are optional and default exactly the
/// way the upstream payload documents.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
}

/// What we send upstream: the caller's fields plus `stream: true`, always.
/// The streaming flag is not negotiable; the whole point of the relay is the
/// chunked ndjson response.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamChatRequest {
    pub model: String,
    pub messages: Vec<serde_json::Value>,
    pub stream: bool,
}

impl From<ChatRequest> for UpstreamChatRequest {
    fn from(req: ChatRequest) -> Self {
        UpstreamChatRequest {
            model: req.model,
            messages: req.messages,
            stream: true,
        }
    }
}
