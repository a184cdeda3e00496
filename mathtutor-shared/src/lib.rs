use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One turn of a conversation. The role is free-form text ("system",
/// "user", "assistant" by convention) because the upstream API accepts
/// whatever the caller sends; we do not validate it against an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Response body for a successful chat call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    /// Full upstream JSON, passed through verbatim.
    pub raw: Value,
}

/// What a chat request body amounts to after normalization.
///
/// Clients send either `{messages: [{role, content}]}` or `{prompt: string}`.
/// `messages` wins when it yields at least one well-formed entry; `prompt`
/// is the fallback, wrapped into a single user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Messages(Vec<ChatMessage>),
    Prompt(String),
    Invalid,
}

impl ChatInput {
    /// Normalize a raw JSON body. Entries of `messages` that are not JSON
    /// objects are dropped; `role` and `content` are coerced to strings
    /// (missing/null becomes empty, non-strings keep their JSON text) and
    /// the role is trimmed.
    pub fn from_value(body: &Value) -> Self {
        let mut messages = Vec::new();
        if let Some(Value::Array(entries)) = body.get("messages") {
            for entry in entries {
                if entry.is_object() {
                    messages.push(ChatMessage {
                        role: coerce_string(entry.get("role")).trim().to_string(),
                        content: coerce_string(entry.get("content")),
                    });
                }
            }
        }
        if !messages.is_empty() {
            return ChatInput::Messages(messages);
        }

        let prompt = coerce_string(body.get("prompt"));
        if !prompt.is_empty() {
            return ChatInput::Prompt(prompt);
        }

        ChatInput::Invalid
    }

    /// The canonical message list, or `None` for an invalid body.
    pub fn into_messages(self) -> Option<Vec<ChatMessage>> {
        match self {
            ChatInput::Messages(messages) => Some(messages),
            ChatInput::Prompt(prompt) => Some(vec![ChatMessage::new("user", prompt)]),
            ChatInput::Invalid => None,
        }
    }
}

/// Insert `default_prompt` as a system message at position 0 unless the
/// caller already leads with one. A caller-supplied system prompt wins
/// over the server default.
pub fn ensure_system_prompt(messages: &mut Vec<ChatMessage>, default_prompt: &str) {
    let has_system = messages.first().is_some_and(|m| m.role == "system");
    if !has_system {
        messages.insert(0, ChatMessage::new("system", default_prompt));
    }
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
