use serde::{Deserialize, Serialize};

// Upstream model selectable by alias
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Model {
    pub alias: &'static str,
    pub id: &'static str,
    pub name: &'static str,
}

pub static MODELS: &[Model] = &[
    Model {
        alias: "haiku",
        id: "claude-haiku-4-5-20251001",
        name: "Haiku 4.5 (Fast)",
    },
    Model {
        alias: "sonnet",
        id: "claude-sonnet-4-5-20250514",
        name: "Sonnet 4.5 (Balanced)",
    },
];

// Unknown or missing aliases fall back to the first entry
pub fn resolve_model(alias: Option<&str>) -> &'static Model {
    alias
        .and_then(|a| MODELS.iter().find(|m| m.alias == a))
        .unwrap_or(&MODELS[0])
}

// Review request body as the client sends it
#[derive(Serialize, Clone, Debug, Default)]
pub struct ReviewRequest {
    pub code: Option<String>,
    pub persona: Option<String>,
    pub model: Option<String>,
    pub stream: bool,
}

// Buffered review response
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ReviewResponse {
    pub review: String,
    pub persona: String,
    pub model: String,
}

// Body of every error response
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ErrorBody {
    pub error: String,
}

// Anthropic Messages API request format
#[derive(Serialize, Debug, Clone)]
pub struct MessagesRequest {
    pub model: &'static str,
    pub max_tokens: u32,
    pub stream: bool,
    pub system: String,
    pub messages: Vec<Message>,
}

#[derive(Serialize, Debug, Clone)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

// Anthropic Messages API response format, only what we read
#[derive(Deserialize, Debug, Clone)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ContentBlock {
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    pub fn first_text(self) -> Option<String> {
        self.content.into_iter().find_map(|block| block.text)
    }
}
