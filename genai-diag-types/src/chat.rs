use serde::{Deserialize, Serialize};

/// `socratic_chat` 请求体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocraticChatRequest {
    pub message: String,
    pub api_key: String,
}

impl SocraticChatRequest {
    pub fn new(message: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            api_key: api_key.into(),
        }
    }
}
