//! Environment-driven settings shared by the tools.

use genai_diag_types::chat::SocraticChatRequest;

use crate::error::{Error, Result};

/// `socratic_chat` 默认地址。
pub const DEFAULT_CHAT_URL: &str = "http://localhost:2002/socratic_chat";
/// 探测时发送的默认消息。
pub const DEFAULT_CHAT_MESSAGE: &str = "What is gravity?";
/// `check-models` 默认检查的模型。
pub const DEFAULT_CHECK_MODELS: [&str; 3] =
    ["gemini-2.0-flash", "gemini-1.5-flash", "gemini-flash-latest"];

/// 读取 API Key（`GEMINI_API_KEY`，回退到 `GOOGLE_API_KEY`）。
///
/// 空字符串视为未设置。
///
/// # Errors
/// 两个变量都缺失时返回 [`Error::InvalidConfig`]。
pub fn api_key_from_env() -> Result<String> {
    non_empty_env("GEMINI_API_KEY")
        .or_else(|| non_empty_env("GOOGLE_API_KEY"))
        .ok_or_else(|| Error::InvalidConfig {
            message: "GEMINI_API_KEY or GOOGLE_API_KEY not found".into(),
        })
}

/// 读取 `GENAI_CHECK_MODELS`（逗号分隔），未设置时使用默认列表。
#[must_use]
pub fn check_models_from_env() -> Vec<String> {
    let parsed: Vec<String> = non_empty_env("GENAI_CHECK_MODELS")
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default();
    if parsed.is_empty() {
        DEFAULT_CHECK_MODELS.iter().map(ToString::to_string).collect()
    } else {
        parsed
    }
}

pub(crate) fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// `test-socratic` 的运行参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    pub url: String,
    pub message: String,
    pub api_key: String,
}

impl ProbeSettings {
    /// 从环境变量读取探测参数。
    ///
    /// # Errors
    /// 缺少 API Key 时返回错误。
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: non_empty_env("SOCRATIC_CHAT_URL").unwrap_or_else(|| DEFAULT_CHAT_URL.into()),
            message: non_empty_env("SOCRATIC_CHAT_MESSAGE")
                .unwrap_or_else(|| DEFAULT_CHAT_MESSAGE.into()),
            api_key: api_key_from_env()?,
        })
    }

    #[must_use]
    pub fn request(&self) -> SocraticChatRequest {
        SocraticChatRequest::new(self.message.clone(), self.api_key.clone())
    }
}
