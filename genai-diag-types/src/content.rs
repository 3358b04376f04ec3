use serde::{Deserialize, Serialize};

/// 对话内容。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// 角色：user/model。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// 消息内容片段。
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// 创建用户文本消息。
    pub fn user(text: impl Into<String>) -> Self {
        Self::from_text(text, Role::User)
    }

    /// 拼接所有非思考文本片段；没有文本时返回 `None`。
    #[must_use]
    pub fn joined_text(&self) -> Option<String> {
        let mut texts = self
            .parts
            .iter()
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text.as_deref())
            .peekable();
        texts.peek()?;
        Some(texts.collect())
    }

    fn from_text(text: impl Into<String>, role: Role) -> Self {
        Self {
            role: Some(role),
            parts: vec![Part::text(text)],
        }
    }
}

/// 内容角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// 内容部分（仅文本）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// 是否为思考内容。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    /// 创建文本 Part。
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            thought: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_content_serializes_role_and_text() {
        let value = serde_json::to_value(Content::user("hi")).unwrap();
        assert_eq!(value, json!({"role": "user", "parts": [{"text": "hi"}]}));
    }

    #[test]
    fn joined_text_skips_thought_parts() {
        let content: Content = serde_json::from_value(json!({
            "role": "model",
            "parts": [
                {"text": "thinking...", "thought": true},
                {"text": "answer"}
            ]
        }))
        .unwrap();
        assert_eq!(content.joined_text().as_deref(), Some("answer"));
    }

    #[test]
    fn joined_text_concatenates_parts_in_order() {
        let content: Content = serde_json::from_value(json!({
            "role": "model",
            "parts": [{"text": "Yes, "}, {"text": "I am working."}]
        }))
        .unwrap();
        assert_eq!(content.joined_text().as_deref(), Some("Yes, I am working."));
    }

    #[test]
    fn missing_parts_default_to_empty() {
        let content: Content = serde_json::from_value(json!({"role": "model"})).unwrap();
        assert!(content.parts.is_empty());
        assert_eq!(content.joined_text(), None);
    }
}
