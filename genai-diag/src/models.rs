//! Models API surface.

use std::sync::Arc;

use genai_diag_types::content::Content;
use genai_diag_types::models::{GenerateContentRequest, ListModelsConfig, ListModelsResponse};
use genai_diag_types::response::GenerateContentResponse;

use crate::client::ClientInner;
use crate::error::{Error, Result};
use serde_json::Value;

#[derive(Clone)]
pub struct Models {
    pub(crate) inner: Arc<ClientInner>,
}

impl Models {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 生成内容（默认配置）。
    ///
    /// # Errors
    /// 当请求失败、服务返回非 2xx 或响应无法解析时返回错误。
    pub async fn generate_content(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
    ) -> Result<GenerateContentResponse> {
        let model = model.into();
        let url = build_model_method_url(&self.inner, &model, "generateContent");
        let body = GenerateContentRequest { contents };
        let request = self.inner.http.post(url).json(&body);
        let response = self.inner.send(request).await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(model = %model, status, "generateContent failed");
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }
        Ok(response.json::<GenerateContentResponse>().await?)
    }

    /// 列出模型（带配置）。
    ///
    /// # Errors
    /// 当请求失败或服务返回非 2xx 时返回错误。
    pub async fn list_with_config(&self, config: ListModelsConfig) -> Result<ListModelsResponse> {
        let url = build_models_list_url(&self.inner, &config)?;
        let request = self.inner.http.get(url);
        let response = self.inner.send(request).await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(status, "listing models failed");
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }
        let result = response.json::<ListModelsResponse>().await?;
        tracing::debug!(
            count = result.models.as_ref().map_or(0, Vec::len),
            has_next = result.next_page().is_some(),
            "received model page"
        );
        Ok(result)
    }
}

/// 把非 2xx 响应转成单行错误。
///
/// Gemini 的错误体形如 `{"error": {"code": 400, "message": "...", "status": "..."}}`，
/// 取其中的 `message`；无法解析时把原文压成一行。
fn api_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string());
    Error::ApiError {
        status,
        message: single_line(&message),
    }
}

fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn transform_model_name(model: &str) -> String {
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

fn build_model_method_url(inner: &ClientInner, model: &str, method: &str) -> String {
    let model = transform_model_name(model);
    let base = &inner.api_client.base_url;
    let version = &inner.api_client.api_version;
    format!("{base}{version}/{model}:{method}")
}

fn build_models_list_url(inner: &ClientInner, config: &ListModelsConfig) -> Result<String> {
    let base = &inner.api_client.base_url;
    let version = &inner.api_client.api_version;
    add_list_query_params(&format!("{base}{version}/models"), config)
}

fn add_list_query_params(url: &str, config: &ListModelsConfig) -> Result<String> {
    let mut url = reqwest::Url::parse(url).map_err(|err| Error::InvalidConfig {
        message: err.to_string(),
    })?;
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(page_size) = config.page_size {
            pairs.append_pair("pageSize", &page_size.to_string());
        }
        if let Some(page_token) = &config.page_token {
            pairs.append_pair("pageToken", page_token);
        }
    }
    // query_pairs_mut 在无参数时仍会留下 `?`
    if url.query() == Some("") {
        url.set_query(None);
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;

    #[test]
    fn test_transform_model_name() {
        assert_eq!(
            transform_model_name("gemini-2.0-flash"),
            "models/gemini-2.0-flash"
        );
        assert_eq!(
            transform_model_name("models/gemini-2.0-flash"),
            "models/gemini-2.0-flash"
        );
        assert_eq!(transform_model_name("tunedModels/abc"), "tunedModels/abc");
    }

    #[test]
    fn test_build_model_urls() {
        let client = Client::new("test-key").unwrap();
        let models = client.models();
        let url = build_model_method_url(&models.inner, "gemini-2.0-flash", "generateContent");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_api_error_reads_error_envelope() {
        let body = "{\n  \"error\": {\n    \"code\": 400,\n    \"message\": \"API key not valid. Please pass a valid API key.\",\n    \"status\": \"INVALID_ARGUMENT\"\n  }\n}\n";
        let err = api_error(400, body);
        assert!(matches!(
            err,
            Error::ApiError { status: 400, ref message }
                if message == "API key not valid. Please pass a valid API key."
        ));
    }

    #[test]
    fn test_api_error_collapses_unparsed_body() {
        let err = api_error(502, "<html>\n  <body>Bad Gateway</body>\n</html>\n");
        assert_eq!(
            err.to_string(),
            "API error (status 502): <html> <body>Bad Gateway</body> </html>"
        );
    }

    #[test]
    fn test_build_list_url_with_paging() {
        let client = Client::new("test-key").unwrap();
        let models = client.models();
        let url = build_models_list_url(
            &models.inner,
            &ListModelsConfig {
                page_size: Some(50),
                page_token: Some("next/page".into()),
            },
        )
        .unwrap();
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models?pageSize=50&pageToken=next%2Fpage"
        );

        let url = build_models_list_url(&models.inner, &ListModelsConfig::default()).unwrap();
        assert_eq!(url, "https://generativelanguage.googleapis.com/v1beta/models");
    }
}
