//! `test-socratic`: send one chat request to the local endpoint and echo the reply.

use std::io::{self, Write};

use reqwest::header::HeaderMap;
use reqwest::{Client as HttpClient, Url};

use genai_diag_types::chat::SocraticChatRequest;
use genai_diag_types::http::RawResponse;

use crate::client::{build_http_client, HttpOptions};
use crate::config::ProbeSettings;
use crate::error::{Error, Result};

/// `socratic_chat` 探测器。
#[derive(Clone)]
pub struct ChatProbe {
    http: HttpClient,
    url: Url,
}

/// 探测器 Builder。
#[derive(Default)]
pub struct ChatProbeBuilder {
    url: Option<String>,
    http_options: HttpOptions,
}

impl ChatProbe {
    /// 以默认 HTTP 配置创建探测器。
    ///
    /// # Errors
    /// URL 无法解析时返回错误。
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::builder().url(url).build()
    }

    #[must_use]
    pub fn builder() -> ChatProbeBuilder {
        ChatProbeBuilder::default()
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// 发送一次 POST，原样返回状态码与响应文本。
    ///
    /// 非 2xx 状态不视为错误。
    ///
    /// # Errors
    /// 连接、传输或读取响应体失败时返回错误。
    pub async fn send(&self, request: &SocraticChatRequest) -> Result<RawResponse> {
        tracing::debug!(url = %self.url, "posting chat probe");
        let response = self
            .http
            .post(self.url.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, bytes = body.len(), "chat probe answered");
        Ok(RawResponse { status, body })
    }
}

impl ChatProbeBuilder {
    /// 设置目标地址。
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// 设置请求超时（秒）。
    #[must_use]
    pub const fn timeout(mut self, secs: u64) -> Self {
        self.http_options.timeout = Some(secs);
        self
    }

    /// 构建探测器。
    ///
    /// # Errors
    /// 缺少 URL、URL 无效或 HTTP 客户端构建失败时返回错误。
    pub fn build(self) -> Result<ChatProbe> {
        let raw = self.url.ok_or_else(|| Error::InvalidConfig {
            message: "Probe URL required".into(),
        })?;
        let url = Url::parse(raw.trim()).map_err(|err| Error::InvalidConfig {
            message: format!("Invalid probe URL {raw}: {err}"),
        })?;
        let http = build_http_client(&self.http_options, HeaderMap::new())?;
        Ok(ChatProbe { http, url })
    }
}

/// 运行 `test-socratic`。
///
/// 配置或传输错误折叠成一行 `Error: ...`。
///
/// # Errors
/// 仅在写入 `out` 失败时返回错误。
pub async fn run<W: Write>(out: &mut W, settings: Result<ProbeSettings>) -> io::Result<()> {
    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            writeln!(out, "Error: {err}")?;
            return out.flush();
        }
    };

    writeln!(out, "Testing {}...", settings.url)?;
    let result = match ChatProbe::new(settings.url.as_str()) {
        Ok(probe) => probe.send(&settings.request()).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(response) => {
            writeln!(out, "Status: {}", response.status)?;
            writeln!(out, "Response: {}", response.body)?;
        }
        Err(err) => writeln!(out, "Error: {err}")?,
    }
    out.flush()
}
