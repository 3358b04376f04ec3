//! `list-models`: print the models that can serve `generateContent`.

use std::collections::HashSet;
use std::io::{self, Write};

use genai_diag_types::models::{ListModelsConfig, Model, GENERATE_CONTENT};

use crate::client::Client;
use crate::error::Result;
use crate::models::Models;

/// 每页请求的模型数量。
pub const DEFAULT_PAGE_SIZE: i32 = 50;

/// 按生成方法过滤模型，保持服务端返回顺序。
///
/// 没有 `name` 的模型会被跳过。
pub fn matching_names<'a>(
    models: &'a [Model],
    method: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    models
        .iter()
        .filter(move |model| model.supports_generation_method(method))
        .filter_map(|model| model.name.as_deref())
}

/// 逐页拉取模型列表并输出匹配的模型名。
#[derive(Clone)]
pub struct ModelLister {
    models: Models,
    method: String,
    page_size: Option<i32>,
}

impl ModelLister {
    #[must_use]
    pub fn new(client: &Client) -> Self {
        Self {
            models: client.models(),
            method: GENERATE_CONTENT.to_string(),
            page_size: Some(DEFAULT_PAGE_SIZE),
        }
    }

    /// 设置过滤使用的生成方法。
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// 每收到一页就写出其中匹配的模型名，返回写出的行数。
    ///
    /// 中途失败时，之前已写出的行保留。服务端重复返回同一个
    /// `nextPageToken` 时停止翻页。
    ///
    /// # Errors
    /// 请求失败或写入失败时返回错误。
    pub async fn write_names<W: Write>(&self, out: &mut W) -> Result<usize> {
        let mut config = ListModelsConfig {
            page_size: self.page_size,
            page_token: None,
        };
        let mut written = 0;
        let mut seen_tokens = HashSet::new();
        loop {
            let page = self.models.list_with_config(config.clone()).await?;
            if let Some(models) = &page.models {
                for name in matching_names(models, &self.method) {
                    writeln!(out, "{name}")?;
                    written += 1;
                }
            }
            let Some(token) = page.next_page() else {
                break;
            };
            if !seen_tokens.insert(token.to_string()) {
                tracing::warn!(token, "page token repeated, stop paging");
                break;
            }
            config.page_token = Some(token.to_string());
        }
        out.flush()?;
        tracing::debug!(written, method = %self.method, "model listing finished");
        Ok(written)
    }
}

/// 运行 `list-models`。
///
/// 任何配置或请求错误都折叠成一行 `Error: ...`，不向调用方传播。
///
/// # Errors
/// 仅在写入 `out` 失败时返回错误。
pub async fn run<W: Write>(out: &mut W, client: Result<Client>) -> io::Result<()> {
    writeln!(out, "Listing models...")?;
    let result = match client {
        Ok(client) => ModelLister::new(&client).write_names(out).await.map(|_| ()),
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        writeln!(out, "Error: {err}")?;
    }
    out.flush()
}
