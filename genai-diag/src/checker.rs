//! `check-models`: ask each candidate model for a one-line reply.

use std::io::{self, Write};
use std::process::ExitCode;

use genai_diag_types::content::Content;

use crate::client::Client;
use crate::config::{api_key_from_env, check_models_from_env};
use crate::error::{Error, Result};
use crate::models::Models;

/// 连通性检查使用的提示词。
pub const CHECK_PROMPT: &str = "Hello, are you working?";

/// 单个模型的检查结果。
#[derive(Debug)]
pub struct CheckOutcome {
    pub model: String,
    pub result: Result<String>,
}

impl CheckOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// 向模型发送 [`CHECK_PROMPT`] 并返回回复文本。
///
/// # Errors
/// 请求失败、服务返回非 2xx，或回复中没有文本（例如被安全策略拦截）时返回错误。
pub async fn check_model(models: &Models, model: &str) -> Result<String> {
    let response = models
        .generate_content(model, vec![Content::user(CHECK_PROMPT)])
        .await?;
    if let Some(text) = response.text() {
        return Ok(text);
    }
    let reason = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
        .map_or_else(
            || "response contained no text".to_string(),
            |reason| format!("prompt blocked: {reason}"),
        );
    Err(Error::Parse { message: reason })
}

/// 依次检查所有候选模型，前一个失败不影响后续。
///
/// 成功写入 `out`，失败写入 `err_out`。
///
/// # Errors
/// 仅在写入失败时返回错误。
pub async fn run<W: Write, E: Write>(
    out: &mut W,
    err_out: &mut E,
    client: &Client,
    candidates: &[String],
) -> io::Result<Vec<CheckOutcome>> {
    let models = client.models();
    let mut outcomes = Vec::with_capacity(candidates.len());
    for model in candidates {
        writeln!(out, "\nTesting model: {model}")?;
        out.flush()?;
        let result = check_model(&models, model).await;
        match &result {
            Ok(text) => writeln!(out, "[SUCCESS] {model} responded: {text}")?,
            Err(err) => writeln!(err_out, "[FAILED] {model}: {err}")?,
        }
        outcomes.push(CheckOutcome {
            model: model.clone(),
            result,
        });
    }
    out.flush()?;
    err_out.flush()?;
    Ok(outcomes)
}

/// `check-models` 的退出状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// 所有候选模型都已尝试（无论成败）。
    Completed,
    /// 未找到 API Key。
    MissingApiKey,
    /// 客户端配置无效。
    InvalidConfig,
}

impl From<CheckStatus> for ExitCode {
    fn from(status: CheckStatus) -> Self {
        match status {
            CheckStatus::Completed => Self::SUCCESS,
            CheckStatus::MissingApiKey | CheckStatus::InvalidConfig => Self::FAILURE,
        }
    }
}

/// 从环境变量读取配置并运行 `check-models`。
///
/// 缺少 API Key 时向 `err_out` 写出 `No API KEY found`，不发出任何请求。
///
/// # Errors
/// 仅在写入失败时返回错误。
pub async fn run_from_env<W: Write, E: Write>(
    out: &mut W,
    err_out: &mut E,
) -> io::Result<CheckStatus> {
    if api_key_from_env().is_err() {
        writeln!(err_out, "No API KEY found")?;
        err_out.flush()?;
        return Ok(CheckStatus::MissingApiKey);
    }
    let client = match Client::from_env() {
        Ok(client) => client,
        Err(err) => {
            writeln!(err_out, "Error: {err}")?;
            err_out.flush()?;
            return Ok(CheckStatus::InvalidConfig);
        }
    };

    let outcomes = run(out, err_out, &client, &check_models_from_env()).await?;
    let passed = outcomes.iter().filter(|o| o.is_success()).count();
    tracing::info!(passed, total = outcomes.len(), "model check finished");
    Ok(CheckStatus::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::with_env;

    fn run_blocking(out: &mut Vec<u8>, err_out: &mut Vec<u8>) -> CheckStatus {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(run_from_env(out, err_out))
            .unwrap()
    }

    #[test]
    fn missing_api_key_fails_without_output() {
        with_env(
            &[("GEMINI_API_KEY", None), ("GOOGLE_API_KEY", None)],
            || {
                let mut out = Vec::new();
                let mut err_out = Vec::new();
                let status = run_blocking(&mut out, &mut err_out);
                assert_eq!(status, CheckStatus::MissingApiKey);
                assert!(out.is_empty());
                assert_eq!(String::from_utf8(err_out).unwrap(), "No API KEY found\n");
            },
        );
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        with_env(
            &[("GEMINI_API_KEY", Some("")), ("GOOGLE_API_KEY", Some("   "))],
            || {
                let mut out = Vec::new();
                let mut err_out = Vec::new();
                assert_eq!(
                    run_blocking(&mut out, &mut err_out),
                    CheckStatus::MissingApiKey
                );
            },
        );
    }
}
