#![allow(dead_code)]

use std::net::TcpListener;

use serde_json::{json, Value};

use genai_diag::Client;

pub fn build_gemini_client(base_url: &str) -> Client {
    Client::builder()
        .api_key("test-key")
        .base_url(base_url)
        .build()
        .unwrap()
}

pub fn model(name: &str, methods: &[&str]) -> Value {
    json!({
        "name": name,
        "supportedGenerationMethods": methods,
    })
}

/// 返回一个当前无人监听的本地地址。
pub fn refused_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}{path}")
}

pub fn output_lines(out: Vec<u8>) -> Vec<String> {
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(ToString::to_string)
        .collect()
}
