//! Wire types shared by the genai-diag tools.

pub mod chat;
pub mod content;
pub mod http;
pub mod models;
pub mod response;
