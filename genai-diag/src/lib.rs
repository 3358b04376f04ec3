//! Diagnostic tools for a Gemini-backed socratic chat service.
//!
//! Three single-shot checks live here, each exposed as a binary:
//! `list-models` ([`lister`]), `test-socratic` ([`probe`]) and
//! `check-models` ([`checker`]).

pub mod checker;
pub mod client;
pub mod config;
pub mod error;
pub mod lister;
pub mod logging;
pub mod models;
pub mod probe;

#[cfg(test)]
mod test_support;

pub use genai_diag_types as types;

pub use client::{Client, ClientBuilder, HttpOptions};
pub use error::{Error, Result};
