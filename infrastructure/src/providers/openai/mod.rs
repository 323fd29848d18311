//! OpenAI-compatible chat completions provider
//!
//! Talks to `POST {base_url}/v1/chat/completions` with a bearer token.
//! Works against OpenAI itself and any server exposing the same API.

mod adapter;
mod types;

pub use adapter::{OpenAiResponder, OpenAiSettings};
