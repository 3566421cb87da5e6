//! Gemini REST client: text generation and embeddings.

pub mod client;
mod response;
pub mod types;

pub use client::{Embedder, GeminiClient, GeminiError, Generator};
