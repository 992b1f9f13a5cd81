//! Summarizer service: health probe and text summarization gateway in front
//! of an OpenAI-compatible chat completion API.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
