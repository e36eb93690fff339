//! Unified generation types and traits.
//!
//! This crate provides the provider-neutral pieces of the gateway:
//! `Message` and content blocks, prompt normalization, image resolution,
//! multimodal content layout, conversation mapping, the per-call `Request`,
//! streaming chunks and the two provider traits (`LLM` for natively async
//! streams, `BlockingLLM` for thread-bound iterator streams).

pub use config::SamplingParams;
pub use error::{Error, Result};
pub use history::{ConversationMapper, Mapped, Turn};
pub use image::ImageRef;
pub use message::{Content, ContentBlock, Message, Role, parse_history};
pub use multimodal::{build as build_content, user_content};
pub use prompt::{Prompt, PromptMode, normalize};
pub use provider::{BlockingLLM, LLM, Request};
pub use stream::{Choice, Delta, StreamChunk, StreamToken, error_text, is_error_text};

mod config;
mod error;
mod history;
pub mod image;
mod message;
pub mod multimodal;
pub mod prompt;
mod provider;
pub mod stream;
