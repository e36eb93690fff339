//! Genway CLI: stream single-turn, multimodal and multi-turn generations
//! from the configured backend to stdout.

pub use cmd::{Cli, Command};

pub mod cmd;
pub mod config;
