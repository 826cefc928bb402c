pub mod client;
pub mod generator;

pub use client::{CompletionClient, ModelConfig, DEFAULT_MODEL};
pub use generator::{build_prompt, generate_questions, parse_questions};
