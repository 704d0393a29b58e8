mod client;
#[cfg(test)]
pub mod fake;
mod generator;
mod normalize;

pub use client::{ClaudeClient, QuestionModel};
pub use generator::{ChunkGenerator, ChunkRequest};
