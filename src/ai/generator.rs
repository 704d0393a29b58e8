use crate::models::{Difficulty, Question};

use super::client::QuestionModel;
use super::normalize::normalize_output;

const SYSTEM_PROMPT: &str = r#"You are an assistant that writes multiple-choice quiz questions from video transcripts.
Respond with a JSON array only. Each element must be an object with:
  "question": the question text,
  "options": an array of exactly 4 answer strings,
  "correctAnswer": the letter (A, B, C or D) of the correct option,
  "topic": a short topic label.
Do not wrap the array in any other object and do not add commentary."#;

/// One chunk's share of a quiz request.
#[derive(Debug, Clone, Copy)]
pub struct ChunkRequest<'a> {
    pub text: &'a str,
    pub quota: usize,
    pub difficulty: Difficulty,
    pub title: &'a str,
    pub index: usize,
    pub total_chunks: usize,
}

/// Generates the questions for a single transcript chunk.
pub struct ChunkGenerator<M> {
    model: M,
}

impl<M: QuestionModel> ChunkGenerator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    #[cfg(test)]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Never fails: model errors and unusable output both give an empty list.
    pub async fn generate(&self, request: ChunkRequest<'_>) -> Vec<Question> {
        if request.quota == 0 {
            tracing::debug!(chunk = request.index, "Chunk has no quota, skipping");
            return Vec::new();
        }

        let prompt = build_prompt(&request);

        let raw = match self.model.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    chunk = request.index,
                    model = self.model.model_version(),
                    "Question generation failed: {}",
                    e
                );
                return Vec::new();
            }
        };

        let questions = normalize_output(&raw, request.quota);
        if questions.len() < request.quota {
            tracing::info!(
                chunk = request.index,
                "Chunk produced {} of {} requested questions",
                questions.len(),
                request.quota
            );
        }
        questions
    }
}

fn build_prompt(request: &ChunkRequest<'_>) -> String {
    let part = if request.total_chunks > 1 {
        format!(
            "This is part {} of {} of the transcript.\n",
            request.index + 1,
            request.total_chunks
        )
    } else {
        String::new()
    };

    format!(
        "Video title: {}\n{}Write exactly {} {} multiple-choice questions based only on the transcript below.\n\nTranscript:\n{}",
        request.title, part, request.quota, request.difficulty, request.text
    )
}
