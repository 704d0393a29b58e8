use futures::future::join_all;

use crate::ai::{ChunkGenerator, ChunkRequest, QuestionModel};
use crate::error::{AppError, Result};
use crate::models::{Difficulty, MergedQuiz};

use super::merger::merge_chunks;
use super::planner::ChunkPlanner;

/// Parses a caller-supplied question count, rejecting negatives and junk.
pub fn parse_question_count(raw: &str) -> Result<usize> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("'{}' is not a question count", raw)))?;
    usize::try_from(value).map_err(|_| {
        AppError::InvalidInput(format!("question count must not be negative, got {}", value))
    })
}

/// Plans, fans out and merges one quiz request.
pub struct QuizPipeline<M> {
    generator: ChunkGenerator<M>,
    planner: ChunkPlanner,
    max_questions: usize,
}

impl<M: QuestionModel> QuizPipeline<M> {
    pub fn new(model: M, planner: ChunkPlanner, max_questions: usize) -> Self {
        Self {
            generator: ChunkGenerator::new(model),
            planner,
            max_questions,
        }
    }

    #[cfg(test)]
    pub fn model(&self) -> &M {
        self.generator.model()
    }

    pub fn check_count(&self, requested: usize) -> Result<()> {
        if requested > self.max_questions {
            return Err(AppError::InvalidInput(format!(
                "at most {} questions can be requested, got {}",
                self.max_questions, requested
            )));
        }
        Ok(())
    }

    /// Builds a quiz of at most `requested` questions from `transcript`.
    ///
    /// Only an out-of-range `requested` is an error. Chunks whose generation
    /// fails contribute nothing, and a blank transcript gives an empty quiz.
    pub async fn generate(
        &self,
        content_key: &str,
        transcript: &str,
        requested: usize,
        difficulty: Difficulty,
        title: &str,
    ) -> Result<MergedQuiz> {
        self.check_count(requested)?;

        let plan = self.planner.plan(transcript, requested);
        if plan.is_empty() {
            tracing::info!(content_key, "Transcript is empty, nothing to generate");
            return Ok(MergedQuiz::default());
        }

        tracing::info!(
            content_key,
            chunks = plan.len(),
            "Generating {} {} questions with quotas {:?}",
            requested,
            difficulty,
            plan.quotas
        );

        // One chunk: nothing to merge, the generator's own numbering stands.
        if plan.len() == 1 {
            let questions = self
                .generator
                .generate(ChunkRequest {
                    text: &plan.chunks[0],
                    quota: plan.quotas[0],
                    difficulty,
                    title,
                    index: 0,
                    total_chunks: 1,
                })
                .await;
            return Ok(MergedQuiz { questions });
        }

        let total_chunks = plan.len();
        let tasks = plan
            .chunks
            .iter()
            .zip(&plan.quotas)
            .enumerate()
            .map(|(index, (text, &quota))| {
                self.generator.generate(ChunkRequest {
                    text,
                    quota,
                    difficulty,
                    title,
                    index,
                    total_chunks,
                })
            });

        // join_all yields results in chunk order, whatever order they finish in.
        let per_chunk = join_all(tasks).await;

        let produced: usize = per_chunk.iter().map(Vec::len).sum();
        let merged = merge_chunks(per_chunk, requested);
        tracing::info!(
            content_key,
            "Merged {} generated questions into {}",
            produced,
            merged.len()
        );

        Ok(merged)
    }
}
