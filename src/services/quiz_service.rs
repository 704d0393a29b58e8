use serde::Serialize;

use crate::ai::QuestionModel;
use crate::db::ContentCache;
use crate::error::Result;
use crate::models::{Difficulty, FetchedContent, MergedQuiz};
use crate::quiz::QuizPipeline;

use super::transcript_source::ContentSource;

#[derive(Debug, Clone, Serialize)]
pub struct QuizOutcome {
    pub content_key: String,
    pub title: String,
    pub from_cache: bool,
    pub quiz: MergedQuiz,
}

/// Resolves a content key to a transcript and turns it into a quiz.
///
/// The cache only ever saves work: a failed lookup is treated as a miss and a
/// failed store is logged and ignored.
pub struct QuizService<M, S> {
    cache: ContentCache,
    source: S,
    pipeline: QuizPipeline<M>,
}

impl<M: QuestionModel, S: ContentSource> QuizService<M, S> {
    pub fn new(cache: ContentCache, source: S, pipeline: QuizPipeline<M>) -> Self {
        Self {
            cache,
            source,
            pipeline,
        }
    }

    #[cfg(test)]
    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub async fn quiz_for(
        &self,
        content_key: &str,
        requested: usize,
        difficulty: Difficulty,
    ) -> Result<QuizOutcome> {
        self.pipeline.check_count(requested)?;

        let (content, from_cache) = self.load_content(content_key).await?;

        let quiz = self
            .pipeline
            .generate(
                content_key,
                &content.transcript,
                requested,
                difficulty,
                &content.title,
            )
            .await?;

        if quiz.is_empty() {
            tracing::warn!(content_key, "No questions could be generated");
        }

        Ok(QuizOutcome {
            content_key: content_key.to_string(),
            title: content.title,
            from_cache,
            quiz,
        })
    }

    async fn load_content(&self, content_key: &str) -> Result<(FetchedContent, bool)> {
        match self.cache.lookup(content_key).await {
            Ok(Some(record)) => {
                tracing::debug!(
                    content_key,
                    access_count = record.access_count,
                    "Cache hit"
                );
                return Ok((record.content, true));
            }
            Ok(None) => tracing::debug!(content_key, "Cache miss"),
            Err(e) => tracing::warn!(content_key, "Cache lookup failed, fetching instead: {}", e),
        }

        let content = self.source.fetch(content_key).await?;

        if let Err(e) = self.cache.store(content_key, &content).await {
            tracing::warn!(content_key, "Failed to cache content: {}", e);
        }

        Ok((content, false))
    }
}
