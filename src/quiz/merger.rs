use std::collections::HashSet;

use crate::models::{MergedQuiz, Question};

/// Merges per-chunk question lists, given in chunk order.
///
/// The first occurrence of each question text (case-insensitive, trimmed)
/// wins. Survivors are renumbered from 1 and the list is cut at `requested`;
/// a shortfall is returned as is.
pub fn merge_chunks(chunks: Vec<Vec<Question>>, requested: usize) -> MergedQuiz {
    let mut seen = HashSet::new();
    let mut questions = Vec::new();
    let mut duplicates = 0usize;

    for question in chunks.into_iter().flatten() {
        if !seen.insert(question.dedup_key()) {
            duplicates += 1;
            continue;
        }
        questions.push(Question {
            id: questions.len() + 1,
            ..question
        });
    }

    if duplicates > 0 {
        tracing::debug!("Dropped {} duplicate questions while merging", duplicates);
    }

    if questions.len() > requested {
        tracing::debug!(
            "Trimming merged quiz from {} to {} questions",
            questions.len(),
            requested
        );
        questions.truncate(requested);
    }

    MergedQuiz { questions }
}
