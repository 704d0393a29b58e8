use crate::config::ChunkingConfig;

use super::splitter::split_transcript;

/// Transcript chunks paired with how many questions each must produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    pub chunks: Vec<String>,
    pub quotas: Vec<usize>,
}

impl ChunkPlan {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

pub struct ChunkPlanner {
    thresholds: Vec<usize>,
}

impl ChunkPlanner {
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            thresholds: config.thresholds.clone(),
        }
    }

    /// Content shorter than this is never split.
    pub fn split_threshold(&self) -> usize {
        self.thresholds.first().copied().unwrap_or(usize::MAX)
    }

    pub fn chunk_count(&self, content_length: usize) -> usize {
        1 + self
            .thresholds
            .iter()
            .filter(|&&breakpoint| content_length >= breakpoint)
            .count()
    }

    /// Splits `transcript` and assigns quotas over the chunks actually produced.
    ///
    /// Blank transcripts give an empty plan.
    pub fn plan(&self, transcript: &str, total_questions: usize) -> ChunkPlan {
        let length = transcript.chars().count();
        let wanted = self.chunk_count(length);
        let chunks = split_transcript(transcript, wanted, self.split_threshold());

        if chunks.len() != wanted && !chunks.is_empty() {
            tracing::debug!(
                "Planned {} chunks but splitting produced {}",
                wanted,
                chunks.len()
            );
        }

        let quotas = if chunks.is_empty() {
            Vec::new()
        } else {
            distribute_quotas(total_questions, chunks.len())
        };

        ChunkPlan { chunks, quotas }
    }
}

impl Default for ChunkPlanner {
    fn default() -> Self {
        Self::new(&ChunkingConfig::default())
    }
}

/// Floor share per chunk, with the remainder going one each to the first chunks.
pub fn distribute_quotas(total: usize, chunk_count: usize) -> Vec<usize> {
    if chunk_count == 0 {
        return Vec::new();
    }
    let base = total / chunk_count;
    let remainder = total % chunk_count;
    (0..chunk_count)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_count_steps_with_length() {
        let planner = ChunkPlanner::default();
        assert_eq!(planner.chunk_count(0), 1);
        assert_eq!(planner.chunk_count(4_999), 1);
        assert_eq!(planner.chunk_count(5_000), 2);
        assert_eq!(planner.chunk_count(20_000), 3);
        assert_eq!(planner.chunk_count(79_999), 5);
        assert_eq!(planner.chunk_count(90_000), 6);
        assert_eq!(planner.chunk_count(1_000_000), 6);
    }

    #[test]
    fn quotas_sum_to_total_with_skew_at_most_one() {
        for total in 0..=60 {
            for chunks in 1..=6 {
                let quotas = distribute_quotas(total, chunks);
                assert_eq!(quotas.len(), chunks);
                assert_eq!(quotas.iter().sum::<usize>(), total);
                let max = *quotas.iter().max().unwrap();
                let min = *quotas.iter().min().unwrap();
                assert!(max - min <= 1);
            }
        }
    }

    #[test]
    fn remainder_goes_to_earliest_chunks() {
        assert_eq!(distribute_quotas(25, 6), vec![5, 4, 4, 4, 4, 4]);
        assert_eq!(distribute_quotas(11, 4), vec![3, 3, 3, 2]);
        assert_eq!(distribute_quotas(0, 3), vec![0, 0, 0]);
    }

    #[test]
    fn short_transcript_is_one_unsplit_chunk() {
        let transcript = "word ".repeat(800); // 4,000 chars
        let plan = ChunkPlanner::default().plan(&transcript, 10);
        assert_eq!(plan.chunks, vec![transcript]);
        assert_eq!(plan.quotas, vec![10]);
    }

    #[test]
    fn long_transcript_uses_six_chunks() {
        let transcript = "lesson ".repeat(13_000); // 91,000 chars
        let plan = ChunkPlanner::default().plan(&transcript, 25);
        assert_eq!(plan.len(), 6);
        assert_eq!(plan.quotas.iter().sum::<usize>(), 25);
        assert!(plan.quotas.iter().all(|q| *q == 4 || *q == 5));
    }

    #[test]
    fn quotas_follow_actual_chunk_count() {
        // Long enough for two chunks but only one word.
        let transcript = "x".repeat(6_000);
        let plan = ChunkPlanner::default().plan(&transcript, 7);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.quotas, vec![7]);
    }

    #[test]
    fn blank_transcript_gives_empty_plan() {
        let plan = ChunkPlanner::default().plan("   ", 10);
        assert!(plan.is_empty());
        assert!(plan.quotas.is_empty());
    }
}
