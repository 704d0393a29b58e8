mod merger;
mod pipeline;
mod planner;
mod splitter;

pub use pipeline::{parse_question_count, QuizPipeline};
pub use planner::ChunkPlanner;
