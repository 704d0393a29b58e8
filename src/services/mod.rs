mod quiz_service;
mod transcript_source;

pub use quiz_service::{QuizOutcome, QuizService};
pub use transcript_source::FileContentSource;
