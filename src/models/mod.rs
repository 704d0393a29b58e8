mod content;
mod question;

pub use content::{ContentRecord, FetchedContent};
pub use question::{AnswerLetter, Difficulty, MergedQuiz, Question, DEFAULT_TOPIC};
