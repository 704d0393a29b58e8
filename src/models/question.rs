use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_TOPIC: &str = "General";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(AppError::InvalidInput(format!(
                "unknown difficulty '{}', expected easy, medium or hard",
                other
            ))),
        }
    }
}

/// Position of the correct option, A through D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    pub const ALL: [AnswerLetter; 4] = [AnswerLetter::A, AnswerLetter::B, AnswerLetter::C, AnswerLetter::D];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(AnswerLetter::A),
            'B' => Some(AnswerLetter::B),
            'C' => Some(AnswerLetter::C),
            'D' => Some(AnswerLetter::D),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            AnswerLetter::A => 'A',
            AnswerLetter::B => 'B',
            AnswerLetter::C => 'C',
            AnswerLetter::D => 'D',
        };
        write!(f, "{}", c)
    }
}

/// A normalized multiple-choice question.
///
/// `id` is only meaningful on merged output; chunk-local ids are discarded
/// during the merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: usize,
    pub question: String,
    pub options: [String; 4],
    pub correct_answer: AnswerLetter,
    pub topic: String,
}

impl Question {
    #[cfg(test)]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer.index()]
    }

    /// Case-folded, trimmed question text used as the dedup key.
    pub fn dedup_key(&self) -> String {
        self.question.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedQuiz {
    pub questions: Vec<Question>,
}

impl MergedQuiz {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!(matches!(
            "extreme".parse::<Difficulty>(),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn answer_letter_indexes_options() {
        let q = Question {
            id: 1,
            question: "Pick one".to_string(),
            options: ["w".into(), "x".into(), "y".into(), "z".into()],
            correct_answer: AnswerLetter::C,
            topic: DEFAULT_TOPIC.to_string(),
        };
        assert_eq!(q.correct_option(), "y");
        assert_eq!(AnswerLetter::from_index(3), Some(AnswerLetter::D));
        assert_eq!(AnswerLetter::from_index(4), None);
        assert_eq!(AnswerLetter::from_char('b'), Some(AnswerLetter::B));
    }

    #[test]
    fn dedup_key_ignores_case_and_padding() {
        let q = Question {
            id: 1,
            question: "  What Is A Variable?  ".to_string(),
            options: Default::default(),
            correct_answer: AnswerLetter::A,
            topic: DEFAULT_TOPIC.to_string(),
        };
        assert_eq!(q.dedup_key(), "what is a variable?");
    }
}
