use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{AnswerLetter, Question, DEFAULT_TOPIC};

/// One question object as the model emits it.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    question: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default, rename = "correctAnswer")]
    correct_answer_camel: Option<Value>,
    #[serde(default)]
    correct_answer: Option<Value>,
    #[serde(default)]
    topic: Option<String>,
}

fn option_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*[A-Da-d]\s*[).:\-]\s*").expect("valid option label regex"))
}

fn bare_letter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([A-Da-d])\s*[).:\-]?\s*$").expect("valid bare letter regex"))
}

fn bracketed_list_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("valid bracketed list regex"))
}

/// Parses model output into a list of JSON values.
///
/// Tries the whole text first, then the first bracketed span inside it
/// (e.g. an array wrapped in prose or a code fence). `None` when neither
/// parses.
pub fn extract_question_array(raw: &str) -> Option<Vec<Value>> {
    if let Ok(items) = serde_json::from_str::<Vec<Value>>(raw.trim()) {
        return Some(items);
    }

    let candidate = bracketed_list_re().find(raw)?;
    serde_json::from_str::<Vec<Value>>(candidate.as_str()).ok()
}

/// Removes a leading `A)`, `b.`, `C:` or `D -` style label.
pub fn strip_option_label(option: &str) -> String {
    option_label_re().replace(option, "").trim().to_string()
}

/// Turns the raw answer field into a letter.
///
/// Accepts a lone letter (optionally decorated, e.g. `"b)"`), the full text of
/// one of the options, or a zero-based option index. Text such as `"C++"` is
/// matched against the options, never read as a letter.
fn resolve_answer(value: &Value, options: &[String; 4]) -> Option<AnswerLetter> {
    match value {
        Value::String(s) => {
            if let Some(caps) = bare_letter_re().captures(s) {
                return caps[1].chars().next().and_then(AnswerLetter::from_char);
            }
            let position = |wanted: &str| {
                let wanted = wanted.trim().to_lowercase();
                options.iter().position(|o| o.to_lowercase() == wanted)
            };
            position(s.as_str())
                .or_else(|| position(strip_option_label(s).as_str()))
                .and_then(AnswerLetter::from_index)
        }
        Value::Number(n) => n
            .as_u64()
            .and_then(|i| AnswerLetter::from_index(i as usize)),
        _ => None,
    }
}

fn normalize_one(raw: RawQuestion, id: usize) -> Option<Question> {
    let question = raw.question.trim().to_string();
    if question.is_empty() {
        return None;
    }

    let options: Vec<String> = raw.options.iter().map(|o| strip_option_label(o)).collect();
    let options: [String; 4] = options.try_into().ok()?;

    let answer = raw.correct_answer_camel.or(raw.correct_answer)?;
    let correct_answer = resolve_answer(&answer, &options)?;

    let topic = raw
        .topic
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TOPIC.to_string());

    Some(Question {
        id,
        question,
        options,
        correct_answer,
        topic,
    })
}

/// Normalizes model output into at most `quota` questions.
///
/// Items that do not fit the canonical shape are skipped; unparseable output
/// yields an empty list. Ids are chunk-local, starting at 1.
pub fn normalize_output(raw: &str, quota: usize) -> Vec<Question> {
    let Some(items) = extract_question_array(raw) else {
        tracing::warn!("Model output contained no parseable question array");
        return Vec::new();
    };

    let total = items.len();
    let mut questions = Vec::with_capacity(quota.min(total));
    for item in items {
        if questions.len() >= quota {
            break;
        }
        let raw = match serde_json::from_value::<RawQuestion>(item) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Skipping malformed question object: {}", e);
                continue;
            }
        };
        match normalize_one(raw, questions.len() + 1) {
            Some(q) => questions.push(q),
            None => tracing::debug!("Skipping question that failed normalization"),
        }
    }

    if total > quota {
        tracing::debug!("Truncated {} generated questions to quota {}", total, quota);
    }

    questions
}
