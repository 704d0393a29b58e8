use textwrap::Options;

use crate::error::Result;
use crate::models::AnswerLetter;
use crate::services::QuizOutcome;

pub fn render_json(outcome: &QuizOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

/// Plain-text quiz with an answer key at the end, wrapped to `width` columns.
pub fn render_text(outcome: &QuizOutcome, width: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", outcome.title));
    out.push_str(&format!("{}\n\n", "=".repeat(outcome.title.chars().count().min(width))));

    if outcome.quiz.is_empty() {
        out.push_str("No questions could be generated for this content.\n");
        return out;
    }

    for q in &outcome.quiz.questions {
        let label = format!("{}. ", q.id);
        let indent = " ".repeat(label.len());
        let question_opts = Options::new(width)
            .initial_indent(&label)
            .subsequent_indent(&indent);
        out.push_str(&textwrap::fill(&q.question, question_opts));
        out.push_str(&format!("  [{}]\n", q.topic));

        for (letter, option) in AnswerLetter::ALL.iter().zip(&q.options) {
            let first = format!("{}   {}) ", indent, letter);
            let rest = " ".repeat(first.len());
            let opts = Options::new(width)
                .initial_indent(&first)
                .subsequent_indent(&rest);
            out.push_str(&textwrap::fill(option, opts));
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str("Answers: ");
    let key: Vec<String> = outcome
        .quiz
        .questions
        .iter()
        .map(|q| format!("{}{}", q.id, q.correct_answer))
        .collect();
    out.push_str(&key.join(" "));
    out.push('\n');
    out
}
