//! In-process stand-in for the external model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{AppError, Result};

use super::client::QuestionModel;

enum Reply {
    Body(String),
    Fail(String),
}

/// Answers prompts from a script keyed by a marker found in the prompt.
pub struct ScriptedModel {
    replies: Vec<(String, Reply, Duration)>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self {
            replies: Vec::new(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Answer `body` to any prompt containing `marker`.
    pub fn respond(self, marker: &str, body: &str) -> Self {
        self.respond_after(marker, body, Duration::ZERO)
    }

    /// Like `respond`, but only after `delay`.
    pub fn respond_after(mut self, marker: &str, body: &str, delay: Duration) -> Self {
        self.replies
            .push((marker.to_string(), Reply::Body(body.to_string()), delay));
        self
    }

    /// Fail any prompt containing `marker`.
    pub fn fail(mut self, marker: &str) -> Self {
        self.replies.push((
            marker.to_string(),
            Reply::Fail("quota exceeded".to_string()),
            Duration::ZERO,
        ));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QuestionModel for ScriptedModel {
    async fn complete(&self, _system: &str, user: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(user.to_string());

        let hit = self
            .replies
            .iter()
            .find(|(marker, _, _)| user.contains(marker.as_str()));
        let Some((_, reply, delay)) = hit else {
            return Err(AppError::ModelApi("no scripted response".to_string()));
        };

        if !delay.is_zero() {
            tokio::time::sleep(*delay).await;
        }
        match reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Fail(e) => Err(AppError::ModelApi(e.clone())),
        }
    }

    fn model_version(&self) -> &str {
        "scripted"
    }
}

/// A JSON array of well-formed questions with the given texts.
pub fn question_json(texts: &[&str]) -> String {
    let items: Vec<serde_json::Value> = texts
        .iter()
        .map(|t| {
            serde_json::json!({
                "question": t,
                "options": ["A) one", "B) two", "C) three", "D) four"],
                "correctAnswer": "B",
                "topic": "Basics"
            })
        })
        .collect();
    serde_json::to_string(&items).unwrap()
}
