use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transcript and metadata as returned by a content source, before caching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchedContent {
    pub title: String,
    pub channel: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub duration_seconds: Option<i64>,
    #[serde(default)]
    pub transcript: String,
}

/// A cache entry. At most one exists per content key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub content_key: String,
    pub content: FetchedContent,
    pub body_length: usize,
    pub cached_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub access_count: i64,
}
