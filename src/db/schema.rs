pub const SCHEMA: &str = r#"
-- content_cache table (one row per content key)
CREATE TABLE IF NOT EXISTS content_cache (
    content_key TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    channel TEXT,
    published_at TEXT,
    duration_seconds INTEGER,
    body TEXT NOT NULL,
    body_length INTEGER NOT NULL,
    cached_at TEXT NOT NULL,
    last_accessed_at TEXT NOT NULL,
    access_count INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_content_cache_cached_at ON content_cache(cached_at);
"#;
