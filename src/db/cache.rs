use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::{ContentRecord, FetchedContent};

use super::schema::SCHEMA;

const SELECT_RECORD: &str = "SELECT content_key, title, channel, published_at, duration_seconds, body, body_length, cached_at, last_accessed_at, access_count FROM content_cache WHERE content_key = ?1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: i64,
    pub total_accesses: i64,
}

/// Transcript cache keyed by content key.
///
/// Records expire once `cached_at` is older than the retention window,
/// regardless of how often they are read. All statements run on the single
/// connection thread, so concurrent hits on one key never lose an increment.
pub struct ContentCache {
    conn: Connection,
    retention: Duration,
}

impl ContentCache {
    pub async fn open(db_path: &str, retention: Duration) -> Result<Self> {
        let conn = Connection::open(db_path).await?;
        Self::init(conn, retention).await
    }

    #[cfg(test)]
    pub async fn open_in_memory(retention: Duration) -> Result<Self> {
        let conn = Connection::open_in_memory().await?;
        Self::init(conn, retention).await
    }

    async fn init(conn: Connection, retention: Duration) -> Result<Self> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn, retention })
    }

    /// Returns the live record for `key`, bumping its access counter.
    ///
    /// Expired records are purged first, so they are never returned.
    pub async fn lookup(&self, key: &str) -> Result<Option<ContentRecord>> {
        let key = key.to_string();
        let now = Utc::now();
        let cutoff = format_timestamp(now - self.retention);
        let now = format_timestamp(now);

        let record = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    "DELETE FROM content_cache WHERE cached_at < ?1",
                    params![cutoff],
                )?;
                let touched = tx.execute(
                    "UPDATE content_cache SET access_count = access_count + 1, last_accessed_at = ?1 WHERE content_key = ?2",
                    params![now, key],
                )?;
                let record = if touched == 0 {
                    None
                } else {
                    tx.query_row(SELECT_RECORD, params![key], record_from_row)
                        .optional()?
                };
                tx.commit()?;
                Ok(record)
            })
            .await?;
        Ok(record)
    }

    /// Upserts the record for `key` with a fresh `cached_at`.
    ///
    /// The access counter of an existing record is carried over.
    pub async fn store(&self, key: &str, content: &FetchedContent) -> Result<()> {
        let key = key.to_string();
        let content = content.clone();
        let now = format_timestamp(Utc::now());
        let body_length = content.transcript.chars().count() as i64;

        self.conn
            .call(move |conn| {
                conn.execute(
                    r#"INSERT INTO content_cache
                           (content_key, title, channel, published_at, duration_seconds, body, body_length, cached_at, last_accessed_at, access_count)
                       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8, 0)
                       ON CONFLICT(content_key) DO UPDATE SET
                           title = excluded.title,
                           channel = excluded.channel,
                           published_at = excluded.published_at,
                           duration_seconds = excluded.duration_seconds,
                           body = excluded.body,
                           body_length = excluded.body_length,
                           cached_at = excluded.cached_at"#,
                    params![
                        key,
                        content.title,
                        content.channel,
                        content.published_at.map(format_timestamp),
                        content.duration_seconds,
                        content.transcript,
                        body_length,
                        now,
                    ],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    /// Deletes every record past the retention window.
    pub async fn purge_expired(&self) -> Result<usize> {
        let cutoff = format_timestamp(Utc::now() - self.retention);
        let purged = self
            .conn
            .call(move |conn| {
                let n = conn.execute(
                    "DELETE FROM content_cache WHERE cached_at < ?1",
                    params![cutoff],
                )?;
                Ok(n)
            })
            .await?;
        Ok(purged)
    }

    pub async fn stats(&self) -> Result<CacheStats> {
        let stats = self
            .conn
            .call(|conn| {
                let stats = conn.query_row(
                    "SELECT COUNT(*), COALESCE(SUM(access_count), 0) FROM content_cache",
                    [],
                    |row| {
                        Ok(CacheStats {
                            entries: row.get(0)?,
                            total_accesses: row.get(1)?,
                        })
                    },
                )?;
                Ok(stats)
            })
            .await?;
        Ok(stats)
    }
}

// Fixed width so that string comparison in SQL matches time order.
fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn record_from_row(row: &Row) -> rusqlite::Result<ContentRecord> {
    let published_at: Option<String> = row.get(3)?;
    let body_length: i64 = row.get(6)?;
    let cached_at: String = row.get(7)?;
    let last_accessed_at: String = row.get(8)?;

    Ok(ContentRecord {
        content_key: row.get(0)?,
        content: FetchedContent {
            title: row.get(1)?,
            channel: row.get(2)?,
            published_at: published_at.and_then(|s| parse_datetime(&s)),
            duration_seconds: row.get(4)?,
            transcript: row.get(5)?,
        },
        body_length: body_length.max(0) as usize,
        cached_at: parse_datetime(&cached_at).unwrap_or_else(Utc::now),
        last_accessed_at: parse_datetime(&last_accessed_at).unwrap_or_else(Utc::now),
        access_count: row.get(9)?,
    })
}
