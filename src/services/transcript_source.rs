use std::future::Future;
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::models::FetchedContent;

/// Origin of transcripts and their metadata.
pub trait ContentSource: Send + Sync {
    fn fetch(&self, content_key: &str) -> impl Future<Output = Result<FetchedContent>> + Send;
}

/// Reads transcripts from a directory.
///
/// `<key>.toml` holds `title`, `transcript` and optional `channel`,
/// `published_at` (RFC 3339 string) and `duration_seconds`. A bare
/// `<key>.txt` is used as the transcript when no TOML file exists, with the
/// key as title.
pub struct FileContentSource {
    dir: PathBuf,
}

impl FileContentSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

fn validate_key(content_key: &str) -> Result<()> {
    let valid = !content_key.is_empty()
        && content_key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "content key '{}' may only contain letters, digits, '-' and '_'",
            content_key
        )))
    }
}

impl ContentSource for FileContentSource {
    async fn fetch(&self, content_key: &str) -> Result<FetchedContent> {
        validate_key(content_key)?;

        let toml_path = self.dir.join(format!("{}.toml", content_key));
        if tokio::fs::try_exists(&toml_path).await? {
            let raw = tokio::fs::read_to_string(&toml_path).await?;
            let content: FetchedContent = toml::from_str(&raw)?;
            tracing::debug!("Loaded {} ({} chars)", toml_path.display(), content.transcript.len());
            return Ok(content);
        }

        let txt_path = self.dir.join(format!("{}.txt", content_key));
        if tokio::fs::try_exists(&txt_path).await? {
            let transcript = tokio::fs::read_to_string(&txt_path).await?;
            return Ok(FetchedContent {
                title: content_key.to_string(),
                transcript,
                ..FetchedContent::default()
            });
        }

        Err(anyhow::anyhow!(
            "no transcript for '{}' in {}",
            content_key,
            self.dir.display()
        )
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_toml_with_metadata() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("abc123.toml"),
            r#"
title = "Lifetimes Explained"
channel = "Rust Talks"
published_at = "2024-03-01T12:00:00Z"
duration_seconds = 1800
transcript = "Today we talk about lifetimes."
"#,
        )
        .unwrap();

        let content = FileContentSource::new(dir.path()).fetch("abc123").await.unwrap();
        assert_eq!(content.title, "Lifetimes Explained");
        assert_eq!(content.channel.as_deref(), Some("Rust Talks"));
        assert_eq!(content.duration_seconds, Some(1800));
        assert!(content.published_at.is_some());
        assert_eq!(content.transcript, "Today we talk about lifetimes.");
    }

    #[tokio::test]
    async fn toml_without_transcript_is_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("silent.toml"), "title = \"No captions\"\n").unwrap();

        let content = FileContentSource::new(dir.path()).fetch("silent").await.unwrap();
        assert_eq!(content.transcript, "");
    }

    #[tokio::test]
    async fn falls_back_to_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("plain.txt"), "just words").unwrap();

        let content = FileContentSource::new(dir.path()).fetch("plain").await.unwrap();
        assert_eq!(content.title, "plain");
        assert_eq!(content.transcript, "just words");
    }

    #[tokio::test]
    async fn rejects_path_like_keys_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileContentSource::new(dir.path());
        assert!(matches!(
            source.fetch("../etc/passwd").await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(source.fetch("missing").await.is_err());
    }
}
