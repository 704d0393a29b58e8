mod ai;
mod config;
mod db;
mod error;
mod models;
mod output;
mod quiz;
mod services;

use clap::Parser;

use ai::ClaudeClient;
use config::Config;
use db::ContentCache;
use error::{AppError, Result};
use models::Difficulty;
use quiz::{parse_question_count, ChunkPlanner, QuizPipeline};
use services::{FileContentSource, QuizService};

const DEFAULT_QUESTION_COUNT: usize = 10;
const OUTPUT_WIDTH: usize = 80;

/// Turn a video transcript into a multiple-choice quiz.
///
/// Transcripts are read from the configured transcripts directory as
/// `<content-key>.toml` or `<content-key>.txt` and cached in SQLite.
#[derive(Debug, Parser)]
#[command(name = "quiz-forge", version)]
struct Cli {
    /// Key of the transcript to build a quiz from.
    #[arg(required_unless_present_any = ["purge_cache", "cache_stats"])]
    content_key: Option<String>,

    /// Number of questions to generate.
    #[arg(
        long,
        default_value_t = DEFAULT_QUESTION_COUNT,
        value_parser = parse_question_count,
        allow_negative_numbers = true
    )]
    count: usize,

    /// Question difficulty: easy, medium or hard.
    #[arg(long, default_value_t = Difficulty::Medium, value_parser = parse_difficulty)]
    difficulty: Difficulty,

    /// Print the quiz as JSON instead of wrapped text.
    #[arg(long)]
    json: bool,

    /// Delete cached transcripts past the retention window and exit.
    #[arg(long, conflicts_with_all = ["content_key", "cache_stats"])]
    purge_cache: bool,

    /// Show cache entry and hit counts and exit.
    #[arg(long, conflicts_with = "content_key")]
    cache_stats: bool,
}

fn parse_difficulty(raw: &str) -> Result<Difficulty> {
    raw.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let cache = ContentCache::open(&config.db_path, config.retention()).await?;

    if cli.purge_cache {
        let purged = cache.purge_expired().await?;
        println!("Purged {} expired cache entries", purged);
        return Ok(());
    }

    if cli.cache_stats {
        let stats = cache.stats().await?;
        println!(
            "{} cached transcripts, {} cache hits",
            stats.entries, stats.total_accesses
        );
        return Ok(());
    }

    let content_key = cli
        .content_key
        .ok_or_else(|| AppError::InvalidInput("missing content key".to_string()))?;

    let pipeline = QuizPipeline::new(
        ClaudeClient::new(&config)?,
        ChunkPlanner::new(&config.chunking),
        config.max_questions,
    );
    let source = FileContentSource::new(&config.transcripts_dir);
    let service = QuizService::new(cache, source, pipeline);

    let outcome = service
        .quiz_for(&content_key, cli.count, cli.difficulty)
        .await?;
    if cli.json {
        println!("{}", output::render_json(&outcome)?);
    } else {
        print!("{}", output::render_text(&outcome, OUTPUT_WIDTH));
    }

    Ok(())
}
