//! Extraction command handler for the CLI.
//!
//! Reads targets from a file or stdin, drives one job with production timing,
//! streams status lines to stderr while the job runs, and prints a results
//! table. Sentiment analysis is opt-in and needs a configured classifier key;
//! without one the run still succeeds and the analysis step is skipped.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use futures::future::join_all;

use looter_core::Platform;
use looter_extract::{
    parse_csv_targets, parse_handles, JobRunner, JobTiming, RandomProvider, ResultStore,
};
use looter_sentiment::{enrich_record, SentimentClient};

#[derive(Debug, Args)]
pub(crate) struct ExtractArgs {
    /// Target platform: ig, tk, or x
    #[arg(long)]
    pub(crate) platform: String,

    /// Read targets from this file instead of stdin
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,

    /// Treat the input as CSV with a "handle" or "link" column
    #[arg(long)]
    pub(crate) csv: bool,

    /// Classify each result's description after extraction
    #[arg(long)]
    pub(crate) analyze: bool,
}

pub(crate) async fn run_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let platform: Platform = args.platform.parse()?;

    let raw = match &args.file {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => std::io::read_to_string(std::io::stdin())?,
    };

    let targets = if args.csv {
        parse_csv_targets(&raw)?
    } else {
        parse_handles(&raw)
    };

    if targets.is_empty() {
        println!("no targets found in input; nothing to do");
        return Ok(());
    }

    let config = looter_core::load_app_config()?;
    let store = ResultStore::new();
    let runner = JobRunner::new(
        Arc::new(RandomProvider),
        store.clone(),
        JobTiming::from_millis(
            config.connect_delay_ms,
            config.extract_delay_ms,
            config.status_linger_ms,
        ),
    );

    // Stream status transitions while the job runs.
    let mut status_rx = runner.subscribe();
    let status_task = tokio::spawn(async move {
        while status_rx.changed().await.is_ok() {
            let message = status_rx.borrow_and_update().message.clone();
            if let Some(message) = message {
                eprintln!("{message}");
            }
        }
    });

    let report = runner.run(platform, &targets).await?;
    status_task.abort();

    if args.analyze {
        analyze_all(&config, &store, &report.records).await?;
    }

    print_results(&store.recent(report.requested));
    println!(
        "extraction complete: {} records for {}",
        report.requested,
        platform.label()
    );
    Ok(())
}

/// Enrich every record of the batch concurrently.
async fn analyze_all(
    config: &looter_core::AppConfig,
    store: &ResultStore,
    records: &[looter_core::PostRecord],
) -> anyhow::Result<()> {
    let Some(key) = &config.gemini_api_key else {
        tracing::warn!("GEMINI_API_KEY not set; skipping sentiment analysis");
        return Ok(());
    };

    let client = Arc::new(SentimentClient::new(
        key,
        &config.gemini_model,
        config.sentiment_timeout_secs,
    )?);

    let tasks = records.iter().map(|record| {
        let client = Arc::clone(&client);
        let store = store.clone();
        let id = record.id;
        async move { enrich_record(&client, &store, id).await }
    });

    let updated = join_all(tasks).await.into_iter().filter(|ok| *ok).count();
    println!(
        "sentiment analysis updated {updated} of {} records",
        records.len()
    );
    Ok(())
}

fn print_results(records: &[looter_core::PostRecord]) {
    println!(
        "{:<24} {:>10} {:>8} {:>9}  {}",
        "USER", "FOLLOWERS", "LIKES", "COMMENTS", "SENTIMENT"
    );
    for record in records {
        let comments = record
            .comments
            .map_or_else(|| "-".to_owned(), |c| c.to_string());
        let sentiment = record
            .sentiment
            .map_or("analyzing...", looter_core::Sentiment::as_str);
        println!(
            "@{:<23} {:>10} {:>8} {:>9}  {}",
            record.username, record.followers, record.likes, comments, sentiment
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
