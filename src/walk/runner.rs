//! Run orchestration - samples in, exports and summary out
//!
//! A run:
//! 1. Builds the samples (random, top-ranked, categories)
//! 2. Walks from every sampled article, `max-concurrent-walks` at a time
//! 3. Aggregates degree statistics per sample
//! 4. Writes CSV/SQLite exports and the markdown summary

use crate::config::Config;
use crate::output::{
    export_tables, generate_markdown_summary, RunSummary, SampleOutcome, SampleSummary,
};
use crate::sample::{collect_samples, SampleSet};
use crate::walk::engine::TraversalEngine;
use crate::walk::fetcher::{DocumentFetcher, HttpFetcher};
use crate::PhiloError;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::path::Path;

/// Walks from every record of a sample
///
/// Up to `concurrency` walks are in flight at once; results come back in
/// sample order. Each walk owns its own visited set.
pub async fn run_sample<F: DocumentFetcher>(
    engine: &TraversalEngine<F>,
    sample: &SampleSet,
    concurrency: usize,
) -> Vec<SampleOutcome> {
    let total = sample.records.len();
    tracing::info!("{}: walking from {} articles", sample.kind, total);

    let outcomes: Vec<SampleOutcome> = stream::iter(sample.records.iter().enumerate())
        .map(|(i, record)| async move {
            let outcome = engine.walk(&record.identifier).await;
            match outcome.degrees {
                Some(degrees) => tracing::info!(
                    "[{}/{}] {} -> {} in {} steps",
                    i + 1,
                    total,
                    outcome.display_title(),
                    engine.target_title(),
                    degrees
                ),
                None => tracing::info!(
                    "[{}/{}] {} failed: {}",
                    i + 1,
                    total,
                    outcome.display_title(),
                    outcome.reason
                ),
            }
            SampleOutcome {
                record: record.clone(),
                outcome,
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let succeeded = outcomes.iter().filter(|o| o.outcome.is_success()).count();
    tracing::info!(
        "{}: {}/{} walks reached {}",
        sample.kind,
        succeeded,
        total,
        engine.target_title()
    );

    outcomes
}

/// Runs every sample with the given engine and writes all outputs
///
/// # Arguments
///
/// * `engine` - The traversal engine; its fetcher also serves the ranking page
/// * `config` - The run configuration
/// * `config_hash` - Hash of the configuration file, recorded in the summary
///
/// # Returns
///
/// * `Ok(RunSummary)` - Walks finished and outputs were written
/// * `Err(PhiloError)` - An output could not be written
pub async fn run_with_engine<F: DocumentFetcher>(
    engine: &TraversalEngine<F>,
    config: &Config,
    config_hash: &str,
) -> Result<RunSummary, PhiloError> {
    let started_at = Utc::now();
    tracing::info!("Starting run at {}", started_at.to_rfc3339());

    let samples = collect_samples(engine.fetcher(), &config.sample).await;
    if samples.is_empty() {
        tracing::warn!("No samples to walk");
    }

    let concurrency = config.walker.max_concurrent_walks as usize;
    let mut results = Vec::with_capacity(samples.len());
    for sample in &samples {
        let outcomes = run_sample(engine, sample, concurrency).await;
        results.push((sample.kind, outcomes));
    }

    let summaries: Vec<SampleSummary> = results
        .iter()
        .map(|(kind, outcomes)| SampleSummary::from_outcomes(*kind, outcomes, &config.sample))
        .collect();

    export_tables(&config.output, &results)?;

    let finished_at = Utc::now();
    let summary = RunSummary {
        started_at: started_at.to_rfc3339(),
        finished_at: finished_at.to_rfc3339(),
        duration_seconds: (finished_at - started_at).num_seconds(),
        config_hash: config_hash.to_string(),
        target_title: engine.target_title().to_string(),
        max_steps: config.walker.max_steps,
        requests: engine.fetcher().request_count().await,
        samples: summaries,
    };

    generate_markdown_summary(&summary, Path::new(&config.output.summary_path))?;
    tracing::info!("Summary written to {}", config.output.summary_path);

    tracing::info!(
        "Run completed: {}/{} walks reached {} ({} requests)",
        summary.succeeded(),
        summary.attempted(),
        summary.target_title,
        summary.requests
    );

    Ok(summary)
}

/// Runs a full measurement against the configured server
///
/// # Example
///
/// ```no_run
/// use philo_walk::config::load_config_with_hash;
/// use philo_walk::walk::run_pipeline;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let (config, hash) = load_config_with_hash(Path::new("config.toml"))?;
/// let summary = run_pipeline(&config, &hash).await?;
/// println!("{} walks reached the target", summary.succeeded());
/// # Ok(())
/// # }
/// ```
pub async fn run_pipeline(config: &Config, config_hash: &str) -> Result<RunSummary, PhiloError> {
    let fetcher = HttpFetcher::new(&config.walker, &config.user_agent)?;
    let engine = TraversalEngine::new(fetcher, &config.walker);
    run_with_engine(&engine, config, config_hash).await
}
