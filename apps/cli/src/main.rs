//! Daily batch runner.
//!
//! One invocation ingests one fetched snapshot CSV, merges it into the
//! persisted columnar store, recomputes the analytics, and writes the
//! dashboard payload. Scheduling (the daily cron) and the fetch itself are
//! external.

mod config;
mod ingest;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use wealthwatch_core::inflation::{InflationError, InflationIndexSeries};
use wealthwatch_core::records::partition_valid;
use wealthwatch_core::series::{aggregate, merge_batch};
use wealthwatch_core::summary::{build_dashboard_payload, DashboardPayload, EquivalencyBenchmarks};
use wealthwatch_core::{Error, FileStore};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::from_env();

    let batch_file = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => bail!("usage: wealthwatch <batch.csv>"),
    };

    run(&config, &batch_file)
}

fn run(config: &Config, batch_file: &Path) -> anyhow::Result<()> {
    let files = FileStore::open(&config.data_dir)?;
    let mut store = files.load()?;
    info!(
        "Loaded store from {} ({} dates, {} records)",
        config.data_dir.display(),
        store.dates().len(),
        store.record_count()
    );

    let (records, batch_date) = ingest::read_batch_csv(batch_file)?;
    let (valid, rejected) = partition_valid(records, batch_date);
    for (record, error) in &rejected {
        warn!("Dropping record '{}': {}", record.entity_id, error);
    }
    if valid.is_empty() {
        bail!("no valid records in batch for {}", batch_date);
    }

    // The pre-merge aggregate is the "prior run" baseline for deltas.
    let prior = if store.is_empty() {
        None
    } else {
        Some(aggregate(&store, config.min_worth_millions))
    };

    let outcome = merge_batch(&mut store, &valid, batch_date)?;
    files.commit_date(&store, batch_date)?;
    info!(
        "Merged {} records for {} ({} in-batch duplicates, correction: {})",
        outcome.result.appended, batch_date, outcome.result.skipped, outcome.superseded
    );

    let series = aggregate(&store, config.min_worth_millions);
    let index = load_index(config)?;
    let benchmarks = EquivalencyBenchmarks::default();

    let payload = match build_dashboard_payload(
        &series,
        index.as_ref(),
        prior.as_ref(),
        &benchmarks,
    ) {
        Ok(payload) => payload,
        Err(Error::Inflation(InflationError::IndexCoverage { requested, earliest })) => {
            warn!(
                "Index does not cover {} (starts {}); writing nominal-only payload",
                requested, earliest
            );
            build_dashboard_payload(&series, None, prior.as_ref(), &benchmarks)?
        }
        Err(e) => return Err(e.into()),
    };

    write_payload(&config.output_file, &payload)?;

    let summary = &payload.nominal.summary;
    info!(
        "Dashboard updated: {} entities, ${:.1}T total, {:.1}% CAGR, {:.1}% since {}",
        summary.entity_count,
        summary.end_value,
        summary.annual_growth_rate_pct,
        summary.total_increase_pct,
        summary.period_start
    );

    Ok(())
}

fn load_index(config: &Config) -> anyhow::Result<Option<InflationIndexSeries>> {
    let path = match &config.index_file {
        Some(path) => path,
        None => return Ok(None),
    };
    let pairs = ingest::read_index_csv(path)?;
    let index = InflationIndexSeries::from_pairs(pairs)
        .with_context(|| format!("building index series from {}", path.display()))?;
    Ok(Some(index))
}

fn write_payload(path: &Path, payload: &DashboardPayload) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(payload)?;
    std::fs::write(&tmp, bytes)
        .with_context(|| format!("writing {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("publishing {}", path.display()))?;
    Ok(())
}

fn init_tracing() {
    let log_format = std::env::var("WW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}
