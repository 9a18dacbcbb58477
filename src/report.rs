//! Report rendering
//!
//! Every report is plain tab-separated text, one logical record per line,
//! written to a caller-supplied sink. Output is a pure function of store
//! contents: running the same report twice against unchanged data yields
//! byte-identical text.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::io::Write;

use tracing::debug;

use crate::coverage;
use crate::error::{Error, Result};
use crate::select;
use crate::stats::{self, Statistic, StatisticValue};
use crate::store::{BuildId, TelemetryStore, Worker};

/// List all workers as `id`/`name` rows sorted by (name, id)
pub fn list_workers(store: &dyn TelemetryStore, out: &mut impl Write) -> Result<()> {
    let mut workers = store.workers()?;
    workers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    for worker in workers {
        writeln!(out, "{}\t{}", worker.id, worker.name)?;
    }
    Ok(())
}

/// List all builders as `id`/`name`/`category` rows sorted by (name, id)
pub fn list_builders(store: &dyn TelemetryStore, out: &mut impl Write) -> Result<()> {
    let mut builders = store.builders()?;
    builders.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    for builder in builders {
        writeln!(out, "{}\t{}\t{}", builder.id, builder.name, builder.category)?;
    }
    Ok(())
}

/// List the selected build ids, ascending, one per line
pub fn list_builds(
    store: &dyn TelemetryStore,
    out: &mut impl Write,
    category: Option<&str>,
    pattern: Option<&str>,
) -> Result<()> {
    for id in select::select_build_ids(store, category, pattern)? {
        writeln!(out, "{id}")?;
    }
    Ok(())
}

/// Print the stored fields of each requested build
///
/// A missing record is reported per id and skipped; the batch continues.
pub fn build_info(
    store: &dyn TelemetryStore,
    out: &mut impl Write,
    ids: &[BuildId],
) -> Result<()> {
    for &id in ids {
        match store.build_record(id)? {
            Some(record) => {
                for (name, value) in record.fields() {
                    writeln!(out, "{name}\t{value}")?;
                }
            }
            None => writeln!(out, "No info found for id {id}")?,
        }
    }
    Ok(())
}

/// Per-worker utilization table
///
/// Rows are sorted by (name, id) under a fixed header. Workers with no
/// build intervals are skipped, except an explicitly named worker, which
/// gets a visible message instead of a silent omission.
pub fn worker_utilization(
    store: &dyn TelemetryStore,
    out: &mut impl Write,
    worker: Option<&str>,
) -> Result<()> {
    let mut workers = store.workers()?;
    if let Some(name) = worker {
        workers.retain(|w| w.name == name);
        if workers.is_empty() {
            writeln!(out, "no worker named {name}")?;
            return Ok(());
        }
    }
    workers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    writeln!(out, "worker\ttotal\tused\tidle\tefficiency")?;

    for w in workers {
        match coverage::analyze(&worker_intervals(store, &w)?) {
            Some(report) => writeln!(
                out,
                "{}\t{}\t{}\t{}\t{:.1}",
                w.name, report.total_span, report.used, report.idle, report.efficiency
            )?,
            None if worker.is_some() => {
                writeln!(out, "no build data for worker {}", w.name)?;
            }
            None => debug!(worker = %w.name, "worker has no build data, skipping"),
        }
    }
    Ok(())
}

fn worker_intervals(store: &dyn TelemetryStore, worker: &Worker) -> Result<Vec<(u64, u64)>> {
    let mut intervals = Vec::new();
    for id in store.build_ids_on_worker(worker.id)? {
        match store.build_record(id)? {
            Some(record) => intervals.push((record.start_time, record.end_time)),
            None => debug!(build = id, "no record for indexed build, skipping"),
        }
    }
    Ok(intervals)
}

/// Per-builder duration statistic
///
/// Targets are either one explicit builder or the selector's matches.
/// Scalar rows are `value`/`name` sorted ascending by value (a ranked list);
/// histogram rows are `name`-first and sorted by name, since ranking a
/// multi-bucket row by value is meaningless.
pub fn builder_durations(
    store: &dyn TelemetryStore,
    out: &mut impl Write,
    statistic: Statistic,
    builder: Option<&str>,
    category: Option<&str>,
    pattern: Option<&str>,
) -> Result<()> {
    let single_target = builder.is_some();
    let names: Vec<String> = match builder {
        Some(name) => vec![name.to_string()],
        None => {
            let names: BTreeSet<String> = select::matching_builders(store, category, pattern)?
                .into_iter()
                .map(|b| b.name)
                .collect();
            names.into_iter().collect()
        }
    };
    debug!(builders = names.len(), %statistic, "aggregating builder durations");

    // (sort key, rendered value, builder name)
    let mut scalar_rows: Vec<(f64, String, String)> = Vec::new();

    for name in names {
        let durations: Vec<u64> = store
            .build_durations_for_builder(&name)?
            .into_iter()
            .map(|(_, duration)| duration)
            .collect();

        match stats::aggregate(&durations, statistic) {
            Ok(StatisticValue::Count(count)) => {
                scalar_rows.push((count as f64, count.to_string(), name));
            }
            Ok(StatisticValue::Scalar(value)) => {
                scalar_rows.push((value, format!("{value:.2}"), name));
            }
            Ok(StatisticValue::Histogram(buckets)) => {
                // Builder names arrive sorted, so histogram rows are already
                // in name order.
                write!(out, "{name}")?;
                for bucket in buckets {
                    write!(out, "\t{}:{:.1}", bucket.count, bucket.lower_bound)?;
                }
                writeln!(out)?;
            }
            Err(Error::EmptyInput) if single_target => {
                writeln!(out, "no duration data for builder {name}")?;
            }
            Err(Error::EmptyInput) => {
                debug!(builder = %name, "no durations, skipping row");
            }
            Err(e) => return Err(e),
        }
    }

    scalar_rows.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.2.cmp(&b.2))
    });
    for (_, value, name) in scalar_rows {
        writeln!(out, "{value}\t{name}")?;
    }
    Ok(())
}
