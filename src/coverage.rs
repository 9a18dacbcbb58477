//! Interval coverage analysis for worker utilization
//!
//! Given the (start, end) build intervals observed on one worker, computes
//! how much of the worker's observed span was actually spent running builds.
//! Overlapping intervals are merged before summing, so concurrent builds on
//! the same worker never inflate the used time.

/// Utilization of a single worker over its observed span
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utilization {
    /// Latest observed end minus earliest observed start, in seconds
    pub total_span: u64,
    /// Seconds covered by at least one build interval
    pub used: u64,
    /// Seconds of the span covered by no interval; always `total_span - used`
    pub idle: u64,
    /// `used / total_span * 100`; 100.0 for a zero-length span
    pub efficiency: f64,
}

/// Merge overlapping or touching intervals into disjoint runs
///
/// Input order is irrelevant. Runs are returned sorted by start.
pub fn merge(intervals: &[(u64, u64)]) -> Vec<(u64, u64)> {
    let mut sorted = intervals.to_vec();
    // Lexicographic tuple order is (start, end), so degenerate zero-length
    // intervals aggregate predictably.
    sorted.sort_unstable();

    let mut runs: Vec<(u64, u64)> = Vec::new();
    for &(start, end) in &sorted {
        match runs.last_mut() {
            Some(run) if start <= run.1 => run.1 = run.1.max(end),
            _ => runs.push((start, end)),
        }
    }
    runs
}

/// Analyze one worker's build intervals
///
/// Returns `None` for an empty interval set: the worker has no data and must
/// be skipped by the caller rather than reported with a misleading
/// efficiency. `min`/`max` are taken over the whole set, not the first and
/// last interval after sorting by start, since `end` is not monotonic in
/// `start`.
pub fn analyze(intervals: &[(u64, u64)]) -> Option<Utilization> {
    if intervals.is_empty() {
        return None;
    }

    let earliest = intervals.iter().map(|&(s, _)| s).min()?;
    let latest = intervals.iter().map(|&(_, e)| e).max()?;
    let total_span = latest.saturating_sub(earliest);

    let used: u64 = merge(intervals)
        .iter()
        .map(|&(s, e)| e.saturating_sub(s))
        .sum();

    if total_span == 0 {
        // A single zero-length interval, or all intervals identical.
        return Some(Utilization {
            total_span: 0,
            used,
            idle: 0,
            efficiency: 100.0,
        });
    }

    // Idle is derived, never independently accumulated.
    let idle = total_span - used;
    let efficiency = used as f64 / total_span as f64 * 100.0;

    Some(Utilization {
        total_span,
        used,
        idle,
        efficiency,
    })
}
