//! Descriptive statistics over build durations
//!
//! One builder's build durations are reduced to a single selected statistic.
//! Scalar statistics are undefined on empty input; `count` is not. The
//! histogram bucketizes into a fixed number of equal-width buckets spanning
//! the observed range.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Number of equal-width histogram buckets
pub const HISTOGRAM_BUCKETS: usize = 15;

/// The descriptive statistic to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Count,
    Mean,
    Median,
    Stddev,
    Sum,
    Variance,
    Histogram,
}

impl Statistic {
    pub fn as_str(self) -> &'static str {
        match self {
            Statistic::Count => "count",
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::Stddev => "stddev",
            Statistic::Sum => "sum",
            Statistic::Variance => "variance",
            Statistic::Histogram => "histogram",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Statistic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "count" => Ok(Statistic::Count),
            "mean" => Ok(Statistic::Mean),
            "median" => Ok(Statistic::Median),
            "stddev" => Ok(Statistic::Stddev),
            "sum" => Ok(Statistic::Sum),
            "variance" => Ok(Statistic::Variance),
            "histogram" => Ok(Statistic::Histogram),
            other => Err(Error::UnsupportedStatistic(other.to_string())),
        }
    }
}

/// One histogram bucket: how many durations fell at or above its lower bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBucket {
    pub count: u64,
    pub lower_bound: f64,
}

/// Result of aggregating one builder's durations
#[derive(Debug, Clone, PartialEq)]
pub enum StatisticValue {
    Count(u64),
    Scalar(f64),
    /// Buckets in bucket order, lower bounds ascending
    Histogram(Vec<HistogramBucket>),
}

/// Reduce a sequence of durations (seconds) to the selected statistic
pub fn aggregate(durations: &[u64], statistic: Statistic) -> Result<StatisticValue> {
    match statistic {
        Statistic::Count => Ok(StatisticValue::Count(durations.len() as u64)),
        _ if durations.is_empty() => Err(Error::EmptyInput),
        Statistic::Histogram => Ok(StatisticValue::Histogram(histogram(durations))),
        Statistic::Sum => Ok(StatisticValue::Scalar(sum(durations))),
        Statistic::Mean => Ok(StatisticValue::Scalar(mean(durations))),
        Statistic::Median => Ok(StatisticValue::Scalar(median(durations))),
        Statistic::Variance => Ok(StatisticValue::Scalar(variance(durations))),
        Statistic::Stddev => Ok(StatisticValue::Scalar(variance(durations).sqrt())),
    }
}

fn sum(durations: &[u64]) -> f64 {
    durations.iter().map(|&d| d as f64).sum()
}

fn mean(durations: &[u64]) -> f64 {
    sum(durations) / durations.len() as f64
}

fn median(durations: &[u64]) -> f64 {
    let mut sorted = durations.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    }
}

/// Population variance: mean of squared deviations from the mean
fn variance(durations: &[u64]) -> f64 {
    let m = mean(durations);
    durations
        .iter()
        .map(|&d| {
            let delta = d as f64 - m;
            delta * delta
        })
        .sum::<f64>()
        / durations.len() as f64
}

/// Equal-width buckets spanning `[min, max]`; `max` lands in the last bucket
fn histogram(durations: &[u64]) -> Vec<HistogramBucket> {
    let min = durations.iter().copied().min().unwrap_or(0) as f64;
    let max = durations.iter().copied().max().unwrap_or(0) as f64;
    let width = (max - min) / HISTOGRAM_BUCKETS as f64;

    let mut counts = vec![0u64; HISTOGRAM_BUCKETS];
    for &d in durations {
        let index = if width == 0.0 {
            // All durations identical: everything counts in bucket 0.
            0
        } else {
            (((d as f64 - min) / width) as usize).min(HISTOGRAM_BUCKETS - 1)
        };
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBucket {
            count,
            lower_bound: min + i as f64 * width,
        })
        .collect()
}
