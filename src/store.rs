//! Telemetry store interface and record types
//!
//! The store that holds build-farm telemetry (workers, builders, builds and
//! their derived indices) is an external collaborator. This module defines
//! the interface the reporting pipeline consumes from it; `memory_store`
//! provides the in-process implementation used by the CLI and tests.

use std::collections::BTreeSet;

use crate::error::Result;

/// Stable, store-assigned identifier of a worker machine
pub type WorkerId = u64;
/// Stable, store-assigned identifier of a builder (job definition)
pub type BuilderId = u64;
/// Stable, store-assigned identifier of one build execution
pub type BuildId = u64;

/// A machine that executes builds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    pub id: WorkerId,
    /// Human-readable name. Not guaranteed unique over time, but treated as
    /// unique within a single query.
    pub name: String,
}

/// A named, categorized job definition that produces builds over time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builder {
    pub id: BuilderId,
    pub name: String,
    /// Coarse grouping label (e.g. a platform or test suite)
    pub category: String,
}

/// One execution instance of a builder
///
/// Timestamps are epoch seconds. `end_time >= start_time` is a store-data
/// invariant; a violating record is store corruption, not handled here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecord {
    pub id: BuildId,
    pub builder_id: BuilderId,
    pub worker_id: WorkerId,
    pub start_time: u64,
    pub end_time: u64,
    /// Denormalized from the owning builder, mirroring the store layout
    pub builder_name: String,
    pub builder_category: String,
    pub revision: Option<String>,
}

impl BuildRecord {
    /// Wall-clock duration of the build in seconds
    pub fn duration(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }

    /// The record as an ordered field/value mapping, sorted by field name
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("builder_category", self.builder_category.clone()),
            ("builder_id", self.builder_id.to_string()),
            ("builder_name", self.builder_name.clone()),
            ("duration", self.duration().to_string()),
            ("endtime", self.end_time.to_string()),
            ("id", self.id.to_string()),
            ("starttime", self.start_time.to_string()),
            ("worker_id", self.worker_id.to_string()),
        ];
        if let Some(rev) = &self.revision {
            fields.push(("revision", rev.clone()));
        }
        fields.sort_by(|a, b| a.0.cmp(b.0));
        fields
    }
}

/// Read access to build-farm telemetry, plus explicit truncation operations
///
/// All listing methods return data in no particular order; callers sort for
/// output. Truncation is destructive and must be invoked at most once per
/// command, never interleaved with a read in the same invocation.
pub trait TelemetryStore {
    /// All known workers
    fn workers(&self) -> Result<Vec<Worker>>;

    /// All known builders
    fn builders(&self) -> Result<Vec<Builder>>;

    /// Ids of all builds whose builder has exactly this category
    fn build_ids_in_category(&self, category: &str) -> Result<BTreeSet<BuildId>>;

    /// Ids of all builds of the builder with exactly this name
    fn build_ids_with_builder_name(&self, name: &str) -> Result<BTreeSet<BuildId>>;

    /// The full record for one build, if the store has it
    fn build_record(&self, id: BuildId) -> Result<Option<BuildRecord>>;

    /// Ids of all builds that ran on the worker
    fn build_ids_on_worker(&self, worker: WorkerId) -> Result<BTreeSet<BuildId>>;

    /// `(build id, duration seconds)` pairs for one builder name
    fn build_durations_for_builder(&self, name: &str) -> Result<Vec<(BuildId, u64)>>;

    /// Remove all build metadata and its derived indices. Idempotent.
    fn truncate_build_metadata(&mut self) -> Result<()>;

    /// Remove all log-derived metadata. Idempotent.
    fn truncate_log_metadata(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> BuildRecord {
        BuildRecord {
            id: 7,
            builder_id: 3,
            worker_id: 12,
            start_time: 100,
            end_time: 160,
            builder_name: "linux-opt".to_string(),
            builder_category: "linux".to_string(),
            revision: None,
        }
    }

    #[test]
    fn test_duration() {
        assert_eq!(record().duration(), 60);
    }

    #[test]
    fn test_duration_saturates_on_corrupt_record() {
        let mut r = record();
        r.end_time = 50;
        assert_eq!(r.duration(), 0);
    }

    #[test]
    fn test_fields_sorted_by_name() {
        let fields = record().fields();
        let names: Vec<_> = fields.iter().map(|(n, _)| *n).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_fields_include_store_field_names() {
        let mut r = record();
        r.revision = Some("abcdef".to_string());
        let fields = r.fields();
        let names: Vec<_> = fields.iter().map(|(n, _)| *n).collect();
        for required in ["starttime", "endtime", "builder_name", "revision"] {
            assert!(names.contains(&required), "missing field {required}");
        }
    }

    #[test]
    fn test_fields_omit_absent_revision() {
        let fields = record().fields();
        assert!(!fields.iter().any(|(n, _)| *n == "revision"));
    }
}
