//! In-memory telemetry store hydrated from a JSON snapshot
//!
//! The production deployment of this data set lives in a wide-column store;
//! reporting only ever consumes the narrow interface in [`crate::store`].
//! `MemoryStore` implements that interface over a snapshot file so the CLI
//! runs against exported data, and maintains the same derived indices the
//! backing store keeps (category to build ids, builder name to build ids,
//! worker to build ids, durations by builder name).

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::store::{
    BuildId, BuildRecord, Builder, BuilderId, TelemetryStore, Worker, WorkerId,
};

/// Snapshot file layout. Field names follow the upstream build JSON.
#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    workers: Vec<SnapshotWorker>,
    #[serde(default)]
    builders: Vec<SnapshotBuilder>,
    #[serde(default)]
    builds: Vec<SnapshotBuild>,
}

#[derive(Debug, Deserialize)]
struct SnapshotWorker {
    id: WorkerId,
    name: String,
}

#[derive(Debug, Deserialize)]
struct SnapshotBuilder {
    id: BuilderId,
    name: String,
    category: String,
}

#[derive(Debug, Deserialize)]
struct SnapshotBuild {
    id: BuildId,
    builder_id: BuilderId,
    worker_id: WorkerId,
    starttime: u64,
    endtime: u64,
    #[serde(default)]
    revision: Option<String>,
}

/// In-memory [`TelemetryStore`] implementation
#[derive(Debug, Default)]
pub struct MemoryStore {
    workers: BTreeMap<WorkerId, Worker>,
    builders: BTreeMap<BuilderId, Builder>,
    builds: BTreeMap<BuildId, BuildRecord>,
    ids_by_category: BTreeMap<String, BTreeSet<BuildId>>,
    ids_by_builder_name: BTreeMap<String, BTreeSet<BuildId>>,
    ids_by_worker: BTreeMap<WorkerId, BTreeSet<BuildId>>,
    durations_by_builder_name: BTreeMap<String, Vec<(BuildId, u64)>>,
}

impl MemoryStore {
    /// Load a snapshot from a file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Load a snapshot from a JSON string
    pub fn from_json(raw: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(raw)?;
        Self::from_snapshot(snapshot)
    }

    fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut store = Self::default();

        for w in snapshot.workers {
            store.workers.insert(w.id, Worker { id: w.id, name: w.name });
        }

        for b in snapshot.builders {
            store.builders.insert(
                b.id,
                Builder {
                    id: b.id,
                    name: b.name,
                    category: b.category,
                },
            );
        }

        for b in snapshot.builds {
            let builder = store.builders.get(&b.builder_id).ok_or_else(|| {
                Error::Snapshot(format!(
                    "build {} references unknown builder {}",
                    b.id, b.builder_id
                ))
            })?;

            let record = BuildRecord {
                id: b.id,
                builder_id: b.builder_id,
                worker_id: b.worker_id,
                start_time: b.starttime,
                end_time: b.endtime,
                builder_name: builder.name.clone(),
                builder_category: builder.category.clone(),
                revision: b.revision,
            };
            store.index_build(&record);
            store.builds.insert(record.id, record);
        }

        // Duration listings are keyed by builder name and ordered by build id.
        for durations in store.durations_by_builder_name.values_mut() {
            durations.sort_unstable_by_key(|&(id, _)| id);
        }

        debug!(
            workers = store.workers.len(),
            builders = store.builders.len(),
            builds = store.builds.len(),
            "snapshot loaded"
        );
        Ok(store)
    }

    fn index_build(&mut self, record: &BuildRecord) {
        self.ids_by_category
            .entry(record.builder_category.clone())
            .or_default()
            .insert(record.id);
        self.ids_by_builder_name
            .entry(record.builder_name.clone())
            .or_default()
            .insert(record.id);
        self.ids_by_worker
            .entry(record.worker_id)
            .or_default()
            .insert(record.id);
        self.durations_by_builder_name
            .entry(record.builder_name.clone())
            .or_default()
            .push((record.id, record.duration()));
    }
}

impl TelemetryStore for MemoryStore {
    fn workers(&self) -> Result<Vec<Worker>> {
        Ok(self.workers.values().cloned().collect())
    }

    fn builders(&self) -> Result<Vec<Builder>> {
        Ok(self.builders.values().cloned().collect())
    }

    fn build_ids_in_category(&self, category: &str) -> Result<BTreeSet<BuildId>> {
        Ok(self
            .ids_by_category
            .get(category)
            .cloned()
            .unwrap_or_default())
    }

    fn build_ids_with_builder_name(&self, name: &str) -> Result<BTreeSet<BuildId>> {
        Ok(self
            .ids_by_builder_name
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    fn build_record(&self, id: BuildId) -> Result<Option<BuildRecord>> {
        Ok(self.builds.get(&id).cloned())
    }

    fn build_ids_on_worker(&self, worker: WorkerId) -> Result<BTreeSet<BuildId>> {
        Ok(self.ids_by_worker.get(&worker).cloned().unwrap_or_default())
    }

    fn build_durations_for_builder(&self, name: &str) -> Result<Vec<(BuildId, u64)>> {
        Ok(self
            .durations_by_builder_name
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    fn truncate_build_metadata(&mut self) -> Result<()> {
        self.workers.clear();
        self.builders.clear();
        self.builds.clear();
        self.ids_by_category.clear();
        self.ids_by_builder_name.clear();
        self.ids_by_worker.clear();
        self.durations_by_builder_name.clear();
        debug!("build metadata truncated");
        Ok(())
    }

    fn truncate_log_metadata(&mut self) -> Result<()> {
        // Log-derived metadata (parsed step timelines) never reaches this
        // store; the operation exists so callers can clear a store that
        // predates that split. Nothing to remove here.
        debug!("log metadata truncated");
        Ok(())
    }
}
