//! Farmstat - build farm telemetry reporting
//!
//! Reports on which workers ran which jobs, how efficiently workers were
//! utilized over their observed span, and distribution statistics of build
//! durations per builder. Reporting consumes a narrow store interface; the
//! bundled in-memory store hydrates from a JSON snapshot.

pub mod cli;
pub mod coverage;
pub mod error;
pub mod memory_store;
pub mod report;
pub mod select;
pub mod stats;
pub mod store;
