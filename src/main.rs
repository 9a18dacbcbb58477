use anyhow::Result;
use clap::Parser;
use farmstat::cli::{Cli, Command};
use farmstat::memory_store::MemoryStore;
use farmstat::report;
use farmstat::store::TelemetryStore;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let mut store = MemoryStore::from_path(&args.data)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Workers => report::list_workers(&store, &mut out)?,
        Command::Builders => report::list_builders(&store, &mut out)?,
        Command::Builds(sel) => report::list_builds(
            &store,
            &mut out,
            sel.category.as_deref(),
            sel.pattern.as_deref(),
        )?,
        Command::BuildInfo { ids } => report::build_info(&store, &mut out, &ids)?,
        Command::WorkerEfficiency { worker } => {
            report::worker_utilization(&store, &mut out, worker.as_deref())?;
        }
        Command::BuilderDurations(args) => report::builder_durations(
            &store,
            &mut out,
            args.statistic,
            args.builder.as_deref(),
            args.category.as_deref(),
            args.pattern.as_deref(),
        )?,
        Command::TruncateBuildMetadata => store.truncate_build_metadata()?,
        Command::TruncateLogMetadata => store.truncate_log_metadata()?,
    }

    Ok(())
}
