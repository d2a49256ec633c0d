use crate::error::Result;
use crate::keystream::Keystream;
use crate::logger::Logger;
use crate::report::{FileOutcome, RunReport};
use crate::transcode::Transcoder;

use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Clone, Debug, Default)]
pub struct DistributeOptions {
    /// Fixed worker count. `None` derives it from available parallelism.
    pub workers: Option<usize>,
}

/// Parallelism reported by the OS; 1 when it cannot be determined.
pub fn detected_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// One core is left for the caller; never fewer than one worker.
pub fn worker_count(detected: usize) -> usize {
    detected.saturating_sub(1).max(1)
}

fn effective_workers(opts: Option<&DistributeOptions>) -> usize {
    match opts.and_then(|o| o.workers) {
        Some(w) => w.max(1),
        None => worker_count(detected_concurrency()),
    }
}

/// Static striding: worker `k` owns indices `k, k + workers, k + 2 * workers, ...`.
pub fn assignments(n: usize, workers: usize) -> Vec<Vec<usize>> {
    let workers = workers.max(1);
    (0..workers)
        .map(|k| (k..n).step_by(workers).collect())
        .collect()
}

/// Decode every path on a fixed pool of workers and wait for all of them.
///
/// Each worker walks its own assignment in index order, one file at a time.
/// Per-file failures land in the report; only failing to start the pool is
/// an error here.
pub fn distribute<F, K>(
    paths: &[PathBuf],
    transcoder: &Transcoder<F>,
    log: &dyn Logger,
    opts: Option<&DistributeOptions>,
) -> Result<RunReport>
where
    F: Fn() -> K + Sync,
    K: Keystream,
{
    let workers = effective_workers(opts);
    let plan = assignments(paths.len(), workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|k| format!("qmc-worker-{k}"))
        .build()?;
    info!(files = paths.len(), workers, "starting run");

    let mut slots: Vec<Vec<FileOutcome>> = (0..workers).map(|_| Vec::new()).collect();
    pool.scope(|s| {
        for (worker, (slot, indices)) in slots.iter_mut().zip(&plan).enumerate() {
            s.spawn(move |_| {
                debug!(worker, files = indices.len(), "worker started");
                *slot = indices
                    .iter()
                    .map(|&index| FileOutcome {
                        index,
                        input: paths[index].clone(),
                        result: transcoder.decode(&paths[index], log),
                    })
                    .collect();
            });
        }
    });

    let mut outcomes: Vec<FileOutcome> = slots.into_iter().flatten().collect();
    outcomes.sort_by_key(|o| o.index);

    let report = RunReport { workers, outcomes };
    info!(decoded = report.decoded(), failed = report.failed(), "run finished");
    Ok(report)
}
