use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::collector::CollectOptions;
use crate::engine::{RunOutcome, SplitEngine};
use crate::errors::{Result, SplitError};
use crate::events::EventSink;
use crate::run_slot::RunSlot;
use crate::split::SplitDirection;

pub const STATUS_BUSY: &str = "A run is already in progress, please wait";

const WORKER_THREAD_NAME: &str = "half-split-worker";

/// Starts runs on a background thread, at most one at a time.
///
/// Each runner owns its own busy state; two runners never block each other.
#[derive(Default)]
pub struct SplitRunner {
    options: CollectOptions,
    slot: RunSlot,
}

/// Handle to a run in flight.
pub struct RunHandle {
    cancel: CancellationToken,
    worker: JoinHandle<Result<RunOutcome>>,
}

impl SplitRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collect_options(mut self, options: CollectOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_busy(&self) -> bool {
        self.slot.is_active()
    }

    /// Blocks until the active run, if any, has released the runner.
    pub fn wait_idle(&self) {
        self.slot.wait_idle();
    }

    /// Spawns a run over `inputs`.
    ///
    /// While another run is active the request is dropped: `sink` receives a
    /// busy status and `SplitError::Busy` is returned. No `Done` is sent for a
    /// rejected request.
    pub fn start<S>(
        &self,
        inputs: Vec<String>,
        direction: SplitDirection,
        mut sink: S,
    ) -> Result<RunHandle>
    where
        S: EventSink + 'static,
    {
        let Some(guard) = self.slot.try_acquire() else {
            info!("rejecting run request while busy");
            sink.on_status(STATUS_BUSY);
            return Err(SplitError::Busy);
        };

        let engine = SplitEngine::new(direction).with_collect_options(self.options);
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();

        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let _guard = guard;
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    engine.run(inputs.as_slice(), &mut sink, &worker_cancel)
                }));

                result.map_err(|_| {
                    error!("split worker panicked");
                    sink.on_status("Error: unexpected failure, run aborted");
                    sink.on_done(false);
                    SplitError::WorkerPanicked
                })
            })
            .map_err(SplitError::WorkerSpawn)?;

        Ok(RunHandle { cancel, worker })
    }
}

impl RunHandle {
    /// Requests cooperative cancellation. The file being processed finishes first.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Waits for the run to finish.
    pub fn join(self) -> Result<RunOutcome> {
        self.worker
            .join()
            .map_err(|_| SplitError::WorkerPanicked)?
    }
}
