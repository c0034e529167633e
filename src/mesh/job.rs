use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use crate::foundation::error::{StudioError, StudioResult};
use crate::mesh::grid::GridMesh;
use crate::mesh::pixels::PixelBuffer;
use crate::mesh::synth::{SynthConfig, synthesize_with_cancel};
use crate::mesh::transfer::GenMode;

/// Shared cancellation flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, not-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Result of polling a [`SynthesisJob`].
#[derive(Debug)]
pub enum JobPoll {
    /// Still running.
    Pending,
    /// Finished; the job is spent.
    Ready(StudioResult<GridMesh>),
}

/// Mesh synthesis running on the rayon pool.
///
/// Once [`SynthesisJob::cancel`] has been called the job never yields a mesh, even if the
/// worker already finished.
#[derive(Debug)]
pub struct SynthesisJob {
    cancel: CancelToken,
    rx: mpsc::Receiver<StudioResult<GridMesh>>,
    done: bool,
}

impl SynthesisJob {
    /// Start synthesizing `pixels` in the background.
    pub fn spawn(pixels: PixelBuffer, mode: GenMode, config: SynthConfig) -> Self {
        let cancel = CancelToken::new();
        let (tx, rx) = mpsc::sync_channel(1);
        let worker_cancel = cancel.clone();
        rayon::spawn(move || {
            let res = synthesize_with_cancel(&pixels, mode, &config, &worker_cancel);
            // Receiver may be gone if the job was dropped; nothing to report then.
            let _ = tx.send(res);
        });
        Self {
            cancel,
            rx,
            done: false,
        }
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Non-blocking check for completion.
    pub fn poll(&mut self) -> JobPoll {
        if self.done {
            return JobPoll::Ready(Err(StudioError::validation(
                "synthesis job result already taken",
            )));
        }
        match self.rx.try_recv() {
            Ok(res) => {
                self.done = true;
                JobPoll::Ready(self.gate(res))
            }
            Err(mpsc::TryRecvError::Empty) => JobPoll::Pending,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.done = true;
                JobPoll::Ready(Err(StudioError::cancelled(
                    "synthesis worker exited without a result",
                )))
            }
        }
    }

    /// Block until the worker finishes.
    pub fn wait(mut self) -> StudioResult<GridMesh> {
        if self.done {
            return Err(StudioError::validation("synthesis job result already taken"));
        }
        self.done = true;
        let res = self
            .rx
            .recv()
            .map_err(|_| StudioError::cancelled("synthesis worker exited without a result"))?;
        self.gate(res)
    }

    fn gate(&self, res: StudioResult<GridMesh>) -> StudioResult<GridMesh> {
        if self.cancel.is_cancelled() {
            return Err(StudioError::cancelled("synthesis job was discarded"));
        }
        res
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/job.rs"]
mod tests;
