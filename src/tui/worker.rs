//! Background prediction worker.
//!
//! The HTTP exchange runs on its own thread so the TUI keeps drawing while a
//! request is in flight. Outcomes come back over a channel tagged with the
//! submission's generation; the controller decides whether they still apply.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::Submission;
use crate::domain::PredictionResult;
use crate::ports::{ApiError, PredictionApi};

/// Progress updates from the prediction worker.
#[derive(Debug, Clone)]
pub enum PredictionProgress {
    /// Request is on the wire
    Sending,
    /// Exchange finished
    Complete {
        generation: u64,
        outcome: Result<PredictionResult, ApiError>,
    },
}

/// Handle to a running prediction worker.
pub struct PredictionWorkerHandle {
    pub generation: u64,
    progress_rx: Receiver<PredictionProgress>,
    _handle: JoinHandle<()>,
}

impl PredictionWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    ///
    /// # Errors
    /// `TryRecvError::Empty` while nothing is queued, and
    /// `TryRecvError::Disconnected` once the worker thread is gone.
    pub fn try_recv(&self) -> Result<PredictionProgress, TryRecvError> {
        self.progress_rx.try_recv()
    }
}

/// Runs one prediction exchange in the background.
pub struct PredictionWorker;

impl PredictionWorker {
    /// Spawn a thread that sends `submission` exactly once.
    pub fn spawn<A>(api: Arc<A>, submission: Submission) -> PredictionWorkerHandle
    where
        A: PredictionApi + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let generation = submission.generation;

        let handle = thread::spawn(move || {
            Self::run(api.as_ref(), submission, &tx);
        });

        PredictionWorkerHandle {
            generation,
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run<A: PredictionApi>(api: &A, submission: Submission, tx: &Sender<PredictionProgress>) {
        let _ = tx.send(PredictionProgress::Sending);

        let outcome = api.predict(&submission.request);
        if let Err(e) = &outcome {
            tracing::debug!(generation = submission.generation, error = %e, "Worker exchange failed");
        }

        // Receiver may be gone if the app quit mid-request.
        let _ = tx.send(PredictionProgress::Complete {
            generation: submission.generation,
            outcome,
        });
    }
}
