//! Render-context worker
//!
//! Some native graphics APIs are context/thread-affine: resources must be
//! created on the thread owning the context. The load session therefore
//! pins all graphics-resource creation to one `ContextWorker` for the
//! duration of a loading pass, submitting closures to the worker's queue
//! and blocking on the result.

use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

type Job = Box<dyn FnOnce() + Send>;

/// A worker thread that executes submitted closures in order, all on the
/// same OS thread.
pub struct ContextWorker {
    tx: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl Default for ContextWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextWorker {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<Job>();
        let handle = std::thread::spawn(move || {
            for job in rx {
                job();
            }
        });
        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Run a closure on the worker thread and block until it returns.
    pub fn run<R, F>(&self, job: F) -> R
    where
        R: Send + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        self.tx
            .as_ref()
            .expect("context worker shut down")
            .send(Box::new(move || {
                let _ = tx.send(job());
            }))
            .expect("context worker disconnected");
        rx.recv().expect("context worker dropped job")
    }
}

impl Drop for ContextWorker {
    fn drop(&mut self) {
        // Closing the queue lets the worker drain and exit.
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
