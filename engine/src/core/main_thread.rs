//! Deferred work queue drained once per frame on the main thread

use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Cloneable handle to a FIFO of tasks that must run on the main thread.
///
/// Any context may `submit`; only the frame loop calls `execute`.
#[derive(Clone, Default)]
pub struct MainThreadQueue {
    tasks: Arc<Mutex<Vec<Task>>>,
}

impl MainThreadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task for the next `execute` call
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(task));
    }

    /// Run every task queued so far, in submission order.
    ///
    /// The batch is taken under the lock and run after it is released, so a
    /// task may submit more work; that work runs on the following call.
    pub fn execute(&self) -> usize {
        let batch = std::mem::take(&mut *self.tasks.lock().unwrap_or_else(PoisonError::into_inner));
        let count = batch.len();
        for task in batch {
            task();
        }
        if count > 0 {
            trace!(count, "Executed main thread tasks");
        }
        count
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for MainThreadQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainThreadQueue")
            .field("pending", &self.len())
            .finish()
    }
}
