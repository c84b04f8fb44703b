//! Bounded pool for long backend mutations.
//!
//! Work runs on tokio tasks, at most `workers` at a time. The outcome is
//! applied to the task list through the render loop, never directly.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::app::App;
use crate::docker::BackendError;
use crate::models::TaskId;
use crate::render_loop::Updater;

pub struct TaskQueue {
    permits: Arc<Semaphore>,
    updater: Updater<App>,
}

impl TaskQueue {
    pub fn new(workers: usize, updater: Updater<App>) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers.max(1))),
            updater,
        }
    }

    /// Run `work` for task `id` once a worker is free.
    /// A panicking worker is reported as a failed task.
    pub fn submit<Fut>(&self, id: TaskId, work: Fut)
    where
        Fut: Future<Output = Result<(), BackendError>> + Send + 'static,
    {
        let permits = self.permits.clone();
        let updater = self.updater.clone();

        tokio::spawn(async move {
            let outcome = match permits.acquire_owned().await {
                Ok(_permit) => match tokio::spawn(work).await {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(e)) => Err(e.to_string()),
                    Err(e) => Err(BackendError::Aborted(e.to_string()).to_string()),
                },
                Err(_) => Err("task queue closed".to_string()),
            };
            debug!(task = id, ok = outcome.is_ok(), "task finished");

            updater.submit(move |app: &mut App| app.panels.tasks.finish(id, outcome));
        });
    }
}
