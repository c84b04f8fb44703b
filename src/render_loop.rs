//! Single-writer update scheduler.
//!
//! Every mutation of UI state goes through here. Background work (refresh
//! timers, task workers, inline backend calls) computes its result off the
//! loop and hands a callback to an [`Updater`]; the task that owns the state
//! drains the queue and runs callbacks one at a time, in the order they were
//! submitted. A callback that submits another one only enqueues it; it runs
//! after everything already queued.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::AppResult;

/// Deferred mutation of state `S`. Returning an error stops the loop.
pub type Callback<S> = Box<dyn FnOnce(&mut S) -> AppResult<()> + Send>;

/// Cloneable handle used by workers to queue callbacks
pub struct Updater<S> {
    tx: UnboundedSender<Callback<S>>,
}

impl<S> Clone for Updater<S> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<S: 'static> Updater<S> {
    /// Queue a callback. Returns false once the loop has shut down.
    pub fn submit<F>(&self, callback: F) -> bool
    where
        F: FnOnce(&mut S) -> AppResult<()> + Send + 'static,
    {
        if self.tx.send(Box::new(callback)).is_err() {
            tracing::debug!("render loop closed, dropping update");
            return false;
        }
        true
    }
}

/// Receiving side, owned by whoever owns the state
pub struct RenderLoop<S> {
    rx: UnboundedReceiver<Callback<S>>,
    updater: Updater<S>,
}

impl<S: 'static> RenderLoop<S> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            rx,
            updater: Updater { tx },
        }
    }

    pub fn updater(&self) -> Updater<S> {
        self.updater.clone()
    }

    /// Wait for the next queued callback
    pub async fn recv(&mut self) -> Option<Callback<S>> {
        self.rx.recv().await
    }

    /// Run everything currently queued, including callbacks queued by the
    /// callbacks themselves. Stops at the first failing callback.
    pub fn run_pending(&mut self, state: &mut S) -> AppResult<usize> {
        let mut ran = 0;
        while let Ok(callback) = self.rx.try_recv() {
            callback(state)?;
            ran += 1;
        }
        Ok(ran)
    }
}

impl<S: 'static> Default for RenderLoop<S> {
    fn default() -> Self {
        Self::new()
    }
}
