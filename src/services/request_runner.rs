//! Background request runner
//!
//! Runs each blocking gateway call on its own worker thread and hands the
//! result back to the UI loop through a channel. Every request carries the
//! ticket it was issued under so the owner can tell current completions from
//! stale ones. Nothing is ever cancelled; stale results are simply dropped by
//! whoever polls.
//!
//! A request that panics, or whose worker thread cannot be started, still
//! produces exactly one completion, carrying `Err` with the cause.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

/// Name given to every worker thread
pub const WORKER_THREAD_NAME: &str = "request-worker";

/// A finished request together with the ticket it was issued under
#[derive(Debug)]
pub struct Completion<T> {
    pub ticket: u64,
    /// `Err` when the request died without producing a result
    pub result: Result<T, String>,
}

/// Spawns requests and collects their completions
pub struct RequestRunner<T> {
    sender: Sender<Completion<T>>,
    receiver: Receiver<Completion<T>>,
    /// Requests spawned but not yet collected by `poll`
    in_flight: usize,
}

impl<T: Send + 'static> Default for RequestRunner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> RequestRunner<T> {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Run `request` on a worker thread, tagging its result with `ticket`
    pub fn spawn<F>(&mut self, ticket: u64, request: F)
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let tx = self.sender.clone();
        self.in_flight += 1;

        let spawned = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(request))
                    .map_err(|payload| format!("request panicked: {}", panic_message(&*payload)));
                // The receiver is gone only when the owning view was dropped.
                let _ = tx.send(Completion { ticket, result });
            });

        if let Err(err) = spawned {
            tracing::error!(ticket, %err, "could not start request worker");
            let _ = self.sender.send(Completion {
                ticket,
                result: Err(format!("could not start request worker: {}", err)),
            });
        }
    }

    /// Collect every completion that has arrived since the last poll
    pub fn poll(&mut self) -> Vec<Completion<T>> {
        let mut completions = Vec::new();

        loop {
            match self.receiver.try_recv() {
                Ok(completion) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    completions.push(completion);
                }
                Err(TryRecvError::Empty) => break,
                // We hold a sender ourselves, so this cannot happen while `self` lives.
                Err(TryRecvError::Disconnected) => break,
            }
        }

        completions
    }

    /// Number of requests whose completion has not been collected yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

/// True on a thread started by `RequestRunner`
pub fn on_worker_thread() -> bool {
    thread::current().name() == Some(WORKER_THREAD_NAME)
}
