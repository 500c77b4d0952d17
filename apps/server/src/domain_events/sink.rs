//! Web domain event sink implementation.
//!
//! Receives domain events and sends them to a background queue worker.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use ajo_core::disbursement::DisbursementExecutorTrait;
use ajo_core::events::{DomainEvent, DomainEventSink};

use super::queue_worker::event_queue_worker;

/// Domain event sink for the web server runtime.
///
/// # Two-Phase Initialization
///
/// The payout service needs the sink at construction time, while the worker
/// needs the executor. The sink is created first with `new()`, which only
/// creates the channel; `start_worker()` spawns the worker once the rest of
/// the state is built. Events emitted in between are buffered.
pub struct WebDomainEventSink {
    tx: mpsc::UnboundedSender<DomainEvent>,
    rx: Mutex<Option<mpsc::UnboundedReceiver<DomainEvent>>>,
}

impl WebDomainEventSink {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Starts the background worker. Later calls are ignored.
    pub fn start_worker(&self, executor: Arc<dyn DisbursementExecutorTrait>) {
        let rx = match self.rx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match rx {
            Some(rx) => {
                tokio::spawn(event_queue_worker(rx, executor));
            }
            None => tracing::warn!("Domain event worker already started"),
        }
    }

    /// Creates a sink with just the sender; the caller owns the receiver.
    #[cfg(test)]
    pub fn with_sender(tx: mpsc::UnboundedSender<DomainEvent>) -> Self {
        Self {
            tx,
            rx: Mutex::new(None),
        }
    }
}

impl Default for WebDomainEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainEventSink for WebDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        // Best effort: the transition is already committed.
        if let Err(e) = self.tx.send(event) {
            tracing::warn!("Failed to emit domain event: {}", e);
        }
    }
}
