//! Outbound port for payout domain events.

use super::DomainEvent;

/// Receives payout events once the transition behind them has committed.
///
/// `emit()` must not block. Adapters queue the event and hand it to the
/// funds-transfer collaborator elsewhere; a failed hand-off is logged and
/// never reported back to the caller.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}

/// Records emitted events so service tests can assert on them.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: std::sync::Arc<std::sync::Mutex<Vec<DomainEvent>>>,
}

#[cfg(test)]
impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[cfg(test)]
impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.events.lock().unwrap().push(event);
    }
}
