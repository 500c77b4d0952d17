//! Domain events runtime bridge for the web server.
//!
//! Receives domain events via `DomainEventSink` after a payout transition has
//! committed and hands approvals to the disbursement executor. Nothing here
//! can roll back a committed transition.

mod queue_worker;
mod sink;

pub use sink::WebDomainEventSink;
