//! Domain events module.
//!
//! Provides domain event types and the sink trait for emitting events after
//! a payout transition has committed. Runtime adapters implement the sink to
//! hand events to collaborators such as the funds-transfer executor.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
