//! Event queue worker for processing domain events.
//!
//! Events are handled one at a time in emission order. Approvals become
//! disbursement instructions for the executor; everything else is logged.

use std::sync::Arc;

use tokio::sync::mpsc;

use ajo_core::disbursement::{DisbursementExecutorTrait, DisbursementInstruction};
use ajo_core::events::DomainEvent;

pub async fn event_queue_worker(
    mut rx: mpsc::UnboundedReceiver<DomainEvent>,
    executor: Arc<dyn DisbursementExecutorTrait>,
) {
    tracing::info!("Domain event queue worker started");

    while let Some(event) = rx.recv().await {
        process_event(&event, executor.as_ref()).await;
    }

    tracing::info!("Domain event queue worker stopped");
}

pub(crate) async fn process_event(event: &DomainEvent, executor: &dyn DisbursementExecutorTrait) {
    let Some(instruction) = DisbursementInstruction::from_event(event) else {
        tracing::info!(request_id = %event.request_id(), "Payout event: {:?}", event);
        return;
    };

    match executor.execute(&instruction).await {
        Ok(receipt) => tracing::info!(
            request_id = %instruction.request_id,
            reference = %receipt.reference,
            "Disbursement executed"
        ),
        // The approval stands; the failed transfer goes to reconciliation.
        Err(e) => tracing::error!(
            request_id = %instruction.request_id,
            reference = %instruction.reference,
            net_amount = %instruction.net_amount,
            "Disbursement failed, needs reconciliation: {}",
            e
        ),
    }
}
