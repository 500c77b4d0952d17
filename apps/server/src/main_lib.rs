use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use ajo_core::{
    business::{
        BusinessConfigRepositoryTrait, BusinessConfigService, PayoutDestinationRepositoryTrait,
    },
    completion::{CompletionService, CompletionServiceTrait},
    disbursement::LoggingDisbursementExecutor,
    payouts::{PayoutService, PayoutServiceTrait},
    savings::{LedgerService, LedgerServiceTrait},
};
use ajo_storage_sqlite::{
    db, BusinessConfigRepository, LedgerRepository, PayoutDestinationRepository,
    PayoutRepository, SqliteLedgerUnitOfWork,
};

use crate::{config::Config, domain_events::WebDomainEventSink};

pub struct AppState {
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
    pub completion_service: Arc<dyn CompletionServiceTrait>,
    pub payout_service: Arc<dyn PayoutServiceTrait>,
    /// Written by the business onboarding collaborator; read here for commission.
    pub business_config_repository: Arc<dyn BusinessConfigRepositoryTrait>,
    pub destination_repository: Arc<dyn PayoutDestinationRepositoryTrait>,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let ledger_repository = Arc::new(LedgerRepository::new(pool.clone(), writer.clone()));
    let payout_repository = Arc::new(PayoutRepository::new(pool.clone()));
    let business_config_repository =
        Arc::new(BusinessConfigRepository::new(pool.clone(), writer.clone()));
    let destination_repository =
        Arc::new(PayoutDestinationRepository::new(pool.clone(), writer.clone()));

    let event_sink = Arc::new(WebDomainEventSink::new());

    let ledger_service = Arc::new(LedgerService::new(ledger_repository.clone()));
    let completion_service = Arc::new(CompletionService::new(ledger_repository.clone()));
    let business_config_service = Arc::new(BusinessConfigService::new(
        business_config_repository.clone(),
        config.default_commission_rate,
    )?);

    let payout_service = Arc::new(PayoutService::new(
        SqliteLedgerUnitOfWork::new(writer.clone()),
        ledger_repository.clone(),
        payout_repository.clone(),
        completion_service.clone(),
        business_config_service,
        destination_repository.clone(),
        event_sink.clone(),
    ));

    event_sink.start_worker(Arc::new(LoggingDisbursementExecutor));
    tracing::info!("Ledger state ready (database: {})", db_path);

    Ok(Arc::new(AppState {
        ledger_service,
        completion_service,
        payout_service,
        business_config_repository,
        destination_repository,
    }))
}
