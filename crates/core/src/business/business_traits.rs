use async_trait::async_trait;

use super::business_model::{BusinessConfig, PayoutDestination};
use crate::errors::Result;

/// Persistence for business commission settings.
#[async_trait]
pub trait BusinessConfigRepositoryTrait: Send + Sync {
    fn get_config(&self, business_id: &str) -> Result<Option<BusinessConfig>>;

    async fn upsert_config(&self, config: BusinessConfig) -> Result<BusinessConfig>;
}

/// Resolves the commission settings that apply to a business.
pub trait BusinessConfigProviderTrait: Send + Sync {
    /// Always yields a configuration, falling back to the platform default rate.
    fn commission_config(&self, business_id: &str) -> Result<BusinessConfig>;
}

#[async_trait]
pub trait PayoutDestinationRepositoryTrait: Send + Sync {
    fn get_destination(&self, destination_id: &str) -> Result<Option<PayoutDestination>>;

    async fn create_destination(&self, destination: PayoutDestination)
        -> Result<PayoutDestination>;
}
