use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use super::business_model::BusinessConfig;
use super::business_traits::{BusinessConfigProviderTrait, BusinessConfigRepositoryTrait};
use crate::commission::CommissionError;
use crate::errors::Result;

/// Commission configuration backed by the repository, with a default rate for
/// businesses that never configured one.
pub struct BusinessConfigService {
    repository: Arc<dyn BusinessConfigRepositoryTrait>,
    default_rate: Decimal,
}

impl BusinessConfigService {
    pub fn new(
        repository: Arc<dyn BusinessConfigRepositoryTrait>,
        default_rate: Decimal,
    ) -> Result<Self> {
        if default_rate < Decimal::ZERO || default_rate > Decimal::ONE {
            return Err(CommissionError::InvalidRate(default_rate.to_string()).into());
        }
        Ok(Self {
            repository,
            default_rate,
        })
    }

    pub fn default_rate(&self) -> Decimal {
        self.default_rate
    }
}

impl BusinessConfigProviderTrait for BusinessConfigService {
    fn commission_config(&self, business_id: &str) -> Result<BusinessConfig> {
        match self.repository.get_config(business_id)? {
            Some(config) => {
                config.validate()?;
                Ok(config)
            }
            None => {
                debug!(
                    "No commission config for business {}, using default rate {}",
                    business_id, self.default_rate
                );
                Ok(BusinessConfig {
                    business_id: business_id.to_string(),
                    commission_rate: self.default_rate,
                    agent_id: None,
                })
            }
        }
    }
}
