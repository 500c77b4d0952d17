use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::commission::CommissionError;
use crate::errors::Result;

/// Commission settings of a business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessConfig {
    pub business_id: String,
    /// Fraction of the gross payout retained, within `[0, 1]`.
    pub commission_rate: Decimal,
    /// Agent credited with commissions earned by the business.
    pub agent_id: Option<String>,
}

impl BusinessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.commission_rate < Decimal::ZERO || self.commission_rate > Decimal::ONE {
            return Err(CommissionError::InvalidRate(self.commission_rate.to_string()).into());
        }
        Ok(())
    }
}

/// A customer's external payment account that receives payouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutDestination {
    pub id: String,
    pub customer_id: String,
}
