use rust_decimal::{Decimal, RoundingStrategy};

use super::commission_errors::CommissionError;
use super::commission_model::CommissionSplit;
use crate::constants::CURRENCY_DECIMAL_PRECISION;
use crate::errors::Result;

/// Computes the commission retained on `gross` at `rate`.
///
/// The commission is rounded to currency precision with banker's rounding and
/// the net is derived by subtraction, so no minor unit is lost or created.
pub fn calculate_commission(gross: Decimal, rate: Decimal) -> Result<CommissionSplit> {
    if gross < Decimal::ZERO {
        return Err(CommissionError::NegativeGross(gross.to_string()).into());
    }
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(CommissionError::InvalidRate(rate.to_string()).into());
    }

    let commission = (gross * rate)
        .round_dp_with_strategy(CURRENCY_DECIMAL_PRECISION, RoundingStrategy::MidpointNearestEven);
    let net = gross - commission;

    Ok(CommissionSplit {
        gross,
        rate,
        commission,
        net,
    })
}
