/// Decimal places used for money amounts (commission rounding, display).
pub const CURRENCY_DECIMAL_PRECISION: u32 = 2;

/// Prefix of external payout request references.
pub const PAYOUT_REFERENCE_PREFIX: &str = "PR";

/// Number of digits in a savings account tracking number.
pub const TRACKING_NUMBER_LENGTH: usize = 10;

/// Commission rate applied when a business has no configuration of its own.
pub const DEFAULT_COMMISSION_RATE: &str = "0.02";
