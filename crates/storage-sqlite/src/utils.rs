//! Column codecs for values SQLite has no native type for.
//!
//! Money and rates are stored as TEXT so no precision is lost, and calendar
//! dates as `%Y-%m-%d` TEXT so they sort lexicographically.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use ajo_core::constants::TRACKING_NUMBER_LENGTH;
use ajo_core::errors::{Error, Result, ValidationError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_decimal(value: &str, field: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        log::error!("Stored {} '{}' is not a decimal: {}", field, value, e);
        Error::Validation(ValidationError::DecimalParse(e))
    })
}

pub fn parse_optional_decimal(value: Option<&str>, field: &str) -> Result<Option<Decimal>> {
    value.map(|v| parse_decimal(v, field)).transpose()
}

pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        log::error!("Stored {} '{}' is not a date: {}", field, value, e);
        Error::Validation(ValidationError::DateTimeParse(e))
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn decimal_to_db(value: Decimal) -> String {
    value.normalize().to_string()
}

/// A random all-digit tracking number shown to customers.
pub fn generate_tracking_number() -> String {
    let modulus = 10u128.pow(TRACKING_NUMBER_LENGTH as u32);
    format!(
        "{:0width$}",
        Uuid::new_v4().as_u128() % modulus,
        width = TRACKING_NUMBER_LENGTH
    )
}
