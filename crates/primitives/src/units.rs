//! Conversions between wei amounts and human-readable ether strings

use crate::constants::units::ETHER_DECIMALS;
use ethers::{
    types::U256,
    utils::{format_units, parse_units, ConversionError},
};
use thiserror::Error;

/// Unit conversion errors
#[derive(Debug, Error)]
pub enum UnitsError {
    /// The amount is not a decimal number with at most 18 fractional digits
    #[error("{input} is not a valid ether amount: {inner}")]
    InvalidAmount {
        /// The rejected input
        input: String,
        /// The inner error message
        inner: String,
    },

    /// The wei amount could not be formatted
    #[error("cannot format {amount} wei: {inner}")]
    Format {
        /// The amount in wei
        amount: U256,
        /// The inner error message
        inner: String,
    },
}

/// Formats an amount in wei as ether, keeping at least one fractional digit.
///
/// `1000000000000000000` becomes `"1.0"` and `1500000000000000000` becomes `"1.5"`.
pub fn format_ether(amount: U256) -> Result<String, UnitsError> {
    let formatted = format_units(amount, ETHER_DECIMALS)
        .map_err(|e: ConversionError| UnitsError::Format { amount, inner: e.to_string() })?;
    Ok(trim_fraction(&formatted))
}

/// Parses a decimal ether amount (e.g. `"1.5"`) into wei.
///
/// Only plain decimal numbers are accepted. Amounts with more than 18 fractional digits are
/// rejected instead of being rounded down.
pub fn parse_ether(amount: &str) -> Result<U256, UnitsError> {
    let trimmed = amount.trim();
    if let Err(inner) = check_decimal(trimmed) {
        return Err(UnitsError::InvalidAmount { input: amount.into(), inner: inner.into() });
    }
    parse_units(trimmed, ETHER_DECIMALS)
        .map(Into::into)
        .map_err(|e| UnitsError::InvalidAmount { input: amount.into(), inner: e.to_string() })
}

fn check_decimal(amount: &str) -> Result<(), &'static str> {
    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (amount, None),
    };
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    if whole.is_empty() && fraction.map_or(true, str::is_empty) {
        return Err("expected a non-negative decimal number");
    }
    if !is_digits(whole) || !fraction.map_or(true, is_digits) {
        return Err("expected a non-negative decimal number");
    }
    if fraction.is_some_and(|f| f.len() > ETHER_DECIMALS as usize) {
        return Err("too many decimal places");
    }
    Ok(())
}

fn trim_fraction(formatted: &str) -> String {
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{formatted}.0"),
    }
}
