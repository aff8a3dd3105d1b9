use crate::common::SwapError;
use alloy::primitives::U256;
use alloy::primitives::utils::{format_units, parse_units};

/// Human-readable amount → smallest units. Negative and zero amounts are rejected.
pub fn parse_amount(input: &str, decimals: u8) -> Result<U256, SwapError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(SwapError::InvalidAmount("amount is empty".to_string()));
    }
    if raw.starts_with('-') {
        return Err(SwapError::InvalidAmount(format!("{raw} is negative")));
    }

    let value = parse_units(raw, decimals)
        .map_err(|e| SwapError::InvalidAmount(format!("{raw}: {e}")))?
        .get_absolute();
    if value.is_zero() {
        return Err(SwapError::InvalidAmount(format!("{raw} must be greater than zero")));
    }
    Ok(value)
}

/// Smallest units → display string, "0.01" rather than "0.010000000000000000"
pub fn format_amount(value: U256, decimals: u8) -> String {
    let Ok(formatted) = format_units(value, decimals) else {
        return value.to_string();
    };
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') { format!("{trimmed}0") } else { trimmed.to_string() }
}
