//! Input checks applied before anything reaches the oracle

use super::error::ExchangeError;

const MAX_IDENTIFIER_LEN: usize = 64;

/// Trims and lowercases an asset id or currency code.
///
/// Accepted identifiers are non-empty and made of ASCII letters, digits and
/// dashes, which is the vocabulary the oracle uses.
pub fn normalize_identifier(label: &str, raw: &str) -> Result<String, ExchangeError> {
    let value = raw.trim().to_lowercase();
    if value.is_empty() {
        return Err(ExchangeError::InvalidInput(format!("{label} must not be empty")));
    }
    if value.len() > MAX_IDENTIFIER_LEN {
        return Err(ExchangeError::InvalidInput(format!(
            "{label} is longer than {MAX_IDENTIFIER_LEN} characters"
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ExchangeError::InvalidInput(format!(
            "{label} contains unsupported characters: {raw}"
        )));
    }
    Ok(value)
}

pub fn validate_amount(amount: f64) -> Result<f64, ExchangeError> {
    if !amount.is_finite() {
        return Err(ExchangeError::InvalidInput(format!(
            "amount must be a finite number, got {amount}"
        )));
    }
    if amount < 0.0 {
        return Err(ExchangeError::InvalidInput(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    Ok(amount)
}
