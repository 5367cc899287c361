//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits live here.

use super::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, category, customer, staff
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, item observations
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, CPF, garnish labels
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Per-line quantity ceiling
pub const MAX_QUANTITY: i32 = 9999;

/// Price ceiling (R$ 1.000.000)
pub const MAX_PRICE: f64 = 1_000_000.0;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Validate a price: finite, non-negative and below [`MAX_PRICE`]
pub fn validate_price(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::with_message(
            shared::ErrorCode::ProductInvalidPrice,
            format!("{field} must be a finite, non-negative amount"),
        ));
    }
    if value > MAX_PRICE {
        return Err(AppError::with_message(
            shared::ErrorCode::ProductInvalidPrice,
            format!("{field} exceeds maximum allowed ({MAX_PRICE})"),
        ));
    }
    Ok(())
}

/// Validate a line quantity (1..=MAX_QUANTITY)
pub fn validate_quantity(value: i32, field: &str) -> Result<(), AppError> {
    if !(1..=MAX_QUANTITY).contains(&value) {
        return Err(AppError::with_message(
            shared::ErrorCode::ValueOutOfRange,
            format!("{field} must be between 1 and {MAX_QUANTITY}"),
        ));
    }
    Ok(())
}

/// Validate every entry of a string list
pub fn validate_text_list(values: &[String], field: &str, max_len: usize) -> Result<(), AppError> {
    for value in values {
        validate_required_text(value, field, max_len)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Feijoada", "nome", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "nome", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"a".repeat(201), "nome", MAX_NAME_LEN).is_err());
        // Accented chars count once
        assert!(validate_required_text(&"ã".repeat(200), "nome", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "endereco", MAX_ADDRESS_LEN).is_ok());
        let long = Some("x".repeat(501));
        assert!(validate_optional_text(&long, "endereco", MAX_ADDRESS_LEN).is_err());
    }

    #[test]
    fn test_price() {
        assert!(validate_price(0.0, "preco").is_ok());
        let err = validate_price(-1.0, "preco").unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductInvalidPrice);
        assert!(validate_price(f64::INFINITY, "preco").is_err());
        assert!(validate_price(f64::NAN, "preco").is_err());
        assert!(validate_price(MAX_PRICE + 1.0, "preco").is_err());
    }

    #[test]
    fn test_quantity() {
        assert!(validate_quantity(1, "quantidade").is_ok());
        assert!(validate_quantity(9999, "quantidade").is_ok());
        assert_eq!(
            validate_quantity(0, "quantidade").unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
        assert!(validate_quantity(10_000, "quantidade").is_err());
    }
}
