//! # Validation Module
//!
//! Input checks for clerk-entered values, applied at the UI boundary
//! before items reach the order aggregate.
//!
//! The aggregate itself never clamps: once an item exists, negative values
//! propagate arithmetically (returns/adjustments). These functions only
//! guard what the clerk types into the add-item form.

use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length for product and customer names.
const MAX_NAME_LEN: usize = 200;

/// Validates a clerk-entered quantity: must be strictly positive.
pub fn validate_quantity(quantity: Decimal) -> ValidationResult<()> {
    if quantity <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a clerk-entered unit price: zero is allowed (giveaways),
/// negative is not.
pub fn validate_unit_price(unit_price: Decimal) -> ValidationResult<()> {
    if unit_price < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit price".to_string(),
        });
    }
    Ok(())
}

/// Validates a product name: non-blank, bounded length.
///
/// Returns the trimmed name.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    validate_name(name, "product name")
}

/// Validates a customer name: non-blank, bounded length.
///
/// Customer lookup is by exact name, so the trimmed form is what gets
/// stored and queried.
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    validate_name(name, "customer name")
}

fn validate_name(name: &str, field: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(dec("1")).is_ok());
        assert!(validate_quantity(dec("0.125")).is_ok());

        assert!(validate_quantity(dec("0")).is_err());
        assert!(validate_quantity(dec("-1")).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(dec("25.50")).is_ok());
        assert!(validate_unit_price(dec("0")).is_ok());
        assert!(validate_unit_price(dec("-0.01")).is_err());
    }

    #[test]
    fn test_validate_names() {
        assert_eq!(validate_customer_name("  Maria  ").unwrap(), "Maria");
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
        assert_eq!(validate_product_name("Cimento CP-II").unwrap(), "Cimento CP-II");
    }
}
