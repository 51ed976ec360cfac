//! Validation for administrative writes
//!
//! Every check runs before the data store is touched.

use crate::error::{DomainError, DomainResult};
use crate::models::LocationCode;

// ============================================================================
// Capacity Validations
// ============================================================================

/// Capacities must be strictly positive
pub fn validate_max_cartons(max_cartons: i32) -> DomainResult<()> {
    if max_cartons <= 0 {
        return Err(DomainError::NonPositiveCapacity(i64::from(max_cartons)));
    }
    Ok(())
}

// ============================================================================
// Key Normalization
// ============================================================================

/// SKUs are trimmed but keep their case
pub fn normalize_sku(raw: &str) -> DomainResult<String> {
    let sku = raw.trim();
    if sku.is_empty() {
        return Err(DomainError::EmptySku);
    }
    Ok(sku.to_string())
}

/// Rack types are stored upper-cased
pub fn normalize_rack_type(raw: &str) -> DomainResult<String> {
    let rack_type = raw.trim().to_uppercase();
    if rack_type.is_empty() {
        return Err(DomainError::EmptyRackType);
    }
    Ok(rack_type)
}

/// Location codes are stored upper-cased
pub fn normalize_location_code(raw: &str) -> DomainResult<LocationCode> {
    let code = LocationCode::parse(raw);
    if code.as_str().is_empty() {
        return Err(DomainError::EmptyLocationCode);
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_cartons_validation() {
        assert!(validate_max_cartons(1).is_ok());
        assert!(validate_max_cartons(42).is_ok());
        assert_eq!(
            validate_max_cartons(0),
            Err(DomainError::NonPositiveCapacity(0))
        );
        assert!(validate_max_cartons(-5).is_err());
    }

    #[test]
    fn test_sku_keeps_case() {
        assert_eq!(normalize_sku("  ab-12 ").unwrap(), "ab-12");
        assert_eq!(normalize_sku("   "), Err(DomainError::EmptySku));
    }

    #[test]
    fn test_rack_type_uppercased() {
        assert_eq!(normalize_rack_type(" a ").unwrap(), "A");
        assert_eq!(normalize_rack_type(""), Err(DomainError::EmptyRackType));
    }

    #[test]
    fn test_location_code_uppercased() {
        assert_eq!(normalize_location_code(" p2-a-01").unwrap().as_str(), "P2-A-01");
        assert_eq!(
            normalize_location_code(" "),
            Err(DomainError::EmptyLocationCode)
        );
    }
}
