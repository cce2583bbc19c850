// src/utils.rs

use crate::error::AppError;

/// Identifiers are opaque UUID-shaped tokens; reject anything else before
/// touching storage. Variant for `validator` derive attributes.
pub fn validate_uuid(id: &str) -> Result<(), validator::ValidationError> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("malformed_identifier"))
}

/// Same check for path/query parameters, reporting which field was bad.
pub fn require_uuid(id: &str, what: &str) -> Result<(), AppError> {
    if uuid::Uuid::parse_str(id).is_err() {
        return Err(AppError::BadRequest(format!("Valid {} is required", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_uuid_accepted() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
    }

    #[test]
    fn test_malformed_uuid_rejected() {
        assert!(validate_uuid("definitely-not-a-uuid").is_err());
        assert!(matches!(
            require_uuid("", "userId"),
            Err(AppError::BadRequest(_))
        ));
    }
}
