//! Input validation for the ingestion boundary.
//!
//! The engine itself rejects nothing; a submission that reaches it is
//! assumed structurally sound. These helpers are for the layer that
//! accepts raw submissions (API handler, CLI, import job) to run before
//! handing data to `pulse-engine`.

use thiserror::Error;

/// Product catalog accepted at the ingestion boundary.
pub const VALID_PRODUCTS: &[&str] = &["Rings", "Earrings", "Necklaces", "Bracelets", "Pendants"];

/// Maximum accepted review length in characters.
pub const MAX_REVIEW_CHARS: usize = 5000;

/// Input validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("unknown product_id {product_id:?}: must be one of {valid}", valid = VALID_PRODUCTS.join(", "))]
    UnknownProduct { product_id: String },

    #[error("rating must be between 1 and 5, got {rating}")]
    RatingOutOfRange { rating: u8 },

    #[error("review_text cannot be empty")]
    EmptyReview,

    #[error("review_text cannot exceed {MAX_REVIEW_CHARS} characters, got {length}")]
    ReviewTooLong { length: usize },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a product identifier against the catalog.
pub fn validate_product_id(product_id: &str) -> ValidationResult<()> {
    if VALID_PRODUCTS.contains(&product_id) {
        Ok(())
    } else {
        Err(ValidationError::UnknownProduct {
            product_id: product_id.to_string(),
        })
    }
}

/// Validate a star rating.
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(ValidationError::RatingOutOfRange { rating })
    }
}

/// Validate review text: non-empty and within the length limit.
pub fn validate_review_text(review_text: &str) -> ValidationResult<()> {
    if review_text.trim().is_empty() {
        return Err(ValidationError::EmptyReview);
    }

    let length = review_text.chars().count();
    if length > MAX_REVIEW_CHARS {
        return Err(ValidationError::ReviewTooLong { length });
    }

    Ok(())
}

/// Validate a complete feedback submission, collecting every failure.
pub fn validate_new_feedback(
    product_id: &str,
    rating: u8,
    review_text: &str,
) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if let Err(e) = validate_product_id(product_id) {
        errors.push(e);
    }

    if let Err(e) = validate_rating(rating) {
        errors.push(e);
    }

    if let Err(e) = validate_review_text(review_text) {
        errors.push(e);
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_submission() {
        assert!(validate_new_feedback("Rings", 5, "Love this ring!").is_ok());
    }

    #[test]
    fn test_unknown_product() {
        let err = validate_new_feedback("Watches", 5, "Nice").unwrap_err();
        assert!(matches!(err, ValidationError::UnknownProduct { .. }));
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_empty_review() {
        let err = validate_review_text("   ").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyReview));
    }

    #[test]
    fn test_review_length_limit() {
        let long_text = "a".repeat(MAX_REVIEW_CHARS + 1);
        let err = validate_review_text(&long_text).unwrap_err();
        assert!(matches!(err, ValidationError::ReviewTooLong { .. }));

        let at_limit = "a".repeat(MAX_REVIEW_CHARS);
        assert!(validate_review_text(&at_limit).is_ok());
    }

    #[test]
    fn test_multiple_errors_collected() {
        let err = validate_new_feedback("Watches", 9, "").unwrap_err();
        match err {
            ValidationError::Multiple(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected Multiple, got {other:?}"),
        }
    }
}
