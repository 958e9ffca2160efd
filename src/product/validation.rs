//! Required-field validation for new products.

use super::ProductFields;
use crate::error::StoreError;

/// Keys every product must carry when it is added.
pub const REQUIRED_FIELDS: [&str; 6] = ["title", "description", "price", "thumbnail", "code", "stock"];

/// Required keys absent from `fields`, in declaration order.
pub fn missing_required_fields(fields: &ProductFields) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|key| !fields.has(key))
        .collect()
}

/// Validate a field set before insertion.
pub fn validate_new_product(fields: &ProductFields) -> Result<(), StoreError> {
    let missing = missing_required_fields(fields);
    if !missing.is_empty() {
        return Err(StoreError::Validation(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )));
    }
    Ok(())
}
