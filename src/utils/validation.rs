use validator::Validate;

use crate::error::Result;

pub fn validate<T: Validate>(val: &T) -> Result<()> {
    val.validate()?;
    Ok(())
}

/// Rejects blank strings for free-text inputs that the backend would
/// otherwise store as empty records.
pub fn require_non_blank(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(crate::error::Error::BadRequest(format!("{} must not be blank", field)));
    }
    Ok(trimmed.to_string())
}
