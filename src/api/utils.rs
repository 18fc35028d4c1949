//! API utility functions
//!
//! Input validation shared by the handlers.

use crate::error::AppError;

/// Validate a prompt before it is forwarded to the model
///
/// The prompt is forwarded verbatim; trimming only decides emptiness.
///
/// # Arguments
/// * `field` - Name used in the error message
/// * `text` - Text to validate
/// * `max_length` - Maximum length in characters
///
/// # Returns
/// * `Ok(())` - Text is valid
/// * `Err(AppError)` - Text is empty or too long
pub fn validate_prompt(field: &str, text: &str, max_length: usize) -> Result<(), AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!("{} cannot be empty", field)));
    }
    if trimmed.chars().count() > max_length {
        return Err(AppError::InvalidInput(format!(
            "{} exceeds maximum length of {} characters",
            field, max_length
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_prompt() {
        assert!(validate_prompt("Prompt", "hello", 10).is_ok());
        assert!(validate_prompt("Prompt", "  hello  ", 5).is_ok());

        let empty = validate_prompt("Prompt", "   \n", 10).unwrap_err();
        assert_eq!(empty.to_string(), "Invalid input: Prompt cannot be empty");

        let long = validate_prompt("Message", "abcdef", 5).unwrap_err();
        assert!(long.to_string().contains("maximum length of 5"));
    }

    #[test]
    fn test_length_counts_characters() {
        // Five characters, fifteen bytes
        assert!(validate_prompt("Prompt", "ありがとう", 5).is_ok());
    }
}
