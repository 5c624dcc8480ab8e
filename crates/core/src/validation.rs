//! Input validation for stories, scenes and screenplay text.

use crate::error::CoreError;

/// Maximum length of story and scene titles (matches the `VARCHAR(255)` columns).
pub const MAX_TITLE_LENGTH: usize = 255;

/// Upper bound on text submitted to the screenplay endpoints, in characters.
pub const MAX_SCREENPLAY_LENGTH: usize = 100_000;

/// Validate a story or scene title: non-blank and at most [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(field: &str, title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate scene content: must contain something other than whitespace.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Scene content is required".into()));
    }
    Ok(())
}

/// Validate text sent to the text model (conversion, scoring, summary).
pub fn validate_screenplay_text(field: &str, text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if text.chars().count() > MAX_SCREENPLAY_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_SCREENPLAY_LENGTH} characters"
        )));
    }
    Ok(())
}
