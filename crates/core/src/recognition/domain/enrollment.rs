use thiserror::Error;

/// What the service said about one enrollment attempt. Consumed
/// immediately to update status and notify the user; never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrollmentOutcome {
    pub success: bool,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum EnrollmentError {
    /// Rejected before any capture or network call.
    #[error("name must not be empty")]
    EmptyName,
    #[error("frame capture failed: {0}")]
    Capture(String),
    #[error("enrollment request failed: {0}")]
    Request(String),
}

/// Validates a raw name field: trims surrounding whitespace, rejects empty.
pub fn validate_name(raw: &str) -> Result<&str, EnrollmentError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnrollmentError::EmptyName);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    #[case::tabs_and_newlines(" \t\n ")]
    fn test_blank_names_rejected(#[case] raw: &str) {
        assert!(matches!(validate_name(raw), Err(EnrollmentError::EmptyName)));
    }

    #[rstest]
    #[case::plain("Alice", "Alice")]
    #[case::padded("  Bob  ", "Bob")]
    #[case::inner_space(" Mary Ann ", "Mary Ann")]
    fn test_valid_names_trimmed(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(validate_name(raw).unwrap(), expected);
    }
}
