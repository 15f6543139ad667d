//! Field validation for camp records
//!
//! Every persisted value passes through one of these checks before it is
//! handed to the database.

use thiserror::Error;

/// Youngest age accepted for a camper
pub const MIN_CAMPER_AGE: i64 = 8;
/// Oldest age accepted for a camper
pub const MAX_CAMPER_AGE: i64 = 18;
/// First hour a signup may be scheduled at
pub const MIN_SIGNUP_HOUR: i64 = 0;
/// Last hour a signup may be scheduled at
pub const MAX_SIGNUP_HOUR: i64 = 23;

/// A field value that cannot be stored
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Camper name is empty
    #[error("Camper must have a name.")]
    EmptyName,

    /// Camper age outside the accepted range
    #[error("Age must be between 8 and 18")]
    AgeOutOfRange(i64),

    /// Signup hour outside the accepted range
    #[error("Time must be between 0 and 23")]
    TimeOutOfRange(i64),
}

/// Reject empty camper names
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// Reject ages outside 8..=18
pub fn validate_age(age: i64) -> Result<(), ValidationError> {
    if !(MIN_CAMPER_AGE..=MAX_CAMPER_AGE).contains(&age) {
        return Err(ValidationError::AgeOutOfRange(age));
    }
    Ok(())
}

/// Reject hours outside 0..=23
pub fn validate_time(time: i64) -> Result<(), ValidationError> {
    if !(MIN_SIGNUP_HOUR..=MAX_SIGNUP_HOUR).contains(&time) {
        return Err(ValidationError::TimeOutOfRange(time));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bounds() {
        assert_eq!(validate_age(7), Err(ValidationError::AgeOutOfRange(7)));
        assert!(validate_age(8).is_ok());
        assert!(validate_age(18).is_ok());
        assert_eq!(validate_age(19), Err(ValidationError::AgeOutOfRange(19)));
    }

    #[test]
    fn test_time_bounds() {
        assert_eq!(validate_time(-1), Err(ValidationError::TimeOutOfRange(-1)));
        assert!(validate_time(0).is_ok());
        assert!(validate_time(23).is_ok());
        assert_eq!(validate_time(24), Err(ValidationError::TimeOutOfRange(24)));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(validate_name(""), Err(ValidationError::EmptyName));
        // Whitespace is still a name
        assert!(validate_name(" ").is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::AgeOutOfRange(30).to_string(),
            "Age must be between 8 and 18"
        );
        assert_eq!(
            ValidationError::TimeOutOfRange(30).to_string(),
            "Time must be between 0 and 23"
        );
        assert_eq!(ValidationError::EmptyName.to_string(), "Camper must have a name.");
    }
}
