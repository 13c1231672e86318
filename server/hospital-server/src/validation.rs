//! Request validation utilities for consistent validation across handlers
//!
//! This module provides a `RequestValidation` trait and helper macros to
//! centralize validation logic and ensure consistent error messages.

use crate::error::ApiError;

/// Trait for validating request payloads
///
/// Implemented by every create/update request type so handlers can reject bad
/// input with a 400 before touching a service.
pub trait RequestValidation {
    /// Returns `Ok(())` if validation passes, or a validation [`ApiError`]
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] describing the first failed check.
    fn validate(&self) -> Result<(), ApiError>;
}

/// Macro for validating fields with custom predicates
///
/// # Usage
///
/// ```rust,ignore
/// validate_field!(self.email, !self.email.trim().is_empty(), "Email is required");
/// ```
#[macro_export]
macro_rules! validate_field {
    (@reject $kind:ident, $field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::error::ApiError::$kind($message));
        }
    };
    ($field:expr, $predicate:expr, $message:expr) => {
        $crate::validate_field!(@reject validation, $field, $predicate, $message);
    };
}

/// Macro for validating required fields (non-blank strings)
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $message:expr) => {
        $crate::validate_field!(@reject missing_field, $field, !$field.trim().is_empty(), $message);
    };
}

/// Macro for validating string length
#[macro_export]
macro_rules! validate_length {
    ($field:expr, $min:expr, $max:expr, $message:expr) => {
        let len = $field.chars().count();
        $crate::validate_field!($field, len >= $min && len <= $max, $message);
    };
}

/// Macro for validating email format with the same rule account registration applies
#[macro_export]
macro_rules! validate_email {
    ($field:expr, $message:expr) => {
        $crate::validate_field!(
            @reject invalid_format,
            $field,
            ::auth_identity::is_valid_email($field.trim()),
            $message
        );
    };
}

/// Macro for validating a `YYYY-MM-DD` date string
#[macro_export]
macro_rules! validate_date {
    ($field:expr, $message:expr) => {
        $crate::validate_field!(
            @reject invalid_format,
            $field,
            chrono::NaiveDate::parse_from_str($field.trim(), "%Y-%m-%d").is_ok(),
            $message
        );
    };
}

/// Macro for validating an `HH:MM` or `HH:MM:SS` time string
#[macro_export]
macro_rules! validate_time {
    ($field:expr, $message:expr) => {
        $crate::validate_field!(
            @reject invalid_format,
            $field,
            chrono::NaiveTime::parse_from_str($field.trim(), "%H:%M").is_ok()
                || chrono::NaiveTime::parse_from_str($field.trim(), "%H:%M:%S").is_ok(),
            $message
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use error_common::codes;

    struct TestRequest {
        name: String,
        email: String,
        date: String,
        time: String,
    }

    impl RequestValidation for TestRequest {
        fn validate(&self) -> Result<(), ApiError> {
            validate_required!(self.name, "Name is required");
            validate_length!(self.name, 2, 100, "Name must be between 2 and 100 characters");
            validate_email!(self.email, "Invalid email format");
            validate_date!(self.date, "Date must be YYYY-MM-DD");
            validate_time!(self.time, "Time must be HH:MM");
            Ok(())
        }
    }

    fn valid() -> TestRequest {
        TestRequest {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            date: "2024-05-01".to_string(),
            time: "10:00".to_string(),
        }
    }

    #[test]
    fn test_validation_success() {
        assert!(valid().validate().is_ok());
        let with_seconds = TestRequest {
            time: "10:00:30".to_string(),
            ..valid()
        };
        assert!(with_seconds.validate().is_ok());
    }

    #[test]
    fn test_validation_blank_name() {
        let request = TestRequest {
            name: "   ".to_string(),
            ..valid()
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.error_code(), codes::validation::MISSING_REQUIRED_FIELD);
    }

    #[test]
    fn test_validation_short_name() {
        let request = TestRequest {
            name: "J".to_string(),
            ..valid()
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.error_code(), codes::validation::INVALID_INPUT);
    }

    #[test]
    fn test_validation_bad_email() {
        for email in ["john.example.com", "john@example.", "@example.com", "jo hn@example.com"] {
            let request = TestRequest {
                email: email.to_string(),
                ..valid()
            };
            let err = request.validate().unwrap_err();
            assert_eq!(err.error_code(), codes::validation::INVALID_FORMAT, "{email}");
        }
    }

    #[test]
    fn test_validation_bad_date_and_time() {
        let bad_date = TestRequest {
            date: "2024-13-01".to_string(),
            ..valid()
        };
        assert!(bad_date.validate().is_err());

        let bad_time = TestRequest {
            time: "25:00".to_string(),
            ..valid()
        };
        assert!(bad_time.validate().is_err());
    }
}
