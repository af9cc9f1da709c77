//! Unified error-code interface for hostkit.
//!
//! Every hostkit error type implements [`ErrorCode`] so callers (a GraphQL
//! error formatter, the CLI) can surface a stable machine-readable code next
//! to the human message.
//!
//! # Example
//!
//! ```
//! use hostkit_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LookupError {
//!     NotFound,
//!     Timeout,
//! }
//!
//! impl ErrorCode for LookupError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::NotFound => "LOOKUP_NOT_FOUND",
//!             Self::Timeout => "LOOKUP_TIMEOUT",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Timeout)
//!     }
//! }
//!
//! assert_eq!(LookupError::Timeout.code(), "LOOKUP_TIMEOUT");
//! assert!(LookupError::Timeout.is_recoverable());
//! ```

/// Machine-readable error code contract.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**, e.g. `"MINIMAL_CONDITION_NOT_MET"`
/// - **Stable**: codes are part of the API surfaced to clients
///
/// # Recoverability
///
/// An error is recoverable when retrying may succeed (a collaborator timed
/// out, an exchange rate was not yet published). Permission denials are
/// never recoverable: the same request fails the same way.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying the operation may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows hostkit conventions.
///
/// # Panics
///
/// Panics when the code is empty, lacks `expected_prefix`, or is not
/// UPPER_SNAKE_CASE.
///
/// # Example
///
/// ```
/// use hostkit_types::{assert_error_code, ErrorCode};
///
/// struct Denied;
///
/// impl ErrorCode for Denied {
///     fn code(&self) -> &'static str { "FX_RATE_UNAVAILABLE" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Denied, "FX_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates every error in `errors` with [`assert_error_code`].
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    enum SampleError {
        Transient,
        Permanent,
    }

    impl ErrorCode for SampleError {
        fn code(&self) -> &'static str {
            match self {
                Self::Transient => "SAMPLE_TRANSIENT",
                Self::Permanent => "SAMPLE_PERMANENT",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Transient)
        }
    }

    #[test]
    fn codes_and_recoverability() {
        assert_eq!(SampleError::Transient.code(), "SAMPLE_TRANSIENT");
        assert!(SampleError::Transient.is_recoverable());
        assert!(!SampleError::Permanent.is_recoverable());
    }

    #[test]
    fn accepts_all_variants() {
        assert_error_codes(&[SampleError::Transient, SampleError::Permanent], "SAMPLE_");
    }

    #[test]
    #[should_panic(expected = "must start with prefix")]
    fn rejects_wrong_prefix() {
        assert_error_code(&SampleError::Transient, "OTHER_");
    }

    #[test]
    fn upper_snake_case_rules() {
        assert!(is_upper_snake_case("UNSUPPORTED_STATUS"));
        assert!(is_upper_snake_case("ERROR_404"));
        assert!(!is_upper_snake_case(""));
        assert!(!is_upper_snake_case("lower"));
        assert!(!is_upper_snake_case("_LEADING"));
        assert!(!is_upper_snake_case("TRAILING_"));
        assert!(!is_upper_snake_case("DOUBLE__UNDERSCORE"));
    }
}
