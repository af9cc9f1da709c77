//! Permission failure taxonomy.
//!
//! [`PermissionError`] is the closed set of reasons a throwing predicate
//! may return. The boolean `can_*` entry points never surface it for
//! expected denials; `assert_*` entry points return it verbatim so the
//! GraphQL error formatter can show the message to the user.

use hostkit_types::{Amount, ErrorCode, OAuthScope};
use thiserror::Error;

/// Reason a permission check failed.
///
/// # Example
///
/// ```
/// use hostkit_auth::{OAuthScope, PermissionError};
/// use hostkit_types::ErrorCode;
///
/// let err = PermissionError::ScopeForbidden { scope: OAuthScope::Root };
/// assert_eq!(
///     err.to_string(),
///     "The User Token is not allowed for operations in scope \"root\"."
/// );
/// assert_eq!(err.code(), "SCOPE_FORBIDDEN");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// No identity is attached to the request.
    #[error("You need to be authenticated to perform this action")]
    Unauthenticated,

    /// The identity exists but its account is limited for this action.
    #[error("Your account is not allowed to {action}")]
    UnsupportedUserFeature {
        /// Action that was attempted.
        action: &'static str,
    },

    /// The role or ownership test failed.
    #[error("You don't have permission to {action}")]
    MinimalConditionNotMet {
        /// Action that was attempted.
        action: &'static str,
    },

    /// The entity's current state does not permit the action.
    #[error("Can't {action} when status is {status}")]
    UnsupportedStatus {
        /// Action that was attempted.
        action: &'static str,
        /// Current status of the entity.
        status: &'static str,
    },

    /// The author-cannot-approve policy blocked the approval.
    #[error("Expense author cannot approve expenses over {threshold}")]
    AuthorCannotApprove {
        /// Threshold configured by the policy that triggered.
        threshold: Amount,
    },

    /// An unregistered permission type reached the context permission store.
    #[error("Invalid permission type '{0}'")]
    InvalidPermissionType(String),

    /// The OAuth token scope list does not cover the operation.
    #[error("The User Token is not allowed for operations in scope \"{scope}\".")]
    ScopeForbidden {
        /// Scope the operation requires.
        scope: OAuthScope,
    },
}

impl ErrorCode for PermissionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::UnsupportedUserFeature { .. } => "UNSUPPORTED_USER_FEATURE",
            Self::MinimalConditionNotMet { .. } => "MINIMAL_CONDITION_NOT_MET",
            Self::UnsupportedStatus { .. } => "UNSUPPORTED_STATUS",
            Self::AuthorCannotApprove { .. } => "AUTHOR_CANNOT_APPROVE",
            Self::InvalidPermissionType(_) => "INVALID_PERMISSION_TYPE",
            Self::ScopeForbidden { .. } => "SCOPE_FORBIDDEN",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostkit_types::{assert_error_codes, Currency};

    fn all_variants() -> Vec<PermissionError> {
        vec![
            PermissionError::Unauthenticated,
            PermissionError::UnsupportedUserFeature { action: "edit" },
            PermissionError::MinimalConditionNotMet { action: "edit" },
            PermissionError::UnsupportedStatus {
                action: "edit",
                status: "PAID",
            },
            PermissionError::AuthorCannotApprove {
                threshold: Amount::new(10_000, Currency::Usd),
            },
            PermissionError::InvalidPermissionType("NOPE".into()),
            PermissionError::ScopeForbidden {
                scope: OAuthScope::Expenses,
            },
        ]
    }

    #[test]
    fn codes_follow_conventions() {
        assert_error_codes(&all_variants(), "");
    }

    #[test]
    fn nothing_is_recoverable() {
        assert!(all_variants().iter().all(|e| !e.is_recoverable()));
    }

    #[test]
    fn status_message_names_action_and_status() {
        let err = PermissionError::UnsupportedStatus {
            action: "delete expense",
            status: "PAID",
        };
        assert_eq!(err.to_string(), "Can't delete expense when status is PAID");
    }

    #[test]
    fn author_message_formats_threshold() {
        let err = PermissionError::AuthorCannotApprove {
            threshold: Amount::new(10_000, Currency::Usd),
        };
        assert_eq!(
            err.to_string(),
            "Expense author cannot approve expenses over $100.00"
        );
    }
}
