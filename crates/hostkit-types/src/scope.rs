//! OAuth scopes.
//!
//! A personal or application token may be restricted to a list of scopes.
//! Each protected operation belongs to exactly one scope; a token whose
//! list lacks that scope cannot perform the operation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// An OAuth scope an operation belongs to.
///
/// # Example
///
/// ```
/// use hostkit_types::OAuthScope;
///
/// assert_eq!(OAuthScope::VirtualCards.as_str(), "virtualCards");
/// assert_eq!("root".parse::<OAuthScope>(), Ok(OAuthScope::Root));
/// assert!("bogus".parse::<OAuthScope>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OAuthScope {
    /// Read the user's email address.
    Email,
    /// Act as the user's incognito profile.
    Incognito,
    /// Manage account settings and members.
    Account,
    /// Submit and manage expenses.
    Expenses,
    /// Create and manage contributions.
    Orders,
    /// Refund and reject transactions.
    Transactions,
    /// Manage virtual cards.
    VirtualCards,
    /// Publish updates.
    Updates,
    /// Start and reply to conversations.
    Conversations,
    /// Manage webhooks.
    Webhooks,
    /// Perform fiscal-host operations.
    Host,
    /// Platform administration.
    Root,
    /// Manage OAuth applications.
    Applications,
    /// Manage connected accounts.
    ConnectedAccounts,
    /// Read the activity log.
    Activities,
}

impl OAuthScope {
    /// All scopes, in declaration order.
    pub const ALL: [Self; 15] = [
        Self::Email,
        Self::Incognito,
        Self::Account,
        Self::Expenses,
        Self::Orders,
        Self::Transactions,
        Self::VirtualCards,
        Self::Updates,
        Self::Conversations,
        Self::Webhooks,
        Self::Host,
        Self::Root,
        Self::Applications,
        Self::ConnectedAccounts,
        Self::Activities,
    ];

    /// Returns the scope name as it appears in token scope lists.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Incognito => "incognito",
            Self::Account => "account",
            Self::Expenses => "expenses",
            Self::Orders => "orders",
            Self::Transactions => "transactions",
            Self::VirtualCards => "virtualCards",
            Self::Updates => "updates",
            Self::Conversations => "conversations",
            Self::Webhooks => "webhooks",
            Self::Host => "host",
            Self::Root => "root",
            Self::Applications => "applications",
            Self::ConnectedAccounts => "connectedAccounts",
            Self::Activities => "activities",
        }
    }
}

impl std::fmt::Display for OAuthScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a scope name is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown OAuth scope '{0}'")]
pub struct ParseScopeError(pub String);

impl FromStr for OAuthScope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| ParseScopeError(s.to_string()))
    }
}
