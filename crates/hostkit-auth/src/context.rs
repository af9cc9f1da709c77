//! Per-call context permissions.
//!
//! Some decisions depend on something the caller proved earlier in the same
//! call rather than on a role: presenting the secret key of a draft expense
//! lets an invited payee see that draft's private details, for instance.
//! The resolver records that proof with [`ContextPermissionStore::allow`]
//! and predicates read it back with [`ContextPermissionStore::check`].
//!
//! # Allow-only
//!
//! The store holds grants only. There is no deny entry and no revoke: a
//! store lives for one inbound call and is dropped with it.
//!
//! # Unknown permission types
//!
//! Name-based access (`allow_named`, `check_named`) rejects names that are
//! not a registered [`PermissionType`] with
//! [`PermissionError::InvalidPermissionType`] instead of answering `false`,
//! so a typo fails loudly rather than silently denying.

use crate::PermissionError;
use hostkit_types::EntityId;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Registered context permission types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionType {
    SeeAccountLegalName,
    SeeAccountPrivateProfileInfo,
    SeeAccountLocation,
    SeeExpenseAttachmentsUrl,
    SeePayoutMethodDetails,
    SeeExpenseDraftPrivateDetails,
    SeeIncognitoAccountDetails,
}

impl PermissionType {
    /// All registered permission types.
    pub const ALL: [Self; 7] = [
        Self::SeeAccountLegalName,
        Self::SeeAccountPrivateProfileInfo,
        Self::SeeAccountLocation,
        Self::SeeExpenseAttachmentsUrl,
        Self::SeePayoutMethodDetails,
        Self::SeeExpenseDraftPrivateDetails,
        Self::SeeIncognitoAccountDetails,
    ];

    /// Returns the registered name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SeeAccountLegalName => "SEE_ACCOUNT_LEGAL_NAME",
            Self::SeeAccountPrivateProfileInfo => "SEE_ACCOUNT_PRIVATE_PROFILE_INFO",
            Self::SeeAccountLocation => "SEE_ACCOUNT_LOCATION",
            Self::SeeExpenseAttachmentsUrl => "SEE_EXPENSE_ATTACHMENTS_URL",
            Self::SeePayoutMethodDetails => "SEE_PAYOUT_METHOD_DETAILS",
            Self::SeeExpenseDraftPrivateDetails => "SEE_EXPENSE_DRAFT_PRIVATE_DETAILS",
            Self::SeeIncognitoAccountDetails => "SEE_INCOGNITO_ACCOUNT_DETAILS",
        }
    }
}

impl std::fmt::Display for PermissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionType {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PermissionError::InvalidPermissionType(s.to_string()))
    }
}

/// Allow-list of `(PermissionType, EntityId)` grants for one inbound call.
///
/// Uses interior mutability so the resolver can hand the same `&store` to
/// every predicate it calls while still recording grants along the way.
///
/// # Example
///
/// ```
/// use hostkit_auth::{ContextPermissionStore, PermissionType};
/// use hostkit_types::EntityId;
///
/// let store = ContextPermissionStore::new();
/// store.allow(PermissionType::SeeExpenseDraftPrivateDetails, EntityId(42));
///
/// assert!(store.check(PermissionType::SeeExpenseDraftPrivateDetails, EntityId(42)));
/// assert!(!store.check(PermissionType::SeeExpenseDraftPrivateDetails, EntityId(43)));
/// assert!(store.check_named("NOT_A_PERMISSION", EntityId(42)).is_err());
/// ```
#[derive(Debug, Default)]
pub struct ContextPermissionStore {
    granted: RwLock<HashSet<(PermissionType, EntityId)>>,
}

impl ContextPermissionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a grant.
    pub fn allow(&self, kind: PermissionType, entity: impl Into<EntityId>) {
        let entity = entity.into();
        tracing::debug!(permission = %kind, entity = %entity, "context permission granted");
        self.granted.write().insert((kind, entity));
    }

    /// Records a grant by permission type name.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::InvalidPermissionType`] if `name` is not
    /// registered.
    pub fn allow_named(&self, name: &str, entity: impl Into<EntityId>) -> Result<(), PermissionError> {
        let kind = name.parse::<PermissionType>()?;
        self.allow(kind, entity);
        Ok(())
    }

    /// Returns `true` iff `allow` recorded this exact pair.
    #[must_use]
    pub fn check(&self, kind: PermissionType, entity: impl Into<EntityId>) -> bool {
        self.granted.read().contains(&(kind, entity.into()))
    }

    /// Looks up a grant by permission type name.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::InvalidPermissionType`] if `name` is not
    /// registered.
    pub fn check_named(&self, name: &str, entity: impl Into<EntityId>) -> Result<bool, PermissionError> {
        let kind = name.parse::<PermissionType>()?;
        Ok(self.check(kind, entity))
    }

    /// Returns the number of grants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.granted.read().len()
    }

    /// Returns `true` when nothing was granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.granted.read().is_empty()
    }
}
