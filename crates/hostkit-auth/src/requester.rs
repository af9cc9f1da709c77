//! Requester identity.

use crate::FeatureLimits;
use hostkit_types::{CollectiveId, OAuthScope, Role, UserId};
use serde::{Deserialize, Serialize};

/// A role held on one collective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    /// Collective the role applies to.
    pub collective_id: CollectiveId,
    /// Role held.
    pub role: Role,
}

/// An OAuth user token attached to the request.
///
/// Requests authenticated with a session cookie carry no token and are not
/// scope-restricted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserToken {
    /// Scopes the token was granted.
    pub scope: Vec<OAuthScope>,
}

/// The identity behind one inbound call.
///
/// A Requester answers "who is asking": the user (if any), the profile
/// collective they act as, the roles they hold, whether they are a platform
/// root, which features their account is barred from, and which OAuth
/// scopes their token carries.
///
/// # Immutability
///
/// Requesters are built once per call with the consuming builder methods
/// and then only read. Predicates receive `&Requester` and can never
/// attach ad hoc state to it; per-call grants go to a separate
/// [`ContextPermissionStore`](crate::ContextPermissionStore).
///
/// # Example
///
/// ```
/// use hostkit_auth::Requester;
/// use hostkit_types::{CollectiveId, Role, UserId};
///
/// let anonymous = Requester::anonymous();
/// assert!(!anonymous.is_authenticated());
///
/// let admin = Requester::user(UserId(1), CollectiveId(10))
///     .with_role(CollectiveId(20), Role::Admin);
/// assert!(admin.is_admin_of(CollectiveId(20)));
/// assert!(admin.is_admin_of(CollectiveId(10))); // own profile
/// assert!(!admin.is_admin_of(CollectiveId(30)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Requester {
    user_id: Option<UserId>,
    collective_id: Option<CollectiveId>,
    memberships: Vec<Membership>,
    is_root: bool,
    limits: FeatureLimits,
    user_token: Option<UserToken>,
}

impl Requester {
    /// Creates an unauthenticated requester.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a requester for a logged-in user acting as `collective_id`.
    ///
    /// Users administer their own profile collective.
    #[must_use]
    pub fn user(user_id: UserId, collective_id: CollectiveId) -> Self {
        Self {
            user_id: Some(user_id),
            collective_id: Some(collective_id),
            ..Self::default()
        }
    }

    /// Adds a role on a collective.
    #[must_use]
    pub fn with_role(mut self, collective_id: CollectiveId, role: Role) -> Self {
        let membership = Membership {
            collective_id,
            role,
        };
        if !self.memberships.contains(&membership) {
            self.memberships.push(membership);
        }
        self
    }

    /// Marks the requester as a platform root.
    #[must_use]
    pub fn as_root(mut self) -> Self {
        self.is_root = true;
        self
    }

    /// Sets the feature limitations of the requester's account.
    #[must_use]
    pub fn with_limits(mut self, limits: FeatureLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Attaches an OAuth user token restricted to `scope`.
    #[must_use]
    pub fn with_token_scopes(mut self, scope: impl IntoIterator<Item = OAuthScope>) -> Self {
        self.user_token = Some(UserToken {
            scope: scope.into_iter().collect(),
        });
        self
    }

    /// Returns `true` when a user identity is attached.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Returns the user id, or `None` when anonymous.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Returns the profile collective the user acts as.
    #[must_use]
    pub fn collective_id(&self) -> Option<CollectiveId> {
        self.collective_id
    }

    /// Returns the explicit memberships.
    #[must_use]
    pub fn memberships(&self) -> &[Membership] {
        &self.memberships
    }

    /// Returns `true` if the requester holds `role` on `collective_id`.
    ///
    /// The user's own profile collective counts as an admin membership.
    #[must_use]
    pub fn has_role(&self, collective_id: CollectiveId, role: Role) -> bool {
        if !self.is_authenticated() {
            return false;
        }
        if role == Role::Admin && self.collective_id == Some(collective_id) {
            return true;
        }
        self.memberships
            .iter()
            .any(|m| m.collective_id == collective_id && m.role == role)
    }

    /// Returns `true` if the requester administers `collective_id`.
    #[must_use]
    pub fn is_admin_of(&self, collective_id: CollectiveId) -> bool {
        self.has_role(collective_id, Role::Admin)
    }

    /// Returns `true` if the requester is an accountant of `collective_id`.
    #[must_use]
    pub fn is_accountant_of(&self, collective_id: CollectiveId) -> bool {
        self.has_role(collective_id, Role::Accountant)
    }

    /// Returns `true` for platform roots.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.is_authenticated() && self.is_root
    }

    /// Returns the feature limitations of the account.
    #[must_use]
    pub fn limits(&self) -> FeatureLimits {
        self.limits
    }

    /// Returns `true` if the account may use `feature`.
    #[must_use]
    pub fn can_use_feature(&self, feature: FeatureLimits) -> bool {
        self.limits.allows(feature)
    }

    /// Returns the OAuth token, if the request used one.
    #[must_use]
    pub fn user_token(&self) -> Option<&UserToken> {
        self.user_token.as_ref()
    }
}

impl std::fmt::Display for Requester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.user_id, self.collective_id) {
            (Some(user), Some(collective)) => write!(f, "{user}@{collective}"),
            (Some(user), None) => write!(f, "{user}"),
            _ => f.write_str("anonymous"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_has_no_roles() {
        let requester = Requester::anonymous();
        assert!(!requester.is_authenticated());
        assert!(!requester.is_admin_of(CollectiveId(1)));
        assert!(requester.user_id().is_none());
        assert_eq!(requester.to_string(), "anonymous");
    }

    #[test]
    fn anonymous_cannot_be_root() {
        let requester = Requester::anonymous().as_root();
        assert!(!requester.is_root());
    }

    #[test]
    fn roles_are_per_collective() {
        let requester = Requester::user(UserId(1), CollectiveId(10))
            .with_role(CollectiveId(20), Role::Accountant);

        assert!(requester.is_accountant_of(CollectiveId(20)));
        assert!(!requester.is_admin_of(CollectiveId(20)));
        assert!(!requester.is_accountant_of(CollectiveId(10)));
    }

    #[test]
    fn duplicate_roles_are_ignored() {
        let requester = Requester::user(UserId(1), CollectiveId(10))
            .with_role(CollectiveId(20), Role::Admin)
            .with_role(CollectiveId(20), Role::Admin);
        assert_eq!(requester.memberships().len(), 1);
    }

    #[test]
    fn feature_limits_are_exposed() {
        let requester = Requester::user(UserId(1), CollectiveId(10))
            .with_limits(FeatureLimits::USE_EXPENSES);
        assert!(!requester.can_use_feature(FeatureLimits::USE_EXPENSES));
        assert!(requester.can_use_feature(FeatureLimits::COMMENTS));
    }

    #[test]
    fn token_scopes_are_recorded() {
        let requester = Requester::user(UserId(1), CollectiveId(10))
            .with_token_scopes([OAuthScope::Account]);
        let token = requester.user_token().expect("token attached");
        assert_eq!(token.scope, vec![OAuthScope::Account]);
    }

    #[test]
    fn deserializes_from_fixture_json() {
        let json = r#"{
            "userId": 3,
            "collectiveId": 30,
            "memberships": [{ "collectiveId": 40, "role": "ADMIN" }],
            "userToken": { "scope": ["expenses"] }
        }"#;
        let requester: Requester = serde_json::from_str(json).expect("deserialize");

        assert_eq!(requester.user_id(), Some(UserId(3)));
        assert!(requester.is_admin_of(CollectiveId(40)));
        assert!(!requester.is_root());
        assert_eq!(requester.to_string(), "user:3@collective:30");
    }
}
