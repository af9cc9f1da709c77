//! Account policies.
//!
//! Collectives and hosts can switch on policies that tighten the default
//! permission outcomes. Each policy has its own typed configuration; the
//! platform stores them as a JSON object keyed by policy name.
//!
//! ```json
//! {
//!   "EXPENSE_AUTHOR_CANNOT_APPROVE": {
//!     "enabled": true,
//!     "amountInCents": 10000,
//!     "appliesToHostedCollectives": true,
//!     "appliesToSingleAdminCollectives": false
//!   },
//!   "COLLECTIVE_MINIMUM_ADMINS": {
//!     "numberOfAdmins": 2,
//!     "applies": "ALL_COLLECTIVES",
//!     "freeze": false
//!   }
//! }
//! ```
//!
//! Unknown keys are rejected at deserialization time, so a misspelled
//! policy name is an error instead of a silently absent policy.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Names of the policies an account can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyName {
    ExpenseAuthorCannotApprove,
    CollectiveMinimumAdmins,
}

impl PolicyName {
    /// Returns the stored policy key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExpenseAuthorCannotApprove => "EXPENSE_AUTHOR_CANNOT_APPROVE",
            Self::CollectiveMinimumAdmins => "COLLECTIVE_MINIMUM_ADMINS",
        }
    }
}

impl FromStr for PolicyName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXPENSE_AUTHOR_CANNOT_APPROVE" => Ok(Self::ExpenseAuthorCannotApprove),
            "COLLECTIVE_MINIMUM_ADMINS" => Ok(Self::CollectiveMinimumAdmins),
            other => Err(format!("unknown policy '{other}'")),
        }
    }
}

/// Configuration of `EXPENSE_AUTHOR_CANNOT_APPROVE`.
///
/// When enabled, the author of an expense above `amount_in_cents` cannot
/// approve it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorCannotApprovePolicy {
    /// Whether the policy is active.
    pub enabled: bool,
    /// Amounts strictly above this threshold are covered.
    pub amount_in_cents: i64,
    /// Host-level only: extend the policy to hosted collectives.
    pub applies_to_hosted_collectives: bool,
    /// Host-level only: extend the policy to hosted collectives that have a
    /// single administrator.
    pub applies_to_single_admin_collectives: bool,
}

impl AuthorCannotApprovePolicy {
    /// Returns `true` if the policy is enabled and `amount` is above the
    /// threshold.
    #[must_use]
    pub fn covers(&self, amount: i64) -> bool {
        self.enabled && amount > self.amount_in_cents
    }
}

/// Which hosted collectives `COLLECTIVE_MINIMUM_ADMINS` applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MinimumAdminsScope {
    #[default]
    NewCollectives,
    AllCollectives,
}

/// Configuration of `COLLECTIVE_MINIMUM_ADMINS`, set by hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MinimumAdminsPolicy {
    /// Required administrator count. Zero disables the policy.
    pub number_of_admins: u32,
    pub applies: MinimumAdminsScope,
    /// Freeze collectives that fall below the count.
    pub freeze: bool,
}

impl MinimumAdminsPolicy {
    /// Returns `true` if `admin_count` meets the configured minimum.
    #[must_use]
    pub fn is_satisfied_by(&self, admin_count: u32) -> bool {
        admin_count >= self.number_of_admins
    }
}

/// A single policy with its typed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    ExpenseAuthorCannotApprove(AuthorCannotApprovePolicy),
    CollectiveMinimumAdmins(MinimumAdminsPolicy),
}

impl Policy {
    /// Returns the policy's name.
    #[must_use]
    pub fn name(&self) -> PolicyName {
        match self {
            Self::ExpenseAuthorCannotApprove(_) => PolicyName::ExpenseAuthorCannotApprove,
            Self::CollectiveMinimumAdmins(_) => PolicyName::CollectiveMinimumAdmins,
        }
    }
}

/// The policies configured on one account.
///
/// # Example
///
/// ```
/// use hostkit_auth::{AuthorCannotApprovePolicy, Policies, Policy, PolicyName};
///
/// let mut policies = Policies::default();
/// assert!(policies.get(PolicyName::ExpenseAuthorCannotApprove).is_none());
///
/// policies.set(Policy::ExpenseAuthorCannotApprove(AuthorCannotApprovePolicy {
///     enabled: true,
///     amount_in_cents: 10_000,
///     ..Default::default()
/// }));
/// assert!(policies.author_cannot_approve().is_some_and(|p| p.covers(10_001)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Policies {
    #[serde(
        rename = "EXPENSE_AUTHOR_CANNOT_APPROVE",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    expense_author_cannot_approve: Option<AuthorCannotApprovePolicy>,
    #[serde(
        rename = "COLLECTIVE_MINIMUM_ADMINS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    collective_minimum_admins: Option<MinimumAdminsPolicy>,
}

impl Policies {
    /// Returns the configured policy `name`, if any.
    #[must_use]
    pub fn get(&self, name: PolicyName) -> Option<Policy> {
        match name {
            PolicyName::ExpenseAuthorCannotApprove => self
                .expense_author_cannot_approve
                .map(Policy::ExpenseAuthorCannotApprove),
            PolicyName::CollectiveMinimumAdmins => self
                .collective_minimum_admins
                .map(Policy::CollectiveMinimumAdmins),
        }
    }

    /// Stores `policy`, replacing any previous configuration of the same name.
    pub fn set(&mut self, policy: Policy) {
        match policy {
            Policy::ExpenseAuthorCannotApprove(config) => {
                self.expense_author_cannot_approve = Some(config);
            }
            Policy::CollectiveMinimumAdmins(config) => {
                self.collective_minimum_admins = Some(config);
            }
        }
    }

    /// Returns the `EXPENSE_AUTHOR_CANNOT_APPROVE` configuration.
    #[must_use]
    pub fn author_cannot_approve(&self) -> Option<&AuthorCannotApprovePolicy> {
        self.expense_author_cannot_approve.as_ref()
    }

    /// Returns the `COLLECTIVE_MINIMUM_ADMINS` configuration.
    #[must_use]
    pub fn minimum_admins(&self) -> Option<&MinimumAdminsPolicy> {
        self.collective_minimum_admins.as_ref()
    }
}
