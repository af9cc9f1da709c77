//! JSON fixtures describing one decision.
//!
//! A fixture carries the already-loaded records a resolver would hand to
//! the predicates: who is asking, the records involved and any grants
//! recorded earlier in the call.
//!
//! ```json
//! {
//!   "requester": { "userId": 6, "collectiveId": 60, "roles": [{ "collectiveId": 1, "role": "ADMIN" }] },
//!   "expense": { "id": 10, "status": "APPROVED", "collectiveId": 2, "fromCollectiveId": 40,
//!                "createdByUserId": 4, "amount": 10000, "currency": "USD", "createdAt": "2024-03-01T00:00:00Z" },
//!   "collective": { "id": 2, "kind": "COLLECTIVE", "currency": "USD", "hostId": 1 },
//!   "host": { "id": 1, "kind": "ORGANIZATION", "currency": "USD", "hostId": 1 }
//! }
//! ```

use anyhow::{bail, Context, Result};
use hostkit_auth::{ContextPermissionStore, FeatureLimits, PermissionType, Requester};
use hostkit_runtime::fx::PayExpenseOptions;
use hostkit_runtime::model::{Collective, Expense, ExpenseView, PayoutMethod, Transaction};
use hostkit_types::{Amount, CollectiveId, EntityId, OAuthScope, Role, UserId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// Reads and parses a JSON fixture.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read fixture {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid fixture {}", path.display()))
}

/// Requester description. An empty object is an anonymous caller.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequesterFixture {
    pub user_id: Option<UserId>,
    pub collective_id: Option<CollectiveId>,
    pub root: bool,
    pub roles: Vec<RoleFixture>,
    pub limits: FeatureLimits,
    /// Present when the call is made with an OAuth user token.
    pub token_scopes: Option<Vec<OAuthScope>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleFixture {
    pub collective_id: CollectiveId,
    pub role: Role,
}

impl RequesterFixture {
    /// Builds the requester. Both ids absent means anonymous; exactly one
    /// of them is an error.
    pub fn build(&self) -> Result<Requester> {
        let (user_id, collective_id) = match (self.user_id, self.collective_id) {
            (Some(user_id), Some(collective_id)) => (user_id, collective_id),
            (None, None) => return Ok(Requester::anonymous()),
            _ => bail!("requester needs both userId and collectiveId, or neither"),
        };
        let mut requester = Requester::user(user_id, collective_id).with_limits(self.limits);
        for grant in &self.roles {
            requester = requester.with_role(grant.collective_id, grant.role);
        }
        if self.root {
            requester = requester.as_root();
        }
        if let Some(scopes) = &self.token_scopes {
            requester = requester.with_token_scopes(scopes.iter().copied());
        }
        Ok(requester)
    }
}

/// A context permission recorded earlier in the call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantFixture {
    pub permission: PermissionType,
    pub entity_id: EntityId,
}

/// Fixture for expense decisions, conversion and the balance check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFixture {
    #[serde(default)]
    pub requester: RequesterFixture,
    pub expense: Expense,
    pub collective: Collective,
    #[serde(default)]
    pub host: Option<Collective>,
    #[serde(default)]
    pub grants: Vec<GrantFixture>,
    /// Available balance of the collective, for `balance`.
    #[serde(default)]
    pub balance: Option<Amount>,
    #[serde(default)]
    pub payout_method: Option<PayoutMethod>,
    #[serde(default)]
    pub options: PayExpenseOptions,
}

impl ExpenseFixture {
    pub fn view(&self) -> ExpenseView<'_> {
        ExpenseView::new(&self.expense, &self.collective, self.host.as_ref())
    }

    pub fn permissions(&self) -> ContextPermissionStore {
        let store = ContextPermissionStore::new();
        for grant in &self.grants {
            store.allow(grant.permission, grant.entity_id);
        }
        store
    }
}

/// Fixture for transaction decisions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFixture {
    #[serde(default)]
    pub requester: RequesterFixture,
    pub transaction: Transaction,
}
