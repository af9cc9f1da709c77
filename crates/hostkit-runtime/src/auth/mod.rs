//! Authorization predicates over loaded records.
//!
//! Request-scoped inputs ([`Requester`], [`ContextPermissionStore`]) are
//! defined in `hostkit-auth`. This module combines them with records:
//!
//! - [`expense`]: one decision function per expense action, exposed as
//!   `can_*` (boolean) and `assert_can_*` (fail-fast) pairs
//! - [`author_policy`]: the `EXPENSE_AUTHOR_CANNOT_APPROVE` resolver
//! - [`transaction`]: refund, rejection and invoice download
//!
//! # Architecture
//!
//! ```text
//! hostkit-auth (request-scoped inputs)
//!     Requester, ContextPermissionStore, PermissionError, Policies
//!         ↓
//! hostkit-runtime/auth (decisions)
//!     RequestContext + ExpenseView / Transaction → decide → bool | Result
//! ```

pub mod author_policy;
pub mod expense;
mod roles;
pub mod transaction;

pub use expense::*;
pub use transaction::{TransactionAction, TransactionRules};

use hostkit_auth::{ContextPermissionStore, Requester};

/// Per-call inputs shared by every predicate of one inbound request.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub requester: &'a Requester,
    pub permissions: &'a ContextPermissionStore,
}

impl<'a> RequestContext<'a> {
    #[must_use]
    pub fn new(requester: &'a Requester, permissions: &'a ContextPermissionStore) -> Self {
        Self {
            requester,
            permissions,
        }
    }
}
