//! Permission primitives for hostkit.
//!
//! This crate holds the request-scoped half of every authorization
//! decision: who is asking, what they were explicitly granted during this
//! call, what their token allows, and the policy shapes accounts configure.
//!
//! # Decision Inputs
//!
//! ```text
//! Decision = Requester(WHO) ∩ OAuth scope(TOKEN) ∩ ContextPermissionStore(GRANTS) ∩ Policies
//! ```
//!
//! | Input | Type | Lifetime |
//! |-------|------|----------|
//! | [`Requester`] | Immutable value | One inbound call |
//! | [`ContextPermissionStore`] | Allow-list cache | One inbound call |
//! | [`OAuthScope`] via [`check_scope`] | Token restriction | Token lifetime |
//! | [`Policies`] | Typed account configuration | Until an admin edits it |
//!
//! The predicates that combine these with loaded records live in
//! `hostkit-runtime`.
//!
//! # Crate Architecture
//!
//! ```text
//! hostkit-types
//!     ↑
//! hostkit-auth  ◄── THIS CRATE
//!     ↑
//! hostkit-runtime (expense/transaction predicates, currency conversion)
//! ```

pub mod context;
pub mod error;
pub mod feature;
pub mod policy;
pub mod requester;
pub mod scope;

pub use context::{ContextPermissionStore, PermissionType};
pub use error::PermissionError;
pub use feature::FeatureLimits;
pub use policy::{
    AuthorCannotApprovePolicy, MinimumAdminsPolicy, MinimumAdminsScope, Policies, Policy, PolicyName,
};
pub use requester::{Membership, Requester, UserToken};
pub use scope::{check_scope, enforce_scope};

pub use hostkit_types::OAuthScope;
