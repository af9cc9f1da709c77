//! Authorization decisions and currency helpers for hostkit.
//!
//! Core types ([`Requester`], [`ContextPermissionStore`], [`PermissionError`])
//! are defined in `hostkit-auth`. This crate combines them with loaded
//! platform records:
//!
//! - [`model`]: collectives, expenses, transactions, payout methods
//! - [`auth`]: expense and transaction predicates, author-cannot-approve policy
//! - [`fx`]: provenance-chained currency conversion and the balance check
//! - [`names`]: account-holder vs legal-name matching
//! - [`config`]: layered TOML configuration
//!
//! # Example
//!
//! ```
//! use hostkit_runtime::auth::{can_approve_expense, RequestContext};
//! use hostkit_runtime::model::{Collective, CollectiveKind, Expense, ExpenseStatus, ExpenseView};
//! use hostkit_runtime::{ContextPermissionStore, Requester};
//! use hostkit_types::{Amount, CollectiveId, Currency, ExpenseId, Role, UserId};
//!
//! let host = Collective::new(CollectiveId(1), CollectiveKind::Organization, Currency::Usd)
//!     .with_host(CollectiveId(1));
//! let collective = Collective::new(CollectiveId(2), CollectiveKind::Collective, Currency::Usd)
//!     .with_host(CollectiveId(1));
//! let expense = Expense::new(
//!     ExpenseId(3),
//!     CollectiveId(2),
//!     CollectiveId(40),
//!     UserId(4),
//!     Amount::new(10_000, Currency::Usd),
//! )
//! .with_status(ExpenseStatus::Pending);
//!
//! let admin = Requester::user(UserId(9), CollectiveId(90)).with_role(CollectiveId(2), Role::Admin);
//! let store = ContextPermissionStore::new();
//! let ctx = RequestContext::new(&admin, &store);
//! let view = ExpenseView::new(&expense, &collective, Some(&host));
//!
//! assert!(can_approve_expense(&ctx, &view));
//! ```

pub mod auth;
pub mod config;
pub mod fx;
pub mod model;
pub mod names;

pub use hostkit_auth::{ContextPermissionStore, PermissionError, Requester};
