//! Core vocabulary for hostkit.
//!
//! This crate holds the leaf types every other hostkit crate speaks in:
//! record identifiers, currencies and amounts, membership roles, OAuth
//! scopes and the [`ErrorCode`] contract.
//!
//! # Crate Architecture
//!
//! ```text
//! hostkit-types   (IDs, Currency, Role, OAuthScope, ErrorCode)  ◄── HERE
//!     ↑
//! hostkit-auth    (Requester, ContextPermissionStore, PermissionError, policies)
//!     ↑
//! hostkit-runtime (records, predicates, currency conversion, config)
//!     ↑
//! hostkit-cli     (fixture-driven decision tool)
//! ```
//!
//! # Identifier Design
//!
//! Platform records are addressed by integer primary keys. Each record
//! family gets its own newtype so a collective id cannot be passed where an
//! expense id is expected.
//!
//! # Example
//!
//! ```
//! use hostkit_types::{Amount, CollectiveId, Currency, EntityId, ExpenseId};
//!
//! let collective = CollectiveId(42);
//! assert_eq!(collective.to_string(), "collective:42");
//!
//! let expense = ExpenseId(7);
//! assert_eq!(EntityId::from(expense), EntityId(7));
//!
//! let amount = Amount::new(100_001, Currency::Usd);
//! assert_eq!(amount.to_string(), "$1,000.01");
//! ```

mod construct;
mod currency;
mod error;
mod id;
mod role;
mod scope;

pub use construct::TryNew;
pub use currency::{format_amount, Amount, Currency, ParseCurrencyError};
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{
    CollectiveId, EntityId, ExpenseId, PaymentMethodId, PayoutMethodId, TransactionId, UserId,
};
pub use role::Role;
pub use scope::{OAuthScope, ParseScopeError};
