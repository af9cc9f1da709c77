//! Platform records the predicates read.
//!
//! Records arrive already loaded by the data-access layer. They are plain
//! serde structs so the CLI and tests can load them from JSON fixtures.

mod collective;
mod expense;
mod payout;
mod transaction;

pub use collective::{Collective, CollectiveKind};
pub use expense::{
    DraftDetails, Expense, ExpenseKind, ExpenseStatus, ExpenseView, LedgerSettlement,
    PaypalConversion, ProviderData, WiseQuote,
};
pub use payout::{PayoutMethod, PayoutMethodType, PayoutProvider};
pub use transaction::{Transaction, TransactionKind};
