//! Currency conversion with provenance, and the pre-payment balance check.
//!
//! An expense amount can be expressed in another currency from several
//! sources. The most trustworthy source available wins:
//!
//! ```text
//! same currency → Wise quote → PayPal conversion → ledger settlement → platform table
//!   (no rate)      exact         exact               exact               approximate
//! ```
//!
//! The platform table and the balance ledger are collaborators reached
//! through [`ExchangeRateProvider`] and [`BalanceProvider`].

mod balance;
mod conversion;
mod error;
mod provider;
mod rate;

pub use balance::{BalanceChecker, PayExpenseOptions};
pub use conversion::{convert_cents, expense_amount_in_currency};
pub use error::FxError;
pub use provider::{BalanceProvider, ExchangeRateProvider, StaticBalances, StaticRateTable};
pub use rate::{ConvertedAmount, ExchangeRate, RateSource};
