use super::PayoutProvider;
use chrono::{DateTime, Utc};
use hostkit_types::{CollectiveId, Currency, PaymentMethodId, TransactionId};
use serde::{Deserialize, Serialize};

/// Ledger entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    AddedFunds,
    Contribution,
    Expense,
    PlatformTip,
    Refund,
}

/// A ledger entry moving money from a payer into a receiving collective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    /// Receiving collective.
    pub collective_id: CollectiveId,
    /// Payer.
    pub from_collective_id: CollectiveId,
    /// Fiscal host of the receiving collective.
    #[serde(default)]
    pub host_collective_id: Option<CollectiveId>,
    pub created_at: DateTime<Utc>,
    /// Amount in cents of `currency`.
    pub amount: i64,
    pub currency: Currency,
    #[serde(default)]
    pub host_currency: Option<Currency>,
    #[serde(default)]
    pub host_currency_fx_rate: Option<f64>,
    #[serde(default)]
    pub payment_method_id: Option<PaymentMethodId>,
    #[serde(default)]
    pub payout_provider: Option<PayoutProvider>,
}

impl Transaction {
    /// Creates a transaction recorded now, with no host or payment method.
    #[must_use]
    pub fn new(
        id: TransactionId,
        kind: TransactionKind,
        collective_id: CollectiveId,
        from_collective_id: CollectiveId,
        amount: i64,
        currency: Currency,
    ) -> Self {
        Self {
            id,
            kind,
            collective_id,
            from_collective_id,
            host_collective_id: None,
            created_at: Utc::now(),
            amount,
            currency,
            host_currency: None,
            host_currency_fx_rate: None,
            payment_method_id: None,
            payout_provider: None,
        }
    }

    #[must_use]
    pub fn with_host(mut self, host_id: CollectiveId) -> Self {
        self.host_collective_id = Some(host_id);
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    #[must_use]
    pub fn with_payment_method(mut self, payment_method_id: PaymentMethodId) -> Self {
        self.payment_method_id = Some(payment_method_id);
        self
    }
}
