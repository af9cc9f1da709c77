use hostkit_types::{Currency, PayoutMethodId};
use serde::{Deserialize, Serialize};

/// Kind of payout method a payee declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutMethodType {
    BankAccount,
    #[serde(rename = "PAYPAL")]
    PayPal,
    AccountBalance,
    Other,
}

/// Where a payee receives money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutMethod {
    pub id: PayoutMethodId,
    #[serde(rename = "type")]
    pub kind: PayoutMethodType,
    /// Currency the payee asked to be paid in, when declared.
    #[serde(default)]
    pub currency: Option<Currency>,
}

/// Payment provider that settled a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutProvider {
    Wise,
    #[serde(rename = "PAYPAL")]
    PayPal,
    Stripe,
    Manual,
}
