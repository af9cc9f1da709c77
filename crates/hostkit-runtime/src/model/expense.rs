use super::{Collective, PayoutProvider};
use chrono::{DateTime, Utc};
use hostkit_types::{Amount, CollectiveId, Currency, ExpenseId, UserId};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseStatus {
    Draft,
    Unverified,
    Pending,
    Approved,
    Rejected,
    Processing,
    Error,
    Paid,
    ScheduledForPayment,
}

impl ExpenseStatus {
    pub const ALL: [Self; 9] = [
        Self::Draft,
        Self::Unverified,
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Processing,
        Self::Error,
        Self::Paid,
        Self::ScheduledForPayment,
    ];

    /// Returns the stored status name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Unverified => "UNVERIFIED",
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Processing => "PROCESSING",
            Self::Error => "ERROR",
            Self::Paid => "PAID",
            Self::ScheduledForPayment => "SCHEDULED_FOR_PAYMENT",
        }
    }
}

impl std::fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expense type. `Charge` expenses are virtual-card charges created
/// automatically when a card is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseKind {
    #[default]
    Invoice,
    Receipt,
    Charge,
    Grant,
    Settlement,
    Unclassified,
}

/// Details kept while an expense is a draft waiting for its payee.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DraftDetails {
    /// Account the draft was addressed to, once it exists.
    pub payee_id: Option<CollectiveId>,
    /// Email the invitation was sent to.
    pub invite_email: Option<String>,
}

/// A Wise quote stored when the payout was prepared.
///
/// `rate` converts `source_currency` into `target_currency`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WiseQuote {
    pub source_currency: Currency,
    pub target_currency: Currency,
    pub rate: f64,
}

/// Currency conversion reported by PayPal for a payout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaypalConversion {
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub exchange_rate: f64,
}

/// Payment-provider metadata attached to an expense.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderData {
    pub wise_quote: Option<WiseQuote>,
    pub paypal_conversion: Option<PaypalConversion>,
}

/// Ledger record written when an expense was paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSettlement {
    pub host_currency: Currency,
    /// Multiplier from the expense currency to `host_currency`.
    pub host_currency_fx_rate: f64,
    #[serde(default)]
    pub provider: Option<PayoutProvider>,
    pub settled_at: DateTime<Utc>,
}

/// A request for reimbursement or payment submitted to a collective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub status: ExpenseStatus,
    #[serde(default, rename = "type")]
    pub kind: ExpenseKind,
    /// Collective the expense is submitted to.
    pub collective_id: CollectiveId,
    /// Payee account.
    pub from_collective_id: CollectiveId,
    pub created_by_user_id: UserId,
    /// Amount in cents of `currency`.
    pub amount: i64,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub draft: Option<DraftDetails>,
    #[serde(default)]
    pub data: ProviderData,
    #[serde(default)]
    pub settlement: Option<LedgerSettlement>,
}

impl Expense {
    /// Creates a pending invoice created now.
    #[must_use]
    pub fn new(
        id: ExpenseId,
        collective_id: CollectiveId,
        from_collective_id: CollectiveId,
        created_by_user_id: UserId,
        amount: Amount,
    ) -> Self {
        Self {
            id,
            status: ExpenseStatus::Pending,
            kind: ExpenseKind::Invoice,
            collective_id,
            from_collective_id,
            created_by_user_id,
            amount: amount.cents,
            currency: amount.currency,
            created_at: Utc::now(),
            draft: None,
            data: ProviderData::default(),
            settlement: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: ExpenseStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ExpenseKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    #[must_use]
    pub fn with_draft(mut self, draft: DraftDetails) -> Self {
        self.draft = Some(draft);
        self
    }

    #[must_use]
    pub fn with_wise_quote(mut self, quote: WiseQuote) -> Self {
        self.data.wise_quote = Some(quote);
        self
    }

    #[must_use]
    pub fn with_paypal_conversion(mut self, conversion: PaypalConversion) -> Self {
        self.data.paypal_conversion = Some(conversion);
        self
    }

    #[must_use]
    pub fn with_settlement(mut self, settlement: LedgerSettlement) -> Self {
        self.settlement = Some(settlement);
        self
    }

    /// Returns the amount with its currency.
    #[must_use]
    pub fn total(&self) -> Amount {
        Amount::new(self.amount, self.currency)
    }

    /// Returns the payee recorded on the draft, if any.
    #[must_use]
    pub fn draft_payee(&self) -> Option<CollectiveId> {
        self.draft.as_ref().and_then(|d| d.payee_id)
    }
}

/// An expense together with the accounts its permissions depend on.
///
/// `host` is the fiscal host of `collective`, when it has one. For a
/// self-hosted collective it is the collective itself.
#[derive(Debug, Clone, Copy)]
pub struct ExpenseView<'a> {
    pub expense: &'a Expense,
    pub collective: &'a Collective,
    pub host: Option<&'a Collective>,
}

impl<'a> ExpenseView<'a> {
    #[must_use]
    pub fn new(
        expense: &'a Expense,
        collective: &'a Collective,
        host: Option<&'a Collective>,
    ) -> Self {
        Self {
            expense,
            collective,
            host,
        }
    }

    /// Returns the host id from the collective record.
    #[must_use]
    pub fn host_id(&self) -> Option<CollectiveId> {
        self.collective.host_id
    }
}
