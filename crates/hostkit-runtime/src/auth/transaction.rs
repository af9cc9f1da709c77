//! Transaction permission predicates.
//!
//! | Requester | refund / reject | download invoice |
//! |-----------|-----------------|------------------|
//! | root | yes | no |
//! | host admin of the receiving collective | yes | yes |
//! | receiving collective admin | within the refund window, not added funds, payment method attached | no |
//! | payer admin or accountant | no | yes |
//! | anyone else | no | no |
//!
//! The refund window is read from [`RuleSettings`]; predicates that depend
//! on it have `*_at` variants taking an explicit clock.

use super::RequestContext;
use crate::config::RuleSettings;
use crate::model::{Transaction, TransactionKind};
use chrono::{DateTime, Duration, Utc};
use hostkit_auth::{enforce_scope, PermissionError, Requester};
use hostkit_types::OAuthScope;
use std::str::FromStr;

/// Actions decided on a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionAction {
    Refund,
    Reject,
    DownloadInvoice,
}

impl TransactionAction {
    pub const ALL: [Self; 3] = [Self::Refund, Self::Reject, Self::DownloadInvoice];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Refund => "refund",
            Self::Reject => "reject",
            Self::DownloadInvoice => "download-invoice",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Refund => "refund this transaction",
            Self::Reject => "reject this transaction",
            Self::DownloadInvoice => "download the invoice of this transaction",
        }
    }

    fn required_scope(self) -> Option<OAuthScope> {
        match self {
            Self::Refund | Self::Reject => Some(OAuthScope::Transactions),
            Self::DownloadInvoice => None,
        }
    }
}

impl std::fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransactionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| format!("unknown transaction action '{s}'"))
    }
}

/// Transaction predicates bound to a refund window.
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use hostkit_runtime::auth::{RequestContext, TransactionRules};
/// use hostkit_runtime::model::{Transaction, TransactionKind};
/// use hostkit_runtime::{ContextPermissionStore, Requester};
/// use hostkit_types::{CollectiveId, Currency, PaymentMethodId, Role, TransactionId, UserId};
///
/// let rules = TransactionRules::default();
/// let now = Utc::now();
/// let txn = Transaction::new(
///     TransactionId(1),
///     TransactionKind::Contribution,
///     CollectiveId(2),
///     CollectiveId(50),
///     1_000,
///     Currency::Usd,
/// )
/// .with_host(CollectiveId(1))
/// .with_payment_method(PaymentMethodId(7))
/// .with_created_at(now - Duration::days(10));
///
/// let admin = Requester::user(UserId(9), CollectiveId(90)).with_role(CollectiveId(2), Role::Admin);
/// let store = ContextPermissionStore::new();
/// let ctx = RequestContext::new(&admin, &store);
///
/// assert!(rules.can_refund_at(&ctx, &txn, now));
/// assert!(!rules.can_refund_at(&ctx, &txn, now + Duration::days(25)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionRules {
    refund_window: Duration,
}

impl Default for TransactionRules {
    fn default() -> Self {
        Self::new(&RuleSettings::default())
    }
}

impl TransactionRules {
    #[must_use]
    pub fn new(settings: &RuleSettings) -> Self {
        Self {
            refund_window: settings.refund_window(),
        }
    }

    /// Window during which collective admins may refund or reject.
    #[must_use]
    pub fn refund_window(&self) -> Duration {
        self.refund_window
    }

    /// Decides `action` on `txn` as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::Unauthenticated`],
    /// [`PermissionError::ScopeForbidden`] or
    /// [`PermissionError::MinimalConditionNotMet`].
    pub fn decide(
        &self,
        action: TransactionAction,
        requester: &Requester,
        txn: &Transaction,
        now: DateTime<Utc>,
    ) -> Result<(), PermissionError> {
        if !requester.is_authenticated() {
            return Err(PermissionError::Unauthenticated);
        }
        if let Some(scope) = action.required_scope() {
            enforce_scope(requester, scope)?;
        }

        let allowed = match action {
            TransactionAction::Refund | TransactionAction::Reject => {
                self.may_reverse(requester, txn, now)
            }
            TransactionAction::DownloadInvoice => may_download_invoice(requester, txn),
        };
        if allowed {
            Ok(())
        } else {
            Err(PermissionError::MinimalConditionNotMet {
                action: action.description(),
            })
        }
    }

    fn may_reverse(&self, requester: &Requester, txn: &Transaction, now: DateTime<Utc>) -> bool {
        if requester.is_root() || is_host_admin(requester, txn) {
            return true;
        }
        requester.is_admin_of(txn.collective_id)
            && now.signed_duration_since(txn.created_at) < self.refund_window
            && txn.kind != TransactionKind::AddedFunds
            && txn.payment_method_id.is_some()
    }

    fn evaluate(
        &self,
        action: TransactionAction,
        ctx: &RequestContext<'_>,
        txn: &Transaction,
        now: DateTime<Utc>,
    ) -> Result<(), PermissionError> {
        let result = self.decide(action, ctx.requester, txn, now);
        match &result {
            Ok(()) => tracing::debug!(
                requester = %ctx.requester,
                action = action.name(),
                transaction = %txn.id,
                "transaction action allowed"
            ),
            Err(err) => tracing::warn!(
                requester = %ctx.requester,
                action = action.name(),
                transaction = %txn.id,
                reason = %err,
                "transaction action denied"
            ),
        }
        result
    }

    #[must_use]
    pub fn can_refund(&self, ctx: &RequestContext<'_>, txn: &Transaction) -> bool {
        self.can_refund_at(ctx, txn, Utc::now())
    }

    #[must_use]
    pub fn can_refund_at(
        &self,
        ctx: &RequestContext<'_>,
        txn: &Transaction,
        now: DateTime<Utc>,
    ) -> bool {
        self.evaluate(TransactionAction::Refund, ctx, txn, now).is_ok()
    }

    /// # Errors
    ///
    /// Returns the reason the refund is denied.
    pub fn assert_can_refund(
        &self,
        ctx: &RequestContext<'_>,
        txn: &Transaction,
    ) -> Result<(), PermissionError> {
        self.assert_can_refund_at(ctx, txn, Utc::now())
    }

    /// # Errors
    ///
    /// Returns the reason the refund is denied.
    pub fn assert_can_refund_at(
        &self,
        ctx: &RequestContext<'_>,
        txn: &Transaction,
        now: DateTime<Utc>,
    ) -> Result<(), PermissionError> {
        self.evaluate(TransactionAction::Refund, ctx, txn, now)
    }

    /// Rejecting a contribution follows the refund rules.
    #[must_use]
    pub fn can_reject(&self, ctx: &RequestContext<'_>, txn: &Transaction) -> bool {
        self.can_reject_at(ctx, txn, Utc::now())
    }

    #[must_use]
    pub fn can_reject_at(
        &self,
        ctx: &RequestContext<'_>,
        txn: &Transaction,
        now: DateTime<Utc>,
    ) -> bool {
        self.evaluate(TransactionAction::Reject, ctx, txn, now).is_ok()
    }

    /// # Errors
    ///
    /// Returns the reason the rejection is denied.
    pub fn assert_can_reject(
        &self,
        ctx: &RequestContext<'_>,
        txn: &Transaction,
    ) -> Result<(), PermissionError> {
        self.assert_can_reject_at(ctx, txn, Utc::now())
    }

    /// # Errors
    ///
    /// Returns the reason the rejection is denied.
    pub fn assert_can_reject_at(
        &self,
        ctx: &RequestContext<'_>,
        txn: &Transaction,
        now: DateTime<Utc>,
    ) -> Result<(), PermissionError> {
        self.evaluate(TransactionAction::Reject, ctx, txn, now)
    }

    #[must_use]
    pub fn can_download_invoice(&self, ctx: &RequestContext<'_>, txn: &Transaction) -> bool {
        self.evaluate(TransactionAction::DownloadInvoice, ctx, txn, Utc::now())
            .is_ok()
    }

    /// # Errors
    ///
    /// Returns the reason the download is denied.
    pub fn assert_can_download_invoice(
        &self,
        ctx: &RequestContext<'_>,
        txn: &Transaction,
    ) -> Result<(), PermissionError> {
        self.evaluate(TransactionAction::DownloadInvoice, ctx, txn, Utc::now())
    }
}

fn is_host_admin(requester: &Requester, txn: &Transaction) -> bool {
    txn.host_collective_id
        .is_some_and(|host| requester.is_admin_of(host))
}

fn may_download_invoice(requester: &Requester, txn: &Transaction) -> bool {
    requester.is_admin_of(txn.from_collective_id)
        || requester.is_accountant_of(txn.from_collective_id)
        || is_host_admin(requester, txn)
}
